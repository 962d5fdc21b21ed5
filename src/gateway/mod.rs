//! Gateway integration layer: HTTP client and wire formats for the
//! remote SMS service.

mod client;
mod wire;

pub use client::HttpGateway;

/// Returns the gateway module name for smoke checks.
pub fn module_name() -> &'static str {
    "gateway"
}
