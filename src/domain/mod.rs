//! Domain layer: core entities and business rules.

pub mod account;
pub mod dispatch;
pub mod message;
pub mod recipient;

/// Returns the domain module name for smoke checks.
pub fn module_name() -> &'static str {
    "domain"
}
