//! Use case layer: application workflows and orchestration.

pub mod bootstrap;
pub mod context;
pub mod dispatch_batch;
pub mod load_messages;
pub mod login;
pub mod logout;
pub mod progress;
pub mod reconcile_balance;
pub mod refresh_balance;

/// Returns the usecases module name for smoke checks.
pub fn module_name() -> &'static str {
    "usecases"
}
