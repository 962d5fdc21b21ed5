use crate::infra::{error::AppError, session::FileSessionStore};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogoutOutcome {
    pub session_removed: bool,
}

/// Clears the persisted session. Logging out while already logged out is
/// not an error.
pub fn logout(store: &mut FileSessionStore) -> Result<LogoutOutcome, AppError> {
    let session_removed = store.clear()?;

    Ok(LogoutOutcome { session_removed })
}
