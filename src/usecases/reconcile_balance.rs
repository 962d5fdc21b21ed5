//! Post-send balance reconciliation.
//!
//! The gateway reports the authoritative remaining balance on each
//! successful send; the matching sender identity in the stored user
//! snapshot is overwritten with that exact figure and persisted. The
//! overwrite only happens when the submitted sender identifier parses as
//! a numeric id; a non-numeric identifier skips reconciliation entirely.

use crate::infra::{contracts::CredentialStore, error::AppError};

/// What happened to a reconciliation attempt. The skip variants are
/// deliberate no-ops, not failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcileOutcome {
    Applied,
    SkippedNonNumericSender,
    SkippedNoUser,
    SkippedNoMatchingSender,
}

/// Overwrites the balance of the sender identity named by
/// `raw_sender_id` with the gateway-reported figure and persists the
/// updated user snapshot. Last writer wins; nothing is accumulated.
pub fn reconcile_sender_balance(
    store: &mut dyn CredentialStore,
    raw_sender_id: &str,
    remaining_balance: f64,
) -> Result<ReconcileOutcome, AppError> {
    let Ok(sender_id) = raw_sender_id.parse::<i64>() else {
        tracing::debug!(sender = %raw_sender_id, "non-numeric sender id, skipping balance reconciliation");
        return Ok(ReconcileOutcome::SkippedNonNumericSender);
    };

    let Some(mut user) = store.current_user() else {
        tracing::debug!("no stored user, skipping balance reconciliation");
        return Ok(ReconcileOutcome::SkippedNoUser);
    };

    let balance = format_balance(remaining_balance);
    if !user.overwrite_sender_balance(sender_id, &balance) {
        tracing::debug!(sender_id, "no matching sender identity, skipping balance reconciliation");
        return Ok(ReconcileOutcome::SkippedNoMatchingSender);
    }

    store.update_user(&user)?;
    Ok(ReconcileOutcome::Applied)
}

/// Renders the gateway's numeric balance the way it is displayed and
/// stored: no trailing `.0` on whole figures.
fn format_balance(value: f64) -> String {
    format!("{value}")
}
