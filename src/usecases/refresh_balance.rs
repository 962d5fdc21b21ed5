//! On-demand balance refresh from the sender-identity endpoint.
//!
//! The gateway's list is authoritative: the stored user's identities are
//! replaced wholesale and the snapshot is persisted.

use crate::{
    domain::account::SenderIdentity,
    infra::contracts::CredentialStore,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SenderIdentitySourceError {
    Unauthenticated,
    Unavailable,
    InvalidData,
}

pub trait SenderIdentitySource {
    fn list_sender_identities(&self) -> Result<Vec<SenderIdentity>, SenderIdentitySourceError>;
}

impl<T> SenderIdentitySource for &T
where
    T: SenderIdentitySource + ?Sized,
{
    fn list_sender_identities(&self) -> Result<Vec<SenderIdentity>, SenderIdentitySourceError> {
        (*self).list_sender_identities()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshBalancesError {
    NotLoggedIn,
    Unauthenticated,
    TemporarilyUnavailable,
    DataContractViolation,
    SessionPersist,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshBalancesOutput {
    pub sender_ids: Vec<SenderIdentity>,
}

pub fn refresh_balances(
    source: &dyn SenderIdentitySource,
    store: &mut dyn CredentialStore,
) -> Result<RefreshBalancesOutput, RefreshBalancesError> {
    let Some(mut user) = store.current_user() else {
        return Err(RefreshBalancesError::NotLoggedIn);
    };

    let sender_ids = source
        .list_sender_identities()
        .map_err(map_source_error)?;

    user.sender_ids = sender_ids.clone();
    if let Err(error) = store.update_user(&user) {
        tracing::error!(error = ?error, "failed to persist refreshed balances");
        return Err(RefreshBalancesError::SessionPersist);
    }

    Ok(RefreshBalancesOutput { sender_ids })
}

fn map_source_error(error: SenderIdentitySourceError) -> RefreshBalancesError {
    match error {
        SenderIdentitySourceError::Unauthenticated => RefreshBalancesError::Unauthenticated,
        SenderIdentitySourceError::Unavailable => RefreshBalancesError::TemporarilyUnavailable,
        SenderIdentitySourceError::InvalidData => RefreshBalancesError::DataContractViolation,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::{domain::account::UserProfile, infra::stubs::MemoryCredentialStore};

    struct StubSource {
        result: Result<Vec<SenderIdentity>, SenderIdentitySourceError>,
        calls: Mutex<usize>,
    }

    impl StubSource {
        fn with_result(result: Result<Vec<SenderIdentity>, SenderIdentitySourceError>) -> Self {
            Self {
                result,
                calls: Mutex::new(0),
            }
        }

        fn call_count(&self) -> usize {
            *self.calls.lock().expect("calls lock")
        }
    }

    impl SenderIdentitySource for StubSource {
        fn list_sender_identities(&self) -> Result<Vec<SenderIdentity>, SenderIdentitySourceError> {
            *self.calls.lock().expect("calls lock") += 1;
            self.result.clone()
        }
    }

    fn identity(id: i64, balance: &str) -> SenderIdentity {
        SenderIdentity {
            id,
            name: format!("SENDER-{id}"),
            balance: balance.to_owned(),
            is_active: true,
            country_prices: vec![],
        }
    }

    fn store_with_user() -> MemoryCredentialStore {
        MemoryCredentialStore::logged_in(
            "tok",
            UserProfile {
                id: 7,
                username: "amina".to_owned(),
                email: "amina@example.com".to_owned(),
                phone_number: None,
                sender_ids: vec![identity(5, "100.00")],
            },
        )
    }

    #[test]
    fn replaces_stored_identities_wholesale_and_persists() {
        let fetched = vec![identity(5, "61.75"), identity(9, "10.00")];
        let source = StubSource::with_result(Ok(fetched.clone()));
        let mut store = store_with_user();

        let output = refresh_balances(&source, &mut store).expect("refresh should succeed");

        assert_eq!(output.sender_ids, fetched);
        assert_eq!(
            store.user.as_ref().map(|u| u.sender_ids.clone()),
            Some(fetched)
        );
        assert_eq!(store.persist_count, 1);
    }

    #[test]
    fn requires_a_logged_in_user_before_contacting_source() {
        let source = StubSource::with_result(Ok(vec![]));
        let mut store = MemoryCredentialStore::default();

        let err = refresh_balances(&source, &mut store).expect_err("must fail");

        assert_eq!(err, RefreshBalancesError::NotLoggedIn);
        assert_eq!(source.call_count(), 0);
    }

    #[test]
    fn maps_unauthenticated_error() {
        let source = StubSource::with_result(Err(SenderIdentitySourceError::Unauthenticated));
        let mut store = store_with_user();

        let err = refresh_balances(&source, &mut store).expect_err("must fail");

        assert_eq!(err, RefreshBalancesError::Unauthenticated);
        assert_eq!(store.persist_count, 0);
    }

    #[test]
    fn maps_unavailable_error_and_leaves_store_untouched() {
        let source = StubSource::with_result(Err(SenderIdentitySourceError::Unavailable));
        let mut store = store_with_user();

        let err = refresh_balances(&source, &mut store).expect_err("must fail");

        assert_eq!(err, RefreshBalancesError::TemporarilyUnavailable);
        assert_eq!(
            store
                .user
                .as_ref()
                .and_then(|u| u.sender_identity(5).map(|s| s.balance.clone()))
                .as_deref(),
            Some("100.00")
        );
    }
}
