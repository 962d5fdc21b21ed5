#[cfg(test)]
use anyhow::Result;

#[cfg(test)]
use crate::{
    domain::account::UserProfile,
    infra::{
        config::AppConfig,
        contracts::{ConfigAdapter, CredentialStore},
        error::AppError,
    },
};

#[cfg(test)]
#[derive(Debug, Clone, Default)]
pub struct StubConfigAdapter;

#[cfg(test)]
impl ConfigAdapter for StubConfigAdapter {
    fn load(&self) -> Result<AppConfig> {
        Ok(AppConfig::default())
    }
}

/// In-memory credential store for use case tests. Counts persists so tests
/// can assert how often a workflow wrote the user snapshot back.
#[cfg(test)]
#[derive(Debug, Clone, Default)]
pub struct MemoryCredentialStore {
    pub token: Option<String>,
    pub user: Option<UserProfile>,
    pub persist_count: usize,
}

#[cfg(test)]
impl MemoryCredentialStore {
    pub fn logged_in(token: &str, user: UserProfile) -> Self {
        Self {
            token: Some(token.to_owned()),
            user: Some(user),
            persist_count: 0,
        }
    }
}

#[cfg(test)]
impl CredentialStore for MemoryCredentialStore {
    fn current_token(&self) -> Option<String> {
        self.token.clone()
    }

    fn current_user(&self) -> Option<UserProfile> {
        self.user.clone()
    }

    fn update_user(&mut self, user: &UserProfile) -> Result<(), AppError> {
        if self.token.is_none() {
            return Err(AppError::NotLoggedIn);
        }

        self.user = Some(user.clone());
        self.persist_count += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stub_config_returns_defaults() {
        let adapter = StubConfigAdapter;
        let config = adapter.load().expect("stub config must load");

        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn memory_store_counts_persists() {
        let user = UserProfile {
            id: 1,
            username: "u".to_owned(),
            email: "u@example.com".to_owned(),
            phone_number: None,
            sender_ids: vec![],
        };
        let mut store = MemoryCredentialStore::logged_in("tok", user.clone());

        store.update_user(&user).expect("update should succeed");
        store.update_user(&user).expect("update should succeed");

        assert_eq!(store.persist_count, 2);
    }
}
