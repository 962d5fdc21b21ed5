use anyhow::Result;

use crate::{
    domain::account::UserProfile,
    infra::{config::AppConfig, error::AppError},
};

pub trait ConfigAdapter {
    fn load(&self) -> Result<AppConfig>;
}

/// The credential store consumed by every authenticated workflow: the
/// current API token plus the persisted user record. `update_user` is an
/// overwrite-and-persist, never a merge.
pub trait CredentialStore {
    fn current_token(&self) -> Option<String>;
    fn current_user(&self) -> Option<UserProfile>;
    fn update_user(&mut self, user: &UserProfile) -> Result<(), AppError>;
}
