//! File-backed session store: the credential store collaborator.
//!
//! Login writes `{token, user}` as JSON under the session directory;
//! logout removes it. Balance reconciliation and balance refresh rewrite
//! the user snapshot in place. All writers run sequentially on the command
//! path, so the store needs no locking of its own.

use std::{fs, io::ErrorKind, path::PathBuf};

use serde::{Deserialize, Serialize};

use crate::{
    domain::account::UserProfile,
    infra::{contracts::CredentialStore, error::AppError, storage_layout::StorageLayout},
};

/// Persisted login state: the API token and the user record it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSession {
    pub token: String,
    pub user: UserProfile,
}

#[derive(Debug)]
pub struct FileSessionStore {
    path: PathBuf,
    cached: Option<AuthSession>,
}

impl FileSessionStore {
    /// Opens the store at the resolved storage layout, loading any
    /// persisted session.
    pub fn open() -> Result<Self, AppError> {
        let layout = StorageLayout::resolve()?;
        layout.ensure_dirs()?;

        let path = layout.session_file();
        let cached = read_session(&path)?;

        Ok(Self { path, cached })
    }

    pub fn session(&self) -> Option<&AuthSession> {
        self.cached.as_ref()
    }

    /// Overwrites the persisted session with a fresh login.
    pub fn persist(&mut self, session: AuthSession) -> Result<(), AppError> {
        write_session(&self.path, &session)?;
        self.cached = Some(session);
        Ok(())
    }

    /// Removes the persisted session. Returns whether a file was removed;
    /// missing files are not an error so logout stays idempotent.
    pub fn clear(&mut self) -> Result<bool, AppError> {
        self.cached = None;
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(true),
            Err(source) if source.kind() == ErrorKind::NotFound => Ok(false),
            Err(source) => Err(AppError::SessionRemove {
                path: self.path.clone(),
                source,
            }),
        }
    }
}

impl CredentialStore for FileSessionStore {
    fn current_token(&self) -> Option<String> {
        self.cached.as_ref().map(|session| session.token.clone())
    }

    fn current_user(&self) -> Option<UserProfile> {
        self.cached.as_ref().map(|session| session.user.clone())
    }

    fn update_user(&mut self, user: &UserProfile) -> Result<(), AppError> {
        let Some(session) = self.cached.as_mut() else {
            return Err(AppError::NotLoggedIn);
        };

        session.user = user.clone();
        let updated = session.clone();
        write_session(&self.path, &updated)
    }
}

impl crate::usecases::login::SessionSink for FileSessionStore {
    fn persist_session(&mut self, session: &AuthSession) -> Result<(), AppError> {
        self.persist(session.clone())
    }
}

fn read_session(path: &PathBuf) -> Result<Option<AuthSession>, AppError> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(source) if source.kind() == ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(AppError::SessionRead {
                path: path.clone(),
                source,
            })
        }
    };

    let session = serde_json::from_str(&raw).map_err(|source| AppError::SessionParse {
        path: path.clone(),
        source,
    })?;

    Ok(Some(session))
}

fn write_session(path: &PathBuf, session: &AuthSession) -> Result<(), AppError> {
    let raw = serde_json::to_string_pretty(session).map_err(|source| AppError::SessionParse {
        path: path.clone(),
        source,
    })?;

    fs::write(path, raw).map_err(|source| AppError::SessionWrite {
        path: path.clone(),
        source,
    })
}
