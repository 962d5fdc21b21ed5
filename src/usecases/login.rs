//! Login workflow: exchange credentials for a token and persist the
//! session.

use crate::infra::{error::AppError, session::AuthSession};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCommand {
    pub username: String,
    pub password: String,
}

/// Errors the authentication endpoint can surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginSourceError {
    InvalidCredentials,
    Unavailable,
    InvalidData,
}

pub trait LoginBackend {
    fn login(&self, username: &str, password: &str) -> Result<AuthSession, LoginSourceError>;
}

impl<T: LoginBackend + ?Sized> LoginBackend for &T {
    fn login(&self, username: &str, password: &str) -> Result<AuthSession, LoginSourceError> {
        (*self).login(username, password)
    }
}

/// Destination for a freshly authenticated session.
pub trait SessionSink {
    fn persist_session(&mut self, session: &AuthSession) -> Result<(), AppError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginError {
    EmptyUsername,
    EmptyPassword,
    InvalidCredentials,
    TemporarilyUnavailable,
    DataContractViolation,
    SessionPersist,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginOutcome {
    pub username: String,
    pub sender_count: usize,
}

pub fn login(
    backend: &dyn LoginBackend,
    sink: &mut dyn SessionSink,
    command: LoginCommand,
) -> Result<LoginOutcome, LoginError> {
    let username = command.username.trim();
    if username.is_empty() {
        return Err(LoginError::EmptyUsername);
    }
    if command.password.is_empty() {
        return Err(LoginError::EmptyPassword);
    }

    let session = backend
        .login(username, &command.password)
        .map_err(map_source_error)?;

    let outcome = LoginOutcome {
        username: session.user.username.clone(),
        sender_count: session.user.sender_ids.len(),
    };

    if let Err(error) = sink.persist_session(&session) {
        tracing::error!(error = ?error, "failed to persist session after login");
        return Err(LoginError::SessionPersist);
    }

    Ok(outcome)
}

fn map_source_error(error: LoginSourceError) -> LoginError {
    match error {
        LoginSourceError::InvalidCredentials => LoginError::InvalidCredentials,
        LoginSourceError::Unavailable => LoginError::TemporarilyUnavailable,
        LoginSourceError::InvalidData => LoginError::DataContractViolation,
    }
}
