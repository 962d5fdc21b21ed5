//! Blocking HTTP client for the SMS gateway.
//!
//! Authenticated calls carry `Authorization: Token <token>` (the
//! gateway's token scheme). A client built without a token refuses
//! authenticated calls before any request is made.

use std::time::Duration;

use reqwest::{
    blocking::{multipart, Client},
    header::AUTHORIZATION,
    StatusCode,
};

use crate::{
    domain::{account::SenderIdentity, message::MessageRecord},
    gateway::wire::{LoginResponse, SendResponse},
    infra::{error::AppError, session::AuthSession},
    usecases::{
        dispatch_batch::{OutboundSms, SendReceipt, SendSourceError, SmsGateway},
        load_messages::{HistorySourceError, MessageHistorySource},
        login::{LoginBackend, LoginSourceError},
        refresh_balance::{SenderIdentitySource, SenderIdentitySourceError},
    },
};

const LOGIN_PATH: &str = "/api/accounts/auth/login/";
const MESSAGES_PATH: &str = "/api/messages/";
const SENDER_IDS_PATH: &str = "/api/accounts/sender-ids/";

#[derive(Debug)]
pub struct HttpGateway {
    http: Client,
    base_url: String,
    token: Option<String>,
}

impl HttpGateway {
    pub fn new(
        base_url: &str,
        timeout: Duration,
        token: Option<String>,
    ) -> Result<Self, AppError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(AppError::HttpClientInit)?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_owned(),
            token,
        })
    }

    /// Client for the login endpoint, which takes no token.
    pub fn anonymous(base_url: &str, timeout: Duration) -> Result<Self, AppError> {
        Self::new(base_url, timeout, None)
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn auth_header(&self) -> Option<String> {
        self.token.as_ref().map(|token| format!("Token {token}"))
    }
}

impl SmsGateway for HttpGateway {
    fn send_sms(&self, sms: &OutboundSms) -> Result<SendReceipt, SendSourceError> {
        let Some(auth) = self.auth_header() else {
            return Err(SendSourceError::Unauthenticated);
        };

        let form = multipart::Form::new()
            .text("sender_id", sms.sender_id.clone())
            .text("recipients", sms.recipient.clone())
            .text("message", sms.message.clone())
            .text("country_code", sms.country_code.clone());

        let response = self
            .http
            .post(self.endpoint(MESSAGES_PATH))
            .header(AUTHORIZATION, auth)
            .multipart(form)
            .send()
            .map_err(|error| {
                tracing::debug!(error = %error, "send request transport failure");
                SendSourceError::Unavailable
            })?;

        match response.status() {
            status if status.is_success() => {
                let payload: SendResponse = response
                    .json()
                    .map_err(|_| SendSourceError::InvalidData)?;
                tracing::trace!(
                    status = %payload.status,
                    note = payload.message.as_deref(),
                    "send response received"
                );
                Ok(payload.into_receipt())
            }
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                Err(SendSourceError::Unauthenticated)
            }
            status => Err(SendSourceError::Rejected {
                status: status.as_u16(),
            }),
        }
    }
}

impl MessageHistorySource for HttpGateway {
    fn list_messages(&self) -> Result<Vec<MessageRecord>, HistorySourceError> {
        let Some(auth) = self.auth_header() else {
            return Err(HistorySourceError::Unauthenticated);
        };

        let response = self
            .http
            .get(self.endpoint(MESSAGES_PATH))
            .header(AUTHORIZATION, auth)
            .send()
            .map_err(|error| {
                tracing::debug!(error = %error, "history request transport failure");
                HistorySourceError::Unavailable
            })?;

        match response.status() {
            status if status.is_success() => response
                .json()
                .map_err(|_| HistorySourceError::InvalidData),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                Err(HistorySourceError::Unauthenticated)
            }
            _ => Err(HistorySourceError::Unavailable),
        }
    }
}

impl SenderIdentitySource for HttpGateway {
    fn list_sender_identities(&self) -> Result<Vec<SenderIdentity>, SenderIdentitySourceError> {
        let Some(auth) = self.auth_header() else {
            return Err(SenderIdentitySourceError::Unauthenticated);
        };

        let response = self
            .http
            .get(self.endpoint(SENDER_IDS_PATH))
            .header(AUTHORIZATION, auth)
            .send()
            .map_err(|error| {
                tracing::debug!(error = %error, "sender-id request transport failure");
                SenderIdentitySourceError::Unavailable
            })?;

        match response.status() {
            status if status.is_success() => response
                .json()
                .map_err(|_| SenderIdentitySourceError::InvalidData),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                Err(SenderIdentitySourceError::Unauthenticated)
            }
            _ => Err(SenderIdentitySourceError::Unavailable),
        }
    }
}

impl LoginBackend for HttpGateway {
    fn login(&self, username: &str, password: &str) -> Result<AuthSession, LoginSourceError> {
        let body = serde_json::json!({
            "username": username,
            "password": password,
        });

        let response = self
            .http
            .post(self.endpoint(LOGIN_PATH))
            .json(&body)
            .send()
            .map_err(|error| {
                tracing::debug!(error = %error, "login request transport failure");
                LoginSourceError::Unavailable
            })?;

        match response.status() {
            status if status.is_success() => {
                let payload: LoginResponse = response
                    .json()
                    .map_err(|_| LoginSourceError::InvalidData)?;
                if let Some(note) = payload.message.as_deref() {
                    tracing::debug!(note, "login response note");
                }
                payload
                    .into_session()
                    .ok_or(LoginSourceError::InvalidCredentials)
            }
            StatusCode::BAD_REQUEST | StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                Err(LoginSourceError::InvalidCredentials)
            }
            _ => Err(LoginSourceError::Unavailable),
        }
    }
}
