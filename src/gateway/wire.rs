//! Response envelopes of the SMS gateway API.

use serde::Deserialize;

use crate::{
    domain::{account::UserProfile, message::MessageRecord},
    infra::session::AuthSession,
    usecases::dispatch_batch::SendReceipt,
};

/// Body of `POST /api/accounts/auth/login/`.
#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub user: Option<UserProfile>,
}

impl LoginResponse {
    /// A usable session requires `status == "success"` plus both the
    /// token and the user record.
    pub fn into_session(self) -> Option<AuthSession> {
        if self.status != "success" {
            return None;
        }

        match (self.token, self.user) {
            (Some(token), Some(user)) => Some(AuthSession { token, user }),
            _ => None,
        }
    }
}

/// Body of `POST /api/messages/` for a single outbound message.
#[derive(Debug, Deserialize)]
pub struct SendResponse {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<MessageRecord>,
    #[serde(default)]
    pub parts: Option<u32>,
    #[serde(default)]
    pub total_cost: Option<f64>,
    #[serde(default)]
    pub remaining_balance: Option<f64>,
}

impl SendResponse {
    pub fn into_receipt(self) -> SendReceipt {
        SendReceipt {
            record: self.data,
            parts: self.parts,
            total_cost: self.total_cost,
            remaining_balance: self.remaining_balance,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_response_with_token_and_user_becomes_session() {
        let raw = r#"{
            "status": "success",
            "token": "tok-123",
            "user": {
                "id": 7,
                "username": "amina",
                "email": "amina@example.com",
                "phone_number": null,
                "sender_ids": []
            }
        }"#;

        let response: LoginResponse = serde_json::from_str(raw).expect("payload should parse");
        let session = response.into_session().expect("session should be built");

        assert_eq!(session.token, "tok-123");
        assert_eq!(session.user.username, "amina");
    }

    #[test]
    fn login_response_without_success_status_yields_no_session() {
        let raw = r#"{"status": "error", "message": "bad credentials"}"#;

        let response: LoginResponse = serde_json::from_str(raw).expect("payload should parse");

        assert!(response.into_session().is_none());
    }

    #[test]
    fn login_response_success_without_token_yields_no_session() {
        let raw = r#"{"status": "success"}"#;

        let response: LoginResponse = serde_json::from_str(raw).expect("payload should parse");

        assert!(response.into_session().is_none());
    }

    #[test]
    fn send_response_maps_to_receipt() {
        let raw = r#"{
            "status": "success",
            "message": "Message sent",
            "parts": 1,
            "total_cost": 0.35,
            "remaining_balance": 61.75
        }"#;

        let response: SendResponse = serde_json::from_str(raw).expect("payload should parse");
        let receipt = response.into_receipt();

        assert_eq!(receipt.parts, Some(1));
        assert_eq!(receipt.total_cost, Some(0.35));
        assert_eq!(receipt.remaining_balance, Some(61.75));
        assert!(receipt.record.is_none());
    }

    #[test]
    fn send_response_without_balance_maps_to_none() {
        let raw = r#"{"status": "success", "message": "Message sent"}"#;

        let response: SendResponse = serde_json::from_str(raw).expect("payload should parse");
        let receipt = response.into_receipt();

        assert_eq!(receipt.remaining_balance, None);
    }
}
