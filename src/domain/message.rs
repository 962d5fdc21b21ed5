//! Message history records as served by the gateway.

use serde::{Deserialize, Serialize};

/// Delivery detail reported by the upstream SMS provider for one message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryData {
    pub uid: String,
    pub to: String,
    pub from: String,
    pub message: String,
    pub status: String,
    pub cost: String,
    pub sms_count: u32,
}

/// Raw provider response the gateway stores alongside a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryReport {
    pub status: String,
    pub message: String,
    pub data: Option<DeliveryData>,
}

/// One entry of the account's message history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageRecord {
    pub id: i64,
    pub uuid: String,
    pub sender_id: String,
    pub recipients: String,
    pub message: String,
    pub message_length: u32,
    pub schedule_time: Option<String>,
    pub status: String,
    #[serde(default)]
    pub api_response: Option<DeliveryReport>,
    pub sent_at: Option<String>,
    pub created_at: String,
    pub user: i64,
}

impl MessageRecord {
    /// True when the gateway marked the message delivered.
    #[cfg_attr(not(test), allow(dead_code))]
    pub fn is_delivered(&self) -> bool {
        self.status.eq_ignore_ascii_case("delivered")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_history_entry() {
        let raw = r#"{
            "id": 12,
            "uuid": "0b7c9d7e",
            "sender_id": "5",
            "recipients": "0101234567",
            "message": "hi",
            "message_length": 2,
            "schedule_time": null,
            "status": "Delivered",
            "api_response": {
                "status": "success",
                "message": "queued",
                "data": {
                    "uid": "m-1",
                    "to": "0101234567",
                    "from": "SHOPLINE",
                    "message": "hi",
                    "status": "sent",
                    "cost": "0.35",
                    "sms_count": 1
                }
            },
            "sent_at": "2025-08-01T10:00:00Z",
            "created_at": "2025-08-01T09:59:58Z",
            "user": 7
        }"#;

        let record: MessageRecord = serde_json::from_str(raw).expect("record should parse");

        assert_eq!(record.uuid, "0b7c9d7e");
        assert!(record.is_delivered());
        assert_eq!(
            record.api_response.and_then(|r| r.data).map(|d| d.sms_count),
            Some(1)
        );
    }

    #[test]
    fn tolerates_missing_api_response() {
        let raw = r#"{
            "id": 1,
            "uuid": "u",
            "sender_id": "5",
            "recipients": "0101",
            "message": "hi",
            "message_length": 2,
            "schedule_time": null,
            "status": "Pending",
            "sent_at": null,
            "created_at": "2025-08-01T09:59:58Z",
            "user": 7
        }"#;

        let record: MessageRecord = serde_json::from_str(raw).expect("record should parse");

        assert!(record.api_response.is_none());
        assert!(!record.is_delivered());
    }
}
