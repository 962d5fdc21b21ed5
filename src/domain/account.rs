//! Account model: the authenticated user and their sender identities.
//!
//! These records arrive as gateway JSON and are persisted verbatim in the
//! local session file, so they derive serde both ways. Balances are kept
//! as the decimal strings the gateway serves; the gateway stays the source
//! of truth and overwrites are never accumulated locally.

use serde::{Deserialize, Serialize};

/// Destination country a sender identity may deliver to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
    pub id: i64,
    pub name: String,
    pub code: String,
    pub dial_code: String,
    pub is_available: bool,
}

/// Per-country price attached to a sender identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryPrice {
    pub id: i64,
    pub country: Country,
    pub price_per_sms: String,
}

/// Account-scoped originator identifier with its own balance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SenderIdentity {
    pub id: i64,
    pub name: String,
    pub balance: String,
    pub is_active: bool,
    #[serde(default)]
    pub country_prices: Vec<CountryPrice>,
}

/// The authenticated user record as served by the account endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub phone_number: Option<String>,
    #[serde(default)]
    pub sender_ids: Vec<SenderIdentity>,
}

impl UserProfile {
    #[cfg_attr(not(test), allow(dead_code))]
    pub fn sender_identity(&self, sender_id: i64) -> Option<&SenderIdentity> {
        self.sender_ids.iter().find(|sid| sid.id == sender_id)
    }

    /// Overwrites the balance of the matching sender identity with the
    /// gateway-reported value, leaving every other identity untouched.
    /// Returns false when no identity matches.
    pub fn overwrite_sender_balance(&mut self, sender_id: i64, balance: &str) -> bool {
        match self.sender_ids.iter_mut().find(|sid| sid.id == sender_id) {
            Some(identity) => {
                identity.balance = balance.to_owned();
                true
            }
            None => false,
        }
    }
}
