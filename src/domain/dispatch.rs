//! Dispatch session state for one batch send.
//!
//! A batch owns a recipient list and a parallel status array indexed by
//! recipient position. Statuses only move forward: `Pending` -> `Sending`
//! -> `Sent`/`Failed`, never back.

use crate::domain::recipient::RecipientList;

/// Delivery state of a single recipient within a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendStatus {
    Pending,
    Sending,
    Sent,
    Failed,
}

impl SendStatus {
    #[cfg_attr(not(test), allow(dead_code))]
    pub fn as_label(self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Sending => "SENDING",
            Self::Sent => "SENT",
            Self::Failed => "FAILED",
        }
    }

    /// True once the recipient has reached a final state.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Sent | Self::Failed)
    }
}

/// Read-only view of a dispatch session at one instant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchSnapshot {
    pub recipients: Vec<String>,
    pub statuses: Vec<SendStatus>,
    pub cursor: Option<usize>,
    pub sending: bool,
}

impl BatchSnapshot {
    /// Snapshot of a tracker with no batch in flight.
    pub fn idle() -> Self {
        Self {
            recipients: Vec::new(),
            statuses: Vec::new(),
            cursor: None,
            sending: false,
        }
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn sent_count(&self) -> usize {
        self.statuses
            .iter()
            .filter(|status| **status == SendStatus::Sent)
            .count()
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn failed_count(&self) -> usize {
        self.statuses
            .iter()
            .filter(|status| **status == SendStatus::Failed)
            .count()
    }
}

impl Default for BatchSnapshot {
    fn default() -> Self {
        Self::idle()
    }
}

/// Mutable aggregate for one batch: recipients, parallel statuses, cursor.
///
/// Owned exclusively by the dispatch loop; everything else observes it
/// through published snapshots.
#[derive(Debug)]
pub struct DispatchSession {
    recipients: Vec<String>,
    statuses: Vec<SendStatus>,
    cursor: Option<usize>,
}

impl DispatchSession {
    pub fn start(recipients: RecipientList) -> Self {
        let recipients = recipients.into_vec();
        let statuses = vec![SendStatus::Pending; recipients.len()];

        Self {
            recipients,
            statuses,
            cursor: None,
        }
    }

    pub fn len(&self) -> usize {
        self.recipients.len()
    }

    pub fn recipient(&self, index: usize) -> &str {
        &self.recipients[index]
    }

    pub fn mark_sending(&mut self, index: usize) {
        self.cursor = Some(index);
        self.statuses[index] = SendStatus::Sending;
    }

    pub fn mark_sent(&mut self, index: usize) {
        self.statuses[index] = SendStatus::Sent;
    }

    pub fn mark_failed(&mut self, index: usize) {
        self.statuses[index] = SendStatus::Failed;
    }

    pub fn clear_cursor(&mut self) {
        self.cursor = None;
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn statuses(&self) -> &[SendStatus] {
        &self.statuses
    }

    pub fn snapshot(&self, sending: bool) -> BatchSnapshot {
        BatchSnapshot {
            recipients: self.recipients.clone(),
            statuses: self.statuses.clone(),
            cursor: self.cursor,
            sending,
        }
    }
}
