//! Sequential bulk dispatch: the send loop for one batch.
//!
//! One gateway call per recipient, strictly in submission order, each call
//! awaited before the next is issued. A failed recipient is marked and the
//! loop continues; the batch always runs to completion. After the loop the
//! message history is refreshed once from the gateway.

use crate::{
    domain::{
        dispatch::{DispatchSession, SendStatus},
        message::MessageRecord,
        recipient::RecipientList,
    },
    infra::contracts::CredentialStore,
    usecases::{
        load_messages::{load_messages, MessageHistorySource},
        progress::ProgressTracker,
        reconcile_balance::reconcile_sender_balance,
    },
};

/// One user-submitted batch: shared sender, country, and body over a raw
/// recipient string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchBatchCommand {
    pub sender_id: String,
    pub country_code: String,
    pub message: String,
    pub raw_recipients: String,
}

/// A single outbound message as handed to the gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundSms {
    pub sender_id: String,
    pub recipient: String,
    pub message: String,
    pub country_code: String,
}

/// What a successful send call reports back.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SendReceipt {
    pub record: Option<MessageRecord>,
    pub parts: Option<u32>,
    pub total_cost: Option<f64>,
    pub remaining_balance: Option<f64>,
}

/// Errors a single send call can surface. Inside the loop every variant is
/// handled the same way: mark the recipient failed and move on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendSourceError {
    Unauthenticated,
    Rejected { status: u16 },
    Unavailable,
    InvalidData,
}

pub trait SmsGateway {
    fn send_sms(&self, sms: &OutboundSms) -> Result<SendReceipt, SendSourceError>;
}

impl<T: SmsGateway + ?Sized> SmsGateway for &T {
    fn send_sms(&self, sms: &OutboundSms) -> Result<SendReceipt, SendSourceError> {
        (*self).send_sms(sms)
    }
}

/// Pre-flight validation failures. Nothing has been sent when these are
/// returned; no status array exists and no snapshot was published.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchError {
    EmptyMessage,
    NoRecipients,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DispatchOutcome {
    pub recipients: Vec<String>,
    pub statuses: Vec<SendStatus>,
    /// Refreshed history, or None when the refresh failed (stale listing).
    pub history: Option<Vec<MessageRecord>>,
}

impl DispatchOutcome {
    pub fn sent_count(&self) -> usize {
        self.statuses
            .iter()
            .filter(|status| **status == SendStatus::Sent)
            .count()
    }

    pub fn failed_count(&self) -> usize {
        self.statuses
            .iter()
            .filter(|status| **status == SendStatus::Failed)
            .count()
    }
}

/// Runs one batch to completion.
///
/// Validates synchronously, then walks the recipient list in order. Each
/// iteration publishes a snapshot before and after its gateway call, so an
/// observer always sees a terminal prefix, at most one `Sending` entry,
/// and a `Pending` suffix. A reported remaining balance is reconciled into
/// the credential store after each successful call.
pub fn dispatch_batch(
    gateway: &dyn SmsGateway,
    history: &dyn MessageHistorySource,
    credentials: &mut dyn CredentialStore,
    tracker: &ProgressTracker,
    command: DispatchBatchCommand,
) -> Result<DispatchOutcome, DispatchError> {
    if command.message.trim().is_empty() {
        return Err(DispatchError::EmptyMessage);
    }

    let recipients = RecipientList::parse(&command.raw_recipients);
    if recipients.is_empty() {
        return Err(DispatchError::NoRecipients);
    }

    let mut session = DispatchSession::start(recipients);
    tracker.batch_started(session.snapshot(true));

    for index in 0..session.len() {
        session.mark_sending(index);
        tracker.publish(session.snapshot(true));

        let sms = OutboundSms {
            sender_id: command.sender_id.clone(),
            recipient: session.recipient(index).to_owned(),
            message: command.message.clone(),
            country_code: command.country_code.clone(),
        };

        match gateway.send_sms(&sms) {
            Ok(receipt) => {
                session.mark_sent(index);
                tracing::debug!(
                    recipient = %sms.recipient,
                    uid = receipt.record.as_ref().map(|record| record.uuid.as_str()),
                    parts = receipt.parts,
                    cost = receipt.total_cost,
                    "message accepted by gateway"
                );

                if let Some(remaining) = receipt.remaining_balance {
                    if let Err(error) =
                        reconcile_sender_balance(credentials, &command.sender_id, remaining)
                    {
                        tracing::warn!(
                            error = ?error,
                            "balance reconciliation failed; stored balance is stale"
                        );
                    }
                }
            }
            Err(error) => {
                session.mark_failed(index);
                tracing::warn!(
                    recipient = %sms.recipient,
                    error = ?error,
                    "send failed; continuing with next recipient"
                );
            }
        }

        session.clear_cursor();
        tracker.publish(session.snapshot(true));
    }

    tracker.batch_finished(session.snapshot(false));

    let history = match load_messages(history) {
        Ok(output) => Some(output.messages),
        Err(error) => {
            tracing::warn!(error = ?error, "post-batch history refresh failed; listing is stale");
            None
        }
    };

    let snapshot = session.snapshot(false);
    Ok(DispatchOutcome {
        recipients: snapshot.recipients,
        statuses: snapshot.statuses,
        history,
    })
}
