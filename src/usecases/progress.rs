//! Live progress feed for dispatch sessions.
//!
//! The dispatch loop is the single writer; presenters subscribe and
//! receive every published snapshot over a channel, starting with the
//! current one. The sending flag is shared with the interrupt handler,
//! which stays advisory while a batch is in flight.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    mpsc, Arc, Mutex,
};

use crate::domain::dispatch::BatchSnapshot;

/// Flag raised for the duration of a dispatch loop.
#[derive(Debug, Clone, Default)]
pub struct SendingFlag {
    engaged: Arc<AtomicBool>,
}

impl SendingFlag {
    pub fn engage(&self) {
        self.engaged.store(true, Ordering::SeqCst);
    }

    pub fn release(&self) {
        self.engaged.store(false, Ordering::SeqCst);
    }

    pub fn is_sending(&self) -> bool {
        self.engaged.load(Ordering::SeqCst)
    }
}

#[derive(Debug, Clone)]
pub struct ProgressTracker {
    inner: Arc<Mutex<TrackerState>>,
    sending: SendingFlag,
}

#[derive(Debug, Default)]
struct TrackerState {
    snapshot: BatchSnapshot,
    subscribers: Vec<mpsc::Sender<BatchSnapshot>>,
}

impl ProgressTracker {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(TrackerState::default())),
            sending: SendingFlag::default(),
        }
    }

    /// Registers a subscriber. The current snapshot is delivered first.
    pub fn subscribe(&self) -> mpsc::Receiver<BatchSnapshot> {
        let (tx, rx) = mpsc::channel();
        if let Ok(mut state) = self.inner.lock() {
            let _ = tx.send(state.snapshot.clone());
            state.subscribers.push(tx);
        }
        rx
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn snapshot(&self) -> BatchSnapshot {
        self.inner
            .lock()
            .map(|state| state.snapshot.clone())
            .unwrap_or_default()
    }

    /// Clone of the sending flag, for the interrupt guard.
    pub fn sending_flag(&self) -> SendingFlag {
        self.sending.clone()
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn is_sending(&self) -> bool {
        self.sending.is_sending()
    }

    pub fn batch_started(&self, snapshot: BatchSnapshot) {
        self.sending.engage();
        self.publish(snapshot);
    }

    pub fn publish(&self, snapshot: BatchSnapshot) {
        if let Ok(mut state) = self.inner.lock() {
            state.snapshot = snapshot;
            let payload = state.snapshot.clone();
            state
                .subscribers
                .retain(|sub| sub.send(payload.clone()).is_ok());
        }
    }

    pub fn batch_finished(&self, snapshot: BatchSnapshot) {
        self.publish(snapshot);
        self.sending.release();
    }
}

impl Default for ProgressTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{dispatch::DispatchSession, recipient::RecipientList};

    fn snapshot_of(raw: &str, sending: bool) -> BatchSnapshot {
        DispatchSession::start(RecipientList::parse(raw)).snapshot(sending)
    }

    #[test]
    fn emits_idle_snapshot_on_subscribe() {
        let tracker = ProgressTracker::new();
        let rx = tracker.subscribe();

        let initial = rx.recv().expect("initial snapshot should be sent");
        assert_eq!(initial, BatchSnapshot::idle());
    }

    #[test]
    fn delivers_published_snapshots_in_order() {
        let tracker = ProgressTracker::new();
        let rx = tracker.subscribe();
        let _ = rx.recv().expect("initial snapshot");

        tracker.publish(snapshot_of("0101", true));
        tracker.publish(snapshot_of("0101,0102", true));

        assert_eq!(rx.recv().expect("first publish").recipients.len(), 1);
        assert_eq!(rx.recv().expect("second publish").recipients.len(), 2);
    }

    #[test]
    fn batch_lifecycle_toggles_sending_flag() {
        let tracker = ProgressTracker::new();
        let flag = tracker.sending_flag();
        assert!(!flag.is_sending());

        tracker.batch_started(snapshot_of("0101", true));
        assert!(flag.is_sending());

        tracker.batch_finished(snapshot_of("0101", false));
        assert!(!flag.is_sending());
    }

    #[test]
    fn prunes_dropped_subscribers_on_publish() {
        let tracker = ProgressTracker::new();
        let rx = tracker.subscribe();
        drop(rx);

        tracker.publish(snapshot_of("0101", true));
        tracker.publish(snapshot_of("0101", true));

        assert_eq!(tracker.snapshot().recipients, vec!["0101".to_owned()]);
    }
}
