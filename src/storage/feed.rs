//! Change notifications for stored collections
//!
//! Every mutation through [`Storage`](super::Storage) publishes a
//! [`StoreEvent`]. Front ends that keep derived state (the terminal UI's
//! budget header, for one) subscribe and reload when their collection
//! changes. Receivers that have been dropped are pruned on the next publish.

use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Mutex;

use crate::error::PennywiseError;

use super::lock_error;

/// Which stored collection changed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreEvent {
    TransactionsChanged,
    DeletedTransactionsChanged,
    BudgetChanged,
    WarningChanged,
    LabelsChanged,
}

#[derive(Debug, Default)]
pub struct ChangeFeed {
    subscribers: Mutex<Vec<Sender<StoreEvent>>>,
}

impl ChangeFeed {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new subscriber
    pub fn subscribe(&self) -> Result<Receiver<StoreEvent>, PennywiseError> {
        let (sender, receiver) = mpsc::channel();
        self.subscribers.lock().map_err(lock_error)?.push(sender);
        Ok(receiver)
    }

    /// Deliver an event to every live subscriber
    pub fn publish(&self, event: StoreEvent) -> Result<(), PennywiseError> {
        let mut subscribers = self.subscribers.lock().map_err(lock_error)?;
        subscribers.retain(|sender| sender.send(event).is_ok());
        tracing::trace!(?event, subscribers = subscribers.len(), "published store event");
        Ok(())
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.lock().map(|s| s.len()).unwrap_or(0)
    }
}
