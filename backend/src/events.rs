//! Store change feed
//!
//! Every successful mutation is published as a [`StoreEvent`]. Views that
//! show live data (the history list, pickers) subscribe and re-query when
//! an event arrives, or compare the revision returned with their last read.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::debug;
use uuid::Uuid;

/// Kind of entity that changed
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    User,
    Exercise,
    Record,
}

/// What happened to the entity
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ChangeAction {
    Created,
    Updated,
    Deleted,
}

/// One committed change
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StoreEvent {
    pub revision: u64,
    pub entity: EntityKind,
    pub action: ChangeAction,
    pub id: Uuid,
}

/// Broadcast channel of store changes with a monotonically increasing revision
#[derive(Clone)]
pub struct ChangeFeed {
    sender: broadcast::Sender<StoreEvent>,
    revision: Arc<AtomicU64>,
}

impl ChangeFeed {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self {
            sender,
            revision: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Record a committed change and notify subscribers.
    ///
    /// Publishing with no subscribers still advances the revision.
    pub fn publish(&self, entity: EntityKind, action: ChangeAction, id: Uuid) -> StoreEvent {
        let revision = self.revision.fetch_add(1, Ordering::SeqCst) + 1;
        let event = StoreEvent {
            revision,
            entity,
            action,
            id,
        };

        let receivers = self.sender.send(event.clone()).unwrap_or(0);
        debug!(revision, ?entity, ?action, %id, receivers, "Published store event");

        event
    }

    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.sender.subscribe()
    }

    /// Revision of the latest published change, 0 before any change
    pub fn revision(&self) -> u64 {
        self.revision.load(Ordering::SeqCst)
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}
