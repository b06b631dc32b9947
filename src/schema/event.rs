use crate::schema::notification::Notification;

use serde_json::Value;

/// Everything the ingestion channels can tell the store.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreEvent {
    /// A raw notification payload pushed by the live feed.
    Incoming(Value),
    /// The background relay saw something change; the payload is not available.
    RefreshRequested,
}

/// Server calls owed for optimistic mutations already applied locally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Confirmation {
    MarkRead(String),
    MarkAllRead,
    Delete(String),
    DeleteAll,
}

impl Confirmation {
    pub fn resyncs_on_failure(&self) -> bool {
        matches!(self, Confirmation::Delete(_) | Confirmation::DeleteAll)
    }
}

/// What views receive after each store change.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StoreSnapshot {
    pub notifications: Vec<Notification>,
    pub unread_count: usize,
    pub loading: bool,
}
