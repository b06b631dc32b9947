use crate::schema::event::StoreEvent;

use serde::Deserialize;
use std::sync::mpsc::Sender;

/// Marker the background worker posts when a push arrived while the page was
/// not in the foreground.
pub const NEW_NOTIFICATION: &str = "NEW_NOTIFICATION";

#[derive(Deserialize)]
struct RelayMessage {
    #[serde(rename = "type")]
    kind: Option<String>,
}

/// Handed to platform glue so it can ask the store to resynchronize. It can be
/// cloned and moved to other threads.
#[derive(Clone)]
pub struct RelayHandle {
    sender: Sender<StoreEvent>,
}

impl RelayHandle {
    pub fn new(sender: Sender<StoreEvent>) -> Self {
        RelayHandle { sender }
    }

    /// Returns `false` once the store is gone.
    pub fn signal(&self) -> bool {
        self.sender.send(StoreEvent::RefreshRequested).is_ok()
    }

    /// Signals only for the new-notification marker; anything else, including
    /// unparseable input, is ignored.
    pub fn handle_message(&self, raw: &str) -> bool {
        match serde_json::from_str::<RelayMessage>(raw) {
            Ok(RelayMessage { kind: Some(kind) }) if kind == NEW_NOTIFICATION => self.signal(),
            _ => false,
        }
    }
}
