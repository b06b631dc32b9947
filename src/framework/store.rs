use crate::framework::client::Client;
use crate::framework::events::emitter::Emitter;
use crate::framework::logger::{context, Logger};
use crate::framework::relay::RelayHandle;
use crate::framework::sound::{self, Sound, SoundPlayer};
use crate::schema::event::{Confirmation, StoreEvent, StoreSnapshot};
use crate::schema::notification::{Notification, NotificationSnapshot};

use serde_json::Value;
use std::cell::RefCell;
use std::collections::{HashSet, VecDeque};
use std::rc::Rc;
use std::sync::mpsc::{channel, Receiver, Sender};

pub struct _NotificationStore {
    client: Client,
    logger: Logger,
    sound: SoundPlayer,
    notifications: Vec<Notification>,
    unread_count: usize,
    loading: bool,
    pending: VecDeque<Confirmation>,
    sender: Sender<StoreEvent>,
    receiver: Receiver<StoreEvent>,
    changes: Emitter<StoreSnapshot>,
}

type NotificationStoreRef = Rc<RefCell<_NotificationStore>>;

/// The single owner of the local notification list and unread counter.
///
/// Mutations apply locally right away and queue the matching server call;
/// [`NotificationStore::process_confirmations`] sends them. Ingestion channels
/// never touch the list directly: they post [`StoreEvent`]s that
/// [`NotificationStore::process_events`] applies in arrival order.
pub struct NotificationStore(NotificationStoreRef);

impl NotificationStore {
    pub fn new(client: Client, logger: Logger, sound: SoundPlayer) -> Self {
        NotificationStore(Rc::new(RefCell::new(_NotificationStore::new(
            client, logger, sound,
        ))))
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.0.borrow().notifications.clone()
    }

    pub fn unread_count(&self) -> usize {
        self.0.borrow().unread_count
    }

    pub fn loading(&self) -> bool {
        self.0.borrow().loading
    }

    pub fn get(&self, id: &str) -> Option<Notification> {
        self.0
            .borrow()
            .notifications
            .iter()
            .find(|n| n.id == id)
            .cloned()
    }

    pub fn snapshot(&self) -> StoreSnapshot {
        self.0.borrow().snapshot()
    }

    pub fn pending_confirmations(&self) -> Vec<Confirmation> {
        self.0.borrow().pending.iter().cloned().collect()
    }

    /// Receives a snapshot after every change.
    pub fn subscribe(&self) -> Receiver<StoreSnapshot> {
        self.0.borrow_mut().changes.new_receiver()
    }

    pub fn event_sender(&self) -> Sender<StoreEvent> {
        self.0.borrow().sender.clone()
    }

    pub fn relay(&self) -> RelayHandle {
        RelayHandle::new(self.event_sender())
    }

    pub fn fetch_all(&self) -> bool {
        self.0.borrow_mut().fetch_all()
    }

    pub fn poll(&self) -> bool {
        self.0.borrow_mut().poll()
    }

    pub fn mark_as_read(&self, id: &str) -> bool {
        self.0.borrow_mut().mark_as_read(id)
    }

    pub fn mark_all_as_read(&self) {
        self.0.borrow_mut().mark_all_as_read()
    }

    pub fn delete_notification(&self, id: &str) -> bool {
        self.0.borrow_mut().delete_notification(id)
    }

    pub fn delete_all_notifications(&self) {
        self.0.borrow_mut().delete_all_notifications()
    }

    pub fn ingest(&self, payload: Value) -> bool {
        self.0.borrow_mut().ingest(payload)
    }

    pub fn process_events(&self) -> usize {
        self.0.borrow_mut().process_events()
    }

    pub fn process_confirmations(&self) -> usize {
        self.0.borrow_mut().process_confirmations()
    }

    pub fn clear(&self) {
        self.0.borrow_mut().clear()
    }
}

impl Clone for NotificationStore {
    fn clone(&self) -> Self {
        NotificationStore(self.0.clone())
    }
}

impl _NotificationStore {
    pub fn new(client: Client, logger: Logger, sound: SoundPlayer) -> Self {
        let (sender, receiver) = channel();
        _NotificationStore {
            client,
            logger,
            sound,
            notifications: vec![],
            unread_count: 0,
            loading: false,
            pending: VecDeque::new(),
            sender,
            receiver,
            changes: Emitter::new(),
        }
    }
}

impl _NotificationStore {
    fn snapshot(&self) -> StoreSnapshot {
        StoreSnapshot {
            notifications: self.notifications.clone(),
            unread_count: self.unread_count,
            loading: self.loading,
        }
    }

    fn notify_changed(&mut self) {
        if !self.changes.is_empty() {
            let snapshot = self.snapshot();
            self.changes.emit(snapshot);
        }
    }

    fn play(&self, sound: Sound) {
        if let Err(e) = self.sound.play(sound) {
            self.logger.warning(&format!(
                "[{}] Sound {:?} could not be played: {}",
                context("NotificationStore", "play"),
                sound,
                e
            ));
        }
    }

    // Server snapshots are taken as-is apart from repeated ids.
    fn replace(&mut self, snapshot: NotificationSnapshot) {
        let mut seen = HashSet::new();
        self.notifications = snapshot
            .notifications
            .into_iter()
            .filter(|n| seen.insert(n.id.clone()))
            .collect();
        self.unread_count = snapshot.unread_count;
    }

    fn fetch_all(&mut self) -> bool {
        let c = context("NotificationStore", "fetch_all");

        // Owed confirmations go out first or the snapshot would undo them.
        self.send_confirmations();

        self.loading = true;
        self.notify_changed();

        let fetched = match self.client.get_notifications() {
            Ok(snapshot) => {
                self.replace(snapshot);
                self.logger.debug(&format!(
                    "[{}] Fetched {} notifications ({} unread)",
                    c,
                    self.notifications.len(),
                    self.unread_count
                ));
                true
            }
            Err(e) => {
                self.logger
                    .error(&format!("[{}] Failed to fetch notifications: {}", c, e));
                false
            }
        };

        self.loading = false;
        self.notify_changed();
        fetched
    }

    fn poll(&mut self) -> bool {
        let c = context("NotificationStore", "poll");

        self.send_confirmations();

        match self.client.get_notifications() {
            Ok(snapshot) => {
                let increased = snapshot.unread_count > self.unread_count;
                self.replace(snapshot);
                if increased {
                    self.play(Sound::Default);
                }
                self.notify_changed();
                true
            }
            Err(e) => {
                // Polling runs every few seconds; keep failures out of the
                // regular log levels.
                self.logger.trace(&format!("[{}] Poll failed: {}", c, e));
                false
            }
        }
    }

    fn mark_as_read(&mut self, id: &str) -> bool {
        let notification = match self.notifications.iter_mut().find(|n| n.id == id) {
            Some(n) => n,
            None => {
                self.logger.debug(&format!(
                    "[{}] Notification '{}' is not in the local list",
                    context("NotificationStore", "mark_as_read"),
                    id
                ));
                return false;
            }
        };

        if !notification.is_read {
            notification.update_read(true);
            self.unread_count = self.unread_count.saturating_sub(1);
        }

        self.pending
            .push_back(Confirmation::MarkRead(id.to_string()));
        self.notify_changed();
        true
    }

    fn mark_all_as_read(&mut self) {
        for notification in &mut self.notifications {
            notification.update_read(true);
        }
        self.unread_count = 0;

        self.pending.push_back(Confirmation::MarkAllRead);
        self.notify_changed();
    }

    fn delete_notification(&mut self, id: &str) -> bool {
        let removed = match self.notifications.iter().position(|n| n.id == id) {
            Some(index) => {
                let notification = self.notifications.remove(index);
                if !notification.is_read {
                    self.unread_count = self.unread_count.saturating_sub(1);
                }
                true
            }
            None => false,
        };

        // The server may still hold it even when the local list does not.
        self.pending.push_back(Confirmation::Delete(id.to_string()));

        if removed {
            self.notify_changed();
        }
        removed
    }

    fn delete_all_notifications(&mut self) {
        self.notifications.clear();
        self.unread_count = 0;

        self.pending.push_back(Confirmation::DeleteAll);
        self.notify_changed();
    }

    fn ingest(&mut self, payload: Value) -> bool {
        let c = context("NotificationStore", "ingest");

        // Server ids are UUID strings; numeric ids are not accepted.
        let has_id = payload
            .get("id")
            .and_then(Value::as_str)
            .map(|id| !id.is_empty())
            .unwrap_or(false);
        if !has_id {
            self.logger
                .debug(&format!("[{}] Ignoring payload without an id", c));
            return false;
        }

        let notification: Notification = match serde_json::from_value(payload) {
            Ok(n) => n,
            Err(e) => {
                self.logger
                    .warning(&format!("[{}] Ignoring malformed notification: {}", c, e));
                return false;
            }
        };

        self.insert(notification)
    }

    fn insert(&mut self, notification: Notification) -> bool {
        if self.notifications.iter().any(|n| n.id == notification.id) {
            self.logger.debug(&format!(
                "[{}] Notification '{}' already present",
                context("NotificationStore", "insert"),
                notification.id
            ));
            return false;
        }

        let cue = sound::select(Some(notification.effective_type()));
        if !notification.is_read {
            self.unread_count += 1;
        }
        self.notifications.insert(0, notification);

        self.play(cue);
        self.notify_changed();
        true
    }

    fn process_events(&mut self) -> usize {
        let events: Vec<StoreEvent> = self.receiver.try_iter().collect();

        for event in &events {
            match event {
                StoreEvent::Incoming(payload) => {
                    self.ingest(payload.clone());
                }
                StoreEvent::RefreshRequested => {
                    self.logger.info(&format!(
                        "[{}] Relay signalled a new notification, refreshing",
                        context("NotificationStore", "process_events")
                    ));
                    self.fetch_all();
                }
            }
        }

        events.len()
    }

    fn process_confirmations(&mut self) -> usize {
        let (sent, resync) = self.send_confirmations();

        if resync {
            self.logger.info(&format!(
                "[{}] Resynchronizing after a failed delete",
                context("NotificationStore", "process_confirmations")
            ));
            self.fetch_all();
        }

        sent
    }

    /// Sends every queued confirmation. Returns how many were sent and whether
    /// a failed delete calls for a resync.
    fn send_confirmations(&mut self) -> (usize, bool) {
        let c = context("NotificationStore", "send_confirmations");
        let confirmations: Vec<Confirmation> = self.pending.drain(..).collect();
        let mut resync = false;

        for confirmation in &confirmations {
            let result = match confirmation {
                Confirmation::MarkRead(id) => self.client.mark_read(id),
                Confirmation::MarkAllRead => self.client.mark_all_read(),
                Confirmation::Delete(id) => self.client.delete(id),
                Confirmation::DeleteAll => self.client.delete_all(),
            };

            if let Err(e) = result {
                self.logger
                    .error(&format!("[{}] {:?} failed: {}", c, confirmation, e));
                resync |= confirmation.resyncs_on_failure();
            }
        }

        (confirmations.len(), resync)
    }

    fn clear(&mut self) {
        self.notifications.clear();
        self.unread_count = 0;
        self.loading = false;
        self.pending.clear();
        while self.receiver.try_recv().is_ok() {}
        self.notify_changed();
    }
}
