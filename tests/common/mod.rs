#![allow(dead_code)]

use fieldnotify::clients::common::ClientTrait;
use fieldnotify::{
    Client, Error, LogLevel, Logger, LoggerTrait, Notification, NotificationSnapshot,
    NotificationStore, Result, Sound, SoundPlayer, SoundPlayerTrait,
};

use std::cell::RefCell;
use std::rc::Rc;

#[derive(Default)]
pub struct ServerState {
    pub notifications: Vec<Notification>,
    pub fail_fetch: bool,
    pub fail_mark: bool,
    pub fail_delete: bool,
    pub fetches: usize,
    pub calls: Vec<String>,
}

/// In-memory stand-in for the notification endpoints.
#[derive(Clone, Default)]
pub struct FakeServer(pub Rc<RefCell<ServerState>>);

impl FakeServer {
    pub fn with(notifications: Vec<Notification>) -> Self {
        let server = FakeServer::default();
        server.0.borrow_mut().notifications = notifications;
        server
    }

    pub fn state(&self) -> std::cell::RefMut<'_, ServerState> {
        self.0.borrow_mut()
    }

    pub fn fetches(&self) -> usize {
        self.0.borrow().fetches
    }

    pub fn calls(&self) -> Vec<String> {
        self.0.borrow().calls.clone()
    }
}

impl ClientTrait for FakeServer {
    fn get_notifications(&mut self) -> Result<NotificationSnapshot> {
        let mut state = self.0.borrow_mut();
        state.fetches += 1;
        if state.fail_fetch {
            return Err(Error::from_transport("connection refused"));
        }
        Ok(NotificationSnapshot {
            unread_count: state.notifications.iter().filter(|n| !n.is_read).count(),
            notifications: state.notifications.clone(),
        })
    }

    fn mark_read(&mut self, id: &str) -> Result<()> {
        let mut state = self.0.borrow_mut();
        state.calls.push(format!("PUT /notifications/{}/read", id));
        if state.fail_mark {
            return Err(Error::from_server(500, "Failed to update"));
        }
        for n in state.notifications.iter_mut().filter(|n| n.id == id) {
            n.is_read = true;
        }
        Ok(())
    }

    fn mark_all_read(&mut self) -> Result<()> {
        let mut state = self.0.borrow_mut();
        state.calls.push("PUT /notifications/read-all".to_string());
        if state.fail_mark {
            return Err(Error::from_server(500, "Failed to update"));
        }
        for n in state.notifications.iter_mut() {
            n.is_read = true;
        }
        Ok(())
    }

    fn delete(&mut self, id: &str) -> Result<()> {
        let mut state = self.0.borrow_mut();
        state.calls.push(format!("DELETE /notifications/{}", id));
        if state.fail_delete {
            return Err(Error::from_server(500, "Failed to delete notification"));
        }
        state.notifications.retain(|n| n.id != id);
        Ok(())
    }

    fn delete_all(&mut self) -> Result<()> {
        let mut state = self.0.borrow_mut();
        state.calls.push("DELETE /notifications/delete-all".to_string());
        if state.fail_delete {
            return Err(Error::from_server(500, "Failed to delete notifications"));
        }
        state.notifications.clear();
        Ok(())
    }
}

#[derive(Clone, Default)]
pub struct MemoryLogger(pub Rc<RefCell<Vec<(LogLevel, String)>>>);

impl MemoryLogger {
    pub fn count(&self, level: LogLevel) -> usize {
        self.0.borrow().iter().filter(|(l, _)| *l == level).count()
    }
}

impl LoggerTrait for MemoryLogger {
    fn log(&self, level: &LogLevel, message: &str) {
        self.0.borrow_mut().push((*level, message.to_string()));
    }
}

#[derive(Clone, Default)]
pub struct RecordingPlayer(pub Rc<RefCell<Vec<Sound>>>);

impl RecordingPlayer {
    pub fn played(&self) -> Vec<Sound> {
        self.0.borrow().clone()
    }
}

impl SoundPlayerTrait for RecordingPlayer {
    fn play(&mut self, sound: Sound) -> Result<()> {
        self.0.borrow_mut().push(sound);
        Ok(())
    }
}

pub struct Harness {
    pub server: FakeServer,
    pub logs: MemoryLogger,
    pub sounds: RecordingPlayer,
    pub store: NotificationStore,
}

pub fn harness(notifications: Vec<Notification>) -> Harness {
    let server = FakeServer::with(notifications);
    let logs = MemoryLogger::default();
    let sounds = RecordingPlayer::default();
    let store = NotificationStore::new(
        Client::new(server.clone()),
        Logger::new(logs.clone()),
        SoundPlayer::new(sounds.clone()),
    );

    Harness {
        server,
        logs,
        sounds,
        store,
    }
}

pub fn unread(id: &str) -> Notification {
    Notification::new(id, &format!("Notification {}", id), "")
}

pub fn read(id: &str) -> Notification {
    unread(id).with_read(true)
}

pub fn local_unread(store: &NotificationStore) -> usize {
    store.notifications().iter().filter(|n| !n.is_read).count()
}
