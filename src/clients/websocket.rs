use crate::config::Config;
use crate::error::Error;
use crate::schema::event::StoreEvent;

use serde_json::Value;
use std::net::TcpStream;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};
use tungstenite::stream::MaybeTlsStream;
use tungstenite::{Message, WebSocket};

// How often a blocked reader wakes up to check for a manual disconnect.
const STOP_CHECK_INTERVAL: Duration = Duration::from_millis(250);

#[derive(Debug)]
pub enum FeedStatus {
    Connected,
    Disconnected { reason: Error, retry_in: Duration },
    DroppedFrame(Error),
    Stopped,
}

#[derive(Debug, Clone)]
pub struct Backoff {
    initial: Duration,
    max: Duration,
    current: Duration,
}

impl Backoff {
    pub fn new(initial: Duration, max: Duration) -> Self {
        Backoff {
            initial,
            max,
            current: initial,
        }
    }

    pub fn next_delay(&mut self) -> Duration {
        let delay = self.current;
        self.current = (self.current * 2).min(self.max);
        delay
    }

    pub fn reset(&mut self) {
        self.current = self.initial;
    }
}

pub struct LiveFeed {
    url: Option<String>,
    backoff: Backoff,
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
    status_sender: Sender<FeedStatus>,
    status_receiver: Receiver<FeedStatus>,
}

impl LiveFeed {
    pub fn new(config: &Config) -> Self {
        let (status_sender, status_receiver) = channel();
        LiveFeed {
            url: config.ws_url_with_token(),
            backoff: Backoff::new(config.reconnect_initial, config.reconnect_max),
            stop: Arc::new(AtomicBool::new(false)),
            handle: None,
            status_sender,
            status_receiver,
        }
    }

    /// Starts the reader thread. Returns `false` when there is no session token
    /// to authenticate with.
    pub fn connect(&mut self, events: Sender<StoreEvent>) -> bool {
        let url = match &self.url {
            Some(url) => url.clone(),
            None => return false,
        };

        if self.connected() {
            return true;
        }

        self.stop = Arc::new(AtomicBool::new(false));
        let reader = Reader {
            url,
            backoff: self.backoff.clone(),
            stop: self.stop.clone(),
            events,
            status: self.status_sender.clone(),
        };
        self.handle = Some(std::thread::spawn(move || reader.run()));
        true
    }

    pub fn connected(&self) -> bool {
        self.handle
            .as_ref()
            .map(|h| !h.is_finished())
            .unwrap_or(false)
    }

    /// Stops the reader and suppresses reconnection. The thread notices within
    /// one stop-check interval; it is joined only if it already exited.
    pub fn disconnect(&mut self) -> bool {
        self.stop.store(true, Ordering::SeqCst);
        match self.handle.take() {
            Some(handle) => {
                if handle.is_finished() {
                    let _ = handle.join();
                }
                true
            }
            None => false,
        }
    }

    pub fn statuses(&self) -> Vec<FeedStatus> {
        self.status_receiver.try_iter().collect()
    }
}

impl Drop for LiveFeed {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::SeqCst);
    }
}

struct Reader {
    url: String,
    backoff: Backoff,
    stop: Arc<AtomicBool>,
    events: Sender<StoreEvent>,
    status: Sender<FeedStatus>,
}

impl Reader {
    fn stopped(&self) -> bool {
        self.stop.load(Ordering::SeqCst)
    }

    fn run(mut self) {
        while !self.stopped() {
            let reason = match tungstenite::connect(self.url.as_str()) {
                Ok((mut socket, _)) => {
                    self.backoff.reset();
                    set_read_timeout(&mut socket, STOP_CHECK_INTERVAL);
                    let _ = self.status.send(FeedStatus::Connected);

                    let reason = self.read_until_closed(&mut socket);
                    if self.stopped() {
                        let _ = socket.close(None);
                        let _ = socket.flush();
                    }
                    reason
                }
                Err(e) => Error::from(e),
            };

            if self.stopped() {
                break;
            }

            let retry_in = self.backoff.next_delay();
            let _ = self
                .status
                .send(FeedStatus::Disconnected { reason, retry_in });
            self.sleep(retry_in);
        }

        let _ = self.status.send(FeedStatus::Stopped);
    }

    fn read_until_closed(&self, socket: &mut WebSocket<MaybeTlsStream<TcpStream>>) -> Error {
        loop {
            if self.stopped() {
                return Error::from_transport("disconnected manually");
            }

            match socket.read() {
                Ok(Message::Text(text)) => match serde_json::from_str::<Value>(&text) {
                    Ok(value) => {
                        if self.stopped() {
                            continue;
                        }
                        if self.events.send(StoreEvent::Incoming(value)).is_err() {
                            self.stop.store(true, Ordering::SeqCst);
                            return Error::from_transport("store dropped");
                        }
                    }
                    Err(e) => {
                        let _ = self.status.send(FeedStatus::DroppedFrame(Error::from(e)));
                    }
                },
                Ok(Message::Close(frame)) => {
                    return match frame {
                        Some(frame) => Error::from_transport(&format!(
                            "closed by server (code {})",
                            u16::from(frame.code)
                        )),
                        None => Error::from_transport("closed by server"),
                    };
                }
                Ok(_) => {}
                Err(tungstenite::Error::Io(e))
                    if matches!(
                        e.kind(),
                        std::io::ErrorKind::WouldBlock | std::io::ErrorKind::TimedOut
                    ) => {}
                Err(e) => return Error::from(e),
            }
        }
    }

    fn sleep(&self, duration: Duration) {
        let deadline = Instant::now() + duration;
        while !self.stopped() {
            let now = Instant::now();
            if now >= deadline {
                break;
            }
            std::thread::sleep((deadline - now).min(STOP_CHECK_INTERVAL));
        }
    }
}

// TLS streams keep blocking reads; they still wake on server pings.
#[allow(irrefutable_let_patterns)]
fn set_read_timeout(socket: &mut WebSocket<MaybeTlsStream<TcpStream>>, timeout: Duration) {
    if let MaybeTlsStream::Plain(stream) = socket.get_mut() {
        let _ = stream.set_read_timeout(Some(timeout));
    }
}
