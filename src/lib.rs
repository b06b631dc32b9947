pub type Result<T> = core::result::Result<T, error::Error>;

pub mod clients;
pub mod config;
pub mod error;
pub mod framework;
pub mod loggers;
pub mod schema;

pub use config::Config;
pub use error::Error;
pub use framework::application::{Application, ApplicationTrait, BoolFlag, Context};
pub use framework::client::Client;
pub use framework::logger::Logger;
pub use framework::relay::RelayHandle;
pub use framework::sound::{LoggingSoundPlayer, SilentSoundPlayer, Sound, SoundPlayer, SoundPlayerTrait};
pub use framework::store::NotificationStore;
pub use framework::workers::live_feed::Worker as LiveFeedWorker;
pub use framework::workers::poll::Worker as PollWorker;
pub use framework::workers::sync::Worker as SyncWorker;
pub use loggers::common::{LogLevel, LoggerTrait};
pub use loggers::console::ConsoleLogger;
pub use loggers::facade::FacadeLogger;
pub use schema::event::{Confirmation, StoreEvent, StoreSnapshot};
pub use schema::metadata::Metadata;
pub use schema::notification::{Notification, NotificationSnapshot, NotificationType};
pub use schema::route::Destination;
