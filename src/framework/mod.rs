pub mod application;
pub mod client;
pub mod events;
pub mod logger;
pub mod relay;
pub mod sound;
pub mod store;
pub mod workers;
