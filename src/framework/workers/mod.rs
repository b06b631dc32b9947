pub mod common;
pub mod live_feed;
pub mod poll;
pub mod sync;
