pub mod event;
pub mod metadata;
pub mod notification;
pub mod route;
