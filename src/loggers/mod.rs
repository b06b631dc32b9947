pub mod common;
pub mod console;
pub mod facade;
