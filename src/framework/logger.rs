use crate::loggers::common::{LogLevel, LoggerTrait};

use std::rc::Rc;

pub type LoggerRef = Rc<dyn LoggerTrait>;
pub struct Logger(LoggerRef);

impl Logger {
    pub fn new(logger: impl LoggerTrait + 'static) -> Self {
        Logger(Rc::new(logger))
    }

    pub fn log(&self, level: &LogLevel, message: &str) {
        self.0.log(level, message);
    }

    pub fn trace(&self, message: &str) {
        self.0.trace(message);
    }

    pub fn debug(&self, message: &str) {
        self.0.debug(message);
    }

    pub fn info(&self, message: &str) {
        self.0.info(message);
    }

    pub fn warning(&self, message: &str) {
        self.0.warning(message);
    }

    pub fn error(&self, message: &str) {
        self.0.error(message);
    }
}

impl Clone for Logger {
    fn clone(&self) -> Self {
        Logger(self.0.clone())
    }
}

/// `fieldnotify::Type::method`, the prefix of every log line.
pub fn context(type_name: &str, method: &str) -> String {
    format!("fieldnotify::{}::{}", type_name, method)
}
