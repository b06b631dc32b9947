use crate::loggers::common::{LogLevel, LoggerTrait};

/// Hands records to whatever `log` backend the embedding application installed.
pub struct FacadeLogger {
    target: &'static str,
}

impl FacadeLogger {
    pub fn new() -> Self {
        FacadeLogger {
            target: "fieldnotify",
        }
    }
}

impl Default for FacadeLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl LoggerTrait for FacadeLogger {
    fn log(&self, level: &LogLevel, message: &str) {
        let level = match level {
            LogLevel::Trace => log::Level::Trace,
            LogLevel::Debug => log::Level::Debug,
            LogLevel::Info => log::Level::Info,
            LogLevel::Warning => log::Level::Warn,
            LogLevel::Error => log::Level::Error,
        };
        log::log!(target: self.target, level, "{}", message);
    }
}
