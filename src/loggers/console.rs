use crate::loggers::common::{LogLevel, LoggerTrait};

use chrono::Utc;

pub struct ConsoleLogger {
    level: LogLevel,
}

impl ConsoleLogger {
    pub fn new(level: LogLevel) -> Self {
        ConsoleLogger { level }
    }
}

impl LoggerTrait for ConsoleLogger {
    fn log(&self, level: &LogLevel, message: &str) {
        if *level >= self.level {
            println!(
                "{} | {} | {}",
                Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
                level.as_str(),
                message
            );
        }
    }
}
