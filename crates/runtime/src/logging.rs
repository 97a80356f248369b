use std::io::{self, Write};
use std::sync::OnceLock;

use chrono::Local;
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};

use crate::config::{PROGRAM_LOG_LEVEL, PROGRAM_NAME};

/// Stderr logger shared by every filetab binary.
pub struct Logger {
    level: Level,
}

impl Logger {
    fn render(&self, record: &Record<'_>) -> String {
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
        format!(
            "{} {:<5} {}[{}] {}",
            timestamp,
            record.level(),
            PROGRAM_NAME,
            record.target(),
            record.args()
        )
    }
}

impl Log for Logger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record<'_>) {
        if self.enabled(record.metadata()) {
            let line = self.render(record);
            let _ = writeln!(io::stderr().lock(), "{line}");
        }
    }

    fn flush(&self) {
        let _ = io::stderr().flush();
    }
}

/// Parse a level name; `off`, unknown names and a missing value all map to `Warn`.
fn parse_level(value: Option<&str>) -> Level {
    value
        .and_then(|s| s.trim().parse::<LevelFilter>().ok())
        .and_then(|filter| filter.to_level())
        .unwrap_or(Level::Warn)
}

fn get_level_from_env() -> Level {
    parse_level(std::env::var(PROGRAM_LOG_LEVEL).ok().as_deref())
}

pub fn init() -> Result<(), SetLoggerError> {
    init_with_level(get_level_from_env())
}

pub fn init_with_level(level: Level) -> Result<(), SetLoggerError> {
    static LOGGER: OnceLock<Logger> = OnceLock::new();

    // Only the first caller installs the logger; later levels are ignored so
    // the stored level and `log::max_level` never disagree.
    let init_call = LOGGER.get().is_none();
    let logger = LOGGER.get_or_init(|| Logger { level });

    if init_call {
        log::set_logger(logger)?;
        log::set_max_level(level.to_level_filter());
    }

    Ok(())
}

#[cfg(test)]
#[path = "logging_tests.rs"]
mod tests;
