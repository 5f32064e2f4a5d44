//! `log` backend that writes to the browser console.

use log::{Level, LevelFilter, Log, Metadata, Record};

struct ConsoleLogger;

static LOGGER: ConsoleLogger = ConsoleLogger;

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format_line(record.level(), record.target(), &record.args().to_string());
        match record.level() {
            Level::Error => gloo::console::error!(line),
            Level::Warn => gloo::console::warn!(line),
            Level::Info => gloo::console::info!(line),
            Level::Debug | Level::Trace => gloo::console::debug!(line),
        }
    }

    fn flush(&self) {}
}

/// Install the console logger. Later calls are no-ops.
pub fn init() {
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(default_level());
    }
}

#[must_use]
pub const fn default_level() -> LevelFilter {
    if cfg!(feature = "debug-log") {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}

fn format_line(level: Level, target: &str, message: &str) -> String {
    format!("[{level}] {target}: {message}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lines_carry_level_and_target() {
        assert_eq!(
            format_line(Level::Warn, "points_web::controller", "no save button"),
            "[WARN] points_web::controller: no save button"
        );
    }

    #[test]
    fn default_level_tracks_feature() {
        let expected = if cfg!(feature = "debug-log") {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        };
        assert_eq!(default_level(), expected);
    }
}
