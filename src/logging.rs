use chrono::Local;
use log::{LevelFilter, Metadata, Record, SetLoggerError};
use std::collections::HashSet;
use std::io::{self, Write};
use std::sync::OnceLock;

// Custom logger structure
#[derive(Debug)]
struct TankArenaLogger {
    level: LevelFilter,
    debug_filters: Option<HashSet<String>>,
}

/// Pulls the number following `marker` out of a log message, e.g. "Tank 3".
fn number_after(message: &str, marker: &str) -> Option<u32> {
    let start = message.find(marker)? + marker.len();
    let rest = &message[start..];
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    rest[..end].parse().ok()
}

impl log::Log for TankArenaLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        if metadata.level() <= self.level {
            // Debug filters only narrow debug and trace output
            if let Some(filters) = &self.debug_filters {
                if metadata.level() == log::Level::Debug || metadata.level() == log::Level::Trace {
                    return filters.contains(metadata.target())
                        || filters.iter().any(|f| metadata.target().starts_with(f));
                }
            }
            return true;
        }
        false
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let level_color = match record.level() {
            log::Level::Error => "\x1B[31m", // Red
            log::Level::Warn => "\x1B[33m",  // Yellow
            log::Level::Info => "\x1B[32m",  // Green
            log::Level::Debug => "\x1B[36m", // Cyan
            log::Level::Trace => "\x1B[35m", // Magenta
        };
        let reset = "\x1B[0m";
        let timestamp = Local::now().format("%H:%M:%S%.3f");

        let message = record.args().to_string();
        let mut context = String::new();
        if let Some(id) = number_after(&message, "Tank ") {
            context.push_str(&format!("[T{:02}]", id));
        }
        if let Some(tick) = number_after(&message, "Tick ") {
            context.push_str(&format!("[#{:03}]", tick));
        }
        if !context.is_empty() {
            context.push(' ');
        }

        let mut output = format!(
            "{timestamp} {level_color}{level:5}{reset} {context}{target}: {message}",
            level = record.level(),
            target = record.target(),
        );
        if let Some(module_path) = record.module_path() {
            if module_path != record.target() {
                output.push_str(&format!(" [{}]", module_path));
            }
        }

        let mut stdout = io::stdout().lock();
        let _ = writeln!(stdout, "{}", output);
        let _ = stdout.flush();
    }

    fn flush(&self) {
        let _ = io::stdout().flush();
    }
}

static LOGGER: OnceLock<TankArenaLogger> = OnceLock::new();

/// Install the arena logger. `debug_filter` is a comma-separated topic list
/// (vm, tank, drive, weapon, sensor, collision).
pub fn init_logger(level: LevelFilter, debug_filter: Option<String>) -> Result<(), SetLoggerError> {
    let debug_filters = debug_filter.map(|filter_str| {
        filter_str
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect::<HashSet<String>>()
    });

    let logger = LOGGER.get_or_init(|| TankArenaLogger {
        level,
        debug_filters,
    });
    log::set_logger(logger).map(|()| log::set_max_level(level))
}

// Helper macros for specific debug topics
#[macro_export]
macro_rules! debug_vm {
    ($fmt:literal $(, $arg:expr)* $(,)?) => {
        log::debug!(target: "vm", $fmt $(, $arg)*)
    };
    ($tank_id:expr, $tick:expr, $($arg:tt)*) => {
        log::debug!(target: "vm", "Tank {} Tick {}: {}", $tank_id, $tick, format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! debug_tank {
    ($fmt:literal $(, $arg:expr)* $(,)?) => {
        log::debug!(target: "tank", $fmt $(, $arg)*)
    };
    ($tank_id:expr, $tick:expr, $($arg:tt)*) => {
        log::debug!(target: "tank", "Tank {} Tick {}: {}", $tank_id, $tick, format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! debug_drive {
    ($fmt:literal $(, $arg:expr)* $(,)?) => {
        log::debug!(target: "drive", $fmt $(, $arg)*)
    };
    ($tank_id:expr, $tick:expr, $($arg:tt)*) => {
        log::debug!(target: "drive", "Tank {} Tick {}: {}", $tank_id, $tick, format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! debug_weapon {
    ($fmt:literal $(, $arg:expr)* $(,)?) => {
        log::debug!(target: "weapon", $fmt $(, $arg)*)
    };
    ($tank_id:expr, $tick:expr, $($arg:tt)*) => {
        log::debug!(target: "weapon", "Tank {} Tick {}: {}", $tank_id, $tick, format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! debug_sensor {
    ($fmt:literal $(, $arg:expr)* $(,)?) => {
        log::debug!(target: "sensor", $fmt $(, $arg)*)
    };
    ($tank_id:expr, $tick:expr, $($arg:tt)*) => {
        log::debug!(target: "sensor", "Tank {} Tick {}: {}", $tank_id, $tick, format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! debug_collision {
    ($fmt:literal $(, $arg:expr)* $(,)?) => {
        log::debug!(target: "collision", $fmt $(, $arg)*)
    };
    ($tank_id:expr, $tick:expr, $($arg:tt)*) => {
        log::debug!(target: "collision", "Tank {} Tick {}: {}", $tank_id, $tick, format_args!($($arg)*))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_after() {
        assert_eq!(number_after("Tank 12 Tick 3: fired", "Tank "), Some(12));
        assert_eq!(number_after("Tank 12 Tick 3: fired", "Tick "), Some(3));
        assert_eq!(number_after("Tank 7", "Tank "), Some(7));
        assert_eq!(number_after("no context here", "Tank "), None);
    }
}
