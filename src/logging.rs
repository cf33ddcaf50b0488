use chrono::Local;
use log::{LevelFilter, Metadata, Record, SetLoggerError};
use std::collections::HashSet;
use std::io::{self, Write};
use std::sync::OnceLock;

// Custom logger structure
#[derive(Debug)]
struct IntcodeLogger {
    level: LevelFilter,
    debug_filters: Option<HashSet<String>>,
}

impl IntcodeLogger {
    fn passes_filters(&self, metadata: &Metadata) -> bool {
        match &self.debug_filters {
            Some(filters)
                if metadata.level() == log::Level::Debug
                    || metadata.level() == log::Level::Trace =>
            {
                filters.iter().any(|f| metadata.target().starts_with(f.as_str()))
            }
            _ => true,
        }
    }
}

// Implement the log::Log trait for our custom logger
impl log::Log for IntcodeLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level && self.passes_filters(metadata)
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

        let mut output = format!(
            "{timestamp} {level_color}{level:5}{reset} {target}: {message}",
            level = record.level(),
            target = record.target(),
            message = record.args()
        );

        // Add module path if available and different from target
        if let Some(module_path) = record.module_path() {
            if module_path != record.target() {
                output.push_str(&format!(" [{}]", module_path));
            }
        }

        // Program output owns stdout
        let mut stderr = io::stderr().lock();
        let _ = writeln!(stderr, "{}", output);
    }

    fn flush(&self) {
        let _ = io::stderr().flush();
    }
}

static LOGGER: OnceLock<IntcodeLogger> = OnceLock::new();

/// Parses a level name as accepted on the command line; unknown names fall back to Info
pub fn parse_level(name: &str) -> LevelFilter {
    match name.to_lowercase().as_str() {
        "off" => LevelFilter::Off,
        "error" => LevelFilter::Error,
        "warn" => LevelFilter::Warn,
        "info" => LevelFilter::Info,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        _ => LevelFilter::Info,
    }
}

fn parse_filters(debug_filter: Option<String>) -> Option<HashSet<String>> {
    debug_filter.map(|filter_str| {
        filter_str
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect::<HashSet<String>>()
    })
}

/// Initialize the logger with optional debug filters (e.g. "vm,instructions")
pub fn init_logger(level: LevelFilter, debug_filter: Option<String>) -> Result<(), SetLoggerError> {
    let logger = LOGGER.get_or_init(|| IntcodeLogger {
        level,
        debug_filters: parse_filters(debug_filter),
    });
    log::set_logger(logger).map(|()| log::set_max_level(level))
}

// Helper macros for specific debug topics
#[macro_export]
macro_rules! debug_vm {
    ($machine_id:expr => $($arg:tt)*) => {
        log::debug!(target: $crate::config::LOG_TARGET_VM, "[M{:02}] {}", $machine_id, format_args!($($arg)*))
    };
    ($($arg:tt)*) => {
        log::debug!(target: $crate::config::LOG_TARGET_VM, "{}", format_args!($($arg)*))
    }
}

#[macro_export]
macro_rules! debug_instructions {
    ($machine_id:expr => $($arg:tt)*) => {
        log::debug!(target: $crate::config::LOG_TARGET_INSTRUCTIONS, "[M{:02}] {}", $machine_id, format_args!($($arg)*))
    };
    ($($arg:tt)*) => {
        log::debug!(target: $crate::config::LOG_TARGET_INSTRUCTIONS, "{}", format_args!($($arg)*))
    }
}
