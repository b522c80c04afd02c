//! Platform logging initialization for the shortener front-end.
//!
//! Logs go to `./shortener.log` by default so they never interleave with the form
//! on stdout. The terminal logger writes to stderr.

use std::fs::File;
use std::path::Path;

use log::LevelFilter;
use serde::{Deserialize, Serialize};
use simplelog::{
    ColorChoice, CombinedLogger, Config, ConfigBuilder, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};

use super::settings::LogSettings;

/// Destination for log output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LogDestination {
    /// Write to the configured log file.
    #[default]
    File,
    /// Write to the terminal (stderr).
    Terminal,
    /// Write to both file and terminal.
    Both,
    /// Disable logging entirely.
    Off,
}

impl LogDestination {
    /// Adds the terminal to whatever was configured.
    pub fn with_terminal(self) -> Self {
        match self {
            LogDestination::File | LogDestination::Both => LogDestination::Both,
            LogDestination::Terminal | LogDestination::Off => LogDestination::Terminal,
        }
    }
}

/// Initialize the logger from settings. Failures to open the log file are reported
/// on stderr and otherwise ignored.
pub fn initialize(settings: &LogSettings) {
    let level = parse_level(&settings.level);
    let config = build_config();

    let loggers: Vec<Box<dyn SharedLogger>> = match settings.destination {
        LogDestination::Off => return,
        LogDestination::File => match create_file_logger(&settings.file, level, config) {
            Some(file_logger) => vec![file_logger],
            None => return,
        },
        LogDestination::Terminal => vec![terminal_logger(level, config)],
        LogDestination::Both => {
            let mut loggers: Vec<Box<dyn SharedLogger>> =
                vec![terminal_logger(level, config.clone())];
            if let Some(file_logger) = create_file_logger(&settings.file, level, config) {
                loggers.push(file_logger);
            }
            loggers
        }
    };

    let _ = CombinedLogger::init(loggers);
}

pub(crate) fn parse_level(raw: &str) -> LevelFilter {
    raw.trim().parse().unwrap_or(LevelFilter::Info)
}

fn build_config() -> Config {
    ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Error)
        .build()
}

fn terminal_logger(level: LevelFilter, config: Config) -> Box<TermLogger> {
    TermLogger::new(level, config, TerminalMode::Stderr, ColorChoice::Auto)
}

fn create_file_logger(
    path: &Path,
    level: LevelFilter,
    config: Config,
) -> Option<Box<WriteLogger<File>>> {
    match File::create(path) {
        Ok(file) => Some(WriteLogger::new(level, config, file)),
        Err(err) => {
            eprintln!("Warning: Could not create log file at {:?}: {}", path, err);
            None
        }
    }
}
