use std::io::IsTerminal;

use crate::logger::format::{LogWriter, LoggerFormat};

#[derive(Debug, Clone)]
pub struct LoggerConfig {
    pub format: LoggerFormat,
    pub level: String,
    pub writer: LogWriter,
    pub with_targets: bool,
    pub use_color: bool,
}

impl LoggerConfig {
    /// Default config writing to stderr, colored when stderr is a terminal.
    pub fn stderr() -> Self {
        Self {
            writer: LogWriter::Stderr,
            use_color: std::io::stderr().is_terminal(),
            ..Default::default()
        }
    }
}

impl Default for LoggerConfig {
    fn default() -> Self {
        let use_color = cfg!(test) || std::io::stdout().is_terminal();
        Self {
            format: LoggerFormat::Text,
            level: "info".to_string(),
            writer: LogWriter::Stdout,
            with_targets: true,
            use_color,
        }
    }
}
