//! CLI argument definitions using clap.

use std::path::PathBuf;

use clap::Parser;
use tracing::level_filters::LevelFilter;

/// Validate and transform a tabular samplesheet.
#[derive(Parser)]
#[command(name = "check_samplesheet")]
#[command(version, about, long_about = None)]
#[command(after_help = "Example: check_samplesheet samplesheet.csv samplesheet.valid.csv")]
pub struct Cli {
    /// Tabular input samplesheet in CSV or TSV format
    #[arg(value_name = "FILE_IN")]
    pub file_in: PathBuf,

    /// Transformed output samplesheet in CSV format
    #[arg(value_name = "FILE_OUT")]
    pub file_out: PathBuf,

    /// The desired log level
    #[arg(short = 'l', long, value_name = "LEVEL", default_value = "WARNING")]
    pub log_level: LogLevel,
}

/// Log verbosity for diagnostic output.
#[derive(Clone, Copy, Debug, Default)]
pub enum LogLevel {
    Critical,
    Error,
    #[default]
    Warning,
    Info,
    Debug,
}

impl LogLevel {
    /// Most verbose tracing level this setting lets through.
    ///
    /// Tracing has no CRITICAL level, so CRITICAL and ERROR both map to
    /// `ERROR`.
    pub fn level_filter(self) -> LevelFilter {
        match self {
            LogLevel::Critical | LogLevel::Error => LevelFilter::ERROR,
            LogLevel::Warning => LevelFilter::WARN,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Debug => LevelFilter::DEBUG,
        }
    }
}

impl std::str::FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "CRITICAL" => Ok(LogLevel::Critical),
            "ERROR" => Ok(LogLevel::Error),
            "WARNING" => Ok(LogLevel::Warning),
            "INFO" => Ok(LogLevel::Info),
            "DEBUG" => Ok(LogLevel::Debug),
            _ => Err(format!(
                "Unknown log level: {s}. Use CRITICAL, ERROR, WARNING, INFO, or DEBUG."
            )),
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Critical => write!(f, "CRITICAL"),
            LogLevel::Error => write!(f, "ERROR"),
            LogLevel::Warning => write!(f, "WARNING"),
            LogLevel::Info => write!(f, "INFO"),
            LogLevel::Debug => write!(f, "DEBUG"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_round_trip() {
        for name in ["CRITICAL", "ERROR", "WARNING", "INFO", "DEBUG"] {
            let level: LogLevel = name.parse().unwrap();
            assert_eq!(level.to_string(), name);
        }
    }

    #[test]
    fn test_log_level_case_insensitive() {
        let level: LogLevel = "debug".parse().unwrap();
        assert!(matches!(level, LogLevel::Debug));
    }

    #[test]
    fn test_unknown_log_level_rejected() {
        assert!("TRACE".parse::<LogLevel>().is_err());
    }
}
