//! Core configuration types.
//! - Config holds one run's settings.
//! - LogLevel is the user-facing verbosity, mapped onto tracing filters.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Program-defined verbosity levels exposed to users/config.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Only errors
    Quiet,
    /// Start/finish, created buckets and failures (default)
    #[default]
    Normal,
    /// Adds a line per copied file
    Info,
    /// Everything, including skipped entries
    Debug,
}

impl LogLevel {
    /// Parse common string names into our LogLevel (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "quiet" | "error" | "none" => Some(LogLevel::Quiet),
            "normal" => Some(LogLevel::Normal),
            "info" | "verbose" => Some(LogLevel::Info),
            "debug" | "trace" => Some(LogLevel::Debug),
            _ => None,
        }
    }

    /// Directive for `tracing_subscriber::EnvFilter`.
    pub fn filter_directive(self) -> &'static str {
        match self {
            LogLevel::Quiet => "error",
            LogLevel::Normal => "info",
            LogLevel::Info => "debug",
            LogLevel::Debug => "trace",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LogLevel::Quiet => "quiet",
            LogLevel::Normal => "normal",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
        };
        f.write_str(s)
    }
}

impl FromStr for LogLevel {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("invalid log level: '{s}'"))
    }
}

/// Settings for one sorting run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Directory tree to read from
    pub source: PathBuf,
    /// Directory receiving one bucket per extension
    pub output: PathBuf,
    /// Console verbosity
    pub log_level: LogLevel,
    /// Optional file that also receives the logs
    pub log_file: Option<PathBuf>,
    /// Worker threads for copying; 1 keeps strict depth-first order
    pub jobs: usize,
    /// If true, log what would be copied but do not modify the filesystem
    pub dry_run: bool,
    /// If true, fsync every copied file
    pub sync: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source: PathBuf::new(),
            output: PathBuf::new(),
            log_level: LogLevel::Normal,
            log_file: None,
            jobs: 1,
            dry_run: false,
            sync: false,
        }
    }
}

impl Config {
    /// Construct a Config for the given roots; other fields use defaults.
    pub fn new(source: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            output: output.into(),
            ..Default::default()
        }
    }

    pub fn with_jobs(mut self, jobs: usize) -> Self {
        self.jobs = jobs.max(1);
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_level_parse_aliases() {
        assert_eq!(LogLevel::parse("QUIET"), Some(LogLevel::Quiet));
        assert_eq!(LogLevel::parse(" normal "), Some(LogLevel::Normal));
        assert_eq!(LogLevel::parse("verbose"), Some(LogLevel::Info));
        assert_eq!(LogLevel::parse("trace"), Some(LogLevel::Debug));
        assert_eq!(LogLevel::parse("loud"), None);
        assert!("loud".parse::<LogLevel>().is_err());
    }

    #[test]
    fn display_round_trips_through_parse() {
        for lvl in [LogLevel::Quiet, LogLevel::Normal, LogLevel::Info, LogLevel::Debug] {
            assert_eq!(LogLevel::parse(&lvl.to_string()), Some(lvl));
        }
    }

    #[test]
    fn jobs_never_drop_below_one() {
        assert_eq!(Config::new("a", "b").with_jobs(0).jobs, 1);
        assert_eq!(Config::default().jobs, 1);
    }
}
