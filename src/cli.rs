//! CLI definition and parsing.
//! Defines Args and provides parse() for command-line handling.
//!
//! Notes:
//! - Flags override values from the XML config file.
//! - --debug is a shorthand for --log-level debug.

use clap::{Parser, ValueHint};
use std::path::{Path, PathBuf};

use crate::config::types::{Config, LogLevel};

/// Copy every file below SOURCE into OUTPUT/<extension>/.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "file_sorter",
    author,
    version,
    about = "Sort files into per-extension folders"
)]
pub struct Args {
    /// Path to the source directory.
    #[arg(short = 's', long, value_name = "PATH", value_hint = ValueHint::DirPath)]
    pub source: Option<PathBuf>,

    /// Path to the destination directory (created if missing).
    #[arg(short = 'o', long, value_name = "PATH", value_hint = ValueHint::DirPath)]
    pub output: Option<PathBuf>,

    /// Enable debug logging (equivalent to `--log-level debug`).
    #[arg(short = 'd', long)]
    pub debug: bool,

    /// Set log level: quiet, normal, info, debug.
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Also append logs to this file.
    #[arg(long, value_name = "FILE", value_hint = ValueHint::FilePath)]
    pub log_file: Option<PathBuf>,

    /// Emit logs in structured JSON.
    #[arg(long)]
    pub json: bool,

    /// Copy with this many worker threads; 1 keeps depth-first order.
    #[arg(short = 'j', long, value_name = "N", value_parser = parse_jobs)]
    pub jobs: Option<usize>,

    /// Show what would be copied, but do not modify files/directories.
    #[arg(long)]
    pub dry_run: bool,

    /// fsync every copied file (slower, survives power loss).
    #[arg(long)]
    pub sync: bool,

    /// Print where file_sorter looks for its config file, then exit.
    #[arg(long)]
    pub print_config: bool,
}

fn parse_jobs(s: &str) -> Result<usize, String> {
    match s.trim().parse::<usize>() {
        Ok(0) => Err("jobs must be at least 1".into()),
        Ok(n) => Ok(n),
        Err(e) => Err(format!("invalid number of jobs '{s}': {e}")),
    }
}

impl Args {
    /// Effective log level derived from flags.
    /// Precedence: --debug > --log-level value > None (use config default).
    pub fn effective_log_level(&self) -> Option<LogLevel> {
        if self.debug {
            return Some(LogLevel::Debug);
        }
        self.log_level
    }

    /// Apply CLI overrides to a loaded Config (in-place). No-ops for unset flags.
    pub fn apply_overrides(&self, cfg: &mut Config) {
        if let Some(src) = &self.source {
            cfg.source = sanitize_path(src);
        }
        if let Some(out) = &self.output {
            cfg.output = sanitize_path(out);
        }
        if let Some(level) = self.effective_log_level() {
            cfg.log_level = level;
        }
        if let Some(lf) = &self.log_file {
            cfg.log_file = Some(lf.clone());
        }
        if let Some(jobs) = self.jobs {
            cfg.jobs = jobs;
        }
        if self.dry_run {
            cfg.dry_run = true;
        }
        if self.sync {
            cfg.sync = true;
        }
    }
}

/// Drop one pair of quotes left around a path by Windows shells.
fn sanitize_path(p: &Path) -> PathBuf {
    let s = p.to_string_lossy();
    let trimmed = s.trim();
    let unquoted = ['"', '\'']
        .into_iter()
        .find_map(|q| {
            trimmed
                .strip_prefix(q)
                .and_then(|rest| rest.strip_suffix(q))
        })
        .filter(|inner| !inner.is_empty());
    match unquoted {
        Some(inner) => PathBuf::from(inner),
        None => p.to_path_buf(),
    }
}

pub fn parse() -> Args {
    Args::parse()
}
