use clap::Parser;
use file_sorter::cli::Args;
use file_sorter::config::types::{Config, LogLevel};
use std::path::PathBuf;

#[test]
fn short_and_long_roots() {
    let args = Args::parse_from(["file_sorter", "-s", "/in", "-o", "/out"]);
    assert_eq!(args.source, Some(PathBuf::from("/in")));
    assert_eq!(args.output, Some(PathBuf::from("/out")));

    let args = Args::parse_from(["file_sorter", "--source", "/in", "--output", "/out"]);
    assert_eq!(args.source, Some(PathBuf::from("/in")));
    assert_eq!(args.output, Some(PathBuf::from("/out")));
}

#[test]
fn effective_log_level_precedence() {
    let args = Args::parse_from(["file_sorter", "--debug", "--log-level", "quiet"]);
    assert_eq!(args.effective_log_level(), Some(LogLevel::Debug)); // --debug wins

    let args = Args::parse_from(["file_sorter", "--log-level", "info"]);
    assert_eq!(args.effective_log_level(), Some(LogLevel::Info));

    let args = Args::parse_from(["file_sorter"]);
    assert_eq!(args.effective_log_level(), None);
}

#[test]
fn invalid_values_are_rejected_at_parse_time() {
    assert!(Args::try_parse_from(["file_sorter", "--log-level", "loud"]).is_err());
    assert!(Args::try_parse_from(["file_sorter", "--jobs", "0"]).is_err());
    assert!(Args::try_parse_from(["file_sorter", "-j", "many"]).is_err());
}

#[test]
fn apply_overrides_sets_flags() {
    let args = Args::parse_from([
        "file_sorter",
        "-s",
        "/in",
        "-o",
        "/out",
        "--log-level",
        "info",
        "--log-file",
        "/tmp/fs.log",
        "-j",
        "3",
        "--dry-run",
        "--sync",
    ]);
    let mut cfg = Config::default();
    args.apply_overrides(&mut cfg);
    assert_eq!(cfg.source, PathBuf::from("/in"));
    assert_eq!(cfg.output, PathBuf::from("/out"));
    assert_eq!(cfg.log_level, LogLevel::Info);
    assert_eq!(cfg.log_file, Some(PathBuf::from("/tmp/fs.log")));
    assert_eq!(cfg.jobs, 3);
    assert!(cfg.dry_run);
    assert!(cfg.sync);
}

#[test]
fn unset_flags_keep_config_values() {
    let mut cfg = Config::new("/cfg/in", "/cfg/out").with_jobs(2);
    cfg.log_level = LogLevel::Quiet;
    let before = cfg.clone();

    Args::parse_from(["file_sorter"]).apply_overrides(&mut cfg);
    assert_eq!(cfg, before);

    Args::parse_from(["file_sorter", "-o", "/cli/out"]).apply_overrides(&mut cfg);
    assert_eq!(cfg.source, PathBuf::from("/cfg/in"));
    assert_eq!(cfg.output, PathBuf::from("/cli/out"));
    assert_eq!(cfg.jobs, 2);
}
