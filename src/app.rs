//! Application orchestrator.
//! Loads/merges config, initializes logging, installs the Ctrl-C handler,
//! runs the sorter and reports the outcome.

use anyhow::{Result, bail};
use std::sync::{Arc, Mutex};
use tracing::{debug, error};

use file_sorter::cli::Args;
use file_sorter::config::{CONFIG_ENV, CONFIG_TEMPLATE, load_config};
use file_sorter::output as out;
use file_sorter::{Config, Sorter, default_config_path, shutdown};

use crate::logging::init_tracing;

fn print_config_location() {
    if let Ok(p) = std::env::var(CONFIG_ENV) {
        out::print_info(&format!("Using {CONFIG_ENV} (explicit):\n  {p}\n"));
        return;
    }
    match default_config_path() {
        Some(p) => {
            out::print_info(&format!("Default file_sorter config path:\n  {}\n", p.display()));
            if p.exists() {
                out::print_info("A config file already exists at that location.");
            } else {
                out::print_info(&format!(
                    "No config file exists there yet. Example:\n\n{CONFIG_TEMPLATE}"
                ));
            }
        }
        None => out::print_error("Could not determine a default config path"),
    }
}

/// Run the CLI application.
pub fn run(args: Args) -> Result<()> {
    if args.print_config {
        print_config_location();
        return Ok(());
    }

    // Config file first, then CLI flags on top.
    let mut cfg: Config = load_config()
        .inspect_err(|e| out::print_error(&format!("{e:#}")))?
        .unwrap_or_default();
    args.apply_overrides(&mut cfg);

    if cfg.source.as_os_str().is_empty() || cfg.output.as_os_str().is_empty() {
        out::print_error("Both a source (-s) and an output (-o) directory are required.");
        bail!("missing source or output directory");
    }

    let guard_opt = init_tracing(cfg.log_level, cfg.log_file.as_deref(), args.json)
        .inspect_err(|e| out::print_error(&format!("Failed to initialize logging: {e:#}")))?;

    // Drop the guard on Ctrl-C so buffered file logs are flushed.
    let guard_slot = Arc::new(Mutex::new(guard_opt));
    {
        let guard_slot = Arc::clone(&guard_slot);
        ctrlc::set_handler(move || {
            shutdown::request();
            out::print_warn("Received interrupt; finishing the current file...");
            if let Ok(mut g) = guard_slot.lock() {
                let _ = g.take();
            }
        })?;
    }

    debug!("Starting file_sorter: {:?}", args);

    let result = Sorter::new(cfg).run();

    let outcome = match result {
        Ok(report) => {
            out::print_summary(&report);
            Ok(())
        }
        Err(e) => {
            error!(code = e.code(), kind = e.kind(), error = %e, "Run aborted");
            out::print_error(&e.to_string());
            Err(e.into())
        }
    };

    // Ensure logs are flushed before exit
    if let Ok(mut g) = guard_slot.lock() {
        let _ = g.take();
    }

    outcome
}
