use owo_colors::OwoColorize;

use crate::sorter::RunReport;

/// User-facing lines on stdout/stderr, kept apart from the tracing logs.
/// Prefixes are colored only when the stream is a TTY.
fn is_tty(stream: atty::Stream) -> bool {
    atty::is(stream)
}

pub fn print_info(msg: &str) {
    if is_tty(atty::Stream::Stdout) {
        println!("{} {}", "info:".cyan().bold(), msg);
    } else {
        println!("info: {msg}");
    }
}

pub fn print_warn(msg: &str) {
    if is_tty(atty::Stream::Stderr) {
        eprintln!("{} {}", "warn:".yellow().bold(), msg);
    } else {
        eprintln!("warn: {msg}");
    }
}

pub fn print_error(msg: &str) {
    if is_tty(atty::Stream::Stderr) {
        eprintln!("{} {}", "error:".red().bold(), msg);
    } else {
        eprintln!("error: {msg}");
    }
}

pub fn print_success(msg: &str) {
    if is_tty(atty::Stream::Stdout) {
        println!("{} {}", "ok:".green().bold(), msg);
    } else {
        println!("ok: {msg}");
    }
}

/// One-line summary of a run, e.g. `finished: 12 copied, 1 failed`.
pub fn summary_line(report: &RunReport) -> String {
    let mut line = format!("finished: {} copied, {} failed", report.copied, report.failed);
    if report.list_errors > 0 {
        line.push_str(&format!(", {} unreadable", report.list_errors));
    }
    if report.interrupted {
        line.push_str(" (interrupted)");
    }
    line
}

/// Print the finished signal; failures make it a warning rather than an error.
pub fn print_summary(report: &RunReport) {
    let line = summary_line(report);
    if report.is_clean() {
        print_success(&line);
    } else {
        print_warn(&line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_mentions_every_nonzero_counter() {
        let clean = RunReport {
            copied: 3,
            ..Default::default()
        };
        assert_eq!(summary_line(&clean), "finished: 3 copied, 0 failed");

        let messy = RunReport {
            copied: 1,
            failed: 2,
            list_errors: 1,
            interrupted: true,
        };
        assert_eq!(
            summary_line(&messy),
            "finished: 1 copied, 2 failed, 1 unreadable (interrupted)"
        );
    }
}
