//! Terminal output utilities
//!
//! Status lines go to stdout and are dropped under `--quiet`; errors and
//! warnings go to stderr and always print.

use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::atomic::{AtomicBool, Ordering};

static QUIET: AtomicBool = AtomicBool::new(false);

/// Drop status output for the rest of the process
pub fn set_quiet(quiet: bool) {
    QUIET.store(quiet, Ordering::Relaxed);
}

pub fn is_quiet() -> bool {
    QUIET.load(Ordering::Relaxed)
}

/// Print a plain status line
pub fn line(msg: &str) {
    if !is_quiet() {
        println!("{}", msg);
    }
}

/// Print a success message
pub fn success(msg: &str) {
    line(&format!("{} {}", style("✓").green().bold(), msg));
}

/// Print an error message
pub fn error(msg: &str) {
    eprintln!("{} {}", style("✗").red().bold(), msg);
}

/// Print a warning message
pub fn warning(msg: &str) {
    eprintln!("{} {}", style("⚠").yellow().bold(), msg);
}

/// Print an info message
pub fn info(msg: &str) {
    line(&format!("{} {}", style("ℹ").blue().bold(), msg));
}

/// Print a section header
pub fn header(msg: &str) {
    line(&format!("\n{}", style(msg).bold().underlined()));
}

/// Print an indented key-value pair
pub fn kv(key: &str, value: &str) {
    line(&format!("  {}: {}", style(key).dim(), value));
}

/// Create a spinner; hidden under `--quiet`
pub fn spinner(msg: &str) -> ProgressBar {
    if is_quiet() {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new_spinner();
    let style = ProgressStyle::with_template("{spinner:.blue} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏");
    pb.set_style(style);
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}
