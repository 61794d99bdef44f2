//! Progress indicators and status output.
//!
//! Spinners via indicatif with TTY detection; verbose mode suppresses them
//! and lets raw subprocess output through instead.

use std::io::IsTerminal;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

static VERBOSE: AtomicBool = AtomicBool::new(false);

/// Set global verbose mode (shows composed commands and raw engine output).
pub fn set_verbose(v: bool) {
    VERBOSE.store(v, Ordering::SeqCst);
}

pub fn is_verbose() -> bool {
    VERBOSE.load(Ordering::SeqCst)
}

pub fn is_tty() -> bool {
    std::io::stderr().is_terminal()
}

/// A spinner for long-running external invocations, with elapsed time.
pub struct Spinner {
    bar: ProgressBar,
    message: String,
}

impl Spinner {
    pub fn new(message: &str) -> Self {
        let bar = if is_tty() && !is_verbose() {
            let pb = ProgressBar::new_spinner();
            pb.set_style(
                ProgressStyle::default_spinner()
                    .template("{spinner:.cyan} {msg} [{elapsed}]")
                    .expect("Invalid spinner template")
                    .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
            );
            pb.set_message(message.to_string());
            pb.enable_steady_tick(Duration::from_millis(100));
            pb
        } else {
            let pb = ProgressBar::hidden();
            eprintln!("  → {}...", message);
            pb
        };

        Self {
            bar,
            message: message.to_string(),
        }
    }

    pub fn finish_success(&self) {
        let line = format!(
            "\u{2713} {} [{}s]",
            self.message,
            self.bar.elapsed().as_secs()
        );
        if is_tty() && !is_verbose() {
            self.bar.finish_with_message(line);
        } else {
            eprintln!("  {}", line);
        }
    }

    pub fn finish_error(&self) {
        let line = format!("\u{2717} {}", self.message);
        if is_tty() && !is_verbose() {
            self.bar.finish_with_message(line);
        } else {
            eprintln!("  {}", line);
        }
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        if !self.bar.is_finished() {
            self.bar.finish_and_clear();
        }
    }
}

pub fn print_info(message: &str) {
    eprintln!("  {} {}", "i".cyan(), message);
}

pub fn print_warn(message: &str) {
    eprintln!("  {} {}", "!".yellow(), message.yellow());
}

pub fn print_success(message: &str) {
    eprintln!("{} {}", "\u{2713}".green(), message.green());
}

pub fn print_error(message: &str) {
    eprintln!("{} {}", "\u{2717}".red(), message.red());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbose_flag_round_trips() {
        set_verbose(true);
        assert!(is_verbose());
        set_verbose(false);
        assert!(!is_verbose());
    }
}
