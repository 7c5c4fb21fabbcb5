//! Terminal output helpers.
//!
//! Status lines share one look: an emoji header when a command starts, `✓` on success,
//! `!` for non-fatal notices. Errors are printed once by `main`.

use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

pub fn header(emoji: &str, message: &str) {
    println!("{} {}", emoji, message);
}

pub fn success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

pub fn notice(message: &str) {
    println!("{} {}", "!".yellow(), message);
}

/// Spinner shown while a silent external step runs.
pub fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.magenta} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("◜◠◝◞◡◟"),
    );
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_message(message.to_string());
    pb
}

pub fn progress_bar(len: u64) -> ProgressBar {
    let pb = ProgressBar::new(len);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-"),
    );
    pb
}
