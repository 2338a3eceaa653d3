//! Display utilities for the dirmirror CLI

use console::style;
use dirmirror_sync::{format_bytes, format_duration, SyncReport};
use dirmirror_types::ExecutionStrategy;
use std::path::Path;

/// Usage text printed when the two directories are not given
pub const USAGE: &str = "Not enough arguments!\nUsage:\ndirmirror <source> <dest>";

/// Announce the run before it starts
pub fn display_header(source: &Path, destination: &Path, dry_run: bool) {
    println!(
        "{} Mirroring {} to {}",
        style("⟲").blue().bold(),
        style(source.display()).cyan(),
        style(destination.display()).cyan()
    );

    if dry_run {
        display_info("Dry run mode - no changes will be made");
    }
}

/// Summary lines for a finished run
pub fn summary_lines(report: &SyncReport) -> Vec<(&'static str, String)> {
    let stats = &report.stats;
    let mut lines = vec![
        ("Files copied", stats.files_copied.to_string()),
        ("Bytes copied", format_bytes(stats.bytes_copied)),
        ("Files skipped", stats.files_skipped.to_string()),
        ("Directories created", stats.directories_created.to_string()),
        ("Files removed", stats.files_removed.to_string()),
        ("Directories removed", stats.directories_removed.to_string()),
        ("Entries replaced", stats.entries_replaced.to_string()),
        ("Duration", format_duration(stats.duration)),
    ];

    if report.strategy == ExecutionStrategy::Planned {
        lines.push(("Bytes planned", format_bytes(report.bytes_planned)));
    }

    lines
}

/// Print the run summary
pub fn display_summary(report: &SyncReport) {
    println!();
    let title = if report.dry_run {
        "Mirror Statistics (dry run):"
    } else {
        "Mirror Statistics:"
    };
    println!("{}", style(title).bold().underlined());

    for (label, value) in summary_lines(report) {
        let value = match label {
            "Files skipped" => style(value).yellow(),
            "Duration" => style(value).blue(),
            "Files removed" | "Directories removed" | "Entries replaced" => style(value).magenta(),
            _ => style(value).green(),
        };
        println!("  {}: {}", label, value);
    }

    println!(
        "  Transfer rate: {}",
        style(format!(
            "{:.2} MB/s",
            report.stats.transfer_rate() / 1024.0 / 1024.0
        ))
        .blue()
    );

    if report.stats.is_noop() {
        display_success("Destination already up to date");
    }
}

/// Display a success message with proper formatting
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green().bold(), style(message).green());
}

/// Display an info message with proper formatting
pub fn display_info(message: &str) {
    println!("{} {}", style("ℹ").blue().bold(), style(message).blue());
}
