//! Terminal progress reporting for the planned copy pass

use console::{style, Term};
use dirmirror_sync::format_bytes;
use dirmirror_types::{CopyProgress, ProgressReporter, SyncStats};
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::OnceLock;
use std::time::Duration;

/// Progress reporter for the terminal
///
/// Draws a byte progress bar when stdout is a terminal and falls back to one
/// plain line per copy otherwise. Quiet mode suppresses both.
#[derive(Debug)]
pub struct ConsoleReporter {
    progress_bar: OnceLock<ProgressBar>,
    interactive: bool,
    quiet: bool,
}

impl ConsoleReporter {
    /// Create a reporter for the current terminal
    pub fn new(quiet: bool) -> Self {
        Self::with_interactive(quiet, Term::stdout().is_term())
    }

    /// Create a reporter with an explicit choice between bar and plain lines
    pub fn with_interactive(quiet: bool, interactive: bool) -> Self {
        Self {
            progress_bar: OnceLock::new(),
            interactive,
            quiet,
        }
    }

    fn bar_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template(
                "{spinner:.green} [{wide_bar:.cyan/blue}] {bytes}/{total_bytes} ({percent}%) {msg}",
            )
            .map(|style| style.progress_chars("█▉▊▋▌▍▎▏  "))
            .unwrap_or_else(|_| ProgressStyle::default_bar())
    }

    /// Plain progress line for a copy that is about to start
    pub fn progress_line(progress: &CopyProgress<'_>) -> String {
        format!(
            "[{}/{}] {} / {} ({:.1}%) {} -> {}",
            progress.task_number,
            progress.task_count,
            format_bytes(progress.bytes_copied),
            format_bytes(progress.bytes_planned),
            progress.percentage(),
            progress.task.source.display(),
            progress.task.dest.display()
        )
    }

    fn bar(&self) -> Option<&ProgressBar> {
        if self.quiet || !self.interactive {
            return None;
        }
        self.progress_bar.get()
    }
}

impl ProgressReporter for ConsoleReporter {
    fn plan_ready(&self, task_count: usize, bytes_planned: u64) {
        if self.quiet {
            return;
        }

        if self.interactive {
            let pb = self.progress_bar.get_or_init(|| {
                let pb = ProgressBar::new(bytes_planned);
                pb.set_style(Self::bar_style());
                pb.enable_steady_tick(Duration::from_millis(100));
                pb
            });
            pb.set_message(format!("{} files planned", task_count));
        } else {
            println!(
                "{} Planned {} files ({})",
                style("→").green().bold(),
                task_count,
                format_bytes(bytes_planned)
            );
        }
    }

    fn copy_started(&self, progress: &CopyProgress<'_>) {
        if self.quiet {
            return;
        }

        match self.bar() {
            Some(pb) => {
                let file_name = progress
                    .task
                    .source
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_default();
                pb.set_position(progress.bytes_copied);
                pb.set_message(format!(
                    "[{}/{}] {}",
                    progress.task_number, progress.task_count, file_name
                ));
            }
            None => println!("{}", Self::progress_line(progress)),
        }
    }

    fn copy_finished(&self, progress: &CopyProgress<'_>) {
        if let Some(pb) = self.bar() {
            pb.set_position(progress.bytes_copied);
        }
    }

    fn completed(&self, _stats: &SyncStats) {
        if let Some(pb) = self.bar() {
            pb.finish_and_clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dirmirror_types::CopyTask;

    #[test]
    fn test_progress_line() {
        let task = CopyTask::new("src/a.bin", "dst/a.bin", 1024);
        let progress = CopyProgress {
            task: &task,
            task_number: 2,
            task_count: 4,
            bytes_copied: 1024,
            bytes_planned: 4096,
        };

        assert_eq!(
            ConsoleReporter::progress_line(&progress),
            "[2/4] 1.00 KB / 4.00 KB (25.0%) src/a.bin -> dst/a.bin"
        );
    }

    #[test]
    fn test_quiet_reporter_never_creates_bar() {
        let reporter = ConsoleReporter::with_interactive(true, true);
        let task = CopyTask::new("s", "d", 1);

        reporter.plan_ready(1, 1);
        reporter.copy_started(&CopyProgress {
            task: &task,
            task_number: 1,
            task_count: 1,
            bytes_copied: 0,
            bytes_planned: 1,
        });
        reporter.completed(&SyncStats::new());

        assert!(reporter.progress_bar.get().is_none());
    }

    #[test]
    fn test_interactive_reporter_tracks_bytes() {
        let reporter = ConsoleReporter::with_interactive(false, true);
        let task = CopyTask::new("s", "d", 10);

        reporter.plan_ready(1, 10);
        reporter.copy_finished(&CopyProgress {
            task: &task,
            task_number: 1,
            task_count: 1,
            bytes_copied: 10,
            bytes_planned: 10,
        });

        let pb = reporter.progress_bar.get().unwrap();
        assert_eq!(pb.length(), Some(10));
        assert_eq!(pb.position(), 10);
        reporter.completed(&SyncStats::new());
        assert!(pb.is_finished());
    }
}
