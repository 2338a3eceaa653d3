//! Progress reporting for the planned copy pass

use dirmirror_types::{CopyProgress, ProgressReporter, SyncStats};
use std::path::PathBuf;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::info;

/// Reporter that writes every event to the `tracing` log
#[derive(Debug, Clone, Copy, Default)]
pub struct LogReporter;

impl ProgressReporter for LogReporter {
    fn plan_ready(&self, task_count: usize, bytes_planned: u64) {
        info!(
            "Copy plan ready: {} files, {} total",
            task_count,
            format_bytes(bytes_planned)
        );
    }

    fn copy_started(&self, progress: &CopyProgress<'_>) {
        info!(
            "[{}/{}] {} of {} ({:.1}%) copying {} -> {}",
            progress.task_number,
            progress.task_count,
            format_bytes(progress.bytes_copied),
            format_bytes(progress.bytes_planned),
            progress.percentage(),
            progress.task.source.display(),
            progress.task.dest.display()
        );
    }

    fn copy_finished(&self, _progress: &CopyProgress<'_>) {}

    fn completed(&self, stats: &SyncStats) {
        info!(
            "Mirror completed: {} files copied ({}), {} skipped in {}",
            stats.files_copied,
            format_bytes(stats.bytes_copied),
            stats.files_skipped,
            format_duration(stats.duration)
        );
    }
}

/// Progress event types
#[derive(Debug, Clone, PartialEq)]
pub enum ProgressEvent {
    /// Plan finished with the given task count and byte total
    PlanReady {
        /// Number of queued copies
        task_count: usize,
        /// Bytes planned
        bytes_planned: u64,
    },
    /// A copy is about to start
    CopyStarted {
        /// Source file
        source: PathBuf,
        /// Bytes copied before this task
        bytes_copied: u64,
        /// Bytes planned
        bytes_planned: u64,
        /// Percentage at the time of the event
        percentage: f64,
    },
    /// A copy finished
    CopyFinished {
        /// Source file
        source: PathBuf,
        /// Bytes copied including this task
        bytes_copied: u64,
    },
    /// The run completed
    Completed(SyncStats),
}

/// Reporter that forwards events over an unbounded channel
#[derive(Debug, Clone)]
pub struct ChannelReporter {
    event_tx: mpsc::UnboundedSender<ProgressEvent>,
}

impl ChannelReporter {
    /// Create a reporter together with the receiving end of its channel
    pub fn new() -> (Self, mpsc::UnboundedReceiver<ProgressEvent>) {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        (Self { event_tx }, event_rx)
    }
}

impl ProgressReporter for ChannelReporter {
    fn plan_ready(&self, task_count: usize, bytes_planned: u64) {
        let _ = self.event_tx.send(ProgressEvent::PlanReady {
            task_count,
            bytes_planned,
        });
    }

    fn copy_started(&self, progress: &CopyProgress<'_>) {
        let _ = self.event_tx.send(ProgressEvent::CopyStarted {
            source: progress.task.source.clone(),
            bytes_copied: progress.bytes_copied,
            bytes_planned: progress.bytes_planned,
            percentage: progress.percentage(),
        });
    }

    fn copy_finished(&self, progress: &CopyProgress<'_>) {
        let _ = self.event_tx.send(ProgressEvent::CopyFinished {
            source: progress.task.source.clone(),
            bytes_copied: progress.bytes_copied,
        });
    }

    fn completed(&self, stats: &SyncStats) {
        let _ = self.event_tx.send(ProgressEvent::Completed(stats.clone()));
    }
}

/// Format bytes in human-readable format
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
    let mut size = bytes as f64;
    let mut unit_index = 0;

    while size >= 1024.0 && unit_index < UNITS.len() - 1 {
        size /= 1024.0;
        unit_index += 1;
    }

    if unit_index == 0 {
        format!("{} {}", bytes, UNITS[0])
    } else {
        format!("{:.2} {}", size, UNITS[unit_index])
    }
}

/// Format duration as human-readable string
pub fn format_duration(duration: Duration) -> String {
    let total_seconds = duration.as_secs();
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    if hours > 0 {
        format!("{}h {}m {}s", hours, minutes, seconds)
    } else if minutes > 0 {
        format!("{}m {}s", minutes, seconds)
    } else {
        format!("{:.2}s", duration.as_secs_f64())
    }
}
