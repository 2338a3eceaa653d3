//! Copy execution strategies and run-scoped state
//!
//! The merge walk hands every copy decision to a [`CopyExecutor`]. With
//! [`ExecutionStrategy::Immediate`] the file is copied on the spot; with
//! [`ExecutionStrategy::Planned`] it is queued in the run's [`CopyPlan`] and
//! copied by [`CopyExecutor::finish`] once the whole tree has been walked.
//! Either way a copy reads the entire source file into memory and writes it
//! out in one call.

use dirmirror_types::{
    CopyProgress, CopyTask, ExecutionStrategy, FileSystem, ProgressReporter, Result, RunId,
    SyncStats,
};
use tracing::{debug, warn};

/// Ordered queue of deferred copies with its byte totals
#[derive(Debug, Clone, Default)]
pub struct CopyPlan {
    tasks: Vec<CopyTask>,
    bytes_planned: u64,
    bytes_copied: u64,
}

impl CopyPlan {
    /// Create an empty plan
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a task and account for its size
    pub fn enqueue(&mut self, task: CopyTask) {
        self.bytes_planned += task.size;
        self.tasks.push(task);
    }

    /// Tasks in enqueue order
    pub fn tasks(&self) -> &[CopyTask] {
        &self.tasks
    }

    /// Number of queued tasks
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Whether nothing is queued
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Sum of the sizes of all queued tasks
    pub fn bytes_planned(&self) -> u64 {
        self.bytes_planned
    }

    /// Bytes copied so far by the planned pass
    pub fn bytes_copied(&self) -> u64 {
        self.bytes_copied
    }
}

/// State that lives for exactly one mirror run
#[derive(Debug)]
pub struct RunContext {
    run_id: RunId,
    pub(crate) plan: CopyPlan,
    pub(crate) stats: SyncStats,
}

impl RunContext {
    /// Create the context for a new run
    pub fn new(run_id: RunId) -> Self {
        Self {
            run_id,
            plan: CopyPlan::new(),
            stats: SyncStats::new(),
        }
    }

    /// Run identifier
    pub fn run_id(&self) -> RunId {
        self.run_id
    }

    /// Deferred copies of this run
    pub fn plan(&self) -> &CopyPlan {
        &self.plan
    }

    /// Statistics collected so far
    pub fn stats(&self) -> &SyncStats {
        &self.stats
    }

    fn record_copy(&mut self, bytes: u64) {
        self.stats.files_copied += 1;
        self.stats.bytes_copied += bytes;
    }
}

/// Executes copy decisions with the configured strategy
pub struct CopyExecutor<'a> {
    fs: &'a dyn FileSystem,
    reporter: &'a dyn ProgressReporter,
    strategy: ExecutionStrategy,
    preserve_timestamps: bool,
    dry_run: bool,
}

impl<'a> CopyExecutor<'a> {
    /// Create an executor over the given filesystem and progress sink
    pub fn new(
        fs: &'a dyn FileSystem,
        reporter: &'a dyn ProgressReporter,
        strategy: ExecutionStrategy,
    ) -> Self {
        Self {
            fs,
            reporter,
            strategy,
            preserve_timestamps: false,
            dry_run: false,
        }
    }

    /// Copy the source modification time onto each destination, best effort
    pub fn preserve_timestamps(mut self, enabled: bool) -> Self {
        self.preserve_timestamps = enabled;
        self
    }

    /// Account for copies without touching the destination
    pub fn dry_run(mut self, enabled: bool) -> Self {
        self.dry_run = enabled;
        self
    }

    /// Handle one copy decision
    pub async fn submit(&self, ctx: &mut RunContext, task: CopyTask) -> Result<()> {
        match self.strategy {
            ExecutionStrategy::Immediate => {
                let bytes = self.copy(&task).await?;
                ctx.record_copy(bytes);
            }
            ExecutionStrategy::Planned => {
                debug!(
                    "Queued copy {} -> {} ({} bytes)",
                    task.source.display(),
                    task.dest.display(),
                    task.size
                );
                ctx.plan.enqueue(task);
            }
        }
        Ok(())
    }

    /// Run the deferred copies, in enqueue order, once the walk is complete.
    ///
    /// Progress is reported before and after each copy. Does nothing for the
    /// immediate strategy.
    pub async fn finish(&self, ctx: &mut RunContext) -> Result<()> {
        if self.strategy != ExecutionStrategy::Planned {
            return Ok(());
        }

        let tasks = std::mem::take(&mut ctx.plan.tasks);
        let task_count = tasks.len();
        self.reporter.plan_ready(task_count, ctx.plan.bytes_planned);

        for (index, task) in tasks.iter().enumerate() {
            self.reporter.copy_started(&CopyProgress {
                task,
                task_number: index + 1,
                task_count,
                bytes_copied: ctx.plan.bytes_copied,
                bytes_planned: ctx.plan.bytes_planned,
            });

            let bytes = self.copy(task).await?;
            ctx.plan.bytes_copied += task.size;
            ctx.record_copy(bytes);

            self.reporter.copy_finished(&CopyProgress {
                task,
                task_number: index + 1,
                task_count,
                bytes_copied: ctx.plan.bytes_copied,
                bytes_planned: ctx.plan.bytes_planned,
            });
        }

        ctx.plan.tasks = tasks;
        Ok(())
    }

    /// Copy a single file, returning the number of bytes written
    async fn copy(&self, task: &CopyTask) -> Result<u64> {
        if self.dry_run {
            debug!(
                "DRY RUN: Would copy {} -> {}",
                task.source.display(),
                task.dest.display()
            );
            return Ok(task.size);
        }

        let contents = self.fs.read_file_contents(&task.source).await?;
        self.fs.write_file_contents(&task.dest, &contents).await?;

        if self.preserve_timestamps {
            if let Some(modified) = task.modified {
                if let Err(e) = self.fs.set_modified(&task.dest, modified).await {
                    warn!("Could not preserve modification time: {}", e);
                }
            }
        }

        debug!(
            "Copied: {} -> {} ({} bytes)",
            task.source.display(),
            task.dest.display(),
            contents.len()
        );
        Ok(contents.len() as u64)
    }
}
