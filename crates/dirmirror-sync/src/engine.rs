//! Main mirror engine

use crate::{
    executor::{CopyExecutor, RunContext},
    identity::{policy_for, FilePair, IdentityPolicy},
    merge::{MergeStep, MergeWalk},
};
use dirmirror_io::LocalFileSystem;
use dirmirror_types::{
    sort_entries, CopyTask, Entry, ExecutionStrategy, FileSystem, IdentityKind, NoopReporter,
    ProgressReporter, Result, RunId, SyncAction, SyncStats,
};
use std::fmt;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

/// Mirror request
#[derive(Debug, Clone)]
pub struct SyncRequest {
    /// Source directory path
    pub source: PathBuf,
    /// Destination directory path
    pub destination: PathBuf,
    /// Request ID for tracking
    pub request_id: RunId,
}

impl SyncRequest {
    /// Create a new mirror request
    pub fn new<P: AsRef<Path>, Q: AsRef<Path>>(source: P, destination: Q) -> Self {
        Self {
            source: source.as_ref().to_path_buf(),
            destination: destination.as_ref().to_path_buf(),
            request_id: uuid::Uuid::new_v4(),
        }
    }
}

/// Mirror options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SyncOptions {
    /// How copy decisions are executed
    pub strategy: ExecutionStrategy,
    /// Which identity policy compares same-named files
    pub identity: IdentityKind,
    /// Copy source modification times onto copied files
    pub preserve_timestamps: bool,
    /// Walk and report without modifying the destination
    pub dry_run: bool,
    /// Create the destination root when it does not exist
    pub create_destination: bool,
}

impl SyncOptions {
    /// Options for copying as the walk goes
    pub fn immediate() -> Self {
        Self::default()
    }

    /// Options for planning every copy first and reporting progress
    pub fn planned() -> Self {
        Self {
            strategy: ExecutionStrategy::Planned,
            ..Self::default()
        }
    }

    /// Select the identity policy
    pub fn with_identity(mut self, identity: IdentityKind) -> Self {
        self.identity = identity;
        self
    }

    /// Enable or disable dry-run mode
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }
}

/// Outcome of a completed mirror run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncReport {
    /// Request ID
    pub request_id: RunId,
    /// Run statistics
    pub stats: SyncStats,
    /// Strategy the run used
    pub strategy: ExecutionStrategy,
    /// Number of copies queued by the planned strategy
    pub tasks_planned: usize,
    /// Bytes queued by the planned strategy
    pub bytes_planned: u64,
    /// Whether the destination was left untouched
    pub dry_run: bool,
}

/// Main mirror engine
///
/// Walks the source and destination trees together and makes the
/// destination match the source. Files are compared with the configured
/// [`IdentityPolicy`]; copies go through a [`CopyExecutor`].
pub struct SyncEngine {
    fs: Arc<dyn FileSystem>,
    reporter: Arc<dyn ProgressReporter>,
    policy: Box<dyn IdentityPolicy>,
    options: SyncOptions,
}

impl fmt::Debug for SyncEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SyncEngine")
            .field("policy", &self.policy.name())
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl Default for SyncEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl SyncEngine {
    /// Create an engine over the local disk with default options
    pub fn new() -> Self {
        Self::with_options(SyncOptions::default())
    }

    /// Create an engine over the local disk with custom options
    pub fn with_options(options: SyncOptions) -> Self {
        Self {
            fs: Arc::new(LocalFileSystem::new()),
            reporter: Arc::new(NoopReporter),
            policy: policy_for(options.identity),
            options,
        }
    }

    /// Use a different filesystem implementation
    pub fn with_file_system(mut self, fs: Arc<dyn FileSystem>) -> Self {
        self.fs = fs;
        self
    }

    /// Send progress events to the given reporter
    pub fn with_reporter(mut self, reporter: Arc<dyn ProgressReporter>) -> Self {
        self.reporter = reporter;
        self
    }

    /// Replace the identity policy selected by the options
    pub fn with_policy(mut self, policy: Box<dyn IdentityPolicy>) -> Self {
        self.policy = policy;
        self
    }

    /// Options in use
    pub fn options(&self) -> &SyncOptions {
        &self.options
    }

    /// Make the destination tree match the source tree.
    ///
    /// The first failing filesystem operation aborts the run; changes made
    /// before it stay in place.
    pub async fn sync(&self, request: SyncRequest) -> Result<SyncReport> {
        let start_time = Instant::now();
        let mut ctx = RunContext::new(request.request_id);

        info!(
            "Starting mirror: {} -> {} ({:?}, identity: {})",
            request.source.display(),
            request.destination.display(),
            self.options.strategy,
            self.policy.name()
        );

        let dest_exists = self.prepare_destination(&request.destination, &mut ctx).await?;

        let executor = CopyExecutor::new(
            self.fs.as_ref(),
            self.reporter.as_ref(),
            self.options.strategy,
        )
        .preserve_timestamps(self.options.preserve_timestamps)
        .dry_run(self.options.dry_run);

        self.sync_directory(
            &request.source,
            &request.destination,
            dest_exists,
            &executor,
            &mut ctx,
        )
        .await?;
        executor.finish(&mut ctx).await?;

        ctx.stats.duration = start_time.elapsed();
        self.reporter.completed(&ctx.stats);

        info!(
            "Mirror completed: {} copied, {} skipped, {} removed in {:?}",
            ctx.stats.files_copied,
            ctx.stats.files_skipped,
            ctx.stats.files_removed + ctx.stats.directories_removed,
            ctx.stats.duration
        );

        Ok(SyncReport {
            request_id: ctx.run_id(),
            tasks_planned: ctx.plan().len(),
            bytes_planned: ctx.plan().bytes_planned(),
            strategy: self.options.strategy,
            dry_run: self.options.dry_run,
            stats: ctx.stats,
        })
    }

    /// Create the destination root if requested, returning whether it can be listed
    async fn prepare_destination(&self, destination: &Path, ctx: &mut RunContext) -> Result<bool> {
        if !self.options.create_destination || self.fs.stat_file(destination).await.is_ok() {
            return Ok(true);
        }

        info!("Creating destination directory: {}", destination.display());
        ctx.stats.directories_created += 1;
        if self.options.dry_run {
            return Ok(false);
        }
        self.fs.create_directory(destination).await?;
        Ok(true)
    }

    /// Merge-walk one directory pair
    ///
    /// When `dest_exists` is false the destination is treated as empty; this
    /// only happens in dry-run mode for directories that would be created.
    fn sync_directory<'a>(
        &'a self,
        source: &'a Path,
        dest: &'a Path,
        dest_exists: bool,
        executor: &'a CopyExecutor<'a>,
        ctx: &'a mut RunContext,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + 'a>> {
        Box::pin(async move {
            let mut sources = self.fs.list_directory(source).await?;
            let mut dests = if dest_exists {
                self.fs.list_directory(dest).await?
            } else {
                Vec::new()
            };
            sort_entries(&mut sources);
            sort_entries(&mut dests);

            debug!(
                "Merging {} ({} entries) with {} ({} entries)",
                source.display(),
                sources.len(),
                dest.display(),
                dests.len()
            );

            for step in MergeWalk::new(&sources, &dests) {
                let action = match step {
                    MergeStep::SourceOnly(entry) => source_only_action(source, dest, entry),
                    MergeStep::DestinationOnly(entry) => destination_only_action(dest, entry),
                    MergeStep::Both(source_entry, dest_entry) => {
                        self.matched_action(source, dest, source_entry, dest_entry)
                            .await?
                    }
                };
                self.apply(action, executor, ctx).await?;
            }

            Ok(())
        })
    }

    /// Decide what to do with a name present on both sides
    async fn matched_action(
        &self,
        source_dir: &Path,
        dest_dir: &Path,
        source: &Entry,
        dest: &Entry,
    ) -> Result<SyncAction> {
        let source_path = source_dir.join(&source.name);
        let dest_path = dest_dir.join(&dest.name);

        Ok(match (source.is_dir(), dest.is_dir()) {
            (true, true) => SyncAction::RecurseExisting {
                source: source_path,
                dest: dest_path,
            },
            (true, false) => SyncAction::ReplaceFileWithDirectory {
                source: source_path,
                dest: dest_path,
            },
            (false, true) => SyncAction::ReplaceDirectoryWithFile {
                source: source_path,
                dest: dest_path,
                size: source.size,
                modified: source.modified,
            },
            (false, false) => {
                let pair = FilePair {
                    source_path: &source_path,
                    source,
                    dest_path: &dest_path,
                    dest,
                };
                if self.policy.identical(self.fs.as_ref(), pair).await? {
                    SyncAction::Skip { dest: dest_path }
                } else {
                    SyncAction::CopyFile {
                        source: source_path,
                        dest: dest_path,
                        size: source.size,
                        modified: source.modified,
                    }
                }
            }
        })
    }

    /// Carry out one decision
    async fn apply(
        &self,
        action: SyncAction,
        executor: &CopyExecutor<'_>,
        ctx: &mut RunContext,
    ) -> Result<()> {
        let dry_run = self.options.dry_run;
        if dry_run {
            debug!("DRY RUN: {} {}", action.label(), action.dest().display());
        } else {
            debug!("{}: {}", action.label(), action.dest().display());
        }

        match action {
            SyncAction::CopyFile {
                source,
                dest,
                size,
                modified,
            } => {
                executor
                    .submit(ctx, CopyTask::new(source, dest, size).with_modified(modified))
                    .await?;
            }
            SyncAction::CreateDirectoryAndRecurse { source, dest } => {
                if !dry_run {
                    self.fs.create_directory(&dest).await?;
                }
                ctx.stats.directories_created += 1;
                self.sync_directory(&source, &dest, !dry_run, executor, ctx)
                    .await?;
            }
            SyncAction::RecurseExisting { source, dest } => {
                self.sync_directory(&source, &dest, true, executor, ctx)
                    .await?;
            }
            SyncAction::ReplaceFileWithDirectory { source, dest } => {
                if !dry_run {
                    self.fs.remove_file(&dest).await?;
                    self.fs.create_directory(&dest).await?;
                }
                ctx.stats.entries_replaced += 1;
                self.sync_directory(&source, &dest, !dry_run, executor, ctx)
                    .await?;
            }
            SyncAction::ReplaceDirectoryWithFile {
                source,
                dest,
                size,
                modified,
            } => {
                if !dry_run {
                    self.fs.remove_directory_recursive(&dest).await?;
                }
                ctx.stats.entries_replaced += 1;
                executor
                    .submit(ctx, CopyTask::new(source, dest, size).with_modified(modified))
                    .await?;
            }
            SyncAction::RemoveFile { dest } => {
                if !dry_run {
                    self.fs.remove_file(&dest).await?;
                }
                ctx.stats.files_removed += 1;
            }
            SyncAction::RemoveDirectory { dest } => {
                if !dry_run {
                    self.fs.remove_directory_recursive(&dest).await?;
                }
                ctx.stats.directories_removed += 1;
            }
            SyncAction::Skip { .. } => {
                ctx.stats.files_skipped += 1;
            }
        }

        Ok(())
    }
}

/// Decision for a name that only the source has
fn source_only_action(source_dir: &Path, dest_dir: &Path, entry: &Entry) -> SyncAction {
    let source = source_dir.join(&entry.name);
    let dest = dest_dir.join(&entry.name);

    if entry.is_dir() {
        SyncAction::CreateDirectoryAndRecurse { source, dest }
    } else {
        SyncAction::CopyFile {
            source,
            dest,
            size: entry.size,
            modified: entry.modified,
        }
    }
}

/// Decision for a name that only the destination has
fn destination_only_action(dest_dir: &Path, entry: &Entry) -> SyncAction {
    let dest = dest_dir.join(&entry.name);

    if entry.is_dir() {
        SyncAction::RemoveDirectory { dest }
    } else {
        SyncAction::RemoveFile { dest }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::{ChannelReporter, ProgressEvent};
    use async_trait::async_trait;
    use dirmirror_types::ErrorKind;
    use std::collections::BTreeMap;
    use std::time::SystemTime;
    use tempfile::TempDir;

    /// Local filesystem that hands out listings in reverse order
    #[derive(Debug, Default)]
    struct ReversedListings(LocalFileSystem);

    #[async_trait]
    impl FileSystem for ReversedListings {
        async fn list_directory(&self, path: &Path) -> Result<Vec<Entry>> {
            let mut entries = self.0.list_directory(path).await?;
            entries.sort_by(|a, b| b.name.cmp(&a.name));
            Ok(entries)
        }

        async fn stat_file(&self, path: &Path) -> Result<Entry> {
            self.0.stat_file(path).await
        }

        async fn read_file_contents(&self, path: &Path) -> Result<Vec<u8>> {
            self.0.read_file_contents(path).await
        }

        async fn write_file_contents(&self, path: &Path, contents: &[u8]) -> Result<()> {
            self.0.write_file_contents(path, contents).await
        }

        async fn create_directory(&self, path: &Path) -> Result<()> {
            self.0.create_directory(path).await
        }

        async fn remove_file(&self, path: &Path) -> Result<()> {
            self.0.remove_file(path).await
        }

        async fn remove_directory_recursive(&self, path: &Path) -> Result<()> {
            self.0.remove_directory_recursive(path).await
        }

        async fn set_modified(&self, path: &Path, modified: SystemTime) -> Result<()> {
            self.0.set_modified(path, modified).await
        }
    }

    /// Relative path -> file contents (`None` for directories)
    fn snapshot(root: &Path) -> BTreeMap<PathBuf, Option<Vec<u8>>> {
        fn visit(root: &Path, dir: &Path, out: &mut BTreeMap<PathBuf, Option<Vec<u8>>>) {
            for entry in std::fs::read_dir(dir).unwrap() {
                let path = entry.unwrap().path();
                let relative = path.strip_prefix(root).unwrap().to_path_buf();
                if path.is_dir() {
                    out.insert(relative, None);
                    visit(root, &path, out);
                } else {
                    out.insert(relative, Some(std::fs::read(&path).unwrap()));
                }
            }
        }

        let mut out = BTreeMap::new();
        visit(root, root, &mut out);
        out
    }

    struct Trees {
        _temp_dir: TempDir,
        source: PathBuf,
        dest: PathBuf,
    }

    fn trees() -> Trees {
        let temp_dir = TempDir::new().unwrap();
        let source = temp_dir.path().join("src");
        let dest = temp_dir.path().join("dst");
        std::fs::create_dir(&source).unwrap();
        std::fs::create_dir(&dest).unwrap();
        Trees {
            _temp_dir: temp_dir,
            source,
            dest,
        }
    }

    fn populate_source(source: &Path) {
        std::fs::write(source.join("a.txt"), b"alpha").unwrap();
        std::fs::create_dir_all(source.join("docs/deep")).unwrap();
        std::fs::write(source.join("docs/readme.md"), b"# readme").unwrap();
        std::fs::write(source.join("docs/deep/note"), b"n").unwrap();
        std::fs::create_dir(source.join("empty")).unwrap();
    }

    #[tokio::test]
    async fn test_mirror_into_empty_destination() {
        let trees = trees();
        populate_source(&trees.source);

        let report = SyncEngine::new()
            .sync(SyncRequest::new(&trees.source, &trees.dest))
            .await
            .unwrap();

        assert_eq!(snapshot(&trees.source), snapshot(&trees.dest));
        assert_eq!(report.stats.files_copied, 3);
        assert_eq!(report.stats.bytes_copied, 14);
        assert_eq!(report.stats.directories_created, 3);
        assert_eq!(report.strategy, ExecutionStrategy::Immediate);
        assert_eq!(report.tasks_planned, 0);
    }

    #[tokio::test]
    async fn test_extra_destination_entries_are_removed() {
        let trees = trees();
        std::fs::write(trees.source.join("keep"), b"k").unwrap();
        std::fs::write(trees.dest.join("keep"), b"k").unwrap();
        std::fs::write(trees.dest.join("stale.txt"), b"old").unwrap();
        std::fs::create_dir_all(trees.dest.join("old/nested")).unwrap();
        std::fs::write(trees.dest.join("old/nested/file"), b"x").unwrap();

        let report = SyncEngine::new()
            .sync(SyncRequest::new(&trees.source, &trees.dest))
            .await
            .unwrap();

        assert_eq!(snapshot(&trees.source), snapshot(&trees.dest));
        assert_eq!(report.stats.files_removed, 1);
        assert_eq!(report.stats.directories_removed, 1);
        assert_eq!(report.stats.files_skipped, 1);
    }

    #[tokio::test]
    async fn test_same_size_different_content_is_skipped_by_default() {
        let trees = trees();
        std::fs::write(trees.source.join("f"), b"AAAA").unwrap();
        std::fs::write(trees.dest.join("f"), b"BBBB").unwrap();

        let report = SyncEngine::new()
            .sync(SyncRequest::new(&trees.source, &trees.dest))
            .await
            .unwrap();

        assert_eq!(std::fs::read(trees.dest.join("f")).unwrap(), b"BBBB");
        assert_eq!(report.stats.files_skipped, 1);
        assert!(report.stats.is_noop());
    }

    #[tokio::test]
    async fn test_content_hash_policy_copies_same_size_change() {
        let trees = trees();
        std::fs::write(trees.source.join("f"), b"AAAA").unwrap();
        std::fs::write(trees.dest.join("f"), b"BBBB").unwrap();

        let options = SyncOptions::default().with_identity(IdentityKind::ContentHash);
        let report = SyncEngine::with_options(options)
            .sync(SyncRequest::new(&trees.source, &trees.dest))
            .await
            .unwrap();

        assert_eq!(std::fs::read(trees.dest.join("f")).unwrap(), b"AAAA");
        assert_eq!(report.stats.files_copied, 1);
    }

    /// Never trusts the destination
    #[derive(Debug)]
    struct AlwaysDifferent;

    #[async_trait]
    impl IdentityPolicy for AlwaysDifferent {
        fn name(&self) -> &'static str {
            "always-different"
        }

        async fn identical(&self, _fs: &dyn FileSystem, _pair: FilePair<'_>) -> Result<bool> {
            Ok(false)
        }
    }

    #[tokio::test]
    async fn test_custom_policy_replaces_configured_one() {
        let trees = trees();
        std::fs::write(trees.source.join("f"), b"AAAA").unwrap();
        std::fs::write(trees.dest.join("f"), b"BBBB").unwrap();
        std::fs::write(trees.source.join("same"), b"same").unwrap();
        std::fs::write(trees.dest.join("same"), b"same").unwrap();

        let engine = SyncEngine::new().with_policy(Box::new(AlwaysDifferent));
        assert!(format!("{:?}", engine).contains("always-different"));

        let report = engine
            .sync(SyncRequest::new(&trees.source, &trees.dest))
            .await
            .unwrap();

        assert_eq!(std::fs::read(trees.dest.join("f")).unwrap(), b"AAAA");
        assert_eq!(report.stats.files_copied, 2);
        assert_eq!(report.stats.files_skipped, 0);
    }

    #[tokio::test]
    async fn test_size_change_is_copied() {
        let trees = trees();
        std::fs::write(trees.source.join("f"), b"new contents").unwrap();
        std::fs::write(trees.dest.join("f"), b"old").unwrap();

        SyncEngine::new()
            .sync(SyncRequest::new(&trees.source, &trees.dest))
            .await
            .unwrap();

        assert_eq!(std::fs::read(trees.dest.join("f")).unwrap(), b"new contents");
    }

    #[tokio::test]
    async fn test_type_changes_are_replaced() {
        let trees = trees();
        std::fs::create_dir(trees.source.join("x")).unwrap();
        std::fs::write(trees.source.join("x/inner"), b"inner").unwrap();
        std::fs::write(trees.source.join("y"), b"file now").unwrap();

        std::fs::write(trees.dest.join("x"), b"was a file").unwrap();
        std::fs::create_dir_all(trees.dest.join("y/sub")).unwrap();
        std::fs::write(trees.dest.join("y/sub/z"), b"z").unwrap();

        let report = SyncEngine::new()
            .sync(SyncRequest::new(&trees.source, &trees.dest))
            .await
            .unwrap();

        assert_eq!(snapshot(&trees.source), snapshot(&trees.dest));
        assert_eq!(report.stats.entries_replaced, 2);
    }

    #[tokio::test]
    async fn test_second_run_is_noop() {
        let trees = trees();
        populate_source(&trees.source);
        let engine = SyncEngine::new();

        engine
            .sync(SyncRequest::new(&trees.source, &trees.dest))
            .await
            .unwrap();
        let report = engine
            .sync(SyncRequest::new(&trees.source, &trees.dest))
            .await
            .unwrap();

        assert!(report.stats.is_noop());
        assert_eq!(report.stats.files_skipped, 3);
    }

    #[tokio::test]
    async fn test_listing_order_does_not_matter() {
        let sorted = trees();
        let reversed = trees();
        for trees in [&sorted, &reversed] {
            populate_source(&trees.source);
            std::fs::write(trees.dest.join("b-stale"), b"s").unwrap();
            std::fs::write(trees.dest.join("a.txt"), b"xx").unwrap();
        }

        let sorted_report = SyncEngine::new()
            .sync(SyncRequest::new(&sorted.source, &sorted.dest))
            .await
            .unwrap();
        let reversed_report = SyncEngine::new()
            .with_file_system(Arc::new(ReversedListings::default()))
            .sync(SyncRequest::new(&reversed.source, &reversed.dest))
            .await
            .unwrap();

        assert_eq!(snapshot(&sorted.dest), snapshot(&reversed.dest));
        assert_eq!(sorted_report.stats.files_copied, reversed_report.stats.files_copied);
        assert_eq!(sorted_report.stats.files_removed, reversed_report.stats.files_removed);
    }

    #[tokio::test]
    async fn test_planned_strategy_reports_progress() {
        let trees = trees();
        populate_source(&trees.source);
        let (reporter, mut events) = ChannelReporter::new();

        let report = SyncEngine::with_options(SyncOptions::planned())
            .with_reporter(Arc::new(reporter))
            .sync(SyncRequest::new(&trees.source, &trees.dest))
            .await
            .unwrap();

        assert_eq!(snapshot(&trees.source), snapshot(&trees.dest));
        assert_eq!(report.tasks_planned, 3);
        assert_eq!(report.bytes_planned, 14);

        assert_eq!(
            events.recv().await.unwrap(),
            ProgressEvent::PlanReady {
                task_count: 3,
                bytes_planned: 14
            }
        );

        let mut started = 0;
        let mut last_copied = 0;
        while let Some(event) = events.recv().await {
            match event {
                ProgressEvent::CopyStarted { bytes_copied, .. } => {
                    assert!(bytes_copied >= last_copied);
                    started += 1;
                }
                ProgressEvent::CopyFinished { bytes_copied, .. } => last_copied = bytes_copied,
                ProgressEvent::Completed(stats) => {
                    assert_eq!(stats.files_copied, 3);
                    break;
                }
                ProgressEvent::PlanReady { .. } => panic!("plan reported twice"),
            }
        }
        assert_eq!(started, 3);
        assert_eq!(last_copied, 14);
    }

    #[tokio::test]
    async fn test_dry_run_leaves_destination_untouched() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("dirmirror_sync=debug")
            .with_test_writer()
            .try_init();
        let trees = trees();
        populate_source(&trees.source);
        std::fs::write(trees.dest.join("stale"), b"s").unwrap();
        let before = snapshot(&trees.dest);

        let options = SyncOptions::default().with_dry_run(true);
        let report = SyncEngine::with_options(options)
            .sync(SyncRequest::new(&trees.source, &trees.dest))
            .await
            .unwrap();

        assert_eq!(snapshot(&trees.dest), before);
        assert!(report.dry_run);
        assert_eq!(report.stats.files_copied, 3);
        assert_eq!(report.stats.directories_created, 3);
        assert_eq!(report.stats.files_removed, 1);
    }

    #[tokio::test]
    async fn test_missing_source_is_unreadable() {
        let trees = trees();
        let missing = trees.source.join("nope");

        let error = SyncEngine::new()
            .sync(SyncRequest::new(&missing, &trees.dest))
            .await
            .unwrap_err();

        assert_eq!(error.kind(), ErrorKind::DirectoryUnreadable);
        assert_eq!(error.path(), Some(missing.as_path()));
    }

    #[tokio::test]
    async fn test_missing_destination_requires_opt_in() {
        let trees = trees();
        std::fs::write(trees.source.join("f"), b"f").unwrap();
        let dest = trees.dest.join("fresh");

        let error = SyncEngine::new()
            .sync(SyncRequest::new(&trees.source, &dest))
            .await
            .unwrap_err();
        assert_eq!(error.kind(), ErrorKind::DirectoryUnreadable);

        let options = SyncOptions {
            create_destination: true,
            ..SyncOptions::default()
        };
        SyncEngine::with_options(options)
            .sync(SyncRequest::new(&trees.source, &dest))
            .await
            .unwrap();
        assert_eq!(std::fs::read(dest.join("f")).unwrap(), b"f");
    }

    #[test]
    fn test_one_sided_actions() {
        let file = Entry::file("f", 7);
        let dir = Entry::directory("d");
        let source = Path::new("s");
        let dest = Path::new("t");

        assert_eq!(
            source_only_action(source, dest, &file),
            SyncAction::CopyFile {
                source: PathBuf::from("s/f"),
                dest: PathBuf::from("t/f"),
                size: 7,
                modified: None,
            }
        );
        assert_eq!(
            source_only_action(source, dest, &dir),
            SyncAction::CreateDirectoryAndRecurse {
                source: PathBuf::from("s/d"),
                dest: PathBuf::from("t/d"),
            }
        );
        assert_eq!(
            destination_only_action(dest, &dir),
            SyncAction::RemoveDirectory {
                dest: PathBuf::from("t/d")
            }
        );
    }
}
