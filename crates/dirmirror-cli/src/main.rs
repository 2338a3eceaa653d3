//! dirmirror - one-way directory mirroring tool
//!
//! Makes a destination directory tree identical to a source tree: missing
//! files and directories are copied, changed files are replaced and anything
//! that only exists in the destination is deleted.

mod display;
mod progress;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use dirmirror_config::{Config, ConfigLoader};
use dirmirror_sync::{SyncEngine, SyncOptions, SyncReport, SyncRequest};
use dirmirror_types::{ExecutionStrategy, IdentityKind};
use display::{display_header, display_success, display_summary, USAGE};
use progress::ConsoleReporter;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

/// dirmirror - one-way directory mirroring tool
#[derive(Parser, Debug)]
#[command(
    name = "dirmirror",
    version = env!("CARGO_PKG_VERSION"),
    about = "Mirror a source directory tree into a destination directory",
    long_about = "dirmirror makes <dest> an exact copy of <source>.\n\
                  Files missing or different in the destination are copied, and files\n\
                  and directories that exist only in the destination are deleted."
)]
struct Cli {
    /// Source directory
    source: Option<PathBuf>,

    /// Destination directory
    destination: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Quiet mode - minimal output
    #[arg(short, long)]
    quiet: bool,

    /// Verbose mode - detailed output
    #[arg(short, long)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Plan every copy first, then copy with progress reporting
    #[arg(long)]
    planned: bool,

    /// How same-named files are compared
    #[arg(long, value_enum)]
    identity: Option<IdentityArg>,

    /// Copy source modification times onto copied files
    #[arg(long)]
    preserve_timestamps: bool,

    /// Dry run - show what would be done
    #[arg(long)]
    dry_run: bool,

    /// Create the destination directory if it does not exist
    #[arg(long)]
    create_destination: bool,

    /// Write a default configuration file (YAML, TOML or JSON by extension) and exit
    #[arg(long, value_name = "PATH")]
    write_default_config: Option<PathBuf>,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum IdentityArg {
    /// Equal size means identical
    Size,
    /// Equal size and modification time
    SizeAndMtime,
    /// Equal size and BLAKE3 digest
    ContentHash,
}

impl From<IdentityArg> for IdentityKind {
    fn from(arg: IdentityArg) -> Self {
        match arg {
            IdentityArg::Size => IdentityKind::Size,
            IdentityArg::SizeAndMtime => IdentityKind::SizeAndMtime,
            IdentityArg::ContentHash => IdentityKind::ContentHash,
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.write_default_config {
        let written = ConfigLoader::generate_default_config(path)
            .with_context(|| format!("Failed to write configuration to {}", path.display()))?;
        display_success(&format!("Wrote default configuration to {}", written.display()));
        return Ok(());
    }

    let (Some(source), Some(destination)) = (&cli.source, &cli.destination) else {
        println!("{}", USAGE);
        return Ok(());
    };

    let config = ConfigLoader::load(cli.config.as_deref()).context("Failed to load configuration")?;
    init_logging(&cli, &config)?;

    info!("dirmirror v{} starting", env!("CARGO_PKG_VERSION"));

    let options = resolve_options(&cli, &config);
    let report = mirror_command(source, destination, options, cli.quiet).await?;

    if !cli.quiet {
        display_summary(&report);
    }

    Ok(())
}

fn init_logging(cli: &Cli, config: &Config) -> Result<()> {
    use tracing_subscriber::{fmt, EnvFilter};

    let level = if cli.debug {
        "debug"
    } else if cli.verbose {
        "info"
    } else if cli.quiet {
        "error"
    } else {
        config.logging.level.as_str()
    };

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .context("Invalid log filter")?;

    let colored = use_colors(config.logging.colored_output, console::colors_enabled());
    console::set_colors_enabled(colored);

    fmt()
        .with_env_filter(filter)
        .with_ansi(colored)
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .init();

    Ok(())
}

/// Colors need both the config switch and a terminal that console would color
fn use_colors(configured: bool, terminal_colors: bool) -> bool {
    configured && terminal_colors
}

/// Command-line flags win over the configuration file
fn resolve_options(cli: &Cli, config: &Config) -> SyncOptions {
    SyncOptions {
        strategy: if cli.planned {
            ExecutionStrategy::Planned
        } else {
            config.sync.strategy
        },
        identity: cli.identity.map_or(config.sync.identity, Into::into),
        preserve_timestamps: cli.preserve_timestamps || config.sync.preserve_timestamps,
        dry_run: cli.dry_run || config.sync.dry_run,
        create_destination: cli.create_destination || config.sync.create_destination,
    }
}

async fn mirror_command(
    source: &Path,
    destination: &Path,
    options: SyncOptions,
    quiet: bool,
) -> Result<SyncReport> {
    info!("Source: {}", source.display());
    info!("Destination: {}", destination.display());
    info!("Options: {:?}", options);

    if !quiet {
        display_header(source, destination, options.dry_run);
    }

    let engine =
        SyncEngine::with_options(options).with_reporter(Arc::new(ConsoleReporter::new(quiet)));

    engine
        .sync(SyncRequest::new(source, destination))
        .await
        .with_context(|| {
            format!(
                "Failed to mirror {} into {}",
                source.display(),
                destination.display()
            )
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_positionals_are_optional() {
        let cli = Cli::try_parse_from(["dirmirror"]).unwrap();
        assert!(cli.source.is_none());
        assert!(cli.destination.is_none());

        let cli = Cli::try_parse_from(["dirmirror", "only-source"]).unwrap();
        assert_eq!(cli.source, Some(PathBuf::from("only-source")));
        assert!(cli.destination.is_none());
    }

    #[test]
    fn test_flags_override_config() {
        let cli = Cli::try_parse_from([
            "dirmirror",
            "src",
            "dst",
            "--planned",
            "--identity",
            "content-hash",
            "--dry-run",
        ])
        .unwrap();

        let options = resolve_options(&cli, &Config::default());
        assert_eq!(options.strategy, ExecutionStrategy::Planned);
        assert_eq!(options.identity, IdentityKind::ContentHash);
        assert!(options.dry_run);
        assert!(!options.create_destination);
    }

    #[test]
    fn test_config_used_without_flags() {
        let cli = Cli::try_parse_from(["dirmirror", "src", "dst"]).unwrap();
        let mut config = Config::default();
        config.sync.strategy = ExecutionStrategy::Planned;
        config.sync.identity = IdentityKind::SizeAndMtime;
        config.sync.create_destination = true;

        let options = resolve_options(&cli, &config);
        assert_eq!(options.strategy, ExecutionStrategy::Planned);
        assert_eq!(options.identity, IdentityKind::SizeAndMtime);
        assert!(options.create_destination);
    }

    #[test]
    fn test_colors_require_terminal() {
        assert!(use_colors(true, true));
        assert!(!use_colors(true, false));
        assert!(!use_colors(false, true));
    }

    #[test]
    fn test_unknown_identity_rejected() {
        assert!(Cli::try_parse_from(["dirmirror", "a", "b", "--identity", "crc"]).is_err());
    }

    #[tokio::test]
    async fn test_mirror_command() {
        let temp_dir = TempDir::new().unwrap();
        let source = temp_dir.path().join("src");
        let destination = temp_dir.path().join("dst");
        std::fs::create_dir_all(source.join("nested")).unwrap();
        std::fs::write(source.join("nested/file.txt"), b"payload").unwrap();

        let options = SyncOptions {
            create_destination: true,
            ..SyncOptions::planned()
        };
        let report = mirror_command(&source, &destination, options, true)
            .await
            .unwrap();

        assert_eq!(report.stats.files_copied, 1);
        assert_eq!(
            std::fs::read(destination.join("nested/file.txt")).unwrap(),
            b"payload"
        );
    }

    #[tokio::test]
    async fn test_mirror_command_reports_failing_path() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("missing");

        let error = mirror_command(&missing, temp_dir.path(), SyncOptions::default(), true)
            .await
            .unwrap_err();

        let chain = format!("{:#}", error);
        assert!(chain.contains("Failed to mirror"));
        assert!(chain.contains("missing"));
    }
}
