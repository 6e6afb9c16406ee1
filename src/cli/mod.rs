//! Command-line interface for ideadeps.
//!
//! # Available Commands
//!
//! - `resolve` - Print every dependency of the module with its scope
//! - `unresolved` - Print repository artifacts that could not be resolved
//! - `buckets` - Print the effective plus/minus buckets of each scope
//!
//! # Global Options
//!
//! - `--verbose` / `--quiet` control logging (mutually exclusive)
//! - `--config <path>` points at the project descriptor, `ideadeps.toml` by default
//! - `--offline` skips repository artifacts, like `IDEADEPS_OFFLINE=1`
//!
//! ```bash
//! ideadeps resolve
//! ideadeps resolve --scope test --format json
//! ideadeps --offline unresolved
//! ideadeps --config ../app/ideadeps.toml buckets
//! ```

mod buckets;
mod resolve;
mod unresolved;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use crate::config::{DESCRIPTOR_FILE, LoadedProject};

pub use buckets::BucketsCommand;
pub use resolve::ResolveCommand;
pub use unresolved::UnresolvedCommand;

/// Output format shared by the reporting commands.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text grouped by scope
    #[default]
    Text,
    /// JSON for tooling
    Json,
}

/// Settings derived from the global flags.
///
/// Kept separate from [`Cli`] so tests can drive commands without parsing arguments.
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// Log filter directive; `None` defers to `RUST_LOG`
    pub log_level: Option<String>,
    /// Project descriptor to load
    pub config_path: PathBuf,
    /// Force offline mode regardless of the descriptor
    pub offline: bool,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            log_level: None,
            config_path: PathBuf::from(DESCRIPTOR_FILE),
            offline: false,
        }
    }
}

impl CliConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the project this configuration points at.
    pub fn load_project(&self) -> Result<LoadedProject> {
        LoadedProject::load(&self.config_path, self.offline)
    }

    /// Install the global `tracing` subscriber.
    ///
    /// Output goes to stderr so command output on stdout stays machine-readable.
    pub fn init_logging(&self) {
        let filter = match &self.log_level {
            Some(level) => EnvFilter::new(level),
            None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    }
}

/// Resolve IDE dependency scopes from a bucket-based project descriptor.
#[derive(Parser, Debug)]
#[command(
    name = "ideadeps",
    about = "Resolve IDE dependency scopes for a module",
    version,
    long_about = "ideadeps reads a module's dependency buckets and decides which IDE scope \
                  (PROVIDED, COMPILE, TEST, RUNTIME) every dependency belongs to."
)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Show debug output, including per-bucket extraction and conflict decisions.
    ///
    /// Mutually exclusive with `--quiet`.
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log errors.
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Path to the project descriptor.
    #[arg(short, long, global = true, default_value = DESCRIPTOR_FILE)]
    config: PathBuf,

    /// Skip repository artifacts entirely.
    #[arg(long, global = true)]
    offline: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print every dependency with the scope it is reported under.
    Resolve(ResolveCommand),

    /// Print repository artifacts that failed to resolve, sorted by name.
    Unresolved(UnresolvedCommand),

    /// Print the effective plus/minus buckets of each scope.
    Buckets(BucketsCommand),
}

impl Cli {
    /// Execute the parsed command line.
    pub fn execute(self) -> Result<()> {
        let config = self.build_config();
        config.init_logging();
        self.execute_with_config(&config)
    }

    /// Translate global flags into a [`CliConfig`].
    #[must_use]
    pub fn build_config(&self) -> CliConfig {
        let log_level = if self.verbose {
            Some("debug".to_string())
        } else if self.quiet {
            Some("error".to_string())
        } else {
            None
        };

        CliConfig {
            log_level,
            config_path: self.config.clone(),
            offline: self.offline,
        }
    }

    /// Execute with an explicit configuration.
    pub fn execute_with_config(self, config: &CliConfig) -> Result<()> {
        match self.command {
            Commands::Resolve(cmd) => cmd.execute(config),
            Commands::Unresolved(cmd) => cmd.execute(config),
            Commands::Buckets(cmd) => cmd.execute(config),
        }
    }
}
