use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "path-labeler")]
#[command(about = "Label change sets from glob rules over their changed files")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging and show every label
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Settings file (default: ./labeler.toml)
    #[arg(long, global = true)]
    pub settings: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Evaluate label rules against the changed files
    Check {
        #[command(flatten)]
        source: SourceArgs,

        /// Output format
        #[arg(short, long)]
        format: Option<OutputFormat>,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Evaluate label rules and update the labels of a review unit
    Apply {
        #[command(flatten)]
        source: SourceArgs,

        /// Review unit to label (default: the git range or file list name)
        #[arg(long)]
        unit: Option<String>,

        /// Remove configured labels that no longer match
        #[arg(long)]
        sync_labels: bool,

        /// Show changes without applying them
        #[arg(long)]
        dry_run: bool,

        /// Label store file (overrides settings)
        #[arg(long)]
        store: Option<PathBuf>,

        /// Output format
        #[arg(short, long)]
        format: Option<OutputFormat>,
    },
    /// Write a starter label rule document
    Init {
        /// Rule preset
        #[arg(default_value = "minimal")]
        preset: InitPreset,

        /// Where to write the rules (default: configuration_path from settings)
        #[arg(long)]
        path: Option<PathBuf>,
    },
    /// Show or validate configuration
    Config {
        /// Show current settings
        #[arg(long)]
        show: bool,

        /// Validate settings, rule document and every glob pattern
        #[arg(long)]
        validate: bool,

        /// Label rule document (overrides settings)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

/// Where changed files come from and which rules apply to them
#[derive(Args)]
pub struct SourceArgs {
    /// File listing changed paths, one per line ('-' reads stdin)
    #[arg(long, conflicts_with = "git")]
    pub files: Option<PathBuf>,

    /// Git revision range to diff, e.g. main...HEAD
    #[arg(long)]
    pub git: Option<String>,

    /// Repository used with --git
    #[arg(long, default_value = ".")]
    pub repo: PathBuf,

    /// Label rule document (overrides settings)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Do not let wildcards match hidden path segments
    #[arg(long)]
    pub no_dot: bool,
}

#[derive(Clone, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Clone, ValueEnum)]
pub enum InitPreset {
    Minimal,
    Monorepo,
}
