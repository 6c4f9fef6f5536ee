//! Clap derive structures for the `poststep` CLI.
//!
//! Step inputs are read from the same variables the Actions runner exports
//! for an action's inputs, so the binary can be the action's entry point
//! with no arguments at all.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// poststep -- run a command in a GitHub Actions main step and another in its post step
#[derive(Debug, Parser)]
#[command(
    name = "poststep",
    version,
    about = "Run a command as the main and the post step of a GitHub Actions job",
    long_about = "Run a command as the main and the post step of a GitHub Actions job.\n\n\
        The first invocation appends <KEY>=true to $GITHUB_STATE and runs the main\n\
        command. The runner then exports STATE_<KEY> to the post step, and the second\n\
        invocation runs the post command instead. The exit code is the command's.",
    propagate_version = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    /// Defaults to `run` when omitted
    #[command(subcommand)]
    pub command: Option<Command>,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// State key (case-insensitive)
    #[arg(long, env = "INPUT_KEY", global = true)]
    pub key: Option<String>,

    /// Command to run in the main step
    #[arg(long, env = "INPUT_MAIN", global = true, value_name = "COMMAND")]
    pub main: Option<String>,

    /// Command to run in the post step
    #[arg(long, env = "INPUT_POST", global = true, value_name = "COMMAND")]
    pub post: Option<String>,

    /// File the state flag is appended to
    #[arg(long, env = "GITHUB_STATE", global = true, value_name = "PATH")]
    pub state_file: Option<PathBuf>,

    /// Settings file (TOML)
    #[arg(long, env = "POSTSTEP_CONFIG", global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Phase name only
    Plain,
    /// Full plan as pretty-printed JSON
    Json,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Commands ─────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Detect the phase and run its command (default)
    Run,

    /// Show which phase would run, without running anything
    Phase(PhaseArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),

    /// Print the man page (roff)
    Man,
}

#[derive(Debug, Args)]
pub struct PhaseArgs {
    /// Output format
    #[arg(long, short = 'o', default_value = "plain")]
    pub output: OutputFormat,
}

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell
    pub shell: clap_complete::Shell,
}
