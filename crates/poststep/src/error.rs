//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` into user-facing errors with help text.
//! These only cover failures of the helper itself; a command that exits
//! non-zero is reported through its exit code, not through this type.

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

use poststep_config::ConfigError;
use poststep_core::CoreError;

/// Exit codes for failures of the helper itself.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Inputs ───────────────────────────────────────────────────────

    #[error("Required input {name} is not set")]
    #[diagnostic(
        code(poststep::missing_input),
        help(
            "Set the {name} environment variable or pass --{flag}.\n\
             Inside an action, declare the input in action.yml."
        )
    )]
    MissingInput { name: String, flag: String },

    #[error("Invalid state key '{key}': {reason}")]
    #[diagnostic(
        code(poststep::invalid_key),
        help("The key (INPUT_KEY / --key) names the state flag, e.g. 'docker_login'.")
    )]
    InvalidKey { key: String, reason: String },

    // ── Execution ────────────────────────────────────────────────────

    #[error("Cannot write state file {}", path.display())]
    #[diagnostic(
        code(poststep::state_file),
        help("GITHUB_STATE (--state-file) must name a writable file in an existing directory.")
    )]
    StateFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to start shell '{program}'")]
    #[diagnostic(
        code(poststep::spawn),
        help(
            "Check that '{program}' is installed and on PATH,\n\
             or set shell.program in the config file."
        )
    )]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    // ── Configuration ────────────────────────────────────────────────

    #[error("Configuration file not found: {}", path.display())]
    #[diagnostic(
        code(poststep::no_config),
        help("Check --config / POSTSTEP_CONFIG, or unset it to use the defaults.")
    )]
    NoConfig { path: PathBuf },

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(poststep::validation))]
    Validation { field: String, reason: String },

    #[error(transparent)]
    #[diagnostic(code(poststep::config))]
    Config(Box<figment::Error>),

    // ── IO / Serialization ───────────────────────────────────────────

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize output: {0}")]
    #[diagnostic(code(poststep::json))]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::MissingInput { .. }
            | Self::InvalidKey { .. }
            | Self::NoConfig { .. }
            | Self::Validation { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }

    pub fn missing(name: &str) -> Self {
        Self::MissingInput {
            name: name.into(),
            flag: flag_for(name).into(),
        }
    }
}

/// CLI flag that overrides a runner variable.
fn flag_for(name: &str) -> &'static str {
    match name {
        "INPUT_KEY" => "key",
        "INPUT_MAIN" => "main",
        "INPUT_POST" => "post",
        "GITHUB_STATE" => "state-file",
        _ => "help",
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::InvalidKey { key, reason } => CliError::InvalidKey { key, reason },
            CoreError::MissingInput { name } => CliError::missing(&name),
            CoreError::StateFile { path, source } => CliError::StateFile { path, source },
            CoreError::Spawn { program, source } => CliError::Spawn { program, source },
        }
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::NotFound { path } => CliError::NoConfig { path },
            ConfigError::Validation { field, reason } => CliError::Validation { field, reason },
            ConfigError::Figment(inner) => CliError::Config(inner),
        }
    }
}
