//! Settings for the poststep binary.
//!
//! Defaults, an optional TOML file, and `POSTSTEP_*` environment variables
//! are merged with figment, later layers winning. Step inputs themselves
//! (`INPUT_*`, `GITHUB_STATE`) are not settings; the CLI reads those.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use thiserror::Error;

use poststep_core::Shell;

/// Prefix for settings read from the environment.
pub const ENV_PREFIX: &str = "POSTSTEP_";

/// Variable naming an explicit settings file.
pub const CONFIG_ENV: &str = "POSTSTEP_CONFIG";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── Settings structs ────────────────────────────────────────────────

/// Top-level settings.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Settings {
    /// Shell override. `None` uses the platform default.
    #[serde(default)]
    pub shell: Option<ShellSettings>,

    #[serde(default)]
    pub log: LogSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ShellSettings {
    /// Program to execute, e.g. "bash".
    pub program: String,

    /// Arguments placed before the command string, e.g. ["-eo", "pipefail", "-c"].
    #[serde(default)]
    pub args: Vec<String>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LogSettings {
    #[serde(default)]
    pub format: LogFormat,

    /// Fallback filter directive when neither RUST_LOG nor -v is given.
    pub level: Option<String>,
}

#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl Settings {
    /// The core `Shell` these settings describe.
    pub fn shell(&self) -> Result<Shell, ConfigError> {
        let Some(ref custom) = self.shell else {
            return Ok(Shell::default());
        };

        if custom.program.trim().is_empty() {
            return Err(ConfigError::Validation {
                field: "shell.program".into(),
                reason: "must not be empty".into(),
            });
        }

        Ok(Shell::new(custom.program.clone(), custom.args.clone()))
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Platform config file path (`~/.config/poststep/config.toml` on Linux).
pub fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("com", "poststep", "poststep")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}

// ── Loading ─────────────────────────────────────────────────────────

/// Build the figment for an optional explicit file.
///
/// An explicit path must exist. Without one, the platform path is used
/// only if it exists.
pub fn figment(explicit: Option<&Path>) -> Result<Figment, ConfigError> {
    let mut figment = Figment::new().merge(Serialized::defaults(Settings::default()));

    match explicit {
        Some(path) => {
            if !path.is_file() {
                return Err(ConfigError::NotFound {
                    path: path.to_path_buf(),
                });
            }
            tracing::debug!(path = %path.display(), "loading config file");
            figment = figment.merge(Toml::file(path));
        }
        None => {
            if let Some(path) = default_config_path().filter(|p| p.is_file()) {
                tracing::debug!(path = %path.display(), "loading config file");
                figment = figment.merge(Toml::file(path));
            }
        }
    }

    Ok(figment.merge(
        Env::prefixed(ENV_PREFIX)
            .ignore(&["CONFIG"])
            .split("__"),
    ))
}

/// Load settings from all layers.
pub fn load_settings(explicit: Option<&Path>) -> Result<Settings, ConfigError> {
    let settings: Settings = figment(explicit)?.extract()?;
    Ok(settings)
}
