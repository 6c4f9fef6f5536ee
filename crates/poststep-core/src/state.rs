// ── State file ──
//
// The runner reads `name=value` lines from `$GITHUB_STATE` after the main
// step and exports each one to the post step as `STATE_name`.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::CoreError;
use crate::key::StateKey;

/// Line terminator used for state file entries.
#[cfg(windows)]
pub const LINE_ENDING: &str = "\r\n";
/// Line terminator used for state file entries.
#[cfg(not(windows))]
pub const LINE_ENDING: &str = "\n";

/// Append-only handle on the runner's state file.
#[derive(Debug, Clone)]
pub struct StateFile {
    path: PathBuf,
}

impl StateFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append `<KEY>=true` to the file, creating it if needed.
    ///
    /// The parent directory must already exist; the runner creates it.
    pub fn record(&self, key: &StateKey) -> Result<(), CoreError> {
        let line = key.state_line(LINE_ENDING);
        let wrap = |source| CoreError::StateFile {
            path: self.path.clone(),
            source,
        };

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(wrap)?;
        file.write_all(line.as_bytes()).map_err(wrap)?;

        tracing::debug!(path = %self.path.display(), key = %key, "recorded state flag");
        Ok(())
    }
}
