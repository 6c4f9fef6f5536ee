// ── Core error types ──
//
// Failures the helper itself can hit. A child command that exits non-zero
// is not an error here: it is an `Outcome` whose code the binary forwards.

use std::path::PathBuf;

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Input errors ─────────────────────────────────────────────────
    #[error("Invalid state key '{key}': {reason}")]
    InvalidKey { key: String, reason: String },

    #[error("Required input {name} is not set")]
    MissingInput { name: String },

    // ── IO errors ────────────────────────────────────────────────────
    #[error("Cannot write state file {}", path.display())]
    StateFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to spawn '{program}'")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
}
