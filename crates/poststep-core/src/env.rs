//! Environment lookup seam.
//!
//! Phase detection reads a variable whose name is only known at runtime
//! (`STATE_<KEY>`), so it goes through [`EnvSource`] rather than straight
//! to `std::env`.

use std::collections::HashMap;

/// Read-only access to environment variables.
pub trait EnvSource: Send + Sync {
    /// Value of `name`, or `None` when the variable is not set.
    fn var(&self, name: &str) -> Option<String>;
}

/// The real process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, name: &str) -> Option<String> {
        // Set-but-not-Unicode still counts as set.
        std::env::var_os(name).map(|v| v.to_string_lossy().into_owned())
    }
}

impl EnvSource for HashMap<String, String> {
    fn var(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}
