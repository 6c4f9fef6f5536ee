// ── Step phase ──

use serde::Serialize;
use strum::{Display, EnumString};

use crate::env::EnvSource;
use crate::key::StateKey;

/// Which of the two runner invocations is executing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Phase {
    /// First invocation: record the flag, run the main command.
    Main,
    /// Second invocation: the runner exported `STATE_<KEY>`.
    Post,
}

impl Phase {
    /// `Post` iff `STATE_<KEY>` is set, whatever its value.
    pub fn detect(key: &StateKey, env: &impl EnvSource) -> Self {
        if env.var(&key.state_var()).is_some() {
            Self::Post
        } else {
            Self::Main
        }
    }
}
