// ── State key ──
//
// The input name is matched case-insensitively; everything downstream
// (state file line, `STATE_*` lookup) uses the upper-cased form.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::CoreError;

/// Prefix the Actions runner puts in front of saved state names.
pub const STATE_VAR_PREFIX: &str = "STATE_";

/// A validated, upper-cased state key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct StateKey(String);

impl StateKey {
    /// Normalise and validate a raw key.
    ///
    /// Surrounding whitespace is dropped and the rest is upper-cased. Keys
    /// that are empty or contain `=` or a line break are rejected, since
    /// the state file is line-oriented `name=value`.
    pub fn parse(raw: &str) -> Result<Self, CoreError> {
        // Runner inputs arrive untrimmed; surrounding whitespace is never part of the key.
        let trimmed = raw.trim();
        let reject = |reason: &str| CoreError::InvalidKey {
            key: raw.to_owned(),
            reason: reason.to_owned(),
        };

        if trimmed.is_empty() {
            return Err(reject("key is empty"));
        }
        if trimmed.contains('=') {
            return Err(reject("key must not contain '='"));
        }
        if trimmed.contains(['\r', '\n']) {
            return Err(reject("key must not contain line breaks"));
        }

        Ok(Self(trimmed.to_uppercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Name of the variable the runner exports in the post phase.
    pub fn state_var(&self) -> String {
        format!("{STATE_VAR_PREFIX}{}", self.0)
    }

    /// The line recorded in the state file during the main phase.
    pub fn state_line(&self, eol: &str) -> String {
        format!("{}=true{eol}", self.0)
    }
}

impl fmt::Display for StateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for StateKey {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
