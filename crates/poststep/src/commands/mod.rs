//! Command handlers.

pub mod phase;
pub mod run;

use poststep_core::{StateKey, StepInputs};

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// Build `StepInputs` from global flags and their env fallbacks.
///
/// Unset commands become empty strings, matching how the runner passes an
/// input that was declared but not given.
pub fn resolve_inputs(global: &GlobalOpts) -> Result<StepInputs, CliError> {
    let raw_key = global
        .key
        .as_deref()
        .ok_or_else(|| CliError::missing("INPUT_KEY"))?;
    let key = StateKey::parse(raw_key)?;

    Ok(StepInputs {
        key,
        main: global.main.clone().unwrap_or_default(),
        post: global.post.clone().unwrap_or_default(),
        state_file: global.state_file.clone(),
    })
}
