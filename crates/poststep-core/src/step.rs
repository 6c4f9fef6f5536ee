// ── Step orchestration ──
//
// Main phase: record the flag, then run `main`. Post phase: run `post`
// and leave the state file alone. The flag is written before the main
// command starts so the post step runs even if `main` fails.

use std::path::PathBuf;

use serde::Serialize;

use crate::env::EnvSource;
use crate::error::CoreError;
use crate::key::StateKey;
use crate::phase::Phase;
use crate::shell::{Outcome, Shell};
use crate::state::StateFile;

/// Name of the runner variable holding the state file path.
pub const STATE_FILE_VAR: &str = "GITHUB_STATE";

/// Everything a step invocation needs, already resolved from flags/env.
#[derive(Debug, Clone)]
pub struct StepInputs {
    pub key: StateKey,
    pub main: String,
    pub post: String,
    /// Required in the main phase only.
    pub state_file: Option<PathBuf>,
}

impl StepInputs {
    fn command_for(&self, phase: Phase) -> &str {
        match phase {
            Phase::Main => &self.main,
            Phase::Post => &self.post,
        }
    }
}

/// What a step invocation did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepReport {
    pub phase: Phase,
    pub outcome: Outcome,
}

impl StepReport {
    pub fn exit_code(&self) -> i32 {
        self.outcome.exit_code()
    }
}

/// What a step invocation would do, without doing it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepPlan {
    pub phase: Phase,
    pub key: StateKey,
    pub state_var: String,
    pub command: String,
    pub writes_state: bool,
    pub state_file: Option<PathBuf>,
}

/// Decide the phase and command for `inputs` with no side effects.
pub fn plan_step(inputs: &StepInputs, env: &impl EnvSource) -> StepPlan {
    let phase = Phase::detect(&inputs.key, env);
    StepPlan {
        phase,
        key: inputs.key.clone(),
        state_var: inputs.key.state_var(),
        command: inputs.command_for(phase).to_owned(),
        writes_state: phase == Phase::Main,
        state_file: inputs.state_file.clone(),
    }
}

/// Run the phase selected by the environment.
pub async fn run_step(
    inputs: &StepInputs,
    env: &impl EnvSource,
    shell: &Shell,
) -> Result<StepReport, CoreError> {
    let phase = Phase::detect(&inputs.key, env);
    tracing::info!(%phase, key = %inputs.key, "running step");

    if phase == Phase::Main {
        let path = inputs
            .state_file
            .as_ref()
            .ok_or_else(|| CoreError::MissingInput {
                name: STATE_FILE_VAR.into(),
            })?;
        StateFile::new(path).record(&inputs.key)?;
    }

    let outcome = shell.run(inputs.command_for(phase)).await?;
    tracing::info!(%phase, code = outcome.exit_code(), "step finished");

    Ok(StepReport { phase, outcome })
}
