//! `run`: detect the phase and execute its command.

use poststep_config::Settings;
use poststep_core::{ProcessEnv, run_step};

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// Returns the exit code the process should terminate with.
pub async fn handle(global: &GlobalOpts, settings: &Settings) -> Result<i32, CliError> {
    let inputs = super::resolve_inputs(global)?;
    let shell = settings.shell()?;

    let report = run_step(&inputs, &ProcessEnv, &shell).await?;
    if !report.outcome.success() {
        tracing::warn!(
            phase = %report.phase,
            code = report.exit_code(),
            "command exited unsuccessfully"
        );
    }
    Ok(report.exit_code())
}
