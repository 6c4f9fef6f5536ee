//! Output rendering for the `phase` command.
//!
//! Plain emits the phase name, JSON the whole plan. Everything else the
//! binary says goes to stderr through tracing; stdout belongs to the child.

use std::io::{self, IsTerminal, Write};

use owo_colors::OwoColorize;

use poststep_core::{Phase, StepPlan};

use crate::cli::{ColorMode, OutputFormat};
use crate::error::CliError;

/// Determine whether color output should be enabled.
pub fn should_color(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none(),
    }
}

/// Render a step plan in the chosen format.
pub fn render_plan(format: OutputFormat, plan: &StepPlan, color: bool) -> Result<String, CliError> {
    match format {
        OutputFormat::Plain => Ok(render_phase(plan.phase, color)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(plan)?),
    }
}

fn render_phase(phase: Phase, color: bool) -> String {
    let name = phase.to_string();
    if !color {
        return name;
    }
    match phase {
        Phase::Main => name.green().bold().to_string(),
        Phase::Post => name.magenta().bold().to_string(),
    }
}

/// Print rendered output to stdout.
pub fn print_output(output: &str) -> Result<(), CliError> {
    if output.is_empty() {
        return Ok(());
    }
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{output}")?;
    Ok(())
}
