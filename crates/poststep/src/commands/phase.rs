//! `phase`: report the phase and command without running anything.

use poststep_core::{ProcessEnv, plan_step};

use crate::cli::{GlobalOpts, PhaseArgs};
use crate::error::CliError;
use crate::output;

pub fn handle(args: &PhaseArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let inputs = super::resolve_inputs(global)?;
    let plan = plan_step(&inputs, &ProcessEnv);

    let color = output::should_color(global.color);
    let rendered = output::render_plan(args.output, &plan, color)?;
    output::print_output(&rendered)
}
