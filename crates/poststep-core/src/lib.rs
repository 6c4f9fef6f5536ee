//! Core logic for running a command as both the main and post step of a
//! GitHub Actions job.
//!
//! The Actions runner invokes one entry point twice and gives it no direct
//! way to tell the two runs apart. This crate does that with a state flag:
//!
//! - **[`StateKey`]**: the normalised (upper-cased) flag name. The main
//!   phase records `<KEY>=true` in the state file; the runner then exports
//!   `STATE_<KEY>` to the post phase.
//!
//! - **[`Phase`]**: detected from an [`EnvSource`]. `STATE_<KEY>` present
//!   means [`Phase::Post`], absent means [`Phase::Main`].
//!
//! - **[`StateFile`]**: append-only writer for the file named by
//!   `GITHUB_STATE`.
//!
//! - **[`Shell`]**: runs a command string through the platform shell with
//!   inherited stdio and maps the child's exit status to an [`Outcome`].
//!
//! - **[`run_step`]** / **[`plan_step`]**: orchestration and its
//!   side-effect-free dry run.

pub mod env;
pub mod error;
pub mod key;
pub mod phase;
pub mod shell;
pub mod state;
pub mod step;

// ── Primary re-exports ──────────────────────────────────────────────
pub use env::{EnvSource, ProcessEnv};
pub use error::CoreError;
pub use key::StateKey;
pub use phase::Phase;
pub use shell::{Outcome, Shell};
pub use state::{LINE_ENDING, StateFile};
pub use step::{StepInputs, StepPlan, StepReport, plan_step, run_step};
