mod cli;
mod commands;
mod error;
mod output;

use std::io::Write;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use poststep_config::{LogFormat, LogSettings, Settings};

use crate::cli::{Cli, Command};
use crate::error::CliError;

/// Top-level page rendered by build.rs.
const MAN_PAGE: &[u8] = include_bytes!(concat!(env!("OUT_DIR"), "/man/poststep.1"));

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    let code = match run(cli).await {
        Ok(code) => code,
        Err(err) => {
            let code = err.exit_code();
            eprintln!("{:?}", miette::Report::new(err));
            code
        }
    };

    if let Err(err) = std::io::stdout().flush() {
        tracing::debug!(error = %err, "failed to flush stdout");
    }
    std::process::exit(code);
}

fn init_tracing(verbosity: u8, log: &LogSettings) {
    let directive = match verbosity {
        0 => log.level.as_deref().unwrap_or("warn"),
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);

    match log.format {
        LogFormat::Text => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}

async fn run(cli: Cli) -> Result<i32, CliError> {
    match cli.command.unwrap_or(Command::Run) {
        // Completions need neither settings nor step inputs
        Command::Completions(args) => {
            use clap::CommandFactory;
            use clap_complete::generate;

            let mut cmd = Cli::command();
            generate(args.shell, &mut cmd, "poststep", &mut std::io::stdout());
            Ok(0)
        }

        Command::Man => {
            std::io::stdout().write_all(MAN_PAGE)?;
            Ok(0)
        }

        Command::Phase(args) => {
            prepare(&cli.global)?;
            commands::phase::handle(&args, &cli.global)?;
            Ok(0)
        }

        Command::Run => {
            let settings = prepare(&cli.global)?;
            commands::run::handle(&cli.global, &settings).await
        }
    }
}

/// Load settings and install the subscriber they describe.
fn prepare(global: &cli::GlobalOpts) -> Result<Settings, CliError> {
    let settings = poststep_config::load_settings(global.config.as_deref())?;
    init_tracing(global.verbose, &settings.log);
    tracing::debug!(config = ?global.config, "settings loaded");
    Ok(settings)
}
