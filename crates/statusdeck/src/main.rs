mod cli;
mod commands;
mod config;
mod error;
mod output;

use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use statusdeck_core::{Controller, ControllerConfig};

use crate::cli::{Cli, Command};
use crate::commands::status::DEFAULT_WATCH_INTERVAL_SECS;
use crate::error::CliError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.global.verbose);

    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        // No backend needed for these two
        Command::Config(args) => commands::config_cmd::handle(args, &cli.global),

        Command::Completions(args) => {
            let mut cmd = Cli::command();
            clap_complete::generate(args.shell, &mut cmd, "statusdeck", &mut std::io::stdout());
            Ok(())
        }

        cmd => {
            let mut controller_config = config::build_controller_config(&cli.global)?;
            set_refresh_interval(&mut controller_config, &cmd);

            let controller = Controller::new(controller_config);
            controller.connect().await?;

            tracing::debug!(command = ?cmd, "dispatching command");
            let result = commands::dispatch(cmd, &controller, &cli.global).await;
            controller.disconnect().await;
            result
        }
    }
}

/// Only `status --watch` keeps the background refresh running; every other
/// command works from the snapshot taken at connect.
fn set_refresh_interval(config: &mut ControllerConfig, cmd: &Command) {
    config.refresh_interval_secs = match cmd {
        Command::Status(args) if args.watch => {
            match args.interval.unwrap_or(config.refresh_interval_secs) {
                0 => DEFAULT_WATCH_INTERVAL_SECS,
                secs => secs,
            }
        }
        _ => 0,
    };
}
