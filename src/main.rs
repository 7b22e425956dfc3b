use std::io;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing::error;

use deskboard::api::{Api, ClientSettings};
use deskboard::cli::{self, Cli};
use deskboard::logging::{init_cli_tracing, init_tui_tracing};

fn main() -> ExitCode {
    let cli = Cli::parse();
    if cli.is_interactive() {
        init_tui_tracing();
    } else {
        init_cli_tracing();
    }

    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            error!(error = %err, "command failed");
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<bool> {
    let config = cli.load_config().context("Failed to load configuration")?;
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;
    let api = Api::new(ClientSettings::from(&config.api)).context("Failed to build HTTP client")?;

    match cli.command {
        None | Some(cli::Command::Tui) => {
            deskboard::ui::run(&config, api, runtime.handle()).context("Terminal error")?;
            Ok(true)
        }
        Some(command) => {
            let mut stdout = io::stdout().lock();
            runtime.block_on(cli::run(command, &config, &api, &mut stdout))
        }
    }
}
