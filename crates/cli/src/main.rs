use std::io::{stderr, stdout};
use std::process::ExitCode;

use clap::Parser;
use log::debug;
use tfws_core::command_definitions::WorkspaceCommands;
use tfws_core::error::Result;
use tfws_core::execution::ProcessRunner;
use tfws_core::{config, file_handling};

use tfws_cli::cli_args::Args;
use tfws_cli::command_selection::{CrosstermKeys, Outcome};
use tfws_cli::controller::SelectionController;
use tfws_cli::terminal::CrosstermDriver;

fn execute() -> Result<Outcome> {
    let args = Args::parse();

    let config_path = config::get_config_path(&args.config_path);
    debug!("Config path: `{}`", config_path);

    let candidates = file_handling::load_candidates(&config_path)?;
    let commands = WorkspaceCommands::for_tool(args.tool.as_str());
    let mut runner = ProcessRunner::new(args.timeout());
    let mut controller = SelectionController::new(&candidates, &commands, args.prompt_options());

    match &args.workspace {
        Some(workspace) => controller.run_with_workspace(workspace, &mut runner),
        None => {
            let mut keys = CrosstermKeys::with_signals()?;
            controller.run(CrosstermDriver, &mut keys, &mut runner, &mut stdout())
        }
    }
}

fn main() -> ExitCode {
    env_logger::init();

    match execute() {
        Ok(outcome) => {
            if let Err(e) = outcome.report(&mut stdout(), &mut stderr()) {
                eprintln!("{e}");
                return ExitCode::FAILURE;
            }
            ExitCode::from(outcome.exit_code())
        }
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
