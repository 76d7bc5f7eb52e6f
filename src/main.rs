use anyhow::Result;

use grand_slam_pool::cli::Command;
use grand_slam_pool::{
    handle_completions, handle_import, handle_init, handle_leaderboard, handle_serve, interpret,
};

fn main() {
    setup_logging();
    parse_and_execute().unwrap_or_else(|e| {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    });
}

fn setup_logging() {
    sensible_env_logger::init!();
}

fn parse_and_execute() -> Result<()> {
    let command = interpret();
    execute_command(&command)
}

fn execute_command(command: &Command) -> Result<()> {
    match command {
        Command::Serve { port } => handle_serve(*port),
        Command::Init { reset } => handle_init(*reset),
        Command::Import { file, gender, replace } => handle_import(file, (*gender).into(), *replace),
        Command::Leaderboard { tournament, remaining } => handle_leaderboard(tournament.as_deref(), *remaining),
        Command::Completions { shell } => handle_completions(*shell),
    }
}
