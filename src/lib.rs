pub mod api;
pub mod cli;
pub mod config;
pub mod database;
pub mod domain;
pub mod scoring;
pub mod services;
pub mod validation;

use std::path::Path;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use clap_complete::Shell;
use cli::Cli;
use colored::Colorize;

use crate::cli::Command;
use crate::config::settings::AppConfig;
use crate::domain::Gender;
use crate::scoring::LeaderboardEntry;
use crate::services::import::RosterImportService;
use crate::services::leaderboard::LeaderboardService;
use crate::services::server::ServerService;

pub fn interpret() -> Command {
    let cli = Cli::parse();
    cli.command
}

pub fn handle_serve(port: u16) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let config = AppConfig::new();
        let service = ServerService::new(port, config);
        service.run().await
    })
}

pub fn handle_init(reset: bool) -> Result<()> {
    let config = AppConfig::new();
    let mut conn = open_database(&config)?;
    if reset {
        database::setup::reset_database(&mut conn)?;
        log::info!("Database {} reset", config.server.database_path);
    } else {
        log::info!("Database {} ready", config.server.database_path);
    }
    Ok(())
}

pub fn handle_import(file: &Path, gender: Gender, replace: bool) -> Result<()> {
    let csv = std::fs::read_to_string(file).with_context(|| format!("Failed to read {}", file.display()))?;
    let config = AppConfig::new();
    let mut conn = open_database(&config)?;

    let summary = RosterImportService::new(&mut conn).run(&csv, gender, replace)?;
    println!(
        "{} {} players imported, roster now has {}",
        summary.imported,
        gender,
        summary.roster_size
    );
    Ok(())
}

pub fn handle_leaderboard(tournament: Option<&str>, remaining: bool) -> Result<()> {
    let config = AppConfig::new();
    let mut conn = open_database(&config)?;
    let mut service = LeaderboardService::new(&mut conn);

    let Some(tournament) = service.resolve_tournament(tournament)? else {
        anyhow::bail!("No tournament found");
    };
    let board = service.leaderboard(&tournament.id, remaining)?;

    println!("{} ({})", tournament.name.bold(), tournament.id);
    println!(
        "{:>4}  {:<24} {:>7} {:>7} {:>7}",
        "#".dimmed(),
        "Participant".dimmed(),
        "Men".dimmed(),
        "Women".dimmed(),
        "Total".dimmed()
    );
    for (index, entry) in board.leaderboard.iter().enumerate() {
        println!("{}", format_row(index + 1, entry, remaining));
    }
    Ok(())
}

pub fn handle_completions(shell: Shell) -> Result<()> {
    let mut command = Cli::command();
    let name = command.get_name().to_string();
    clap_complete::generate(shell, &mut command, name, &mut std::io::stdout());
    Ok(())
}

fn open_database(config: &AppConfig) -> Result<database::DbConn> {
    let pool = database::create_pool(&config.server.database_path)?;
    let mut conn = database::get_connection(&pool)?;
    database::setup::init_database(&mut conn)?;
    Ok(conn)
}

fn format_row(rank: usize, entry: &LeaderboardEntry, remaining: bool) -> String {
    let mut row = format!(
        "{:>4}  {:<24} {:>7.1} {:>7.1} {:>7}",
        rank,
        entry.participant_name,
        entry.men_points,
        entry.women_points,
        format!("{:.1}", entry.total_points).green().bold()
    );
    let bonuses = entry.men_champion_bonus + entry.women_champion_bonus;
    if bonuses > 0 {
        row.push_str(&format!("  {}", format!("+{} champion", bonuses).yellow()));
    }
    if remaining {
        if let (Some(men), Some(women)) = (entry.men_players_remaining, entry.women_players_remaining) {
            row.push_str(&format!("  ({} / {} left)", men, women));
        }
    }
    row
}
