//! Swiss Tournament - CLI
//!
//! Registers players, records results and prints next-round pairings.

#![warn(missing_docs)]

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use swiss_tournament::{Pairing, Standing, StoreConfig, TournamentRepository};
use tracing::{debug, instrument};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Logs go to stderr so command output stays pipeable
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = StoreConfig::load(&cli.config)?.with_override(cli.database);
    debug!(database_url = %config.database_url(), "Configuration resolved");

    let repo = TournamentRepository::new(config.database_url().clone())?;

    match cli.command {
        Command::Init => {
            repo.initialize()?;
            println!("Database ready at {}", repo.db_path());
        }
        Command::Reset { matches_only } => run_reset(&repo, matches_only)?,
        Command::Register { name } => {
            let player = repo.register_player(name)?;
            println!("{}", player.id());
        }
        Command::Count => println!("{}", repo.count_players()?),
        Command::Standings { json } => print_standings(&repo.player_standings()?, json)?,
        Command::Report { winner, loser } => repo.report_match(winner, loser)?,
        Command::Pairings { json } => print_pairings(&repo.swiss_pairings()?, json)?,
    }

    Ok(())
}

/// Clears results, and players too unless `matches_only` is set.
#[instrument(skip(repo))]
fn run_reset(repo: &TournamentRepository, matches_only: bool) -> Result<()> {
    if matches_only {
        let removed = repo.delete_matches()?;
        println!("Cleared {} score rows", removed);
    } else {
        repo.reset()?;
        println!("Tournament reset");
    }
    Ok(())
}

#[instrument(skip(standings))]
fn print_standings(standings: &[Standing], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(standings)?);
        return Ok(());
    }

    println!("{:>6}  {:<24} {:>5} {:>8}", "ID", "NAME", "WINS", "MATCHES");
    for s in standings {
        println!(
            "{:>6}  {:<24} {:>5} {:>8}",
            s.id(),
            s.name(),
            s.wins(),
            s.matches()
        );
    }
    Ok(())
}

#[instrument(skip(pairings))]
fn print_pairings(pairings: &[Pairing], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(pairings)?);
        return Ok(());
    }

    for p in pairings {
        println!(
            "{:>6} {:<24} vs {:>6} {}",
            p.id1(),
            p.name1(),
            p.id2(),
            p.name2()
        );
    }
    Ok(())
}
