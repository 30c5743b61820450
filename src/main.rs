mod cli;
mod db;
mod error;
mod models;
mod services;
mod utils;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::services::LeagueCoordinator;

#[derive(Parser)]
#[command(name = "leaguedesk")]
#[command(about = "Front desk for a football league stored in MySQL")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List all teams
    Teams {
        #[arg(long)]
        json: bool,
    },
    /// Add a team to the league
    AddTeam {
        #[arg(short, long)]
        name: String,
        #[arg(short, long)]
        coach: String,
        /// Foundation year (optional)
        #[arg(short, long, default_value = "")]
        year: String,
    },
    /// Delete a team by identifier
    DeleteTeam {
        #[arg(short, long)]
        id: i32,
    },
    /// List matches with their selection labels
    Matches {
        #[arg(long)]
        json: bool,
    },
    /// Schedule a new match between two teams
    CreateMatch {
        #[arg(long)]
        team1: String,
        #[arg(long)]
        team2: String,
        /// Match date, YYYY-MM-DD
        #[arg(long)]
        date: String,
        #[arg(long)]
        venue: String,
    },
    /// Record a final score for a match selected by its label
    AddResult {
        /// Match label as shown by `matches`, e.g. "3: Lions vs Tigers (2025-03-01)"
        #[arg(short, long)]
        r#match: String,
        #[arg(long)]
        goals1: String,
        #[arg(long)]
        goals2: String,
    },
    /// Show the computed leaderboard
    Leaderboard {
        #[arg(long)]
        json: bool,
    },
    /// Update a player's weight by exact name match
    UpdateWeight {
        #[arg(short, long)]
        player: String,
        /// New weight in kg
        #[arg(short, long)]
        weight: String,
    },
    /// Win percentage for a team id, computed by the database
    WinPercentage {
        #[arg(short, long)]
        team_id: i32,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Load environment variables
    dotenv::dotenv().ok();

    let cli = Cli::parse();
    let mut coordinator = LeagueCoordinator::new();

    match cli.command {
        Some(Commands::Teams { json }) => {
            cli::show_teams(&coordinator, json).await?;
        }
        Some(Commands::AddTeam { name, coach, year }) => {
            cli::add_team(&mut coordinator, &name, &coach, &year).await?;
        }
        Some(Commands::DeleteTeam { id }) => {
            cli::delete_team(&mut coordinator, id).await?;
        }
        Some(Commands::Matches { json }) => {
            cli::show_matches(&mut coordinator, json).await?;
        }
        Some(Commands::CreateMatch {
            team1,
            team2,
            date,
            venue,
        }) => {
            cli::create_match(&mut coordinator, &team1, &team2, &date, &venue).await?;
        }
        Some(Commands::AddResult {
            r#match,
            goals1,
            goals2,
        }) => {
            cli::add_result(&mut coordinator, &r#match, &goals1, &goals2).await?;
        }
        Some(Commands::Leaderboard { json }) => {
            cli::show_leaderboard(&coordinator, json).await?;
        }
        Some(Commands::UpdateWeight { player, weight }) => {
            cli::update_weight(&coordinator, &player, &weight).await?;
        }
        Some(Commands::WinPercentage { team_id }) => {
            cli::win_percentage(&coordinator, team_id).await?;
        }
        None => {
            // Default to the leaderboard view
            cli::show_leaderboard(&coordinator, false).await?;
        }
    }

    Ok(())
}
