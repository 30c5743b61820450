use anyhow::Result;

use crate::error::OpError;
use crate::services::LeagueCoordinator;

/// Operation-boundary reporting: validation misses are warnings, database
/// failures are errors, and neither one escapes the handler.
fn report(err: OpError) {
    match err {
        OpError::Invalid(err) => {
            println!("⚠️  {}", err);
        }
        OpError::Db(err) => {
            tracing::error!("database error: {err:#}");
            println!("❌ Database error: {err:#}");
        }
    }
}

pub async fn show_teams(coordinator: &LeagueCoordinator, json: bool) -> Result<()> {
    let teams = match coordinator.list_teams().await {
        Ok(teams) => teams,
        Err(err) => {
            report(err);
            return Ok(());
        }
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&teams)?);
        return Ok(());
    }

    if teams.is_empty() {
        println!("📭 No teams yet. Add one with: leaguedesk add-team");
        return Ok(());
    }

    println!("{:<6} {:<24} {:<20} {:<6} {}", "ID", "Team", "Coach", "Year", "Tournament");
    for team in &teams {
        println!(
            "{:<6} {:<24} {:<20} {:<6} {}",
            team.team_id,
            team.team_name,
            team.coach_name,
            team.foundation_year.map_or("-".to_string(), |y| y.to_string()),
            team.tournament_id
        );
    }
    Ok(())
}

pub async fn add_team(
    coordinator: &mut LeagueCoordinator,
    name: &str,
    coach: &str,
    year: &str,
) -> Result<()> {
    match coordinator.add_team(name, coach, year).await {
        Ok(()) => println!("✅ Team '{}' added successfully!", name.trim()),
        Err(err) => report(err),
    }
    Ok(())
}

pub async fn delete_team(coordinator: &mut LeagueCoordinator, team_id: i32) -> Result<()> {
    match coordinator.delete_team(team_id).await {
        Ok(0) => println!("⚠️  No team with id {}.", team_id),
        Ok(_) => println!("✅ Team {} deleted.", team_id),
        Err(err) => report(err),
    }
    Ok(())
}

pub async fn show_matches(coordinator: &mut LeagueCoordinator, json: bool) -> Result<()> {
    if let Err(err) = coordinator.reload_matches().await {
        report(err);
        return Ok(());
    }

    if json {
        println!("{}", serde_json::to_string_pretty(coordinator.match_options())?);
        return Ok(());
    }

    if coordinator.match_options().is_empty() {
        println!("📭 No matches scheduled. Create one with: leaguedesk create-match");
        return Ok(());
    }

    println!("📅 Matches:");
    for option in coordinator.match_options() {
        println!("   {}", option.label);
    }
    Ok(())
}

pub async fn create_match(
    coordinator: &mut LeagueCoordinator,
    team1: &str,
    team2: &str,
    date: &str,
    venue: &str,
) -> Result<()> {
    // the name map feeds team resolution, so load it first
    if let Err(err) = coordinator.reload_teams().await {
        report(err);
        return Ok(());
    }
    if coordinator.team_options().is_empty() {
        println!("📭 No teams to schedule. Add teams first.");
        return Ok(());
    }

    match coordinator.create_match(team1, team2, date, venue).await {
        Ok(()) => println!("✅ Match created: {} vs {} on {} at {}.", team1.trim(), team2.trim(), date.trim(), venue.trim()),
        Err(err) => report(err),
    }
    Ok(())
}

pub async fn add_result(
    coordinator: &mut LeagueCoordinator,
    label: &str,
    goals1: &str,
    goals2: &str,
) -> Result<()> {
    // labels resolve through the match map, so load it first
    if let Err(err) = coordinator.reload_matches().await {
        report(err);
        return Ok(());
    }

    match coordinator.record_result(label, goals1, goals2).await {
        Ok(()) => {
            println!("✅ Match result added successfully!");
            show_leaderboard(coordinator, false).await?;
        }
        Err(err) => report(err),
    }
    Ok(())
}

pub async fn show_leaderboard(coordinator: &LeagueCoordinator, json: bool) -> Result<()> {
    let rows = match coordinator.leaderboard().await {
        Ok(rows) => rows,
        Err(err) => {
            report(err);
            return Ok(());
        }
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    if rows.is_empty() {
        println!("📭 Leaderboard is empty.");
        return Ok(());
    }

    println!("🏆 Leaderboard:");
    println!(
        "{:<6} {:<24} {:>8} {:>5} {:>6} {:>7} {:>6} {:>7}",
        "ID", "Team", "Played", "Wins", "Draws", "Losses", "Goals", "Points"
    );
    for row in &rows {
        println!(
            "{:<6} {:<24} {:>8} {:>5} {:>6} {:>7} {:>6} {:>7}",
            row.team_id,
            row.team_name,
            row.matches_played,
            row.wins,
            row.draws,
            row.losses,
            row.goals_for,
            row.total_points
        );
    }
    Ok(())
}

pub async fn update_weight(
    coordinator: &LeagueCoordinator,
    player: &str,
    weight: &str,
) -> Result<()> {
    match coordinator.update_player_weight(player, weight).await {
        Ok(0) => println!("⚠️  No player named '{}'.", player.trim()),
        Ok(affected) => println!(
            "✅ Weight updated for '{}' ({} row{} affected).",
            player.trim(),
            affected,
            if affected == 1 { "" } else { "s" }
        ),
        Err(err) => report(err),
    }
    Ok(())
}

pub async fn win_percentage(coordinator: &LeagueCoordinator, team_id: i32) -> Result<()> {
    match coordinator.win_percentage(team_id).await {
        // whatever the function returns is shown verbatim, NULL included
        Ok(Some(pct)) => println!("📊 Team {} Win % = {}", team_id, pct),
        Ok(None) => println!("📊 Team {} Win % = NULL", team_id),
        Err(err) => report(err),
    }
    Ok(())
}
