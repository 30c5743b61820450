use anyhow::Result;
use sqlx::mysql::{MySqlConnectOptions, MySqlConnection};
use sqlx::{Connection, Row};
use std::env;

use crate::models::{LeaderboardRow, MatchRecord, Team, TeamOption, TOURNAMENT_ID};

/// Open one short-lived connection for a single operation. Configuration
/// comes from the environment with fixed fallbacks; the connection is
/// released on drop, on every exit path. No pooling, no retry, no timeout.
pub async fn connect() -> Result<MySqlConnection> {
    let options = MySqlConnectOptions::new()
        .host(&env::var("DB_HOST").unwrap_or_else(|_| "localhost".to_string()))
        .username(&env::var("DB_USER").unwrap_or_else(|_| "root".to_string()))
        .password(&env::var("DB_PASSWORD").unwrap_or_default())
        .database(&env::var("DB_NAME").unwrap_or_else(|_| "FootballLeagueDB".to_string()));

    let conn = MySqlConnection::connect_with(&options).await?;
    tracing::debug!("database connection opened");
    Ok(conn)
}

// Team operations

pub async fn fetch_teams(conn: &mut MySqlConnection) -> Result<Vec<Team>> {
    let teams = sqlx::query_as::<_, Team>(
        "SELECT team_id, team_name, coach_name, foundation_year, tournament_id FROM Team",
    )
    .fetch_all(&mut *conn)
    .await?;
    Ok(teams)
}

pub async fn fetch_team_options(conn: &mut MySqlConnection) -> Result<Vec<TeamOption>> {
    let options =
        sqlx::query_as::<_, TeamOption>("SELECT team_id, team_name FROM Team ORDER BY team_name")
            .fetch_all(&mut *conn)
            .await?;
    Ok(options)
}

pub async fn insert_team(
    conn: &mut MySqlConnection,
    name: &str,
    coach: &str,
    foundation_year: Option<i32>,
) -> Result<()> {
    sqlx::query(
        "INSERT INTO Team (team_name, coach_name, foundation_year, tournament_id) VALUES (?, ?, ?, ?)",
    )
    .bind(name)
    .bind(coach)
    .bind(foundation_year)
    .bind(TOURNAMENT_ID)
    .execute(&mut *conn)
    .await?;
    Ok(())
}

/// Delete by identifier. Referential-integrity failures from matches that
/// still reference the team surface as plain database errors.
pub async fn delete_team(conn: &mut MySqlConnection, team_id: i32) -> Result<u64> {
    let result = sqlx::query("DELETE FROM Team WHERE team_id = ?")
        .bind(team_id)
        .execute(&mut *conn)
        .await?;
    Ok(result.rows_affected())
}

pub async fn count_existing_teams(
    conn: &mut MySqlConnection,
    team1_id: i32,
    team2_id: i32,
) -> Result<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM Team WHERE team_id IN (?, ?)")
        .bind(team1_id)
        .bind(team2_id)
        .fetch_one(&mut *conn)
        .await?;
    Ok(count)
}

// Match operations

pub async fn fetch_match_records(conn: &mut MySqlConnection) -> Result<Vec<MatchRecord>> {
    let records = sqlx::query_as::<_, MatchRecord>(
        r#"
        SELECT m.match_id,
               m.team1_id,
               m.team2_id,
               t1.team_name AS team1_name,
               t2.team_name AS team2_name,
               m.match_date
        FROM Matches m
        LEFT JOIN Team t1 ON m.team1_id = t1.team_id
        LEFT JOIN Team t2 ON m.team2_id = t2.team_id
        ORDER BY m.match_date, m.match_id
        "#,
    )
    .fetch_all(&mut *conn)
    .await?;
    Ok(records)
}

pub async fn insert_match(
    conn: &mut MySqlConnection,
    team1_id: i32,
    team2_id: i32,
    match_date: &str,
    venue: &str,
) -> Result<()> {
    sqlx::query(
        r#"INSERT INTO Matches (tournament_id, team1_id, team2_id, match_date, venue, status)
           VALUES (?, ?, ?, ?, ?, 'Scheduled')"#,
    )
    .bind(TOURNAMENT_ID)
    .bind(team1_id)
    .bind(team2_id)
    .bind(match_date)
    .bind(venue)
    .execute(&mut *conn)
    .await?;
    Ok(())
}

pub async fn match_teams(
    conn: &mut MySqlConnection,
    match_id: i32,
) -> Result<Option<(i32, i32)>> {
    let row = sqlx::query("SELECT team1_id, team2_id FROM Matches WHERE match_id = ?")
        .bind(match_id)
        .fetch_optional(&mut *conn)
        .await?;
    Ok(row.map(|r| (r.get("team1_id"), r.get("team2_id"))))
}

/// Score, points and standings bookkeeping all live inside the stored
/// procedure; this call treats it as an opaque, already-correct contract.
pub async fn call_add_match_result(
    conn: &mut MySqlConnection,
    match_id: i32,
    team1_id: i32,
    goals1: i32,
    team2_id: i32,
    goals2: i32,
) -> Result<()> {
    sqlx::query("CALL AddMatchResult(?, ?, ?, ?, ?)")
        .bind(match_id)
        .bind(team1_id)
        .bind(goals1)
        .bind(team2_id)
        .bind(goals2)
        .execute(&mut *conn)
        .await?;
    Ok(())
}

// Player operations

/// Update by exact name match; ambiguous when players share a name, which is
/// why the affected-row count is returned to the caller. Safe-update mode is
/// lifted for the statement because the predicate is not a key column.
pub async fn update_player_weight(
    conn: &mut MySqlConnection,
    player_name: &str,
    weight_kg: f64,
) -> Result<u64> {
    sqlx::query("SET SQL_SAFE_UPDATES = 0").execute(&mut *conn).await?;
    let result = sqlx::query("UPDATE Player SET weight_kg = ? WHERE name = ?")
        .bind(weight_kg)
        .bind(player_name)
        .execute(&mut *conn)
        .await?;
    sqlx::query("SET SQL_SAFE_UPDATES = 1").execute(&mut *conn).await?;
    Ok(result.rows_affected())
}

// Stats operations

/// Scalar stored function; NULL propagates to the caller untouched.
pub async fn win_percentage(conn: &mut MySqlConnection, team_id: i32) -> Result<Option<f64>> {
    let value: Option<f64> = sqlx::query_scalar("SELECT CAST(GetWinPercentage(?) AS DOUBLE)")
        .bind(team_id)
        .fetch_one(&mut *conn)
        .await?;
    Ok(value)
}

pub async fn fetch_leaderboard(conn: &mut MySqlConnection) -> Result<Vec<LeaderboardRow>> {
    let rows = sqlx::query_as::<_, LeaderboardRow>(
        r#"SELECT team_id, team_name, matches_played, wins, draws, losses, goals_for, total_points
           FROM Leaderboard"#,
    )
    .fetch_all(&mut *conn)
    .await?;
    Ok(rows)
}
