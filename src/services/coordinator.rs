use std::collections::HashMap;

use crate::db;
use crate::error::{OpError, ValidationError};
use crate::models::{LeaderboardRow, MatchOption, MatchRecord, Team, TeamOption};
use crate::utils;

/// Single owner of the in-process lookup state. Both maps are rebuilt from
/// scratch on every reload and consulted only at the moment of use; staleness
/// between load and submit is handled by re-checking against the database or
/// forcing a reload, never by trusting the map.
#[derive(Debug, Default)]
pub struct LeagueCoordinator {
    team_options: Vec<TeamOption>,
    name_to_id: HashMap<String, i32>,
    match_options: Vec<MatchOption>,
    label_to_id: HashMap<String, i32>,
}

/// A create-match request that has passed every local check.
#[derive(Debug)]
struct PlannedMatch {
    team1_id: i32,
    team2_id: i32,
    match_date: String,
    venue: String,
}

impl LeagueCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Team selection list, in `ORDER BY team_name` load order.
    pub fn team_options(&self) -> &[TeamOption] {
        &self.team_options
    }

    /// Match selection list, in date-then-id load order.
    pub fn match_options(&self) -> &[MatchOption] {
        &self.match_options
    }

    pub fn resolve_team(&self, name: &str) -> Option<i32> {
        self.name_to_id.get(name).copied()
    }

    pub fn resolve_match(&self, label: &str) -> Option<i32> {
        self.label_to_id.get(label).copied()
    }

    // Reference data loading

    /// Replace the team list and name map. On failure the map is cleared
    /// before the error is reported, so stale entries never outlive a failed
    /// refresh. An empty league is not an error.
    pub async fn reload_teams(&mut self) -> Result<usize, OpError> {
        let fetched = async {
            let mut conn = db::connect().await?;
            db::fetch_team_options(&mut conn).await
        }
        .await;

        match fetched {
            Ok(rows) => {
                let count = rows.len();
                self.ingest_teams(rows);
                Ok(count)
            }
            Err(err) => {
                self.ingest_teams(Vec::new());
                Err(err.into())
            }
        }
    }

    /// Replace the match list and label map, same contract as
    /// [`reload_teams`](Self::reload_teams).
    pub async fn reload_matches(&mut self) -> Result<usize, OpError> {
        let fetched = async {
            let mut conn = db::connect().await?;
            db::fetch_match_records(&mut conn).await
        }
        .await;

        match fetched {
            Ok(records) => {
                let count = records.len();
                self.ingest_matches(records);
                Ok(count)
            }
            Err(err) => {
                self.ingest_matches(Vec::new());
                Err(err.into())
            }
        }
    }

    fn ingest_teams(&mut self, rows: Vec<TeamOption>) {
        // duplicate names are permitted by the schema; lookup is
        // last-loaded-wins
        self.name_to_id = rows
            .iter()
            .map(|team| (team.team_name.clone(), team.team_id))
            .collect();
        self.team_options = rows;
    }

    fn ingest_matches(&mut self, records: Vec<MatchRecord>) {
        self.match_options = records.iter().map(MatchOption::from).collect();
        self.label_to_id = self
            .match_options
            .iter()
            .map(|option| (option.label.clone(), option.match_id))
            .collect();
    }

    // CRUD operations

    pub async fn list_teams(&self) -> Result<Vec<Team>, OpError> {
        let mut conn = db::connect().await?;
        Ok(db::fetch_teams(&mut conn).await?)
    }

    pub async fn add_team(&mut self, name: &str, coach: &str, year: &str) -> Result<(), OpError> {
        let (name, coach, foundation_year) = validate_new_team(name, coach, year)?;

        let mut conn = db::connect().await?;
        db::insert_team(&mut conn, name, coach, foundation_year).await?;
        drop(conn);

        tracing::info!(team = %name, "team added");
        // match labels embed team names, so both lists go stale
        self.reload_teams().await?;
        self.reload_matches().await?;
        Ok(())
    }

    pub async fn delete_team(&mut self, team_id: i32) -> Result<u64, OpError> {
        let mut conn = db::connect().await?;
        let affected = db::delete_team(&mut conn, team_id).await?;
        drop(conn);

        tracing::info!(team_id, affected, "team deleted");
        self.reload_teams().await?;
        self.reload_matches().await?;
        Ok(affected)
    }

    pub async fn create_match(
        &mut self,
        team1: &str,
        team2: &str,
        date: &str,
        venue: &str,
    ) -> Result<(), OpError> {
        let planned = self.validate_new_match(team1, team2, date, venue)?;

        let mut conn = db::connect().await?;
        // the name map may have gone stale between load and submit
        if db::count_existing_teams(&mut conn, planned.team1_id, planned.team2_id).await? < 2 {
            drop(conn);
            self.force_team_reload().await;
            return Err(ValidationError::TeamsVanished.into());
        }
        db::insert_match(
            &mut conn,
            planned.team1_id,
            planned.team2_id,
            &planned.match_date,
            &planned.venue,
        )
        .await?;
        drop(conn);

        tracing::info!(
            team1_id = planned.team1_id,
            team2_id = planned.team2_id,
            date = %planned.match_date,
            "match created"
        );
        self.reload_matches().await?;
        Ok(())
    }

    pub async fn record_result(
        &mut self,
        label: &str,
        goals1: &str,
        goals2: &str,
    ) -> Result<(), OpError> {
        let label = utils::require("match", label)?;
        let Some(match_id) = self.resolve_match(label) else {
            // stale label: rebuild the list rather than guessing an id
            self.force_match_reload().await;
            return Err(ValidationError::UnknownMatch.into());
        };
        let goals1 = utils::parse_goals("team 1 goals", goals1)?;
        let goals2 = utils::parse_goals("team 2 goals", goals2)?;

        let mut conn = db::connect().await?;
        let Some((team1_id, team2_id)) = db::match_teams(&mut conn, match_id).await? else {
            drop(conn);
            self.force_match_reload().await;
            return Err(ValidationError::MatchVanished(match_id).into());
        };
        db::call_add_match_result(&mut conn, match_id, team1_id, goals1, team2_id, goals2).await?;
        drop(conn);

        tracing::info!(match_id, goals1, goals2, "match result recorded");
        self.reload_matches().await?;
        Ok(())
    }

    pub async fn update_player_weight(&self, player: &str, weight: &str) -> Result<u64, OpError> {
        let player = utils::require("player name", player)?;
        utils::require("weight (kg)", weight)?;
        let weight_kg = utils::parse_weight(weight)?;

        let mut conn = db::connect().await?;
        let affected = db::update_player_weight(&mut conn, player, weight_kg).await?;

        tracing::info!(player = %player, weight_kg, affected, "player weight updated");
        Ok(affected)
    }

    /// Delegates entirely to `GetWinPercentage`; no local existence check,
    /// and a NULL result is passed through as-is.
    pub async fn win_percentage(&self, team_id: i32) -> Result<Option<f64>, OpError> {
        let mut conn = db::connect().await?;
        Ok(db::win_percentage(&mut conn, team_id).await?)
    }

    pub async fn leaderboard(&self) -> Result<Vec<LeaderboardRow>, OpError> {
        let mut conn = db::connect().await?;
        Ok(db::fetch_leaderboard(&mut conn).await?)
    }

    // Validation

    fn validate_new_match(
        &self,
        team1: &str,
        team2: &str,
        date: &str,
        venue: &str,
    ) -> Result<PlannedMatch, ValidationError> {
        let team1 = utils::require("team 1", team1)?;
        let team2 = utils::require("team 2", team2)?;
        let date = utils::require("match date", date)?;
        let venue = utils::require("venue", venue)?;

        if team1 == team2 {
            return Err(ValidationError::SameTeams);
        }
        if !utils::is_valid_date(date) {
            return Err(ValidationError::BadDate);
        }

        let team1_id = self
            .resolve_team(team1)
            .ok_or_else(|| ValidationError::UnknownTeam(team1.to_string()))?;
        let team2_id = self
            .resolve_team(team2)
            .ok_or_else(|| ValidationError::UnknownTeam(team2.to_string()))?;

        Ok(PlannedMatch {
            team1_id,
            team2_id,
            match_date: date.to_string(),
            venue: venue.to_string(),
        })
    }

    async fn force_team_reload(&mut self) {
        tracing::warn!("stale team lookup, reloading team list");
        if let Err(err) = self.reload_teams().await {
            tracing::error!("team list reload failed: {err}");
        }
    }

    async fn force_match_reload(&mut self) {
        tracing::warn!("stale match lookup, reloading match list");
        if let Err(err) = self.reload_matches().await {
            tracing::error!("match list reload failed: {err}");
        }
    }
}

fn validate_new_team<'a>(
    name: &'a str,
    coach: &'a str,
    year: &str,
) -> Result<(&'a str, &'a str, Option<i32>), ValidationError> {
    let name = utils::require("team name", name)?;
    let coach = utils::require("coach name", coach)?;
    let foundation_year = utils::parse_optional_year(year)?;
    Ok((name, coach, foundation_year))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn team(team_id: i32, name: &str) -> TeamOption {
        TeamOption {
            team_id,
            team_name: name.to_string(),
        }
    }

    fn match_record(match_id: i32, team1: &str, team2: &str, date: &str) -> MatchRecord {
        MatchRecord {
            match_id,
            team1_id: 1,
            team2_id: 2,
            team1_name: Some(team1.to_string()),
            team2_name: Some(team2.to_string()),
            match_date: date.parse().unwrap(),
        }
    }

    fn loaded_coordinator() -> LeagueCoordinator {
        let mut coordinator = LeagueCoordinator::new();
        coordinator.ingest_teams(vec![team(1, "Lions"), team(2, "Tigers")]);
        coordinator
    }

    #[test]
    fn test_team_ingest_builds_map() {
        let coordinator = loaded_coordinator();
        assert_eq!(coordinator.resolve_team("Lions"), Some(1));
        assert_eq!(coordinator.resolve_team("Tigers"), Some(2));
        assert_eq!(coordinator.resolve_team("Bears"), None);
        assert_eq!(coordinator.team_options().len(), 2);
    }

    #[test]
    fn test_team_reingest_replaces_previous_state() {
        let mut coordinator = loaded_coordinator();
        coordinator.ingest_teams(vec![team(3, "Bears")]);
        assert_eq!(coordinator.resolve_team("Lions"), None);
        assert_eq!(coordinator.resolve_team("Bears"), Some(3));
        assert_eq!(coordinator.team_options().len(), 1);
    }

    #[test]
    fn test_duplicate_team_names_last_loaded_wins() {
        let mut coordinator = LeagueCoordinator::new();
        coordinator.ingest_teams(vec![team(1, "Lions"), team(9, "Lions")]);
        assert_eq!(coordinator.resolve_team("Lions"), Some(9));
        // both rows stay selectable even though the map collapses them
        assert_eq!(coordinator.team_options().len(), 2);
    }

    #[test]
    fn test_match_ingest_builds_labels_and_map() {
        let mut coordinator = LeagueCoordinator::new();
        coordinator.ingest_matches(vec![
            match_record(5, "Lions", "Tigers", "2025-03-01"),
            match_record(6, "Tigers", "Lions", "2025-04-01"),
        ]);
        assert_eq!(
            coordinator.match_options()[0].label,
            "5: Lions vs Tigers (2025-03-01)"
        );
        assert_eq!(coordinator.resolve_match("5: Lions vs Tigers (2025-03-01)"), Some(5));
        assert_eq!(coordinator.resolve_match("6: Tigers vs Lions (2025-04-01)"), Some(6));
        assert_eq!(coordinator.resolve_match("7: Bears vs Lions (2025-05-01)"), None);
    }

    #[test]
    fn test_validate_new_match_accepts_known_teams() {
        let coordinator = loaded_coordinator();
        let planned = coordinator
            .validate_new_match("Lions", "Tigers", "2025-03-01", "Stadium X")
            .expect("valid request");
        assert_eq!(planned.team1_id, 1);
        assert_eq!(planned.team2_id, 2);
        assert_eq!(planned.match_date, "2025-03-01");
        assert_eq!(planned.venue, "Stadium X");
    }

    #[test]
    fn test_validate_new_match_rejects_same_team() {
        let coordinator = loaded_coordinator();
        let err = coordinator
            .validate_new_match("Lions", "Lions", "2025-03-01", "Stadium X")
            .unwrap_err();
        assert_eq!(err, ValidationError::SameTeams);
    }

    #[test]
    fn test_validate_new_match_rejects_loose_date() {
        let coordinator = loaded_coordinator();
        let err = coordinator
            .validate_new_match("Lions", "Tigers", "2025-3-1", "Stadium X")
            .unwrap_err();
        assert_eq!(err, ValidationError::BadDate);
    }

    #[test]
    fn test_validate_new_match_rejects_blank_venue() {
        let coordinator = loaded_coordinator();
        let err = coordinator
            .validate_new_match("Lions", "Tigers", "2025-03-01", "  ")
            .unwrap_err();
        assert_eq!(err, ValidationError::Required("venue"));
    }

    #[test]
    fn test_validate_new_match_rejects_unknown_team() {
        let coordinator = loaded_coordinator();
        let err = coordinator
            .validate_new_match("Lions", "Bears", "2025-03-01", "Stadium X")
            .unwrap_err();
        assert_eq!(err, ValidationError::UnknownTeam("Bears".to_string()));
    }

    #[test]
    fn test_validate_new_team() {
        assert_eq!(
            validate_new_team(" Lions ", "Coach A", " 2001 "),
            Ok(("Lions", "Coach A", Some(2001)))
        );
        assert_eq!(
            validate_new_team("Lions", "Coach A", ""),
            Ok(("Lions", "Coach A", None))
        );
        assert_eq!(
            validate_new_team("", "Coach A", ""),
            Err(ValidationError::Required("team name"))
        );
        assert_eq!(
            validate_new_team("Lions", " ", ""),
            Err(ValidationError::Required("coach name"))
        );
        assert_eq!(
            validate_new_team("Lions", "Coach A", "MMXI"),
            Err(ValidationError::NotAnInteger("foundation year"))
        );
    }
}
