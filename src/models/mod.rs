use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Tournament all teams and matches belong to in this version; not
/// configurable through the interface.
pub const TOURNAMENT_ID: i32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Team {
    pub team_id: i32,
    pub team_name: String,
    pub coach_name: String,
    pub foundation_year: Option<i32>,
    pub tournament_id: i32,
}

/// Match row joined with both team names. Either name is NULL when the team
/// has been deleted out from under the match.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MatchRecord {
    pub match_id: i32,
    pub team1_id: i32,
    pub team2_id: i32,
    pub team1_name: Option<String>,
    pub team2_name: Option<String>,
    pub match_date: NaiveDate,
}

impl MatchRecord {
    /// Human-readable selection label: `"{id}: {team1} vs {team2} ({date})"`,
    /// with a `Team#<id>` placeholder standing in for a deleted team.
    pub fn label(&self) -> String {
        format!(
            "{}: {} vs {} ({})",
            self.match_id,
            team_or_placeholder(self.team1_name.as_deref(), self.team1_id),
            team_or_placeholder(self.team2_name.as_deref(), self.team2_id),
            self.match_date.format("%Y-%m-%d")
        )
    }
}

fn team_or_placeholder(name: Option<&str>, team_id: i32) -> String {
    match name {
        Some(name) => name.to_string(),
        None => format!("Team#{}", team_id),
    }
}

/// Value-carrying selection record: label plus the identifier it stands for,
/// so identifiers are never re-derived from display text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchOption {
    pub match_id: i32,
    pub label: String,
}

impl From<&MatchRecord> for MatchOption {
    fn from(record: &MatchRecord) -> Self {
        Self {
            match_id: record.match_id,
            label: record.label(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct TeamOption {
    pub team_id: i32,
    pub team_name: String,
}

/// One row of the read-only `Leaderboard` view; all aggregation lives in the
/// database.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct LeaderboardRow {
    pub team_id: i32,
    pub team_name: String,
    pub matches_played: i64,
    pub wins: i64,
    pub draws: i64,
    pub losses: i64,
    pub goals_for: i64,
    pub total_points: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(team1_name: Option<&str>, team2_name: Option<&str>) -> MatchRecord {
        MatchRecord {
            match_id: 12,
            team1_id: 3,
            team2_id: 7,
            team1_name: team1_name.map(str::to_string),
            team2_name: team2_name.map(str::to_string),
            match_date: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
        }
    }

    #[test]
    fn test_label_with_both_teams() {
        let rec = record(Some("Lions"), Some("Tigers"));
        assert_eq!(rec.label(), "12: Lions vs Tigers (2025-03-01)");
    }

    #[test]
    fn test_label_with_deleted_team() {
        let rec = record(Some("Lions"), None);
        assert_eq!(rec.label(), "12: Lions vs Team#7 (2025-03-01)");
    }

    #[test]
    fn test_match_option_carries_id() {
        let rec = record(None, None);
        let option = MatchOption::from(&rec);
        assert_eq!(option.match_id, 12);
        assert_eq!(option.label, "12: Team#3 vs Team#7 (2025-03-01)");
    }
}
