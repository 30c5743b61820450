use thiserror::Error;

/// Rejections raised before a statement touches the database.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0} is required")]
    Required(&'static str),
    #[error("{0} must be an integer")]
    NotAnInteger(&'static str),
    #[error("{0} must be a number")]
    NotANumber(&'static str),
    #[error("match date must be in YYYY-MM-DD format")]
    BadDate,
    #[error("team 1 and team 2 must be different")]
    SameTeams,
    #[error("team '{0}' not found, reload teams and retry")]
    UnknownTeam(String),
    #[error("selected match not recognized, match list has been reloaded")]
    UnknownMatch,
    #[error("one or both selected teams no longer exist")]
    TeamsVanished,
    #[error("match {0} no longer exists, match list has been reloaded")]
    MatchVanished(i32),
}

/// Operation-boundary error: validation failures never reach the database,
/// database failures never escape the operation that hit them.
#[derive(Debug, Error)]
pub enum OpError {
    #[error("{0}")]
    Invalid(#[from] ValidationError),
    #[error(transparent)]
    Db(#[from] anyhow::Error),
}
