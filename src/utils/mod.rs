use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::ValidationError;

static DATE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap());

/// Strict YYYY-MM-DD pattern check. Calendar validity is left to the database.
pub fn is_valid_date(date: &str) -> bool {
    DATE_RE.is_match(date)
}

/// Trim a required field, rejecting blank input before any database access.
pub fn require<'a>(field: &'static str, value: &'a str) -> Result<&'a str, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Required(field));
    }
    Ok(trimmed)
}

/// Foundation year is optional; when present it must be an integer.
pub fn parse_optional_year(text: &str) -> Result<Option<i32>, ValidationError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse::<i32>()
        .map(Some)
        .map_err(|_| ValidationError::NotAnInteger("foundation year"))
}

pub fn parse_goals(field: &'static str, text: &str) -> Result<i32, ValidationError> {
    text.trim()
        .parse::<i32>()
        .map_err(|_| ValidationError::NotAnInteger(field))
}

pub fn parse_weight(text: &str) -> Result<f64, ValidationError> {
    text.trim()
        .parse::<f64>()
        .map_err(|_| ValidationError::NotANumber("weight (kg)"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_pattern() {
        assert!(is_valid_date("2024-01-01"));
        assert!(is_valid_date("2025-03-01"));
        assert!(!is_valid_date("2024-1-1"));
        assert!(!is_valid_date("2024-01-1"));
        assert!(!is_valid_date("01-01-2024"));
        assert!(!is_valid_date("2024-01-01 "));
        assert!(!is_valid_date("abcd-ef-gh"));
        assert!(!is_valid_date(""));
    }

    #[test]
    fn test_require_trims() {
        assert_eq!(require("team name", "  Lions "), Ok("Lions"));
        assert_eq!(
            require("team name", "   "),
            Err(ValidationError::Required("team name"))
        );
    }

    #[test]
    fn test_parse_optional_year() {
        assert_eq!(parse_optional_year(""), Ok(None));
        assert_eq!(parse_optional_year(" 2001 "), Ok(Some(2001)));
        assert_eq!(
            parse_optional_year("20x1"),
            Err(ValidationError::NotAnInteger("foundation year"))
        );
    }

    #[test]
    fn test_parse_goals() {
        assert_eq!(parse_goals("team 1 goals", "2"), Ok(2));
        assert_eq!(parse_goals("team 1 goals", " 0 "), Ok(0));
        assert!(parse_goals("team 1 goals", "two").is_err());
        assert!(parse_goals("team 1 goals", "1.5").is_err());
    }

    #[test]
    fn test_parse_weight() {
        assert_eq!(parse_weight("82.5"), Ok(82.5));
        assert!(parse_weight("heavy").is_err());
    }
}
