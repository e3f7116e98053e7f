//! Domain Value Objects
//!
//! Validated pieces of a to-do: title, priority, due date and due time.
//! Constructors return the user-facing message as an `AppError` so callers
//! can collect them per field.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveTime};
use kernel::error::app_error::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// Maximum title length in characters
pub const TITLE_MAX_LENGTH: usize = 100;

/// Wire format of `due_date`
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Wire format of `time` in responses
pub const TIME_FORMAT: &str = "%H:%M:%S";

/// Accepted input formats for `time`
const TIME_INPUT_FORMATS: [&str; 2] = ["%H:%M:%S", "%H:%M"];

// ============================================================================
// Title
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Title(String);

impl Title {
    pub fn new(raw: impl Into<String>) -> AppResult<Self> {
        let raw = raw.into();
        let title = raw.trim();

        if title.is_empty() {
            return Err(AppError::bad_request("This field may not be blank."));
        }

        if title.chars().count() > TITLE_MAX_LENGTH {
            return Err(AppError::bad_request(format!(
                "Ensure this field has no more than {} characters.",
                TITLE_MAX_LENGTH
            )));
        }

        Ok(Self(title.to_string()))
    }

    /// Create from database value (assumed already validated)
    pub fn from_db(title: impl Into<String>) -> Self {
        Self(title.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// ============================================================================
// Priority
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    #[default]
    Low,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }
}

impl FromStr for Priority {
    type Err = AppError;

    fn from_str(s: &str) -> AppResult<Self> {
        match s {
            "high" => Ok(Priority::High),
            "medium" => Ok(Priority::Medium),
            "low" => Ok(Priority::Low),
            _ => Err(AppError::bad_request("Invalid priority level!")),
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Due date
// ============================================================================

/// A due date that was not in the past when it was set
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct DueDate(NaiveDate);

impl DueDate {
    /// `today` is the caller's notion of the current date (UTC in practice)
    pub fn new(date: NaiveDate, today: NaiveDate) -> AppResult<Self> {
        if date < today {
            return Err(AppError::bad_request("Due date cannot be in the past!"));
        }
        Ok(Self(date))
    }

    /// Parse `YYYY-MM-DD` and check it against `today`
    pub fn parse(raw: &str, today: NaiveDate) -> AppResult<Self> {
        let date = NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).map_err(|_| {
            AppError::bad_request(
                "Date has wrong format. Use one of these formats instead: YYYY-MM-DD.",
            )
        })?;
        Self::new(date, today)
    }

    /// Create from database value; stored dates may since have passed
    pub fn from_db(date: NaiveDate) -> Self {
        Self(date)
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }
}

// ============================================================================
// Due time
// ============================================================================

/// Parse `HH:MM` or `HH:MM:SS`
pub fn parse_due_time(raw: &str) -> AppResult<NaiveTime> {
    let raw = raw.trim();
    TIME_INPUT_FORMATS
        .iter()
        .find_map(|format| NaiveTime::parse_from_str(raw, format).ok())
        .ok_or_else(|| {
            AppError::bad_request(
                "Time has wrong format. Use one of these formats instead: hh:mm[:ss].",
            )
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_title() {
        assert_eq!(Title::new("  Buy milk ").unwrap().as_str(), "Buy milk");
        assert!(Title::new("   ").is_err());
        assert!(Title::new("x".repeat(TITLE_MAX_LENGTH)).is_ok());
        assert!(Title::new("x".repeat(TITLE_MAX_LENGTH + 1)).is_err());
    }

    #[test]
    fn test_priority() {
        assert_eq!(Priority::default(), Priority::Low);
        assert_eq!("high".parse::<Priority>().unwrap(), Priority::High);
        assert_eq!("medium".parse::<Priority>().unwrap(), Priority::Medium);

        let err = "urgent".parse::<Priority>().unwrap_err();
        assert_eq!(err.message(), "Invalid priority level!");
        assert!("High".parse::<Priority>().is_err());

        assert_eq!(serde_json::to_string(&Priority::Medium).unwrap(), "\"medium\"");
    }

    #[test]
    fn test_due_date_today_and_past() {
        let today = date(2024, 6, 15);
        assert!(DueDate::new(today, today).is_ok());
        assert!(DueDate::new(date(2024, 6, 16), today).is_ok());

        let err = DueDate::new(date(2024, 6, 14), today).unwrap_err();
        assert_eq!(err.message(), "Due date cannot be in the past!");
    }

    #[test]
    fn test_due_date_parse() {
        let today = date(2024, 6, 15);
        assert_eq!(
            DueDate::parse("2024-07-01", today).unwrap().date(),
            date(2024, 7, 1)
        );
        assert!(DueDate::parse("01/07/2024", today).is_err());
        assert!(DueDate::parse("2024-02-31", today).is_err());
    }

    #[test]
    fn test_parse_due_time() {
        let expected = NaiveTime::from_hms_opt(23, 59, 0).unwrap();
        assert_eq!(parse_due_time("23:59").unwrap(), expected);
        assert_eq!(parse_due_time("23:59:00").unwrap(), expected);
        assert_eq!(
            parse_due_time("07:05:09").unwrap().format(TIME_FORMAT).to_string(),
            "07:05:09"
        );
        assert!(parse_due_time("24:00").is_err());
        assert!(parse_due_time("noon").is_err());
    }
}
