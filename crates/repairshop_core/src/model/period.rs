//! Summary periods and their lookback windows.

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use crate::model::repair::DATE_KEY_FORMAT;

/// Lookback window used to filter repairs for summaries and reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Period {
    /// Repairs dated on the current calendar day.
    Daily,
    /// Repairs dated on or after the calendar day seven days back.
    Weekly,
    /// Repairs dated on or after the calendar day thirty days back.
    Monthly,
}

impl Period {
    pub const ALL: [Period; 3] = [Period::Daily, Period::Weekly, Period::Monthly];

    /// Number of whole days the window reaches back from `as_of`.
    pub const fn lookback_days(self) -> i64 {
        match self {
            Self::Daily => 0,
            Self::Weekly => 7,
            Self::Monthly => 30,
        }
    }

    /// Lowercase key used for parsing and output file names.
    pub const fn key(self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
        }
    }

    /// Capitalized label used in titles.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Daily => "Daily",
            Self::Weekly => "Weekly",
            Self::Monthly => "Monthly",
        }
    }

    /// Returns the inclusive lower bound of the window as a `YYYY-MM-DD`
    /// string.
    ///
    /// The bound is truncated to the calendar day and compared literally
    /// against stored `YYYY-MM-DD HH:MM:SS` values, so `Daily` means "since
    /// midnight" rather than a rolling 24 hours.
    pub fn window_start(self, as_of: NaiveDateTime) -> String {
        (as_of - Duration::days(self.lookback_days()))
            .format(DATE_KEY_FORMAT)
            .to_string()
    }
}

impl Display for Period {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// Error returned when parsing an unknown period key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownPeriod(pub String);

impl Display for UnknownPeriod {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unknown period `{}`; expected daily|weekly|monthly",
            self.0
        )
    }
}

impl std::error::Error for UnknownPeriod {}

impl FromStr for Period {
    type Err = UnknownPeriod;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "daily" => Ok(Self::Daily),
            "weekly" => Ok(Self::Weekly),
            "monthly" => Ok(Self::Monthly),
            other => Err(UnknownPeriod(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Period;
    use chrono::NaiveDate;

    #[test]
    fn window_start_truncates_to_calendar_day() {
        let as_of = NaiveDate::from_ymd_opt(2024, 3, 10)
            .unwrap()
            .and_hms_opt(18, 45, 12)
            .unwrap();

        assert_eq!(Period::Daily.window_start(as_of), "2024-03-10");
        assert_eq!(Period::Weekly.window_start(as_of), "2024-03-03");
        assert_eq!(Period::Monthly.window_start(as_of), "2024-02-09");
    }

    #[test]
    fn parse_accepts_keys_case_insensitively() {
        assert_eq!(" Weekly ".parse::<Period>().unwrap(), Period::Weekly);
        let err = "yearly".parse::<Period>().unwrap_err();
        assert!(err.to_string().contains("yearly"));
    }

    #[test]
    fn serializes_as_snake_case_key() {
        let json = serde_json::to_value(Period::Monthly).unwrap();
        assert_eq!(json, "monthly");
        let decoded: Period = serde_json::from_value(json).unwrap();
        assert_eq!(decoded, Period::Monthly);
    }
}
