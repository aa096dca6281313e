use std::fmt::Display;

use anyhow::Result;
use chrono::{DateTime, Local, NaiveDate, NaiveTime};
use chrono_english::parse_date_string;
use clap::{CommandFactory, ValueEnum};

use crate::{
    storage::entities::WALL_CLOCK_FORMAT,
    utils::time::truncate_to_minute,
};

use super::Args;

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum DateStyle {
    Uk,
    Us,
}

impl From<DateStyle> for chrono_english::Dialect {
    fn from(value: DateStyle) -> Self {
        match value {
            DateStyle::Uk => Self::Uk,
            DateStyle::Us => Self::Us,
        }
    }
}

impl Display for DateStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DateStyle::Uk => write!(f, "uk"),
            DateStyle::Us => write!(f, "us"),
        }
    }
}

/// Resolves the day a command targets. No input means today. `YYYY-MM-DD` is taken as is, the
/// rest goes through natural language parsing ("yesterday", "15/03/2025", "last friday").
pub fn parse_day(
    input: Option<&str>,
    now: DateTime<Local>,
    date_style: DateStyle,
) -> Result<NaiveDate> {
    let Some(input) = input else {
        return Ok(now.date_naive());
    };
    if let Ok(date) = input.parse::<NaiveDate>() {
        return Ok(date);
    }
    match parse_date_string(input, now, date_style.into()) {
        Ok(v) => Ok(v.with_timezone(&Local).date_naive()),
        Err(e) => Err(Args::command()
            .error(
                clap::error::ErrorKind::ValueValidation,
                format!("Failed to validate date {input:?}: {e}"),
            )
            .into()),
    }
}

/// Resolves the wall clock time for a stamp. No input means now.
pub fn parse_wall_clock(input: Option<&str>, now: DateTime<Local>) -> Result<NaiveTime> {
    let Some(input) = input else {
        return Ok(truncate_to_minute(now.time()));
    };
    NaiveTime::parse_from_str(input, WALL_CLOCK_FORMAT).map_err(|e| {
        Args::command()
            .error(
                clap::error::ErrorKind::ValueValidation,
                format!("Failed to validate time {input:?}, expected HH:MM: {e}"),
            )
            .into()
    })
}

#[cfg(test)]
mod tests {
    use anyhow::Result;
    use chrono::{DateTime, Local, NaiveDate, NaiveTime, TimeZone};

    use super::{parse_day, parse_wall_clock, DateStyle};

    fn now() -> DateTime<Local> {
        Local.with_ymd_and_hms(2025, 3, 14, 9, 41, 27).unwrap()
    }

    #[test]
    fn test_parse_day() -> Result<()> {
        let today = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();
        assert_eq!(parse_day(None, now(), DateStyle::Uk)?, today);
        assert_eq!(
            parse_day(Some("2025-02-01"), now(), DateStyle::Uk)?,
            NaiveDate::from_ymd_opt(2025, 2, 1).unwrap()
        );
        assert_eq!(
            parse_day(Some("yesterday"), now(), DateStyle::Uk)?,
            today.pred_opt().unwrap()
        );
        assert!(parse_day(Some("not a date at all"), now(), DateStyle::Uk).is_err());
        Ok(())
    }

    #[test]
    fn test_parse_wall_clock() -> Result<()> {
        assert_eq!(
            parse_wall_clock(None, now())?,
            NaiveTime::from_hms_opt(9, 41, 0).unwrap()
        );
        assert_eq!(
            parse_wall_clock(Some("17:05"), now())?,
            NaiveTime::from_hms_opt(17, 5, 0).unwrap()
        );
        assert!(parse_wall_clock(Some("5pm"), now()).is_err());
        Ok(())
    }
}
