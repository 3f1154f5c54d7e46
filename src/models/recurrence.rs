//! Recurrence schedules for transactions
//!
//! A closed set of schedules with a pure `next_date` function dispatching on
//! the variant. Monthly and yearly days are restricted to 1..=28 so every
//! scheduled day exists in every month.
//!
//! Recurrences serialize as compact tokens (`NONE`, `WEEKLY:<n>`,
//! `MONTHLY:<n>`, `YEARLY:<mm>-<dd>`) in both JSON and CSV.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::month::Month;
use crate::error::{LedgerError, LedgerResult};

/// A transaction recurrence schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Recurrence {
    /// No recurrence
    #[default]
    None,
    /// Every week on a day (1 = Monday .. 7 = Sunday)
    Weekly { day_of_week: u32 },
    /// Every month on a day (1..=28)
    Monthly { day: u32 },
    /// Every year on a month and day (day 1..=28)
    Yearly { month: u32, day: u32 },
}

impl Recurrence {
    /// Weekly recurrence, validating the day of week
    pub fn weekly(day_of_week: u32) -> LedgerResult<Self> {
        if !(1..=7).contains(&day_of_week) {
            return Err(LedgerError::Validation(format!(
                "Weekly dayOfWeek must be 1-7, got {}",
                day_of_week
            )));
        }
        Ok(Self::Weekly { day_of_week })
    }

    /// Monthly recurrence, validating the day
    pub fn monthly(day: u32) -> LedgerResult<Self> {
        if !(1..=28).contains(&day) {
            return Err(LedgerError::Validation(format!(
                "Monthly day must be between 1 and 28, got {}",
                day
            )));
        }
        Ok(Self::Monthly { day })
    }

    /// Yearly recurrence, validating month and day
    pub fn yearly(month: u32, day: u32) -> LedgerResult<Self> {
        if !(1..=12).contains(&month) {
            return Err(LedgerError::Validation(format!(
                "Yearly month must be between 1 and 12, got {}",
                month
            )));
        }
        if !(1..=28).contains(&day) {
            return Err(LedgerError::Validation(format!(
                "Yearly day must be between 1 and 28, got {}",
                day
            )));
        }
        Ok(Self::Yearly { month, day })
    }

    /// Next occurrence on or after `from`, or `None` for non-recurring
    pub fn next_date(&self, from: NaiveDate) -> Option<NaiveDate> {
        match *self {
            Self::None => None,
            Self::Weekly { day_of_week } => {
                let current = from.weekday().number_from_monday();
                let days_ahead = if current <= day_of_week {
                    day_of_week - current
                } else {
                    7 - (current - day_of_week)
                };
                Some(from + Duration::days(days_ahead as i64))
            }
            Self::Monthly { day } => {
                let month = Month::from_date(from);
                if from.day() <= day {
                    month.at_day(day)
                } else {
                    month.next().at_day(day)
                }
            }
            Self::Yearly { month, day } => {
                let this_year = NaiveDate::from_ymd_opt(from.year(), month, day)?;
                if from <= this_year {
                    Some(this_year)
                } else {
                    NaiveDate::from_ymd_opt(from.year() + 1, month, day)
                }
            }
        }
    }

    /// Parse the compact token form
    pub fn parse(token: &str) -> LedgerResult<Self> {
        let value = token.trim();
        if value.is_empty() || value.eq_ignore_ascii_case("NONE") {
            return Ok(Self::None);
        }
        let invalid = || LedgerError::Validation(format!("Invalid recurrence '{}'", token));
        let (tag, rest) = value.split_once(':').ok_or_else(invalid)?;
        if tag.eq_ignore_ascii_case("WEEKLY") {
            let day: u32 = rest.trim().parse().map_err(|_| invalid())?;
            Self::weekly(day).map_err(|_| invalid())
        } else if tag.eq_ignore_ascii_case("MONTHLY") {
            let day: u32 = rest.trim().parse().map_err(|_| invalid())?;
            Self::monthly(day).map_err(|_| invalid())
        } else if tag.eq_ignore_ascii_case("YEARLY") {
            let (month, day) = rest.trim().split_once('-').ok_or_else(invalid)?;
            let month: u32 = month.parse().map_err(|_| invalid())?;
            let day: u32 = day.parse().map_err(|_| invalid())?;
            Self::yearly(month, day).map_err(|_| invalid())
        } else {
            Err(invalid())
        }
    }
}

impl fmt::Display for Recurrence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::None => write!(f, "NONE"),
            Self::Weekly { day_of_week } => write!(f, "WEEKLY:{}", day_of_week),
            Self::Monthly { day } => write!(f, "MONTHLY:{}", day),
            Self::Yearly { month, day } => write!(f, "YEARLY:{:02}-{:02}", month, day),
        }
    }
}

impl FromStr for Recurrence {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Recurrence {
    type Error = LedgerError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Recurrence> for String {
    fn from(recurrence: Recurrence) -> String {
        recurrence.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_constructor_ranges() {
        assert!(Recurrence::weekly(0).is_err());
        assert!(Recurrence::weekly(8).is_err());
        assert!(Recurrence::monthly(0).is_err());
        assert!(Recurrence::monthly(29).is_err());
        assert!(Recurrence::yearly(13, 1).is_err());
        assert!(Recurrence::yearly(2, 29).is_err());
    }

    #[test]
    fn test_none_has_no_next_date() {
        assert_eq!(Recurrence::None.next_date(date(2024, 1, 1)), None);
    }

    #[test]
    fn test_weekly_next_date() {
        let fridays = Recurrence::weekly(5).unwrap();
        // 2024-01-01 is a Monday
        assert_eq!(fridays.next_date(date(2024, 1, 1)), Some(date(2024, 1, 5)));
        // on the day itself
        assert_eq!(fridays.next_date(date(2024, 1, 5)), Some(date(2024, 1, 5)));
        // Saturday rolls to next week
        assert_eq!(fridays.next_date(date(2024, 1, 6)), Some(date(2024, 1, 12)));
    }

    #[test]
    fn test_monthly_next_date() {
        let fifteenth = Recurrence::monthly(15).unwrap();
        assert_eq!(
            fifteenth.next_date(date(2024, 1, 10)),
            Some(date(2024, 1, 15))
        );
        assert_eq!(
            fifteenth.next_date(date(2024, 1, 16)),
            Some(date(2024, 2, 15))
        );
        // December rolls into the next year
        assert_eq!(
            fifteenth.next_date(date(2024, 12, 20)),
            Some(date(2025, 1, 15))
        );
    }

    #[test]
    fn test_yearly_next_date() {
        let tax_day = Recurrence::yearly(4, 15).unwrap();
        assert_eq!(
            tax_day.next_date(date(2024, 1, 1)),
            Some(date(2024, 4, 15))
        );
        assert_eq!(
            tax_day.next_date(date(2024, 4, 15)),
            Some(date(2024, 4, 15))
        );
        assert_eq!(
            tax_day.next_date(date(2024, 5, 1)),
            Some(date(2025, 4, 15))
        );
    }

    #[test]
    fn test_token_round_trip() {
        for r in [
            Recurrence::None,
            Recurrence::weekly(3).unwrap(),
            Recurrence::monthly(1).unwrap(),
            Recurrence::yearly(2, 14).unwrap(),
        ] {
            assert_eq!(Recurrence::parse(&r.to_string()).unwrap(), r);
        }
        assert_eq!(
            Recurrence::yearly(2, 14).unwrap().to_string(),
            "YEARLY:02-14"
        );
    }

    #[test]
    fn test_parse_is_case_insensitive_and_blank_is_none() {
        assert_eq!(Recurrence::parse("none").unwrap(), Recurrence::None);
        assert_eq!(Recurrence::parse("").unwrap(), Recurrence::None);
        assert_eq!(
            Recurrence::parse("weekly:1").unwrap(),
            Recurrence::weekly(1).unwrap()
        );
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(Recurrence::parse("DAILY").is_err());
        assert!(Recurrence::parse("WEEKLY:8").is_err());
        assert!(Recurrence::parse("MONTHLY:x").is_err());
        assert!(Recurrence::parse("YEARLY:13-01").is_err());
        assert!(Recurrence::parse("YEARLY:4").is_err());
    }
}
