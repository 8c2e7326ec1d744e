//! Datetime feature extraction: calendar parts, durations, ages.

use chrono::{Datelike, Local, NaiveDateTime, Timelike};
use scrub_clean::DateTimeCleaner;
use scrub_model::{Config, Result};
use serde::{Deserialize, Serialize};

/// Calendar and clock components of a single parsed value.
///
/// `weekday` is zero-based from Monday, matching
/// [`chrono::Weekday::num_days_from_monday`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateTimeParts {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
    pub weekday: u32,
    pub is_weekend: bool,
    pub quarter: u32,
}

/// Signed elapsed time between two parsed values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DurationParts {
    pub days: i64,
    pub seconds: i64,
}

/// Extracts features from raw datetime strings, parsing them through the
/// same format list the datetime cleaner uses.
#[derive(Debug, Clone)]
pub struct DateTimeTransformer {
    cleaner: DateTimeCleaner,
}

impl DateTimeTransformer {
    pub fn new(config: &Config) -> Self {
        Self { cleaner: DateTimeCleaner::new(config) }
    }

    /// Break a raw value into its calendar and clock parts.
    pub fn extract_parts(&self, raw: &str) -> Result<DateTimeParts> {
        let parsed = self.cleaner.parse(raw)?;
        Ok(parts_of(parsed))
    }

    /// Elapsed time from `reference` to `value`; negative when `value` is
    /// earlier than `reference`.
    pub fn duration_since(&self, value: &str, reference: &str) -> Result<DurationParts> {
        let value = self.cleaner.parse(value)?;
        let reference = self.cleaner.parse(reference)?;
        let delta = value - reference;
        Ok(DurationParts { days: delta.num_days(), seconds: delta.num_seconds() })
    }

    /// Whole years from `birth` to `reference`, the way ages are spoken:
    /// the count only ticks over on the anniversary.
    pub fn age(&self, birth: &str, reference: &str) -> Result<i32> {
        let birth = self.cleaner.parse(birth)?;
        let reference = self.cleaner.parse(reference)?;
        Ok(years_between(birth, reference))
    }

    /// [`Self::age`] against the local clock.
    pub fn age_as_of_today(&self, birth: &str) -> Result<i32> {
        let birth = self.cleaner.parse(birth)?;
        Ok(years_between(birth, Local::now().naive_local()))
    }
}

impl Default for DateTimeTransformer {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

fn parts_of(value: NaiveDateTime) -> DateTimeParts {
    let weekday = value.weekday().num_days_from_monday();
    DateTimeParts {
        year: value.year(),
        month: value.month(),
        day: value.day(),
        hour: value.hour(),
        minute: value.minute(),
        second: value.second(),
        weekday,
        is_weekend: weekday >= 5,
        quarter: (value.month() - 1) / 3 + 1,
    }
}

fn years_between(birth: NaiveDateTime, reference: NaiveDateTime) -> i32 {
    let mut years = reference.year() - birth.year();
    if (reference.month(), reference.day()) < (birth.month(), birth.day()) {
        years -= 1;
    }
    years
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parts_cover_calendar_and_clock() {
        let transformer = DateTimeTransformer::default();
        let parts = transformer.extract_parts("2023-06-15 14:30:45").unwrap();
        assert_eq!(parts.year, 2023);
        assert_eq!(parts.month, 6);
        assert_eq!(parts.day, 15);
        assert_eq!(parts.hour, 14);
        assert_eq!(parts.minute, 30);
        assert_eq!(parts.second, 45);
        // 2023-06-15 is a Thursday.
        assert_eq!(parts.weekday, 3);
        assert!(!parts.is_weekend);
        assert_eq!(parts.quarter, 2);
    }

    #[test]
    fn saturday_is_weekend() {
        let transformer = DateTimeTransformer::default();
        let parts = transformer.extract_parts("2023-06-17").unwrap();
        assert_eq!(parts.weekday, 5);
        assert!(parts.is_weekend);
    }

    #[test]
    fn quarters_follow_the_calendar() {
        let transformer = DateTimeTransformer::default();
        for (raw, quarter) in [
            ("2023-01-01", 1),
            ("2023-03-31", 1),
            ("2023-04-01", 2),
            ("2023-12-31", 4),
        ] {
            assert_eq!(transformer.extract_parts(raw).unwrap().quarter, quarter);
        }
    }

    #[test]
    fn duration_is_signed() {
        let transformer = DateTimeTransformer::default();
        let forward = transformer
            .duration_since("2023-06-03", "2023-06-01")
            .unwrap();
        assert_eq!(forward.days, 2);
        assert_eq!(forward.seconds, 2 * 86_400);
        let backward = transformer
            .duration_since("2023-06-01", "2023-06-03")
            .unwrap();
        assert_eq!(backward.days, -2);
    }

    #[test]
    fn age_ticks_over_on_the_anniversary() {
        let transformer = DateTimeTransformer::default();
        assert_eq!(transformer.age("1990-06-15", "2023-06-14").unwrap(), 32);
        assert_eq!(transformer.age("1990-06-15", "2023-06-15").unwrap(), 33);
        assert_eq!(transformer.age("1990-06-15", "2023-06-16").unwrap(), 33);
    }

    #[test]
    fn unparseable_input_propagates_the_parse_error() {
        let transformer = DateTimeTransformer::default();
        assert!(transformer.extract_parts("not a date").is_err());
        assert!(transformer.duration_since("2023-01-01", "garbage").is_err());
    }
}
