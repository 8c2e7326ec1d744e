//! Date/time cleaning: ordered candidate formats with a generic fallback.
//!
//! Parsing tries each configured input format in order (first match wins),
//! then falls back to a fixed list of common formats plus RFC 3339. The
//! cleaned value is rendered through the configured strftime output format;
//! an invalid format string is an error, never a panic.

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, NaiveTime};

use scrub_model::{CleanError, Config, DateTimeCleanerOptions, Domain, Result};

use crate::batch::Cleaner;
use crate::observe::{RuleEvent, RuleObserver};

/// Formats tried by the generic fallback parser, after RFC 3339.
const FALLBACK_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y",
    "%d-%m-%Y",
    "%d.%m.%Y",
    "%Y%m%d",
    "%b %d, %Y",
    "%B %d, %Y",
    "%d %b %Y",
    "%d %B %Y",
];

/// Date used when parsing a bare time of day.
const TIME_ONLY_BASE: (i32, u32, u32) = (2000, 1, 1);

/// Stateless date/time cleaner bound to a [`DateTimeCleanerOptions`] snapshot.
#[derive(Debug, Clone, Default)]
pub struct DateTimeCleaner {
    options: DateTimeCleanerOptions,
}

impl DateTimeCleaner {
    /// Bind the datetime options from `config`.
    pub fn new(config: &Config) -> Self {
        Self::from_options(config.cleaners.datetime.clone())
    }

    pub fn from_options(options: DateTimeCleanerOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &DateTimeCleanerOptions {
        &self.options
    }

    /// Parse a raw value into a `NaiveDateTime` without rendering it.
    ///
    /// Configured input formats are tried in order; date-only formats get
    /// midnight. When none match, the generic fallback runs.
    pub fn parse(&self, raw: &str) -> Result<NaiveDateTime> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(CleanError::TypeCoercion {
                domain: "datetime",
                value: raw.to_string(),
            });
        }
        for format in &self.options.input_formats {
            if let Some(parsed) = parse_with_format(trimmed, format) {
                return Ok(parsed);
            }
        }
        generic_parse(trimmed).ok_or_else(|| CleanError::DateParse {
            value: raw.to_string(),
        })
    }

    /// Render a datetime through the configured output format.
    pub fn render(&self, parsed: NaiveDateTime) -> Result<String> {
        render_with_format(parsed, &self.options.output_format)
    }

    /// Clean and render the date portion only (`YYYY-MM-DD`).
    pub fn clean_date(&self, raw: &str) -> Result<String> {
        let parsed = self.checked_parse(raw)?;
        render_with_format(parsed, "%Y-%m-%d")
    }

    /// Clean and render the time portion only (`HH:MM:SS`).
    pub fn clean_time(&self, raw: &str) -> Result<String> {
        let parsed = self.checked_parse(raw)?;
        render_with_format(parsed, "%H:%M:%S")
    }

    fn checked_parse(&self, raw: &str) -> Result<NaiveDateTime> {
        let parsed = self.parse(raw)?;
        self.check_bounds(parsed, raw)?;
        Ok(parsed)
    }

    fn check_bounds(&self, parsed: NaiveDateTime, raw: &str) -> Result<()> {
        if !self.options.allow_future && parsed > Local::now().naive_local() {
            return Err(CleanError::Validation {
                domain: "datetime",
                value: raw.to_string(),
                reason: "future dates are not allowed".to_string(),
            });
        }
        if let Some(min) = &self.options.min_datetime {
            let bound = self.parse(min)?;
            if parsed < bound {
                return Err(CleanError::Validation {
                    domain: "datetime",
                    value: raw.to_string(),
                    reason: format!("before minimum {min}"),
                });
            }
        }
        if let Some(max) = &self.options.max_datetime {
            let bound = self.parse(max)?;
            if parsed > bound {
                return Err(CleanError::Validation {
                    domain: "datetime",
                    value: raw.to_string(),
                    reason: format!("after maximum {max}"),
                });
            }
        }
        Ok(())
    }
}

impl Cleaner for DateTimeCleaner {
    type Output = String;

    fn domain(&self) -> Domain {
        Domain::DateTime
    }

    fn clean_observed(
        &self,
        raw: &str,
        field: &str,
        observer: &mut dyn RuleObserver,
    ) -> Result<String> {
        let parsed = self.checked_parse(raw)?;
        let rendered = self.render(parsed)?;
        if rendered != raw {
            observer.rule_applied(RuleEvent::new(field, "format_datetime", raw, &rendered));
        }
        Ok(rendered)
    }
}

/// Parse with one strftime format, accepting date-only and time-only
/// formats by filling in midnight or a fixed base date.
fn parse_with_format(value: &str, format: &str) -> Option<NaiveDateTime> {
    let has_date = ["%Y", "%y", "%m", "%d", "%b", "%B", "%e", "%D", "%F"]
        .iter()
        .any(|spec| format.contains(spec));
    let has_time = ["%H", "%I", "%M", "%S", "%T", "%R", "%r"]
        .iter()
        .any(|spec| format.contains(spec));
    match (has_date, has_time) {
        (true, true) => NaiveDateTime::parse_from_str(value, format).ok(),
        (true, false) => NaiveDate::parse_from_str(value, format)
            .ok()
            .map(|date| date.and_time(NaiveTime::MIN)),
        (false, true) => {
            let (year, month, day) = TIME_ONLY_BASE;
            let base = NaiveDate::from_ymd_opt(year, month, day)?;
            NaiveTime::parse_from_str(value, format)
                .ok()
                .map(|time| base.and_time(time))
        }
        (false, false) => None,
    }
}

/// Best-effort parser used when no configured format matches.
fn generic_parse(value: &str) -> Option<NaiveDateTime> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.naive_utc());
    }
    for format in FALLBACK_FORMATS {
        if let Some(parsed) = parse_with_format(value, format) {
            return Some(parsed);
        }
    }
    // Bare time of day, anchored to a fixed date.
    for format in ["%H:%M:%S", "%H:%M"] {
        if let Some(parsed) = parse_with_format(value, format) {
            return Some(parsed);
        }
    }
    None
}

/// Render through a strftime format, rejecting invalid format strings.
fn render_with_format(parsed: NaiveDateTime, format: &str) -> Result<String> {
    let items: Vec<Item<'_>> = StrftimeItems::new(format).collect();
    if items.iter().any(|item| matches!(item, Item::Error)) {
        return Err(CleanError::Format {
            format: format.to_string(),
        });
    }
    Ok(parsed.format_with_items(items.iter()).to_string())
}
