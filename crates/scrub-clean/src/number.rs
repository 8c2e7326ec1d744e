//! Numeric cleaning: formatted string representations to `f64`.
//!
//! Handles currency symbols, thousands separators, trailing percent signs,
//! and accounting-style parenthesized negatives. Cleaning a value already in
//! canonical numeric form returns it unchanged.

use scrub_model::{CleanError, Config, Domain, NumberCleanerOptions, Result};

use crate::batch::Cleaner;
use crate::observe::{RuleEvent, RuleObserver};

/// Stateless number cleaner bound to a [`NumberCleanerOptions`] snapshot.
#[derive(Debug, Clone, Default)]
pub struct NumberCleaner {
    options: NumberCleanerOptions,
}

impl NumberCleaner {
    /// Bind the number options from `config`.
    pub fn new(config: &Config) -> Self {
        Self::from_options(config.cleaners.number.clone())
    }

    pub fn from_options(options: NumberCleanerOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &NumberCleanerOptions {
        &self.options
    }

    /// Clean a percentage expressed without its `%` sign.
    ///
    /// `clean` already divides by 100 when the sign is present; this helper
    /// mirrors it for columns where the sign was stripped upstream.
    pub fn clean_percentage(&self, raw: &str) -> Result<f64> {
        Ok(self.clean(raw)? / 100.0)
    }

    fn strip_formatting(&self, value: &str) -> String {
        value
            .chars()
            .filter(|c| {
                !(self.options.currency_symbols.contains(c)
                    || *c == ','
                    || *c == '_'
                    || c.is_whitespace())
            })
            .collect()
    }

    fn check_bounds(&self, value: f64, raw: &str) -> Result<()> {
        if !self.options.allow_negative && value < 0.0 {
            return Err(CleanError::OutOfRange {
                value,
                min: Some(0.0),
                max: self.options.max_value,
            });
        }
        if !self.options.allow_decimal && value.fract() != 0.0 {
            return Err(CleanError::Validation {
                domain: "number",
                value: raw.to_string(),
                reason: "decimal values are not allowed".to_string(),
            });
        }
        let below = self.options.min_value.is_some_and(|min| value < min);
        let above = self.options.max_value.is_some_and(|max| value > max);
        if below || above {
            return Err(CleanError::OutOfRange {
                value,
                min: self.options.min_value,
                max: self.options.max_value,
            });
        }
        Ok(())
    }
}

impl Cleaner for NumberCleaner {
    type Output = f64;

    fn domain(&self) -> Domain {
        Domain::Number
    }

    fn clean_observed(&self, raw: &str, field: &str, observer: &mut dyn RuleObserver) -> Result<f64> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(CleanError::TypeCoercion {
                domain: "number",
                value: raw.to_string(),
            });
        }

        // Accounting notation: (1,234.56) means -1234.56.
        let (body, negated) = match trimmed.strip_prefix('(').and_then(|s| s.strip_suffix(')')) {
            Some(inner) if !inner.is_empty() => (inner.trim(), true),
            _ => (trimmed, false),
        };

        let (body, percent) = match body.strip_suffix('%') {
            Some(inner) => (inner.trim_end(), true),
            None => (body, false),
        };

        let digits = if self.options.remove_formatting {
            self.strip_formatting(body)
        } else {
            body.to_string()
        };
        if digits != body {
            observer.rule_applied(RuleEvent::new(field, "strip_formatting", body, &digits));
        }

        let mut value: f64 = digits.parse().map_err(|_| CleanError::NumberParse {
            value: raw.to_string(),
        })?;

        if percent {
            value /= 100.0;
            observer.rule_applied(RuleEvent::new(
                field,
                "percent_to_fraction",
                trimmed,
                &value.to_string(),
            ));
        }
        if negated {
            value = -value;
            observer.rule_applied(RuleEvent::new(
                field,
                "accounting_negative",
                trimmed,
                &value.to_string(),
            ));
        }

        self.check_bounds(value, raw)?;
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_forms_pass_through() {
        let cleaner = NumberCleaner::default();
        assert_eq!(cleaner.clean("1234.56").unwrap(), 1234.56);
        assert_eq!(cleaner.clean("-7").unwrap(), -7.0);
        assert_eq!(cleaner.clean("0").unwrap(), 0.0);
    }

    #[test]
    fn currency_and_thousands_separators_strip() {
        let cleaner = NumberCleaner::default();
        assert_eq!(cleaner.clean("$1,234.56").unwrap(), 1234.56);
        assert_eq!(cleaner.clean("\u{20ac}2,000").unwrap(), 2000.0);
        assert_eq!(cleaner.clean("1_000_000").unwrap(), 1_000_000.0);
    }

    #[test]
    fn trailing_percent_divides_by_hundred() {
        let cleaner = NumberCleaner::default();
        assert_eq!(cleaner.clean("98.6%").unwrap(), 0.986);
        assert_eq!(cleaner.clean("100%").unwrap(), 1.0);
    }

    #[test]
    fn parentheses_negate() {
        let cleaner = NumberCleaner::default();
        assert_eq!(cleaner.clean("(42)").unwrap(), -42.0);
        assert_eq!(cleaner.clean("($1,000.50)").unwrap(), -1000.50);
    }

    #[test]
    fn garbage_is_a_parse_error() {
        let cleaner = NumberCleaner::default();
        assert!(matches!(
            cleaner.clean("12abc").unwrap_err(),
            CleanError::NumberParse { .. }
        ));
        assert!(matches!(
            cleaner.clean("--5").unwrap_err(),
            CleanError::NumberParse { .. }
        ));
    }

    #[test]
    fn empty_input_is_a_coercion_error() {
        let cleaner = NumberCleaner::default();
        assert!(matches!(
            cleaner.clean("   ").unwrap_err(),
            CleanError::TypeCoercion { .. }
        ));
    }

    #[test]
    fn range_bounds_are_enforced() {
        let options = NumberCleanerOptions {
            min_value: Some(0.0),
            max_value: Some(100.0),
            ..NumberCleanerOptions::default()
        };
        let cleaner = NumberCleaner::from_options(options);
        assert_eq!(cleaner.clean("55").unwrap(), 55.0);
        assert!(matches!(
            cleaner.clean("101").unwrap_err(),
            CleanError::OutOfRange { .. }
        ));
    }

    #[test]
    fn negative_rejected_when_disallowed() {
        let options = NumberCleanerOptions {
            allow_negative: false,
            ..NumberCleanerOptions::default()
        };
        let cleaner = NumberCleaner::from_options(options);
        assert!(cleaner.clean("(10)").is_err());
        assert!(cleaner.clean("-1").is_err());
    }

    #[test]
    fn decimal_rejected_when_disallowed() {
        let options = NumberCleanerOptions {
            allow_decimal: false,
            ..NumberCleanerOptions::default()
        };
        let cleaner = NumberCleaner::from_options(options);
        assert_eq!(cleaner.clean("12").unwrap(), 12.0);
        assert!(cleaner.clean("12.5").is_err());
    }

    #[test]
    fn clean_is_idempotent_over_canonical_output() {
        let cleaner = NumberCleaner::default();
        let once = cleaner.clean("$1,234.56").unwrap();
        let twice = cleaner.clean(&once.to_string()).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn clean_percentage_divides_unsigned_values() {
        let cleaner = NumberCleaner::default();
        assert_eq!(cleaner.clean_percentage("50").unwrap(), 0.5);
    }
}
