//! Domain-tagged dispatch over the five cleaners.
//!
//! `FieldCleaner` is the closed-variant counterpart of name-keyed cleaner
//! lookup: one variant per domain, constructed from a [`Domain`] tag and a
//! [`Config`]. Output is the domain-tagged [`CleanValue`].

use scrub_model::{BatchErrorPolicy, CleanValue, Config, Domain, Result};
use tracing::warn;

use crate::batch::Cleaner;
use crate::datetime::DateTimeCleaner;
use crate::email::EmailCleaner;
use crate::number::NumberCleaner;
use crate::observe::{NoopObserver, RuleObserver};
use crate::text::TextCleaner;
use crate::url::UrlCleaner;

/// One cleaner per domain, behind a closed enum.
#[derive(Debug, Clone)]
pub enum FieldCleaner {
    Text(TextCleaner),
    Number(NumberCleaner),
    DateTime(DateTimeCleaner),
    Email(EmailCleaner),
    Url(UrlCleaner),
}

impl FieldCleaner {
    /// Build the cleaner for `domain`, binding options from `config`.
    pub fn for_domain(domain: Domain, config: &Config) -> Self {
        match domain {
            Domain::Text => Self::Text(TextCleaner::new(config)),
            Domain::Number => Self::Number(NumberCleaner::new(config)),
            Domain::DateTime => Self::DateTime(DateTimeCleaner::new(config)),
            Domain::Email => Self::Email(EmailCleaner::new(config)),
            Domain::Url => Self::Url(UrlCleaner::new(config)),
        }
    }

    pub fn domain(&self) -> Domain {
        match self {
            Self::Text(_) => Domain::Text,
            Self::Number(_) => Domain::Number,
            Self::DateTime(_) => Domain::DateTime,
            Self::Email(_) => Domain::Email,
            Self::Url(_) => Domain::Url,
        }
    }

    /// Clean one value into its domain-tagged form, reporting applied rules.
    pub fn clean_value_observed(
        &self,
        raw: &str,
        field: &str,
        observer: &mut dyn RuleObserver,
    ) -> Result<CleanValue> {
        match self {
            Self::Text(cleaner) => cleaner
                .clean_observed(raw, field, observer)
                .map(CleanValue::Text),
            Self::Number(cleaner) => cleaner
                .clean_observed(raw, field, observer)
                .map(CleanValue::Number),
            Self::DateTime(cleaner) => cleaner
                .clean_observed(raw, field, observer)
                .map(CleanValue::DateTime),
            Self::Email(cleaner) => cleaner
                .clean_observed(raw, field, observer)
                .map(CleanValue::Email),
            Self::Url(cleaner) => cleaner
                .clean_observed(raw, field, observer)
                .map(CleanValue::Url),
        }
    }

    /// Clean one value into its domain-tagged form.
    pub fn clean_value(&self, raw: &str) -> Result<CleanValue> {
        self.clean_value_observed(raw, "", &mut NoopObserver)
    }

    /// Whether the value cleans successfully. Never errors.
    pub fn is_valid(&self, raw: &str) -> bool {
        self.clean_value(raw).is_ok()
    }

    /// Order- and length-preserving batch variant of
    /// [`FieldCleaner::clean_value_observed`], honoring `policy`.
    pub fn clean_batch_observed<S: AsRef<str>>(
        &self,
        items: &[S],
        policy: BatchErrorPolicy,
        field: &str,
        observer: &mut dyn RuleObserver,
    ) -> Result<Vec<Result<CleanValue>>> {
        let mut outcomes = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            match self.clean_value_observed(item.as_ref(), field, observer) {
                Ok(value) => outcomes.push(Ok(value)),
                Err(error) => match policy {
                    BatchErrorPolicy::FailFast => return Err(error),
                    BatchErrorPolicy::Collect => {
                        warn!(domain = %self.domain(), field, index, %error, "batch item failed, continuing");
                        observer.item_failed(field, &error);
                        outcomes.push(Err(error));
                    }
                },
            }
        }
        Ok(outcomes)
    }

    /// [`FieldCleaner::clean_batch_observed`] without reporting.
    pub fn clean_batch<S: AsRef<str>>(
        &self,
        items: &[S],
        policy: BatchErrorPolicy,
    ) -> Result<Vec<Result<CleanValue>>> {
        self.clean_batch_observed(items, policy, "", &mut NoopObserver)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dispatch_produces_domain_tagged_values() {
        let config = Config::default();
        let text = FieldCleaner::for_domain(Domain::Text, &config);
        assert_eq!(
            text.clean_value(" Hi There ").unwrap(),
            CleanValue::Text("hi there".to_string())
        );

        let number = FieldCleaner::for_domain(Domain::Number, &config);
        assert_eq!(
            number.clean_value("$1,234.56").unwrap(),
            CleanValue::Number(1234.56)
        );

        let email = FieldCleaner::for_domain(Domain::Email, &config);
        assert_eq!(
            email.clean_value("a@Example.com").unwrap(),
            CleanValue::Email("a@example.com".to_string())
        );
    }

    #[test]
    fn batch_collect_preserves_length_and_order() {
        let config = Config::default();
        let number = FieldCleaner::for_domain(Domain::Number, &config);
        let outcomes = number
            .clean_batch(&["1", "bad", "3"], BatchErrorPolicy::Collect)
            .unwrap();
        assert_eq!(outcomes.len(), 3);
        assert_eq!(outcomes[0].as_ref().unwrap(), &CleanValue::Number(1.0));
        assert!(outcomes[1].is_err());
        assert_eq!(outcomes[2].as_ref().unwrap(), &CleanValue::Number(3.0));
    }

    #[test]
    fn batch_fail_fast_aborts_on_first_error() {
        let config = Config::default();
        let number = FieldCleaner::for_domain(Domain::Number, &config);
        assert!(
            number
                .clean_batch(&["1", "bad", "3"], BatchErrorPolicy::FailFast)
                .is_err()
        );
    }
}
