//! Email address cleaning and structural validation.
//!
//! Normalization lowercases the domain part only; the local part is
//! case-preserved per RFC 5321. Validation is a minimal structural grammar
//! (single `@`, charset-checked local part, dotted alphanumeric domain
//! labels, alphabetic TLD), checked character by character.

use scrub_model::{CleanError, Config, Domain, EmailCleanerOptions, Result};

use crate::batch::Cleaner;
use crate::observe::{RuleEvent, RuleObserver};

/// Local-part characters accepted beyond alphanumerics when
/// `allow_special_chars` is on.
const LOCAL_SPECIALS: &str = "._%+-";

/// Stateless email cleaner bound to an [`EmailCleanerOptions`] snapshot.
#[derive(Debug, Clone, Default)]
pub struct EmailCleaner {
    options: EmailCleanerOptions,
}

impl EmailCleaner {
    /// Bind the email options from `config`.
    pub fn new(config: &Config) -> Self {
        Self::from_options(config.cleaners.email.clone())
    }

    pub fn from_options(options: EmailCleanerOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &EmailCleanerOptions {
        &self.options
    }

    /// Domain part of a valid address.
    pub fn extract_domain(&self, raw: &str) -> Result<String> {
        let cleaned = self.clean(raw)?;
        // clean() guarantees exactly one '@'.
        Ok(cleaned.rsplit('@').next().unwrap_or_default().to_string())
    }

    /// Local part of a valid address.
    pub fn extract_local_part(&self, raw: &str) -> Result<String> {
        let cleaned = self.clean(raw)?;
        Ok(cleaned.split('@').next().unwrap_or_default().to_string())
    }

    fn validate_local(&self, local: &str, raw: &str) -> Result<()> {
        if local.is_empty() {
            return Err(invalid(raw, "empty local part"));
        }
        let ok = local.chars().all(|c| {
            c.is_ascii_alphanumeric()
                || if self.options.allow_special_chars {
                    LOCAL_SPECIALS.contains(c)
                } else {
                    c == '_'
                }
        });
        if !ok {
            return Err(invalid(raw, "local part contains invalid characters"));
        }
        Ok(())
    }

    fn validate_domain(&self, domain: &str, raw: &str) -> Result<()> {
        let labels: Vec<&str> = domain.split('.').collect();
        if labels.len() < 2 {
            return Err(invalid(raw, "domain must contain a dot"));
        }
        if !self.options.allow_subdomains && labels.len() > 2 {
            return Err(invalid(raw, "subdomains are not allowed"));
        }
        for label in &labels {
            if label.is_empty() {
                return Err(invalid(raw, "empty domain label"));
            }
            if label.starts_with('-') || label.ends_with('-') {
                return Err(invalid(raw, "domain label starts or ends with a hyphen"));
            }
            if !label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
                return Err(invalid(raw, "domain contains invalid characters"));
            }
        }
        let tld = labels[labels.len() - 1];
        if tld.len() < 2 || !tld.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(invalid(raw, "top-level domain must be alphabetic"));
        }
        if let Some(valid_domains) = &self.options.valid_domains
            && !valid_domains
                .iter()
                .any(|allowed| allowed.eq_ignore_ascii_case(domain))
        {
            return Err(invalid(raw, "domain is not in the allow-list"));
        }
        Ok(())
    }
}

impl Cleaner for EmailCleaner {
    type Output = String;

    fn domain(&self) -> Domain {
        Domain::Email
    }

    fn clean_observed(
        &self,
        raw: &str,
        field: &str,
        observer: &mut dyn RuleObserver,
    ) -> Result<String> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(CleanError::TypeCoercion {
                domain: "email",
                value: raw.to_string(),
            });
        }
        if trimmed.len() > self.options.max_length {
            return Err(invalid(raw, "address exceeds maximum length"));
        }

        let mut parts = trimmed.split('@');
        let (local, domain) = match (parts.next(), parts.next(), parts.next()) {
            (Some(local), Some(domain), None) => (local, domain),
            _ => return Err(invalid(raw, "address must contain exactly one '@'")),
        };

        self.validate_local(local, raw)?;
        let domain_lower = domain.to_ascii_lowercase();
        self.validate_domain(&domain_lower, raw)?;

        let normalized = format!("{local}@{domain_lower}");
        if normalized != raw {
            observer.rule_applied(RuleEvent::new(field, "normalize_email", raw, &normalized));
        }
        Ok(normalized)
    }
}

fn invalid(value: &str, reason: &str) -> CleanError {
    CleanError::Validation {
        domain: "email",
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_is_lowercased_local_part_preserved() {
        let cleaner = EmailCleaner::default();
        assert_eq!(
            cleaner.clean("  John.Doe@EXAMPLE.Com ").unwrap(),
            "John.Doe@example.com"
        );
    }

    #[test]
    fn structural_failures_are_validation_errors() {
        let cleaner = EmailCleaner::default();
        for bad in ["plainaddress", "two@@example.com", "a@b", "user@.com", "@example.com"] {
            assert!(
                matches!(cleaner.clean(bad).unwrap_err(), CleanError::Validation { .. }),
                "expected validation error for {bad:?}"
            );
        }
    }

    #[test]
    fn is_valid_never_errors() {
        let cleaner = EmailCleaner::default();
        assert!(cleaner.is_valid("user@example.com"));
        assert!(!cleaner.is_valid("not-an-email"));
        assert!(!cleaner.is_valid(""));
    }

    #[test]
    fn subdomains_follow_the_option() {
        let cleaner = EmailCleaner::default();
        assert!(cleaner.is_valid("user@mail.example.com"));

        let strict = EmailCleaner::from_options(EmailCleanerOptions {
            allow_subdomains: false,
            ..EmailCleanerOptions::default()
        });
        assert!(!strict.is_valid("user@mail.example.com"));
        assert!(strict.is_valid("user@example.com"));
    }

    #[test]
    fn special_chars_in_local_part_follow_the_option() {
        let strict = EmailCleaner::from_options(EmailCleanerOptions {
            allow_special_chars: false,
            ..EmailCleanerOptions::default()
        });
        assert!(strict.is_valid("user_name@example.com"));
        assert!(!strict.is_valid("user.name@example.com"));
    }

    #[test]
    fn domain_allow_list_is_enforced() {
        let cleaner = EmailCleaner::from_options(EmailCleanerOptions {
            valid_domains: Some(vec!["example.com".to_string()]),
            ..EmailCleanerOptions::default()
        });
        assert!(cleaner.is_valid("user@Example.COM"));
        assert!(!cleaner.is_valid("user@other.org"));
    }

    #[test]
    fn extract_helpers_split_a_valid_address() {
        let cleaner = EmailCleaner::default();
        assert_eq!(cleaner.extract_domain("User@Example.com").unwrap(), "example.com");
        assert_eq!(cleaner.extract_local_part("User@Example.com").unwrap(), "User");
    }
}
