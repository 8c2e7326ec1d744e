//! URL cleaning and structural validation.
//!
//! Normalization lowercases the scheme and host, optionally adds a default
//! scheme, strips `www.`, and drops the query string and/or fragment per
//! configuration. Path, query, and fragment casing is preserved. The URL is
//! decomposed by hand; there is no general-purpose parser behind this, only
//! the minimal scheme://host[:port][/path][?query][#fragment] grammar.

use scrub_model::{CleanError, Config, Domain, Result, UrlCleanerOptions};

use crate::batch::Cleaner;
use crate::observe::{RuleEvent, RuleObserver};

/// Stateless URL cleaner bound to a [`UrlCleanerOptions`] snapshot.
#[derive(Debug, Clone, Default)]
pub struct UrlCleaner {
    options: UrlCleanerOptions,
}

/// Decomposed URL pieces, pre-normalization.
#[derive(Debug)]
struct UrlParts<'a> {
    scheme: String,
    host: String,
    port: Option<&'a str>,
    path: &'a str,
    query: Option<&'a str>,
    fragment: Option<&'a str>,
}

impl UrlCleaner {
    /// Bind the URL options from `config`.
    pub fn new(config: &Config) -> Self {
        Self::from_options(config.cleaners.url.clone())
    }

    pub fn from_options(options: UrlCleanerOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &UrlCleanerOptions {
        &self.options
    }

    /// Host of a valid URL (port excluded).
    pub fn extract_host(&self, raw: &str) -> Result<String> {
        let parts = self.split(raw.trim())?;
        Ok(parts.host)
    }

    /// Path of a valid URL (empty when absent).
    pub fn extract_path(&self, raw: &str) -> Result<String> {
        let parts = self.split(raw.trim())?;
        Ok(parts.path.to_string())
    }

    fn split<'a>(&self, value: &'a str) -> Result<UrlParts<'a>> {
        if value.is_empty() {
            return Err(CleanError::TypeCoercion {
                domain: "url",
                value: value.to_string(),
            });
        }
        if value.contains(char::is_whitespace) {
            return Err(invalid(value, "whitespace inside URL"));
        }

        let (scheme, rest) = match value.split_once("://") {
            Some((scheme, rest)) => (scheme.to_ascii_lowercase(), rest),
            None if self.options.add_scheme => (self.options.default_scheme.clone(), value),
            None => return Err(invalid(value, "missing scheme")),
        };
        if !self
            .options
            .allowed_schemes
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(&scheme))
        {
            return Err(invalid(value, &format!("scheme {scheme:?} not allowed")));
        }

        let authority_end = rest
            .find(['/', '?', '#'])
            .unwrap_or(rest.len());
        let (authority, remainder) = rest.split_at(authority_end);

        let (host_raw, port) = match authority.split_once(':') {
            Some((host, port)) => (host, Some(port)),
            None => (authority, None),
        };
        if let Some(port) = port
            && (port.is_empty() || !port.chars().all(|c| c.is_ascii_digit()))
        {
            return Err(invalid(value, "invalid port"));
        }

        let mut host = host_raw.to_ascii_lowercase();
        if self.options.remove_www
            && let Some(stripped) = host.strip_prefix("www.")
        {
            host = stripped.to_string();
        }
        self.validate_host(&host, value)?;

        let path_end = remainder.find(['?', '#']).unwrap_or(remainder.len());
        let (path, tail) = remainder.split_at(path_end);
        let (query, fragment) = match tail.split_once('#') {
            Some((query, fragment)) => (
                query.strip_prefix('?'),
                Some(fragment),
            ),
            None => (tail.strip_prefix('?'), None),
        };

        Ok(UrlParts {
            scheme,
            host,
            port,
            path,
            query,
            fragment,
        })
    }

    fn validate_host(&self, host: &str, raw: &str) -> Result<()> {
        let labels: Vec<&str> = host.split('.').collect();
        if labels.len() < 2 {
            return Err(invalid(raw, "host must contain a dot"));
        }
        for label in &labels {
            if label.is_empty() {
                return Err(invalid(raw, "empty host label"));
            }
            if label.starts_with('-') || label.ends_with('-') {
                return Err(invalid(raw, "host label starts or ends with a hyphen"));
            }
            if !label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
                return Err(invalid(raw, "host contains invalid characters"));
            }
        }
        let tld = labels[labels.len() - 1];
        if tld.len() < 2 || !tld.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(invalid(raw, "top-level domain must be alphabetic"));
        }
        Ok(())
    }
}

impl Cleaner for UrlCleaner {
    type Output = String;

    fn domain(&self) -> Domain {
        Domain::Url
    }

    fn clean_observed(
        &self,
        raw: &str,
        field: &str,
        observer: &mut dyn RuleObserver,
    ) -> Result<String> {
        let parts = self.split(raw.trim())?;

        let mut normalized = format!("{}://{}", parts.scheme, parts.host);
        if let Some(port) = parts.port {
            normalized.push(':');
            normalized.push_str(port);
        }
        normalized.push_str(parts.path);
        if !self.options.remove_query_params
            && let Some(query) = parts.query
        {
            normalized.push('?');
            normalized.push_str(query);
        }
        if !self.options.remove_fragments
            && let Some(fragment) = parts.fragment
        {
            normalized.push('#');
            normalized.push_str(fragment);
        }

        if normalized != raw {
            observer.rule_applied(RuleEvent::new(field, "normalize_url", raw, &normalized));
        }
        Ok(normalized)
    }
}

fn invalid(value: &str, reason: &str) -> CleanError {
    CleanError::Validation {
        domain: "url",
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scheme_and_host_are_lowercased() {
        let cleaner = UrlCleaner::default();
        assert_eq!(
            cleaner.clean("HTTPS://Example.COM/Path/Page").unwrap(),
            "https://example.com/Path/Page"
        );
    }

    #[test]
    fn missing_scheme_gets_the_default() {
        let cleaner = UrlCleaner::default();
        assert_eq!(cleaner.clean("example.com/docs").unwrap(), "https://example.com/docs");
    }

    #[test]
    fn www_prefix_is_stripped_by_default() {
        let cleaner = UrlCleaner::default();
        assert_eq!(cleaner.clean("https://www.example.com").unwrap(), "https://example.com");
    }

    #[test]
    fn fragment_is_dropped_query_kept_by_default() {
        let cleaner = UrlCleaner::default();
        assert_eq!(
            cleaner.clean("https://example.com/a?b=1#section").unwrap(),
            "https://example.com/a?b=1"
        );
    }

    #[test]
    fn query_removal_follows_the_option() {
        let cleaner = UrlCleaner::from_options(UrlCleanerOptions {
            remove_query_params: true,
            ..UrlCleanerOptions::default()
        });
        assert_eq!(
            cleaner.clean("https://example.com/a?b=1").unwrap(),
            "https://example.com/a"
        );
    }

    #[test]
    fn disallowed_scheme_is_a_validation_error() {
        let cleaner = UrlCleaner::default();
        assert!(matches!(
            cleaner.clean("ftp://example.com").unwrap_err(),
            CleanError::Validation { .. }
        ));
    }

    #[test]
    fn structural_failures_are_validation_errors() {
        let cleaner = UrlCleaner::default();
        for bad in ["http://", "http://nodot", "http://bad host.com", "http://example.com:port"] {
            assert!(cleaner.clean(bad).is_err(), "expected error for {bad:?}");
        }
    }

    #[test]
    fn ports_are_preserved() {
        let cleaner = UrlCleaner::default();
        assert_eq!(
            cleaner.clean("http://example.com:8080/api").unwrap(),
            "http://example.com:8080/api"
        );
    }

    #[test]
    fn clean_is_idempotent() {
        let cleaner = UrlCleaner::default();
        let once = cleaner.clean("WWW.Example.com/x?q=1#top").unwrap();
        let twice = cleaner.clean(&once).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn is_valid_never_errors() {
        let cleaner = UrlCleaner::default();
        assert!(cleaner.is_valid("example.com"));
        assert!(!cleaner.is_valid("   "));
        assert!(!cleaner.is_valid("%%%"));
    }

    #[test]
    fn extract_helpers() {
        let cleaner = UrlCleaner::default();
        assert_eq!(cleaner.extract_host("https://WWW.Example.com/a/b").unwrap(), "example.com");
        assert_eq!(cleaner.extract_path("https://example.com/a/b").unwrap(), "/a/b");
    }
}
