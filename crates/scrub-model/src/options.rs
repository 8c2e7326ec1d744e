//! Typed option structs for cleaners and transformers.
//!
//! Every option has a documented default; the structs deserialize from
//! partial JSON (missing fields fall back to defaults, unknown fields are
//! rejected) so that configuration files only need to state overrides.

use serde::{Deserialize, Serialize};

/// Case conversion applied by the text cleaner's final rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseMode {
    /// Leave case untouched.
    None,
    /// Lowercase everything.
    #[default]
    Lower,
    /// Uppercase everything.
    Upper,
    /// Uppercase the first letter of each word, lowercase the rest.
    Title,
}

/// Policy applied when a fitted categorical encoding meets an unseen value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownPolicy {
    /// Fail with `UnknownCategory`.
    #[default]
    Error,
    /// Map unseen values to the configured `unknown_label` sentinel.
    Label,
}

/// Error policy for batch operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BatchErrorPolicy {
    /// Abort on the first per-item error.
    FailFast,
    /// Keep going; per-item errors are collected in place so the output
    /// stays order- and length-preserving.
    #[default]
    Collect,
}

/// Options for the text cleaner's fixed rule pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TextCleanerOptions {
    /// Strip leading/trailing whitespace and collapse internal runs.
    pub trim_whitespace: bool,
    /// Drop characters outside the allow-list.
    pub remove_special_chars: bool,
    /// Allow-list used by `remove_special_chars`. `None` means the built-in
    /// set: alphanumerics, space, and basic punctuation.
    pub allowed_chars: Option<String>,
    /// Case conversion applied last.
    pub convert_case: CaseMode,
    /// Truncate the cleaned value to at most this many characters.
    pub max_length: Option<usize>,
}

impl Default for TextCleanerOptions {
    fn default() -> Self {
        Self {
            trim_whitespace: true,
            remove_special_chars: true,
            allowed_chars: None,
            convert_case: CaseMode::default(),
            max_length: None,
        }
    }
}

/// Options for the number cleaner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NumberCleanerOptions {
    /// Strip currency symbols, thousands separators, and internal spaces
    /// before parsing.
    pub remove_formatting: bool,
    /// Currency symbols recognized by `remove_formatting`.
    pub currency_symbols: Vec<char>,
    /// Reject negative results when false.
    pub allow_negative: bool,
    /// Reject non-integer results when false.
    pub allow_decimal: bool,
    /// Inclusive lower bound on the cleaned value.
    pub min_value: Option<f64>,
    /// Inclusive upper bound on the cleaned value.
    pub max_value: Option<f64>,
}

impl Default for NumberCleanerOptions {
    fn default() -> Self {
        Self {
            remove_formatting: true,
            currency_symbols: vec!['$', '\u{20ac}', '\u{a3}', '\u{a5}'],
            allow_negative: true,
            allow_decimal: true,
            min_value: None,
            max_value: None,
        }
    }
}

/// Options for the date/time cleaner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DateTimeCleanerOptions {
    /// Candidate input formats tried in order; first match wins.
    pub input_formats: Vec<String>,
    /// strftime format used to render the cleaned value.
    pub output_format: String,
    /// Reject values after the moment of cleaning when false.
    pub allow_future: bool,
    /// Inclusive lower bound, itself parsed with the configured formats.
    pub min_datetime: Option<String>,
    /// Inclusive upper bound, itself parsed with the configured formats.
    pub max_datetime: Option<String>,
}

impl Default for DateTimeCleanerOptions {
    fn default() -> Self {
        Self {
            input_formats: vec![
                "%Y-%m-%d".to_string(),
                "%Y-%m-%d %H:%M:%S".to_string(),
                "%d/%m/%Y".to_string(),
                "%d/%m/%Y %H:%M:%S".to_string(),
            ],
            output_format: "%Y-%m-%d %H:%M:%S".to_string(),
            allow_future: true,
            min_datetime: None,
            max_datetime: None,
        }
    }
}

/// Options for the email cleaner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EmailCleanerOptions {
    /// Accept dotted subdomains in the domain part.
    pub allow_subdomains: bool,
    /// Accept `._%+-` in the local part (alphanumerics and `_` otherwise).
    pub allow_special_chars: bool,
    /// Maximum total address length. RFC 5321 limit by default.
    pub max_length: usize,
    /// Restrict the domain part to this allow-list when set.
    pub valid_domains: Option<Vec<String>>,
}

impl Default for EmailCleanerOptions {
    fn default() -> Self {
        Self {
            allow_subdomains: true,
            allow_special_chars: true,
            max_length: 254,
            valid_domains: None,
        }
    }
}

/// Options for the URL cleaner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct UrlCleanerOptions {
    /// Prefix `default_scheme://` when the value has no scheme.
    pub add_scheme: bool,
    /// Scheme used by `add_scheme`.
    pub default_scheme: String,
    /// Schemes accepted during validation.
    pub allowed_schemes: Vec<String>,
    /// Strip a leading `www.` from the host.
    pub remove_www: bool,
    /// Drop the query string.
    pub remove_query_params: bool,
    /// Drop the fragment.
    pub remove_fragments: bool,
}

impl Default for UrlCleanerOptions {
    fn default() -> Self {
        Self {
            add_scheme: true,
            default_scheme: "https".to_string(),
            allowed_schemes: vec!["http".to_string(), "https".to_string()],
            remove_www: true,
            remove_query_params: false,
            remove_fragments: true,
        }
    }
}

/// Options for the text transformer (tokenization, n-grams).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TextTransformerOptions {
    /// Lowercase before splitting into tokens.
    pub lowercase: bool,
    /// Drop tokens found in `stopwords`.
    pub remove_stopwords: bool,
    /// Stop-word set consulted when `remove_stopwords` is on.
    pub stopwords: Vec<String>,
}

impl Default for TextTransformerOptions {
    fn default() -> Self {
        Self {
            lowercase: true,
            remove_stopwords: false,
            stopwords: default_stopwords(),
        }
    }
}

/// Built-in English stop-word list.
pub fn default_stopwords() -> Vec<String> {
    [
        "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "with", "by", "of",
        "about", "as", "is", "was", "are", "were", "be", "been", "being", "have", "has", "had",
        "do", "does", "did",
    ]
    .iter()
    .map(|word| (*word).to_string())
    .collect()
}

/// Options for the numeric transformer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NumberTransformerOptions {
    /// Number of bins used by discretization.
    pub bin_count: usize,
}

impl Default for NumberTransformerOptions {
    fn default() -> Self {
        Self { bin_count: 5 }
    }
}

/// Options for categorical encodings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CategoricalTransformerOptions {
    /// Behavior for categories absent from the fitted mapping.
    pub unknown_policy: UnknownPolicy,
    /// Sentinel category used under [`UnknownPolicy::Label`].
    pub unknown_label: String,
    /// Keep only the most frequent categories when set; the rest are
    /// treated as unknown.
    pub max_categories: Option<usize>,
}

impl Default for CategoricalTransformerOptions {
    fn default() -> Self {
        Self {
            unknown_policy: UnknownPolicy::default(),
            unknown_label: "Unknown".to_string(),
            max_categories: None,
        }
    }
}

/// Options for batch processing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BatchOptions {
    /// Error policy applied by `clean_batch`. Default: collect.
    pub error_policy: BatchErrorPolicy,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let text = TextCleanerOptions::default();
        assert!(text.trim_whitespace);
        assert!(text.remove_special_chars);
        assert_eq!(text.convert_case, CaseMode::Lower);
        assert!(text.allowed_chars.is_none());

        let number = NumberCleanerOptions::default();
        assert!(number.currency_symbols.contains(&'$'));
        assert!(number.allow_negative);

        let datetime = DateTimeCleanerOptions::default();
        assert_eq!(datetime.output_format, "%Y-%m-%d %H:%M:%S");
        assert_eq!(datetime.input_formats.len(), 4);

        assert_eq!(BatchOptions::default().error_policy, BatchErrorPolicy::Collect);
    }

    #[test]
    fn partial_json_deserializes_with_defaults() {
        let options: TextCleanerOptions =
            serde_json::from_str(r#"{"convert_case": "upper"}"#).expect("partial options");
        assert_eq!(options.convert_case, CaseMode::Upper);
        assert!(options.trim_whitespace);
    }

    #[test]
    fn unknown_field_is_rejected() {
        let result = serde_json::from_str::<TextCleanerOptions>(r#"{"no_such_option": true}"#);
        assert!(result.is_err());
    }
}
