use thiserror::Error;

/// Errors surfaced by cleaning and transformation operations.
///
/// Single-item operations fail immediately with the specific kind below.
/// Batch operations apply a [`crate::options::BatchErrorPolicy`] and either
/// abort on the first error or collect per-item errors in place.
#[derive(Debug, Error)]
pub enum CleanError {
    /// A dot-separated configuration path does not address a known
    /// option, or the supplied value does not fit the option it
    /// addresses.
    #[error("invalid configuration path or value: {path}")]
    ConfigPath { path: String },

    /// Input could not be coerced to the expected domain type.
    #[error("cannot coerce {value:?} to a {domain} value")]
    TypeCoercion { domain: &'static str, value: String },

    /// Residue after stripping formatting is not a valid numeric literal.
    #[error("cannot parse {value:?} as a number")]
    NumberParse { value: String },

    /// No configured input format matched and generic parsing failed.
    #[error("cannot parse {value:?} as a date/time")]
    DateParse { value: String },

    /// Structural validation failure (email address, URL).
    #[error("invalid {domain} {value:?}: {reason}")]
    Validation {
        domain: &'static str,
        value: String,
        reason: String,
    },

    /// A range bound configured for the field was violated.
    #[error("value {value} outside allowed range [{}, {}]", fmt_bound(.min), fmt_bound(.max))]
    OutOfRange {
        value: f64,
        min: Option<f64>,
        max: Option<f64>,
    },

    /// A caller-supplied parameter is invalid (e.g. zero n-gram size).
    #[error("invalid argument: {reason}")]
    InvalidArgument { reason: String },

    /// A fitted categorical encoding was applied to an unseen category.
    #[error("unknown category: {category:?}")]
    UnknownCategory { category: String },

    /// A configured strftime output format string is not valid.
    #[error("invalid output format string: {format:?}")]
    Format { format: String },

    /// Configuration file could not be read or written.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration JSON could not be parsed or serialized.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CleanError {
    /// Convenience constructor for [`CleanError::InvalidArgument`].
    pub fn invalid_argument(reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            reason: reason.into(),
        }
    }

    /// Convenience constructor for [`CleanError::ConfigPath`].
    pub fn config_path(path: impl Into<String>) -> Self {
        Self::ConfigPath { path: path.into() }
    }
}

fn fmt_bound(bound: &Option<f64>) -> String {
    match bound {
        Some(value) => value.to_string(),
        None => "-".to_string(),
    }
}

pub type Result<T> = std::result::Result<T, CleanError>;
