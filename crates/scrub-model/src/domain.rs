//! Closed set of cleaning domains and their output values.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CleanError;

/// The fixed set of field domains the toolkit cleans.
///
/// Dispatch over domains is a closed enum rather than string-keyed lookup;
/// adding a domain is a source change, not a registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Domain {
    Text,
    Number,
    DateTime,
    Email,
    Url,
}

impl Domain {
    /// All domains in declaration order.
    pub const ALL: [Domain; 5] = [
        Domain::Text,
        Domain::Number,
        Domain::DateTime,
        Domain::Email,
        Domain::Url,
    ];

    /// Canonical lowercase name, as used in config paths and CLI specs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Domain::Text => "text",
            Domain::Number => "number",
            Domain::DateTime => "datetime",
            Domain::Email => "email",
            Domain::Url => "url",
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Domain {
    type Err = CleanError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(Domain::Text),
            "number" => Ok(Domain::Number),
            "datetime" | "date" | "time" => Ok(Domain::DateTime),
            "email" => Ok(Domain::Email),
            "url" => Ok(Domain::Url),
            other => Err(CleanError::invalid_argument(format!(
                "unknown domain {other:?} (expected one of: text, number, datetime, email, url)"
            ))),
        }
    }
}

/// A cleaned value, tagged by the domain that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "domain", content = "value", rename_all = "snake_case")]
pub enum CleanValue {
    Text(String),
    Number(f64),
    DateTime(String),
    Email(String),
    Url(String),
}

impl CleanValue {
    /// The domain this value belongs to.
    pub fn domain(&self) -> Domain {
        match self {
            CleanValue::Text(_) => Domain::Text,
            CleanValue::Number(_) => Domain::Number,
            CleanValue::DateTime(_) => Domain::DateTime,
            CleanValue::Email(_) => Domain::Email,
            CleanValue::Url(_) => Domain::Url,
        }
    }
}

impl fmt::Display for CleanValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CleanValue::Text(value)
            | CleanValue::DateTime(value)
            | CleanValue::Email(value)
            | CleanValue::Url(value) => f.write_str(value),
            CleanValue::Number(value) => write!(f, "{value}"),
        }
    }
}
