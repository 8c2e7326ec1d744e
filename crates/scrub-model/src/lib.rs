//! Shared data model for the scrub toolkit: configuration, errors, and the
//! closed set of cleaning domains.

pub mod config;
pub mod domain;
pub mod error;
pub mod options;

pub use config::{CleanerConfig, Config, TransformerConfig};
pub use domain::{CleanValue, Domain};
pub use error::{CleanError, Result};
pub use options::{
    BatchErrorPolicy, BatchOptions, CaseMode, CategoricalTransformerOptions,
    DateTimeCleanerOptions, EmailCleanerOptions, NumberCleanerOptions, NumberTransformerOptions,
    TextCleanerOptions, TextTransformerOptions, UnknownPolicy, UrlCleanerOptions,
};
