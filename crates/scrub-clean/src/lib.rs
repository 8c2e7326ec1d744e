//! Per-field data cleaners with configurable rule pipelines.
//!
//! Each cleaner is a stateless rule applier over one domain (text, number,
//! datetime, email, URL). Rules run in a fixed, deterministic order; each is
//! toggled through [`scrub_model::Config`]. Batch application preserves
//! order and, under the collect policy, length.

pub mod batch;
pub mod datetime;
pub mod email;
pub mod field;
pub mod number;
pub mod observe;
pub mod text;
pub mod url;

pub use batch::{BatchStats, Cleaner, error_kind};
pub use datetime::DateTimeCleaner;
pub use email::EmailCleaner;
pub use field::FieldCleaner;
pub use number::NumberCleaner;
pub use observe::{NoopObserver, RuleEvent, RuleObserver};
pub use text::TextCleaner;
pub use url::UrlCleaner;
