//! Feature-producing transformers over cleaned values.
//!
//! Where the cleaners in `scrub-clean` normalize raw strings in place,
//! the transformers here derive new representations: token streams and
//! n-grams from text, scaled or binned numbers, categorical encodings,
//! and calendar features from datetimes. Collection-fitted transformers
//! (scalers, discretizers, encodings) separate `fit` from application so
//! one fit can serve many batches.

pub mod categorical;
pub mod datetime;
pub mod number;
pub mod text;

pub use categorical::{FrequencyEncoding, LabelEncoding, OneHotEncoding};
pub use datetime::{DateTimeParts, DateTimeTransformer, DurationParts};
pub use number::{BinLabel, Discretizer, MinMaxScaler, NumericSummary, ZScoreScaler, summary};
pub use text::TextTransformer;
