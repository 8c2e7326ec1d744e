//! CLI library components for the scrub data cleaner.

pub mod logging;
