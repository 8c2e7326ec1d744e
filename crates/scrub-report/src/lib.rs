//! Rule-event collection and cleaning reports.
//!
//! [`RuleTrace`] implements the `RuleObserver` seam from `scrub-clean`
//! and records everything a cleaning run does; [`CleanReport`] is the
//! aggregated, serializable view; [`render`] turns a report into the
//! terminal tables the CLI prints.

pub mod render;
pub mod trace;

pub use render::{failure_table, report_table};
pub use trace::{CleanReport, FieldFailure, FieldSummary, RuleTrace};
