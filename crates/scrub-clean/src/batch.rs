//! The `Cleaner` seam and order-preserving batch application.

use scrub_model::{BatchErrorPolicy, CleanError, Domain, Result};
use tracing::warn;

use crate::observe::{NoopObserver, RuleObserver};

/// A stateless per-domain rule applier.
///
/// `clean` is a pure function of the input and the option snapshot bound at
/// construction. Implementors provide [`Cleaner::clean_observed`]; the plain
/// variants route through a no-op observer.
pub trait Cleaner {
    /// Cleaned output type for this domain.
    type Output;

    /// Domain this cleaner belongs to.
    fn domain(&self) -> Domain;

    /// Clean one value, reporting applied rules to `observer`.
    fn clean_observed(
        &self,
        raw: &str,
        field: &str,
        observer: &mut dyn RuleObserver,
    ) -> Result<Self::Output>;

    /// Clean one value.
    fn clean(&self, raw: &str) -> Result<Self::Output> {
        self.clean_observed(raw, "", &mut NoopObserver)
    }

    /// Whether the value cleans successfully. Never errors.
    fn is_valid(&self, raw: &str) -> bool {
        self.clean(raw).is_ok()
    }

    /// Clean an ordered sequence item by item.
    ///
    /// Under [`BatchErrorPolicy::Collect`] the output has exactly one entry
    /// per input, in input order, with per-item errors in place; failures
    /// are logged and reported to `observer` rather than dropped. Under
    /// [`BatchErrorPolicy::FailFast`] the first error aborts the batch.
    fn clean_batch_observed<S: AsRef<str>>(
        &self,
        items: &[S],
        policy: BatchErrorPolicy,
        field: &str,
        observer: &mut dyn RuleObserver,
    ) -> Result<Vec<Result<Self::Output>>> {
        let mut outcomes = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            match self.clean_observed(item.as_ref(), field, observer) {
                Ok(value) => outcomes.push(Ok(value)),
                Err(error) => match policy {
                    BatchErrorPolicy::FailFast => return Err(error),
                    BatchErrorPolicy::Collect => {
                        warn!(
                            domain = %self.domain(),
                            index,
                            %error,
                            "batch item failed, continuing"
                        );
                        observer.item_failed(field, &error);
                        outcomes.push(Err(error));
                    }
                },
            }
        }
        Ok(outcomes)
    }

    /// [`Cleaner::clean_batch_observed`] without reporting.
    fn clean_batch<S: AsRef<str>>(
        &self,
        items: &[S],
        policy: BatchErrorPolicy,
    ) -> Result<Vec<Result<Self::Output>>> {
        self.clean_batch_observed(items, policy, "", &mut NoopObserver)
    }
}

/// Counts accumulated over one batch run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchStats {
    pub total: usize,
    pub cleaned: usize,
    pub failed: usize,
}

impl BatchStats {
    /// Summarize the outcome vector of a collect-mode batch.
    pub fn from_outcomes<T>(outcomes: &[Result<T>]) -> Self {
        let failed = outcomes.iter().filter(|outcome| outcome.is_err()).count();
        Self {
            total: outcomes.len(),
            cleaned: outcomes.len() - failed,
            failed,
        }
    }

    /// Fold another run into this one.
    pub fn absorb(&mut self, other: BatchStats) {
        self.total += other.total;
        self.cleaned += other.cleaned;
        self.failed += other.failed;
    }
}

/// Render a collect-mode error for placement in tabular output.
pub fn error_kind(error: &CleanError) -> &'static str {
    match error {
        CleanError::ConfigPath { .. } => "config_path",
        CleanError::TypeCoercion { .. } => "type_coercion",
        CleanError::NumberParse { .. } => "number_parse",
        CleanError::DateParse { .. } => "date_parse",
        CleanError::Validation { .. } => "validation",
        CleanError::OutOfRange { .. } => "out_of_range",
        CleanError::InvalidArgument { .. } => "invalid_argument",
        CleanError::UnknownCategory { .. } => "unknown_category",
        CleanError::Format { .. } => "format",
        CleanError::Io(_) => "io",
        CleanError::Json(_) => "json",
    }
}
