//! Property tests for cleaner invariants.

use proptest::prelude::*;
use scrub_clean::{Cleaner, NumberCleaner, TextCleaner};
use scrub_model::BatchErrorPolicy;

proptest! {
    // clean(clean(x)) == clean(x) for printable ASCII under the default
    // configuration.
    #[test]
    fn text_clean_is_idempotent(input in "[ -~]{0,60}") {
        let cleaner = TextCleaner::default();
        let once = cleaner.clean(&input).unwrap();
        let twice = cleaner.clean(&once).unwrap();
        prop_assert_eq!(once, twice);
    }

    // Cleaning a value already in canonical numeric form returns it
    // unchanged.
    #[test]
    fn number_clean_fixes_canonical_values(value in -1.0e12f64..1.0e12) {
        let cleaner = NumberCleaner::default();
        let cleaned = cleaner.clean(&value.to_string()).unwrap();
        prop_assert_eq!(cleaned, value);
    }

    // Under the collect policy the batch output always has one entry per
    // input, whatever the inputs look like.
    #[test]
    fn collect_batches_preserve_length(items in prop::collection::vec("[ -~]{0,20}", 0..30)) {
        let cleaner = NumberCleaner::default();
        let outcomes = cleaner.clean_batch(&items, BatchErrorPolicy::Collect).unwrap();
        prop_assert_eq!(outcomes.len(), items.len());
    }
}
