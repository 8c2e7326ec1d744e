//! Categorical encodings fitted once and applied per value.
//!
//! All three encodings share the same fitting rules: categories are
//! remembered in first-seen order, an optional `max_categories` cap
//! keeps only the most frequent categories, and values outside the
//! fitted vocabulary follow the configured [`UnknownPolicy`].

use std::collections::{BTreeMap, HashMap};

use scrub_model::{CategoricalTransformerOptions, CleanError, Config, Result, UnknownPolicy};
use serde::{Deserialize, Serialize};

/// Category vocabulary shared by every encoding: first-seen order,
/// occurrence counts, and the unknown-value policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct Vocabulary {
    categories: Vec<String>,
    counts: HashMap<String, usize>,
    policy: UnknownPolicy,
    unknown_label: String,
}

impl Vocabulary {
    fn fit<I, S>(values: I, options: &CategoricalTransformerOptions) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut categories: Vec<String> = Vec::new();
        let mut counts: HashMap<String, usize> = HashMap::new();
        for value in values {
            let value = value.into();
            if !counts.contains_key(&value) {
                categories.push(value.clone());
            }
            *counts.entry(value).or_insert(0) += 1;
        }

        if let Some(cap) = options.max_categories
            && categories.len() > cap
        {
            // Keep the most frequent categories, first-seen order as the
            // tie-break, then restore first-seen order among survivors.
            let mut ranked: Vec<usize> = (0..categories.len()).collect();
            ranked.sort_by_key(|&i| std::cmp::Reverse(counts[&categories[i]]));
            ranked.truncate(cap);
            ranked.sort_unstable();
            tracing::debug!(
                kept = cap,
                dropped = categories.len() - cap,
                "category cap dropped infrequent categories"
            );
            let kept: Vec<String> = ranked.into_iter().map(|i| categories[i].clone()).collect();
            counts.retain(|category, _| kept.contains(category));
            categories = kept;
        }

        Self {
            categories,
            counts,
            policy: options.unknown_policy,
            unknown_label: options.unknown_label.clone(),
        }
    }

    fn is_known(&self, value: &str) -> bool {
        self.counts.contains_key(value)
    }

    fn unknown(&self, value: &str) -> CleanError {
        CleanError::UnknownCategory { category: value.to_string() }
    }
}

/// Stable first-seen category to integer code mapping.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabelEncoding {
    vocabulary: Vocabulary,
    codes: HashMap<String, u32>,
}

impl LabelEncoding {
    pub fn fit<I, S>(values: I, options: &CategoricalTransformerOptions) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let vocabulary = Vocabulary::fit(values, options);
        let codes = vocabulary
            .categories
            .iter()
            .enumerate()
            .map(|(code, category)| (category.clone(), code as u32))
            .collect();
        Self { vocabulary, codes }
    }

    pub fn fit_with_config<I, S>(values: I, config: &Config) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::fit(values, &config.transformers.categorical)
    }

    /// Encode one value. Unseen values error under
    /// [`UnknownPolicy::Error`] or map to the sentinel code one past the
    /// fitted categories under [`UnknownPolicy::Label`].
    pub fn encode(&self, value: &str) -> Result<u32> {
        match self.codes.get(value) {
            Some(&code) => Ok(code),
            None => match self.vocabulary.policy {
                UnknownPolicy::Error => Err(self.vocabulary.unknown(value)),
                UnknownPolicy::Label => Ok(self.vocabulary.categories.len() as u32),
            },
        }
    }

    /// Fitted categories in code order.
    pub fn categories(&self) -> &[String] {
        &self.vocabulary.categories
    }
}

/// Category to occurrence-count mapping.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrequencyEncoding {
    vocabulary: Vocabulary,
}

impl FrequencyEncoding {
    pub fn fit<I, S>(values: I, options: &CategoricalTransformerOptions) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { vocabulary: Vocabulary::fit(values, options) }
    }

    /// Encode one value as its fitted occurrence count; unseen values
    /// error or count as zero depending on the policy.
    pub fn encode(&self, value: &str) -> Result<usize> {
        match self.vocabulary.counts.get(value) {
            Some(&count) => Ok(count),
            None => match self.vocabulary.policy {
                UnknownPolicy::Error => Err(self.vocabulary.unknown(value)),
                UnknownPolicy::Label => Ok(0),
            },
        }
    }

    pub fn categories(&self) -> &[String] {
        &self.vocabulary.categories
    }
}

/// Sparse indicator encoding: one key per fitted category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OneHotEncoding {
    vocabulary: Vocabulary,
}

impl OneHotEncoding {
    pub fn fit<I, S>(values: I, options: &CategoricalTransformerOptions) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { vocabulary: Vocabulary::fit(values, options) }
    }

    /// Encode one value as an indicator map with exactly one `1` for a
    /// known category. Under [`UnknownPolicy::Label`] the map carries a
    /// key for the unknown label that fires for unseen values; a fitted
    /// category named like the label keeps its own indicator.
    pub fn encode(&self, value: &str) -> Result<BTreeMap<String, u8>> {
        let known = self.vocabulary.is_known(value);
        if !known && self.vocabulary.policy == UnknownPolicy::Error {
            return Err(self.vocabulary.unknown(value));
        }
        let mut indicators: BTreeMap<String, u8> = self
            .vocabulary
            .categories
            .iter()
            .map(|category| (category.clone(), u8::from(category == value)))
            .collect();
        if self.vocabulary.policy == UnknownPolicy::Label {
            if known {
                indicators
                    .entry(self.vocabulary.unknown_label.clone())
                    .or_insert(0);
            } else {
                indicators.insert(self.vocabulary.unknown_label.clone(), 1);
            }
        }
        Ok(indicators)
    }

    pub fn categories(&self) -> &[String] {
        &self.vocabulary.categories
    }
}
