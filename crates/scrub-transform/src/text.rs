//! Text feature extraction: tokens, n-grams, word statistics.

use std::collections::{BTreeMap, HashSet};

use scrub_model::{CleanError, Config, Result, TextTransformerOptions};

/// Stateless tokenizer bound to a [`TextTransformerOptions`] snapshot.
#[derive(Debug, Clone)]
pub struct TextTransformer {
    options: TextTransformerOptions,
    stopwords: HashSet<String>,
}

impl TextTransformer {
    /// Bind the text transformer options from `config`.
    pub fn new(config: &Config) -> Self {
        Self::from_options(config.transformers.text.clone())
    }

    pub fn from_options(options: TextTransformerOptions) -> Self {
        let stopwords = options
            .stopwords
            .iter()
            .map(|word| word.to_lowercase())
            .collect();
        Self { options, stopwords }
    }

    pub fn options(&self) -> &TextTransformerOptions {
        &self.options
    }

    /// Split into tokens on non-alphanumeric boundaries, in input order.
    ///
    /// Lowercasing and stop-word removal follow the bound options.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let source = if self.options.lowercase {
            text.to_lowercase()
        } else {
            text.to_string()
        };
        source
            .split(|c: char| !c.is_alphanumeric())
            .filter(|token| !token.is_empty())
            .filter(|token| {
                !(self.options.remove_stopwords && self.stopwords.contains(&token.to_lowercase()))
            })
            .map(str::to_string)
            .collect()
    }

    /// Contiguous n-token windows joined by single spaces.
    ///
    /// `n == 0` is an `InvalidArgument` error; `n` greater than the token
    /// count yields an empty vector rather than an error.
    pub fn generate_ngrams(&self, text: &str, n: usize) -> Result<Vec<String>> {
        if n == 0 {
            return Err(CleanError::invalid_argument("n-gram size must be at least 1"));
        }
        let tokens = self.tokenize(text);
        if n > tokens.len() {
            return Ok(Vec::new());
        }
        Ok(tokens.windows(n).map(|window| window.join(" ")).collect())
    }

    /// Token frequencies, sorted by token.
    pub fn word_counts(&self, text: &str) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for token in self.tokenize(text) {
            *counts.entry(token).or_insert(0) += 1;
        }
        counts
    }

    /// Character length of each token, in input order.
    pub fn word_lengths(&self, text: &str) -> Vec<usize> {
        self.tokenize(text)
            .iter()
            .map(|token| token.chars().count())
            .collect()
    }
}

impl Default for TextTransformer {
    fn default() -> Self {
        Self::from_options(TextTransformerOptions::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenize_lowercases_and_splits_on_boundaries() {
        let transformer = TextTransformer::default();
        assert_eq!(
            transformer.tokenize("Hello, World! It's 2024."),
            vec!["hello", "world", "it", "s", "2024"]
        );
    }

    #[test]
    fn stopwords_are_removed_when_enabled() {
        let transformer = TextTransformer::from_options(TextTransformerOptions {
            remove_stopwords: true,
            ..TextTransformerOptions::default()
        });
        assert_eq!(
            transformer.tokenize("the quick fox and the dog"),
            vec!["quick", "fox", "dog"]
        );
    }

    #[test]
    fn ngram_boundaries_from_spec() {
        let transformer = TextTransformer::default();
        assert_eq!(
            transformer.generate_ngrams("Hello world", 2).unwrap(),
            vec!["hello world"]
        );
        assert!(transformer.generate_ngrams("Hello", 2).unwrap().is_empty());
        assert!(matches!(
            transformer.generate_ngrams("Hello world", 0).unwrap_err(),
            CleanError::InvalidArgument { .. }
        ));
    }

    #[test]
    fn trigram_windows_are_contiguous() {
        let transformer = TextTransformer::default();
        assert_eq!(
            transformer.generate_ngrams("one two three four", 3).unwrap(),
            vec!["one two three", "two three four"]
        );
    }

    #[test]
    fn word_counts_and_lengths() {
        let transformer = TextTransformer::default();
        let counts = transformer.word_counts("a b a c a b");
        assert_eq!(counts["a"], 3);
        assert_eq!(counts["b"], 2);
        assert_eq!(counts["c"], 1);
        assert_eq!(transformer.word_lengths("hi there"), vec![2, 5]);
    }
}
