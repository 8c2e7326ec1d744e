//! Numeric feature transforms: scaling, binning, summary statistics.
//!
//! Scalers and discretizers are fitted once over a collection and then
//! applied value by value, so a fit learned on training data can be
//! reused on later batches.

use scrub_model::{CleanError, Config, Result};
use serde::{Deserialize, Serialize};

/// Linear rescale of a value into `[0, 1]` over a fitted range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MinMaxScaler {
    min: f64,
    max: f64,
}

impl MinMaxScaler {
    /// Fit the range from `data`. Empty input is an error.
    pub fn fit(data: &[f64]) -> Result<Self> {
        let (min, max) = spread(data)?;
        Ok(Self { min, max })
    }

    /// Construct from known bounds without fitting.
    pub fn from_bounds(min: f64, max: f64) -> Result<Self> {
        if min > max {
            return Err(CleanError::invalid_argument(format!(
                "min {min} exceeds max {max}"
            )));
        }
        Ok(Self { min, max })
    }

    /// A degenerate range (`max == min`) maps every value to `0.0`.
    pub fn transform(&self, value: f64) -> f64 {
        if self.max == self.min {
            0.0
        } else {
            (value - self.min) / (self.max - self.min)
        }
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }
}

/// Standard-score rescale over fitted moments (population stddev).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZScoreScaler {
    mean: f64,
    std: f64,
}

impl ZScoreScaler {
    /// Fit mean and population standard deviation from `data`.
    pub fn fit(data: &[f64]) -> Result<Self> {
        if data.is_empty() {
            return Err(CleanError::invalid_argument("cannot fit on empty data"));
        }
        let mean = data.iter().sum::<f64>() / data.len() as f64;
        let variance = data.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / data.len() as f64;
        Ok(Self { mean, std: variance.sqrt() })
    }

    /// Construct from known moments without fitting.
    pub fn from_moments(mean: f64, std: f64) -> Result<Self> {
        if std < 0.0 || !std.is_finite() || !mean.is_finite() {
            return Err(CleanError::invalid_argument(format!(
                "invalid moments: mean {mean}, std {std}"
            )));
        }
        Ok(Self { mean, std })
    }

    /// Zero standard deviation maps every value to `0.0`.
    pub fn transform(&self, value: f64) -> f64 {
        if self.std == 0.0 {
            0.0
        } else {
            (value - self.mean) / self.std
        }
    }

    pub fn mean(&self) -> f64 {
        self.mean
    }

    pub fn std(&self) -> f64 {
        self.std
    }
}

/// A bin assignment: zero-based index plus the stable `bin_{n}` label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BinLabel {
    pub index: usize,
    pub label: String,
}

/// Bins values against fitted edges.
///
/// Bins are lower-inclusive, upper-exclusive, with the final bin
/// closed on both ends. Out-of-range values clamp to the first or
/// last bin rather than erroring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Discretizer {
    edges: Vec<f64>,
}

impl Discretizer {
    /// Equal-width bins over the fitted min/max range.
    pub fn equal_width(data: &[f64], bins: usize) -> Result<Self> {
        let (min, max) = Self::check(data, bins)?;
        let width = (max - min) / bins as f64;
        let edges = (0..=bins)
            .map(|i| min + width * i as f64)
            .collect();
        Ok(Self { edges })
    }

    /// Equal-frequency bins: edges at sorted-data quantiles, so each bin
    /// covers roughly the same number of fitted values.
    pub fn equal_frequency(data: &[f64], bins: usize) -> Result<Self> {
        let (min, max) = Self::check(data, bins)?;
        let mut sorted = data.to_vec();
        sorted.sort_by(|a, b| a.total_cmp(b));
        let mut edges = Vec::with_capacity(bins + 1);
        edges.push(min);
        for i in 1..bins {
            edges.push(sorted[i * sorted.len() / bins]);
        }
        edges.push(max);
        Ok(Self { edges })
    }

    /// Equal-width bins with the configured default bin count.
    pub fn equal_width_from_config(data: &[f64], config: &Config) -> Result<Self> {
        Self::equal_width(data, config.transformers.number.bin_count)
    }

    /// Equal-frequency bins with the configured default bin count.
    pub fn equal_frequency_from_config(data: &[f64], config: &Config) -> Result<Self> {
        Self::equal_frequency(data, config.transformers.number.bin_count)
    }

    fn check(data: &[f64], bins: usize) -> Result<(f64, f64)> {
        if bins == 0 {
            return Err(CleanError::invalid_argument("bin count must be at least 1"));
        }
        spread(data)
    }

    pub fn bin_count(&self) -> usize {
        self.edges.len() - 1
    }

    /// Assign `value` to a bin, clamping out-of-range values to the ends.
    pub fn bin(&self, value: f64) -> BinLabel {
        let last = self.bin_count() - 1;
        let mut index = last;
        for i in 0..last {
            if value < self.edges[i + 1] {
                index = i;
                break;
            }
        }
        BinLabel { index, label: format!("bin_{}", index + 1) }
    }

    pub fn edges(&self) -> &[f64] {
        &self.edges
    }
}

/// Descriptive statistics over a collection of values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NumericSummary {
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub std: f64,
    pub median: f64,
    pub q1: f64,
    pub q3: f64,
}

/// Summarize `data`. Empty input is an error.
pub fn summary(data: &[f64]) -> Result<NumericSummary> {
    let (min, max) = spread(data)?;
    let scaler = ZScoreScaler::fit(data)?;
    let mut sorted = data.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    Ok(NumericSummary {
        count: data.len(),
        min,
        max,
        mean: scaler.mean(),
        std: scaler.std(),
        median: median_of(&sorted),
        q1: sorted[sorted.len() / 4],
        q3: sorted[3 * sorted.len() / 4],
    })
}

fn median_of(sorted: &[f64]) -> f64 {
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

fn spread(data: &[f64]) -> Result<(f64, f64)> {
    if data.is_empty() {
        return Err(CleanError::invalid_argument("cannot fit on empty data"));
    }
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for &value in data {
        min = min.min(value);
        max = max.max(value);
    }
    Ok((min, max))
}
