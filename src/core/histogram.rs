//! core/histogram.rs — Fixed-bin histogram over a bounded score range.
//!
//! Bin lookup is direct index arithmetic on a uniform grid, O(1) per value.
//! Intervals are half-open `[start, end)`; the top bound itself is outside
//! the histogram.

use std::collections::BTreeMap;

use thiserror::Error;

/// Errors from histogram construction and queries.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum HistogramError {
    /// Degenerate spec: zero bins, or inverted/non-finite bounds.
    #[error("invalid histogram spec: bounds ({low}, {high}), {number_of_bins} bins")]
    InvalidSpec {
        low: f64,
        high: f64,
        number_of_bins: usize,
    },
    /// Queried value falls outside `[low, high)`.
    #[error("value {value} outside histogram range [{low}, {high})")]
    OutOfRange { value: f64, low: f64, high: f64 },
}

/// Fixed-bin histogram over `[low, high)` with `number_of_bins` uniform bins.
///
/// The interval vector is materialized once at construction and indexed
/// thereafter; nothing about the grid is recomputed per query.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    bounds: (f64, f64),
    number_of_bins: usize,
    bin_size: f64,
    bins: Vec<(f64, f64)>,
}

impl Histogram {
    /// Build a histogram over `bounds = (low, high)` with `number_of_bins`
    /// uniform bins.
    ///
    /// Fails with [`HistogramError::InvalidSpec`] on zero bins or
    /// inverted/non-finite bounds rather than letting an infinite or negative
    /// bin size through.
    pub fn new(bounds: (f64, f64), number_of_bins: usize) -> Result<Self, HistogramError> {
        let (low, high) = bounds;
        if number_of_bins == 0 || !low.is_finite() || !high.is_finite() || low >= high {
            return Err(HistogramError::InvalidSpec {
                low,
                high,
                number_of_bins,
            });
        }
        let bin_size = (high - low) / number_of_bins as f64;
        let bins = (0..number_of_bins)
            .map(|n| (low + n as f64 * bin_size, low + (n + 1) as f64 * bin_size))
            .collect();
        Ok(Self {
            bounds,
            number_of_bins,
            bin_size,
            bins,
        })
    }

    pub fn bounds(&self) -> (f64, f64) {
        self.bounds
    }

    pub fn number_of_bins(&self) -> usize {
        self.number_of_bins
    }

    pub fn bin_size(&self) -> f64 {
        self.bin_size
    }

    /// The bin intervals in order, each half-open `[start, end)`.
    pub fn bins(&self) -> &[(f64, f64)] {
        &self.bins
    }

    /// Raw bin index for `value`: `floor((value - low) / bin_size)`.
    ///
    /// Pure arithmetic, deliberately unchecked: values below `low`, or at or
    /// above `high`, yield an index outside `0..number_of_bins`. Use
    /// [`Histogram::find_bin`] for checked access.
    pub fn find_bin_index(&self, value: f64) -> i64 {
        ((value - self.bounds.0) / self.bin_size).floor() as i64
    }

    /// The interval containing `value`.
    ///
    /// Fails with [`HistogramError::OutOfRange`] when `value` is not in
    /// `[low, high)`; the index never wraps into a neighboring bin.
    pub fn find_bin(&self, value: f64) -> Result<(f64, f64), HistogramError> {
        Ok(self.bins[self.checked_index(value)?])
    }

    /// Count how many values land in each bin, keyed by bin index.
    ///
    /// Consumes `values` once. Range policy is strict: any value outside
    /// `[low, high)` (non-finite values included) fails the whole count with
    /// [`HistogramError::OutOfRange`]; nothing is silently dropped.
    pub fn count<I>(&self, values: I) -> Result<BTreeMap<usize, u64>, HistogramError>
    where
        I: IntoIterator<Item = f64>,
    {
        let mut counts = BTreeMap::new();
        for value in values {
            *counts.entry(self.checked_index(value)?).or_insert(0) += 1;
        }
        Ok(counts)
    }

    fn checked_index(&self, value: f64) -> Result<usize, HistogramError> {
        let (low, high) = self.bounds;
        // NaN survives the division and casts to 0; reject it up front.
        if !value.is_finite() {
            return Err(HistogramError::OutOfRange { value, low, high });
        }
        let index = self.find_bin_index(value);
        if index < 0 || index >= self.number_of_bins as i64 {
            return Err(HistogramError::OutOfRange { value, low, high });
        }
        Ok(index as usize)
    }
}
