use std::ops::Range;

use serde::Serialize;

/// A histogram representation of a dataset's distribution.
///
/// The data range `[min, max]` is divided into equally wide bins. Every bin
/// is half-open except the last one, which also contains `max`, so each
/// value falls into exactly one bin.
#[derive(Debug, Clone, Serialize)]
pub struct Histogram {
    /// The bins comprising the histogram, in ascending order.
    pub bins: Vec<HistogramBin>,
}

/// A single bin in a histogram.
#[derive(Debug, Clone, Serialize)]
pub struct HistogramBin {
    /// The range of values covered by this bin (inclusive start, exclusive end).
    pub range: Range<f64>,
    /// The number of values that fall within this bin's range.
    pub count: u64,
}

impl Histogram {
    /// Creates a histogram with `num_bins` equal-width bins.
    ///
    /// NaN and infinite values are skipped. When every value is equal the range is widened
    /// to `value - 0.5 .. value + 0.5` so that bins keep a non-zero width.
    ///
    /// # Examples
    ///
    /// ```
    /// # use rxplore_stats::histogram::Histogram;
    /// let values = [1.0, 2.0, 2.5, 4.0, 5.0];
    /// let histogram = Histogram::new(values, 4);
    /// let counts = histogram.bins.iter().map(|b| b.count).collect::<Vec<_>>();
    /// assert_eq!(counts, [1, 2, 0, 2]);
    /// ```
    #[expect(
        clippy::cast_precision_loss,
        clippy::cast_sign_loss,
        clippy::cast_possible_truncation
    )]
    #[must_use]
    pub fn new<I>(values: I, num_bins: usize) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        let values = values
            .into_iter()
            .filter(|v| v.is_finite())
            .collect::<Vec<_>>();
        if values.is_empty() || num_bins == 0 {
            return Self { bins: vec![] };
        }

        let mut min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let mut max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        if max - min < f64::EPSILON {
            min -= 0.5;
            max += 0.5;
        }
        // Divide before subtracting so that ranges wider than f64::MAX stay finite
        let width = max / num_bins as f64 - min / num_bins as f64;

        // Recompute edges from `min` to avoid accumulating rounding errors
        let edge = |idx: usize| {
            if idx == num_bins {
                max
            } else {
                min + width * idx as f64
            }
        };
        let mut bins = (0..num_bins)
            .map(|idx| HistogramBin {
                range: edge(idx)..edge(idx + 1),
                count: 0,
            })
            .collect::<Vec<_>>();

        for val in values {
            let idx = ((val / width - min / width).floor() as usize).min(num_bins - 1);
            bins[idx].count += 1;
        }

        Self { bins }
    }

    /// Returns the common width of the bins, or `None` for an empty histogram.
    #[must_use]
    pub fn bin_width(&self) -> Option<f64> {
        self.bins.first().map(|bin| bin.range.end - bin.range.start)
    }

    /// Returns the largest bin count.
    #[must_use]
    pub fn max_count(&self) -> u64 {
        self.bins.iter().map(|bin| bin.count).max().unwrap_or(0)
    }

    /// Returns the total number of values counted.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.bins.iter().map(|bin| bin.count).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_values() {
        assert!(Histogram::new([], 10).bins.is_empty());
        assert!(Histogram::new([1.0, 2.0], 0).bins.is_empty());
    }

    #[test]
    fn test_max_lands_in_last_bin() {
        let histogram = Histogram::new([0.0, 10.0], 10);
        assert_eq!(histogram.bins.len(), 10);
        assert_eq!(histogram.bins[0].count, 1);
        assert_eq!(histogram.bins[9].count, 1);
        assert_eq!(histogram.total(), 2);
        assert!((histogram.bin_width().unwrap() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_constant_values_widen_range() {
        let histogram = Histogram::new([3.0, 3.0, 3.0], 2);
        assert_eq!(histogram.bins.len(), 2);
        assert!((histogram.bins[0].range.start - 2.5).abs() < 1e-12);
        assert!((histogram.bins[1].range.end - 3.5).abs() < 1e-12);
        assert_eq!(histogram.bins[1].count, 3);
        assert_eq!(histogram.max_count(), 3);
    }

    #[test]
    fn test_non_finite_is_skipped() {
        let histogram = Histogram::new([1.0, f64::NAN, 2.0, f64::INFINITY], 2);
        assert_eq!(histogram.total(), 2);
        assert_eq!(histogram.bins[0].count, 1);
        assert_eq!(histogram.bins[1].count, 1);
    }

    #[test]
    fn test_extreme_range_spreads_values() {
        let histogram = Histogram::new([1e308, -1e308, 5.0], 10);
        assert_eq!(histogram.total(), 3);
        assert_eq!(histogram.bins[0].count, 1);
        assert_eq!(histogram.bins[9].count, 1);
        assert_eq!(histogram.max_count(), 1);
        assert!(histogram.bin_width().unwrap().is_finite());
    }
}
