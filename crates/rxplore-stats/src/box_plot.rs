use serde::Serialize;

use crate::percentiles::compute_percentile;

/// Five-number summary backing a box-and-whisker plot.
///
/// The box spans the first to third quartile. Whiskers reach the most
/// extreme observations within `1.5 * IQR` of the box; anything beyond is
/// reported as an outlier.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoxSummary {
    /// Number of observations summarized.
    pub count: usize,
    /// Lower whisker end.
    pub lower_whisker: f64,
    /// First quartile (P25).
    pub q1: f64,
    /// Median (P50).
    pub median: f64,
    /// Third quartile (P75).
    pub q3: f64,
    /// Upper whisker end.
    pub upper_whisker: f64,
    /// Observations outside the whiskers, in ascending order.
    pub outliers: Vec<f64>,
}

impl BoxSummary {
    /// Computes the summary of unsorted values, skipping NaN and infinities.
    ///
    /// Returns `None` if no value remains.
    ///
    /// # Examples
    ///
    /// ```
    /// # use rxplore_stats::box_plot::BoxSummary;
    /// let summary = BoxSummary::new([1.0, 2.0, 3.0, 4.0, 5.0, 100.0]).unwrap();
    /// assert_eq!(summary.median, 3.5);
    /// assert_eq!(summary.upper_whisker, 5.0);
    /// assert_eq!(summary.outliers, [100.0]);
    /// ```
    #[must_use]
    pub fn new<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        let mut sorted = values
            .into_iter()
            .filter(|v| v.is_finite())
            .collect::<Vec<_>>();
        if sorted.is_empty() {
            return None;
        }
        sorted.sort_by(f64::total_cmp);

        let q1 = compute_percentile(&sorted, 25.0);
        let median = compute_percentile(&sorted, 50.0);
        let q3 = compute_percentile(&sorted, 75.0);
        let fence = 1.5 * (q3 - q1);
        let (low_fence, high_fence) = (q1 - fence, q3 + fence);

        let inside = sorted
            .iter()
            .copied()
            .filter(|v| (low_fence..=high_fence).contains(v));
        let lower_whisker = inside.clone().next().unwrap_or(q1);
        let upper_whisker = inside.last().unwrap_or(q3);
        let outliers = sorted
            .iter()
            .copied()
            .filter(|v| !(low_fence..=high_fence).contains(v))
            .collect();

        Some(Self {
            count: sorted.len(),
            lower_whisker,
            q1,
            median,
            q3,
            upper_whisker,
            outliers,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_values() {
        assert!(BoxSummary::new([]).is_none());
        assert!(BoxSummary::new([f64::NAN]).is_none());
        assert!(BoxSummary::new([f64::INFINITY, f64::NEG_INFINITY]).is_none());
    }

    #[test]
    fn test_infinities_are_skipped() {
        let summary = BoxSummary::new([f64::NEG_INFINITY, 1.0, 2.0, 3.0, f64::INFINITY]).unwrap();
        assert_eq!(summary.count, 3);
        assert_eq!(summary.q1, 1.5);
        assert_eq!(summary.lower_whisker, 1.0);
        assert_eq!(summary.upper_whisker, 3.0);
    }

    #[test]
    fn test_single_value() {
        let summary = BoxSummary::new([6.0]).unwrap();
        assert_eq!(summary.count, 1);
        assert_eq!(summary.lower_whisker, 6.0);
        assert_eq!(summary.upper_whisker, 6.0);
        assert_eq!(summary.q1, summary.q3);
        assert!(summary.outliers.is_empty());
    }

    #[test]
    fn test_low_outliers() {
        let summary = BoxSummary::new([0.0, 7.0, 7.5, 8.0, 8.5, 9.0]).unwrap();
        assert_eq!(summary.outliers, [0.0]);
        assert_eq!(summary.lower_whisker, 7.0);
        assert_eq!(summary.upper_whisker, 9.0);
    }
}
