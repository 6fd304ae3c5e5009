use rxplore_dataset::Dataset;
use rxplore_stats::{
    descriptive::DescriptiveStats, histogram::Histogram, kde::KernelDensity,
    percentiles::Percentiles,
};
use serde::Serialize;

/// Number of points the density curve is evaluated at.
const DENSITY_POINTS: usize = 100;

/// Percentile points reported alongside the histogram.
pub const PERCENTILE_POINTS: [f64; 5] = [10.0, 25.0, 50.0, 75.0, 90.0];

/// Distribution of the `rating` column: histogram with a density overlay.
#[derive(Debug, Clone, Serialize)]
pub struct RatingDistribution {
    pub stats: Option<DescriptiveStats>,
    pub percentiles: Percentiles,
    pub histogram: Histogram,
    /// Kernel density estimate scaled to histogram counts, as `(rating, count)` points.
    ///
    /// Empty when the ratings have no spread.
    pub density: Vec<(f64, f64)>,
}

impl RatingDistribution {
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn from_dataset(dataset: &Dataset, num_bins: usize) -> Self {
        let ratings = dataset.records().iter().map(|r| r.rating);
        let stats = DescriptiveStats::new(ratings.clone());
        let percentiles = Percentiles::new(&ratings.clone().collect::<Vec<_>>(), &PERCENTILE_POINTS);
        let histogram = Histogram::new(ratings.clone(), num_bins);

        let density = match (KernelDensity::new(ratings), histogram.bin_width()) {
            (Some(kde), Some(bin_width)) => {
                let start = histogram.bins[0].range.start;
                let end = histogram.bins[histogram.bins.len() - 1].range.end;
                let scale = histogram.total() as f64 * bin_width;
                kde.curve(start, end, DENSITY_POINTS)
                    .into_iter()
                    .map(|(x, y)| (x, y * scale))
                    .collect()
            }
            _ => vec![],
        };

        Self {
            stats,
            percentiles,
            histogram,
            density,
        }
    }
}
