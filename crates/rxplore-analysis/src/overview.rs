use rxplore_dataset::{Dataset, normalize::NormalizationReport};
use rxplore_stats::value_counts::ValueCounts;
use serde::Serialize;

use crate::{
    class_ratings::ClassRatings,
    frequency::{top_conditions, top_side_effects},
    rating::RatingDistribution,
};

/// Sizes of the aggregated views.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverviewOptions {
    pub top_conditions: usize,
    pub top_side_effects: usize,
    pub top_classes: usize,
    pub rating_bins: usize,
}

impl Default for OverviewOptions {
    fn default() -> Self {
        Self {
            top_conditions: 10,
            top_side_effects: 10,
            top_classes: 5,
            rating_bins: 10,
        }
    }
}

/// Every chart-ready aggregation of a dataset.
#[derive(Debug, Clone, Serialize)]
pub struct Overview {
    pub rows: usize,
    pub columns: usize,
    pub normalization: NormalizationReport,
    pub rating: RatingDistribution,
    pub top_conditions: ValueCounts,
    pub top_side_effects: ValueCounts,
    pub class_ratings: ClassRatings,
}

impl Overview {
    #[must_use]
    pub fn new(dataset: &Dataset, options: &OverviewOptions) -> Self {
        Self {
            rows: dataset.len(),
            columns: dataset.headers().len(),
            normalization: dataset.report().clone(),
            rating: RatingDistribution::from_dataset(dataset, options.rating_bins),
            top_conditions: top_conditions(dataset, options.top_conditions),
            top_side_effects: top_side_effects(dataset, options.top_side_effects),
            class_ratings: ClassRatings::from_dataset(dataset, options.top_classes),
        }
    }
}
