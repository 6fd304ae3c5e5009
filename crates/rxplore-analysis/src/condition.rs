use std::collections::BTreeSet;

use rxplore_dataset::{Dataset, DrugRecord};

/// Selection of rows by medical condition.
#[derive(Debug, Clone)]
pub struct ConditionFilter {
    conditions: Vec<String>,
}

impl ConditionFilter {
    /// Collects the distinct non-missing conditions of the dataset, sorted.
    #[must_use]
    pub fn new(dataset: &Dataset) -> Self {
        let conditions = dataset
            .records()
            .iter()
            .filter_map(|r| r.medical_condition.as_deref())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_owned)
            .collect();
        Self { conditions }
    }

    /// Returns the selectable conditions in ascending order.
    #[must_use]
    pub fn conditions(&self) -> &[String] {
        &self.conditions
    }

    /// Returns the rows whose condition equals `condition`, in input order.
    pub fn select<'a>(
        dataset: &'a Dataset,
        condition: &'a str,
    ) -> impl Iterator<Item = &'a DrugRecord> + 'a {
        dataset
            .records()
            .iter()
            .filter(move |r| r.medical_condition.as_deref() == Some(condition))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::dataset_from_rows;

    fn sample() -> Dataset {
        dataset_from_rows(&[
            ("Pain", "A", "x", "1"),
            ("Acne", "A", "x", "2"),
            ("", "A", "x", "3"),
            ("Pain", "A", "x", "4"),
            ("acne", "A", "x", "5"),
        ])
    }

    #[test]
    fn test_conditions_sorted_and_distinct() {
        let filter = ConditionFilter::new(&sample());
        assert_eq!(filter.conditions(), ["Acne", "Pain", "acne"]);
    }

    #[test]
    fn test_select_exact_match_in_order() {
        let dataset = sample();
        let ratings = ConditionFilter::select(&dataset, "Pain")
            .map(|r| r.rating)
            .collect::<Vec<_>>();
        assert_eq!(ratings, [1.0, 4.0]);

        let acne = ConditionFilter::select(&dataset, "Acne").count();
        assert_eq!(acne, 1);
        assert_eq!(ConditionFilter::select(&dataset, "Flu").count(), 0);
        assert_eq!(ConditionFilter::select(&dataset, "").count(), 0);
    }
}
