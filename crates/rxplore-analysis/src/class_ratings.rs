use std::collections::HashMap;

use rxplore_dataset::{Dataset, DrugRecord};
use rxplore_stats::box_plot::BoxSummary;
use serde::Serialize;

use crate::frequency::top_drug_classes;

/// Ratings of the rows belonging to the most frequent drug classes.
#[derive(Debug, Clone, Serialize)]
pub struct ClassRatings {
    /// One group per selected class, in order of first appearance in the dataset.
    pub groups: Vec<ClassGroup>,
    /// Indices of the rows whose class is one of the selected classes, in input order.
    #[serde(skip)]
    pub rows: Vec<usize>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ClassGroup {
    pub drug_class: String,
    pub summary: BoxSummary,
}

impl ClassRatings {
    /// Selects the `n` most frequent drug classes and summarizes their ratings.
    #[must_use]
    pub fn from_dataset(dataset: &Dataset, n: usize) -> Self {
        let top = top_drug_classes(dataset, n);
        let selected = top
            .entries()
            .iter()
            .map(|entry| entry.value.as_str())
            .collect::<Vec<_>>();

        let mut rows = vec![];
        let mut ratings = HashMap::<&str, Vec<f64>>::new();
        let mut order = vec![];
        for (idx, record) in dataset.records().iter().enumerate() {
            let class = record.drug_classes.as_str();
            if !selected.contains(&class) {
                continue;
            }
            rows.push(idx);
            ratings
                .entry(class)
                .or_insert_with(|| {
                    order.push(class);
                    vec![]
                })
                .push(record.rating);
        }

        let groups = order
            .into_iter()
            .filter_map(|class| {
                let summary = BoxSummary::new(ratings.remove(class)?)?;
                Some(ClassGroup {
                    drug_class: class.to_owned(),
                    summary,
                })
            })
            .collect();

        Self { groups, rows }
    }

    /// Returns the selected rows.
    pub fn records<'a>(&'a self, dataset: &'a Dataset) -> impl Iterator<Item = &'a DrugRecord> {
        self.rows.iter().map(|&idx| &dataset.records()[idx])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::dataset_from_rows;

    #[test]
    fn test_groups_follow_first_appearance() {
        let dataset = dataset_from_rows(&[
            ("Acne", "Rare", "x", "3"),
            ("Acne", "Second", "x", "6"),
            ("Acne", "First", "x", "8"),
            ("Acne", "First", "x", "9"),
            ("Acne", "Second", "x", "4"),
            ("Acne", "First", "x", "10"),
        ]);
        let ratings = ClassRatings::from_dataset(&dataset, 2);

        let classes = ratings
            .groups
            .iter()
            .map(|g| g.drug_class.as_str())
            .collect::<Vec<_>>();
        assert_eq!(classes, ["Second", "First"]);
        assert_eq!(ratings.rows, [1, 2, 3, 4, 5]);
        assert_eq!(ratings.groups[1].summary.count, 3);
        assert_eq!(ratings.groups[1].summary.median, 9.0);
        assert_eq!(ratings.groups[0].summary.median, 5.0);
        assert!(
            ratings
                .records(&dataset)
                .all(|r| r.drug_classes != "Rare")
        );
    }

    #[test]
    fn test_fewer_classes_than_requested() {
        let dataset = dataset_from_rows(&[("Acne", "Only", "x", "3")]);
        let ratings = ClassRatings::from_dataset(&dataset, 5);
        assert_eq!(ratings.groups.len(), 1);
        assert_eq!(ratings.rows, [0]);
    }
}
