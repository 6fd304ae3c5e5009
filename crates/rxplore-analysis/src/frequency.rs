use rxplore_dataset::{Dataset, normalize::tokenize_side_effects};
use rxplore_stats::value_counts::ValueCounts;

/// Counts medical conditions and keeps the `n` most frequent.
///
/// Rows without a condition are not counted.
#[must_use]
pub fn top_conditions(dataset: &Dataset, n: usize) -> ValueCounts {
    ValueCounts::new(
        dataset
            .records()
            .iter()
            .filter_map(|r| r.medical_condition.as_deref()),
    )
    .truncated(n)
}

/// Counts individual side effects across all rows and keeps the `n` most frequent.
///
/// Each row contributes every token of its side-effects text, so one row
/// may count towards several side effects. Empty tokens left by doubled or
/// trailing delimiters are counted as the empty string.
#[must_use]
pub fn top_side_effects(dataset: &Dataset, n: usize) -> ValueCounts {
    ValueCounts::new(
        dataset
            .records()
            .iter()
            .flat_map(|r| tokenize_side_effects(&r.side_effects)),
    )
    .truncated(n)
}

/// Counts drug classes and keeps the `n` most frequent.
#[must_use]
pub fn top_drug_classes(dataset: &Dataset, n: usize) -> ValueCounts {
    ValueCounts::new(dataset.records().iter().map(|r| r.drug_classes.as_str())).truncated(n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::dataset_from_rows;

    #[test]
    fn test_top_conditions_skip_missing() {
        let dataset = dataset_from_rows(&[
            ("Acne", "A", "x", "1"),
            ("", "A", "x", "1"),
            ("Pain", "A", "x", "1"),
            ("Acne", "A", "x", "1"),
            ("", "A", "x", "1"),
        ]);
        let top = top_conditions(&dataset, 10);
        assert_eq!(top.top(10).collect::<Vec<_>>(), [("Acne", 2), ("Pain", 1)]);
        assert_eq!(top_conditions(&dataset, 1).len(), 1);
    }

    #[test]
    fn test_top_side_effects_expand_rows() {
        let dataset = dataset_from_rows(&[
            ("Acne", "A", "nausea; dizziness,headache", "1"),
            ("Acne", "A", "headache\nnausea;", "1"),
            ("Acne", "A", "", "1"),
        ]);
        let top = top_side_effects(&dataset, 10);
        assert_eq!(
            top.top(10).collect::<Vec<_>>(),
            [
                ("nausea", 2),
                ("headache", 2),
                ("dizziness", 1),
                ("", 1),
                ("Unknown", 1)
            ]
        );
    }

    #[test]
    fn test_top_side_effects_count_empty_tokens() {
        let dataset = dataset_from_rows(&[
            ("Acne", "A", "nausea;;rash", "1"),
            ("Acne", "A", "rash, ,", "1"),
        ]);
        let top = top_side_effects(&dataset, 10);
        assert_eq!(
            top.top(10).collect::<Vec<_>>(),
            [("", 3), ("rash", 2), ("nausea", 1)]
        );
    }

    #[test]
    fn test_top_drug_classes_include_unknown() {
        let dataset = dataset_from_rows(&[
            ("Acne", "", "x", "1"),
            ("Acne", "", "x", "1"),
            ("Acne", "Tetracyclines", "x", "1"),
        ]);
        let top = top_drug_classes(&dataset, 5);
        assert_eq!(
            top.top(5).collect::<Vec<_>>(),
            [("Unknown", 2), ("Tetracyclines", 1)]
        );
    }
}
