//! Per-column cleaning of raw drug table cells.
//!
//! Every operation is total: malformed input degrades to a default value
//! (0, NaN or `"Unknown"`) instead of rejecting the row, so that dirty
//! cells never block the rest of the dataset.
//!
//! Raw cells are passed as `Option<&str>`, where `None` means the row had
//! no cell for the column at all.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::{
    column::Column,
    record::{AlcoholFlag, DrugRecord},
};

/// Placeholder written into missing free-text cells.
pub const UNKNOWN: &str = "Unknown";

/// Cell contents treated as missing, besides the empty string.
const NULL_TOKENS: &[&str] = &[
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Returns whether a raw cell counts as missing.
///
/// A cell is missing when it is empty or exactly one of the usual CSV null
/// markers such as `NA`, `N/A` or `null`. Cells are compared untrimmed, so
/// `" "` and `" NA"` are ordinary text.
#[must_use]
pub fn is_missing(value: &str) -> bool {
    value.is_empty() || NULL_TOKENS.contains(&value)
}

/// Returns the cell text unless it is absent or missing.
#[must_use]
pub fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !is_missing(v))
}

/// Converts a percentage such as `"75%"` into the fraction `0.75`.
///
/// A trailing percent sign is optional. Anything that does not parse as a
/// number, including a missing cell, yields NaN.
///
/// A value that is already a fraction is divided again: `"0.75"` becomes
/// `0.0075`.
#[must_use]
pub fn normalize_activity(value: Option<&str>) -> f64 {
    let Some(text) = present(value) else {
        return f64::NAN;
    };
    let text = text.trim();
    let text = text.strip_suffix('%').unwrap_or(text).trim_end();
    text.parse::<f64>().map_or(f64::NAN, |v| v / 100.0)
}

/// Interprets the alcohol interaction marker.
///
/// Missing becomes [`AlcoholFlag::Absent`], the exact marker `X` becomes
/// [`AlcoholFlag::Present`], and everything else is kept verbatim.
#[must_use]
pub fn normalize_alcohol(value: Option<&str>) -> AlcoholFlag {
    match present(value) {
        None => AlcoholFlag::Absent,
        Some("X") => AlcoholFlag::Present,
        Some(other) => AlcoholFlag::Other(other.to_owned()),
    }
}

/// Replaces a missing free-text cell with [`UNKNOWN`].
#[must_use]
pub fn normalize_text_field(value: Option<&str>) -> String {
    present(value).unwrap_or(UNKNOWN).to_owned()
}

/// Parses a numeric cell, substituting 0 for anything unparseable, NaN or
/// infinite.
#[must_use]
pub fn normalize_numeric(value: Option<&str>) -> f64 {
    parse_finite(value).unwrap_or(0.0)
}

fn parse_finite(value: Option<&str>) -> Option<f64> {
    present(value)
        .and_then(|text| text.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite())
}

/// Splits a side-effects description into individual side effects.
///
/// The text is split on `;`, `,` and newlines and every piece is trimmed.
/// Empty pieces are yielded as well, so `"a;;b"` gives three tokens.
///
/// ```
/// # use rxplore_dataset::normalize::tokenize_side_effects;
/// let tokens = tokenize_side_effects("nausea; dizziness,headache").collect::<Vec<_>>();
/// assert_eq!(tokens, ["nausea", "dizziness", "headache"]);
/// ```
pub fn tokenize_side_effects(text: &str) -> impl Iterator<Item = &str> {
    text.split([';', ',', '\n']).map(str::trim)
}

/// Access to the raw cells of one input row.
pub trait RawRow {
    /// Returns the raw cell for `column`, or `None` if the row has no such cell.
    fn get(&self, column: Column) -> Option<&str>;
}

/// Number of cells per column that were replaced by a default value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NormalizationReport {
    pub rows: usize,
    pub defaulted: BTreeMap<Column, usize>,
}

impl NormalizationReport {
    /// Returns how many cells of `column` were defaulted.
    #[must_use]
    pub fn defaulted(&self, column: Column) -> usize {
        self.defaulted.get(&column).copied().unwrap_or(0)
    }

    fn record(&mut self, column: Column, defaulted: bool) {
        if defaulted {
            *self.defaulted.entry(column).or_default() += 1;
        }
    }
}

/// Applies the per-column normalization to raw rows and keeps a tally of
/// defaulted cells.
#[derive(Debug, Default)]
pub struct DatasetNormalizer {
    report: NormalizationReport,
}

impl DatasetNormalizer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalizes one row. Passthrough cells are left empty for the caller to fill.
    pub fn normalize_row<R>(&mut self, row: &R) -> DrugRecord
    where
        R: RawRow + ?Sized,
    {
        self.report.rows += 1;

        let activity = normalize_activity(row.get(Column::Activity));
        self.report.record(Column::Activity, activity.is_nan());

        let alcohol = normalize_alcohol(row.get(Column::Alcohol));
        self.report.record(Column::Alcohol, alcohol.is_absent());

        let rating = self.numeric(row, Column::Rating);
        let no_of_reviews = self.numeric(row, Column::NoOfReviews);

        DrugRecord {
            drug_name: present(row.get(Column::DrugName)).map(str::to_owned),
            medical_condition: present(row.get(Column::MedicalCondition)).map(str::to_owned),
            activity,
            alcohol,
            side_effects: self.text_field(row, Column::SideEffects),
            related_drugs: self.text_field(row, Column::RelatedDrugs),
            rating,
            no_of_reviews,
            generic_name: self.text_field(row, Column::GenericName),
            drug_classes: self.text_field(row, Column::DrugClasses),
            rx_otc: self.text_field(row, Column::RxOtc),
            pregnancy_category: self.text_field(row, Column::PregnancyCategory),
            passthrough: vec![],
        }
    }

    /// Finishes normalization and returns the tally.
    #[must_use]
    pub fn finish(self) -> NormalizationReport {
        self.report
    }

    fn numeric<R>(&mut self, row: &R, column: Column) -> f64
    where
        R: RawRow + ?Sized,
    {
        let raw = row.get(column);
        self.report.record(column, parse_finite(raw).is_none());
        normalize_numeric(raw)
    }

    fn text_field<R>(&mut self, row: &R, column: Column) -> String
    where
        R: RawRow + ?Sized,
    {
        debug_assert!(column.is_text_field());
        let raw = row.get(column);
        self.report.record(column, present(raw).is_none());
        normalize_text_field(raw)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    impl RawRow for HashMap<Column, &str> {
        fn get(&self, column: Column) -> Option<&str> {
            HashMap::get(self, &column).copied()
        }
    }

    #[test]
    fn test_activity() {
        assert!((normalize_activity(Some("75%")) - 0.75).abs() < 1e-12);
        assert!((normalize_activity(Some(" 8 % ")) - 0.08).abs() < 1e-12);
        assert!((normalize_activity(Some("100")) - 1.0).abs() < 1e-12);
        assert!(normalize_activity(Some("high")).is_nan());
        assert!(normalize_activity(Some("")).is_nan());
        assert!(normalize_activity(None).is_nan());
    }

    #[test]
    fn test_activity_is_not_idempotent() {
        let once = normalize_activity(Some("75%"));
        let twice = normalize_activity(Some(&once.to_string()));
        assert!((twice - 0.0075).abs() < 1e-12);
    }

    #[test]
    fn test_alcohol() {
        assert_eq!(normalize_alcohol(None), AlcoholFlag::Absent);
        assert_eq!(normalize_alcohol(Some("")), AlcoholFlag::Absent);
        assert_eq!(normalize_alcohol(Some("X")), AlcoholFlag::Present);
        assert_eq!(
            normalize_alcohol(Some("x")),
            AlcoholFlag::Other("x".to_owned())
        );
        assert_eq!(
            normalize_alcohol(Some("1")),
            AlcoholFlag::Other("1".to_owned())
        );
    }

    #[test]
    fn test_text_field() {
        assert_eq!(normalize_text_field(None), "Unknown");
        assert_eq!(normalize_text_field(Some("NA")), "Unknown");
        assert_eq!(normalize_text_field(Some("Rx")), "Rx");
        assert_eq!(normalize_text_field(Some("Unknown")), "Unknown");
        assert_eq!(normalize_text_field(Some(" ")), " ");
    }

    #[test]
    fn test_numeric() {
        assert_eq!(normalize_numeric(Some("N/A")), 0.0);
        assert_eq!(normalize_numeric(Some("abc")), 0.0);
        assert_eq!(normalize_numeric(Some("nan")), 0.0);
        assert_eq!(normalize_numeric(Some("inf")), 0.0);
        assert_eq!(normalize_numeric(Some("-infinity")), 0.0);
        assert_eq!(normalize_numeric(Some("1e999")), 0.0);
        assert_eq!(normalize_numeric(None), 0.0);
        assert!((normalize_numeric(Some(" 6.8 ")) - 6.8).abs() < 1e-12);
        assert!((normalize_numeric(Some("42")) - 42.0).abs() < 1e-12);
    }

    #[test]
    fn test_numeric_is_idempotent() {
        for raw in ["7.5", "N/A", "12", ""] {
            let once = normalize_numeric(Some(raw));
            assert_eq!(normalize_numeric(Some(&once.to_string())), once);
        }
    }

    #[test]
    fn test_tokenize() {
        let tokens = tokenize_side_effects("hives;\n swelling , itching").collect::<Vec<_>>();
        assert_eq!(tokens, ["hives", "", "swelling", "itching"]);
        assert_eq!(tokenize_side_effects("Unknown").collect::<Vec<_>>(), ["Unknown"]);
    }

    #[test]
    fn test_missing_tokens() {
        assert!(is_missing(""));
        assert!(is_missing("NULL"));
        assert!(!is_missing("  "));
        assert!(!is_missing(" NA"));
        assert!(!is_missing("0"));
        assert!(!is_missing("X"));
    }

    #[test]
    fn test_normalize_row_reports_defaults() {
        let row = HashMap::from([
            (Column::MedicalCondition, "Acne"),
            (Column::Activity, "75%"),
            (Column::Rating, "N/A"),
            (Column::NoOfReviews, "14"),
            (Column::DrugClasses, "Miscellaneous antimalarials"),
        ]);
        let mut normalizer = DatasetNormalizer::new();
        let record = normalizer.normalize_row(&row);

        assert_eq!(record.medical_condition.as_deref(), Some("Acne"));
        assert_eq!(record.drug_name, None);
        assert!((record.activity - 0.75).abs() < 1e-12);
        assert_eq!(record.alcohol, AlcoholFlag::Absent);
        assert_eq!(record.rating, 0.0);
        assert!((record.no_of_reviews - 14.0).abs() < 1e-12);
        assert_eq!(record.side_effects, "Unknown");
        assert_eq!(record.drug_classes, "Miscellaneous antimalarials");

        let report = normalizer.finish();
        assert_eq!(report.rows, 1);
        assert_eq!(report.defaulted(Column::Rating), 1);
        assert_eq!(report.defaulted(Column::NoOfReviews), 0);
        assert_eq!(report.defaulted(Column::Alcohol), 1);
        assert_eq!(report.defaulted(Column::SideEffects), 1);
        assert_eq!(report.defaulted(Column::DrugClasses), 0);
        assert_eq!(report.defaulted(Column::Activity), 0);
    }
}
