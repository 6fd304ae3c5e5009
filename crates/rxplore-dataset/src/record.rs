use std::borrow::Cow;

use serde::{Serialize, Serializer};

use crate::column::Column;

/// Alcohol interaction flag of a drug.
///
/// The source column marks interacting drugs with `X` and leaves the others
/// blank; any other content is kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::IsVariant)]
pub enum AlcoholFlag {
    /// No marker (numeric value 0).
    #[display("0")]
    Absent,
    /// `X` marker (numeric value 1).
    #[display("1")]
    Present,
    /// Any other original value.
    #[display("{_0}")]
    Other(String),
}

impl AlcoholFlag {
    /// Numeric view of the flag.
    ///
    /// `Other` values are parsed as numbers and become NaN when they are not numeric.
    #[must_use]
    pub fn as_number(&self) -> f64 {
        match self {
            Self::Absent => 0.0,
            Self::Present => 1.0,
            Self::Other(text) => text.trim().parse().unwrap_or(f64::NAN),
        }
    }
}

impl Serialize for AlcoholFlag {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Absent => serializer.serialize_u8(0),
            Self::Present => serializer.serialize_u8(1),
            Self::Other(text) => serializer.serialize_str(text),
        }
    }
}

/// A normalized row of the drug side-effects table.
#[derive(Debug, Clone, PartialEq)]
pub struct DrugRecord {
    pub drug_name: Option<String>,
    /// Not normalized: a missing condition stays `None`.
    pub medical_condition: Option<String>,
    /// Fraction in `[0, 1]`, or NaN when the source was not a percentage.
    pub activity: f64,
    pub alcohol: AlcoholFlag,
    pub side_effects: String,
    pub related_drugs: String,
    pub rating: f64,
    pub no_of_reviews: f64,
    pub generic_name: String,
    pub drug_classes: String,
    pub rx_otc: String,
    pub pregnancy_category: String,
    /// Cells of uninterpreted columns, aligned with the dataset's passthrough headers.
    pub passthrough: Vec<Option<String>>,
}

impl DrugRecord {
    /// Returns the value of a free-text categorical column.
    ///
    /// Returns `None` for columns that are not text fields.
    #[must_use]
    pub fn text(&self, column: Column) -> Option<&str> {
        let value = match column {
            Column::SideEffects => &self.side_effects,
            Column::RelatedDrugs => &self.related_drugs,
            Column::GenericName => &self.generic_name,
            Column::DrugClasses => &self.drug_classes,
            Column::RxOtc => &self.rx_otc,
            Column::PregnancyCategory => &self.pregnancy_category,
            _ => return None,
        };
        Some(value)
    }

    /// Formats the value of `column` the way it is written back to CSV.
    ///
    /// Missing values and NaN render as an empty string.
    #[must_use]
    pub fn display_value(&self, column: Column) -> Cow<'_, str> {
        match column {
            Column::DrugName => optional_text(self.drug_name.as_deref()),
            Column::MedicalCondition => optional_text(self.medical_condition.as_deref()),
            Column::Activity => format_number(self.activity),
            Column::Alcohol => Cow::Owned(self.alcohol.to_string()),
            Column::Rating => format_number(self.rating),
            Column::NoOfReviews => format_number(self.no_of_reviews),
            Column::SideEffects
            | Column::RelatedDrugs
            | Column::GenericName
            | Column::DrugClasses
            | Column::RxOtc
            | Column::PregnancyCategory => {
                Cow::Borrowed(self.text(column).unwrap_or_default())
            }
        }
    }
}

fn optional_text(value: Option<&str>) -> Cow<'_, str> {
    Cow::Borrowed(value.unwrap_or_default())
}

fn format_number(value: f64) -> Cow<'static, str> {
    if value.is_nan() {
        Cow::Borrowed("")
    } else {
        Cow::Owned(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alcohol_numeric_view() {
        assert_eq!(AlcoholFlag::Absent.as_number(), 0.0);
        assert_eq!(AlcoholFlag::Present.as_number(), 1.0);
        assert_eq!(AlcoholFlag::Other("2".to_owned()).as_number(), 2.0);
        assert!(AlcoholFlag::Other("maybe".to_owned()).as_number().is_nan());
    }

    #[test]
    fn test_alcohol_display() {
        assert_eq!(AlcoholFlag::Absent.to_string(), "0");
        assert_eq!(AlcoholFlag::Present.to_string(), "1");
        assert_eq!(AlcoholFlag::Other("Y".to_owned()).to_string(), "Y");
    }

    #[test]
    fn test_number_formatting() {
        assert_eq!(format_number(0.75), "0.75");
        assert_eq!(format_number(8.0), "8");
        assert_eq!(format_number(f64::NAN), "");
    }
}
