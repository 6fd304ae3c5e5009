use std::fmt;

use serde::Serialize;

/// A column of the drug side-effects table that rxplore interprets.
///
/// Columns not listed here are carried through untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Column {
    DrugName,
    MedicalCondition,
    Activity,
    Alcohol,
    SideEffects,
    RelatedDrugs,
    Rating,
    NoOfReviews,
    GenericName,
    DrugClasses,
    RxOtc,
    PregnancyCategory,
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.name(), f)
    }
}

impl Column {
    pub const ALL: [Self; 12] = [
        Self::DrugName,
        Self::MedicalCondition,
        Self::Activity,
        Self::Alcohol,
        Self::SideEffects,
        Self::RelatedDrugs,
        Self::Rating,
        Self::NoOfReviews,
        Self::GenericName,
        Self::DrugClasses,
        Self::RxOtc,
        Self::PregnancyCategory,
    ];

    /// Free-text categorical columns whose missing values become `"Unknown"`.
    pub const TEXT_FIELDS: [Self; 6] = [
        Self::SideEffects,
        Self::RelatedDrugs,
        Self::GenericName,
        Self::DrugClasses,
        Self::RxOtc,
        Self::PregnancyCategory,
    ];

    /// Returns the header name of the column.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::DrugName => "drug_name",
            Self::MedicalCondition => "medical_condition",
            Self::Activity => "activity",
            Self::Alcohol => "alcohol",
            Self::SideEffects => "side_effects",
            Self::RelatedDrugs => "related_drugs",
            Self::Rating => "rating",
            Self::NoOfReviews => "no_of_reviews",
            Self::GenericName => "generic_name",
            Self::DrugClasses => "drug_classes",
            Self::RxOtc => "rx_otc",
            Self::PregnancyCategory => "pregnancy_category",
        }
    }

    /// Looks up a column by its header name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|column| column.name() == name)
    }

    /// Whether loading fails when the column is absent.
    #[must_use]
    pub const fn is_required(self) -> bool {
        !matches!(self, Self::DrugName)
    }

    #[must_use]
    pub fn is_text_field(self) -> bool {
        Self::TEXT_FIELDS.contains(&self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_round_trip() {
        for column in Column::ALL {
            assert_eq!(Column::from_name(column.name()), Some(column));
        }
        assert_eq!(Column::from_name("brand_names"), None);
    }

    #[test]
    fn test_required_columns() {
        let required = Column::ALL
            .into_iter()
            .filter(|c| c.is_required())
            .count();
        assert_eq!(required, 11);
        assert!(!Column::DrugName.is_required());
    }
}
