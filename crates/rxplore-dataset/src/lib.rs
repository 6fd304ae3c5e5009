//! Loading and normalization of drug side-effects tables.
//!
//! A [`Dataset`] is read from CSV and normalized once: percentages become
//! fractions, the alcohol marker becomes an [`AlcoholFlag`], malformed
//! numbers become 0 and missing categorical text becomes `"Unknown"`.
//! Rows are never dropped or reordered.
//!
//! ```
//! use rxplore_dataset::{AlcoholFlag, Dataset, LoadOptions};
//!
//! let csv = "\
//! drug_name,medical_condition,activity,alcohol,side_effects,related_drugs,rating,no_of_reviews,generic_name,drug_classes,rx_otc,pregnancy_category
//! doxycycline,Acne,75%,X,nausea,,N/A,12,doxycycline,Tetracyclines,Rx,D
//! ";
//! let dataset = Dataset::from_reader(csv.as_bytes(), &LoadOptions::default()).unwrap();
//! let record = &dataset.records()[0];
//! assert_eq!(record.activity, 0.75);
//! assert_eq!(record.alcohol, AlcoholFlag::Present);
//! assert_eq!(record.rating, 0.0);
//! assert_eq!(record.related_drugs, "Unknown");
//! ```

pub use self::{
    column::Column,
    dataset::{Dataset, LoadOptions, RowView},
    error::{LoadDatasetError, WriteDatasetError},
    record::{AlcoholFlag, DrugRecord},
};

pub mod column;
pub mod dataset;
pub mod error;
pub mod normalize;
pub mod record;
