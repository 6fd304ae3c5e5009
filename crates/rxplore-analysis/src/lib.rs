//! Chart-ready aggregations over a normalized drug dataset.
//!
//! - [`rating`]: rating histogram with a density overlay
//! - [`frequency`]: top conditions, side effects and drug classes
//! - [`class_ratings`]: rating box summaries of the most common drug classes
//! - [`condition`]: the condition picker and the rows it selects
//! - [`overview`]: all of the above bundled for reports

pub mod class_ratings;
pub mod condition;
pub mod frequency;
pub mod overview;
pub mod rating;

#[cfg(test)]
mod test_util {
    use rxplore_dataset::{Dataset, LoadOptions};

    /// Builds a dataset from `(medical_condition, drug_classes, side_effects, rating)` rows.
    ///
    /// Empty strings become missing cells.
    pub(crate) fn dataset_from_rows(rows: &[(&str, &str, &str, &str)]) -> Dataset {
        let mut csv = String::from(
            "drug_name,medical_condition,activity,alcohol,side_effects,related_drugs,rating,no_of_reviews,generic_name,drug_classes,rx_otc,pregnancy_category\n",
        );
        for (idx, (condition, class, side_effects, rating)) in rows.iter().enumerate() {
            let fields = [
                format!("drug{idx}"),
                (*condition).to_owned(),
                "50%".to_owned(),
                String::new(),
                (*side_effects).to_owned(),
                String::new(),
                (*rating).to_owned(),
                "1".to_owned(),
                format!("generic{idx}"),
                (*class).to_owned(),
                "Rx".to_owned(),
                "C".to_owned(),
            ];
            let quoted = fields
                .iter()
                .map(|f| format!("\"{}\"", f.replace('"', "\"\"")))
                .collect::<Vec<_>>();
            csv.push_str(&quoted.join(","));
            csv.push('\n');
        }
        Dataset::from_reader(csv.as_bytes(), &LoadOptions::default()).unwrap()
    }
}
