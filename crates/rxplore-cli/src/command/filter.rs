use std::{io, path::PathBuf};

use anyhow::{Context, bail};
use rxplore_analysis::condition::ConditionFilter;
use rxplore_dataset::Dataset;

use crate::{
    command::DatasetArg,
    session::Session,
    util::{self, Output},
};

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, derive_more::FromStr)]
pub(crate) enum RowFormat {
    #[default]
    Table,
    Csv,
    Json,
}

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct FilterArg {
    #[command(flatten)]
    dataset: DatasetArg,

    /// Medical condition to keep (exact match)
    #[arg(long)]
    condition: String,

    /// Output format: table, csv or json
    #[arg(long, default_value = "table")]
    format: RowFormat,

    /// Output file path (default: stdout)
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &FilterArg) -> anyhow::Result<()> {
    let FilterArg {
        dataset,
        condition,
        format,
        output,
    } = arg;

    let session = Session::open(&dataset.file, dataset.load_options())?;
    let dataset = session.dataset();

    let filter = ConditionFilter::new(dataset);
    if filter.conditions().binary_search(condition).is_err() {
        bail!(
            "No rows with medical condition {condition:?} (see `rxplore conditions` for the list)"
        );
    }

    let mut output = Output::from_output_path(output.clone())?;
    match format {
        RowFormat::Json => {
            let rows = ConditionFilter::select(dataset, condition)
                .map(|record| dataset.row(record))
                .collect::<Vec<_>>();
            tracing::info!("Selected {} rows", rows.len());
            output.write_json(&rows)?;
        }
        RowFormat::Csv => {
            dataset
                .write_records(&mut output, ConditionFilter::select(dataset, condition))
                .with_context(|| format!("Failed to write CSV to {}", output.display_path()))?;
            output.finish()?;
        }
        RowFormat::Table => {
            write_table(&mut output, dataset, condition)
                .with_context(|| format!("Failed to write rows to {}", output.display_path()))?;
            output.finish()?;
        }
    }
    Ok(())
}

fn write_table<W>(out: &mut W, dataset: &Dataset, condition: &str) -> io::Result<()>
where
    W: io::Write,
{
    let rows = ConditionFilter::select(dataset, condition)
        .map(|record| util::record_cells(dataset, record))
        .collect::<Vec<_>>();
    writeln!(out, "{} rows with medical condition {condition:?}", rows.len())?;
    util::write_text_table(out, dataset.headers(), &rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::sample_dataset;

    #[test]
    fn test_format_parsing() {
        assert_eq!("table".parse::<RowFormat>().unwrap(), RowFormat::Table);
        assert_eq!("csv".parse::<RowFormat>().unwrap(), RowFormat::Csv);
        assert_eq!("json".parse::<RowFormat>().unwrap(), RowFormat::Json);
        assert!("xml".parse::<RowFormat>().is_err());
    }

    #[test]
    fn test_table_keeps_matching_rows_in_order() {
        let dataset = sample_dataset();
        let mut out = vec![];
        write_table(&mut out, &dataset, "Pain").unwrap();
        let text = String::from_utf8(out).unwrap();

        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("2 rows with medical condition \"Pain\""));
        let body = lines.skip(2).collect::<Vec<_>>();
        assert_eq!(body.len(), 2);
        assert!(body[0].trim_start().starts_with("ibuprofen"));
        assert!(body[1].trim_start().starts_with("naproxen"));
    }

    #[test]
    fn test_csv_rows() {
        let dataset = sample_dataset();
        let mut out = vec![];
        dataset
            .write_records(&mut out, ConditionFilter::select(&dataset, "Acne"))
            .unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().count(), 3);
        assert!(text.lines().nth(1).unwrap().starts_with("doxycycline,Acne,"));
    }
}
