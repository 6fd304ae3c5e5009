use std::{io, path::PathBuf};

use anyhow::Context;
use chrono::{DateTime, Local};
use rxplore_analysis::{
    class_ratings::ClassRatings,
    overview::{Overview, OverviewOptions},
    rating::RatingDistribution,
};
use rxplore_dataset::{Dataset, RowView, normalize::NormalizationReport};
use rxplore_stats::value_counts::ValueCounts;
use serde::Serialize;

use crate::{
    command::{ChartArgs, DatasetArg},
    session::Session,
    util::{self, Output},
};

/// Width of the longest histogram bar in text output.
const BAR_WIDTH: u64 = 40;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct SummaryArg {
    #[command(flatten)]
    pub(crate) dataset: DatasetArg,

    #[command(flatten)]
    pub(crate) charts: ChartArgs,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,

    /// Output file path (default: stdout)
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &SummaryArg) -> anyhow::Result<()> {
    let SummaryArg {
        dataset,
        charts,
        json,
        output,
    } = arg;

    let session = Session::open(&dataset.file, dataset.load_options())?;
    let report = SummaryReport::new(&session, &charts.overview_options(), charts.preview_rows());

    let mut output = Output::from_output_path(output.clone())?;
    if *json {
        output.write_json(&report)?;
    } else {
        write_summary(&mut output, &report, session.dataset())
            .with_context(|| format!("Failed to write summary to {}", output.display_path()))?;
        output.finish()?;
    }
    Ok(())
}

/// Everything `summary` prints.
#[derive(Debug, Serialize)]
pub(crate) struct SummaryReport<'a> {
    source: String,
    generated_at: DateTime<Local>,
    loaded_at: DateTime<Local>,
    #[serde(flatten)]
    overview: Overview,
    preview: Vec<RowView<'a>>,
}

impl<'a> SummaryReport<'a> {
    pub(crate) fn new(session: &'a Session, options: &OverviewOptions, preview_rows: usize) -> Self {
        let dataset = session.dataset();
        Self {
            source: session.path().display().to_string(),
            generated_at: Local::now(),
            loaded_at: session.loaded_at(),
            overview: Overview::new(dataset, options),
            preview: dataset
                .head(preview_rows)
                .iter()
                .map(|record| dataset.row(record))
                .collect(),
        }
    }
}

fn write_summary<W>(out: &mut W, report: &SummaryReport, dataset: &Dataset) -> io::Result<()>
where
    W: io::Write,
{
    let overview = &report.overview;
    writeln!(
        out,
        "Dataset: {} ({} rows, {} columns)",
        report.source, overview.rows, overview.columns
    )?;
    writeln!(
        out,
        "Generated at: {}",
        report.generated_at.format("%Y-%m-%d %H:%M:%S")
    )?;
    writeln!(out)?;

    write_normalization(out, &overview.normalization)?;
    writeln!(out)?;
    write_rating(out, &overview.rating)?;
    writeln!(out)?;
    write_counts(out, "Top medical conditions", "Condition", &overview.top_conditions)?;
    writeln!(out)?;
    write_counts(out, "Top side effects", "Side effect", &overview.top_side_effects)?;
    writeln!(out)?;
    write_class_ratings(out, &overview.class_ratings)?;
    writeln!(out)?;

    writeln!(out, "Preview (first {} rows)", report.preview.len())?;
    let rows = dataset
        .head(report.preview.len())
        .iter()
        .map(|record| util::record_cells(dataset, record))
        .collect::<Vec<_>>();
    util::write_text_table(out, dataset.headers(), &rows)?;
    Ok(())
}

fn write_normalization<W>(out: &mut W, report: &NormalizationReport) -> io::Result<()>
where
    W: io::Write,
{
    writeln!(out, "Normalization")?;
    if report.defaulted.is_empty() {
        writeln!(out, "  No value needed a default")?;
        return Ok(());
    }
    writeln!(out, "  {:<20} {:>10}", "Column", "Defaulted")?;
    writeln!(out, "  {}", "-".repeat(31))?;
    for (column, count) in &report.defaulted {
        writeln!(out, "  {:<20} {:>10}", column.name(), count)?;
    }
    Ok(())
}

fn write_rating<W>(out: &mut W, rating: &RatingDistribution) -> io::Result<()>
where
    W: io::Write,
{
    writeln!(out, "Rating distribution")?;
    let Some(stats) = &rating.stats else {
        writeln!(out, "  No ratings")?;
        return Ok(());
    };
    writeln!(
        out,
        "  Count: {}  Mean: {:.2}  Median: {:.2}  Min: {:.2}  Max: {:.2}  StdDev: {:.2}",
        stats.count, stats.mean, stats.median, stats.min, stats.max, stats.std_dev
    )?;

    let max_count = rating.histogram.max_count().max(1);
    for bin in &rating.histogram.bins {
        let bar = "#".repeat(usize::try_from(bin.count * BAR_WIDTH / max_count).unwrap_or(0));
        writeln!(
            out,
            "  {:>6.2} - {:>6.2} {:>8} {bar}",
            bin.range.start, bin.range.end, bin.count
        )?;
    }
    Ok(())
}

fn write_counts<W>(out: &mut W, title: &str, label: &str, counts: &ValueCounts) -> io::Result<()>
where
    W: io::Write,
{
    writeln!(out, "{title}")?;
    writeln!(out, "  {label:<40} {:>8}", "Rows")?;
    writeln!(out, "  {}", "-".repeat(49))?;
    for entry in counts.entries() {
        writeln!(out, "  {:<40} {:>8}", util::truncate(&entry.value, 40), entry.count)?;
    }
    Ok(())
}

fn write_class_ratings<W>(out: &mut W, class_ratings: &ClassRatings) -> io::Result<()>
where
    W: io::Write,
{
    writeln!(
        out,
        "Ratings by drug class ({} classes, {} rows)",
        class_ratings.groups.len(),
        class_ratings.rows.len()
    )?;
    writeln!(
        out,
        "  {:<32} {:>6} {:>7} {:>7} {:>7} {:>7} {:>7} {:>8}",
        "Drug class", "Rows", "Low", "Q1", "Median", "Q3", "High", "Outliers"
    )?;
    writeln!(out, "  {}", "-".repeat(89))?;
    for group in &class_ratings.groups {
        let s = &group.summary;
        writeln!(
            out,
            "  {:<32} {:>6} {:>7.2} {:>7.2} {:>7.2} {:>7.2} {:>7.2} {:>8}",
            util::truncate(&group.drug_class, 32),
            s.count,
            s.lower_whisker,
            s.q1,
            s.median,
            s.q3,
            s.upper_whisker,
            s.outliers.len()
        )?;
    }
    Ok(())
}
