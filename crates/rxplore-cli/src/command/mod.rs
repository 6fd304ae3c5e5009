use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use rxplore_analysis::overview::OverviewOptions;
use rxplore_dataset::LoadOptions;

use self::{
    conditions::ConditionsArg, explore::ExploreArg, filter::FilterArg, normalize::NormalizeArg,
    summary::SummaryArg,
};

mod conditions;
mod explore;
mod filter;
mod normalize;
mod summary;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Browse the charts and the condition filter in a terminal UI
    Explore(#[clap(flatten)] ExploreArg),
    /// Print every aggregation as text or JSON
    Summary(#[clap(flatten)] SummaryArg),
    /// Write the normalized dataset as CSV
    Normalize(#[clap(flatten)] NormalizeArg),
    /// List the distinct medical conditions with their row counts
    Conditions(#[clap(flatten)] ConditionsArg),
    /// Print the rows matching one medical condition
    Filter(#[clap(flatten)] FilterArg),
}

/// Input file and how to read it.
#[derive(Debug, Clone, Args)]
pub(crate) struct DatasetArg {
    /// Drug side-effects CSV file path
    file: PathBuf,

    /// Field delimiter of the CSV file
    #[arg(long, default_value = ",", value_parser = parse_delimiter)]
    delimiter: u8,
}

impl DatasetArg {
    pub(crate) fn load_options(&self) -> LoadOptions {
        LoadOptions {
            delimiter: self.delimiter,
        }
    }
}

fn parse_delimiter(s: &str) -> Result<u8, String> {
    match s.as_bytes() {
        [b] if b.is_ascii() => Ok(*b),
        _ if s == "\\t" => Ok(b'\t'),
        _ => Err(format!("delimiter must be a single ASCII character, got {s:?}")),
    }
}

/// Sizes of the aggregated views.
#[derive(Debug, Clone, Args)]
pub(crate) struct ChartArgs {
    /// Number of medical conditions in the top-conditions chart
    #[arg(long, default_value_t = 10)]
    top_conditions: usize,

    /// Number of side effects in the top-side-effects chart
    #[arg(long, default_value_t = 10)]
    top_side_effects: usize,

    /// Number of drug classes compared in the ratings box plot
    #[arg(long, default_value_t = 5)]
    top_classes: usize,

    /// Number of bins in the rating histogram
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u16).range(1..))]
    rating_bins: u16,

    /// Number of rows shown in the dataset preview
    #[arg(long, default_value_t = 5)]
    preview_rows: usize,
}

impl ChartArgs {
    pub(crate) fn overview_options(&self) -> OverviewOptions {
        OverviewOptions {
            top_conditions: self.top_conditions,
            top_side_effects: self.top_side_effects,
            top_classes: self.top_classes,
            rating_bins: usize::from(self.rating_bins),
        }
    }

    pub(crate) fn preview_rows(&self) -> usize {
        self.preview_rows
    }
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode {
        Mode::Explore(arg) => explore::run(&arg)?,
        Mode::Summary(arg) => summary::run(&arg)?,
        Mode::Normalize(arg) => normalize::run(&arg)?,
        Mode::Conditions(arg) => conditions::run(&arg)?,
        Mode::Filter(arg) => filter::run(&arg)?,
    }
    Ok(())
}
