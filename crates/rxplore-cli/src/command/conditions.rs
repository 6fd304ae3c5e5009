use std::{
    collections::HashMap,
    io::{self, Write as _},
};

use rxplore_analysis::{condition::ConditionFilter, frequency};
use rxplore_dataset::Dataset;

use crate::{command::DatasetArg, session::Session, util::Output};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct ConditionsArg {
    #[command(flatten)]
    dataset: DatasetArg,
}

pub(crate) fn run(arg: &ConditionsArg) -> anyhow::Result<()> {
    let session = Session::open(&arg.dataset.file, arg.dataset.load_options())?;

    let mut output = Output::stdout();
    write_conditions(&mut output, session.dataset())?;
    output.flush()?;
    Ok(())
}

/// Writes the selectable conditions in ascending order with their row counts.
fn write_conditions<W>(out: &mut W, dataset: &Dataset) -> io::Result<()>
where
    W: io::Write,
{
    let filter = ConditionFilter::new(dataset);
    let counts = frequency::top_conditions(dataset, usize::MAX);
    let counts = counts.top(usize::MAX).collect::<HashMap<_, _>>();
    for condition in filter.conditions() {
        let count = counts.get(condition.as_str()).copied().unwrap_or(0);
        writeln!(out, "{count:>8}  {condition}")?;
    }
    Ok(())
}
