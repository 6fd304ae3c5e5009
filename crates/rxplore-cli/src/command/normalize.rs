use std::path::PathBuf;

use anyhow::Context;

use crate::{command::DatasetArg, session::Session, util::Output};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct NormalizeArg {
    #[command(flatten)]
    dataset: DatasetArg,

    /// Output file path (default: stdout)
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &NormalizeArg) -> anyhow::Result<()> {
    let NormalizeArg { dataset, output } = arg;

    let session = Session::open(&dataset.file, dataset.load_options())?;

    let mut output = Output::from_output_path(output.clone())?;
    session
        .dataset()
        .write_csv(&mut output)
        .with_context(|| format!("Failed to write CSV to {}", output.display_path()))?;
    output.finish()?;
    Ok(())
}
