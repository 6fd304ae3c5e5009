use crate::{
    command::{ChartArgs, DatasetArg},
    session::Session,
    tui::{Runtime, ScreenStack},
};

use self::{explorer::Explorer, screens::DashboardScreen};

mod explorer;
mod screens;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct ExploreArg {
    #[command(flatten)]
    dataset: DatasetArg,

    #[command(flatten)]
    charts: ChartArgs,
}

pub(crate) fn run(arg: &ExploreArg) -> anyhow::Result<()> {
    let ExploreArg { dataset, charts } = arg;

    let session = Session::open(&dataset.file, dataset.load_options())?;

    tracing::info!("Computing aggregations...");
    let explorer = Explorer::new(session, charts.overview_options(), charts.preview_rows());
    tracing::info!("Aggregations computed");

    let mut app = ScreenStack::new(explorer, Box::new(DashboardScreen::new()));
    Runtime::new().run(&mut app)?;

    Ok(())
}
