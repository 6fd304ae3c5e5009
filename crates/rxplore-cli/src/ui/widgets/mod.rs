//! Chart and table widgets shared by the explorer screens.

pub(crate) use self::{
    box_plot::BoxPlot, rating_chart::RatingChart, record_table::RecordTable,
    value_bars::ValueBars,
};

mod box_plot;
mod rating_chart;
mod record_table;
mod value_bars;
