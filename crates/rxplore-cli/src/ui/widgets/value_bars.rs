use ratatui::{
    buffer::Buffer,
    layout::{Direction, Rect},
    style::{Color, Style},
    symbols::merge::MergeStrategy,
    widgets::{Bar, BarChart, Block, Widget},
};
use rxplore_stats::value_counts::ValueCounts;

use crate::util;

/// Horizontal bar chart of a frequency table, most frequent value on top.
#[derive(Debug)]
pub(crate) struct ValueBars<'a> {
    title: &'a str,
    counts: &'a ValueCounts,
    label_width: usize,
}

impl<'a> ValueBars<'a> {
    pub(crate) fn new(title: &'a str, counts: &'a ValueCounts) -> Self {
        Self {
            title,
            counts,
            label_width: 32,
        }
    }
}

impl Widget for ValueBars<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let bars = self
            .counts
            .entries()
            .iter()
            .map(|entry| {
                let label = util::truncate(&entry.value, self.label_width);
                Bar::with_label(format!("{label:>width$}", width = self.label_width), entry.count)
                    .text_value(entry.count.to_string())
            })
            .collect::<Vec<_>>();

        let chart = BarChart::new(bars)
            .block(
                Block::bordered()
                    .title(self.title)
                    .merge_borders(MergeStrategy::Exact),
            )
            .direction(Direction::Horizontal)
            .bar_style(Style::default().fg(Color::Cyan))
            .bar_gap(0);

        Widget::render(chart, area, buf);
    }
}
