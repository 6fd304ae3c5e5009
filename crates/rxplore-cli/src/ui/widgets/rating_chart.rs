use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Style},
    symbols::{Marker, merge::MergeStrategy},
    text::Line,
    widgets::{Axis, Block, Chart, Dataset, GraphType, Paragraph, Widget},
};
use rxplore_analysis::rating::RatingDistribution;

/// Points drawn per histogram bin; more points give a more solid bar.
const POINTS_PER_BIN: usize = 24;

/// Rating histogram with its density curve overlaid, next to a statistics pane.
#[derive(Debug)]
pub(crate) struct RatingChart<'a> {
    rating: &'a RatingDistribution,
}

impl<'a> RatingChart<'a> {
    pub(crate) fn new(rating: &'a RatingDistribution) -> Self {
        Self { rating }
    }
}

impl Widget for RatingChart<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let [stats_area, chart_area] =
            Layout::horizontal([Constraint::Length(24), Constraint::Fill(1)]).areas(area);

        Widget::render(stats_paragraph(self.rating), stats_area, buf);

        let bars = histogram_points(self.rating);
        let Some(x_bounds) = x_bounds(self.rating) else {
            Widget::render(
                Block::bordered()
                    .title("Rating distribution")
                    .merge_borders(MergeStrategy::Exact),
                chart_area,
                buf,
            );
            return;
        };
        #[expect(clippy::cast_precision_loss)]
        let max_count = self.rating.histogram.max_count() as f64;
        let y_max = self
            .rating
            .density
            .iter()
            .map(|&(_, y)| y)
            .fold(max_count, f64::max)
            .max(1.0)
            * 1.1;

        let datasets = vec![
            Dataset::default()
                .name("count")
                .marker(Marker::Braille)
                .graph_type(GraphType::Bar)
                .style(Style::default().fg(Color::Cyan))
                .data(&bars),
            Dataset::default()
                .name("density")
                .marker(Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(Color::Yellow))
                .data(&self.rating.density),
        ];
        let chart = Chart::new(datasets)
            .block(
                Block::bordered()
                    .title("Rating distribution")
                    .merge_borders(MergeStrategy::Exact),
            )
            .x_axis(
                Axis::default()
                    .title("Rating")
                    .bounds(x_bounds)
                    .labels([
                        format!("{:.1}", x_bounds[0]),
                        format!("{:.1}", f64::midpoint(x_bounds[0], x_bounds[1])),
                        format!("{:.1}", x_bounds[1]),
                    ]),
            )
            .y_axis(
                Axis::default()
                    .title("Count")
                    .bounds([0.0, y_max])
                    .labels(["0".to_owned(), format!("{:.0}", y_max / 2.0), format!("{y_max:.0}")]),
            );

        Widget::render(chart, chart_area, buf);
    }
}

fn x_bounds(rating: &RatingDistribution) -> Option<[f64; 2]> {
    let first = rating.histogram.bins.first()?;
    let last = rating.histogram.bins.last()?;
    Some([first.range.start, last.range.end])
}

/// Samples every bin at evenly spaced x positions at the height of its count.
#[expect(clippy::cast_precision_loss)]
fn histogram_points(rating: &RatingDistribution) -> Vec<(f64, f64)> {
    rating
        .histogram
        .bins
        .iter()
        .flat_map(|bin| {
            let step = (bin.range.end - bin.range.start) / POINTS_PER_BIN as f64;
            (0..POINTS_PER_BIN).map(move |i| (bin.range.start + step * i as f64, bin.count as f64))
        })
        .collect()
}

fn stats_paragraph(rating: &RatingDistribution) -> Paragraph<'static> {
    let block = Block::bordered()
        .title("Rating")
        .merge_borders(MergeStrategy::Exact);
    let Some(stats) = &rating.stats else {
        return Paragraph::new("No ratings").block(block);
    };
    let mut text = vec![
        Line::raw(format!(" Count:  {:>10}", stats.count)),
        Line::raw(format!(" Mean:   {:>10.2}", stats.mean)),
        Line::raw(format!(" Median: {:>10.2}", stats.median)),
        Line::raw(format!(" Min:    {:>10.2}", stats.min)),
    ];
    for (p, value) in rating.percentiles.iter() {
        text.push(Line::raw(format!(" P{p:02.0}:    {value:>10.2}")));
    }
    text.extend([
        Line::raw(format!(" Max:    {:>10.2}", stats.max)),
        Line::raw(format!(" StdDev: {:>10.2}", stats.std_dev)),
    ]);
    Paragraph::new(text).block(block)
}

#[cfg(test)]
mod tests {
    use rxplore_stats::histogram::Histogram;

    use super::*;

    #[test]
    fn test_histogram_points_follow_bins() {
        let histogram = Histogram::new([1.0, 2.0, 2.0, 3.0], 2);
        let rating = RatingDistribution {
            stats: None,
            percentiles: rxplore_stats::percentiles::Percentiles::new(&[], &[]),
            histogram,
            density: vec![],
        };
        let points = histogram_points(&rating);

        assert_eq!(points.len(), 2 * POINTS_PER_BIN);
        assert_eq!(points[0], (1.0, 1.0));
        assert_eq!(points[POINTS_PER_BIN], (2.0, 3.0));
        assert_eq!(x_bounds(&rating), Some([1.0, 3.0]));
    }
}
