use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Style},
    symbols::merge::MergeStrategy,
    text::Line,
    widgets::{Block, Widget},
};
use rxplore_analysis::class_ratings::ClassGroup;
use rxplore_stats::box_plot::BoxSummary;

use crate::util;

const LABEL_WIDTH: u16 = 28;

/// Horizontal box-and-whisker plot, one row per drug class, on a shared scale.
#[derive(Debug)]
pub(crate) struct BoxPlot<'a> {
    title: &'a str,
    groups: &'a [ClassGroup],
}

impl<'a> BoxPlot<'a> {
    pub(crate) fn new(title: &'a str, groups: &'a [ClassGroup]) -> Self {
        Self { title, groups }
    }

    /// Value range covering every whisker and outlier.
    fn bounds(&self) -> Option<[f64; 2]> {
        let values = self.groups.iter().flat_map(|g| {
            let s = &g.summary;
            [s.lower_whisker, s.upper_whisker]
                .into_iter()
                .chain(s.outliers.iter().copied())
        });
        let lo = values.clone().min_by(f64::total_cmp)?;
        let hi = values.max_by(f64::total_cmp)?;
        Some([lo, hi])
    }
}

impl Widget for BoxPlot<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &BoxPlot<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let block = Block::bordered()
            .merge_borders(MergeStrategy::Exact)
            .title(self.title);
        let inner = block.inner(area);
        Widget::render(block, area, buf);

        let Some(bounds) = self.bounds() else {
            Line::raw("No ratings").render(inner, buf);
            return;
        };

        let [label_area, plot_area] =
            Layout::horizontal([Constraint::Length(LABEL_WIDTH), Constraint::Fill(1)])
                .areas(inner);
        let width = usize::from(plot_area.width);
        let styles = [Color::Cyan, Color::Yellow, Color::Green, Color::Magenta, Color::Blue];

        for (i, group) in self.groups.iter().enumerate() {
            let Ok(offset) = u16::try_from(i * 2) else {
                break;
            };
            // leave the last line for the axis
            if offset + 1 >= inner.height {
                break;
            }
            let y = inner.y + offset;
            let label = util::truncate(&group.drug_class, usize::from(LABEL_WIDTH) - 1);
            buf.set_string(label_area.x, y, label, Style::default());
            let line = box_line(&group.summary, bounds, width);
            buf.set_string(
                plot_area.x,
                y,
                line,
                Style::default().fg(styles[i % styles.len()]),
            );
        }

        let axis_y = inner.y + inner.height.saturating_sub(1);
        let lo = format!("{:.1}", bounds[0]);
        let hi = format!("{:.1}", bounds[1]);
        buf.set_string(plot_area.x, axis_y, &lo, Style::default().fg(Color::DarkGray));
        let hi_width = u16::try_from(hi.len()).unwrap_or(0);
        if plot_area.width > hi_width + u16::try_from(lo.len()).unwrap_or(0) {
            buf.set_string(
                plot_area.right() - hi_width,
                axis_y,
                &hi,
                Style::default().fg(Color::DarkGray),
            );
        }
    }
}

/// Draws one box as `width` characters, mapping `bounds` onto the full width.
///
/// ```text
/// ├──▒▒┃▒▒▒──┤  o
/// ```
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
fn box_line(summary: &BoxSummary, bounds: [f64; 2], width: usize) -> String {
    if width == 0 {
        return String::new();
    }
    let [lo, hi] = bounds;
    let span = if hi > lo { hi - lo } else { 1.0 };
    let last = width - 1;
    let column = |value: f64| -> usize {
        let x = ((value - lo) / span * last as f64).round();
        (x.max(0.0) as usize).min(last)
    };

    let mut cells = vec![' '; width];
    let (lw, uw) = (column(summary.lower_whisker), column(summary.upper_whisker));
    cells[lw..=uw].fill('─');
    cells[column(summary.q1)..=column(summary.q3)].fill('▒');
    cells[lw] = '├';
    cells[uw] = '┤';
    cells[column(summary.median)] = '┃';
    for &outlier in &summary.outliers {
        cells[column(outlier)] = 'o';
    }
    cells.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(values: [f64; 5], outliers: Vec<f64>) -> BoxSummary {
        let [lower_whisker, q1, median, q3, upper_whisker] = values;
        BoxSummary {
            count: 10,
            lower_whisker,
            q1,
            median,
            q3,
            upper_whisker,
            outliers,
        }
    }

    #[test]
    fn test_box_line() {
        let s = summary([0.0, 2.0, 5.0, 7.0, 10.0], vec![]);
        assert_eq!(box_line(&s, [0.0, 10.0], 11), "├─▒▒▒┃▒▒──┤");
    }

    #[test]
    fn test_box_line_with_outlier() {
        let s = summary([2.0, 3.0, 4.0, 5.0, 6.0], vec![10.0]);
        assert_eq!(box_line(&s, [0.0, 10.0], 11), "  ├▒┃▒┤   o");
    }

    #[test]
    fn test_degenerate_box() {
        let s = summary([7.0; 5], vec![]);
        assert_eq!(box_line(&s, [7.0, 7.0], 5), "┃    ");
        assert_eq!(box_line(&s, [7.0, 7.0], 0), "");
    }
}
