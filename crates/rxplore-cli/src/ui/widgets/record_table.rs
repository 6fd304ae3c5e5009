use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    symbols::merge::MergeStrategy,
    text::Line,
    widgets::{Block, Row, StatefulWidget, Table, TableState, Widget},
};
use rxplore_dataset::{Dataset, DrugRecord};

use crate::util;

/// Widest column drawn, in characters.
const MAX_COLUMN_WIDTH: usize = 28;
/// Rows measured when sizing columns.
const SIZING_ROWS: usize = 200;

/// Scrollable table of dataset rows in header order.
///
/// Columns before `first_column` are scrolled out to the left.
#[derive(Debug)]
pub(crate) struct RecordTable<'a> {
    title: String,
    dataset: &'a Dataset,
    records: &'a [&'a DrugRecord],
    selected: Option<usize>,
    first_column: usize,
}

impl<'a> RecordTable<'a> {
    pub(crate) fn new(title: String, dataset: &'a Dataset, records: &'a [&'a DrugRecord]) -> Self {
        Self {
            title,
            dataset,
            records,
            selected: None,
            first_column: 0,
        }
    }

    pub(crate) fn selected(self, selected: usize) -> Self {
        Self {
            selected: Some(selected),
            ..self
        }
    }

    pub(crate) fn first_column(self, first_column: usize) -> Self {
        Self {
            first_column,
            ..self
        }
    }

    fn column_widths(&self) -> Vec<usize> {
        let headers = self.dataset.headers();
        (self.first_column..headers.len())
            .map(|idx| {
                self.records
                    .iter()
                    .take(SIZING_ROWS)
                    .map(|record| self.dataset.cell(record, idx).chars().count())
                    .chain([headers[idx].chars().count()])
                    .max()
                    .unwrap_or(0)
                    .min(MAX_COLUMN_WIDTH)
            })
            .collect()
    }
}

impl Widget for RecordTable<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let dataset = self.dataset;
        let headers = dataset.headers();
        let first_column = self.first_column.min(headers.len().saturating_sub(1));
        let this = Self {
            first_column,
            ..self
        };
        let widths = this.column_widths();

        let header = Row::new(headers.iter().skip(first_column).map(String::as_str)).style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        );
        let rows = this.records.iter().map(|record| {
            Row::new(
                (first_column..headers.len())
                    .zip(&widths)
                    .map(|(idx, &width)| util::truncate(&dataset.cell(record, idx), width)),
            )
        });

        let position = this
            .selected
            .map_or_else(String::new, |s| format!(" {}/{}", s + 1, this.records.len()));
        let columns = format!(" column {}/{} ", first_column + 1, headers.len());
        let table = Table::new(
            rows,
            widths
                .iter()
                .map(|&w| Constraint::Length(u16::try_from(w).unwrap_or(u16::MAX))),
        )
        .header(header)
        .column_spacing(2)
        .block(
            Block::bordered()
                .title(format!("{}{position}", this.title))
                .title_bottom(Line::from(columns).right_aligned())
                .merge_borders(MergeStrategy::Exact),
        )
        .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED));

        let mut state = TableState::default().with_selected(this.selected);
        StatefulWidget::render(table, area, buf, &mut state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::sample_dataset;

    #[test]
    fn test_column_widths_are_capped() {
        let dataset = sample_dataset();
        let records = dataset.records().iter().collect::<Vec<_>>();
        let table = RecordTable::new("Rows".to_owned(), &dataset, &records);
        let widths = table.column_widths();

        assert_eq!(widths.len(), dataset.headers().len());
        // "spironolactone"
        assert_eq!(widths[0], 14);
        // side effects are longer than the cap
        assert_eq!(widths[2], MAX_COLUMN_WIDTH);
    }

    #[test]
    fn test_scrolled_columns() {
        let dataset = sample_dataset();
        let records = dataset.records().iter().collect::<Vec<_>>();
        let table = RecordTable::new("Rows".to_owned(), &dataset, &records).first_column(12);
        assert_eq!(table.column_widths(), [6, 13]);
    }

    #[test]
    fn test_render_selected_row() {
        let dataset = sample_dataset();
        let records = dataset.records().iter().collect::<Vec<_>>();
        let area = Rect::new(0, 0, 60, 8);
        let mut buf = Buffer::empty(area);
        RecordTable::new("Rows".to_owned(), &dataset, &records)
            .selected(1)
            .render(area, &mut buf);

        let title = (0..area.width)
            .map(|x| buf[(x, 0)].symbol())
            .collect::<String>();
        assert!(title.contains("Rows 2/4"), "{title}");
    }
}
