use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span, Text},
};

use super::explorer::{Explorer, ReloadStatus};

pub(crate) use self::{condition_rows::ConditionRowsScreen, dashboard::DashboardScreen};

mod condition_rows;
mod dashboard;

/// Rows moved by PageUp/PageDown.
const PAGE: isize = 10;

/// Moves `index` by `delta` within `0..len`, stopping at both ends.
fn step(index: usize, len: usize, delta: isize) -> usize {
    if len == 0 {
        return 0;
    }
    index.saturating_add_signed(delta).min(len - 1)
}

/// Source file, row count and reload outcome.
fn draw_status(explorer: &Explorer, frame: &mut Frame, area: Rect) {
    let session = explorer.session();
    let mut spans = vec![Span::raw(format!(
        " {} | {} rows | loaded {}",
        session.path().display(),
        session.dataset().len(),
        session.loaded_at().format("%H:%M:%S"),
    ))];
    match explorer.status() {
        ReloadStatus::Idle => {}
        ReloadStatus::Reloaded => spans.push(Span::styled(
            format!(" | reloaded (#{})", session.generation()),
            Style::default().fg(Color::Green),
        )),
        ReloadStatus::Failed(message) => spans.push(Span::styled(
            format!(" | reload failed: {message}"),
            Style::default().fg(Color::Red),
        )),
    }
    frame.render_widget(Line::from(spans), area);
}

fn draw_help(help: &str, frame: &mut Frame, area: Rect) {
    let help_text = Text::from(help)
        .style(Style::default().fg(Color::DarkGray))
        .centered();
    frame.render_widget(help_text, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step() {
        assert_eq!(step(0, 5, -1), 0);
        assert_eq!(step(0, 5, 1), 1);
        assert_eq!(step(3, 5, PAGE), 4);
        assert_eq!(step(4, 5, -PAGE), 0);
        assert_eq!(step(7, 0, 1), 0);
    }
}
