use crossterm::event::{Event, KeyCode};
use ratatui::{
    Frame,
    layout::{Constraint, Layout},
};

use super::{PAGE, draw_help, draw_status, step};
use crate::{
    command::explore::explorer::Explorer,
    tui::{Screen, ScreenTransition},
    ui::widgets::RecordTable,
};

/// Full-screen table of the rows matching one medical condition.
#[derive(Debug)]
pub(crate) struct ConditionRowsScreen {
    condition: String,
    selected: usize,
    first_column: usize,
}

impl ConditionRowsScreen {
    #[must_use]
    pub(crate) fn new(condition: String) -> Self {
        Self {
            condition,
            selected: 0,
            first_column: 0,
        }
    }

    fn num_rows(&self, explorer: &Explorer) -> usize {
        explorer.condition_rows(&self.condition).len()
    }
}

impl Screen<Explorer> for ConditionRowsScreen {
    fn on_active(&mut self, explorer: &mut Explorer) {
        self.selected = step(self.selected, self.num_rows(explorer), 0);
    }

    fn handle_event(&mut self, explorer: &mut Explorer, event: &Event) -> ScreenTransition<Explorer> {
        let Some(event) = event.as_key_press_event() else {
            return ScreenTransition::Stay;
        };
        let num_columns = explorer.dataset().headers().len();
        match event.code {
            KeyCode::Char('q') => return ScreenTransition::Exit,
            KeyCode::Esc | KeyCode::Backspace => return ScreenTransition::Pop,
            KeyCode::Up => self.selected = step(self.selected, self.num_rows(explorer), -1),
            KeyCode::Down => self.selected = step(self.selected, self.num_rows(explorer), 1),
            KeyCode::PageUp => self.selected = step(self.selected, self.num_rows(explorer), -PAGE),
            KeyCode::PageDown => self.selected = step(self.selected, self.num_rows(explorer), PAGE),
            KeyCode::Home => self.selected = 0,
            KeyCode::End => self.selected = self.num_rows(explorer).saturating_sub(1),
            KeyCode::Char('h') | KeyCode::Left => {
                self.first_column = step(self.first_column, num_columns, -1);
            }
            KeyCode::Char('l') | KeyCode::Right => {
                self.first_column = step(self.first_column, num_columns, 1);
            }
            KeyCode::Char('r') => {
                explorer.reload();
                self.selected = step(self.selected, self.num_rows(explorer), 0);
            }
            _ => {}
        }
        ScreenTransition::Stay
    }

    fn draw(&self, explorer: &Explorer, frame: &mut Frame) {
        let [main_area, status_area, help_area] = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(frame.area());

        let records = explorer.condition_rows(&self.condition);
        let mut table = RecordTable::new(
            format!("Medical condition: {} ({} rows)", self.condition, records.len()),
            explorer.dataset(),
            &records,
        )
        .first_column(self.first_column);
        if !records.is_empty() {
            table = table.selected(self.selected.min(records.len() - 1));
        }
        frame.render_widget(table, main_area);

        draw_status(explorer, frame, status_area);
        draw_help(
            "↑/↓: Row | ←/→ h/l: Column | Home/End | r: Reload | Esc: Back | q: Quit",
            frame,
            help_area,
        );
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyEvent, KeyModifiers};
    use rxplore_analysis::overview::OverviewOptions;
    use rxplore_dataset::LoadOptions;

    use super::*;
    use crate::{
        session::Session,
        test_util::{SAMPLE_CSV, temp_csv},
    };

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_navigation_and_back() {
        let file = temp_csv(SAMPLE_CSV);
        let session = Session::open(file.path(), LoadOptions::default()).unwrap();
        let mut explorer = Explorer::new(session, OverviewOptions::default(), 5);
        let mut screen = ConditionRowsScreen::new("Acne".to_owned());

        screen.handle_event(&mut explorer, &key(KeyCode::End));
        assert_eq!(screen.selected, 1);
        screen.handle_event(&mut explorer, &key(KeyCode::Down));
        assert_eq!(screen.selected, 1);
        screen.handle_event(&mut explorer, &key(KeyCode::Char('l')));
        assert_eq!(screen.first_column, 1);

        let transition = screen.handle_event(&mut explorer, &key(KeyCode::Esc));
        assert!(matches!(transition, ScreenTransition::Pop));
        let transition = screen.handle_event(&mut explorer, &key(KeyCode::Char('q')));
        assert!(matches!(transition, ScreenTransition::Exit));
    }
}
