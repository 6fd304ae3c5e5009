use crossterm::event::{Event, KeyCode};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect, Spacing},
    style::{Color, Modifier, Style},
    symbols::merge::MergeStrategy,
    widgets::{Block, List, ListItem, ListState, Tabs},
};

use super::{ConditionRowsScreen, PAGE, draw_help, draw_status, step};
use crate::{
    command::explore::explorer::Explorer,
    tui::{Screen, ScreenTransition},
    ui::widgets::{BoxPlot, RatingChart, RecordTable, ValueBars},
};

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
enum Tab {
    #[default]
    Preview,
    Ratings,
    Conditions,
    SideEffects,
    Classes,
    Filter,
}

impl Tab {
    const ALL: [Self; 6] = [
        Self::Preview,
        Self::Ratings,
        Self::Conditions,
        Self::SideEffects,
        Self::Classes,
        Self::Filter,
    ];

    const fn title(self) -> &'static str {
        match self {
            Self::Preview => "Preview",
            Self::Ratings => "Ratings",
            Self::Conditions => "Conditions",
            Self::SideEffects => "Side effects",
            Self::Classes => "Classes",
            Self::Filter => "Filter",
        }
    }

    fn index(self) -> usize {
        Self::ALL.iter().position(|&t| t == self).unwrap_or(0)
    }

    fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    const fn help(self) -> &'static str {
        match self {
            Self::Preview | Self::Classes => {
                "←/→: Tab | ↑/↓: Row | h/l: Column | r: Reload | q/Esc: Quit"
            }
            Self::Ratings | Self::Conditions | Self::SideEffects => {
                "←/→: Tab | r: Reload | q/Esc: Quit"
            }
            Self::Filter => "←/→: Tab | ↑/↓: Condition | Enter: Show rows | r: Reload | q/Esc: Quit",
        }
    }
}

/// Tabbed overview of every chart plus the condition picker.
#[derive(Default, Debug)]
pub(crate) struct DashboardScreen {
    tab: Tab,
    preview_row: usize,
    class_row: usize,
    first_column: usize,
    selected_condition: usize,
}

impl DashboardScreen {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Keeps every cursor inside the current dataset.
    fn clamp(&mut self, explorer: &Explorer) {
        self.preview_row = step(self.preview_row, explorer.preview().len(), 0);
        self.class_row = step(self.class_row, explorer.overview().class_ratings.rows.len(), 0);
        self.selected_condition = step(self.selected_condition, explorer.conditions().len(), 0);
        self.first_column = step(self.first_column, explorer.dataset().headers().len(), 0);
    }

    fn move_cursor(&mut self, explorer: &Explorer, delta: isize) {
        match self.tab {
            Tab::Preview => {
                self.preview_row = step(self.preview_row, explorer.preview().len(), delta);
            }
            Tab::Classes => {
                let len = explorer.overview().class_ratings.rows.len();
                self.class_row = step(self.class_row, len, delta);
            }
            Tab::Filter => {
                let len = explorer.conditions().len();
                self.selected_condition = step(self.selected_condition, len, delta);
            }
            Tab::Ratings | Tab::Conditions | Tab::SideEffects => {}
        }
    }

    fn scroll_columns(&mut self, explorer: &Explorer, delta: isize) {
        if matches!(self.tab, Tab::Preview | Tab::Classes) {
            let len = explorer.dataset().headers().len();
            self.first_column = step(self.first_column, len, delta);
        }
    }

    fn draw_tab(&self, explorer: &Explorer, frame: &mut Frame, area: Rect) {
        let overview = explorer.overview();
        let dataset = explorer.dataset();
        match self.tab {
            Tab::Preview => {
                let records = explorer.preview();
                let table = RecordTable::new(
                    format!("First {} rows", records.len()),
                    dataset,
                    &records,
                )
                .selected(self.preview_row)
                .first_column(self.first_column);
                frame.render_widget(table, area);
            }
            Tab::Ratings => frame.render_widget(RatingChart::new(&overview.rating), area),
            Tab::Conditions => {
                let title = format!("Top {} medical conditions", overview.top_conditions.len());
                frame.render_widget(ValueBars::new(&title, &overview.top_conditions), area);
            }
            Tab::SideEffects => {
                let title = format!("Top {} side effects", overview.top_side_effects.len());
                frame.render_widget(ValueBars::new(&title, &overview.top_side_effects), area);
            }
            Tab::Classes => {
                let groups = &overview.class_ratings.groups;
                let plot_height = u16::try_from(groups.len() * 2 + 3).unwrap_or(u16::MAX);
                let [plot_area, table_area] =
                    Layout::vertical([Constraint::Length(plot_height), Constraint::Fill(1)])
                        .spacing(Spacing::Overlap(1))
                        .areas(area);
                let title = format!("Rating by top {} drug classes", groups.len());
                frame.render_widget(BoxPlot::new(&title, groups), plot_area);

                let records = explorer.class_rows();
                let table = RecordTable::new("Rows in these classes".to_owned(), dataset, &records)
                    .selected(self.class_row)
                    .first_column(self.first_column);
                frame.render_widget(table, table_area);
            }
            Tab::Filter => self.draw_filter(explorer, frame, area),
        }
    }

    fn draw_filter(&self, explorer: &Explorer, frame: &mut Frame, area: Rect) {
        let [list_area, rows_area] =
            Layout::horizontal([Constraint::Percentage(30), Constraint::Percentage(70)])
                .spacing(Spacing::Overlap(1))
                .areas(area);

        let conditions = explorer.conditions();
        let items = conditions
            .iter()
            .map(|c| ListItem::new(c.as_str()))
            .collect::<Vec<_>>();
        let list = List::new(items)
            .block(
                Block::bordered()
                    .title(format!("Medical conditions ({})", conditions.len()))
                    .merge_borders(MergeStrategy::Exact),
            )
            .highlight_style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol(">> ");
        let mut list_state = ListState::default();
        if !conditions.is_empty() {
            list_state.select(Some(self.selected_condition.min(conditions.len() - 1)));
        }
        frame.render_stateful_widget(list, list_area, &mut list_state);

        let Some(condition) = list_state.selected().map(|i| conditions[i].as_str()) else {
            frame.render_widget(
                Block::bordered()
                    .title("No medical conditions")
                    .merge_borders(MergeStrategy::Exact),
                rows_area,
            );
            return;
        };
        let records = explorer.condition_rows(condition);
        let table = RecordTable::new(
            format!("{condition} ({} rows)", records.len()),
            explorer.dataset(),
            &records,
        );
        frame.render_widget(table, rows_area);
    }
}

impl Screen<Explorer> for DashboardScreen {
    fn on_active(&mut self, explorer: &mut Explorer) {
        self.clamp(explorer);
    }

    fn handle_event(&mut self, explorer: &mut Explorer, event: &Event) -> ScreenTransition<Explorer> {
        let Some(event) = event.as_key_press_event() else {
            return ScreenTransition::Stay;
        };
        match event.code {
            KeyCode::Char('q') | KeyCode::Esc => return ScreenTransition::Exit,
            KeyCode::Right | KeyCode::Tab => self.tab = self.tab.next(),
            KeyCode::Left | KeyCode::BackTab => self.tab = self.tab.prev(),
            KeyCode::Up => self.move_cursor(explorer, -1),
            KeyCode::Down => self.move_cursor(explorer, 1),
            KeyCode::PageUp => self.move_cursor(explorer, -PAGE),
            KeyCode::PageDown => self.move_cursor(explorer, PAGE),
            KeyCode::Char('h') => self.scroll_columns(explorer, -1),
            KeyCode::Char('l') => self.scroll_columns(explorer, 1),
            KeyCode::Char('r') => {
                explorer.reload();
                self.clamp(explorer);
            }
            KeyCode::Enter if self.tab == Tab::Filter => {
                if let Some(condition) = explorer.conditions().get(self.selected_condition) {
                    return ScreenTransition::Push(Box::new(ConditionRowsScreen::new(
                        condition.clone(),
                    )));
                }
            }
            _ => {}
        }
        ScreenTransition::Stay
    }

    fn draw(&self, explorer: &Explorer, frame: &mut Frame) {
        let [tabs_area, main_area, status_area, help_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(frame.area());

        let tabs = Tabs::new(Tab::ALL.map(Tab::title))
            .select(self.tab.index())
            .highlight_style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
            .divider("|");
        frame.render_widget(tabs, tabs_area);

        self.draw_tab(explorer, frame, main_area);
        draw_status(explorer, frame, status_area);
        draw_help(self.tab.help(), frame, help_area);
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyEvent, KeyModifiers};
    use rxplore_analysis::overview::OverviewOptions;
    use rxplore_dataset::LoadOptions;
    use tempfile::NamedTempFile;

    use super::*;
    use crate::{
        command::explore::explorer::ReloadStatus,
        session::Session,
        test_util::{SAMPLE_CSV, temp_csv},
    };

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn explorer(file: &NamedTempFile) -> Explorer {
        let session = Session::open(file.path(), LoadOptions::default()).unwrap();
        Explorer::new(session, OverviewOptions::default(), 5)
    }

    #[test]
    fn test_tabs_wrap_around() {
        assert_eq!(Tab::Preview.prev(), Tab::Filter);
        assert_eq!(Tab::Filter.next(), Tab::Preview);
        assert_eq!(Tab::Ratings.next(), Tab::Conditions);
        for tab in Tab::ALL {
            assert_eq!(tab.next().prev(), tab);
        }
    }

    #[test]
    fn test_enter_opens_selected_condition() {
        let file = temp_csv(SAMPLE_CSV);
        let mut explorer = explorer(&file);
        let mut screen = DashboardScreen::new();

        // Enter does nothing outside the filter tab
        let transition = screen.handle_event(&mut explorer, &key(KeyCode::Enter));
        assert!(matches!(transition, ScreenTransition::Stay));

        screen.handle_event(&mut explorer, &key(KeyCode::Left));
        assert_eq!(screen.tab, Tab::Filter);
        screen.handle_event(&mut explorer, &key(KeyCode::Down));
        screen.handle_event(&mut explorer, &key(KeyCode::Down));
        assert_eq!(screen.selected_condition, 1);

        let transition = screen.handle_event(&mut explorer, &key(KeyCode::Enter));
        let ScreenTransition::Push(rows) = transition else {
            panic!("expected push, got {transition:?}");
        };
        assert!(format!("{rows:?}").contains("\"Pain\""));
    }

    #[test]
    fn test_quit_keys() {
        let file = temp_csv(SAMPLE_CSV);
        let mut explorer = explorer(&file);
        let mut screen = DashboardScreen::new();

        for code in [KeyCode::Char('q'), KeyCode::Esc] {
            let transition = screen.handle_event(&mut explorer, &key(code));
            assert!(matches!(transition, ScreenTransition::Exit));
        }
    }

    #[test]
    fn test_reload_clamps_cursors() {
        let file = temp_csv(SAMPLE_CSV);
        let mut explorer = explorer(&file);
        let mut screen = DashboardScreen::new();

        screen.handle_event(&mut explorer, &key(KeyCode::PageDown));
        assert_eq!(screen.preview_row, 3);

        let header = SAMPLE_CSV.lines().next().unwrap();
        let first_row = SAMPLE_CSV.lines().nth(1).unwrap();
        std::fs::write(file.path(), format!("{header}\n{first_row}\n")).unwrap();
        screen.handle_event(&mut explorer, &key(KeyCode::Char('r')));

        assert_eq!(explorer.status(), &ReloadStatus::Reloaded);
        assert_eq!(screen.preview_row, 0);
    }
}
