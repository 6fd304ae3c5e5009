use crossterm::event::Event;
use ratatui::Frame;

/// Trait for TUI applications run by [`Runtime::run`](super::Runtime::run).
pub(crate) trait App {
    /// Called once before the first frame is drawn.
    fn init(&mut self);

    /// Returns whether the application should exit.
    fn should_exit(&self) -> bool;

    /// Handles terminal events (key input, mouse, resize, etc.).
    ///
    /// Returns whether the screen has to be drawn again.
    fn handle_event(&mut self, event: Event) -> bool;

    /// Draws the screen.
    fn draw(&self, frame: &mut Frame);
}
