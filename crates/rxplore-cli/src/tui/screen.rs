use std::fmt;

use crossterm::event::Event;
use ratatui::Frame;

use super::App;

/// Individual screen in the application.
///
/// Screens do not own the application state. Every callback receives the
/// context `C` shared by the whole [`ScreenStack`], so a screen pushed on
/// top sees the same data as the one below it.
///
/// # Lifecycle
///
/// ```text
/// Create
///   ↓
/// on_active() ←──────────┐
///   ↓                     │
/// (Active/Foreground)     │ Child screen pops
///   ↓                     │
/// on_inactive()           │
///   ↓                     │
/// (Background) ──────────┘
///   ↓
/// on_close()  ← Only on Pop/Exit
///   ↓
/// Drop
/// ```
pub(crate) trait Screen<C>: fmt::Debug {
    /// Called when this screen becomes active (foreground), including when
    /// a child screen pops back to it.
    fn on_active(&mut self, _context: &mut C) {}

    /// Called when this screen goes to the background or is about to be removed.
    fn on_inactive(&mut self, _context: &mut C) {}

    /// Called when this screen is removed from the stack (Pop/Exit only).
    fn on_close(&mut self, _context: &mut C) {}

    /// Handles terminal events and returns transition.
    fn handle_event(&mut self, context: &mut C, event: &Event) -> ScreenTransition<C>;

    /// Renders the screen.
    fn draw(&self, context: &C, frame: &mut Frame);
}

/// Screen transition result from event handling.
pub(crate) enum ScreenTransition<C> {
    /// Stay in the current screen.
    Stay,
    /// Push a new screen on top of the current one.
    Push(Box<dyn Screen<C>>),
    /// Pop the current screen and return to the previous one.
    Pop,
    /// Exit the application.
    Exit,
}

impl<C> fmt::Debug for ScreenTransition<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stay => f.write_str("Stay"),
            Self::Push(screen) => f.debug_tuple("Push").field(screen).finish(),
            Self::Pop => f.write_str("Pop"),
            Self::Exit => f.write_str("Exit"),
        }
    }
}

/// Screen stack manager that implements [`App`].
#[derive(Debug)]
pub(crate) struct ScreenStack<C> {
    context: C,
    screens: Vec<Box<dyn Screen<C>>>,
    should_exit: bool,
}

impl<C> ScreenStack<C> {
    /// Creates a new screen stack with an initial screen.
    #[must_use]
    pub(crate) fn new(context: C, initial: Box<dyn Screen<C>>) -> Self {
        Self {
            context,
            screens: vec![initial],
            should_exit: false,
        }
    }

    #[cfg(test)]
    fn into_context(self) -> C {
        self.context
    }

    fn apply_transition(&mut self, transition: ScreenTransition<C>) {
        let context = &mut self.context;
        match transition {
            ScreenTransition::Stay => {}

            ScreenTransition::Push(mut new_screen) => {
                if let Some(current) = self.screens.last_mut() {
                    current.on_inactive(context);
                }
                new_screen.on_active(context);
                self.screens.push(new_screen);
            }

            ScreenTransition::Pop => {
                if let Some(mut old_screen) = self.screens.pop() {
                    old_screen.on_inactive(context);
                    old_screen.on_close(context);
                }
                if let Some(prev_screen) = self.screens.last_mut() {
                    prev_screen.on_active(context);
                }
            }

            ScreenTransition::Exit => {
                while let Some(mut screen) = self.screens.pop() {
                    screen.on_inactive(context);
                    screen.on_close(context);
                }
                self.should_exit = true;
            }
        }
    }
}

impl<C> App for ScreenStack<C> {
    fn init(&mut self) {
        if let Some(screen) = self.screens.last_mut() {
            screen.on_active(&mut self.context);
        }
    }

    fn should_exit(&self) -> bool {
        self.should_exit || self.screens.is_empty()
    }

    /// Dispatches `event` to the top screen.
    ///
    /// Screens react to key presses only, so only those and terminal resizes
    /// ask for a redraw.
    fn handle_event(&mut self, event: Event) -> bool {
        let redraw = event.is_key_press() || matches!(event, Event::Resize(..));
        if let Some(current) = self.screens.last_mut() {
            let transition = current.handle_event(&mut self.context, &event);
            self.apply_transition(transition);
        }
        redraw
    }

    fn draw(&self, frame: &mut Frame) {
        if let Some(current) = self.screens.last() {
            current.draw(&self.context, frame);
        }
    }
}
