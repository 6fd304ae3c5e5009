use std::io;

use crossterm::event;

use super::App;

/// TUI application runtime.
///
/// Enters the alternate screen, then waits for terminal events until the app
/// asks to exit, drawing again only after events the app reports as visible.
/// The terminal is restored on return, including on error.
#[derive(Debug, Default)]
pub(crate) struct Runtime {}

impl Runtime {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn run<A>(self, app: &mut A) -> io::Result<()>
    where
        A: App,
    {
        app.init();

        ratatui::run(|terminal| {
            let mut redraw = true;
            while !app.should_exit() {
                if redraw {
                    terminal.draw(|f| app.draw(f))?;
                }
                redraw = app.handle_event(event::read()?);
            }
            Ok(())
        })
    }
}
