//! The terminal user interface of the API client.
//!
//! The interface is a root menu that leads to a transaction list, a form for
//! adding a transaction, a form for deleting transactions and a statistics
//! view with per-category charts.

mod app;
mod ui;
mod views;

use std::{io, path::PathBuf, time::Duration};

use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};

pub use app::App;

use crate::ApiClient;

/// Run the terminal interface until the user quits.
///
/// Each key press is handled to completion before the next one is read, so an
/// action that calls the API service blocks the interface until the call
/// returns.
///
/// # Errors
/// Returns an error if the terminal cannot be set up or drawn to.
pub fn run_tui(api: ApiClient, report_path: PathBuf) -> io::Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let mut app = App::new(api, report_path);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    if let Err(error) = execute!(stdout, EnterAlternateScreen) {
        let _ = disable_raw_mode();
        return Err(error);
    }

    let result: io::Result<()> = (|| {
        let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;

        while !app.should_quit {
            terminal.draw(|frame| ui::draw(frame, &app))?;

            if event::poll(Duration::from_millis(250))? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        runtime.block_on(app.handle_key(key));
                    }
                    _ => {}
                }
            }
        }

        Ok(())
    })();

    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;

    result
}
