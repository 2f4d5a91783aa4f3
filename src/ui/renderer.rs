//! Terminal setup and the main event loop.

use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::io;

use crate::api::{ApiClient, ObjectStorage};
use crate::config::Config;
use crate::logger::Logger;
use crate::store::LocalStore;
use crate::ui::app_component::AppComponent;
use crate::ui::core::{Component, EventHandler, EventType};

/// Set up the terminal, run the console until it quits, and restore the
/// terminal afterwards.
pub async fn run_app(
    api: ApiClient,
    storage: ObjectStorage,
    store: LocalStore,
    config: Config,
    logger: Logger,
) -> anyhow::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    if config.ui.mouse_enabled {
        execute!(stdout, EnableMouseCapture)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = AppComponent::new(api, storage, store, config, logger);
    let mut event_handler = EventHandler::new();

    app.trigger_initial_load();

    let result = event_loop(&mut terminal, &mut app, &mut event_handler).await;

    // Disabling mouse capture when it was never enabled is harmless.
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    result
}

async fn event_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut AppComponent,
    events: &mut EventHandler,
) -> anyhow::Result<()> {
    let mut dirty = true;

    loop {
        if dirty {
            terminal.draw(|f| app.render(f, f.area()))?;
            dirty = false;
        }

        let event = events.next_event().await?;
        match event {
            EventType::Key(_) | EventType::Mouse(_) | EventType::Resize(_, _) => {
                app.handle_event(event).await?;
                dirty = true;
            }
            EventType::Tick => {
                // Debounce windows and background results advance on ticks;
                // only redraw when one of them did something.
                dirty = app.process_tick().await;
            }
            EventType::Other => {}
        }

        if app.should_quit() {
            return Ok(());
        }
    }
}
