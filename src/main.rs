use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::{Backend, CrosstermBackend},
};
use std::{error::Error, io, sync::Arc, time::Duration};
use tracing::{error, info};

mod actions;
mod app;
mod config;
mod controller;
mod errors;
mod input;
mod list;
mod logging;
mod models;
mod runtime;
mod service;
mod ui;

use app::App;
use config::Config;
use service::HttpTaskService;

fn main() -> Result<(), Box<dyn Error>> {
    let config = Config::load();
    if let Err(err) = logging::init(&config.log) {
        eprintln!("Failed to open log file {:?}: {err}", config.log.path);
    }
    info!(base_url = %config.remote.base_url, "starting todoterm");

    let service = Arc::new(HttpTaskService::new(&config.remote)?);
    let mut app = App::new(config, service);
    actions::refresh(&mut app);

    // Initialize terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    // Unsupported terminals (e.g., Windows Legacy Console) reject enhancement flags.
    let _ = execute!(
        stdout,
        PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES)
    );

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    let _ = execute!(terminal.backend_mut(), PopKeyboardEnhancementFlags);
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture,
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        error!(error = %err, "terminal loop failed");
        println!("{:?}", err);
    }

    Ok(())
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    loop {
        runtime::tick(app);

        terminal.draw(|f| ui::ui(f, app))?;

        if event::poll(Duration::from_millis(250))? {
            input::handle_event(app, event::read()?);
        }

        if app.should_quit {
            info!("quitting");
            return Ok(());
        }
    }
}
