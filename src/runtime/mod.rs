use std::env;
use std::path::PathBuf;

use crossterm::event::{
    DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture,
};
use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::{info, warn};

use crate::app::App;
use crate::audio::RodioBackend;
use crate::library::MediaFilter;
use crate::player::{Controller, ControllerOptions};
use crate::playlist::PlaylistStore;
use crate::theme::ThemeStore;

mod event_loop;
mod logging;
mod settings;
mod startup;

use startup::import_args;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let settings::LoadedSettings {
        settings,
        fallback_reason,
    } = settings::load_settings();
    let log_file = logging::init(&settings.logging);
    info!(log = ?log_file, "musicova starting");
    if let Some(reason) = &fallback_reason {
        warn!(%reason, "running with default settings");
    }

    let theme = ThemeStore::from_settings(&settings);
    let dark = if theme.path().exists() {
        theme.load().unwrap_or_else(|e| {
            warn!(error = %e, "ignoring unreadable theme state");
            settings.ui.start_dark
        })
    } else {
        settings.ui.start_dark
    };

    let backend = RodioBackend::open()?;
    let playlist = PlaylistStore::new(MediaFilter::from_settings(&settings.import))
        .with_skip_duplicates(settings.import.skip_duplicates);
    let mut controller = Controller::new(backend, playlist, ControllerOptions::from_settings(&settings));
    let mut app = App::new(dark);
    if let Some(reason) = fallback_reason {
        app.set_message(format!("{reason}; using defaults"));
    }

    let args: Vec<PathBuf> = env::args_os().skip(1).map(PathBuf::from).collect();
    import_args(&args, &settings.import, &mut controller, &mut app);

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture, EnableFocusChange)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result = event_loop::run(&mut terminal, &settings, &mut app, &mut controller, &theme);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableFocusChange,
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    controller.clear();
    info!("musicova stopped");
    run_result
}

#[cfg(test)]
mod tests;
