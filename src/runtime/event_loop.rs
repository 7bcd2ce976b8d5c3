use std::time::Duration;

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::{debug, trace, warn};

use crate::app::App;
use crate::audio::AudioBackend;
use crate::config;
use crate::library::ImportMode;
use crate::player::Controller;
use crate::theme::ThemeStore;
use crate::ui;

use super::startup::apply_import;

/// Main terminal event loop: polls the backend, redraws, and routes input
/// to the controller. Returns `Ok(())` when shutdown is requested.
pub fn run<B: AudioBackend>(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    app: &mut App,
    controller: &mut Controller<B>,
    theme: &ThemeStore,
) -> Result<(), Box<dyn std::error::Error>> {
    let tick = Duration::from_millis(settings.audio.tick_ms);

    loop {
        controller.tick();
        for event in controller.take_events() {
            trace!(?event, "player event");
            app.apply_event(&event, controller.tracks());
        }

        terminal.draw(|f| ui::draw(f, app, controller, &settings.ui, &settings.controls))?;

        if event::poll(tick)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if handle_key_event(key, settings, app, controller, theme) {
                        break;
                    }
                }
                Event::Mouse(mouse) => handle_mouse_event(mouse, app, controller),
                Event::FocusLost => controller.cancel_seek(),
                _ => {}
            }
        }
    }

    Ok(())
}

/// Returns `true` when the user asked to quit.
pub fn handle_key_event<B: AudioBackend>(
    key: KeyEvent,
    settings: &config::Settings,
    app: &mut App,
    controller: &mut Controller<B>,
    theme: &ThemeStore,
) -> bool {
    // A key press during a drag finishes the drag where it stands.
    if controller.state().is_seeking() {
        controller.cancel_seek();
    }

    if app.import.open {
        handle_import_key(key, settings, app, controller);
        return false;
    }

    let selected = app.selected_id(controller.tracks());
    // Transport keys act on the playing track, falling back to the cursor.
    let target = controller.state().active().or(selected);

    match key.code {
        KeyCode::Char('q') => return true,
        KeyCode::Char('j') | KeyCode::Down => {
            app.follow_playback = false;
            app.next(controller.tracks().len());
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.follow_playback = false;
            app.prev(controller.tracks().len());
        }
        KeyCode::Enter | KeyCode::Char(' ') => {
            if let Some(id) = selected {
                app.follow_playback = true;
                app.clear_message();
                controller.toggle_play_pause(id);
            }
        }
        KeyCode::Char('l') => {
            if let Some(id) = target {
                app.follow_playback = true;
                controller.next(id);
            }
        }
        KeyCode::Char('h') => {
            if let Some(id) = target {
                app.follow_playback = true;
                controller.previous(id);
            }
        }
        KeyCode::Char('L') => {
            if let Some(id) = target {
                controller.seek_by(id, scrub_secs(&settings.controls));
            }
        }
        KeyCode::Char('H') => {
            if let Some(id) = target {
                controller.seek_by(id, -scrub_secs(&settings.controls));
            }
        }
        KeyCode::Char('+') | KeyCode::Char('=') => {
            if let Some(id) = selected {
                nudge_volume(controller, id, settings.controls.volume_step);
            }
        }
        KeyCode::Char('-') => {
            if let Some(id) = selected {
                nudge_volume(controller, id, -settings.controls.volume_step);
            }
        }
        KeyCode::Char('d') | KeyCode::Delete => {
            if let Some(id) = selected {
                controller.remove(id);
            }
        }
        KeyCode::Char('C') => {
            controller.clear();
            app.selected = 0;
        }
        KeyCode::Char('i') => app.open_import(),
        KeyCode::Char('t') => {
            let dark = app.toggle_theme();
            if let Err(e) = theme.save(dark) {
                warn!(error = %e, "could not save theme");
                app.set_message(format!("theme not saved: {e}"));
            }
        }
        KeyCode::Esc => app.clear_message(),
        _ => {}
    }

    false
}

fn handle_import_key<B: AudioBackend>(
    key: KeyEvent,
    settings: &config::Settings,
    app: &mut App,
    controller: &mut Controller<B>,
) {
    match key.code {
        KeyCode::Esc => app.close_import(),
        KeyCode::Enter => {
            let request = app.submit_import();
            let added = apply_import(&request, &settings.import, controller, app);
            debug!(added, "import dialog confirmed");
        }
        KeyCode::Backspace => app.pop_import_char(),
        KeyCode::Tab => {
            let mode = match app.import.mode {
                Some(ImportMode::Files) => ImportMode::Folder,
                _ => ImportMode::Files,
            };
            app.set_import_mode(mode);
        }
        // Until a mode is picked, f and o pick it.
        KeyCode::Char('f') if app.import.mode.is_none() => app.set_import_mode(ImportMode::Files),
        KeyCode::Char('o') if app.import.mode.is_none() => app.set_import_mode(ImportMode::Folder),
        KeyCode::Char(c) if !c.is_control() => app.push_import_char(c),
        _ => {}
    }
}

/// Route pointer input on the progress bars into the drag lifecycle.
pub fn handle_mouse_event<B: AudioBackend>(
    mouse: MouseEvent,
    app: &mut App,
    controller: &mut Controller<B>,
) {
    let (x, y) = (mouse.column, mouse.row);
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            if controller.state().is_seeking() {
                controller.cancel_seek();
            }
            if let Some((id, fraction)) = app.progress_hit(x, y) {
                if let Some(pos) = controller.tracks().iter().position(|t| t.id == id) {
                    app.selected = pos;
                }
                controller.begin_seek(id);
                controller.seek(id, fraction);
            }
        }
        MouseEventKind::Drag(MouseButton::Left) => {
            if let Some(gesture) = controller.state().seek_gesture().copied() {
                if let Some(fraction) = app.progress_fraction(gesture.track, x) {
                    controller.seek(gesture.track, fraction);
                }
            }
        }
        MouseEventKind::Up(_) => {
            // Released anywhere: the last position reported wins when the
            // pointer is no longer over a bar.
            if let Some(gesture) = controller.state().seek_gesture().copied() {
                if let Some(fraction) = app.progress_fraction(gesture.track, x) {
                    controller.seek(gesture.track, fraction);
                }
                controller.end_seek();
            }
        }
        _ => {}
    }
}

fn scrub_secs(controls: &config::ControlsSettings) -> i64 {
    controls.scrub_seconds.min(i64::MAX as u64) as i64
}

fn nudge_volume<B: AudioBackend>(controller: &mut Controller<B>, id: crate::library::TrackId, step: f32) {
    let current = controller.status(id).map(|s| s.volume).unwrap_or(1.0);
    controller.set_volume(id, current + step);
}
