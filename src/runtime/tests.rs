use std::fs;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;

use super::event_loop::{handle_key_event, handle_mouse_event};
use super::startup::{apply_import, import_args};
use crate::app::App;
use crate::audio::fake::FakeBackend;
use crate::config::Settings;
use crate::library::{ImportEntry, ImportMode, ImportRequest};
use crate::player::{Controller, ControllerOptions, PlayState};
use crate::playlist::PlaylistStore;
use crate::theme::ThemeStore;

struct Harness {
    settings: Settings,
    app: App,
    controller: Controller<FakeBackend>,
    theme: ThemeStore,
    _dir: tempfile::TempDir,
}

impl Harness {
    fn new(names: &[&str]) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let mut controller = Controller::new(
            FakeBackend::new(),
            PlaylistStore::default(),
            ControllerOptions::default(),
        );
        controller.import(
            names
                .iter()
                .map(|n| ImportEntry::from_path(format!("/music/{n}")))
                .collect(),
        );
        controller.take_events();
        Self {
            settings: Settings::default(),
            app: App::new(false),
            controller,
            theme: ThemeStore::new(dir.path().join("state.toml")),
            _dir: dir,
        }
    }

    fn key(&mut self, code: KeyCode) -> bool {
        let quit = handle_key_event(
            KeyEvent::new(code, KeyModifiers::NONE),
            &self.settings,
            &mut self.app,
            &mut self.controller,
            &self.theme,
        );
        for event in self.controller.take_events() {
            self.app.apply_event(&event, self.controller.tracks());
        }
        quit
    }

    fn mouse(&mut self, kind: MouseEventKind, column: u16, row: u16) {
        handle_mouse_event(
            MouseEvent {
                kind,
                column,
                row,
                modifiers: KeyModifiers::NONE,
            },
            &mut self.app,
            &mut self.controller,
        );
    }

    fn id(&self, index: usize) -> crate::library::TrackId {
        self.controller.tracks()[index].id
    }
}

#[test]
fn q_quits() {
    let mut h = Harness::new(&[]);
    assert!(h.key(KeyCode::Char('q')));
    assert!(!h.key(KeyCode::Char('x')));
}

#[test]
fn enter_toggles_the_selected_track() {
    let mut h = Harness::new(&["a.mp3", "b.mp3"]);
    h.key(KeyCode::Char('j'));
    h.key(KeyCode::Enter);
    assert_eq!(h.controller.state().active(), Some(h.id(1)));
    h.key(KeyCode::Char(' '));
    assert_eq!(h.controller.state().active(), None);
}

#[test]
fn next_key_moves_playback_and_the_cursor_follows() {
    let mut h = Harness::new(&["a.mp3", "b.mp3", "c.mp3"]);
    h.key(KeyCode::Enter);
    h.key(KeyCode::Char('l'));
    assert_eq!(h.controller.state().active(), Some(h.id(1)));
    assert_eq!(h.app.selected, 1);

    h.key(KeyCode::Char('h'));
    h.key(KeyCode::Char('h'));
    assert_eq!(h.controller.state().active(), Some(h.id(0)));
}

#[test]
fn scrub_and_volume_keys_use_the_configured_steps() {
    let mut h = Harness::new(&["a.mp3"]);
    h.controller.tick();
    h.key(KeyCode::Char('L'));
    h.key(KeyCode::Char('L'));
    h.key(KeyCode::Char('H'));
    assert_eq!(
        h.controller.status(h.id(0)).map(|s| s.position),
        Some(Duration::from_secs(5))
    );

    h.key(KeyCode::Char('-'));
    h.key(KeyCode::Char('-'));
    let volume = h.controller.status(h.id(0)).map(|s| s.volume).unwrap();
    assert!((volume - 0.9).abs() < 1e-6);
    h.key(KeyCode::Char('+'));
    h.key(KeyCode::Char('+'));
    h.key(KeyCode::Char('+'));
    assert_eq!(h.controller.status(h.id(0)).map(|s| s.volume), Some(1.0));
}

#[test]
fn remove_and_clear_keys() {
    let mut h = Harness::new(&["a.mp3", "b.mp3", "c.mp3"]);
    h.app.selected = 2;
    h.key(KeyCode::Enter);
    h.key(KeyCode::Char('d'));
    assert_eq!(h.controller.tracks().len(), 2);
    assert_eq!(h.controller.state().active(), None);
    assert_eq!(h.app.selected, 1);

    h.key(KeyCode::Char('C'));
    assert!(h.controller.tracks().is_empty());
    assert_eq!(h.app.selected, 0);
}

#[test]
fn theme_key_persists_the_flag() {
    let mut h = Harness::new(&[]);
    h.key(KeyCode::Char('t'));
    assert!(h.app.dark);
    assert!(h.theme.load().unwrap());
    h.key(KeyCode::Char('t'));
    assert!(!h.theme.load().unwrap());
}

#[test]
fn import_dialog_without_a_mode_prompts_and_adds_nothing() {
    let mut h = Harness::new(&[]);
    h.key(KeyCode::Char('i'));
    assert!(h.app.import.open);
    // 'q' is text while the dialog is open.
    assert!(!h.key(KeyCode::Char('q')));
    h.key(KeyCode::Enter);

    assert!(!h.app.import.open);
    assert!(h.controller.tracks().is_empty());
    assert!(h.app.message.as_deref().is_some_and(|m| m.contains("files or a folder")));
}

#[test]
fn import_dialog_imports_a_folder() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("b.mp3"), b"x").unwrap();
    fs::write(dir.path().join("a.wav"), b"x").unwrap();
    fs::write(dir.path().join("notes.txt"), b"x").unwrap();

    let mut h = Harness::new(&[]);
    h.key(KeyCode::Char('i'));
    h.key(KeyCode::Char('o'));
    assert_eq!(h.app.import.mode, Some(ImportMode::Folder));
    for c in dir.path().display().to_string().chars() {
        h.key(KeyCode::Char(c));
    }
    h.key(KeyCode::Enter);

    let names: Vec<&str> = h
        .controller
        .tracks()
        .iter()
        .map(|t| t.display_name.as_str())
        .collect();
    assert_eq!(names, vec!["a", "b"]);
    assert!(h.app.message.is_none());
}

#[test]
fn escape_closes_the_dialog() {
    let mut h = Harness::new(&[]);
    h.key(KeyCode::Char('i'));
    h.key(KeyCode::Char('f'));
    h.key(KeyCode::Esc);
    assert!(!h.app.import.open);
    assert_eq!(h.app.import.mode, None);
}

#[test]
fn mouse_drag_seeks_and_resumes() {
    let mut h = Harness::new(&["a.mp3", "b.mp3"]);
    let a = h.id(0);
    h.app.push_progress_area(a, Rect::new(0, 3, 100, 1));
    h.controller.tick();
    h.controller.play(a);

    h.mouse(MouseEventKind::Down(MouseButton::Left), 10, 3);
    assert!(h.controller.state().is_seeking());
    assert!(!h.controller.is_playing(a));

    h.mouse(MouseEventKind::Drag(MouseButton::Left), 50, 7);
    h.mouse(MouseEventKind::Up(MouseButton::Left), 50, 7);

    assert!(!h.controller.state().is_seeking());
    assert!(h.controller.is_playing(a));
    assert_eq!(
        h.controller.status(a).map(|s| s.position),
        Some(Duration::from_secs(50))
    );
}

#[test]
fn click_on_a_paused_bar_only_moves_it() {
    let mut h = Harness::new(&["a.mp3"]);
    let a = h.id(0);
    h.app.push_progress_area(a, Rect::new(0, 3, 100, 1));
    h.controller.tick();

    h.mouse(MouseEventKind::Down(MouseButton::Left), 25, 3);
    h.mouse(MouseEventKind::Up(MouseButton::Left), 25, 3);
    assert_eq!(h.controller.status(a).map(|s| s.play), Some(PlayState::Stopped));
    assert_eq!(
        h.controller.status(a).map(|s| s.position),
        Some(Duration::from_secs(25))
    );
}

#[test]
fn key_press_mid_drag_finishes_the_drag() {
    let mut h = Harness::new(&["a.mp3"]);
    let a = h.id(0);
    h.app.push_progress_area(a, Rect::new(0, 3, 100, 1));
    h.controller.play(a);
    h.mouse(MouseEventKind::Down(MouseButton::Left), 30, 3);
    h.key(KeyCode::Char('x'));

    assert!(!h.controller.state().is_seeking());
    assert!(h.controller.is_playing(a));
}

#[test]
fn apply_import_reports_missing_files() {
    let mut h = Harness::new(&[]);
    let request = ImportRequest::new(Some(ImportMode::Files), vec!["/no/such/file.mp3".into()]);
    let added = apply_import(&request, &h.settings.import, &mut h.controller, &mut h.app);
    assert_eq!(added, 0);
    assert!(h.app.message.is_some());
}

#[test]
fn apply_import_keeps_existing_files_next_to_a_missing_one() {
    let dir = tempfile::tempdir().unwrap();
    let good = dir.path().join("good.mp3");
    fs::write(&good, b"x").unwrap();

    let mut h = Harness::new(&[]);
    let request = ImportRequest::new(
        Some(ImportMode::Files),
        vec![good, dir.path().join("typo.mp3")],
    );
    let added = apply_import(&request, &h.settings.import, &mut h.controller, &mut h.app);

    assert_eq!(added, 1);
    assert_eq!(h.controller.tracks()[0].display_name, "good");
    assert!(h.app.message.as_deref().is_some_and(|m| m.contains("typo.mp3")));
}

#[test]
fn command_line_paths_split_into_files_and_folders() {
    let dir = tempfile::tempdir().unwrap();
    let folder = dir.path().join("album");
    fs::create_dir(&folder).unwrap();
    fs::write(folder.join("x.ogg"), b"x").unwrap();
    let single = dir.path().join("single.mp3");
    fs::write(&single, b"x").unwrap();

    let mut h = Harness::new(&[]);
    import_args(
        &[folder, single],
        &h.settings.import,
        &mut h.controller,
        &mut h.app,
    );

    let names: Vec<&str> = h
        .controller
        .tracks()
        .iter()
        .map(|t| t.display_name.as_str())
        .collect();
    assert_eq!(names, vec!["single", "x"]);
}
