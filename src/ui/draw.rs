use std::collections::BTreeMap;
use std::sync::LazyLock;

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Padding, Paragraph, Wrap},
};

use crate::app::App;
use crate::audio::AudioBackend;
use crate::config::{ControlsSettings, UiSettings};
use crate::library::ImportMode;
use crate::player::Controller;
use crate::theme::Palette;

use super::card::{TrackCard, TrackCardBuilder, format_time};

/// Rows one card takes: border, time/volume line, progress bar, border.
pub const CARD_HEIGHT: u16 = 4;

static CONTROLS_MAP: LazyLock<BTreeMap<&'static str, &'static str>> = LazyLock::new(|| {
    let mut map = BTreeMap::new();
    map.insert("j/k", "select");
    map.insert("enter/space", "play/pause");
    map.insert("h/l", "prev/next");
    // H/L and -/+ are filled from config.
    map.insert("d", "remove");
    map.insert("C", "clear");
    map.insert("i", "import");
    map.insert("t", "theme");
    map.insert("q", "quit");
    map
});

/// Help line with the configured scrub and volume steps.
pub fn controls_text(controls: &ControlsSettings) -> String {
    let order = [
        "j/k", "enter/space", "h/l", "H/L", "-/+", "d", "C", "i", "t", "q",
    ];
    let mut parts: Vec<String> = order
        .iter()
        .filter_map(|k| match *k {
            "H/L" => Some(format!("[H/L] scrub -/+{}s", controls.scrub_seconds)),
            "-/+" => Some(format!(
                "[-/+] volume -/+{}%",
                (controls.volume_step * 100.0).round() as u32
            )),
            _ => CONTROLS_MAP.get(k).map(|v| format!("[{k}] {v}")),
        })
        .collect();
    parts.push("drag a bar to seek".to_string());
    parts.join(" | ")
}

/// Render the whole screen and record the progress-bar areas on `app`.
pub fn draw<B: AudioBackend>(
    frame: &mut Frame,
    app: &mut App,
    controller: &Controller<B>,
    ui_settings: &UiSettings,
    controls_settings: &ControlsSettings,
) {
    let palette = Palette::for_mode(app.dark);
    frame.render_widget(Block::default().style(palette.base()), frame.area());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(4),
        ])
        .split(frame.area());

    let header = Paragraph::new(ui_settings.header_text.as_str())
        .alignment(Alignment::Center)
        .style(palette.title())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(palette.accent))
                .title(" musicova ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    draw_status_bar(frame, chunks[1], app, controller, &palette);
    draw_cards(frame, chunks[2], app, controller, &palette);

    let footer = Paragraph::new(controls_text(controls_settings))
        .style(palette.dim())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" controls ")
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                }),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(footer, chunks[3]);
}

fn draw_status_bar<B: AudioBackend>(
    frame: &mut Frame,
    area: Rect,
    app: &App,
    controller: &Controller<B>,
    palette: &Palette,
) {
    let (title, text, style) = if app.import.open {
        let mode = match app.import.mode {
            Some(ImportMode::Files) => "files",
            Some(ImportMode::Folder) => "folder",
            None => "[f] files / [o] folder",
        };
        (
            " import (enter confirm, esc cancel) ",
            format!("mode: {mode} | paths (separate with ;): {}_", app.import.input),
            Style::default().fg(palette.accent),
        )
    } else if let Some(msg) = &app.message {
        (" status ", msg.clone(), Style::default().fg(palette.error))
    } else {
        let count = controller.tracks().len();
        let mut text = format!("{count} track{}", if count == 1 { "" } else { "s" });
        let state = controller.state();
        if let Some(track) = state.active().and_then(|id| controller.track(id)) {
            text.push_str(&format!(
                " • Playing: {} [{}] vol {}%",
                track.display_name,
                format_time(state.current_time()),
                (state.volume() * 100.0).round() as u32
            ));
        }
        (" status ", text, palette.base())
    };

    let bar = Paragraph::new(text).style(style).block(
        Block::default()
            .borders(Borders::ALL)
            .title(title)
            .padding(Padding {
                left: 1,
                right: 0,
                top: 0,
                bottom: 0,
            }),
    );
    frame.render_widget(bar, area);
}

fn draw_cards<B: AudioBackend>(
    frame: &mut Frame,
    area: Rect,
    app: &mut App,
    controller: &Controller<B>,
    palette: &Palette,
) {
    app.clear_progress_areas();

    let block = Block::default().borders(Borders::ALL).title(" playlist ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let tracks = controller.tracks();
    if tracks.is_empty() {
        let empty = Paragraph::new("No tracks yet. Press [i] to import files or a folder.")
            .style(palette.dim())
            .alignment(Alignment::Center);
        frame.render_widget(empty, inner);
        return;
    }

    // Keep the selected card roughly centred, building only the visible ones.
    let per_page = usize::from((inner.height / CARD_HEIGHT).max(1));
    let total = tracks.len();
    let start = if total <= per_page {
        0
    } else {
        app.selected
            .saturating_sub(per_page / 2)
            .min(total - per_page)
    };

    let active = controller.state().active();
    for (row, track) in tracks.iter().skip(start).take(per_page).enumerate() {
        let y = inner.y + row as u16 * CARD_HEIGHT;
        let height = CARD_HEIGHT.min(inner.bottom().saturating_sub(y));
        if height < CARD_HEIGHT {
            break;
        }
        let rect = Rect::new(inner.x, y, inner.width, height);

        let card = TrackCardBuilder::new(track)
            .status(controller.status(track.id))
            .selected(start + row == app.selected)
            .active(active == Some(track.id))
            .build();
        let bar = draw_card(frame, rect, &card, palette);
        if !card.unplayable {
            app.push_progress_area(card.id, bar);
        }
    }
}

/// Draw one card and return the rectangle of its progress bar.
fn draw_card(frame: &mut Frame, area: Rect, card: &TrackCard, palette: &Palette) -> Rect {
    let mut title_style = Style::default().fg(palette.fg);
    if card.active {
        title_style = title_style.fg(palette.accent).add_modifier(Modifier::BOLD);
    }
    if card.unplayable {
        title_style = title_style.fg(palette.error);
    }
    let border = if card.selected {
        Style::default().fg(palette.accent)
    } else {
        palette.dim()
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border)
        .style(palette.card())
        .title(Span::styled(format!(" {} {} ", card.icon, card.title), title_style));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1)])
        .split(inner);
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(10), Constraint::Length(10)])
        .split(rows[0]);

    let time = Paragraph::new(Line::from(format!(" {} / {}", card.elapsed, card.total)));
    frame.render_widget(time, cols[0]);
    let volume = Paragraph::new(Line::from(format!("vol {}% ", card.volume_percent)))
        .style(palette.dim())
        .alignment(Alignment::Right);
    frame.render_widget(volume, cols[1]);

    let fill = if card.unplayable {
        palette.error
    } else {
        palette.accent
    };
    let gauge = Gauge::default()
        .ratio(card.progress.clamp(0.0, 1.0))
        .label("")
        .gauge_style(Style::default().fg(fill).bg(palette.progress_empty));
    frame.render_widget(gauge, rows[1]);

    rows[1]
}
