use ratatui::style::{Color, Modifier, Style};

/// Colours the view draws with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub bg: Color,
    pub fg: Color,
    pub card_bg: Color,
    pub accent: Color,
    pub muted: Color,
    pub error: Color,
    pub progress_empty: Color,
}

const BLUE_VIOLET: Color = Color::Rgb(0x8a, 0x2b, 0xe2);

impl Palette {
    pub fn light() -> Self {
        Self {
            bg: Color::Rgb(0xff, 0xff, 0xff),
            fg: Color::Rgb(0x33, 0x33, 0x33),
            card_bg: Color::Rgb(0xf9, 0xf9, 0xf9),
            accent: BLUE_VIOLET,
            muted: Color::Rgb(0x88, 0x88, 0x88),
            error: Color::Rgb(0xc0, 0x39, 0x2b),
            progress_empty: Color::Rgb(0xdd, 0xdd, 0xdd),
        }
    }

    pub fn dark() -> Self {
        Self {
            bg: Color::Rgb(0x1a, 0x1a, 0x1a),
            fg: Color::Rgb(0xe0, 0xe0, 0xe0),
            card_bg: Color::Rgb(0x2d, 0x2d, 0x2d),
            accent: BLUE_VIOLET,
            muted: Color::Rgb(0x99, 0x99, 0x99),
            error: Color::Rgb(0xff, 0x6b, 0x6b),
            progress_empty: Color::Rgb(0x44, 0x44, 0x44),
        }
    }

    pub fn for_mode(dark: bool) -> Self {
        if dark { Self::dark() } else { Self::light() }
    }

    pub fn base(&self) -> Style {
        Style::default().fg(self.fg).bg(self.bg)
    }

    pub fn card(&self) -> Style {
        Style::default().fg(self.fg).bg(self.card_bg)
    }

    pub fn title(&self) -> Style {
        Style::default().fg(self.accent).add_modifier(Modifier::BOLD)
    }

    pub fn dim(&self) -> Style {
        Style::default().fg(self.muted)
    }
}
