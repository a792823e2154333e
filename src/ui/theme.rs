use std::str::FromStr;

use ratatui::style::Color;

pub struct Theme {
    pub bg: Color,
    pub fg: Color,
    pub highlight: Color,
    pub border: Color,
    pub muted: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            bg: Color::Black,
            fg: Color::Rgb(255, 191, 0),      // Amber
            highlight: Color::Rgb(255, 215, 0), // Gold
            border: Color::Rgb(139, 119, 42),  // Dark gold
            muted: Color::DarkGray,
        }
    }
}

impl Theme {
    pub fn plain() -> Self {
        Self {
            bg: Color::Reset,
            fg: Color::Reset,
            highlight: Color::White,
            border: Color::Gray,
            muted: Color::DarkGray,
        }
    }

    pub fn by_name(name: Option<&str>) -> Self {
        match name.map(str::to_lowercase).as_deref() {
            Some("plain") => Self::plain(),
            _ => Self::default(),
        }
    }

    /// Colour from a label table entry, or the foreground if unset or unknown.
    pub fn label_color(&self, name: Option<&str>) -> Color {
        name.and_then(|n| Color::from_str(n).ok()).unwrap_or(self.fg)
    }
}
