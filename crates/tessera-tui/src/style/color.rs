//! Terminal colors and their configuration-file spelling

use crate::error::TuiError;
use crossterm::style::Color as CrosstermColor;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Terminal color.
///
/// In configuration files a color is written as a name (`"dark_blue"`), a
/// hex triple (`"#1e90ff"`) or a 256-color palette index (`"208"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Color {
    /// Whatever the terminal uses by default
    #[default]
    Reset,
    Black,
    DarkGrey,
    Red,
    DarkRed,
    Green,
    DarkGreen,
    Yellow,
    DarkYellow,
    Blue,
    DarkBlue,
    Magenta,
    DarkMagenta,
    Cyan,
    DarkCyan,
    White,
    Grey,
    Rgb(u8, u8, u8),
    /// Index into the 256-color palette
    Indexed(u8),
}

const NAMED: [(&str, Color); 17] = [
    ("reset", Color::Reset),
    ("black", Color::Black),
    ("dark_grey", Color::DarkGrey),
    ("red", Color::Red),
    ("dark_red", Color::DarkRed),
    ("green", Color::Green),
    ("dark_green", Color::DarkGreen),
    ("yellow", Color::Yellow),
    ("dark_yellow", Color::DarkYellow),
    ("blue", Color::Blue),
    ("dark_blue", Color::DarkBlue),
    ("magenta", Color::Magenta),
    ("dark_magenta", Color::DarkMagenta),
    ("cyan", Color::Cyan),
    ("dark_cyan", Color::DarkCyan),
    ("white", Color::White),
    ("grey", Color::Grey),
];

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::Rgb(r, g, b)
    }

    /// Name of a palette color, `None` for RGB and indexed colors
    pub fn name(self) -> Option<&'static str> {
        NAMED
            .iter()
            .find(|(_, color)| *color == self)
            .map(|(name, _)| *name)
    }
}

/// `rrggbb` without the leading `#`
fn parse_hex(digits: &str) -> Option<Color> {
    if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let packed = u32::from_str_radix(digits, 16).ok()?;
    let [_, r, g, b] = packed.to_be_bytes();
    Some(Color::Rgb(r, g, b))
}

impl FromStr for Color {
    type Err = TuiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim();
        let invalid = || TuiError::InvalidColor {
            value: s.to_string(),
        };

        if let Some(digits) = value.strip_prefix('#') {
            return parse_hex(digits).ok_or_else(invalid);
        }
        if value.bytes().all(|b| b.is_ascii_digit()) && !value.is_empty() {
            return value.parse::<u8>().map(Color::Indexed).map_err(|_| invalid());
        }

        let name = value.to_ascii_lowercase().replace(['-', ' '], "_");
        NAMED
            .iter()
            .find(|(known, _)| *known == name)
            .map(|(_, color)| *color)
            .ok_or_else(invalid)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Rgb(r, g, b) => write!(f, "#{r:02x}{g:02x}{b:02x}"),
            Color::Indexed(i) => write!(f, "{i}"),
            named => f.write_str(named.name().unwrap_or("reset")),
        }
    }
}

impl TryFrom<String> for Color {
    type Error = TuiError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

impl From<Color> for CrosstermColor {
    fn from(color: Color) -> Self {
        match color {
            Color::Reset => CrosstermColor::Reset,
            Color::Black => CrosstermColor::Black,
            Color::DarkGrey => CrosstermColor::DarkGrey,
            Color::Red => CrosstermColor::Red,
            Color::DarkRed => CrosstermColor::DarkRed,
            Color::Green => CrosstermColor::Green,
            Color::DarkGreen => CrosstermColor::DarkGreen,
            Color::Yellow => CrosstermColor::Yellow,
            Color::DarkYellow => CrosstermColor::DarkYellow,
            Color::Blue => CrosstermColor::Blue,
            Color::DarkBlue => CrosstermColor::DarkBlue,
            Color::Magenta => CrosstermColor::Magenta,
            Color::DarkMagenta => CrosstermColor::DarkMagenta,
            Color::Cyan => CrosstermColor::Cyan,
            Color::DarkCyan => CrosstermColor::DarkCyan,
            Color::White => CrosstermColor::White,
            Color::Grey => CrosstermColor::Grey,
            Color::Rgb(r, g, b) => CrosstermColor::Rgb { r, g, b },
            Color::Indexed(i) => CrosstermColor::AnsiValue(i),
        }
    }
}
