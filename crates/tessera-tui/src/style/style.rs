//! Style descriptor where every field may be left unset

use super::Color;
use crossterm::style::{Attribute, Attributes, ContentStyle};

/// Text intensity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum Intensity {
    #[default]
    Normal,
    Bold,
    Dim,
}

/// A style descriptor.
///
/// Each field is independently optional. An unset field inherits from
/// whatever style it is later combined with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Style {
    pub intensity: Option<Intensity>,
    pub italic: Option<bool>,
    pub underline: Option<bool>,
    pub strikethrough: Option<bool>,
    /// Foreground color
    pub fg: Option<Color>,
    /// Background color
    pub bg: Option<Color>,
}

impl Style {
    /// Create a style with every field unset
    pub const fn new() -> Self {
        Self {
            intensity: None,
            italic: None,
            underline: None,
            strikethrough: None,
            fg: None,
            bg: None,
        }
    }

    /// The "reset everything" baseline used by [`Style::fix`]
    pub const fn reset() -> Self {
        Self {
            intensity: Some(Intensity::Normal),
            italic: Some(false),
            underline: Some(false),
            strikethrough: Some(false),
            fg: Some(Color::Reset),
            bg: Some(Color::Reset),
        }
    }

    /// Set foreground color
    pub const fn fg(mut self, color: Color) -> Self {
        self.fg = Some(color);
        self
    }

    /// Set background color
    pub const fn bg(mut self, color: Color) -> Self {
        self.bg = Some(color);
        self
    }

    /// Set intensity
    pub const fn intensity(mut self, intensity: Intensity) -> Self {
        self.intensity = Some(intensity);
        self
    }

    /// Bold text
    pub const fn bold(self) -> Self {
        self.intensity(Intensity::Bold)
    }

    /// Dim/faint text
    pub const fn dim(self) -> Self {
        self.intensity(Intensity::Dim)
    }

    /// Italic text
    pub const fn italic(mut self) -> Self {
        self.italic = Some(true);
        self
    }

    /// Underlined text
    pub const fn underlined(mut self) -> Self {
        self.underline = Some(true);
        self
    }

    /// Strikethrough text
    pub const fn crossed_out(mut self) -> Self {
        self.strikethrough = Some(true);
        self
    }

    /// True when no field is set
    pub const fn is_empty(&self) -> bool {
        self.intensity.is_none()
            && self.italic.is_none()
            && self.underline.is_none()
            && self.strikethrough.is_none()
            && self.fg.is_none()
            && self.bg.is_none()
    }

    /// Field-wise merge: keep `self`'s explicit values, fall back to `other`'s.
    pub fn combine(self, other: Style) -> Self {
        Self {
            intensity: self.intensity.or(other.intensity),
            italic: self.italic.or(other.italic),
            underline: self.underline.or(other.underline),
            strikethrough: self.strikethrough.or(other.strikethrough),
            fg: self.fg.or(other.fg),
            bg: self.bg.or(other.bg),
        }
    }

    /// Resolve against the reset baseline so that every field is explicit.
    ///
    /// An unset color becomes [`Color::Reset`], i.e. "reset this channel"
    /// rather than "inherit whatever the terminal currently has".
    pub fn fix(self) -> Self {
        self.combine(Style::reset())
    }

    /// Swap foreground and background, used for selection highlights
    pub fn inverted(self) -> Self {
        let fixed = self.fix();
        Self {
            fg: match fixed.bg {
                Some(Color::Reset) | None => Some(Color::Black),
                other => other,
            },
            bg: match fixed.fg {
                Some(Color::Reset) | None => Some(Color::White),
                other => other,
            },
            ..self
        }
    }
}

impl From<Style> for ContentStyle {
    fn from(style: Style) -> Self {
        let mut attributes = Attributes::default();
        match style.intensity {
            Some(Intensity::Bold) => attributes.set(Attribute::Bold),
            Some(Intensity::Dim) => attributes.set(Attribute::Dim),
            Some(Intensity::Normal) | None => {}
        }
        if style.italic == Some(true) {
            attributes.set(Attribute::Italic);
        }
        if style.underline == Some(true) {
            attributes.set(Attribute::Underlined);
        }
        if style.strikethrough == Some(true) {
            attributes.set(Attribute::CrossedOut);
        }

        ContentStyle {
            foreground_color: style.fg.map(Into::into),
            background_color: style.bg.map(Into::into),
            underline_color: None,
            attributes,
        }
    }
}
