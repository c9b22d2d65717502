//! Color themes: a background and an accent applied over a preset style.

use serde::{Deserialize, Serialize};

use crate::color::Rgba;
use crate::error::FieldError;
use crate::style::Style;

const THEME_NAMES: &[&str] = &["red-black", "gray-white", "blue-yellow"];

/// Page themes, cycled in declaration order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Theme {
    #[default]
    RedBlack,
    GrayWhite,
    BlueYellow,
}

impl Theme {
    pub const ALL: [Theme; 3] = [Theme::RedBlack, Theme::GrayWhite, Theme::BlueYellow];

    pub fn from_name(name: &str) -> Result<Self, FieldError> {
        match name {
            "red-black" => Ok(Theme::RedBlack),
            "gray-white" => Ok(Theme::GrayWhite),
            "blue-yellow" => Ok(Theme::BlueYellow),
            _ => Err(FieldError::UnknownTheme(name.to_string())),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Theme::RedBlack => "red-black",
            Theme::GrayWhite => "gray-white",
            Theme::BlueYellow => "blue-yellow",
        }
    }

    pub fn list_names() -> &'static [&'static str] {
        THEME_NAMES
    }

    /// The theme after this one, wrapping around.
    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|&t| t == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    /// Color of particles and links.
    pub fn accent(self) -> Rgba {
        match self {
            Theme::RedBlack => Rgba::from_rgba8(255, 0, 0, 1.0),
            Theme::GrayWhite => Rgba::from_rgba8(96, 96, 96, 1.0),
            Theme::BlueYellow => Rgba::from_rgba8(255, 215, 0, 1.0),
        }
    }

    pub fn background(self) -> Rgba {
        match self {
            Theme::RedBlack => Rgba::BLACK,
            Theme::GrayWhite => Rgba::from_rgba8(240, 240, 240, 1.0),
            Theme::BlueYellow => Rgba::from_rgba8(11, 29, 58, 1.0),
        }
    }

    /// `style` recolored with this theme.
    pub fn apply(self, style: &Style) -> Style {
        style.recolored(self.accent(), self.background())
    }
}
