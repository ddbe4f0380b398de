//! Color theme system for blockfall
//!
//! Dark and light schemes. Themes affect colors only, never layout or motion.

use anyhow::{anyhow, Result};
use ratatui::style::Color;
use std::fmt;

/// Available color themes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    /// Nord-inspired dark theme (default)
    #[default]
    Dark,
    /// Paper-white light theme
    Light,
}

impl Theme {
    pub fn is_dark(&self) -> bool {
        matches!(self, Theme::Dark)
    }

    pub fn toggled(&self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    /// Get the color scheme for this theme
    pub fn colors(&self) -> ColorScheme {
        match self {
            Theme::Dark => ColorScheme::dark(),
            Theme::Light => ColorScheme::light(),
        }
    }
}

impl std::str::FromStr for Theme {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "dark" | "nord" => Ok(Theme::Dark),
            "light" | "paper" => Ok(Theme::Light),
            _ => Err(anyhow!("Unknown theme '{s}'. Available: dark, light")),
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Theme::Dark => write!(f, "dark"),
            Theme::Light => write!(f, "light"),
        }
    }
}

/// Color scheme for a theme
#[derive(Debug, Clone, Copy)]
pub struct ColorScheme {
    /// Background color for the grid area
    pub background: Color,
    /// Primary text color
    pub text: Color,
    /// Dimmed text color (for secondary info)
    pub text_dim: Color,
    /// Border color for focused elements
    pub focus_border: Color,
    /// Border color for unfocused elements
    pub unfocused_border: Color,
    /// Outline of the activated item
    pub selection: Color,
    /// Fill for the cheapest item in view
    pub heat_cold: Color,
    /// Fill for the most expensive item in view
    pub heat_hot: Color,
    /// Label drawn on top of item fills
    pub item_label: Color,
    /// Toast success message color
    pub toast_success: Color,
    /// Debug panel indicator color
    pub debug_indicator: Color,
}

impl ColorScheme {
    pub fn dark() -> Self {
        Self {
            background: Color::Rgb(46, 52, 64),
            text: Color::Rgb(236, 239, 244),
            text_dim: Color::Rgb(180, 188, 202),
            focus_border: Color::Rgb(235, 203, 139),
            unfocused_border: Color::Rgb(129, 161, 193),
            selection: Color::Rgb(235, 203, 139),
            heat_cold: Color::Rgb(94, 129, 172),
            heat_hot: Color::Rgb(191, 97, 106),
            item_label: Color::Rgb(255, 255, 255),
            toast_success: Color::Rgb(163, 190, 140),
            debug_indicator: Color::Rgb(180, 142, 173),
        }
    }

    pub fn light() -> Self {
        Self {
            background: Color::Rgb(250, 250, 247),
            text: Color::Rgb(30, 30, 36),
            text_dim: Color::Rgb(88, 92, 104),
            focus_border: Color::Rgb(154, 94, 0),
            unfocused_border: Color::Rgb(110, 118, 135),
            selection: Color::Rgb(154, 94, 0),
            heat_cold: Color::Rgb(38, 84, 140),
            heat_hot: Color::Rgb(168, 32, 44),
            item_label: Color::Rgb(255, 255, 255),
            toast_success: Color::Rgb(30, 110, 40),
            debug_indicator: Color::Rgb(120, 60, 140),
        }
    }

    /// Item fill for `t` in `[0, 1]`, blending cold to hot.
    pub fn heat(&self, t: f64) -> Color {
        let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
        match (self.heat_cold, self.heat_hot) {
            (Color::Rgb(r0, g0, b0), Color::Rgb(r1, g1, b1)) => {
                let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
                Color::Rgb(mix(r0, r1), mix(g0, g1), mix(b0, b1))
            }
            (cold, hot) => {
                if t < 0.5 {
                    cold
                } else {
                    hot
                }
            }
        }
    }
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self::dark()
    }
}
