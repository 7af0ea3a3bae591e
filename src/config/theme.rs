//! Theme settings for skiff.
//!
//! Colors are configured as strings (names or hex) and parsed into ratatui
//! styles once, when the style sheet is installed.

use crate::utils::parse_color;

use ratatui::style::{Color, Modifier, Style};
use serde::Deserialize;

/// `[theme]` section of skiff.toml.
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct Theme {
    accent: String,
    directory: String,
    parent_row: String,
    selection_bg: String,
    error: String,
    success: String,
    border: String,
    muted: String,
}

impl Theme {
    #[inline]
    pub fn accent_style(&self) -> Style {
        Style::default().fg(parse_color(&self.accent))
    }

    #[inline]
    pub fn directory_style(&self) -> Style {
        Style::default()
            .fg(parse_color(&self.directory))
            .add_modifier(Modifier::BOLD)
    }

    #[inline]
    pub fn parent_row_style(&self) -> Style {
        Style::default()
            .fg(parse_color(&self.parent_row))
            .add_modifier(Modifier::ITALIC)
    }

    #[inline]
    pub fn selection_bg(&self) -> Color {
        parse_color(&self.selection_bg)
    }

    #[inline]
    pub fn error_style(&self) -> Style {
        Style::default().fg(parse_color(&self.error))
    }

    #[inline]
    pub fn success_style(&self) -> Style {
        Style::default().fg(parse_color(&self.success))
    }

    #[inline]
    pub fn border_style(&self) -> Style {
        Style::default().fg(parse_color(&self.border))
    }

    #[inline]
    pub fn muted_style(&self) -> Style {
        Style::default().fg(parse_color(&self.muted))
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            accent: "#89b4fa".to_string(),
            directory: "#f9e2af".to_string(),
            parent_row: "#89b4fa".to_string(),
            selection_bg: "#3a3a68".to_string(),
            error: "#f38ba8".to_string(),
            success: "#a6e3a1".to_string(),
            border: "#3a3a5c".to_string(),
            muted: "#6c7086".to_string(),
        }
    }
}
