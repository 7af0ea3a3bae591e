//! Shared style sheet for the panel.
//!
//! The sheet is a process-wide presentation resource: the first panel
//! instance installs it from its theme, and every later instance (and the
//! render path) reuses the same installed sheet. The [OnceCell] guard is
//! what makes the installation idempotent.

use crate::config::Theme;

use once_cell::sync::OnceCell;
use ratatui::style::{Color, Modifier, Style};

/// Resolved styles for every panel element.
pub struct StyleSheet {
    pub item: Style,
    pub directory: Style,
    pub parent_row: Style,
    pub accent: Style,
    pub muted: Style,
    pub error: Style,
    pub success: Style,
    pub border: Style,
    pub selection_bg: Color,
    pub cursor: Style,
}

impl StyleSheet {
    fn from_theme(theme: &Theme) -> Self {
        Self {
            item: Style::default(),
            directory: theme.directory_style(),
            parent_row: theme.parent_row_style(),
            accent: theme.accent_style(),
            muted: theme.muted_style(),
            error: theme.error_style(),
            success: theme.success_style(),
            border: theme.border_style(),
            selection_bg: theme.selection_bg(),
            cursor: Style::default().add_modifier(Modifier::REVERSED),
        }
    }
}

static STYLES: OnceCell<StyleSheet> = OnceCell::new();

/// Ensures the style sheet is installed exactly once across all panel
/// instances. Later calls keep the first installation, whatever theme they
/// pass.
pub fn install(theme: &Theme) -> &'static StyleSheet {
    STYLES.get_or_init(|| StyleSheet::from_theme(theme))
}

/// The installed sheet; falls back to the default theme when rendering
/// happens before any installation (tests mostly).
pub fn current() -> &'static StyleSheet {
    STYLES.get_or_init(|| StyleSheet::from_theme(&Theme::default()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn install_is_idempotent() {
        let first = install(&Theme::default()) as *const StyleSheet;
        let second = install(&Theme::default()) as *const StyleSheet;
        let current = current() as *const StyleSheet;
        assert_eq!(first, second);
        assert_eq!(first, current);
    }
}
