//! Key bindings for skiff.
//!
//! Maps raw key events to panel actions. The multi modifier semantics
//! live in the actions themselves: toggle acts like a Ctrl-click, the two
//! range actions like Shift-click with and without Ctrl held.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Everything a key can ask the panel to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    MoveUp,
    MoveDown,
    /// Open the row under the cursor: parent marker goes up, directories
    /// navigate in, files do nothing.
    Activate,
    GoUp,
    GoRoot,
    Refresh,
    /// Toggle selection at the cursor (checkbox-equivalent control).
    ToggleSelect,
    /// Anchored range selection, replacing the prior selection.
    RangeSelect,
    /// Anchored range selection, adding to the prior selection.
    RangeAddSelect,
    SelectAll,
    SelectNone,
    SelectInvert,
    NewFile,
    NewFolder,
    Rename,
    Delete,
    Download,
    Upload,
    Quit,
}

/// Looks up the action bound to a key event, if any.
pub fn lookup(key: &KeyEvent) -> Option<Action> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('r') => Some(Action::Refresh),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Up | KeyCode::Char('k') => Some(Action::MoveUp),
        KeyCode::Down | KeyCode::Char('j') => Some(Action::MoveDown),
        KeyCode::Enter | KeyCode::Char('l') | KeyCode::Right => Some(Action::Activate),
        KeyCode::Char('h') | KeyCode::Left | KeyCode::Backspace => Some(Action::GoUp),
        KeyCode::Home | KeyCode::Char('~') => Some(Action::GoRoot),
        KeyCode::F(5) => Some(Action::Refresh),
        KeyCode::Char(' ') => Some(Action::ToggleSelect),
        KeyCode::Char('v') => Some(Action::RangeSelect),
        KeyCode::Char('V') => Some(Action::RangeAddSelect),
        KeyCode::Char('a') => Some(Action::SelectAll),
        KeyCode::Char('n') => Some(Action::SelectNone),
        KeyCode::Char('i') => Some(Action::SelectInvert),
        KeyCode::Char('c') => Some(Action::NewFile),
        KeyCode::Char('C') => Some(Action::NewFolder),
        KeyCode::Char('r') => Some(Action::Rename),
        KeyCode::Char('x') | KeyCode::Delete => Some(Action::Delete),
        KeyCode::Char('s') => Some(Action::Download),
        KeyCode::Char('u') => Some(Action::Upload),
        KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
        _ => None,
    }
}
