//! Key handling for skiff.
//!
//! Routes keys by mode: the delete confirmation swallows everything until
//! answered, prompts edit the input buffer, and normal mode goes through
//! the keymap. All the dispatch preconditions are vetted here before any
//! task is sent.

use crate::app::dispatch::{
    ActionMode, InputMode, check_delete, check_rename, dispatch_create, dispatch_download,
    dispatch_rename,
};
use crate::app::keymap::{self, Action};
use crate::app::select::SelectEvent;
use crate::app::state::{AppState, KeypressResult};
use crate::utils::join_remote_path;

use crossterm::event::{KeyCode, KeyEvent};

enum ActivateTarget {
    Parent,
    Dir(String),
    None,
}

impl AppState {
    /// Central key handler. Returns what the event loop should do next.
    pub fn handle_keypress(&mut self, key: KeyEvent) -> KeypressResult {
        if self.actions().is_confirm_mode() {
            return self.handle_confirm_mode(key);
        }
        if self.actions().is_input_mode() {
            return self.handle_input_mode(key);
        }
        match keymap::lookup(&key) {
            Some(action) => self.handle_action(action),
            None => KeypressResult::Continue,
        }
    }

    /// The blocking delete gate: nothing is sent until the user answers.
    fn handle_confirm_mode(&mut self, key: KeyEvent) -> KeypressResult {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                let ActionMode::ConfirmDelete { names } = self.actions().mode().clone() else {
                    return KeypressResult::Consumed;
                };
                self.actions_mut().exit_mode();
                self.dispatch_confirmed_delete(names);
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                self.actions_mut().exit_mode();
            }
            _ => {}
        }
        KeypressResult::Consumed
    }

    fn handle_input_mode(&mut self, key: KeyEvent) -> KeypressResult {
        match key.code {
            KeyCode::Esc => self.actions_mut().exit_mode(),
            KeyCode::Enter => self.submit_input(),
            KeyCode::Left => self.actions_mut().move_cursor_left(),
            KeyCode::Right => self.actions_mut().move_cursor_right(),
            KeyCode::Home => self.actions_mut().cursor_home(),
            KeyCode::End => self.actions_mut().cursor_end(),
            KeyCode::Backspace => self.actions_mut().backspace_at_cursor(),
            KeyCode::Char(c) => self.actions_mut().insert_at_cursor(c),
            _ => {}
        }
        KeypressResult::Consumed
    }

    fn submit_input(&mut self) {
        let ActionMode::Input { mode, .. } = self.actions().mode() else {
            return;
        };
        let mode = *mode;
        let value = self.actions_mut().take_input();
        self.actions_mut().exit_mode();

        match mode {
            InputMode::NewFile => {
                if dispatch_create(self.nav(), &value, false, self.workers().action_tx()) {
                    self.mark_action_pending();
                }
            }
            InputMode::NewFolder => {
                if dispatch_create(self.nav(), &value, true, self.workers().action_tx()) {
                    self.mark_action_pending();
                }
            }
            InputMode::Rename => {
                // The prompt captured all input, so the selection still has
                // exactly the one item it had when the prompt opened.
                if let Ok(old_name) = check_rename(self.selection())
                    && dispatch_rename(self.nav(), &old_name, &value, self.workers().action_tx())
                {
                    self.mark_action_pending();
                }
            }
            InputMode::Upload => self.upload_local_paths(&value),
        }
    }

    fn handle_action(&mut self, action: Action) -> KeypressResult {
        match action {
            Action::Quit => return KeypressResult::Quit,

            Action::MoveUp => self.move_cursor_up(),
            Action::MoveDown => self.move_cursor_down(),

            Action::Activate => {
                let target = {
                    let rows = self.nav().display_rows();
                    if rows.is_parent(self.cursor()) {
                        ActivateTarget::Parent
                    } else {
                        match rows.entry_at(self.cursor()) {
                            Some(entry) if entry.is_dir => ActivateTarget::Dir(join_remote_path(
                                self.nav().current_path(),
                                &entry.name,
                            )),
                            _ => ActivateTarget::None,
                        }
                    }
                };
                match target {
                    ActivateTarget::Parent => self.go_up(),
                    ActivateTarget::Dir(path) => self.navigate(path),
                    ActivateTarget::None => {}
                }
            }
            Action::GoUp => self.go_up(),
            Action::GoRoot => self.go_root(),
            Action::Refresh => self.refresh(),

            Action::ToggleSelect => self.apply_select(SelectEvent::Click {
                idx: self.cursor(),
                multi: true,
                range: false,
            }),
            Action::RangeSelect => self.apply_select(SelectEvent::Click {
                idx: self.cursor(),
                multi: false,
                range: true,
            }),
            Action::RangeAddSelect => self.apply_select(SelectEvent::Click {
                idx: self.cursor(),
                multi: true,
                range: true,
            }),
            Action::SelectAll => self.apply_select(SelectEvent::All),
            Action::SelectNone => self.apply_select(SelectEvent::None),
            Action::SelectInvert => self.apply_select(SelectEvent::Invert),

            Action::NewFile => {
                self.actions_mut()
                    .enter_input(InputMode::NewFile, "New file name:", String::new());
            }
            Action::NewFolder => {
                self.actions_mut()
                    .enter_input(InputMode::NewFolder, "New folder name:", String::new());
            }
            Action::Rename => match check_rename(self.selection()) {
                Ok(old_name) => {
                    self.actions_mut()
                        .enter_input(InputMode::Rename, "Rename to:", old_name);
                }
                Err(precondition) => self.push_error(precondition.message()),
            },
            Action::Delete => match check_delete(self.selection()) {
                Ok(names) => {
                    if self.config().general().confirm_delete() {
                        self.actions_mut().enter_confirm_delete(names);
                    } else {
                        self.dispatch_confirmed_delete(names);
                    }
                }
                Err(precondition) => self.push_error(precondition.message()),
            },
            Action::Download => {
                let dest = self.config().general().download_dir();
                match dispatch_download(
                    self.selection(),
                    self.nav(),
                    &dest,
                    self.workers().action_tx(),
                ) {
                    Ok(count) => self.push_status(format!("Downloading {} file(s)...", count)),
                    Err(precondition) => self.push_error(precondition.message()),
                }
            }
            Action::Upload => {
                self.actions_mut().enter_input(
                    InputMode::Upload,
                    "Local path(s) to upload (separate with ;):",
                    String::new(),
                );
            }
        }
        KeypressResult::Consumed
    }
}
