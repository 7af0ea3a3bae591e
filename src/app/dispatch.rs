//! Action dispatch for skiff.
//!
//! Turns user intents (create, rename, delete, upload, download) into
//! backend tasks. Local preconditions are vetted here, before anything is
//! sent; a violated precondition blocks the call entirely and surfaces as
//! a warning banner. Whatever a dispatched action returns, the app state
//! follows it with a refresh so the panel converges to server truth.
//!
//! [ActionContext] also tracks the modal input state (prompts and the
//! delete confirmation), including the input buffer and cursor.

use crate::app::nav::NavState;
use crate::app::select::Selection;
use crate::core::api::{RemoteEntry, UploadBlob};
use crate::core::worker::ApiTask;

use crossbeam_channel::Sender;

use std::path::Path;

/// Describes the current mode for action handling/input.
#[derive(Clone, PartialEq, Eq)]
pub enum ActionMode {
    Normal,
    Input { mode: InputMode, prompt: String },
    /// Blocking confirmation before any delete request is sent.
    ConfirmDelete { names: Vec<String> },
}

/// Enumerates the available input field modes.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Rename,
    NewFile,
    NewFolder,
    Upload,
}

/// Local precondition failures. They block the call entirely; no request
/// is issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Precondition {
    SelectItemFirst,
    SingleItemOnly,
    SelectItemsFirst,
    SelectFilesFirst,
    FoldersOnly,
}

impl Precondition {
    pub fn message(&self) -> &'static str {
        match self {
            Precondition::SelectItemFirst => "Select an item first",
            Precondition::SingleItemOnly => "Rename works on a single item",
            Precondition::SelectItemsFirst => "Select item(s) first",
            Precondition::SelectFilesFirst => "Select file(s) first",
            Precondition::FoldersOnly => "No files selected (only folders are selected)",
        }
    }
}

/// Rename wants exactly one selected item; returns its name.
pub fn check_rename(selection: &Selection) -> Result<String, Precondition> {
    let mut names = selection.sorted_names();
    match names.len() {
        0 => Err(Precondition::SelectItemFirst),
        1 => Ok(names.remove(0)),
        _ => Err(Precondition::SingleItemOnly),
    }
}

/// Delete wants at least one selected item; returns the victims in a
/// stable order for the confirmation prompt and the batch request.
pub fn check_delete(selection: &Selection) -> Result<Vec<String>, Precondition> {
    if selection.is_empty() {
        return Err(Precondition::SelectItemsFirst);
    }
    Ok(selection.sorted_names())
}

/// The selected entries that are files, in backend order. Directories are
/// silently skipped; downloads only ever apply to files.
pub fn selected_files<'a>(selection: &Selection, entries: &'a [RemoteEntry]) -> Vec<&'a RemoteEntry> {
    entries
        .iter()
        .filter(|e| !e.is_dir && selection.contains(&e.name))
        .collect()
}

/// Sends a create task unless the name is empty. Returns whether a request
/// was issued.
pub fn dispatch_create(nav: &NavState, name: &str, is_dir: bool, tx: &Sender<ApiTask>) -> bool {
    let name = name.trim();
    if name.is_empty() {
        return false;
    }
    let task = if is_dir {
        ApiTask::CreateFolder {
            path: nav.current_path().to_string(),
            name: name.to_string(),
        }
    } else {
        ApiTask::CreateFile {
            path: nav.current_path().to_string(),
            name: name.to_string(),
            content: String::new(),
        }
    };
    tx.send(task).is_ok()
}

/// Sends a rename task. An empty or unchanged new name is a silent no-op.
pub fn dispatch_rename(nav: &NavState, old_name: &str, new_name: &str, tx: &Sender<ApiTask>) -> bool {
    let new_name = new_name.trim();
    if new_name.is_empty() || new_name == old_name {
        return false;
    }
    tx.send(ApiTask::Rename {
        path: nav.current_path().to_string(),
        old_name: old_name.to_string(),
        new_name: new_name.to_string(),
    })
    .is_ok()
}

/// Sends the delete request for already-confirmed victims: a single-delete
/// call for one item, the batch endpoint for more.
pub fn dispatch_delete(nav: &NavState, mut names: Vec<String>, tx: &Sender<ApiTask>) -> bool {
    match names.len() {
        0 => false,
        1 => tx
            .send(ApiTask::Delete {
                path: nav.current_path().to_string(),
                name: names.remove(0),
            })
            .is_ok(),
        _ => tx
            .send(ApiTask::DeleteBatch {
                path: nav.current_path().to_string(),
                names,
            })
            .is_ok(),
    }
}

/// Sends a multipart upload of the given blobs into the current path.
pub fn dispatch_upload(nav: &NavState, blobs: Vec<UploadBlob>, tx: &Sender<ApiTask>) -> bool {
    if blobs.is_empty() {
        return false;
    }
    tx.send(ApiTask::Upload {
        path: nav.current_path().to_string(),
        blobs,
    })
    .is_ok()
}

/// Filters the selection to files and issues one independent download task
/// per file. There is no batched or archived download. Returns how many
/// requests went out.
pub fn dispatch_download(
    selection: &Selection,
    nav: &NavState,
    dest_dir: &Path,
    tx: &Sender<ApiTask>,
) -> Result<usize, Precondition> {
    if selection.is_empty() {
        return Err(Precondition::SelectFilesFirst);
    }
    let files = selected_files(selection, nav.entries());
    if files.is_empty() {
        return Err(Precondition::FoldersOnly);
    }
    let mut sent = 0;
    for file in files {
        if tx
            .send(ApiTask::Download {
                path: nav.current_path().to_string(),
                name: file.name.clone(),
                dest_dir: dest_dir.to_path_buf(),
            })
            .is_ok()
        {
            sent += 1;
        }
    }
    Ok(sent)
}

/// Tracks the current user action mode and input buffer state.
///
/// Stores the current mode/prompt, input buffer and cursor. The handlers
/// route keys here while a prompt is open.
pub struct ActionContext {
    mode: ActionMode,
    input_buffer: String,
    input_cursor_pos: usize,
}

impl ActionContext {
    // Getters / Accessors

    pub fn mode(&self) -> &ActionMode {
        &self.mode
    }

    pub fn input_buffer(&self) -> &str {
        &self.input_buffer
    }

    pub fn input_cursor_pos(&self) -> usize {
        self.input_cursor_pos
    }

    pub fn is_input_mode(&self) -> bool {
        matches!(self.mode, ActionMode::Input { .. })
    }

    pub fn is_confirm_mode(&self) -> bool {
        matches!(self.mode, ActionMode::ConfirmDelete { .. })
    }

    // Mode functions

    pub fn enter_input(&mut self, mode: InputMode, prompt: &str, initial_value: String) {
        self.mode = ActionMode::Input {
            mode,
            prompt: prompt.to_string(),
        };
        self.input_buffer = initial_value;
        self.input_cursor_pos = self.input_buffer.len();
    }

    pub fn enter_confirm_delete(&mut self, names: Vec<String>) {
        self.mode = ActionMode::ConfirmDelete { names };
        self.input_buffer.clear();
        self.input_cursor_pos = 0;
    }

    pub fn exit_mode(&mut self) {
        self.mode = ActionMode::Normal;
        self.input_buffer.clear();
        self.input_cursor_pos = 0;
    }

    /// Consumes the buffer on prompt submit.
    pub fn take_input(&mut self) -> String {
        self.input_cursor_pos = 0;
        std::mem::take(&mut self.input_buffer)
    }

    // Cursor actions

    pub fn move_cursor_left(&mut self) {
        if let Some((previous, _)) = self.input_buffer[..self.input_cursor_pos]
            .char_indices()
            .next_back()
        {
            self.input_cursor_pos = previous;
        }
    }

    pub fn move_cursor_right(&mut self) {
        if let Some(ch) = self.input_buffer[self.input_cursor_pos..].chars().next() {
            self.input_cursor_pos += ch.len_utf8();
        }
    }

    pub fn insert_at_cursor(&mut self, ch: char) {
        self.input_buffer.insert(self.input_cursor_pos, ch);
        self.input_cursor_pos += ch.len_utf8();
    }

    pub fn backspace_at_cursor(&mut self) {
        if self.input_cursor_pos > 0
            && let Some((previous, _)) = self.input_buffer[..self.input_cursor_pos]
                .char_indices()
                .next_back()
        {
            self.input_buffer.remove(previous);
            self.input_cursor_pos = previous;
        }
    }

    pub fn cursor_home(&mut self) {
        self.input_cursor_pos = 0;
    }

    pub fn cursor_end(&mut self) {
        self.input_cursor_pos = self.input_buffer.len();
    }
}

impl Default for ActionContext {
    fn default() -> Self {
        Self {
            mode: ActionMode::Normal,
            input_buffer: String::new(),
            input_cursor_pos: 0,
        }
    }
}
