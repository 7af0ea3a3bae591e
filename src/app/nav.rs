//! Navigation state for skiff.
//!
//! Owns the current remote path, the loaded entry set, root status and the
//! load/error lifecycle. Entries persist unchanged across a failed load
//! (stale but visible) and are replaced wholesale on success.
//!
//! Every load carries a request generation; a listing response whose
//! generation is not the latest issued is discarded, so overlapping
//! navigations can never leave the panel showing the older directory.

use crate::core::api::{ApiError, Listing, RemoteEntry};
use crate::utils::parent_remote_path;

/// Holds the navigation and entry-set state of the panel.
pub struct NavState {
    current_path: String,
    entries: Vec<RemoteEntry>,
    is_root: bool,
    loading: bool,
    last_error: Option<String>,
    request_id: u64,
    load_gen: u64,
}

impl NavState {
    pub fn new() -> Self {
        Self {
            current_path: String::new(),
            entries: Vec::new(),
            is_root: true,
            loading: false,
            last_error: None,
            request_id: 0,
            load_gen: 0,
        }
    }

    // Getters / Accessors

    #[inline]
    pub fn current_path(&self) -> &str {
        &self.current_path
    }

    #[inline]
    pub fn entries(&self) -> &[RemoteEntry] {
        &self.entries
    }

    #[inline]
    pub fn is_root(&self) -> bool {
        self.is_root
    }

    #[inline]
    pub fn loading(&self) -> bool {
        self.loading
    }

    #[inline]
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    #[inline]
    pub fn request_id(&self) -> u64 {
        self.request_id
    }

    /// Bumped once per accepted listing; row caches key off this.
    #[inline]
    pub fn load_gen(&self) -> u64 {
        self.load_gen
    }

    /// The parent of the current path, or None at the root.
    pub fn parent_path(&self) -> Option<String> {
        if self.is_root {
            None
        } else {
            Some(parent_remote_path(&self.current_path))
        }
    }

    /// Starts a new load: bumps the request generation (instantly orphaning
    /// every in-flight listing) and flips the loading flag. The caller
    /// sends the matching task and clears the selection.
    pub fn prepare_load(&mut self) -> u64 {
        self.request_id = self.request_id.wrapping_add(1);
        self.loading = true;
        self.request_id
    }

    /// Applies a listing response. Returns false when the response belongs
    /// to a superseded generation and was discarded.
    ///
    /// On success the entry set, path and root flag are replaced and the
    /// error cleared; on failure only `last_error` changes and the prior
    /// entries stay visible.
    pub fn apply_listing(&mut self, request_id: u64, result: Result<Listing, ApiError>) -> bool {
        if request_id != self.request_id {
            return false;
        }

        self.loading = false;
        match result {
            Ok(listing) => {
                self.current_path = listing.current_path;
                self.entries = listing.entries;
                self.is_root = listing.is_root;
                self.last_error = None;
                self.load_gen = self.load_gen.wrapping_add(1);
            }
            Err(err) => {
                self.last_error = Some(err.to_string());
            }
        }
        true
    }

    /// Clears a previously surfaced load error (banner expiry).
    pub fn clear_error(&mut self) {
        self.last_error = None;
    }

    /// View over the rendered row sequence: the entry list with a synthetic
    /// parent marker prepended outside the root.
    pub fn display_rows(&self) -> DisplayRows<'_> {
        DisplayRows::new(!self.is_root, &self.entries)
    }
}

impl Default for NavState {
    fn default() -> Self {
        Self::new()
    }
}

/// The rendered row sequence: backend-ordered entries, preceded by a parent
/// marker when the current directory is not the root. The marker is
/// structural only; it has no name and can never join a selection.
#[derive(Debug, Clone, Copy)]
pub struct DisplayRows<'a> {
    has_parent: bool,
    entries: &'a [RemoteEntry],
}

impl<'a> DisplayRows<'a> {
    pub fn new(has_parent: bool, entries: &'a [RemoteEntry]) -> Self {
        Self {
            has_parent,
            entries,
        }
    }

    #[inline]
    pub fn has_parent(&self) -> bool {
        self.has_parent
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len() + usize::from(self.has_parent)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    pub fn entries(&self) -> &'a [RemoteEntry] {
        self.entries
    }

    /// Whether the row at `idx` is the synthetic parent marker.
    #[inline]
    pub fn is_parent(&self, idx: usize) -> bool {
        self.has_parent && idx == 0
    }

    /// The entry behind row `idx`; None for the parent marker and out of
    /// range indices.
    pub fn entry_at(&self, idx: usize) -> Option<&'a RemoteEntry> {
        if self.is_parent(idx) {
            return None;
        }
        self.entries.get(idx - usize::from(self.has_parent))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(path: &str, names: &[&str], is_root: bool) -> Listing {
        Listing {
            current_path: path.to_string(),
            entries: names.iter().map(|n| RemoteEntry::file(n, 10)).collect(),
            is_root,
        }
    }

    #[test]
    fn successful_load_replaces_everything() {
        let mut nav = NavState::new();
        let id = nav.prepare_load();
        assert!(nav.loading());

        assert!(nav.apply_listing(id, Ok(listing("models", &["a", "b"], false))));
        assert!(!nav.loading());
        assert_eq!(nav.current_path(), "models");
        assert_eq!(nav.entries().len(), 2);
        assert!(!nav.is_root());
        assert!(nav.last_error().is_none());
        assert_eq!(nav.load_gen(), 1);
    }

    #[test]
    fn failed_load_keeps_stale_entries_visible() {
        let mut nav = NavState::new();
        let id = nav.prepare_load();
        assert!(nav.apply_listing(id, Ok(listing("models", &["a"], false))));

        let id = nav.prepare_load();
        assert!(nav.apply_listing(id, Err(ApiError::Backend("gone".into()))));

        assert_eq!(nav.last_error(), Some("gone"));
        assert_eq!(nav.current_path(), "models", "path untouched on failure");
        assert_eq!(nav.entries().len(), 1, "entries untouched on failure");
        assert_eq!(nav.load_gen(), 1, "row generation untouched on failure");
        assert!(!nav.loading());
    }

    #[test]
    fn stale_generations_are_discarded() {
        let mut nav = NavState::new();
        let old_id = nav.prepare_load();
        let new_id = nav.prepare_load();

        // The older response resolves last in this interleaving; it must
        // not win.
        assert!(nav.apply_listing(new_id, Ok(listing("new", &["n"], false))));
        assert!(!nav.apply_listing(old_id, Ok(listing("old", &["o"], false))));

        assert_eq!(nav.current_path(), "new");
        assert_eq!(nav.entries()[0].name, "n");
    }

    #[test]
    fn errored_state_permits_further_navigation() {
        let mut nav = NavState::new();
        let id = nav.prepare_load();
        assert!(nav.apply_listing(id, Err(ApiError::Transport("refused".into()))));

        let id = nav.prepare_load();
        assert!(nav.loading());
        assert!(nav.apply_listing(id, Ok(listing("", &["x"], true))));
        assert!(nav.last_error().is_none());
    }

    #[test]
    fn parent_path_stops_at_root() {
        let mut nav = NavState::new();
        assert_eq!(nav.parent_path(), None);

        let id = nav.prepare_load();
        nav.apply_listing(id, Ok(listing("a/b/c", &[], false)));
        assert_eq!(nav.parent_path().as_deref(), Some("a/b"));
    }

    #[test]
    fn display_rows_prepend_parent_outside_root() {
        let entries = vec![RemoteEntry::dir("sub"), RemoteEntry::file("f.txt", 1)];

        let rows = DisplayRows::new(true, &entries);
        assert_eq!(rows.len(), 3);
        assert!(rows.is_parent(0));
        assert!(rows.entry_at(0).is_none());
        assert_eq!(rows.entry_at(1).map(|e| e.name.as_str()), Some("sub"));
        assert_eq!(rows.entry_at(2).map(|e| e.name.as_str()), Some("f.txt"));
        assert!(rows.entry_at(3).is_none());

        let rows = DisplayRows::new(false, &entries);
        assert_eq!(rows.len(), 2);
        assert!(!rows.is_parent(0));
        assert_eq!(rows.entry_at(0).map(|e| e.name.as_str()), Some("sub"));
    }
}
