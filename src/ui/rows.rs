//! Row cache and summary banners for the panel.
//!
//! Row content (icon, name, formatted size) is built once per accepted
//! directory load, keyed on the navigation load generation. A pure
//! selection change therefore never rebuilds rows; only highlight state
//! and the two summary lines are recomputed.

use crate::app::nav::NavState;
use crate::app::select::Selection;
use crate::ui::icons::{icon_for, parent_icon};
use crate::utils::format_entry_size;

use humansize::{DECIMAL, format_size};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    Parent,
    Dir,
    File,
}

/// One prebuilt display row.
pub struct RowLine {
    pub kind: RowKind,
    pub icon: &'static str,
    pub name: String,
    pub size: String,
}

/// Rows rebuilt only when the loaded entry set changes.
pub struct RowCache {
    load_gen: Option<u64>,
    rows: Vec<RowLine>,
}

impl RowCache {
    pub fn new() -> Self {
        Self {
            load_gen: None,
            rows: Vec::new(),
        }
    }

    /// Rebuilds the rows iff the navigation state accepted a new listing
    /// since the last sync. Returns whether a rebuild happened.
    pub fn sync(&mut self, nav: &NavState) -> bool {
        if self.load_gen == Some(nav.load_gen()) {
            return false;
        }
        self.load_gen = Some(nav.load_gen());

        let display = nav.display_rows();
        self.rows = Vec::with_capacity(display.len());
        if display.has_parent() {
            self.rows.push(RowLine {
                kind: RowKind::Parent,
                icon: parent_icon(),
                name: "..".to_string(),
                size: String::new(),
            });
        }
        for entry in display.entries() {
            self.rows.push(RowLine {
                kind: if entry.is_dir {
                    RowKind::Dir
                } else {
                    RowKind::File
                },
                icon: icon_for(&entry.name, entry.is_dir),
                name: entry.name.clone(),
                size: format_entry_size(entry.size, entry.is_dir),
            });
        }
        true
    }

    pub fn rows(&self) -> &[RowLine] {
        &self.rows
    }
}

impl Default for RowCache {
    fn default() -> Self {
        Self::new()
    }
}

/// The always-visible status line: folder/file counts, total byte size of
/// files in the directory, and the selection count when one exists.
pub fn status_line(nav: &NavState, selection: &Selection) -> String {
    let dirs = nav.entries().iter().filter(|e| e.is_dir).count();
    let files = nav.entries().iter().filter(|e| !e.is_dir).count();
    let total: u64 = nav
        .entries()
        .iter()
        .filter(|e| !e.is_dir)
        .map(|e| e.size)
        .sum();

    let mut text = format!("{} folder(s), {} file(s)", dirs, files);
    if total > 0 {
        text.push_str(&format!(" — {}", format_size(total, DECIMAL)));
    }
    if !selection.is_empty() {
        text.push_str(&format!("  |  {} selected", selection.len()));
    }
    text
}

/// The selection banner, shown only while the selection is non-empty:
/// selected count, folder/file split and selected byte size.
pub fn selection_line(nav: &NavState, selection: &Selection) -> String {
    let selected: Vec<_> = nav
        .entries()
        .iter()
        .filter(|e| selection.contains(&e.name))
        .collect();
    let dirs = selected.iter().filter(|e| e.is_dir).count();
    let files = selected.iter().filter(|e| !e.is_dir).count();
    let size: u64 = selected.iter().filter(|e| !e.is_dir).map(|e| e.size).sum();

    let mut text = format!("{} selected", selection.len());
    let mut parts = Vec::new();
    if dirs > 0 {
        parts.push(format!("{} folder(s)", dirs));
    }
    if files > 0 {
        parts.push(format!("{} file(s)", files));
    }
    if !parts.is_empty() {
        text.push_str(&format!(" — {}", parts.join(", ")));
    }
    if size > 0 {
        text.push_str(&format!(" — {}", format_size(size, DECIMAL)));
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::nav::DisplayRows;
    use crate::app::select::SelectEvent;
    use crate::core::api::{Listing, RemoteEntry};

    fn nav_with(entries: Vec<RemoteEntry>, is_root: bool) -> NavState {
        let mut nav = NavState::new();
        let id = nav.prepare_load();
        nav.apply_listing(
            id,
            Ok(Listing {
                current_path: if is_root { String::new() } else { "sub".into() },
                entries,
                is_root,
            }),
        );
        nav
    }

    #[test]
    fn rows_rebuild_only_per_load_generation() {
        let mut nav = nav_with(vec![RemoteEntry::file("a.txt", 10)], false);
        let mut cache = RowCache::new();

        assert!(cache.sync(&nav));
        assert_eq!(cache.rows().len(), 2, "parent marker plus one entry");
        assert_eq!(cache.rows()[0].kind, RowKind::Parent);

        // Selection changes come and go without touching the cache.
        assert!(!cache.sync(&nav));

        let id = nav.prepare_load();
        nav.apply_listing(
            id,
            Ok(Listing {
                current_path: String::new(),
                entries: vec![RemoteEntry::dir("models")],
                is_root: true,
            }),
        );
        assert!(cache.sync(&nav));
        assert_eq!(cache.rows().len(), 1, "no parent marker at root");
        assert_eq!(cache.rows()[0].kind, RowKind::Dir);
    }

    #[test]
    fn status_line_counts_and_sizes() {
        let nav = nav_with(
            vec![
                RemoteEntry::dir("models"),
                RemoteEntry::file("a.bin", 1_000),
                RemoteEntry::file("b.bin", 500),
            ],
            true,
        );
        let total = format_size(1_500u64, DECIMAL);
        assert_eq!(
            status_line(&nav, &Selection::new()),
            format!("1 folder(s), 2 file(s) — {}", total)
        );

        let rows = nav.display_rows();
        let sel = Selection::new().apply(
            &rows,
            SelectEvent::Click {
                idx: 1,
                multi: true,
                range: false,
            },
        );
        assert_eq!(
            status_line(&nav, &sel),
            format!("1 folder(s), 2 file(s) — {}  |  1 selected", total)
        );
    }

    #[test]
    fn selection_line_reports_the_selected_subset() {
        let nav = nav_with(
            vec![
                RemoteEntry::dir("models"),
                RemoteEntry::file("a.bin", 1_000),
                RemoteEntry::file("b.bin", 500),
            ],
            true,
        );
        let rows = DisplayRows::new(false, nav.entries());
        let mut sel = Selection::new();
        for idx in [0, 2] {
            sel = sel.apply(
                &rows,
                SelectEvent::Click {
                    idx,
                    multi: true,
                    range: false,
                },
            );
        }

        assert_eq!(
            selection_line(&nav, &sel),
            "2 selected — 1 folder(s), 1 file(s) — 500 B"
        );
    }
}
