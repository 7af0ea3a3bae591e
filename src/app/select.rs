//! Selection engine for skiff.
//!
//! Multi-selection over the display rows of the loaded directory: toggle,
//! anchored range, all/none/invert. State transitions are expressed as a
//! pure function from (selection, rows, event) to a new selection, which
//! keeps the whole transition table directly testable.
//!
//! Invariants, always:
//! - the selection only ever holds names from the loaded entry set;
//! - the synthetic parent marker can never become a member.
//!
//! The selection is scoped to one loaded directory; the app state replaces
//! it with an empty one on every navigation and lets the forced reload
//! clear it after mutating actions.

use crate::app::nav::DisplayRows;

use std::collections::HashSet;

/// A selection input. `multi` is the platform secondary-select modifier
/// (Ctrl), `range` is Shift. A plain activation never reaches this engine;
/// only the toggle control or a modified click does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectEvent {
    Click { idx: usize, multi: bool, range: bool },
    All,
    None,
    Invert,
}

/// The selected entry names plus the anchor: the display-row index of the
/// last qualifying click, serving as the start point of a range selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    names: HashSet<String>,
    anchor: Option<usize>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    // Getters / Accessors

    #[inline]
    pub fn names(&self) -> &HashSet<String> {
        &self.names
    }

    #[inline]
    pub fn anchor(&self) -> Option<usize> {
        self.anchor
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Selected names in a stable order, for prompts and batch requests.
    pub fn sorted_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.names.iter().cloned().collect();
        names.sort();
        names
    }

    /// The transition function. Returns the successor selection; the input
    /// state is never mutated.
    pub fn apply(&self, rows: &DisplayRows<'_>, event: SelectEvent) -> Selection {
        match event {
            SelectEvent::Click { idx, multi, range } => {
                if rows.is_parent(idx) || idx >= rows.len() {
                    return self.clone();
                }

                if range && let Some(anchor) = self.anchor {
                    // Range: union-add every entry between anchor and click,
                    // replacing the prior selection unless multi is held.
                    // A pure range-add leaves the anchor where it was.
                    let lo = anchor.min(idx);
                    let hi = anchor.max(idx);
                    let mut names = if multi {
                        self.names.clone()
                    } else {
                        HashSet::new()
                    };
                    for i in lo..=hi {
                        if let Some(entry) = rows.entry_at(i) {
                            names.insert(entry.name.clone());
                        }
                    }
                    Selection {
                        names,
                        anchor: self.anchor,
                    }
                } else {
                    // Toggle membership and move the anchor here. This also
                    // covers a range click with no anchor set.
                    let Some(entry) = rows.entry_at(idx) else {
                        return self.clone();
                    };
                    let mut names = self.names.clone();
                    if !names.remove(&entry.name) {
                        names.insert(entry.name.clone());
                    }
                    Selection {
                        names,
                        anchor: Some(idx),
                    }
                }
            }
            SelectEvent::All => Selection {
                names: rows.entries().iter().map(|e| e.name.clone()).collect(),
                anchor: self.anchor,
            },
            SelectEvent::None => Selection::default(),
            SelectEvent::Invert => Selection {
                names: rows
                    .entries()
                    .iter()
                    .filter(|e| !self.names.contains(&e.name))
                    .map(|e| e.name.clone())
                    .collect(),
                anchor: self.anchor,
            },
        }
    }
}
