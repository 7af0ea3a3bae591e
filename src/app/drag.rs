//! Drop-target tracking for host drag events.
//!
//! The host reports raw dragenter/dragleave pairs for the panel surface
//! *and* its children, so a naive boolean would flicker every time the
//! pointer crosses an inner row. The depth counter absorbs the nesting:
//! the overlay is active while depth > 0 and a real drop always resets the
//! counter, whatever the host delivered before it.

/// Nesting depth of drag-enter events over the panel surface.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DragState {
    depth: u32,
}

impl DragState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enter(&mut self) {
        self.depth = self.depth.saturating_add(1);
    }

    pub fn leave(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    /// A drop happened; the counter resets unconditionally.
    pub fn drop_released(&mut self) {
        self.depth = 0;
    }

    #[inline]
    pub fn overlay_active(&self) -> bool {
        self.depth > 0
    }
}
