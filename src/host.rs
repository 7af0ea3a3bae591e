//! Host-embedding layer for skiff.
//!
//! The panel lives inside a host canvas it does not own. The host
//! environment calls [crate::app::AppState::attach] at the point it
//! creates its node and [crate::app::AppState::detach] when the node goes
//! away; everything in between flows through the [HostHandle] it gets
//! back. No callbacks are patched into the host.
//!
//! - [transform]: stateless math from host transform parameters to the
//!   panel rectangle.
//! - [geometry]: the cancellable periodic task that recomputes it.

pub mod geometry;
pub mod transform;

pub use geometry::GeometrySync;
pub use transform::{CanvasTransform, HostFrame, HostNode, PanelRect, panel_rect};

use crate::core::api::UploadBlob;

use crossbeam_channel::{Receiver, Sender, unbounded};

/// Events the host environment pushes into an attached panel.
#[derive(Debug)]
pub enum HostEvent {
    /// Pointer dragging files entered the panel surface or one of its
    /// children.
    DragEnter,
    DragLeave,
    /// Files were dropped on the panel surface.
    Drop(Vec<UploadBlob>),
}

/// The host side of an attached panel.
///
/// The host pushes transform frames and drag events in, and may watch the
/// panel's current path (the panel publishes it after each successful
/// load).
pub struct HostHandle {
    frame_tx: Sender<HostFrame>,
    event_tx: Sender<HostEvent>,
    path_rx: Receiver<String>,
}

impl HostHandle {
    pub fn frame_tx(&self) -> &Sender<HostFrame> {
        &self.frame_tx
    }

    pub fn event_tx(&self) -> &Sender<HostEvent> {
        &self.event_tx
    }

    pub fn path_rx(&self) -> &Receiver<String> {
        &self.path_rx
    }
}

/// The panel side of the attachment. Dropping it cancels the geometry
/// task and disconnects the host channels.
pub struct HostLink {
    geometry: GeometrySync,
    event_rx: Receiver<HostEvent>,
    path_tx: Sender<String>,
}

impl HostLink {
    /// Creates the paired endpoints: the link the panel keeps and the
    /// handle the host environment drives.
    pub fn establish() -> (HostLink, HostHandle) {
        let geometry = GeometrySync::spawn();
        let (event_tx, event_rx) = unbounded::<HostEvent>();
        let (path_tx, path_rx) = unbounded::<String>();

        let handle = HostHandle {
            frame_tx: geometry.frame_tx().clone(),
            event_tx,
            path_rx,
        };
        let link = HostLink {
            geometry,
            event_rx,
            path_tx,
        };
        (link, handle)
    }

    pub fn rect_rx(&self) -> &Receiver<Option<PanelRect>> {
        self.geometry.rect_rx()
    }

    pub fn event_rx(&self) -> &Receiver<HostEvent> {
        &self.event_rx
    }

    pub fn publish_path(&self, path: &str) {
        let _ = self.path_tx.send(path.to_string());
    }
}
