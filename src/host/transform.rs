//! Pure geometry for the host embedding.
//!
//! The panel never owns its place on screen: every frame it is re-derived
//! from the host node's position/size and the canvas pan/zoom transform.
//! This module is the stateless math for that derivation; the periodic
//! task in [crate::host::geometry] drives it.

/// The host-owned object the panel is anchored to, in canvas units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HostNode {
    pub pos: (f32, f32),
    pub size: (f32, f32),
    pub collapsed: bool,
}

/// Pan/zoom state of the host canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasTransform {
    pub scale: f32,
    pub offset: (f32, f32),
}

/// One sampled set of host transform parameters. `canvas: None` means the
/// canvas is unavailable and the panel must hide.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HostFrame {
    pub node: HostNode,
    pub canvas: Option<CanvasTransform>,
    /// Viewport size in cells.
    pub viewport: (u16, u16),
}

/// The panel's screen rectangle, in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelRect {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

/// Height of the node title bar the panel must not cover, in canvas rows.
pub const NODE_TITLE_ROWS: f32 = 1.0;

/// Derives the panel rectangle for one frame, or None when the panel must
/// hide: node collapsed, canvas unavailable, or nothing left on screen
/// after clipping to the viewport.
pub fn panel_rect(frame: &HostFrame) -> Option<PanelRect> {
    if frame.node.collapsed {
        return None;
    }
    let canvas = frame.canvas?;
    if canvas.scale <= 0.0 {
        return None;
    }

    let scale = canvas.scale;
    let x = (frame.node.pos.0 + canvas.offset.0) * scale;
    let y = (frame.node.pos.1 + canvas.offset.1) * scale;
    let w = frame.node.size.0 * scale;
    let title = NODE_TITLE_ROWS * scale;
    let h = frame.node.size.1 * scale - title;

    clip(x, y + title, w, h, frame.viewport)
}

/// Intersects a float rectangle with the viewport and rounds to cells.
fn clip(x: f32, y: f32, w: f32, h: f32, viewport: (u16, u16)) -> Option<PanelRect> {
    let (vw, vh) = (f32::from(viewport.0), f32::from(viewport.1));

    let left = x.max(0.0);
    let top = y.max(0.0);
    let right = (x + w).min(vw);
    let bottom = (y + h).min(vh);
    if right - left < 1.0 || bottom - top < 1.0 {
        return None;
    }

    Some(PanelRect {
        x: left as u16,
        y: top as u16,
        width: (right - left) as u16,
        height: (bottom - top) as u16,
    })
}
