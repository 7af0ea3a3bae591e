//! The geometry sync task.
//!
//! A periodic thread recomputes the panel rectangle from the latest host
//! transform parameters, roughly once per frame, and reports it only when
//! it changes. The task carries an explicit cancel token and join handle:
//! [GeometrySync::cancel] (also run on drop) stops the thread, which is
//! what keeps a detached panel from being referenced forever by a live
//! callback.

use crate::host::transform::{HostFrame, PanelRect, panel_rect};

use crossbeam_channel::{Receiver, Sender, tick, unbounded};

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::Duration;

const TICK_INTERVAL: Duration = Duration::from_millis(16);

/// Handle to the running geometry task.
pub struct GeometrySync {
    cancel: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
    frame_tx: Sender<HostFrame>,
    rect_rx: Receiver<Option<PanelRect>>,
}

impl GeometrySync {
    /// Spawns the ticker thread. The host pushes [HostFrame]s into
    /// `frame_tx`; the panel drains rectangle updates from `rect_rx`.
    pub fn spawn() -> Self {
        let (frame_tx, frame_rx) = unbounded::<HostFrame>();
        let (rect_tx, rect_rx) = unbounded::<Option<PanelRect>>();
        let cancel = Arc::new(AtomicBool::new(false));

        let cancel_flag = Arc::clone(&cancel);
        let handle = thread::spawn(move || {
            let ticker = tick(TICK_INTERVAL);
            let mut latest: Option<HostFrame> = None;
            let mut last_sent: Option<Option<PanelRect>> = None;

            while !cancel_flag.load(Ordering::Relaxed) {
                if ticker.recv().is_err() {
                    break;
                }

                // Only the newest frame matters.
                while let Ok(frame) = frame_rx.try_recv() {
                    latest = Some(frame);
                }
                let Some(frame) = &latest else { continue };

                let rect = panel_rect(frame);
                if last_sent != Some(rect) {
                    last_sent = Some(rect);
                    if rect_tx.send(rect).is_err() {
                        break;
                    }
                }
            }
        });

        Self {
            cancel,
            handle: Some(handle),
            frame_tx,
            rect_rx,
        }
    }

    /// Sender the host environment uses to report transform parameters.
    pub fn frame_tx(&self) -> &Sender<HostFrame> {
        &self.frame_tx
    }

    /// Receiver of rectangle updates; yields only changes.
    pub fn rect_rx(&self) -> &Receiver<Option<PanelRect>> {
        &self.rect_rx
    }

    /// Stops the task and waits for the thread to exit.
    pub fn cancel(&mut self) {
        self.cancel.store(true, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for GeometrySync {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::transform::{CanvasTransform, HostNode};

    fn visible_frame() -> HostFrame {
        HostFrame {
            node: HostNode {
                pos: (0.0, 0.0),
                size: (40.0, 12.0),
                collapsed: false,
            },
            canvas: Some(CanvasTransform {
                scale: 1.0,
                offset: (0.0, 0.0),
            }),
            viewport: (80, 24),
        }
    }

    #[test]
    fn reports_rect_changes_only() -> Result<(), Box<dyn std::error::Error>> {
        let sync = GeometrySync::spawn();

        sync.frame_tx().send(visible_frame())?;
        let first = sync.rect_rx().recv_timeout(Duration::from_secs(2))?;
        assert!(first.is_some());

        // The same frame again must not produce another update; a collapsed
        // node must.
        sync.frame_tx().send(visible_frame())?;
        let mut collapsed = visible_frame();
        collapsed.node.collapsed = true;
        sync.frame_tx().send(collapsed)?;

        let second = sync.rect_rx().recv_timeout(Duration::from_secs(2))?;
        assert_eq!(second, None, "collapse hides the panel");
        Ok(())
    }

    #[test]
    fn cancel_stops_the_task() -> Result<(), Box<dyn std::error::Error>> {
        let mut sync = GeometrySync::spawn();
        sync.frame_tx().send(visible_frame())?;
        let _ = sync.rect_rx().recv_timeout(Duration::from_secs(2))?;

        sync.cancel();

        // The thread has exited and dropped its sender; the update channel
        // must drain to disconnected instead of producing new rects.
        while sync.rect_rx().try_recv().is_ok() {}
        assert!(sync.rect_rx().recv_timeout(Duration::from_millis(100)).is_err());
        Ok(())
    }
}
