//! Terminal setup and the main event loop for skiff.
//!
//! Also hosts the demo embedding: in a plain terminal run there is no
//! node-graph canvas, so a small host stand-in owns the node and canvas
//! transform, feeds frames to the geometry task, and turns bracketed
//! pastes of local paths into drop events. A real host environment would
//! drive the same [crate::host::HostHandle] surface instead.

use crate::app::{AppState, KeypressResult};
use crate::core::api::UploadBlob;
use crate::host::{CanvasTransform, HostEvent, HostFrame, HostHandle, HostNode};
use crate::ui;

use crossterm::{
    cursor::{Hide, Show},
    event::{
        self, DisableBracketedPaste, EnableBracketedPaste, Event, KeyCode, KeyEvent, KeyEventKind,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing::{debug, warn};

use std::io::{self, Stdout};
use std::time::Duration;

const MIN_ZOOM: f32 = 0.4;
const MAX_ZOOM: f32 = 2.0;

/// The terminal-run stand-in for the host environment.
struct DemoHost {
    handle: HostHandle,
    node: HostNode,
    canvas: CanvasTransform,
}

impl DemoHost {
    fn new(handle: HostHandle) -> Self {
        Self {
            handle,
            node: HostNode {
                pos: (2.0, 1.0),
                size: (0.0, 0.0),
                collapsed: false,
            },
            canvas: CanvasTransform {
                scale: 1.0,
                offset: (0.0, 0.0),
            },
        }
    }

    /// Pushes the current transform parameters, sized so the node fills
    /// the terminal at scale 1, and drains the panel's published path.
    fn sync(&mut self, viewport: (u16, u16)) {
        self.node.size = (
            f32::from(viewport.0.saturating_sub(4)),
            f32::from(viewport.1.saturating_sub(2)),
        );
        let _ = self.handle.frame_tx().send(HostFrame {
            node: self.node,
            canvas: Some(self.canvas),
            viewport,
        });

        while let Ok(path) = self.handle.path_rx().try_recv() {
            debug!(path, "panel path published to host");
        }
    }

    /// Host-level keys: zoom and node collapse.
    fn handle_key(&mut self, key: &KeyEvent) -> bool {
        match key.code {
            KeyCode::Char('+') => {
                self.canvas.scale = (self.canvas.scale * 1.1).min(MAX_ZOOM);
                true
            }
            KeyCode::Char('-') => {
                self.canvas.scale = (self.canvas.scale / 1.1).max(MIN_ZOOM);
                true
            }
            KeyCode::F(2) => {
                self.node.collapsed = !self.node.collapsed;
                true
            }
            _ => false,
        }
    }

    /// Treats a bracketed paste of newline-separated local paths as files
    /// dropped onto the panel.
    fn paste(&mut self, text: &str) {
        let mut blobs = Vec::new();
        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            match std::fs::read(line) {
                Ok(bytes) => {
                    let name = std::path::Path::new(line)
                        .file_name()
                        .map(|n| n.to_string_lossy().to_string())
                        .unwrap_or_else(|| line.to_string());
                    blobs.push(UploadBlob { name, bytes });
                }
                Err(err) => warn!(path = line, %err, "dropped path not readable"),
            }
        }

        let _ = self.handle.event_tx().send(HostEvent::DragEnter);
        let _ = self.handle.event_tx().send(HostEvent::Drop(blobs));
    }
}

/// Initializes the terminal in raw mode and the alternate screen, attaches
/// the panel to the demo host and runs the main event loop.
///
/// Blocks until quit; detaches the panel (cancelling the geometry task)
/// before restoring the terminal.
pub fn run_terminal(app: &mut AppState) -> io::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste, Hide)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let handle = app.attach();
    let mut host = DemoHost::new(handle);
    let result = event_loop(&mut terminal, app, &mut host);
    app.detach();

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableBracketedPaste,
        Show
    )?;
    result
}

/// Main event loop: feeds the host, ticks the app, draws on change and
/// dispatches input. Returns on quit.
fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut AppState,
    host: &mut DemoHost,
) -> io::Result<()> {
    let mut redraw = true;
    loop {
        let size = terminal.size()?;
        host.sync((size.width, size.height));

        if app.tick() {
            redraw = true;
        }
        if redraw {
            terminal.draw(|f| ui::render(f, app))?;
            redraw = false;
        }

        if event::poll(Duration::from_millis(16))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if host.handle_key(&key) {
                        redraw = true;
                        continue;
                    }
                    match app.handle_keypress(key) {
                        KeypressResult::Quit => break,
                        KeypressResult::Consumed => redraw = true,
                        KeypressResult::Continue => {}
                    }
                }
                Event::Paste(text) => {
                    host.paste(&text);
                    redraw = true;
                }
                Event::Resize(_, _) => redraw = true,
                _ => {}
            }
        }
    }
    Ok(())
}
