//! Application state and main controller module for skiff.
//!
//! [AppState] ties the engine together:
//! - Navigation, selection and action dispatch state.
//! - Worker channels for all backend traffic.
//! - The host link carrying geometry updates and drag events.
//! - Banner and row-cache presentation state.
//!
//! The event loop calls [AppState::tick] to drain worker and host
//! channels and [AppState::handle_keypress] (in handlers.rs) for input.

use crate::app::dispatch::{ActionContext, dispatch_delete, dispatch_upload};
use crate::app::drag::DragState;
use crate::app::nav::NavState;
use crate::app::select::{SelectEvent, Selection};
use crate::config::Config;
use crate::core::client::BackendClient;
use crate::core::worker::{ActionOutcome, ApiResponse, ApiTask, Workers};
use crate::host::{HostEvent, HostHandle, HostLink, PanelRect};
use crate::ui::overlays::{Overlay, OverlayStack};
use crate::ui::rows::{RowCache, RowLine};
use crate::ui::styles;

use crate::core::api::UploadBlob;

use std::fs;
use std::io;
use std::path::Path;
use std::time::{Duration, Instant};

/// How long a banner stays up before auto-dismissing.
const BANNER_TTL: Duration = Duration::from_secs(4);

/// Result of one processed keypress.
pub enum KeypressResult {
    Continue,
    Consumed,
    Quit,
}

/// Central state of one panel instance.
pub struct AppState {
    config: Config,
    nav: NavState,
    selection: Selection,
    actions: ActionContext,
    drag: DragState,
    cursor: usize,
    workers: Workers,
    host: Option<HostLink>,
    panel_rect: Option<PanelRect>,
    rows: RowCache,
    pending_actions: usize,
    notification_time: Option<Instant>,
    overlays: OverlayStack,
}

impl AppState {
    /// Builds the panel, spawns its workers and starts loading the root.
    pub fn new(config: Config) -> io::Result<Self> {
        styles::install(config.theme());

        let client = BackendClient::new(config.service().url(), config.service().timeout())
            .map_err(io::Error::other)?;
        let workers = Workers::spawn(client);

        let mut app = Self {
            config,
            nav: NavState::new(),
            selection: Selection::new(),
            actions: ActionContext::default(),
            drag: DragState::new(),
            cursor: 0,
            workers,
            host: None,
            panel_rect: None,
            rows: RowCache::new(),
            pending_actions: 0,
            notification_time: None,
            overlays: OverlayStack::new(),
        };
        app.navigate(String::new());
        Ok(app)
    }

    // Getters / Accessors

    #[inline]
    pub fn config(&self) -> &Config {
        &self.config
    }

    #[inline]
    pub fn nav(&self) -> &NavState {
        &self.nav
    }

    #[inline]
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    #[inline]
    pub fn actions(&self) -> &ActionContext {
        &self.actions
    }

    #[inline]
    pub(crate) fn actions_mut(&mut self) -> &mut ActionContext {
        &mut self.actions
    }

    #[inline]
    pub fn drag(&self) -> &DragState {
        &self.drag
    }

    #[inline]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    #[inline]
    pub fn panel_rect(&self) -> Option<PanelRect> {
        self.panel_rect
    }

    #[inline]
    pub fn workers(&self) -> &Workers {
        &self.workers
    }

    /// Whether a load or mutating action is in flight; the list shows a
    /// placeholder while true, but input keeps flowing.
    pub fn is_busy(&self) -> bool {
        self.nav.loading() || self.pending_actions > 0
    }

    /// The newest banner, if any.
    pub fn banner(&self) -> Option<&Overlay> {
        self.overlays.top()
    }

    /// Rebuilds the row cache if a new listing was accepted since the last
    /// call. A pure selection change never rebuilds rows.
    pub fn sync_rows(&mut self) {
        self.rows.sync(&self.nav);
    }

    #[inline]
    pub fn rows(&self) -> &[RowLine] {
        self.rows.rows()
    }

    // Host embedding

    /// Attaches the panel to its host environment: spins up the geometry
    /// task and returns the handle the host drives. The host is
    /// responsible for calling this at its node-creation point.
    pub fn attach(&mut self) -> HostHandle {
        let (link, handle) = HostLink::establish();
        self.host = Some(link);
        handle
    }

    /// Detaches from the host: cancels the geometry task (joining its
    /// thread) and disconnects the host channels. Must be called when the
    /// host node goes away, or the periodic task would keep a torn-down
    /// view alive forever.
    pub fn detach(&mut self) {
        self.host = None;
        self.panel_rect = None;
    }

    // Navigation

    /// Loads `path`. The navigation intent itself resets selection and
    /// anchor, before and regardless of the outcome.
    pub fn navigate(&mut self, path: String) {
        self.selection = Selection::new();
        self.cursor = 0;
        let request_id = self.nav.prepare_load();
        let _ = self.workers.list_tx().send(ApiTask::List { path, request_id });
    }

    /// Reloads the current path. Keeps the cursor (clamped on arrival) but
    /// clears the selection like any other navigation.
    pub fn refresh(&mut self) {
        self.selection = Selection::new();
        let request_id = self.nav.prepare_load();
        let _ = self.workers.list_tx().send(ApiTask::List {
            path: self.nav.current_path().to_string(),
            request_id,
        });
    }

    /// No-op at the root, otherwise loads the parent directory.
    pub fn go_up(&mut self) {
        if let Some(parent) = self.nav.parent_path() {
            self.navigate(parent);
        }
    }

    pub fn go_root(&mut self) {
        self.navigate(String::new());
    }

    // Selection

    pub fn apply_select(&mut self, event: SelectEvent) {
        let next = self.selection.apply(&self.nav.display_rows(), event);
        self.selection = next;
    }

    // Cursor

    pub fn move_cursor_up(&mut self) {
        let len = self.nav.display_rows().len();
        if len == 0 {
            return;
        }
        self.cursor = if self.cursor == 0 {
            len - 1
        } else {
            self.cursor - 1
        };
    }

    pub fn move_cursor_down(&mut self) {
        let len = self.nav.display_rows().len();
        if len == 0 {
            return;
        }
        self.cursor = (self.cursor + 1) % len;
    }

    fn clamp_cursor(&mut self) {
        self.cursor = self
            .cursor
            .min(self.nav.display_rows().len().saturating_sub(1));
    }

    // Tick

    /// Drains banner expiry, host channels and worker responses. Returns
    /// whether anything changed and a redraw is due.
    pub fn tick(&mut self) -> bool {
        let mut changed = false;

        if let Some(expiry) = self.notification_time
            && Instant::now() >= expiry
        {
            self.notification_time = None;
            self.overlays.retain(|o| !matches!(o, Overlay::Message { .. }));
            changed = true;
        }

        while let Some(event) = self
            .host
            .as_ref()
            .and_then(|h| h.event_rx().try_recv().ok())
        {
            self.on_host_event(event);
            changed = true;
        }

        while let Some(rect) = self.host.as_ref().and_then(|h| h.rect_rx().try_recv().ok()) {
            self.panel_rect = rect;
            changed = true;
        }

        while let Ok(response) = self.workers.response_rx().try_recv() {
            changed = true;
            match response {
                ApiResponse::Listing { request_id, result } => {
                    let succeeded = result.is_ok();
                    let err_text = result.as_ref().err().map(|e| e.to_string());
                    if self.nav.apply_listing(request_id, result) {
                        if succeeded {
                            self.clamp_cursor();
                            if let Some(host) = &self.host {
                                host.publish_path(self.nav.current_path());
                            }
                        } else if let Some(text) = err_text {
                            self.push_error(text);
                        }
                    }
                }
                ApiResponse::ActionDone { outcome } => {
                    if outcome.needs_reload() {
                        self.pending_actions = self.pending_actions.saturating_sub(1);
                    }
                    self.apply_outcome(outcome);
                }
            }
        }

        changed
    }

    fn on_host_event(&mut self, event: HostEvent) {
        match event {
            HostEvent::DragEnter => self.drag.enter(),
            HostEvent::DragLeave => self.drag.leave(),
            HostEvent::Drop(blobs) => {
                self.drag.drop_released();
                self.upload_blobs(blobs);
            }
        }
    }

    fn apply_outcome(&mut self, outcome: ActionOutcome) {
        let reload = outcome.needs_reload();
        match outcome {
            ActionOutcome::Mutated { error: Some(err) } => self.push_error(err.to_string()),
            ActionOutcome::Mutated { error: None } => {}
            ActionOutcome::Deleted {
                error: Some(err), ..
            } => self.push_error(err.to_string()),
            ActionOutcome::Deleted { name, error: None } => {
                self.push_status(format!("Deleted \"{}\"", name));
            }
            ActionOutcome::BatchDeleted { deleted, errors } => {
                if errors.is_empty() {
                    self.push_status(format!("Deleted {} item(s)", deleted.len()));
                } else {
                    self.push_error(format!(
                        "Deleted {}, errors: {}",
                        deleted.len(),
                        errors.join("; ")
                    ));
                }
            }
            ActionOutcome::Uploaded { result: Ok(names) } => {
                self.push_status(format!("Uploaded {} file(s)", names.len()));
            }
            ActionOutcome::Uploaded { result: Err(err) } => self.push_error(err.to_string()),
            ActionOutcome::Downloaded {
                name,
                result: Ok(dest),
            } => {
                self.push_status(format!("Saved \"{}\" to {}", name, dest.display()));
            }
            ActionOutcome::Downloaded {
                name,
                result: Err(err),
            } => self.push_error(format!("{}: {}", name, err)),
        }
        if reload {
            self.refresh();
        }
    }

    // Actions

    /// Marks one mutating action in flight; cleared when its outcome comes
    /// back.
    pub(crate) fn mark_action_pending(&mut self) {
        self.pending_actions += 1;
    }

    /// Confirmed delete: picks the single or batch endpoint and marks the
    /// panel busy.
    pub(crate) fn dispatch_confirmed_delete(&mut self, names: Vec<String>) {
        if dispatch_delete(&self.nav, names, self.workers.action_tx()) {
            self.pending_actions += 1;
        }
    }

    /// Accepts a listing directly, bypassing the workers. Test scaffolding
    /// for exercising state transitions without a live service.
    #[cfg(test)]
    pub(crate) fn test_accept_listing(&mut self, listing: crate::core::api::Listing) {
        let id = self.nav.prepare_load();
        let accepted = self.nav.apply_listing(id, Ok(listing));
        assert!(accepted);
        self.clamp_cursor();
    }

    /// Uploads prepared blobs into the current directory.
    pub fn upload_blobs(&mut self, blobs: Vec<UploadBlob>) {
        let count = blobs.len();
        if dispatch_upload(&self.nav, blobs, self.workers.action_tx()) {
            self.pending_actions += 1;
            self.push_status(format!("Uploading {} file(s)...", count));
        }
    }

    /// Reads local files from the picker prompt (`;`-separated paths) into
    /// upload blobs. Unreadable paths surface as one warning banner.
    pub fn upload_local_paths(&mut self, input: &str) {
        let mut blobs = Vec::new();
        let mut failed = Vec::new();

        for part in input.split(';') {
            let part = part.trim();
            if part.is_empty() {
                continue;
            }
            let path = Path::new(part);
            match fs::read(path) {
                Ok(bytes) => {
                    let name = path
                        .file_name()
                        .map(|n| n.to_string_lossy().to_string())
                        .unwrap_or_else(|| part.to_string());
                    blobs.push(UploadBlob { name, bytes });
                }
                Err(err) => failed.push(format!("{}: {}", part, err)),
            }
        }

        if !failed.is_empty() {
            self.push_error(format!("Could not read {}", failed.join("; ")));
        }
        if !blobs.is_empty() {
            self.upload_blobs(blobs);
        }
    }

    // Banners

    pub fn push_error(&mut self, text: impl Into<String>) {
        self.push_banner(text.into(), true);
    }

    pub fn push_status(&mut self, text: impl Into<String>) {
        self.push_banner(text.into(), false);
    }

    fn push_banner(&mut self, text: String, error: bool) {
        self.overlays.retain(|o| !matches!(o, Overlay::Message { .. }));
        self.overlays.push(Overlay::Message { text, error });
        self.notification_time = Some(Instant::now() + BANNER_TTL);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::api::{Listing, RemoteEntry};
    use crate::host::{CanvasTransform, HostFrame, HostNode};
    use std::thread;

    fn test_app() -> AppState {
        let mut config = Config::default();
        config.service_mut().set_url("http://127.0.0.1:1".to_string());
        AppState::new(config).expect("app should build")
    }

    fn inject_listing(app: &mut AppState, entries: Vec<RemoteEntry>) {
        let id = app.nav.prepare_load();
        let accepted = app.nav.apply_listing(
            id,
            Ok(Listing {
                current_path: "models".to_string(),
                entries,
                is_root: false,
            }),
        );
        assert!(accepted);
    }

    fn tick_until(app: &mut AppState, mut pred: impl FnMut(&AppState) -> bool) -> bool {
        for _ in 0..200 {
            app.tick();
            if pred(app) {
                return true;
            }
            thread::sleep(Duration::from_millis(10));
        }
        false
    }

    #[test]
    fn navigation_intent_clears_selection_and_anchor() {
        let mut app = test_app();
        inject_listing(
            &mut app,
            vec![RemoteEntry::file("a", 1), RemoteEntry::file("b", 2)],
        );

        app.apply_select(SelectEvent::Click {
            idx: 1,
            multi: true,
            range: false,
        });
        assert_eq!(app.selection().len(), 1);
        assert!(app.selection().anchor().is_some());

        // The refresh may well fail against the unreachable service; the
        // intent alone must already have reset the selection.
        app.refresh();
        assert!(app.selection().is_empty());
        assert_eq!(app.selection().anchor(), None);
        assert!(app.nav().loading());
    }

    #[test]
    fn failed_load_surfaces_banner_and_keeps_entries() {
        let mut app = test_app();
        inject_listing(&mut app, vec![RemoteEntry::file("keep.txt", 9)]);

        app.refresh();
        assert!(
            tick_until(&mut app, |a| !a.nav().loading()),
            "listing failure should come back"
        );
        assert!(app.nav().last_error().is_some());
        assert_eq!(app.nav().entries().len(), 1, "stale entries stay visible");
        assert!(matches!(
            app.banner(),
            Some(Overlay::Message { error: true, .. })
        ));
    }

    #[test]
    fn attach_detach_drive_the_panel_rect() {
        let mut app = test_app();
        let handle = app.attach();

        let frame = HostFrame {
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
        };
        handle.frame_tx().send(frame).expect("attached");

        assert!(
            tick_until(&mut app, |a| a.panel_rect().is_some()),
            "geometry task should report a rect"
        );

        app.detach();
        assert_eq!(app.panel_rect(), None);
        assert!(
            handle.event_tx().send(HostEvent::DragLeave).is_err(),
            "detach disconnects the host channels"
        );
    }

    #[test]
    fn batch_delete_partial_failure_reports_both_lists() {
        let mut app = test_app();

        app.apply_outcome(ActionOutcome::BatchDeleted {
            deleted: vec!["a".to_string(), "b".to_string()],
            errors: vec!["c: in use".to_string()],
        });

        match app.banner() {
            Some(Overlay::Message { text, error: true }) => {
                assert!(text.contains("Deleted 2"), "both successes counted: {}", text);
                assert!(text.contains("c: in use"), "failure passed through: {}", text);
            }
            other => panic!("expected an error banner, got {:?}", other.is_some()),
        }
        assert!(
            app.nav().loading(),
            "partial failure still schedules the reconciling refresh"
        );
    }

    #[test]
    fn clean_batch_delete_reports_a_count() {
        let mut app = test_app();

        app.apply_outcome(ActionOutcome::BatchDeleted {
            deleted: vec!["a".to_string(), "b".to_string(), "c".to_string()],
            errors: Vec::new(),
        });

        match app.banner() {
            Some(Overlay::Message { text, error: false }) => {
                assert_eq!(text, "Deleted 3 item(s)");
            }
            other => panic!("expected a status banner, got {:?}", other.is_some()),
        }
    }

    #[test]
    fn host_drop_resets_drag_and_starts_an_upload() {
        let mut app = test_app();
        let handle = app.attach();

        handle.event_tx().send(HostEvent::DragEnter).expect("attached");
        handle.event_tx().send(HostEvent::DragEnter).expect("attached");
        app.tick();
        assert!(app.drag().overlay_active());

        handle
            .event_tx()
            .send(HostEvent::Drop(vec![UploadBlob {
                name: "x.bin".to_string(),
                bytes: vec![1, 2, 3],
            }]))
            .expect("attached");
        app.tick();

        assert!(!app.drag().overlay_active(), "drop resets the depth counter");
        assert!(app.is_busy(), "the upload is in flight");

        // The unreachable service fails the upload; the panel must surface
        // it and still schedule the reconciling refresh.
        assert!(tick_until(&mut app, |a| a.banner().is_some_and(|b| matches!(
            b,
            Overlay::Message { error: true, .. }
        ))));
    }
}
