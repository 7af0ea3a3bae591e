//! Worker threads for skiff's backend traffic.
//!
//! All network I/O happens here, on two dedicated threads fed over
//! channels: one for directory listings, one for mutating actions and
//! downloads. Results go back to the UI thread the same way.
//!
//! Requests [ApiTask] come in from the app state, and results [ApiResponse]
//! go back tagged so stale listings can be discarded against the navigation
//! generation counter.

use crate::core::api::{ApiError, BatchDeleteResponse, Listing, UploadBlob};
use crate::core::client::BackendClient;
use crate::utils::{get_unused_path, join_remote_path};

use crossbeam_channel::{Receiver, Sender, unbounded};
use tracing::warn;

use std::path::PathBuf;
use std::sync::Arc;
use std::thread;

/// Manages the worker threads and their channels.
///
/// Listings get their own thread so a slow upload or download never delays
/// navigation. Queued listing tasks are coalesced to the newest one; the
/// request id makes dropping the rest safe.
pub struct Workers {
    list_tx: Sender<ApiTask>,
    action_tx: Sender<ApiTask>,
    response_rx: Receiver<ApiResponse>,
}

impl Workers {
    /// Spawns the listing and action threads around a shared client.
    pub fn spawn(client: BackendClient) -> Self {
        let client = Arc::new(client);
        let (list_tx, list_rx) = unbounded::<ApiTask>();
        let (action_tx, action_rx) = unbounded::<ApiTask>();
        let (res_tx, response_rx) = unbounded::<ApiResponse>();

        start_list_worker(list_rx, res_tx.clone(), Arc::clone(&client));
        start_action_worker(action_rx, res_tx, client);

        Self {
            list_tx,
            action_tx,
            response_rx,
        }
    }

    /// Accessor for the listing task sender.
    pub fn list_tx(&self) -> &Sender<ApiTask> {
        &self.list_tx
    }

    /// Accessor for the action task sender.
    pub fn action_tx(&self) -> &Sender<ApiTask> {
        &self.action_tx
    }

    /// Accessor for the worker response receiver.
    pub fn response_rx(&self) -> &Receiver<ApiResponse> {
        &self.response_rx
    }
}

/// Tasks sent to the worker threads.
#[derive(Debug)]
pub enum ApiTask {
    List {
        path: String,
        request_id: u64,
    },
    CreateFolder {
        path: String,
        name: String,
    },
    CreateFile {
        path: String,
        name: String,
        content: String,
    },
    Rename {
        path: String,
        old_name: String,
        new_name: String,
    },
    Delete {
        path: String,
        name: String,
    },
    DeleteBatch {
        path: String,
        names: Vec<String>,
    },
    Upload {
        path: String,
        blobs: Vec<UploadBlob>,
    },
    Download {
        path: String,
        name: String,
        dest_dir: PathBuf,
    },
}

/// Responses sent from the worker threads back to the UI thread.
#[derive(Debug)]
pub enum ApiResponse {
    /// A listing result, stamped with the generation it was issued under.
    Listing {
        request_id: u64,
        result: Result<Listing, ApiError>,
    },
    /// The interpreted result of one dispatched action.
    ActionDone { outcome: ActionOutcome },
}

/// Interpreted result of one action; drives banners and the follow-up
/// reload.
#[derive(Debug)]
pub enum ActionOutcome {
    /// create_folder / create_file / rename.
    Mutated { error: Option<ApiError> },
    /// Single-item delete.
    Deleted {
        name: String,
        error: Option<ApiError>,
    },
    /// Batch delete; both sub-lists are reported, neither is fatal to the
    /// other.
    BatchDeleted {
        deleted: Vec<String>,
        errors: Vec<String>,
    },
    Uploaded {
        result: Result<Vec<String>, ApiError>,
    },
    Downloaded {
        name: String,
        result: Result<PathBuf, ApiError>,
    },
}

impl ActionOutcome {
    /// Whether the view must reconcile against server truth afterwards.
    /// Everything that can have mutated the directory reloads, success or
    /// not; downloads leave the server untouched.
    pub fn needs_reload(&self) -> bool {
        !matches!(self, ActionOutcome::Downloaded { .. })
    }
}

fn start_list_worker(
    task_rx: Receiver<ApiTask>,
    res_tx: Sender<ApiResponse>,
    client: Arc<BackendClient>,
) {
    thread::spawn(move || {
        while let Ok(task) = task_rx.recv() {
            let ApiTask::List {
                mut path,
                mut request_id,
            } = task
            else {
                continue;
            };

            // Coalesce queued listing tasks to only serve the latest; the
            // skipped generations would be discarded on arrival anyway.
            while let Ok(next) = task_rx.try_recv() {
                if let ApiTask::List {
                    path: p,
                    request_id: id,
                } = next
                {
                    path = p;
                    request_id = id;
                }
            }

            let result = client.list(&path);
            if let Err(err) = &result {
                warn!(path, %err, "listing failed");
            }
            let _ = res_tx.send(ApiResponse::Listing { request_id, result });
        }
    });
}

fn start_action_worker(
    task_rx: Receiver<ApiTask>,
    res_tx: Sender<ApiResponse>,
    client: Arc<BackendClient>,
) {
    thread::spawn(move || {
        while let Ok(task) = task_rx.recv() {
            let outcome = match task {
                ApiTask::List { .. } => continue,
                ApiTask::CreateFolder { path, name } => ActionOutcome::Mutated {
                    error: client.create_folder(&path, &name).err(),
                },
                ApiTask::CreateFile {
                    path,
                    name,
                    content,
                } => ActionOutcome::Mutated {
                    error: client.create_file(&path, &name, &content).err(),
                },
                ApiTask::Rename {
                    path,
                    old_name,
                    new_name,
                } => ActionOutcome::Mutated {
                    error: client.rename(&path, &old_name, &new_name).err(),
                },
                ApiTask::Delete { path, name } => {
                    let error = client.delete(&path, &name).err();
                    ActionOutcome::Deleted { name, error }
                }
                ApiTask::DeleteBatch { path, names } => match client.delete_batch(&path, &names) {
                    Ok(BatchDeleteResponse { deleted, errors }) => {
                        ActionOutcome::BatchDeleted { deleted, errors }
                    }
                    Err(err) => ActionOutcome::BatchDeleted {
                        deleted: Vec::new(),
                        errors: vec![err.to_string()],
                    },
                },
                ApiTask::Upload { path, blobs } => ActionOutcome::Uploaded {
                    result: client.upload(&path, blobs),
                },
                ApiTask::Download {
                    path,
                    name,
                    dest_dir,
                } => {
                    let dest = get_unused_path(&dest_dir.join(&name));
                    let remote = join_remote_path(&path, &name);
                    let result = client.download(&remote, &dest).map(|_| dest);
                    ActionOutcome::Downloaded { name, result }
                }
            };

            if let ActionOutcome::Mutated { error: Some(err) } = &outcome {
                warn!(%err, "action failed");
            }
            let _ = res_tx.send(ApiResponse::ActionDone { outcome });
        }
    });
}
