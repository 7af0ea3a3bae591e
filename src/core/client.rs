//! Stateless HTTP facade over the remote file service.
//!
//! One network call per method, no retries, no caching. The only listing
//! state in skiff lives in the navigation layer; this client holds nothing
//! but a base URL and a configured [reqwest] blocking client.
//!
//! All methods run on worker threads (see [crate::core::worker]) so the
//! interactive surface never blocks on I/O.

use crate::core::api::{
    ApiError, BatchDeleteResponse, ListResponse, Listing, OpResponse, UploadBlob, UploadResponse,
    wire_path,
};

use reqwest::blocking::{Client, multipart};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use std::fs::File;
use std::io;
use std::path::Path;
use std::time::Duration;

#[derive(Serialize)]
struct NamedOp<'a> {
    path: &'a str,
    name: &'a str,
}

#[derive(Serialize)]
struct CreateFileBody<'a> {
    path: &'a str,
    name: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct RenameBody<'a> {
    path: &'a str,
    old_name: &'a str,
    new_name: &'a str,
}

#[derive(Serialize)]
struct BatchBody<'a> {
    path: &'a str,
    names: &'a [String],
}

/// Blocking request/response wrapper for the file service endpoints.
pub struct BackendClient {
    base: String,
    http: Client,
}

impl BackendClient {
    /// Builds a client for the service at `base` (e.g. `http://127.0.0.1:8188`).
    pub fn new(base: &str, timeout: Duration) -> Result<Self, ApiError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(transport)?;
        Ok(Self {
            base: base.trim_end_matches('/').to_string(),
            http,
        })
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base, endpoint)
    }

    fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &[(&str, &str)],
    ) -> Result<T, ApiError> {
        self.http
            .get(self.url(endpoint))
            .query(query)
            .send()
            .map_err(transport)?
            .json::<T>()
            .map_err(transport)
    }

    fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        self.http
            .post(self.url(endpoint))
            .json(body)
            .send()
            .map_err(transport)?
            .json::<T>()
            .map_err(transport)
    }

    /// Lists one directory level. `path` is the client-side path ("" = root).
    pub fn list(&self, path: &str) -> Result<Listing, ApiError> {
        debug!(path, "list");
        let resp: ListResponse =
            self.get_json("/file_browser/list", &[("path", wire_path(path))])?;
        if let Some(err) = resp.error {
            return Err(ApiError::Backend(err));
        }
        Ok(Listing {
            current_path: resp.current_path,
            entries: resp.entries,
            is_root: resp.is_root,
        })
    }

    pub fn create_folder(&self, path: &str, name: &str) -> Result<(), ApiError> {
        debug!(path, name, "create_folder");
        let body = NamedOp {
            path: wire_path(path),
            name,
        };
        check(self.post_json("/file_browser/create_folder", &body)?)
    }

    pub fn create_file(&self, path: &str, name: &str, content: &str) -> Result<(), ApiError> {
        debug!(path, name, "create_file");
        let body = CreateFileBody {
            path: wire_path(path),
            name,
            content,
        };
        check(self.post_json("/file_browser/create_file", &body)?)
    }

    pub fn rename(&self, path: &str, old_name: &str, new_name: &str) -> Result<(), ApiError> {
        debug!(path, old_name, new_name, "rename");
        let body = RenameBody {
            path: wire_path(path),
            old_name,
            new_name,
        };
        check(self.post_json("/file_browser/rename", &body)?)
    }

    pub fn delete(&self, path: &str, name: &str) -> Result<(), ApiError> {
        debug!(path, name, "delete");
        let body = NamedOp {
            path: wire_path(path),
            name,
        };
        check(self.post_json("/file_browser/delete", &body)?)
    }

    /// Batch delete never fails as a unit: the response carries independent
    /// `deleted` and `errors` lists and both are returned to the caller.
    pub fn delete_batch(
        &self,
        path: &str,
        names: &[String],
    ) -> Result<BatchDeleteResponse, ApiError> {
        debug!(path, count = names.len(), "delete_batch");
        let body = BatchBody {
            path: wire_path(path),
            names,
        };
        self.post_json("/file_browser/delete_batch", &body)
    }

    /// Multipart upload of one or more files into `path`.
    pub fn upload(&self, path: &str, blobs: Vec<UploadBlob>) -> Result<Vec<String>, ApiError> {
        debug!(path, count = blobs.len(), "upload");
        let mut form = multipart::Form::new().text("path", wire_path(path).to_string());
        for blob in blobs {
            form = form.part("files", multipart::Part::bytes(blob.bytes).file_name(blob.name));
        }
        let resp: UploadResponse = self
            .http
            .post(self.url("/file_browser/upload"))
            .multipart(form)
            .send()
            .map_err(transport)?
            .json()
            .map_err(transport)?;
        if let Some(err) = resp.error {
            return Err(ApiError::Backend(err));
        }
        Ok(resp.uploaded)
    }

    /// Streams one file to `dest`. `file_path` is the full remote path
    /// (`dir/name`). Returns the number of bytes written.
    pub fn download(&self, file_path: &str, dest: &Path) -> Result<u64, ApiError> {
        debug!(file_path, dest = %dest.display(), "download");
        let mut resp = self
            .http
            .get(self.url("/file_browser/download"))
            .query(&[("path", file_path)])
            .send()
            .map_err(transport)?;
        if !resp.status().is_success() {
            warn!(file_path, status = %resp.status(), "download rejected");
            return Err(ApiError::Backend(format!(
                "download failed: {}",
                resp.status()
            )));
        }
        let mut out = File::create(dest).map_err(io_transport)?;
        io::copy(&mut resp, &mut out).map_err(io_transport)
    }
}

fn check(resp: OpResponse) -> Result<(), ApiError> {
    match resp.error {
        Some(err) => Err(ApiError::Backend(err)),
        None => Ok(()),
    }
}

fn transport(err: reqwest::Error) -> ApiError {
    ApiError::Transport(err.to_string())
}

fn io_transport(err: io::Error) -> ApiError {
    ApiError::Transport(err.to_string())
}
