//! Core runtime logic for skiff.
//!
//! This module contains the non-UI engine pieces used by the application:
//! - [api]: the wire contract of the remote file service and its error
//!   taxonomy.
//! - [client]: the stateless blocking HTTP facade.
//! - [worker]: background threads and message passing back into the app
//!   state.
//! - [terminal]: terminal setup/teardown, the demo host and the main
//!   event loop.

pub mod api;
pub mod client;
pub mod terminal;
pub mod worker;

pub use api::{ApiError, Listing, RemoteEntry, UploadBlob};
pub use client::BackendClient;
pub use worker::{ActionOutcome, ApiResponse, ApiTask, Workers};
