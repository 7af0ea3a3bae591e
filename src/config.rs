//! Configuration for skiff.
//!
//! Settings load from `skiff.toml` (see [load]) and split into:
//! - [service]: where the remote file service lives.
//! - [general]: behavior toggles and the download target directory.
//! - [theme]: panel colors.

pub mod general;
pub mod load;
pub mod service;
pub mod theme;

pub use general::General;
pub use load::Config;
pub use service::{DEFAULT_SERVICE_URL, Service};
pub use theme::Theme;
