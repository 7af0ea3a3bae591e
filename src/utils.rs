//! Miscellaneous utility functions for skiff.
//!
//! This module holds the [helpers] submodule, which provides commonly used
//! utilities such as:
//! - Remote path arithmetic (join, parent)
//! - Byte-size and exact-width formatting
//! - Color parsing
//! - Computing an unused path for download targets
//!
//! All of these utilities are used throughout skiff for convenience and
//! code clarity.

pub mod cli;
pub mod helpers;

pub use helpers::{
    format_entry_size, get_unused_path, join_remote_path, parent_remote_path, parse_color,
    sanitize_to_exact_width,
};
