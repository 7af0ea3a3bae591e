//! UI layer for skiff.
//!
//! - [render]: the per-frame panel renderer.
//! - [rows]: the load-generation row cache and summary banners.
//! - [icons]: extension-category icon tables.
//! - [overlays]: transient banner stack.
//! - [styles]: the install-once style sheet.

pub mod icons;
pub mod overlays;
pub mod render;
pub mod rows;
pub mod styles;

pub use render::render;
