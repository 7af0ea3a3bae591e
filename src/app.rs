//! Application layer for skiff.
//!
//! - [state]: the central [AppState] controller and tick loop.
//! - [nav]: navigation state and the display-row view.
//! - [select]: the multi-selection engine.
//! - [dispatch]: action preconditions, prompts and task dispatch.
//! - [drag]: the drop-target depth counter.
//! - [handlers]/[keymap]: key routing.

pub mod dispatch;
pub mod drag;
pub mod handlers;
pub mod keymap;
pub mod nav;
pub mod select;
pub mod state;

pub use dispatch::{ActionContext, ActionMode, InputMode, Precondition};
pub use drag::DragState;
pub use nav::{DisplayRows, NavState};
pub use select::{SelectEvent, Selection};
pub use state::{AppState, KeypressResult};
