//! TUI Snakes (workspace facade crate).
//!
//! Re-exports the workspace crates as `tui_snakes::{core,engine,input,term,types}`
//! so integration tests and the binary share one import path.

pub use tui_snakes_core as core;
pub use tui_snakes_engine as engine;
pub use tui_snakes_input as input;
pub use tui_snakes_term as term;
pub use tui_snakes_types as types;
