//! Terminal input module (engine-facing).
//!
//! This module is intentionally independent of the simulation. It maps
//! `crossterm` events into logical [`Key`](crate::types::Key)s, tracks which
//! keys are held and which were pressed since the last tick, and holds the
//! per-snake key binding tables. Works in terminals without key-release
//! events.

pub mod bindings;
pub mod keys;
pub mod map;

pub use tui_snakes_types as types;

pub use bindings::{BindingTable, KeyBindings};
pub use keys::{InputSource, KeyPress, KeyState, MAX_TRACKED_KEYS};
pub use map::{control_action, map_key_code, route_event, should_quit, ControlAction};
