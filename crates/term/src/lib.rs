//! Terminal presentation module.
//!
//! A small, game-oriented rendering layer for terminal play. It avoids
//! widget/layout libraries and instead renders a
//! [`GameSnapshot`](crate::core::GameSnapshot) into a plain framebuffer that
//! is diffed and flushed to the terminal.
//!
//! Goals:
//! - Keep `core` free of any drawing concern
//! - Allow precise control over aspect ratio (2 columns per board cell)
//! - Only rewrite cells that changed since the last frame

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use tui_snakes_core as core;
pub use tui_snakes_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{AnchorY, GameView, Viewport};
pub use renderer::{changed_runs_into, encode_full_into, encode_runs_into, TerminalRenderer};
