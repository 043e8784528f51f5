//! Core simulation module - pure, deterministic, and testable
//!
//! This crate contains every game rule of the falling-snake puzzle. It has
//! **no dependencies** on terminals, timers or I/O, so one tick is a plain
//! function of the current state and the intents supplied for it.
//!
//! # Module Structure
//!
//! - [`level`]: Text layouts to blocks, apples and start positions, plus the
//!   built-in level catalog
//! - [`board`]: Level dimensions and static blocks, horizontal wrap
//! - [`entity`]: Snakes, apples, blocks
//! - [`occupancy`]: The shared "is this cell taken?" query
//! - [`movement`]: One intent applied to one snake
//! - [`gravity`]: Rigid-body falling for unsupported snakes
//! - [`game_state`]: The per-tick pipeline and win check
//! - [`snapshot`]: Read-only views for presentation
//!
//! # Game Rules
//!
//! - **Wrap**: the left and right edges wrap, the top and bottom do not
//! - **No reversal**: a snake cannot turn straight back into its neck
//! - **Tail-follow**: a head may enter the cell its own tail leaves this move
//! - **Gravity**: a snake with nothing under any segment falls as one piece,
//!   as far as it can, in a single tick
//! - **Apples**: a head on an apple eats it and grows the snake by one
//! - **Victory**: the level is cleared when no apples remain
//!
//! # Example
//!
//! ```
//! use tui_snakes_core::{GameState, Intent, LevelData};
//! use tui_snakes_types::{Direction, SnakeId};
//!
//! let level = LevelData::new("demo", 4, 2, &[".0A.", "####"]);
//! let mut game = GameState::from_level(&level).unwrap();
//!
//! let report = game.step(&[Intent::new(SnakeId::new(0), Direction::Right)]);
//! assert!(report.cleared);
//! ```

pub mod board;
pub mod entity;
pub mod error;
pub mod game_state;
pub mod gravity;
pub mod level;
pub mod movement;
pub mod occupancy;
pub mod snapshot;

pub use tui_snakes_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use entity::{Apple, Block, Snake};
pub use error::SetupError;
pub use game_state::{GameState, StepReport};
pub use gravity::GravityError;
pub use level::{builtin_levels, next_level_index, parse_level, LevelData, LevelWarning, ParsedLevel};
pub use movement::{resolve_move, Intent, MoveOutcome, MoveRejection};
pub use occupancy::Occupancy;
pub use snapshot::{GameSnapshot, SnakeSnapshot};
