//! Error types for game setup.
//!
//! Setup is the only fatal path in the core: once a [`GameState`] exists,
//! ticks never fail. Anomalies inside a tick are recovered locally and
//! logged instead.
//!
//! [`GameState`]: crate::game_state::GameState

use std::fmt;

use crate::types::{SnakeId, MAX_SNAKES};

/// Errors that abort game construction before the first tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SetupError {
    /// Board width or height is zero.
    InvalidDimensions {
        width: u16,
        height: u16,
    },
    /// The level has no snake start positions at all.
    NoStartPositions {
        /// Name of the offending level.
        level: String,
    },
    /// More snakes than the simulation supports.
    TooManySnakes {
        count: usize,
    },
    /// Two snakes share an id.
    DuplicateSnake {
        id: SnakeId,
    },
}

impl fmt::Display for SetupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDimensions { width, height } => {
                write!(f, "invalid board dimensions {width}x{height}")
            }
            Self::NoStartPositions { level } => {
                write!(f, "level '{level}' has no snake start positions")
            }
            Self::TooManySnakes { count } => {
                write!(f, "{count} snakes exceed the maximum of {MAX_SNAKES}")
            }
            Self::DuplicateSnake { id } => write!(f, "snake id {id} is used twice"),
        }
    }
}

impl std::error::Error for SetupError {}
