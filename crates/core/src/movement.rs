//! Movement resolver - applies one directional intent to one snake
//!
//! Rules, in order:
//! 1. A direct reversal of the current facing is rejected
//! 2. The candidate head is the current head plus the direction vector
//! 3. Columns wrap around the left/right edges
//! 4. Rows do not wrap: leaving the top or bottom is rejected
//! 5. The candidate must not be blocked for the snake's own movement
//!
//! Rejected moves leave the snake untouched. Accepted moves prepend the new
//! head, update the facing and drop the tail unless the snake is growing.

use crate::board::Board;
use crate::entity::Snake;
use crate::occupancy::Occupancy;
use crate::types::{Direction, SnakeId};

/// One snake's requested move for a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Intent {
    pub snake: SnakeId,
    pub direction: Direction,
}

impl Intent {
    pub fn new(snake: SnakeId, direction: Direction) -> Self {
        Self { snake, direction }
    }
}

/// Why a move was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveRejection {
    /// Direct 180° turn against the current facing.
    Reversal,
    /// Would leave the board through the top or bottom edge.
    OffBoard,
    /// Block, another snake, or the snake's own body.
    Blocked,
}

/// Result of resolving one intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveOutcome {
    /// Head advanced and the tail followed.
    Moved,
    /// Head advanced and the tail stayed (the snake is growing).
    Grew,
    Rejected(MoveRejection),
}

impl MoveOutcome {
    pub fn accepted(&self) -> bool {
        !matches!(self, MoveOutcome::Rejected(_))
    }
}

/// Resolve `direction` for `snakes[index]` against the board and every other
/// snake. Only the acting snake is mutated.
///
/// # Panics
///
/// Panics if `index` is out of range for `snakes`.
pub fn resolve_move(
    board: &Board,
    snakes: &mut [Snake],
    index: usize,
    direction: Direction,
) -> MoveOutcome {
    let candidate = {
        let snake = &snakes[index];
        if direction.is_opposite(snake.direction()) {
            return MoveOutcome::Rejected(MoveRejection::Reversal);
        }

        let mut candidate = snake.head().step(direction);
        candidate.x = board.wrap_x(candidate.x);
        if candidate.y < 0 || candidate.y >= board.height() {
            return MoveOutcome::Rejected(MoveRejection::OffBoard);
        }

        let occupancy = Occupancy::new(board, snakes);
        if occupancy.is_blocked_for_own_movement(candidate, snake.id()) {
            return MoveOutcome::Rejected(MoveRejection::Blocked);
        }
        candidate
    };

    if snakes[index].advance(candidate, direction) {
        MoveOutcome::Grew
    } else {
        MoveOutcome::Moved
    }
}
