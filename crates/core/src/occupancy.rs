//! Occupancy oracle - the single collision query shared by movement and gravity
//!
//! "External" occupancy means the cell is blocked by the board boundary, a
//! block, or a snake *other than* the one asking. The asking snake's own body
//! is deliberately ignored; movement layers its self-collision rule on top via
//! [`Occupancy::is_blocked_for_own_movement`].

use crate::board::Board;
use crate::entity::Snake;
use crate::types::{Point, SnakeId};

/// Borrowed view of everything that can occupy a cell.
#[derive(Debug, Clone, Copy)]
pub struct Occupancy<'a> {
    board: &'a Board,
    snakes: &'a [Snake],
}

impl<'a> Occupancy<'a> {
    pub fn new(board: &'a Board, snakes: &'a [Snake]) -> Self {
        Self { board, snakes }
    }

    /// True if `p` is off the board, holds a block, or holds a segment of any
    /// snake other than `exclude`.
    ///
    /// Callers wrap `x` before asking; an out-of-range `x` still reports
    /// occupied.
    pub fn is_externally_occupied(&self, p: Point, exclude: SnakeId) -> bool {
        if !self.board.in_bounds(p) {
            return true;
        }
        if self.board.is_block(p) {
            return true;
        }
        self.snakes
            .iter()
            .any(|snake| snake.id() != exclude && snake.occupies(p))
    }

    /// Movement check for `mover`: external occupancy plus the mover's own
    /// body behind the head.
    ///
    /// The tail cell is allowed when the tail vacates on this move (the snake
    /// is at its target length), so a snake may chase its own tail.
    pub fn is_blocked_for_own_movement(&self, p: Point, mover: SnakeId) -> bool {
        if self.is_externally_occupied(p, mover) {
            return true;
        }
        let Some(snake) = self.snakes.iter().find(|s| s.id() == mover) else {
            return false;
        };
        let body = snake.body();
        let checked = if snake.tail_vacates_on_move() {
            body.len() - 1
        } else {
            body.len()
        };
        body.iter().take(checked).skip(1).any(|&seg| seg == p)
    }

    /// True if the cell directly below `p` supports `own` (floor or external
    /// occupant).
    pub fn has_support_below(&self, p: Point, own: SnakeId) -> bool {
        let below = p.below(1);
        if below.y >= self.board.height() {
            return true;
        }
        self.is_externally_occupied(below, own)
    }
}
