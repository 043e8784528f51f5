//! Entity model - snakes, apples and blocks
//!
//! Plain data plus the minimal mutators the movement resolver and gravity
//! settler need. Collision rules live in [`crate::occupancy`], not here.

use std::collections::VecDeque;

use crate::types::{Direction, Point, SnakeId, SnakePalette, INITIAL_TARGET_LENGTH};

/// A static, immovable occupied cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Block {
    pub pos: Point,
}

/// A single apple. Removed when a snake's head rests on it after a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Apple {
    pub pos: Point,
}

/// A snake: ordered body segments (head first), facing and target length.
///
/// The body is never empty. It may be shorter than `target_len` while the
/// snake grows toward it, and never longer once a move has completed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snake {
    id: SnakeId,
    body: VecDeque<Point>,
    direction: Direction,
    target_len: usize,
}

impl Snake {
    /// Spawn a one-segment snake facing up.
    pub fn new(id: SnakeId, start: Point) -> Self {
        let mut body = VecDeque::with_capacity(INITIAL_TARGET_LENGTH + 1);
        body.push_back(start);
        Self {
            id,
            body,
            direction: Direction::Up,
            target_len: INITIAL_TARGET_LENGTH,
        }
    }

    /// Build a snake from explicit segments (head first).
    ///
    /// Returns `None` if `segments` is empty or `target_len` is zero.
    pub fn from_segments(
        id: SnakeId,
        segments: impl IntoIterator<Item = Point>,
        direction: Direction,
        target_len: usize,
    ) -> Option<Self> {
        let body: VecDeque<Point> = segments.into_iter().collect();
        if body.is_empty() || target_len == 0 {
            return None;
        }
        Some(Self {
            id,
            body,
            direction,
            target_len,
        })
    }

    pub fn id(&self) -> SnakeId {
        self.id
    }

    pub fn head(&self) -> Point {
        self.body[0]
    }

    pub fn tail(&self) -> Point {
        self.body[self.body.len() - 1]
    }

    /// Body segments, head first.
    pub fn body(&self) -> &VecDeque<Point> {
        &self.body
    }

    pub fn segment_count(&self) -> usize {
        self.body.len()
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn target_len(&self) -> usize {
        self.target_len
    }

    pub fn palette(&self) -> SnakePalette {
        SnakePalette::for_snake(self.id)
    }

    /// True if any segment occupies `p`.
    pub fn occupies(&self, p: Point) -> bool {
        self.body.contains(&p)
    }

    /// True if the tail cell is vacated by the next accepted move.
    ///
    /// A snake below its target length keeps its tail while it grows.
    pub fn tail_vacates_on_move(&self) -> bool {
        self.body.len() >= self.target_len
    }

    /// Prepend a new head and drop the tail if the body exceeds its target
    /// length. Returns true if the body grew.
    pub(crate) fn advance(&mut self, new_head: Point, direction: Direction) -> bool {
        self.body.push_front(new_head);
        self.direction = direction;
        if self.body.len() > self.target_len {
            self.body.pop_back();
            false
        } else {
            true
        }
    }

    /// Move every segment `dy` rows down as one rigid body.
    pub(crate) fn shift_down(&mut self, dy: i32) {
        if dy == 0 {
            return;
        }
        for segment in self.body.iter_mut() {
            segment.y += dy;
        }
    }

    /// Record an eaten apple. The body catches up over the next moves.
    pub(crate) fn grow(&mut self) {
        self.target_len += 1;
    }
}
