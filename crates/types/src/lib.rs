//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are plain data with no external dependencies, so they can be
//! used from the simulation core, the input layer and the terminal renderer
//! alike.
//!
//! # Coordinates
//!
//! Boards are addressed by integer cells `(x, y)`:
//!
//! - `x` grows to the right, `y` grows **downward**
//! - The origin `(0, 0)` is the top-left cell
//! - Gravity pulls toward increasing `y`
//! - Left/right edges wrap, top/bottom edges are solid
//!
//! # Timing Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 150 | Duration of one simulation tick |
//! | `KEY_RELEASE_TIMEOUT_MS` | 180 | Held key expiry without refresh |
//!
//! # Level Glyphs
//!
//! | Glyph | Meaning |
//! |-------|---------|
//! | `#` | Block (static wall) |
//! | `A` | Apple |
//! | `0`..`9` | Start position of the snake with that id |
//! | `.` | Empty cell |
//!
//! # Examples
//!
//! ```
//! use tui_snakes_types::{Direction, Key, Point, SnakeId};
//!
//! let head = Point::new(4, 7);
//! assert_eq!(head.step(Direction::Up), Point::new(4, 6));
//!
//! assert!(Direction::Left.is_opposite(Direction::Right));
//! assert_eq!(Direction::from_str("down"), Some(Direction::Down));
//!
//! assert_eq!(SnakeId::from_digit('1'), Some(SnakeId::new(1)));
//! assert_eq!(Key::from_str("ArrowLeft"), Some(Key::Left));
//! ```

use std::fmt;

/// Duration of one simulation tick in milliseconds.
pub const TICK_MS: u32 = 150;

/// Target length every snake starts with.
pub const INITIAL_TARGET_LENGTH: usize = 2;

/// Maximum number of snakes on a board (one per start digit `0`..`9`).
pub const MAX_SNAKES: usize = 10;

/// How long a key counts as held without a press/repeat refresh.
///
/// Many terminals never report key releases; without a timeout a single tap
/// would turn into a permanently held key.
pub const KEY_RELEASE_TIMEOUT_MS: u32 = 180;

/// Level glyph for a static block.
pub const WALL_GLYPH: char = '#';

/// Level glyph for an apple.
pub const APPLE_GLYPH: char = 'A';

/// Level glyph for an empty cell.
pub const EMPTY_GLYPH: char = '.';

/// A cell coordinate on the board.
///
/// Signed so that candidate positions one step off the board can be
/// represented before wrap/boundary rules are applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The neighbouring cell in `direction` (no wrapping).
    pub fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self::new(self.x + dx, self.y + dy)
    }

    /// The cell `dy` rows below this one.
    pub fn below(self, dy: i32) -> Self {
        Self::new(self.x, self.y + dy)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Facing / movement direction of a snake.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// All four directions in a stable order.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Unit vector `(dx, dy)` for this direction (`y` grows downward).
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_snakes_types::Direction;
    ///
    /// assert_eq!(Direction::Up.delta(), (0, -1));
    /// assert_eq!(Direction::Right.delta(), (1, 0));
    /// ```
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// True if `other` is the exact reversal of `self`.
    pub fn is_opposite(self, other: Direction) -> bool {
        self.opposite() == other
    }

    /// Parse direction from string (case-insensitive).
    ///
    /// Accepts full names or single letters: "up" | "u", "down" | "d",
    /// "left" | "l", "right" | "r".
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "up" | "u" => Some(Direction::Up),
            "down" | "d" => Some(Direction::Down),
            "left" | "l" => Some(Direction::Left),
            "right" | "r" => Some(Direction::Right),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }
}

/// Stable snake identity.
///
/// Equal to the start digit the snake was spawned from, unique within a
/// game and never reused while it runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SnakeId(u8);

impl SnakeId {
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Snake id for a level start digit (`'0'`..=`'9'`).
    pub fn from_digit(ch: char) -> Option<Self> {
        ch.to_digit(10).map(|d| Self(d as u8))
    }

    pub fn get(self) -> u8 {
        self.0
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for SnakeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A logical key, independent of the terminal/windowing backend.
///
/// Character keys are stored lowercase so `W` and `w` bind identically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Up,
    Down,
    Left,
    Right,
}

impl Key {
    /// Character key, normalized to lowercase.
    pub fn char(ch: char) -> Self {
        Key::Char(ch.to_ascii_lowercase())
    }

    /// Parse a key name.
    ///
    /// Arrow keys use the browser-style names ("ArrowUp", ...), any other
    /// single character is a character key.
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_snakes_types::Key;
    ///
    /// assert_eq!(Key::from_str("W"), Some(Key::Char('w')));
    /// assert_eq!(Key::from_str("ArrowDown"), Some(Key::Down));
    /// assert_eq!(Key::from_str("Escape"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "ArrowUp" => return Some(Key::Up),
            "ArrowDown" => return Some(Key::Down),
            "ArrowLeft" => return Some(Key::Left),
            "ArrowRight" => return Some(Key::Right),
            _ => {}
        }
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(ch), None) => Some(Key::char(ch)),
            _ => None,
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Char(ch) => write!(f, "{ch}"),
            Key::Up => f.write_str("ArrowUp"),
            Key::Down => f.write_str("ArrowDown"),
            Key::Left => f.write_str("ArrowLeft"),
            Key::Right => f.write_str("ArrowRight"),
        }
    }
}

/// Color identity of a snake, resolved to concrete colors by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SnakePalette {
    Green,
    Magenta,
    Cyan,
}

impl SnakePalette {
    /// Palette for a snake id. Ids past the palette reuse the first entry.
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_snakes_types::{SnakeId, SnakePalette};
    ///
    /// assert_eq!(SnakePalette::for_snake(SnakeId::new(1)), SnakePalette::Magenta);
    /// assert_eq!(SnakePalette::for_snake(SnakeId::new(7)), SnakePalette::Green);
    /// ```
    pub fn for_snake(id: SnakeId) -> Self {
        match id.get() {
            1 => SnakePalette::Magenta,
            2 => SnakePalette::Cyan,
            _ => SnakePalette::Green,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_timing_constants() {
        assert_eq!(TICK_MS, 150);
        assert_eq!(INITIAL_TARGET_LENGTH, 2);
        assert_eq!(MAX_SNAKES, 10);
    }

    #[test]
    fn opposite_is_involution() {
        for d in Direction::ALL {
            assert_eq!(d.opposite().opposite(), d);
            assert!(d.is_opposite(d.opposite()));
            assert!(!d.is_opposite(d));
        }
    }

    #[test]
    fn step_follows_screen_coordinates() {
        let p = Point::new(3, 3);
        assert_eq!(p.step(Direction::Up), Point::new(3, 2));
        assert_eq!(p.step(Direction::Down), Point::new(3, 4));
        assert_eq!(p.step(Direction::Left), Point::new(2, 3));
        assert_eq!(p.step(Direction::Right), Point::new(4, 3));
        assert_eq!(p.below(5), Point::new(3, 8));
    }

    #[test]
    fn snake_id_from_digit() {
        assert_eq!(SnakeId::from_digit('0'), Some(SnakeId::new(0)));
        assert_eq!(SnakeId::from_digit('9'), Some(SnakeId::new(9)));
        assert_eq!(SnakeId::from_digit('A'), None);
    }

    #[test]
    fn key_names_round_trip_through_display() {
        for name in ["ArrowUp", "ArrowDown", "ArrowLeft", "ArrowRight", "w", "j"] {
            let key = Key::from_str(name).unwrap();
            assert_eq!(key.to_string(), name);
        }
        assert_eq!(Key::char('D'), Key::Char('d'));
    }
}
