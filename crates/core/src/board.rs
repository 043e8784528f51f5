//! Board module - static level geometry
//!
//! The board is a `width x height` grid of cells that are either empty or
//! hold a block. Blocks are set once at level load and never change during
//! play. Uses a flat row-major vector (`y * width + x`) for cache locality.
//!
//! Edge rules:
//! - Left/right edges wrap (see [`Board::wrap_x`])
//! - Top/bottom edges are solid: anything off the board vertically counts
//!   as occupied

use crate::error::SetupError;
use crate::types::Point;

/// Static level geometry: dimensions and block cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: i32,
    height: i32,
    /// Flat array of block flags, row-major order (y * width + x)
    blocks: Vec<bool>,
}

impl Board {
    /// Create an empty board. Both dimensions must be non-zero.
    pub fn new(width: u16, height: u16) -> Result<Self, SetupError> {
        if width == 0 || height == 0 {
            return Err(SetupError::InvalidDimensions { width, height });
        }
        let len = (width as usize) * (height as usize);
        Ok(Self {
            width: width as i32,
            height: height as i32,
            blocks: vec![false; len],
        })
    }

    #[inline(always)]
    fn index(&self, p: Point) -> Option<usize> {
        if !self.in_bounds(p) {
            return None;
        }
        Some((p.y as usize) * (self.width as usize) + (p.x as usize))
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn in_bounds(&self, p: Point) -> bool {
        p.x >= 0 && p.x < self.width && p.y >= 0 && p.y < self.height
    }

    /// Place a block. Returns false if `p` is off the board.
    pub fn set_block(&mut self, p: Point) -> bool {
        match self.index(p) {
            Some(idx) => {
                self.blocks[idx] = true;
                true
            }
            None => false,
        }
    }

    /// True if a block occupies `p`. Off-board cells hold no block.
    pub fn is_block(&self, p: Point) -> bool {
        self.index(p).is_some_and(|idx| self.blocks[idx])
    }

    /// Apply horizontal wrap to a column one step off the board.
    ///
    /// `-1` maps to `width - 1` and `width` maps to `0`; in-range columns are
    /// returned unchanged.
    pub fn wrap_x(&self, x: i32) -> i32 {
        if x < 0 {
            self.width - 1
        } else if x >= self.width {
            0
        } else {
            x
        }
    }

    /// Iterate block cells in row-major order.
    pub fn blocks(&self) -> impl Iterator<Item = Point> + '_ {
        let width = self.width as usize;
        self.blocks
            .iter()
            .enumerate()
            .filter(|(_, &b)| b)
            .map(move |(i, _)| Point::new((i % width) as i32, (i / width) as i32))
    }

    pub fn block_count(&self) -> usize {
        self.blocks.iter().filter(|&&b| b).count()
    }
}
