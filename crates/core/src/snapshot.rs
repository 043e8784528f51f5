use crate::types::{Direction, Point, SnakeId, SnakePalette};

/// One snake as seen by a presentation sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnakeSnapshot {
    pub id: SnakeId,
    pub palette: SnakePalette,
    pub direction: Direction,
    pub target_len: usize,
    /// Head first.
    pub segments: Vec<Point>,
}

impl SnakeSnapshot {
    pub fn head(&self) -> Option<Point> {
        self.segments.first().copied()
    }
}

/// Read-only view of a game for one rendered frame.
///
/// Filled by [`GameState::snapshot_into`](crate::GameState::snapshot_into),
/// which reuses the vectors across frames.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GameSnapshot {
    pub level_name: String,
    pub width: u16,
    pub height: u16,
    pub tick: u64,
    pub snakes: Vec<SnakeSnapshot>,
    pub apples: Vec<Point>,
    pub blocks: Vec<Point>,
    pub cleared: bool,
    /// Set by the session; the core leaves it untouched.
    pub running: bool,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        self.level_name.clear();
        self.width = 0;
        self.height = 0;
        self.tick = 0;
        self.snakes.clear();
        self.apples.clear();
        self.blocks.clear();
        self.cleared = false;
        self.running = false;
    }

    pub fn snake(&self, id: SnakeId) -> Option<&SnakeSnapshot> {
        self.snakes.iter().find(|s| s.id == id)
    }

    pub fn playable(&self) -> bool {
        self.running && !self.cleared
    }
}
