//! Game state module - one level in play
//!
//! Owns the board, the snakes (in registration order) and the remaining
//! apples, and runs the per-tick pipeline:
//!
//! 1. Movement resolver, once per snake with an intent, in registration order
//! 2. Gravity settler over all snakes
//! 3. Apple consumption at each snake's head
//! 4. Cleared check
//!
//! Timing lives in the engine; [`GameState::step`] is one discrete tick.

use arrayvec::ArrayVec;

use crate::board::Board;
use crate::entity::{Apple, Block, Snake};
use crate::error::SetupError;
use crate::gravity;
use crate::level::{parse_level, LevelData, ParsedLevel};
use crate::movement::{resolve_move, Intent, MoveOutcome};
use crate::snapshot::{GameSnapshot, SnakeSnapshot};
use crate::types::{Point, SnakeId, MAX_SNAKES};

/// What happened during one tick.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepReport {
    /// Outcome for every snake that had an intent, in registration order.
    pub moves: ArrayVec<(SnakeId, MoveOutcome), MAX_SNAKES>,
    /// Rows fallen per snake during the gravity pass (non-zero only).
    pub falls: ArrayVec<(SnakeId, i32), MAX_SNAKES>,
    /// Apples eaten this tick and by whom.
    pub apples_eaten: ArrayVec<(SnakeId, Point), MAX_SNAKES>,
    /// True if no apples remain after this tick.
    pub cleared: bool,
}

impl StepReport {
    pub fn outcome(&self, snake: SnakeId) -> Option<MoveOutcome> {
        self.moves
            .iter()
            .find(|(id, _)| *id == snake)
            .map(|(_, outcome)| *outcome)
    }
}

/// Complete per-level simulation state.
#[derive(Debug, Clone)]
pub struct GameState {
    level_name: String,
    board: Board,
    snakes: Vec<Snake>,
    apples: Vec<Apple>,
    tick: u64,
}

impl GameState {
    /// Parse `data` and build a game from it.
    pub fn from_level(data: &LevelData) -> Result<Self, SetupError> {
        Self::from_parsed(&parse_level(data))
    }

    /// Build a game from an already parsed level.
    ///
    /// Fails if the dimensions are zero or no start positions survived
    /// parsing.
    pub fn from_parsed(level: &ParsedLevel) -> Result<Self, SetupError> {
        let mut board = Board::new(level.width, level.height)?;
        if level.starts.is_empty() {
            return Err(SetupError::NoStartPositions {
                level: level.name.clone(),
            });
        }
        for block in &level.blocks {
            board.set_block(block.pos);
        }
        let snakes = level
            .starts
            .iter()
            .map(|&(id, start)| Snake::new(id, start))
            .collect();
        Self::from_parts(level.name.clone(), board, snakes, level.apples.clone())
    }

    /// Build a game from explicit parts. `snakes` is the registration order.
    pub fn from_parts(
        level_name: impl Into<String>,
        board: Board,
        snakes: Vec<Snake>,
        apples: Vec<Apple>,
    ) -> Result<Self, SetupError> {
        if snakes.len() > MAX_SNAKES {
            return Err(SetupError::TooManySnakes {
                count: snakes.len(),
            });
        }
        for (i, snake) in snakes.iter().enumerate() {
            if snakes[..i].iter().any(|other| other.id() == snake.id()) {
                return Err(SetupError::DuplicateSnake { id: snake.id() });
            }
        }
        Ok(Self {
            level_name: level_name.into(),
            board,
            snakes,
            apples,
            tick: 0,
        })
    }

    pub fn level_name(&self) -> &str {
        &self.level_name
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Snakes in registration order.
    pub fn snakes(&self) -> &[Snake] {
        &self.snakes
    }

    pub fn snake(&self, id: SnakeId) -> Option<&Snake> {
        self.snakes.iter().find(|s| s.id() == id)
    }

    pub fn apples(&self) -> &[Apple] {
        &self.apples
    }

    pub fn blocks(&self) -> impl Iterator<Item = Block> + '_ {
        self.board.blocks().map(|pos| Block { pos })
    }

    /// Number of completed ticks.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// True once every apple has been eaten.
    pub fn is_cleared(&self) -> bool {
        self.apples.is_empty()
    }

    /// Run one gravity pass. Returns non-zero falls per snake.
    pub fn settle(&mut self) -> ArrayVec<(SnakeId, i32), MAX_SNAKES> {
        let mut falls = ArrayVec::new();
        for index in 0..self.snakes.len() {
            let fall = gravity::settle_snake(&self.board, &mut self.snakes, index);
            if fall > 0 {
                falls.push((self.snakes[index].id(), fall));
            }
        }
        falls
    }

    /// Advance the simulation by one tick.
    ///
    /// Only the first intent for each snake is used; intents for unknown
    /// snakes are ignored.
    pub fn step(&mut self, intents: &[Intent]) -> StepReport {
        let mut report = StepReport::default();

        for index in 0..self.snakes.len() {
            let id = self.snakes[index].id();
            let Some(intent) = intents.iter().find(|intent| intent.snake == id) else {
                continue;
            };
            let outcome = resolve_move(&self.board, &mut self.snakes, index, intent.direction);
            if let MoveOutcome::Rejected(reason) = outcome {
                log::trace!("snake {id} {} rejected: {reason:?}", intent.direction.as_str());
            }
            report.moves.push((id, outcome));
        }

        report.falls = self.settle();

        for snake in self.snakes.iter_mut() {
            let head = snake.head();
            if let Some(pos) = self.apples.iter().position(|apple| apple.pos == head) {
                self.apples.remove(pos);
                snake.grow();
                log::debug!(
                    "snake {} ate apple at {head}, target length {}",
                    snake.id(),
                    snake.target_len()
                );
                report.apples_eaten.push((snake.id(), head));
            }
        }

        self.tick += 1;
        report.cleared = self.is_cleared();
        report
    }

    /// Fill `out` with the current state, reusing its allocations.
    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.level_name.clear();
        out.level_name.push_str(&self.level_name);
        out.width = self.board.width() as u16;
        out.height = self.board.height() as u16;
        out.tick = self.tick;
        out.cleared = self.is_cleared();

        out.snakes.truncate(self.snakes.len());
        for (index, snake) in self.snakes.iter().enumerate() {
            if index == out.snakes.len() {
                out.snakes.push(SnakeSnapshot {
                    id: snake.id(),
                    palette: snake.palette(),
                    direction: snake.direction(),
                    target_len: snake.target_len(),
                    segments: Vec::with_capacity(snake.target_len()),
                });
            }
            let view = &mut out.snakes[index];
            view.id = snake.id();
            view.palette = snake.palette();
            view.direction = snake.direction();
            view.target_len = snake.target_len();
            view.segments.clear();
            view.segments.extend(snake.body().iter().copied());
        }

        out.apples.clear();
        out.apples.extend(self.apples.iter().map(|apple| apple.pos));
        out.blocks.clear();
        out.blocks.extend(self.board.blocks());
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut snapshot = GameSnapshot::default();
        self.snapshot_into(&mut snapshot);
        snapshot
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::builtin_levels;
    use crate::movement::MoveRejection;
    use crate::types::{Direction, Point};

    fn intent(id: u8, direction: Direction) -> Intent {
        Intent::new(SnakeId::new(id), direction)
    }

    #[test]
    fn failed_fall_search_does_not_stop_the_pass() {
        // Snake 0 hangs one row above a 3-row board: its search runs out of
        // rows before the floor. Snake 1 still settles in the same pass.
        let board = Board::new(3, 3).unwrap();
        let snakes = vec![
            Snake::from_segments(SnakeId::new(0), [Point::new(1, -1)], Direction::Up, 2).unwrap(),
            Snake::from_segments(SnakeId::new(1), [Point::new(0, 0)], Direction::Up, 2).unwrap(),
            Snake::from_segments(SnakeId::new(2), [Point::new(2, 0)], Direction::Up, 2).unwrap(),
        ];
        let mut game = GameState::from_parts("overrun", board, snakes, vec![]).unwrap();

        let falls = game.settle();

        assert_eq!(
            falls.as_slice(),
            &[(SnakeId::new(1), 2), (SnakeId::new(2), 2)]
        );
        assert_eq!(game.snakes()[0].head(), Point::new(1, -1));
        assert_eq!(game.snakes()[1].head(), Point::new(0, 2));
        assert_eq!(game.snakes()[2].head(), Point::new(2, 2));
    }

    #[test]
    fn from_level_builds_snakes_in_id_order() {
        let data = LevelData::new("t", 5, 3, &["1...0", ".....", "#####"]);
        let game = GameState::from_level(&data).unwrap();

        let ids: Vec<_> = game.snakes().iter().map(|s| s.id().get()).collect();
        assert_eq!(ids, vec![0, 1]);
        assert_eq!(game.snakes()[0].head(), Point::new(4, 0));
        assert_eq!(game.board().block_count(), 5);
    }

    #[test]
    fn setup_errors() {
        assert_eq!(
            GameState::from_level(&LevelData::new("z", 0, 3, &[])).unwrap_err(),
            SetupError::InvalidDimensions {
                width: 0,
                height: 3
            }
        );
        assert_eq!(
            GameState::from_level(&LevelData::new("empty", 2, 1, &["A."])).unwrap_err(),
            SetupError::NoStartPositions {
                level: "empty".to_string()
            }
        );

        let board = Board::new(3, 3).unwrap();
        let twins = vec![
            Snake::new(SnakeId::new(0), Point::new(0, 0)),
            Snake::new(SnakeId::new(0), Point::new(2, 0)),
        ];
        assert_eq!(
            GameState::from_parts("t", board.clone(), twins, vec![]).unwrap_err(),
            SetupError::DuplicateSnake { id: SnakeId::new(0) }
        );

        let crowd = (0..11)
            .map(|i| Snake::new(SnakeId::new(i), Point::new(0, 0)))
            .collect();
        assert_eq!(
            GameState::from_parts("t", board, crowd, vec![]).unwrap_err(),
            SetupError::TooManySnakes { count: 11 }
        );
    }

    #[test]
    fn apples_do_not_support_falling_snakes() {
        let data = LevelData::new("t", 5, 5, &["..0..", ".....", ".....", "..A..", "....."]);
        let mut game = GameState::from_level(&data).unwrap();

        let report = game.step(&[]);

        // The single-segment snake drops straight past the apple.
        assert_eq!(report.falls.as_slice(), &[(SnakeId::new(0), 4)]);
        assert!(report.apples_eaten.is_empty());
        assert_eq!(game.snakes()[0].head(), Point::new(2, 4));
        assert_eq!(game.tick(), 1);
    }

    #[test]
    fn eating_grows_target_and_clears() {
        let data = LevelData::new("t", 4, 2, &[".0A.", "####"]);
        let mut game = GameState::from_level(&data).unwrap();

        let report = game.step(&[intent(0, Direction::Right)]);

        assert_eq!(report.outcome(SnakeId::new(0)), Some(MoveOutcome::Grew));
        assert_eq!(
            report.apples_eaten.as_slice(),
            &[(SnakeId::new(0), Point::new(2, 0))]
        );
        assert!(report.cleared);
        assert!(game.is_cleared());
        assert_eq!(game.snakes()[0].target_len(), 3);
        assert_eq!(game.snakes()[0].segment_count(), 2);
    }

    #[test]
    fn only_first_intent_per_snake_counts() {
        let data = LevelData::new("t", 5, 2, &["..0..", "#####"]);
        let mut game = GameState::from_level(&data).unwrap();

        let report = game.step(&[
            intent(0, Direction::Down),
            intent(0, Direction::Left),
            intent(7, Direction::Right),
        ]);

        assert_eq!(report.moves.len(), 1);
        assert_eq!(
            report.outcome(SnakeId::new(0)),
            Some(MoveOutcome::Rejected(MoveRejection::Reversal))
        );
        assert_eq!(game.snakes()[0].head(), Point::new(2, 0));
    }

    #[test]
    fn snapshot_into_reuses_and_shrinks() {
        let mut game = GameState::from_level(&builtin_levels()[0]).unwrap();
        game.settle();
        let mut snap = GameSnapshot::default();
        snap.running = true;
        game.snapshot_into(&mut snap);

        assert_eq!(snap.level_name, "Level 1");
        assert_eq!((snap.width, snap.height), (15, 12));
        assert_eq!(snap.snakes.len(), 2);
        assert_eq!(snap.apples.len(), 7);
        assert_eq!(snap.blocks.len(), game.board().block_count());
        assert!(snap.running);

        let single = GameState::from_level(&LevelData::new("s", 2, 1, &["0A"])).unwrap();
        single.snapshot_into(&mut snap);
        assert_eq!(snap.snakes.len(), 1);
        assert_eq!(snap.snakes[0].segments, vec![Point::new(0, 0)]);
        assert_eq!(snap.level_name, "s");
    }
}
