//! Gravity settler - drops unsupported snakes as rigid bodies
//!
//! Once per tick, after movement, every snake is checked in registration
//! order:
//!
//! - **Supported**: at least one segment has the floor or an external occupant
//!   directly below it. Nothing happens.
//! - **Unsupported**: each segment measures the distance straight down to the
//!   first external obstacle (or the floor). The whole body falls by the
//!   smallest of those distances minus one, in a single update.
//!
//! This is one relaxation pass, not a fixpoint solver: a snake settled earlier
//! in the pass is seen at its new position by later snakes, but a snake is
//! never revisited within the same pass.

use std::fmt;

use crate::board::Board;
use crate::entity::Snake;
use crate::occupancy::Occupancy;
use crate::types::{Point, SnakeId};

/// Internal invariant violation during a fall-distance search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GravityError {
    /// The downward search ran past the board height without finding the
    /// floor.
    SearchExceededHeight { snake: SnakeId, from: Point },
}

impl fmt::Display for GravityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SearchExceededHeight { snake, from } => write!(
                f,
                "fall search for snake {snake} from {from} exceeded board height"
            ),
        }
    }
}

impl std::error::Error for GravityError {}

/// True if any segment of `snake` rests on the floor or an external occupant.
pub fn is_supported(occupancy: &Occupancy<'_>, snake: &Snake) -> bool {
    snake
        .body()
        .iter()
        .any(|&seg| occupancy.has_support_below(seg, snake.id()))
}

/// Distance from `from` straight down to the first external obstacle or the
/// floor. A distance of 1 means the obstacle is directly below.
pub fn distance_to_obstacle(
    occupancy: &Occupancy<'_>,
    height: i32,
    from: Point,
    own: SnakeId,
) -> Result<i32, GravityError> {
    for distance in 1..=height {
        let probe = from.below(distance);
        if probe.y >= height {
            return Ok(distance);
        }
        // Rows above the board are open air.
        if probe.y >= 0 && occupancy.is_externally_occupied(probe, own) {
            return Ok(distance);
        }
    }
    Err(GravityError::SearchExceededHeight { snake: own, from })
}

/// How far `snakes[index]` would fall right now. Zero when supported.
pub fn fall_distance(board: &Board, snakes: &[Snake], index: usize) -> Result<i32, GravityError> {
    let occupancy = Occupancy::new(board, snakes);
    let snake = &snakes[index];
    if is_supported(&occupancy, snake) {
        return Ok(0);
    }

    let mut min_distance = board.height();
    for &seg in snake.body() {
        let distance = distance_to_obstacle(&occupancy, board.height(), seg, snake.id())?;
        min_distance = min_distance.min(distance);
    }
    Ok(min_distance - 1)
}

/// Settle one snake. Returns the number of rows it fell.
///
/// A failed search is logged and treated as a fall of zero so the rest of the
/// tick carries on.
pub fn settle_snake(board: &Board, snakes: &mut [Snake], index: usize) -> i32 {
    let fall = match fall_distance(board, snakes, index) {
        Ok(fall) => fall,
        Err(err) => {
            log::error!("{err}");
            0
        }
    };
    if fall > 0 {
        snakes[index].shift_down(fall);
    }
    fall
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::types::Direction;

    fn snake(id: u8, segments: &[(i32, i32)]) -> Snake {
        Snake::from_segments(
            SnakeId::new(id),
            segments.iter().map(|&(x, y)| Point::new(x, y)),
            Direction::Up,
            segments.len().max(2),
        )
        .unwrap()
    }

    #[test]
    fn falls_to_floor_in_one_pass() {
        let board = Board::new(15, 12).unwrap();
        let mut snakes = vec![snake(0, &[(5, 5), (5, 6)])];

        assert_eq!(settle_snake(&board, &mut snakes, 0), 5);
        assert_eq!(snakes[0].head(), Point::new(5, 10));
        assert_eq!(snakes[0].tail(), Point::new(5, 11));
    }

    #[test]
    fn stops_one_above_nearest_obstacle() {
        let mut board = Board::new(10, 10).unwrap();
        board.set_block(Point::new(2, 7));
        // Horizontal snake over a block three rows below its left end.
        let mut snakes = vec![snake(0, &[(2, 4), (3, 4), (4, 4)])];

        assert_eq!(fall_distance(&board, &snakes, 0), Ok(2));
        settle_snake(&board, &mut snakes, 0);
        assert_eq!(
            snakes[0].body().iter().copied().collect::<Vec<_>>(),
            vec![Point::new(2, 6), Point::new(3, 6), Point::new(4, 6)]
        );
        assert_eq!(fall_distance(&board, &snakes, 0), Ok(0));
    }

    #[test]
    fn supported_by_any_single_segment() {
        let mut board = Board::new(10, 10).unwrap();
        board.set_block(Point::new(4, 5));
        let snakes = vec![snake(0, &[(2, 4), (3, 4), (4, 4)])];
        let occ = Occupancy::new(&board, &snakes);

        assert!(is_supported(&occ, &snakes[0]));
        assert_eq!(fall_distance(&board, &snakes, 0), Ok(0));
    }

    #[test]
    fn own_segments_are_not_obstacles() {
        let board = Board::new(10, 10).unwrap();
        // Vertical snake: head above its own tail.
        let mut snakes = vec![snake(0, &[(1, 1), (1, 2), (1, 3)])];

        assert_eq!(settle_snake(&board, &mut snakes, 0), 6);
        assert_eq!(snakes[0].tail(), Point::new(1, 9));
    }

    #[test]
    fn lands_on_another_snake() {
        let board = Board::new(10, 10).unwrap();
        let mut snakes = vec![snake(0, &[(3, 2)]), snake(1, &[(3, 9), (4, 9)])];

        assert_eq!(settle_snake(&board, &mut snakes, 0), 6);
        assert_eq!(snakes[0].head(), Point::new(3, 8));
    }

    #[test]
    fn single_pass_sees_earlier_results_only() {
        let board = Board::new(5, 10).unwrap();
        // Snake 0 hovers over snake 1, which hovers over the floor.
        let mut snakes = vec![snake(0, &[(2, 1)]), snake(1, &[(2, 4)])];

        // Snake 0 lands on snake 1's current position first.
        assert_eq!(settle_snake(&board, &mut snakes, 0), 2);
        assert_eq!(settle_snake(&board, &mut snakes, 1), 5);
        assert_eq!(snakes[0].head(), Point::new(2, 3));
        assert_eq!(snakes[1].head(), Point::new(2, 9));
    }

    #[test]
    fn search_bounded_by_height() {
        let board = Board::new(3, 3).unwrap();
        let snakes = [snake(0, &[(1, 0)])];
        let occ = Occupancy::new(&board, &snakes);

        // A start above the board can never reach the floor within `height`.
        assert_eq!(
            distance_to_obstacle(&occ, board.height(), Point::new(1, -5), SnakeId::new(0)),
            Err(GravityError::SearchExceededHeight {
                snake: SnakeId::new(0),
                from: Point::new(1, -5),
            })
        );
    }

    proptest! {
        #![proptest_config(ProptestConfig { max_global_rejects: 65536, ..ProptestConfig::default() })]

        #[test]
        fn empty_column_search_reaches_floor(
            width in 1u16..24,
            height in 1u16..24,
            x in 0i32..24,
            y in 0i32..24,
        ) {
            prop_assume!(x < width as i32 && y < height as i32);
            let board = Board::new(width, height).unwrap();
            let occ = Occupancy::new(&board, &[]);

            let distance = distance_to_obstacle(&occ, board.height(), Point::new(x, y), SnakeId::new(0));
            prop_assert_eq!(distance, Ok(height as i32 - y));
        }

        #[test]
        fn search_stops_at_first_block_below(
            height in 2u16..24,
            y in 0i32..24,
            gap in 1i32..24,
        ) {
            let block_y = y + gap;
            prop_assume!(block_y < height as i32);
            let mut board = Board::new(3, height).unwrap();
            board.set_block(Point::new(1, block_y));
            let occ = Occupancy::new(&board, &[]);

            let distance = distance_to_obstacle(&occ, board.height(), Point::new(1, y), SnakeId::new(0));
            prop_assert_eq!(distance, Ok(gap));
        }
    }
}
