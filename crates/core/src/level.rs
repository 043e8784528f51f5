//! Level parser - textual grids to typed entities
//!
//! A level is a row-major list of strings. Each character is one cell:
//!
//! | Glyph | Meaning |
//! |-------|---------|
//! | `#` | Block |
//! | `A` | Apple |
//! | `0`..`9` | Start position of the snake with that id |
//! | `.` | Empty |
//!
//! Parsing never fails. Anomalies (unknown glyphs, missing or duplicate
//! start digits, ragged rows) are logged, collected as [`LevelWarning`]s and
//! resolved best-effort. Whether a level is playable at all is decided when a
//! [`GameState`](crate::GameState) is built from it.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::entity::{Apple, Block};
use crate::types::{Point, SnakeId, APPLE_GLYPH, EMPTY_GLYPH, WALL_GLYPH};

/// Raw level geometry as supplied by a level source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelData {
    #[serde(default)]
    pub name: String,
    pub width: u16,
    pub height: u16,
    pub layout: Vec<String>,
}

impl LevelData {
    pub fn new(name: impl Into<String>, width: u16, height: u16, layout: &[&str]) -> Self {
        Self {
            name: name.into(),
            width,
            height,
            layout: layout.iter().map(|row| row.to_string()).collect(),
        }
    }
}

/// Non-fatal anomaly found while parsing a layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LevelWarning {
    /// Unrecognized character; the cell is treated as empty.
    UnknownGlyph { glyph: char, at: Point },
    /// A start digit below the highest one used never appears.
    MissingStart { snake: SnakeId },
    /// The layout has no start digits at all.
    NoStartPositions,
    /// Row length differs from the declared width (padded or truncated).
    RowLengthMismatch { row: usize, len: usize, width: u16 },
    /// Row count differs from the declared height (padded or truncated).
    RowCountMismatch { rows: usize, height: u16 },
    /// The same start digit appears twice; the later cell wins.
    DuplicateStart { snake: SnakeId, first: Point, second: Point },
}

impl fmt::Display for LevelWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownGlyph { glyph, at } => {
                write!(f, "unknown glyph {glyph:?} at {at}, treated as empty")
            }
            Self::MissingStart { snake } => {
                write!(f, "no start position for snake {snake}")
            }
            Self::NoStartPositions => f.write_str("level has no start positions"),
            Self::RowLengthMismatch { row, len, width } => {
                write!(f, "row {row} has {len} cells, expected {width}")
            }
            Self::RowCountMismatch { rows, height } => {
                write!(f, "layout has {rows} rows, expected {height}")
            }
            Self::DuplicateStart {
                snake,
                first,
                second,
            } => write!(
                f,
                "snake {snake} starts at both {first} and {second}, using {second}"
            ),
        }
    }
}

/// Typed result of parsing a [`LevelData`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedLevel {
    pub name: String,
    pub width: u16,
    pub height: u16,
    pub blocks: Vec<Block>,
    pub apples: Vec<Apple>,
    /// Start positions in ascending id order. Missing ids are absent.
    pub starts: Vec<(SnakeId, Point)>,
    pub warnings: Vec<LevelWarning>,
}

impl ParsedLevel {
    fn warn(&mut self, warning: LevelWarning) {
        log::warn!("{}: {warning}", self.name);
        self.warnings.push(warning);
    }
}

/// Parse a layout into blocks, apples and start positions.
pub fn parse_level(data: &LevelData) -> ParsedLevel {
    let mut parsed = ParsedLevel {
        name: data.name.clone(),
        width: data.width,
        height: data.height,
        ..ParsedLevel::default()
    };

    if data.layout.len() != data.height as usize {
        parsed.warn(LevelWarning::RowCountMismatch {
            rows: data.layout.len(),
            height: data.height,
        });
    }

    let mut slots: [Option<Point>; 10] = [None; 10];

    for (y, row) in data.layout.iter().take(data.height as usize).enumerate() {
        let len = row.chars().count();
        if len != data.width as usize {
            parsed.warn(LevelWarning::RowLengthMismatch {
                row: y,
                len,
                width: data.width,
            });
        }

        for (x, glyph) in row.chars().take(data.width as usize).enumerate() {
            let at = Point::new(x as i32, y as i32);
            match glyph {
                WALL_GLYPH => parsed.blocks.push(Block { pos: at }),
                APPLE_GLYPH => parsed.apples.push(Apple { pos: at }),
                EMPTY_GLYPH => {}
                digit if digit.is_ascii_digit() => {
                    let Some(id) = SnakeId::from_digit(digit) else {
                        continue;
                    };
                    if let Some(first) = slots[id.index()].replace(at) {
                        parsed.warn(LevelWarning::DuplicateStart {
                            snake: id,
                            first,
                            second: at,
                        });
                    }
                }
                other => parsed.warn(LevelWarning::UnknownGlyph { glyph: other, at }),
            }
        }
    }

    let highest = slots.iter().rposition(Option::is_some);
    match highest {
        None => parsed.warn(LevelWarning::NoStartPositions),
        Some(highest) => {
            for (index, slot) in slots.iter().enumerate().take(highest + 1) {
                let snake = SnakeId::new(index as u8);
                match slot {
                    Some(pos) => parsed.starts.push((snake, *pos)),
                    None => parsed.warn(LevelWarning::MissingStart { snake }),
                }
            }
        }
    }

    parsed
}

/// The levels shipped with the game, in play order.
pub fn builtin_levels() -> Vec<LevelData> {
    vec![
        LevelData::new(
            "Level 1",
            15,
            12,
            &[
                "###############",
                "............A..",
                "..#########....",
                "..#.......#....",
                "..#..0.A..#..A.",
                "..#.......#..A.",
                "..#..####.#..A.",
                ".....#....#....",
                ".....#..1......",
                ".....#.........",
                ".A........A..#.",
                "###############",
            ],
        ),
        LevelData::new(
            "Level 2",
            12,
            15,
            &[
                "############",
                "#..........#",
                "#...#......#",
                "#...#..A...#",
                "#...#......#",
                "#...######.#",
                "#..........#",
                "#..A....#..#",
                "#.......#..#",
                "#A#####.#..#",
                "#.#...#.#..#",
                "#.#.0.#.A..#",
                "#.....#....#",
                "#.....A...A#",
                "############",
            ],
        ),
        LevelData::new(
            "Level 3",
            20,
            10,
            &[
                "####################",
                "#..................#",
                "#..A.....##.....A..#",
                "#........##........#",
                "#...0....##....1...#",
                "#........##..A.....#",
                "#........##........#",
                "#..A.....##.....A..#",
                "#..................#",
                "####################",
            ],
        ),
        LevelData::new(
            "Level 4",
            18,
            14,
            &[
                "##################",
                "#................#",
                "#................#",
                "#................#",
                "#.....######.....#",
                "#.....#....#..A..#",
                "#..A..#....#.....#",
                "#.....#....#.....#",
                "#.....######.....#",
                "#0...........A..A#",
                "####..#..#..######",
                "#................#",
                "#.......1........#",
                "##################",
            ],
        ),
    ]
}

/// Index of the level after `index`, wrapping to the first.
pub fn next_level_index(index: usize, count: usize) -> usize {
    if count == 0 {
        0
    } else {
        (index + 1) % count
    }
}
