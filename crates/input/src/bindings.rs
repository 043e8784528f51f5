//! Per-snake key binding tables.

use arrayvec::ArrayVec;

use crate::types::{Direction, Key, SnakeId};

/// Key → direction table for one snake.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyBindings {
    snake: SnakeId,
    keys: ArrayVec<(Key, Direction), 8>,
}

impl KeyBindings {
    pub fn new(snake: SnakeId) -> Self {
        Self {
            snake,
            keys: ArrayVec::new(),
        }
    }

    /// Bind `key` to `direction`, replacing an earlier binding of `key`.
    /// Returns false if the table is full.
    pub fn bind(&mut self, key: Key, direction: Direction) -> bool {
        if let Some(entry) = self.keys.iter_mut().find(|(k, _)| *k == key) {
            entry.1 = direction;
            return true;
        }
        self.keys.try_push((key, direction)).is_ok()
    }

    /// Builder-style [`bind`](Self::bind) for the four directions at once.
    pub fn with_keys(mut self, up: Key, left: Key, down: Key, right: Key) -> Self {
        self.bind(up, Direction::Up);
        self.bind(left, Direction::Left);
        self.bind(down, Direction::Down);
        self.bind(right, Direction::Right);
        self
    }

    pub fn snake(&self) -> SnakeId {
        self.snake
    }

    pub fn direction_for(&self, key: Key) -> Option<Direction> {
        self.keys
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, direction)| *direction)
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = (Key, Direction)> + '_ {
        self.keys.iter().copied()
    }

    /// Built-in layout for the first few snakes.
    ///
    /// | Snake | Keys |
    /// |-------|------|
    /// | 0 | `w a s d` |
    /// | 1 | arrow keys |
    /// | 2 | `i j k l` |
    pub fn default_for(snake: SnakeId) -> Option<Self> {
        let bindings = Self::new(snake);
        match snake.get() {
            0 => Some(bindings.with_keys(
                Key::char('w'),
                Key::char('a'),
                Key::char('s'),
                Key::char('d'),
            )),
            1 => Some(bindings.with_keys(Key::Up, Key::Left, Key::Down, Key::Right)),
            2 => Some(bindings.with_keys(
                Key::char('i'),
                Key::char('j'),
                Key::char('k'),
                Key::char('l'),
            )),
            _ => None,
        }
    }
}

/// Bindings for every snake in a game, in registration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BindingTable {
    entries: Vec<KeyBindings>,
}

impl BindingTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Default bindings for `snakes`. Snakes past the built-in layouts get an
    /// empty table and a warning; they never move.
    pub fn defaults_for(snakes: impl IntoIterator<Item = SnakeId>) -> Self {
        let mut table = Self::new();
        for snake in snakes {
            match KeyBindings::default_for(snake) {
                Some(bindings) => table.insert(bindings),
                None => {
                    log::warn!("no key bindings for snake {snake}; it will not move");
                    table.insert(KeyBindings::new(snake));
                }
            }
        }
        table
    }

    /// Add or replace the bindings for one snake.
    pub fn insert(&mut self, bindings: KeyBindings) {
        match self.entries.iter_mut().find(|b| b.snake == bindings.snake) {
            Some(existing) => *existing = bindings,
            None => self.entries.push(bindings),
        }
    }

    pub fn get(&self, snake: SnakeId) -> Option<&KeyBindings> {
        self.entries.iter().find(|b| b.snake == snake)
    }

    pub fn iter(&self) -> impl Iterator<Item = &KeyBindings> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
