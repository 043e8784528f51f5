//! Session configuration.

use crate::types::TICK_MS;

/// Runtime knobs for a [`Session`](crate::Session).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    /// Duration of one tick in milliseconds. Never zero.
    pub tick_ms: u32,
    /// Upper bound on ticks run in a single frame. Whole tick periods beyond
    /// it are dropped rather than replayed.
    pub max_ticks_per_frame: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            tick_ms: TICK_MS,
            max_ticks_per_frame: 1,
        }
    }
}

impl SessionConfig {
    /// Create from environment variables.
    ///
    /// - `SNAKES_TICK_MS`
    /// - `SNAKES_MAX_TICKS_PER_FRAME`
    ///
    /// Missing variables keep the default; unparsable or zero values are
    /// logged and ignored.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Like [`from_env`](Self::from_env) with a custom variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            tick_ms: read_positive(&lookup, "SNAKES_TICK_MS").unwrap_or(defaults.tick_ms),
            max_ticks_per_frame: read_positive(&lookup, "SNAKES_MAX_TICKS_PER_FRAME")
                .unwrap_or(defaults.max_ticks_per_frame),
        }
    }
}

fn read_positive(lookup: &impl Fn(&str) -> Option<String>, name: &str) -> Option<u32> {
    let raw = lookup(name)?;
    match raw.trim().parse::<u32>() {
        Ok(value) if value > 0 => Some(value),
        _ => {
            log::warn!("ignoring {name}={raw:?}: expected a positive integer");
            None
        }
    }
}
