//! Held / pressed key tracking for terminal environments.
//!
//! Two sets are kept:
//!
//! - **held**: live set, updated immediately on press and release
//! - **pressed**: every fresh press since the last drain, consumed once per
//!   tick, so a tap shorter than a tick is never lost
//!
//! Every fresh press gets a monotonically increasing sequence number so the
//! tick orchestrator can prefer the most recent key.
//!
//! Supports terminals that do not emit key release events by expiring held
//! keys after a timeout without a press/repeat refresh. In that mode a key
//! only counts as held once a repeat confirms it, so a single tap moves once.

use arrayvec::ArrayVec;

use crate::types::{Key, KEY_RELEASE_TIMEOUT_MS};

/// Maximum number of distinct keys tracked at once. Extra keys are dropped.
pub const MAX_TRACKED_KEYS: usize = 16;

/// A key together with the sequence number of its latest fresh press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyPress {
    pub key: Key,
    pub seq: u64,
}

#[derive(Debug, Clone, Copy)]
struct HeldKey {
    press: KeyPress,
    last_seen_ms: u64,
    /// Seen more than once, or reported by a terminal that sends releases.
    confirmed: bool,
}

/// What the tick orchestrator reads from the keyboard.
pub trait InputSource {
    /// Keys currently held down.
    fn held(&self) -> ArrayVec<KeyPress, MAX_TRACKED_KEYS>;

    /// Keys freshly pressed since the previous call; clears the set.
    fn drain_pressed(&mut self) -> ArrayVec<KeyPress, MAX_TRACKED_KEYS>;
}

/// Keyboard state fed by terminal events.
#[derive(Debug, Clone)]
pub struct KeyState {
    held: ArrayVec<HeldKey, MAX_TRACKED_KEYS>,
    pressed: ArrayVec<KeyPress, MAX_TRACKED_KEYS>,
    next_seq: u64,
    key_release_timeout_ms: u32,
}

impl KeyState {
    pub fn new() -> Self {
        Self {
            held: ArrayVec::new(),
            pressed: ArrayVec::new(),
            next_seq: 0,
            key_release_timeout_ms: KEY_RELEASE_TIMEOUT_MS,
        }
    }

    /// Zero disables expiry (for terminals that report releases).
    pub fn with_key_release_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.key_release_timeout_ms = timeout_ms;
        self
    }

    pub fn key_release_timeout_ms(&self) -> u32 {
        self.key_release_timeout_ms
    }

    /// A key went down.
    ///
    /// A press for a key that is already held is treated as a repeat: it
    /// refreshes the hold but is not a new press. Terminals without release
    /// events report auto-repeat this way.
    pub fn press(&mut self, key: Key, now_ms: u64) {
        if let Some(held) = self.held.iter_mut().find(|h| h.press.key == key) {
            held.last_seen_ms = now_ms;
            held.confirmed = true;
            return;
        }

        let press = KeyPress {
            key,
            seq: self.next_seq,
        };
        self.next_seq += 1;

        let _ = self.held.try_push(HeldKey {
            press,
            last_seen_ms: now_ms,
            confirmed: self.key_release_timeout_ms == 0,
        });
        match self.pressed.iter_mut().find(|p| p.key == key) {
            Some(existing) => existing.seq = press.seq,
            None => {
                let _ = self.pressed.try_push(press);
            }
        }
    }

    /// An auto-repeat event. Keeps the key held without registering a press.
    pub fn repeat(&mut self, key: Key, now_ms: u64) {
        if let Some(held) = self.held.iter_mut().find(|h| h.press.key == key) {
            held.last_seen_ms = now_ms;
            held.confirmed = true;
            return;
        }
        // The hold expired between repeats; pick it up again without a press.
        let press = KeyPress {
            key,
            seq: self.next_seq,
        };
        self.next_seq += 1;
        let _ = self.held.try_push(HeldKey {
            press,
            last_seen_ms: now_ms,
            confirmed: true,
        });
    }

    pub fn release(&mut self, key: Key) {
        self.held.retain(|h| h.press.key != key);
    }

    /// Drop held keys that have not been refreshed within the timeout.
    pub fn expire_held(&mut self, now_ms: u64) {
        if self.key_release_timeout_ms == 0 {
            return;
        }
        let timeout = u64::from(self.key_release_timeout_ms);
        self.held
            .retain(|h| now_ms.saturating_sub(h.last_seen_ms) <= timeout);
    }

    /// Forget everything, e.g. when the terminal loses focus.
    pub fn clear(&mut self) {
        self.held.clear();
        self.pressed.clear();
    }

    /// True if `key` is down and confirmed as a hold.
    pub fn is_held(&self, key: Key) -> bool {
        self.held.iter().any(|h| h.confirmed && h.press.key == key)
    }
}

impl Default for KeyState {
    fn default() -> Self {
        Self::new()
    }
}

impl InputSource for KeyState {
    fn held(&self) -> ArrayVec<KeyPress, MAX_TRACKED_KEYS> {
        self.held
            .iter()
            .filter(|h| h.confirmed)
            .map(|h| h.press)
            .collect()
    }

    fn drain_pressed(&mut self) -> ArrayVec<KeyPress, MAX_TRACKED_KEYS> {
        std::mem::take(&mut self.pressed)
    }
}
