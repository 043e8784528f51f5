//! Keys to per-snake intents.
//!
//! Pressed and held keys are merged (latest sequence per key) and walked
//! newest first. Each snake takes the first of its bound keys it meets, so
//! when several of a snake's keys are active the most recently pressed one
//! wins.

use arrayvec::ArrayVec;

use tui_snakes_core::Intent;
use tui_snakes_input::{BindingTable, KeyPress, MAX_TRACKED_KEYS};

use crate::types::MAX_SNAKES;

/// Capacity of the merged pressed + held key list.
pub const MERGED_KEYS: usize = MAX_TRACKED_KEYS * 2;

/// Merge `pressed` and `held` into a newest-first key list.
pub fn merge_keys(pressed: &[KeyPress], held: &[KeyPress]) -> ArrayVec<KeyPress, MERGED_KEYS> {
    let mut merged: ArrayVec<KeyPress, MERGED_KEYS> = ArrayVec::new();
    for press in pressed.iter().chain(held) {
        match merged.iter_mut().find(|p| p.key == press.key) {
            Some(existing) => existing.seq = existing.seq.max(press.seq),
            None => {
                let _ = merged.try_push(*press);
            }
        }
    }
    merged.sort_unstable_by(|a, b| b.seq.cmp(&a.seq));
    merged
}

/// At most one intent per bound snake for this tick.
pub fn collect_intents(
    bindings: &BindingTable,
    pressed: &[KeyPress],
    held: &[KeyPress],
) -> ArrayVec<Intent, MAX_SNAKES> {
    let mut intents: ArrayVec<Intent, MAX_SNAKES> = ArrayVec::new();
    for press in merge_keys(pressed, held) {
        for table in bindings.iter() {
            if intents.iter().any(|i| i.snake == table.snake()) {
                continue;
            }
            if let Some(direction) = table.direction_for(press.key) {
                let _ = intents.try_push(Intent::new(table.snake(), direction));
            }
        }
        if intents.is_full() {
            break;
        }
    }
    intents
}
