//! Engine module - timing and orchestration around the pure core.
//!
//! Turns wall-clock frames and keyboard state into discrete ticks of a
//! [`GameState`](tui_snakes_core::GameState):
//!
//! - [`intents`]: pressed/held keys to one intent per snake
//! - [`session`]: Idle/Running state machine, fixed-step accumulator,
//!   presentation and lifecycle sinks
//! - [`config`]: tick duration and catch-up limits

pub mod config;
pub mod intents;
pub mod session;

pub use tui_snakes_types as types;

pub use config::SessionConfig;
pub use intents::{collect_intents, merge_keys};
pub use session::{FrameReport, LifecycleSink, PresentationSink, Session, SessionState};
