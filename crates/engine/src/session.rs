//! Tick orchestrator - drives a [`GameState`] on a fixed cadence.
//!
//! The host calls [`Session::frame`] once per display refresh with a
//! monotonic time in milliseconds. Elapsed time goes into an accumulator and
//! a tick runs each time it reaches the tick duration; the remainder carries
//! over to the next frame.
//!
//! States:
//!
//! - **Idle**: frames present but never tick. Presses that arrive while idle
//!   are discarded.
//! - **Running**: frames tick as time allows.
//!
//! Idle → Running on [`start`](Session::start); Running → Idle on
//! [`stop`](Session::stop) or when the level is cleared. Clearing fires the
//! lifecycle sink exactly once per game.

use tui_snakes_core::{GameSnapshot, GameState, LevelData, SetupError, StepReport};
use tui_snakes_input::{BindingTable, InputSource};

use crate::config::SessionConfig;
use crate::intents::collect_intents;

/// Receives one snapshot per rendered frame.
pub trait PresentationSink {
    fn present(&mut self, snapshot: &GameSnapshot);
}

impl<F: FnMut(&GameSnapshot)> PresentationSink for F {
    fn present(&mut self, snapshot: &GameSnapshot) {
        self(snapshot)
    }
}

/// Told when a level is cleared.
pub trait LifecycleSink {
    /// `level` is the cleared level's name.
    fn on_victory(&mut self, level: &str);
}

impl<F: FnMut(&str)> LifecycleSink for F {
    fn on_victory(&mut self, level: &str) {
        self(level)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionState {
    Idle,
    Running,
}

/// What one call to [`Session::frame`] did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameReport {
    pub ticks: u32,
    /// Report of the last tick run this frame, if any.
    pub last_step: Option<StepReport>,
    /// True if the level was cleared during this frame.
    pub victory: bool,
}

/// One level being played.
pub struct Session {
    level: LevelData,
    game: GameState,
    bindings: BindingTable,
    config: SessionConfig,
    state: SessionState,
    accumulator_ms: u64,
    last_frame_ms: Option<u64>,
    settled: bool,
    victory_fired: bool,
    snapshot: GameSnapshot,
    lifecycle: Option<Box<dyn LifecycleSink>>,
}

impl Session {
    /// Build an idle session for `level` with default key bindings.
    pub fn new(level: LevelData, config: SessionConfig) -> Result<Self, SetupError> {
        let game = GameState::from_level(&level)?;
        let bindings = BindingTable::defaults_for(game.snakes().iter().map(|s| s.id()));
        Ok(Self {
            level,
            game,
            bindings,
            config,
            state: SessionState::Idle,
            accumulator_ms: 0,
            last_frame_ms: None,
            settled: false,
            victory_fired: false,
            snapshot: GameSnapshot::default(),
            lifecycle: None,
        })
    }

    pub fn with_bindings(mut self, bindings: BindingTable) -> Self {
        self.bindings = bindings;
        self
    }

    pub fn with_lifecycle_sink(mut self, sink: impl LifecycleSink + 'static) -> Self {
        self.lifecycle = Some(Box::new(sink));
        self
    }

    pub fn game(&self) -> &GameState {
        &self.game
    }

    pub fn level(&self) -> &LevelData {
        &self.level
    }

    pub fn bindings(&self) -> &BindingTable {
        &self.bindings
    }

    pub fn config(&self) -> SessionConfig {
        self.config
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == SessionState::Running
    }

    /// Latest snapshot handed to the presentation sink.
    pub fn snapshot(&self) -> &GameSnapshot {
        &self.snapshot
    }

    /// Begin or resume ticking. The first start runs one gravity pass so
    /// snakes begin at rest.
    ///
    /// Does nothing if already running or if victory was already signalled.
    /// A level with no apples still runs its first tick so the victory
    /// callback fires.
    pub fn start(&mut self, now_ms: u64) {
        if self.is_running() {
            return;
        }
        if self.victory_fired {
            log::info!("{} is already cleared; restart to play again", self.level.name);
            return;
        }
        if !self.settled {
            self.game.settle();
            self.settled = true;
        }
        self.state = SessionState::Running;
        self.accumulator_ms = 0;
        self.last_frame_ms = Some(now_ms);
        log::info!("session started: {}", self.level.name);
    }

    /// Stop ticking. Any tick already due is dropped.
    pub fn stop(&mut self) {
        if !self.is_running() {
            return;
        }
        self.state = SessionState::Idle;
        self.accumulator_ms = 0;
        self.last_frame_ms = None;
        log::info!("session stopped: {}", self.level.name);
    }

    /// Rebuild the current level from scratch and start it.
    pub fn restart(&mut self, now_ms: u64) -> Result<(), SetupError> {
        let level = self.level.clone();
        self.load_level(level, now_ms)
    }

    /// Replace the level, reset key bindings to the defaults and start.
    pub fn load_level(&mut self, level: LevelData, now_ms: u64) -> Result<(), SetupError> {
        let game = GameState::from_level(&level)?;
        self.bindings = BindingTable::defaults_for(game.snakes().iter().map(|s| s.id()));
        self.level = level;
        self.game = game;
        self.state = SessionState::Idle;
        self.settled = false;
        self.victory_fired = false;
        self.start(now_ms);
        Ok(())
    }

    /// Advance time to `now_ms`, run due ticks and present the result.
    pub fn frame<I, P>(&mut self, now_ms: u64, input: &mut I, presenter: &mut P) -> FrameReport
    where
        I: InputSource + ?Sized,
        P: PresentationSink + ?Sized,
    {
        let mut report = FrameReport::default();

        if self.is_running() {
            let elapsed = self
                .last_frame_ms
                .map_or(0, |last| now_ms.saturating_sub(last));
            self.last_frame_ms = Some(now_ms);
            self.accumulator_ms += elapsed;

            let tick_ms = u64::from(self.config.tick_ms.max(1));
            while self.accumulator_ms >= tick_ms && report.ticks < self.config.max_ticks_per_frame {
                self.accumulator_ms -= tick_ms;
                report.ticks += 1;
                let step = self.tick(input);
                let cleared = step.cleared;
                report.last_step = Some(step);
                if cleared {
                    report.victory = self.finish();
                    break;
                }
            }
            // Drop whole periods we could not catch up on, keep the remainder.
            if self.accumulator_ms >= tick_ms {
                log::debug!(
                    "dropping {} ms of backlog",
                    self.accumulator_ms - self.accumulator_ms % tick_ms
                );
                self.accumulator_ms %= tick_ms;
            }
        } else {
            let _ = input.drain_pressed();
        }

        self.game.snapshot_into(&mut self.snapshot);
        self.snapshot.running = self.is_running();
        presenter.present(&self.snapshot);
        report
    }

    fn tick<I: InputSource + ?Sized>(&mut self, input: &mut I) -> StepReport {
        let pressed = input.drain_pressed();
        let held = input.held();
        let intents = collect_intents(&self.bindings, &pressed, &held);
        self.game.step(&intents)
    }

    /// Level cleared: go idle and notify once. Returns true if notified now.
    fn finish(&mut self) -> bool {
        self.state = SessionState::Idle;
        self.accumulator_ms = 0;
        self.last_frame_ms = None;
        if self.victory_fired {
            return false;
        }
        self.victory_fired = true;
        log::info!("level cleared: {}", self.level.name);
        if let Some(sink) = self.lifecycle.as_mut() {
            sink.on_victory(&self.level.name);
        }
        true
    }
}
