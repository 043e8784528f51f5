//! Terminal snakes runner (default binary).
//!
//! Environment:
//! - `SNAKES_LEVEL`: built-in level to start on (1-based)
//! - `SNAKES_LEVEL_FILE`: play a single level loaded from JSON instead
//! - `SNAKES_TICK_MS`, `SNAKES_MAX_TICKS_PER_FRAME`: session timing
//! - `RUST_LOG`: log filter (logs go to stderr; redirect it to a file)

use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use anyhow::{bail, Context, Result};
use crossterm::event::{self, Event};

use tui_snakes::core::{builtin_levels, next_level_index, GameSnapshot, LevelData};
use tui_snakes::engine::{PresentationSink, Session, SessionConfig};
use tui_snakes::input::{route_event, ControlAction, KeyState};
use tui_snakes::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};

/// Poll interval between frames.
const FRAME_MS: u64 = 16;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("off")).init();

    let levels = load_levels()?;
    let first = start_index(levels.len());
    let config = SessionConfig::from_env();

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let cleared = Rc::new(RefCell::new(Vec::new()));
    let result = run(&mut term, &levels, first, config, Rc::clone(&cleared));

    // Always try to restore terminal state.
    let _ = term.exit();

    let cleared = cleared.borrow();
    if !cleared.is_empty() {
        println!("Cleared: {}", cleared.join(", "));
    }
    result
}

fn load_levels() -> Result<Vec<LevelData>> {
    let Ok(path) = std::env::var("SNAKES_LEVEL_FILE") else {
        return Ok(builtin_levels());
    };
    let json = std::fs::read_to_string(&path).with_context(|| format!("reading {path}"))?;
    let mut level: LevelData =
        serde_json::from_str(&json).with_context(|| format!("parsing {path}"))?;
    if level.name.is_empty() {
        level.name = path;
    }
    Ok(vec![level])
}

fn start_index(count: usize) -> usize {
    let Ok(raw) = std::env::var("SNAKES_LEVEL") else {
        return 0;
    };
    match raw.trim().parse::<usize>() {
        Ok(n) if (1..=count).contains(&n) => n - 1,
        _ => {
            log::warn!("ignoring SNAKES_LEVEL={raw:?}: expected 1..={count}");
            0
        }
    }
}

/// Presentation sink that draws into the terminal.
struct TermPresenter<'a> {
    term: &'a mut TerminalRenderer,
    view: GameView,
    fb: FrameBuffer,
    error: Option<anyhow::Error>,
}

impl PresentationSink for TermPresenter<'_> {
    fn present(&mut self, snapshot: &GameSnapshot) {
        if self.error.is_some() {
            return;
        }
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        self.view.render_into(snapshot, Viewport::new(w, h), &mut self.fb);
        if let Err(err) = self.term.draw_swap(&mut self.fb) {
            self.error = Some(err);
        }
    }
}

fn run(
    term: &mut TerminalRenderer,
    levels: &[LevelData],
    first: usize,
    config: SessionConfig,
    cleared: Rc<RefCell<Vec<String>>>,
) -> Result<()> {
    if levels.is_empty() {
        bail!("no levels to play");
    }
    let clock = Instant::now();
    let now_ms = || clock.elapsed().as_millis() as u64;

    let mut index = first;
    let mut session = Session::new(levels[index].clone(), config)
        .with_context(|| format!("loading {}", levels[index].name))?
        .with_lifecycle_sink(move |level: &str| cleared.borrow_mut().push(level.to_string()));

    let mut keys = KeyState::new();
    if term.key_release_events() {
        keys = keys.with_key_release_timeout_ms(0);
    }

    let mut presenter = TermPresenter {
        term,
        view: GameView::default(),
        fb: FrameBuffer::new(0, 0),
        error: None,
    };

    session.start(now_ms());

    loop {
        let now = now_ms();
        keys.expire_held(now);
        session.frame(now, &mut keys, &mut presenter);
        if let Some(err) = presenter.error.take() {
            return Err(err);
        }

        if !event::poll(Duration::from_millis(FRAME_MS))? {
            continue;
        }
        loop {
            let ev = event::read()?;
            if let Event::Resize(..) = ev {
                presenter.term.invalidate();
            }
            let now = now_ms();
            match route_event(&mut keys, &ev, now) {
                Some(ControlAction::Quit) => return Ok(()),
                Some(ControlAction::Pause) => {
                    if session.is_running() {
                        session.stop();
                    } else {
                        session.start(now);
                    }
                }
                Some(ControlAction::Restart) => session.restart(now)?,
                Some(ControlAction::NextLevel) => {
                    index = next_level_index(index, levels.len());
                    session
                        .load_level(levels[index].clone(), now)
                        .with_context(|| format!("loading {}", levels[index].name))?;
                }
                None => {}
            }
            if !event::poll(Duration::ZERO)? {
                break;
            }
        }
    }
}
