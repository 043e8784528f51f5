//! End-to-end: terminal key events through the input router into a running
//! session, ticked by frames, out to a presentation sink.

use std::cell::RefCell;
use std::rc::Rc;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};

use tui_snakes::core::{GameSnapshot, LevelData};
use tui_snakes::engine::{Session, SessionConfig, SessionState};
use tui_snakes::input::{route_event, ControlAction, KeyState};
use tui_snakes::types::{Direction, Point, SnakeId, TICK_MS};

fn press(ch: char) -> Event {
    Event::Key(KeyEvent::new(KeyCode::Char(ch), KeyModifiers::NONE))
}

fn release(ch: char) -> Event {
    Event::Key(KeyEvent {
        code: KeyCode::Char(ch),
        modifiers: KeyModifiers::NONE,
        kind: KeyEventKind::Release,
        state: KeyEventState::NONE,
    })
}

fn corridor() -> LevelData {
    // Snake 0 rests on the floor, three cells left of the only apple.
    LevelData::new("Corridor", 6, 3, &["......", "......", "0..A.."])
}

fn keys() -> KeyState {
    KeyState::new().with_key_release_timeout_ms(0)
}

fn ignore(_: &GameSnapshot) {}

#[test]
fn held_key_walks_snake_to_victory() {
    let victories = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&victories);
    let mut session = Session::new(corridor(), SessionConfig::default())
        .unwrap()
        .with_lifecycle_sink(move |level: &str| sink.borrow_mut().push(level.to_string()));
    let mut keys = keys();
    session.start(0);

    assert_eq!(route_event(&mut keys, &press('d'), 10), None);

    let mut now = 0;
    let mut heads = Vec::new();
    let mut victory = false;
    for _ in 0..3 {
        now += TICK_MS as u64;
        let report = session.frame(now, &mut keys, &mut ignore);
        assert_eq!(report.ticks, 1);
        heads.push(session.game().snakes()[0].head());
        victory |= report.victory;
    }

    assert_eq!(heads, vec![Point::new(1, 2), Point::new(2, 2), Point::new(3, 2)]);
    assert!(victory);
    assert_eq!(session.state(), SessionState::Idle);
    assert_eq!(victories.borrow().as_slice(), &["Corridor".to_string()]);
    assert_eq!(session.game().snakes()[0].target_len(), 3);

    // Cleared levels do not start again until restarted.
    session.start(now);
    assert!(!session.is_running());
    session.restart(now).unwrap();
    assert!(session.is_running());
    assert_eq!(session.game().apples().len(), 1);
}

#[test]
fn released_key_stops_the_snake() {
    let mut session = Session::new(corridor(), SessionConfig::default()).unwrap();
    let mut keys = keys();
    session.start(0);

    route_event(&mut keys, &press('d'), 0);
    session.frame(150, &mut keys, &mut ignore);
    route_event(&mut keys, &release('d'), 160);
    session.frame(300, &mut keys, &mut ignore);
    session.frame(450, &mut keys, &mut ignore);

    assert_eq!(session.game().tick(), 3);
    assert_eq!(session.game().snakes()[0].head(), Point::new(1, 2));
}

#[test]
fn tap_between_ticks_still_moves() {
    let mut session = Session::new(corridor(), SessionConfig::default()).unwrap();
    let mut keys = keys();
    session.start(0);

    // Down and up again before the tick fires.
    route_event(&mut keys, &press('d'), 20);
    route_event(&mut keys, &release('d'), 40);
    session.frame(150, &mut keys, &mut ignore);

    assert_eq!(session.game().snakes()[0].head(), Point::new(1, 2));
}

#[test]
fn most_recent_key_wins() {
    let level = LevelData::new("Open", 7, 2, &["...0...", "#######"]);
    let mut session = Session::new(level, SessionConfig::default()).unwrap();
    let mut keys = keys();
    session.start(0);

    route_event(&mut keys, &press('a'), 10);
    route_event(&mut keys, &press('d'), 20);
    session.frame(150, &mut keys, &mut ignore);

    let snake = &session.game().snakes()[0];
    assert_eq!(snake.head(), Point::new(4, 0));
    assert_eq!(snake.direction(), Direction::Right);
}

#[test]
fn two_snakes_use_their_own_keys() {
    let level = LevelData::new("Pair", 8, 2, &["0......1", "########"]);
    let mut session = Session::new(level, SessionConfig::default()).unwrap();
    let mut keys = keys();
    session.start(0);

    route_event(&mut keys, &press('d'), 10);
    route_event(
        &mut keys,
        &Event::Key(KeyEvent::new(KeyCode::Left, KeyModifiers::NONE)),
        20,
    );
    session.frame(150, &mut keys, &mut ignore);

    let game = session.game();
    assert_eq!(game.snake(SnakeId::new(0)).unwrap().head(), Point::new(1, 0));
    assert_eq!(game.snake(SnakeId::new(1)).unwrap().head(), Point::new(6, 0));
}

#[test]
fn control_keys_are_not_movement() {
    let mut session = Session::new(corridor(), SessionConfig::default()).unwrap();
    let mut keys = keys();
    session.start(0);

    assert_eq!(route_event(&mut keys, &press('p'), 0), Some(ControlAction::Pause));
    assert_eq!(route_event(&mut keys, &press('q'), 0), Some(ControlAction::Quit));
    assert_eq!(route_event(&mut keys, &press('r'), 0), Some(ControlAction::Restart));
    assert_eq!(route_event(&mut keys, &press('n'), 0), Some(ControlAction::NextLevel));

    session.frame(150, &mut keys, &mut ignore);
    assert_eq!(session.game().snakes()[0].head(), Point::new(0, 2));
}

#[test]
fn paused_session_presents_but_does_not_tick() {
    let mut session = Session::new(corridor(), SessionConfig::default()).unwrap();
    let mut keys = keys();
    let mut frames = Vec::new();
    session.start(0);
    session.stop();

    route_event(&mut keys, &press('d'), 10);
    session.frame(1_000, &mut keys, &mut |snap: &GameSnapshot| {
        frames.push((snap.tick, snap.running))
    });

    assert_eq!(frames, vec![(0, false)]);
    assert_eq!(session.game().snakes()[0].head(), Point::new(0, 2));
}

#[test]
fn scenario_board_settles_on_start() {
    let mut rows = vec!["...............".to_string(); 11];
    rows.push("###############".to_string());
    rows[5].replace_range(5..6, "0");
    rows[4].replace_range(5..6, "A");
    let level = LevelData {
        name: "Drop".to_string(),
        width: 15,
        height: 12,
        layout: rows,
    };
    let mut session = Session::new(level, SessionConfig::default()).unwrap();
    session.start(0);

    let snap = session.game().snapshot();
    assert_eq!(snap.snakes[0].head(), Some(Point::new(5, 10)));
    assert_eq!(snap.apples, vec![Point::new(5, 4)]);
    assert!(!snap.cleared);
}
