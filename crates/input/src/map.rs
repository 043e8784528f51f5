//! Key mapping from terminal events to logical keys and session controls.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::keys::KeyState;
use crate::types::Key;

/// Session-level commands that bypass the snake bindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlAction {
    Quit,
    Pause,
    Restart,
    NextLevel,
}

/// Map a terminal key code to a logical key.
pub fn map_key_code(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::Up => Some(Key::Up),
        KeyCode::Down => Some(Key::Down),
        KeyCode::Left => Some(Key::Left),
        KeyCode::Right => Some(Key::Right),
        KeyCode::Char(ch) => Some(Key::char(ch)),
        _ => None,
    }
}

/// Map keyboard input to session controls.
pub fn control_action(key: KeyEvent) -> Option<ControlAction> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    if should_quit(key) {
        return Some(ControlAction::Quit);
    }
    match key.code {
        KeyCode::Char('p') | KeyCode::Char('P') | KeyCode::Esc => Some(ControlAction::Pause),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(ControlAction::Restart),
        KeyCode::Char('n') | KeyCode::Char('N') => Some(ControlAction::NextLevel),
        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

/// Feed one terminal event into `keys`.
///
/// Control keys are not recorded. Focus loss clears both key sets.
pub fn route_event(keys: &mut KeyState, event: &Event, now_ms: u64) -> Option<ControlAction> {
    match event {
        Event::Key(key) => {
            if let Some(action) = control_action(*key) {
                return Some(action);
            }
            let logical = map_key_code(key.code)?;
            if key.modifiers.contains(KeyModifiers::CONTROL) {
                return None;
            }
            match key.kind {
                KeyEventKind::Press => keys.press(logical, now_ms),
                KeyEventKind::Repeat => keys.repeat(logical, now_ms),
                KeyEventKind::Release => keys.release(logical),
            }
            None
        }
        Event::FocusLost => {
            keys.clear();
            None
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::InputSource;
    use crossterm::event::KeyEventState;

    fn release(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn test_movement_keys() {
        assert_eq!(map_key_code(KeyCode::Left), Some(Key::Left));
        assert_eq!(map_key_code(KeyCode::Right), Some(Key::Right));
        assert_eq!(map_key_code(KeyCode::Up), Some(Key::Up));
        assert_eq!(map_key_code(KeyCode::Down), Some(Key::Down));
        assert_eq!(map_key_code(KeyCode::Char('W')), Some(Key::Char('w')));
        assert_eq!(map_key_code(KeyCode::Enter), None);
    }

    #[test]
    fn test_control_keys() {
        assert_eq!(
            control_action(KeyEvent::from(KeyCode::Char('p'))),
            Some(ControlAction::Pause)
        );
        assert_eq!(
            control_action(KeyEvent::from(KeyCode::Char('R'))),
            Some(ControlAction::Restart)
        );
        assert_eq!(
            control_action(KeyEvent::from(KeyCode::Char('n'))),
            Some(ControlAction::NextLevel)
        );
        assert_eq!(control_action(KeyEvent::from(KeyCode::Char('w'))), None);
        assert_eq!(control_action(release(KeyCode::Char('p'))), None);
    }

    #[test]
    fn test_quit_keys() {
        assert!(should_quit(KeyEvent::from(KeyCode::Char('q'))));
        assert!(should_quit(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('x'))));
    }

    #[test]
    fn test_route_press_and_release() {
        let mut keys = KeyState::new().with_key_release_timeout_ms(0);

        let action = route_event(&mut keys, &Event::Key(KeyEvent::from(KeyCode::Char('a'))), 0);
        assert_eq!(action, None);
        assert!(keys.is_held(Key::Char('a')));

        route_event(&mut keys, &Event::Key(release(KeyCode::Char('a'))), 10);
        assert!(!keys.is_held(Key::Char('a')));
        assert_eq!(keys.drain_pressed().len(), 1);
    }

    #[test]
    fn test_route_controls_are_not_recorded() {
        let mut keys = KeyState::new();
        let action = route_event(&mut keys, &Event::Key(KeyEvent::from(KeyCode::Char('q'))), 0);
        assert_eq!(action, Some(ControlAction::Quit));
        assert!(keys.drain_pressed().is_empty());
    }

    #[test]
    fn test_focus_lost_clears() {
        let mut keys = KeyState::new();
        route_event(&mut keys, &Event::Key(KeyEvent::from(KeyCode::Up)), 0);
        route_event(&mut keys, &Event::FocusLost, 5);
        assert!(keys.held().is_empty());
        assert!(keys.drain_pressed().is_empty());
    }
}
