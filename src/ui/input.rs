/// Keyboard reader.
///
/// Drains every pending terminal event once per frame. Movement keys become
/// `Input` commands in arrival order; everything else is kept as a plain
/// key press for the meta handler (pause, restart, quit).
///
/// Press and Repeat both count, so holding an arrow key keeps queueing
/// moves at the terminal's repeat rate. Release events are ignored.

use std::time::Duration;

use crossterm::event::{self, poll, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::domain::input::Input;

pub struct InputState {
    /// Movement commands seen this frame, oldest first.
    commands: Vec<Input>,
    /// Non-movement key presses seen this frame.
    presses: Vec<KeyCode>,
    ctrl_c: bool,
}

impl InputState {
    pub fn new() -> Self {
        InputState {
            commands: Vec::with_capacity(8),
            presses: Vec::with_capacity(8),
            ctrl_c: false,
        }
    }

    /// Read all available events without blocking.
    /// Call once per frame, before the simulation tick.
    pub fn drain_events(&mut self) {
        self.commands.clear();
        self.presses.clear();
        self.ctrl_c = false;

        while poll(Duration::ZERO).unwrap_or(false) {
            match event::read() {
                Ok(Event::Key(key)) => self.record(key),
                Ok(_) => {}
                Err(e) => {
                    log::warn!("terminal event read failed: {e}");
                    break;
                }
            }
        }
    }

    fn record(&mut self, key: KeyEvent) {
        if key.kind == KeyEventKind::Release {
            return;
        }
        if key.modifiers.contains(KeyModifiers::CONTROL)
            && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('C'))
        {
            self.ctrl_c = true;
            return;
        }
        match movement_for(key.code) {
            Some(input) => self.commands.push(input),
            None => self.presses.push(key.code),
        }
    }

    /// Movement commands of this frame, in arrival order.
    pub fn commands(&self) -> &[Input] {
        &self.commands
    }

    /// Was any of these keys pressed this frame?
    pub fn any_pressed(&self, codes: &[KeyCode]) -> bool {
        codes.iter().any(|c| self.presses.contains(c))
    }

    pub fn ctrl_c_pressed(&self) -> bool {
        self.ctrl_c
    }
}

// ── Key Constants ──

const KEYS_LEFT: &[KeyCode] = &[KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')];
const KEYS_RIGHT: &[KeyCode] = &[KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')];
const KEYS_UP: &[KeyCode] = &[KeyCode::Up, KeyCode::Char('w'), KeyCode::Char('W')];
const KEYS_DOWN: &[KeyCode] = &[KeyCode::Down, KeyCode::Char('s'), KeyCode::Char('S')];

pub const KEYS_PAUSE: &[KeyCode] = &[KeyCode::F(1), KeyCode::Char('p'), KeyCode::Char('P')];
pub const KEYS_RESTART: &[KeyCode] = &[KeyCode::Char('r'), KeyCode::Char('R')];
pub const KEYS_QUIT: &[KeyCode] = &[KeyCode::Esc, KeyCode::Char('q'), KeyCode::Char('Q')];

/// Direction bound to a key, if any.
pub fn movement_for(code: KeyCode) -> Option<Input> {
    if KEYS_LEFT.contains(&code) {
        Some(Input::Left)
    } else if KEYS_RIGHT.contains(&code) {
        Some(Input::Right)
    } else if KEYS_UP.contains(&code) {
        Some(Input::Up)
    } else if KEYS_DOWN.contains(&code) {
        Some(Input::Down)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn arrows_and_wasd_map_to_moves() {
        assert_eq!(movement_for(KeyCode::Left), Some(Input::Left));
        assert_eq!(movement_for(KeyCode::Char('d')), Some(Input::Right));
        assert_eq!(movement_for(KeyCode::Char('W')), Some(Input::Up));
        assert_eq!(movement_for(KeyCode::Down), Some(Input::Down));
        assert_eq!(movement_for(KeyCode::Char('r')), None);
    }

    #[test]
    fn commands_keep_arrival_order() {
        let mut st = InputState::new();
        st.record(press(KeyCode::Right));
        st.record(press(KeyCode::Char('r')));
        st.record(press(KeyCode::Up));
        assert_eq!(st.commands(), &[Input::Right, Input::Up]);
        assert!(st.any_pressed(KEYS_RESTART));
        assert!(!st.any_pressed(KEYS_QUIT));
    }

    #[test]
    fn releases_are_ignored() {
        let mut st = InputState::new();
        let mut ev = press(KeyCode::Left);
        ev.kind = KeyEventKind::Release;
        st.record(ev);
        assert!(st.commands().is_empty());
    }

    #[test]
    fn ctrl_c_is_detected() {
        let mut st = InputState::new();
        st.record(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(st.ctrl_c_pressed());
        assert!(st.commands().is_empty());
    }
}
