/// GameState: everything the tick actor owns.
///
/// One value, created at load and passed by `&mut` into `step` and by
/// `&` into `draw`. No other code holds the map or the input queue.

use crate::domain::input::{Input, InputQueue};
use super::level::{self, LevelDef, LevelError};
use super::map::Map;

pub struct GameState {
    pub map: Map,
    pub inputs: InputQueue,
    pub tick: u64,
    pub paused: bool,

    // ── UI ──
    pub message: String,
    pub message_timer: u32,

    /// Descriptor the map was decoded from, kept for `restart`.
    level: LevelDef,
}

impl GameState {
    pub fn new(level: LevelDef) -> Result<Self, LevelError> {
        let map = level::decode(&level)?;
        Ok(GameState {
            map,
            inputs: InputQueue::new(),
            tick: 0,
            paused: false,
            message: String::new(),
            message_timer: 0,
            level,
        })
    }

    pub fn level_name(&self) -> &str {
        &self.level.name
    }

    /// Queue a command for the next tick. Dropped while paused.
    pub fn push_input(&mut self, input: Input) {
        if !self.paused {
            self.inputs.push(input);
        }
    }

    /// Reload the level from its descriptor and forget pending input.
    pub fn restart(&mut self) -> Result<(), LevelError> {
        self.map = level::decode(&self.level)?;
        self.inputs.clear();
        self.tick = 0;
        log::info!("restarted level {:?}", self.level.name);
        Ok(())
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
        if self.paused {
            self.inputs.clear();
            self.set_message("PAUSED  [F1] Resume", 0);
        } else {
            self.message.clear();
            self.message_timer = 0;
        }
    }

    pub fn set_message(&mut self, msg: &str, duration: u32) {
        self.message = msg.to_string();
        self.message_timer = duration;
    }

    /// Count down the transient message. A zero timer means "until cleared".
    pub fn tick_message(&mut self) {
        if self.message_timer > 0 {
            self.message_timer -= 1;
            if self.message_timer == 0 {
                self.message.clear();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entity::Player;
    use crate::sim::level::embedded_level;

    #[test]
    fn new_rejects_bad_level() {
        let def = LevelDef::new("bad", &[&[0, 42]]);
        assert!(matches!(
            GameState::new(def),
            Err(LevelError::InvalidCode { code: 42, .. })
        ));
    }

    #[test]
    fn restart_restores_the_descriptor() {
        let mut state = GameState::new(embedded_level()).unwrap();
        let fresh = state.map.clone();
        state.map.move_horizontal(1, &mut vec![]);
        state.push_input(Input::Down);
        state.tick = 7;
        assert_ne!(state.map, fresh);

        state.restart().unwrap();
        assert_eq!(state.map, fresh);
        assert!(state.inputs.is_empty());
        assert_eq!(state.tick, 0);
        assert_eq!(*state.map.player(), Player::new(1, 1));
    }

    #[test]
    fn paused_state_drops_input() {
        let mut state = GameState::new(embedded_level()).unwrap();
        state.push_input(Input::Right);
        state.toggle_pause();
        assert!(state.inputs.is_empty());
        state.push_input(Input::Right);
        assert!(state.inputs.is_empty());
        state.toggle_pause();
        state.push_input(Input::Right);
        assert_eq!(state.inputs.len(), 1);
    }

    #[test]
    fn message_expires() {
        let mut state = GameState::new(embedded_level()).unwrap();
        state.set_message("hi", 2);
        state.tick_message();
        assert_eq!(state.message, "hi");
        state.tick_message();
        assert!(state.message.is_empty());
    }
}
