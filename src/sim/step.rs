/// The step function: advances the game by one tick.
///
/// Processing order:
///   1. Drain the input queue, newest command first
///   2. Gravity sweep over the grid (bottom row → top row)
///
/// `draw` is separate and read-only: clear, paint every cell, paint the
/// player on top.

use crate::domain::paint::CellPainter;
use super::event::GameEvent;
use super::world::GameState;

// ══════════════════════════════════════════════════════════════
// Main entry points
// ══════════════════════════════════════════════════════════════

pub fn step(state: &mut GameState) -> Vec<GameEvent> {
    if state.paused { return vec![]; }

    let mut events: Vec<GameEvent> = Vec::new();
    state.tick += 1;
    state.tick_message();

    handle_inputs(state, &mut events);
    state.map.update(&mut events);

    debug_assert!(state.map.player_in_sync(), "player marker out of sync at tick {}", state.tick);
    events
}

pub fn draw(state: &GameState, g: &mut impl CellPainter) {
    g.clear();
    state.map.draw(g);
}

fn handle_inputs(state: &mut GameState, events: &mut Vec<GameEvent>) {
    while let Some(input) = state.inputs.pop() {
        state.map.handle_input(input, events);
    }
}

// ══════════════════════════════════════════════════════════════
// Unit tests
// ══════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entity::Player;
    use crate::domain::fall::FallState;
    use crate::domain::input::Input;
    use crate::domain::key::KeyFamily;
    use crate::domain::paint::testing::{Call, RecordingPainter};
    use crate::domain::paint;
    use crate::domain::tile::Cell;
    use crate::sim::level::{embedded_level, LevelDef};

    fn state_from(rows: &[&[i32]]) -> GameState {
        GameState::new(LevelDef::new("test", rows)).unwrap()
    }

    #[test]
    fn sample_level_right_then_tick() {
        let mut state = GameState::new(embedded_level()).unwrap();
        let start = *state.map.player();
        state.push_input(Input::Right);
        step(&mut state);
        assert_eq!(*state.map.player(), Player::new(start.x + 1, start.y));
        assert_eq!(state.map.tile_at(start.x, start.y), Cell::Air);
        assert!(state.map.player_in_sync());
        assert!(state.inputs.is_empty());
    }

    #[test]
    fn inputs_drain_last_in_first_out() {
        // Up is applied first, then both Rights hit the wall.
        // FIFO would end at (3, 1) instead.
        let mut state = state_from(&[
            &[2, 2, 2, 2, 2],
            &[2, 0, 2, 0, 2],
            &[2, 3, 0, 0, 2],
            &[2, 2, 2, 2, 2],
        ]);
        state.push_input(Input::Right);
        state.push_input(Input::Right);
        state.push_input(Input::Up);
        step(&mut state);
        assert_eq!(*state.map.player(), Player::new(1, 1));
        assert_eq!(state.map.tile_at(1, 2), Cell::Air);
        assert_eq!(state.map.tile_at(2, 2), Cell::Air);
        assert!(state.map.player_in_sync());
    }

    #[test]
    fn idle_tick_without_falling_blocks_is_a_no_op() {
        let mut state = GameState::new(embedded_level()).unwrap();
        // First tick settles the loaded state; after that nothing may change.
        step(&mut state);
        let before = state.map.clone();
        for _ in 0..5 {
            let events = step(&mut state);
            assert!(events.is_empty());
            assert_eq!(state.map, before);
        }
    }

    #[test]
    fn key_pickup_opens_locks_the_same_tick() {
        let mut state = state_from(&[
            &[2, 2, 2, 2, 2, 2],
            &[2, 3, 8, 0, 9, 2],
            &[2, 9, 11, 9, 1, 2],
            &[2, 2, 2, 2, 2, 2],
        ]);
        state.push_input(Input::Right);
        let events = step(&mut state);
        assert_eq!(*state.map.player(), Player::new(2, 1));
        assert_eq!(state.map.tile_at(4, 1), Cell::Air);
        assert_eq!(state.map.tile_at(1, 2), Cell::Air);
        assert_eq!(state.map.tile_at(3, 2), Cell::Air);
        assert_eq!(state.map.tile_at(2, 2), Cell::Lock(KeyFamily::Two));
        assert!(events.contains(&GameEvent::KeyCollected { family: KeyFamily::One, x: 2, y: 1 }));
        assert!(events.contains(&GameEvent::LocksOpened { family: KeyFamily::One, count: 3 }));
    }

    #[test]
    fn block_falls_the_tick_its_support_leaves() {
        let mut state = state_from(&[
            &[2, 2, 2, 2],
            &[2, 0, 4, 2],
            &[2, 0, 3, 2],
            &[2, 2, 2, 2],
        ]);
        state.push_input(Input::Left);
        let events = step(&mut state);
        assert_eq!(*state.map.player(), Player::new(1, 2));
        assert_eq!(state.map.tile_at(2, 1), Cell::Air);
        assert_eq!(state.map.tile_at(2, 2), Cell::Rock(FallState::Falling));
        assert!(events.contains(&GameEvent::BlockStartedFalling { x: 2, y: 1 }));
        assert!(state.map.player_in_sync());
    }

    #[test]
    fn paused_step_does_nothing() {
        let mut state = GameState::new(embedded_level()).unwrap();
        state.push_input(Input::Right);
        state.toggle_pause();
        let before = state.map.clone();
        assert!(step(&mut state).is_empty());
        assert_eq!(state.map, before);
        assert_eq!(state.tick, 0);
    }

    #[test]
    fn player_marker_stays_in_sync_over_a_session() {
        let mut state = GameState::new(embedded_level()).unwrap();
        let script = [
            Input::Right, Input::Right, Input::Right, Input::Down,
            Input::Down, Input::Left, Input::Left, Input::Up,
            Input::Down, Input::Right, Input::Right, Input::Right,
        ];
        for input in script {
            state.push_input(input);
            step(&mut state);
            assert!(state.map.player_in_sync(), "after {input:?}");
        }
    }

    #[test]
    fn draw_clears_first_and_paints_player_last() {
        let state = GameState::new(embedded_level()).unwrap();
        let mut g = RecordingPainter::default();
        draw(&state, &mut g);
        assert_eq!(g.calls.first(), Some(&Call::Clear));
        assert_eq!(g.fills().last(), Some(&(paint::PLAYER_COLOR, 1, 1)));
    }
}
