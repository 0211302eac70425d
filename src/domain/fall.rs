/// Gravity sub-state of rocks and boxes.
///
/// ## Transition (evaluated once per block per tick, during the sweep)
/// ┌──────────────────────┬────────────┐
/// │ Cell directly below   │ Next state │
/// ├──────────────────────┼────────────┤
/// │ Air                   │ Falling    │
/// │ anything else         │ Resting    │
/// └──────────────────────┴────────────┘
///
/// Falling: drops one row this tick, ignores horizontal pushes.
/// Resting: stays put, a horizontal push is attempted.

use super::tile::{Cell, Reaction};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum FallState {
    Falling,
    Resting,
}

impl FallState {
    /// State of a block whose lower neighbour is `below`.
    pub fn beneath(below: Cell) -> FallState {
        if below.is_air() {
            FallState::Falling
        } else {
            FallState::Resting
        }
    }

    pub fn is_falling(self) -> bool {
        self == FallState::Falling
    }

    /// Reaction of a block in this state to a horizontal push.
    pub fn move_horizontal(self, block: Cell, dx: i32) -> Reaction {
        match self {
            FallState::Falling => Reaction::Blocked,
            FallState::Resting => Reaction::Push { block, dx },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::key::KeyFamily;

    #[test]
    fn air_below_means_falling() {
        assert_eq!(FallState::beneath(Cell::Air), FallState::Falling);
    }

    #[test]
    fn anything_else_below_means_resting() {
        for below in [
            Cell::Flux,
            Cell::Unbreakable,
            Cell::PlayerMarker,
            Cell::Rock(FallState::Falling),
            Cell::Box(FallState::Resting),
            Cell::Key(KeyFamily::One),
            Cell::Lock(KeyFamily::Two),
        ] {
            assert_eq!(FallState::beneath(below), FallState::Resting, "{below:?}");
        }
    }

    #[test]
    fn falling_block_rejects_push() {
        let rock = Cell::Rock(FallState::Falling);
        assert_eq!(FallState::Falling.move_horizontal(rock, 1), Reaction::Blocked);
    }

    #[test]
    fn resting_block_accepts_push() {
        let rock = Cell::Rock(FallState::Resting);
        assert_eq!(
            FallState::Resting.move_horizontal(rock, -1),
            Reaction::Push { block: rock, dx: -1 }
        );
    }
}
