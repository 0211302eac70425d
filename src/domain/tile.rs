/// Cell variants and their capabilities.
/// The grid and the player only ever look at a cell through the methods
/// below, so every tile rule lives in this file.

use super::fall::FallState;
use super::key::KeyFamily;
use super::paint::{self, CellPainter};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Cell {
    Air,
    Flux,           // Diggable dirt, eaten on entry
    Unbreakable,    // Wall
    PlayerMarker,   // Grid copy of the tracked player position
    Rock(FallState),
    Box(FallState),
    Key(KeyFamily),
    Lock(KeyFamily),
}

/// What happens when the player tries to step into a cell.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Reaction {
    /// Player relocates into the cell.
    Enter,
    /// Nothing happens.
    Blocked,
    /// Remove every lock of the family, then relocate into the cell.
    CollectKey(KeyFamily),
    /// Try to shove `block` one column further by `dx`.
    Push { block: Cell, dx: i32 },
}

impl Cell {
    pub fn is_air(self) -> bool {
        matches!(self, Cell::Air)
    }

    pub fn is_flux(self) -> bool {
        matches!(self, Cell::Flux)
    }

    /// Can the player walk in without resistance?
    pub fn is_edible(self) -> bool {
        matches!(self, Cell::Air | Cell::Flux)
    }

    pub fn is_pushable(self) -> bool {
        matches!(self, Cell::Rock(_) | Cell::Box(_))
    }

    pub fn is_key1(self) -> bool {
        matches!(self, Cell::Key(KeyFamily::One))
    }

    pub fn is_key2(self) -> bool {
        matches!(self, Cell::Key(KeyFamily::Two))
    }

    pub fn is_lock1(self) -> bool {
        matches!(self, Cell::Lock(KeyFamily::One))
    }

    pub fn is_lock2(self) -> bool {
        matches!(self, Cell::Lock(KeyFamily::Two))
    }

    pub fn is_player(self) -> bool {
        matches!(self, Cell::PlayerMarker)
    }

    pub fn is_falling(self) -> bool {
        self.fall_state().map_or(false, FallState::is_falling)
    }

    /// Gravity state, for the cells that have one.
    pub fn fall_state(self) -> Option<FallState> {
        match self {
            Cell::Rock(s) | Cell::Box(s) => Some(s),
            _ => None,
        }
    }

    /// The same block carrying a different gravity state.
    /// Cells without gravity are returned unchanged.
    pub fn with_fall_state(self, state: FallState) -> Cell {
        match self {
            Cell::Rock(_) => Cell::Rock(state),
            Cell::Box(_) => Cell::Box(state),
            other => other,
        }
    }

    /// Initial state of a block placed directly on top of this cell.
    pub fn block_on_top_state(self) -> FallState {
        match self {
            Cell::Air | Cell::Key(_) => FallState::Falling,
            Cell::Flux
            | Cell::Unbreakable
            | Cell::PlayerMarker
            | Cell::Rock(_)
            | Cell::Box(_)
            | Cell::Lock(_) => FallState::Resting,
        }
    }

    /// Reaction to the player moving into this cell sideways.
    pub fn move_horizontal(self, dx: i32) -> Reaction {
        match self {
            Cell::Air | Cell::Flux => Reaction::Enter,
            Cell::Unbreakable | Cell::PlayerMarker | Cell::Lock(_) => Reaction::Blocked,
            Cell::Key(family) => Reaction::CollectKey(family),
            Cell::Rock(state) | Cell::Box(state) => state.move_horizontal(self, dx),
        }
    }

    /// Reaction to the player moving into this cell from above or below.
    /// Blocks cannot be pushed vertically.
    pub fn move_vertical(self, _dy: i32) -> Reaction {
        match self {
            Cell::Air | Cell::Flux => Reaction::Enter,
            Cell::Key(family) => Reaction::CollectKey(family),
            Cell::Unbreakable
            | Cell::PlayerMarker
            | Cell::Lock(_)
            | Cell::Rock(_)
            | Cell::Box(_) => Reaction::Blocked,
        }
    }

    /// Paint this cell at grid position (x, y).
    /// Air and the player marker paint nothing; the player is an overlay.
    pub fn draw(self, g: &mut impl CellPainter, x: usize, y: usize) {
        let color = match self {
            Cell::Air | Cell::PlayerMarker => return,
            Cell::Flux => paint::FLUX_COLOR,
            Cell::Unbreakable => paint::UNBREAKABLE_COLOR,
            Cell::Rock(_) => paint::ROCK_COLOR,
            Cell::Box(_) => paint::BOX_COLOR,
            Cell::Key(family) | Cell::Lock(family) => family.config().color,
        };
        g.set_fill_color(color);
        g.fill_cell_rect(x, y);
    }
}

impl Default for Cell {
    fn default() -> Self {
        Cell::Air
    }
}
