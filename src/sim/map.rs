/// Map: the grid of cells plus the tracked player position.
///
/// ## Mutation rules
///
/// Cells are values. A transition replaces the cell in the array; nothing
/// edits a cell in place.
///
///   - `set_tile()`:       the only raw write, private to this file.
///   - `move_player_to()`: the only way the player moves. Clears the old
///                         marker, writes the new one and updates the
///                         tracked coordinates in one call.
///   - `drop()`:           block falls one row, vacated cell becomes Air.
///
/// Out-of-bounds reads return `Unbreakable`, so the map edge behaves like
/// a wall even on levels without a border.
///
/// ## Sweep order
///
/// `update()` visits rows bottom → top, columns left → right. A block that
/// drops lands on a row that was already visited, so it is never updated
/// twice in one tick, and a stack of blocks over a gap falls as one.

use crate::domain::entity::Player;
use crate::domain::fall::FallState;
use crate::domain::input::Input;
use crate::domain::key::KeyConfig;
use crate::domain::paint::{self, CellPainter};
use crate::domain::tile::{Cell, Reaction};
use super::event::GameEvent;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Map {
    cells: Vec<Vec<Cell>>,
    width: usize,
    height: usize,
    player: Player,
}

// ── Construction / queries ──

impl Map {
    /// Build from already validated rows. `player` must be the position of
    /// the one `PlayerMarker` in `cells`.
    pub(crate) fn from_cells(cells: Vec<Vec<Cell>>, player: Player) -> Self {
        let height = cells.len();
        let width = cells.first().map_or(0, |r| r.len());
        Map { cells, width, height, player }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    /// Cell at (x, y). Out of bounds = wall.
    #[inline]
    pub fn tile_at(&self, x: usize, y: usize) -> Cell {
        if x < self.width && y < self.height {
            self.cells[y][x]
        } else {
            Cell::Unbreakable
        }
    }

    #[inline]
    pub fn is_air(&self, x: usize, y: usize) -> bool {
        self.tile_at(x, y).is_air()
    }

    /// (x + dx, y + dy), or None when that leaves the map.
    fn offset(&self, x: usize, y: usize, dx: i32, dy: i32) -> Option<(usize, usize)> {
        let nx = x.checked_add_signed(dx as isize)?;
        let ny = y.checked_add_signed(dy as isize)?;
        if nx < self.width && ny < self.height {
            Some((nx, ny))
        } else {
            None
        }
    }

    /// Every grid position holding the player marker.
    pub fn player_markers(&self) -> Vec<(usize, usize)> {
        let mut found = vec![];
        for (y, row) in self.cells.iter().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                if cell.is_player() {
                    found.push((x, y));
                }
            }
        }
        found
    }

    /// Exactly one marker, sitting at the tracked position.
    pub fn player_in_sync(&self) -> bool {
        self.player_markers() == [(self.player.x, self.player.y)]
    }
}

// ── Primitive mutations ──

impl Map {
    #[inline]
    fn set_tile(&mut self, x: usize, y: usize, cell: Cell) {
        if x < self.width && y < self.height {
            self.cells[y][x] = cell;
        }
    }

    /// Relocate the player. Old cell becomes Air, new cell the marker.
    fn move_player_to(&mut self, nx: usize, ny: usize, events: &mut Vec<GameEvent>) {
        self.set_tile(self.player.x, self.player.y, Cell::Air);
        self.set_tile(nx, ny, Cell::PlayerMarker);
        self.player = Player::new(nx, ny);
        events.push(GameEvent::PlayerMoved { x: nx, y: ny });
    }

    /// Move `cell` from (x, y) one row down.
    fn drop(&mut self, x: usize, y: usize, cell: Cell) {
        self.set_tile(x, y + 1, cell);
        self.set_tile(x, y, Cell::Air);
    }

    /// Replace every cell the key removes with Air. Returns how many went.
    pub fn remove_locks(&mut self, key: &KeyConfig) -> usize {
        let mut removed = 0;
        for row in self.cells.iter_mut() {
            for cell in row.iter_mut() {
                if key.removes(*cell) {
                    *cell = Cell::Air;
                    removed += 1;
                }
            }
        }
        removed
    }
}

// ── Player commands ──

impl Map {
    pub fn handle_input(&mut self, input: Input, events: &mut Vec<GameEvent>) {
        match input.delta() {
            (dx, 0) => self.move_horizontal(dx, events),
            (0, dy) => self.move_vertical(dy, events),
            _ => {}
        }
    }

    pub fn move_horizontal(&mut self, dx: i32, events: &mut Vec<GameEvent>) {
        let Some((tx, ty)) = self.offset(self.player.x, self.player.y, dx, 0) else { return };
        let reaction = self.tile_at(tx, ty).move_horizontal(dx);
        self.apply(reaction, tx, ty, events);
    }

    pub fn move_vertical(&mut self, dy: i32, events: &mut Vec<GameEvent>) {
        let Some((tx, ty)) = self.offset(self.player.x, self.player.y, 0, dy) else { return };
        let reaction = self.tile_at(tx, ty).move_vertical(dy);
        self.apply(reaction, tx, ty, events);
    }

    fn apply(&mut self, reaction: Reaction, tx: usize, ty: usize, events: &mut Vec<GameEvent>) {
        match reaction {
            Reaction::Enter => self.move_player_to(tx, ty, events),
            Reaction::Blocked => {}
            Reaction::CollectKey(family) => {
                let count = self.remove_locks(family.config());
                log::debug!("key {family:?} at ({tx}, {ty}) opened {count} lock(s)");
                events.push(GameEvent::KeyCollected { family, x: tx, y: ty });
                events.push(GameEvent::LocksOpened { family, count });
                self.move_player_to(tx, ty, events);
            }
            Reaction::Push { block, dx } => self.push_horizontal(block, dx, events),
        }
    }

    /// Shove the block next to the player one column along `dx`.
    ///
    /// Succeeds iff the cell beyond the block is Air and the cell under that
    /// destination is not Air (a block is never pushed over a pit).
    /// On failure nothing changes.
    fn push_horizontal(&mut self, block: Cell, dx: i32, events: &mut Vec<GameEvent>) {
        let (px, py) = (self.player.x, self.player.y);
        let Some((bx, _)) = self.offset(px, py, dx, 0) else { return };
        let Some((dest_x, _)) = self.offset(px, py, 2 * dx, 0) else { return };

        if !self.is_air(dest_x, py) {
            return;
        }
        let below = self.tile_at(dest_x, py + 1);
        if below.is_air() {
            return;
        }

        self.set_tile(dest_x, py, block.with_fall_state(below.block_on_top_state()));
        log::debug!("pushed {block:?} to ({dest_x}, {py})");
        events.push(GameEvent::BlockPushed { x: dest_x, y: py });
        self.move_player_to(bx, py, events);
    }
}

// ── Per-tick sweeps ──

impl Map {
    /// Gravity pass over the whole grid, bottom row first.
    pub fn update(&mut self, events: &mut Vec<GameEvent>) {
        for y in (0..self.height).rev() {
            for x in 0..self.width {
                self.update_cell(x, y, events);
            }
        }
    }

    /// Recompute the block's state from the current cell below, then act on it.
    fn update_cell(&mut self, x: usize, y: usize, events: &mut Vec<GameEvent>) {
        let cell = self.tile_at(x, y);
        let Some(previous) = cell.fall_state() else { return };

        let next = FallState::beneath(self.tile_at(x, y + 1));
        let block = cell.with_fall_state(next);

        match next {
            FallState::Falling => {
                if previous == FallState::Resting {
                    events.push(GameEvent::BlockStartedFalling { x, y });
                }
                self.drop(x, y, block);
            }
            FallState::Resting => {
                if previous == FallState::Falling {
                    log::debug!("{block:?} landed at ({x}, {y})");
                    events.push(GameEvent::BlockLanded { x, y });
                }
                self.set_tile(x, y, block);
            }
        }
    }

    /// Paint every cell, then the player on top.
    pub fn draw(&self, g: &mut impl CellPainter) {
        for (y, row) in self.cells.iter().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                cell.draw(g, x, y);
            }
        }
        g.set_fill_color(paint::PLAYER_COLOR);
        g.fill_cell_rect(self.player.x, self.player.y);
    }
}

// ══════════════════════════════════════════════════════════════
// Unit tests
// ══════════════════════════════════════════════════════════════
