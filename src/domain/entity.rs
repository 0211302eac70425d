/// The player: the only actor on the board.
///
/// The player exists twice, as these tracked coordinates and as the single
/// `Cell::PlayerMarker` in the grid. Only `Map::move_player_to` changes
/// either copy, and it always changes both.

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Player {
    pub x: usize,
    pub y: usize,
}

impl Player {
    pub fn new(x: usize, y: usize) -> Self {
        Player { x, y }
    }
}
