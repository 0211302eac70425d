/// Level descriptor and loader.
///
/// A level is a rectangular array of small integer codes:
///
///   0 = Air          1 = Flux          2 = Unbreakable   3 = Player
///   4 = Stone        5 = Falling stone 6 = Box           7 = Falling box
///   8 = Key 1        9 = Lock 1        10 = Key 2        11 = Lock 2
///
/// Decoding is strict: a code outside the table, ragged rows, or anything
/// but exactly one player is a fatal `LevelError`.

use thiserror::Error;

use crate::domain::entity::Player;
use crate::domain::fall::FallState;
use crate::domain::key::KeyFamily;
use crate::domain::tile::Cell;
use crate::sim::map::Map;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LevelError {
    #[error("level has no rows")]
    Empty,
    #[error("row {row} has {found} columns, expected {expected}")]
    Ragged { row: usize, expected: usize, found: usize },
    #[error("invalid tile code {code} at ({x}, {y})")]
    InvalidCode { code: i32, x: usize, y: usize },
    #[error("level has no player")]
    NoPlayer,
    #[error("level has {count} players, expected exactly one")]
    MultiplePlayers { count: usize },
}

/// Tile codes of the level descriptor, in code order.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum RawTile {
    Air,
    Flux,
    Unbreakable,
    Player,
    Stone,
    FallingStone,
    Box,
    FallingBox,
    Key1,
    Lock1,
    Key2,
    Lock2,
}

const RAW_TILES: [RawTile; 12] = [
    RawTile::Air,
    RawTile::Flux,
    RawTile::Unbreakable,
    RawTile::Player,
    RawTile::Stone,
    RawTile::FallingStone,
    RawTile::Box,
    RawTile::FallingBox,
    RawTile::Key1,
    RawTile::Lock1,
    RawTile::Key2,
    RawTile::Lock2,
];

impl RawTile {
    pub fn from_code(code: i32) -> Option<RawTile> {
        usize::try_from(code).ok().and_then(|i| RAW_TILES.get(i).copied())
    }

    /// The cell this code loads as.
    pub fn transform(self) -> Cell {
        match self {
            RawTile::Air => Cell::Air,
            RawTile::Flux => Cell::Flux,
            RawTile::Unbreakable => Cell::Unbreakable,
            RawTile::Player => Cell::PlayerMarker,
            RawTile::Stone => Cell::Rock(FallState::Resting),
            RawTile::FallingStone => Cell::Rock(FallState::Falling),
            RawTile::Box => Cell::Box(FallState::Resting),
            RawTile::FallingBox => Cell::Box(FallState::Falling),
            RawTile::Key1 => Cell::Key(KeyFamily::One),
            RawTile::Lock1 => Cell::Lock(KeyFamily::One),
            RawTile::Key2 => Cell::Key(KeyFamily::Two),
            RawTile::Lock2 => Cell::Lock(KeyFamily::Two),
        }
    }
}

/// A level as authored: a name plus its code rows.
#[derive(Clone, Debug)]
pub struct LevelDef {
    pub name: String,
    pub rows: Vec<Vec<i32>>,
}

impl LevelDef {
    pub fn new(name: &str, rows: &[&[i32]]) -> Self {
        LevelDef {
            name: name.to_string(),
            rows: rows.iter().map(|r| r.to_vec()).collect(),
        }
    }
}

/// Decode a level into a fresh map.
pub fn decode(def: &LevelDef) -> Result<Map, LevelError> {
    let height = def.rows.len();
    let width = def.rows.first().map_or(0, |r| r.len());
    if height == 0 || width == 0 {
        return Err(LevelError::Empty);
    }

    let mut cells = Vec::with_capacity(height);
    let mut players = vec![];

    for (y, row) in def.rows.iter().enumerate() {
        if row.len() != width {
            return Err(LevelError::Ragged { row: y, expected: width, found: row.len() });
        }
        let mut line = Vec::with_capacity(width);
        for (x, &code) in row.iter().enumerate() {
            let raw = RawTile::from_code(code)
                .ok_or(LevelError::InvalidCode { code, x, y })?;
            if raw == RawTile::Player {
                players.push(Player::new(x, y));
            }
            line.push(raw.transform());
        }
        cells.push(line);
    }

    let player = match players.as_slice() {
        [] => return Err(LevelError::NoPlayer),
        [p] => *p,
        many => return Err(LevelError::MultiplePlayers { count: many.len() }),
    };

    log::info!("loaded level {:?} ({}x{})", def.name, width, height);
    Ok(Map::from_cells(cells, player))
}

// ══════════════════════════════════════════════════════════════
// Embedded level
// ══════════════════════════════════════════════════════════════

pub fn embedded_level() -> LevelDef {
    LevelDef::new("Quarry", &[
        &[2, 2, 2, 2, 2, 2, 2, 2],
        &[2, 3, 0, 1, 1, 2, 0, 2],
        &[2, 4, 2, 6, 1, 2, 0, 2],
        &[2, 8, 4, 1, 1, 2, 0, 2],
        &[2, 4, 1, 1, 1, 9, 0, 2],
        &[2, 2, 2, 2, 2, 2, 2, 2],
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_code_round_trips_through_the_table() {
        for code in 0..12 {
            assert!(RawTile::from_code(code).is_some(), "code {code}");
        }
        assert_eq!(RawTile::from_code(12), None);
        assert_eq!(RawTile::from_code(-1), None);
    }

    #[test]
    fn embedded_level_loads() {
        let map = decode(&embedded_level()).unwrap();
        assert_eq!((map.width(), map.height()), (8, 6));
        assert_eq!(*map.player(), Player::new(1, 1));
        assert_eq!(map.tile_at(1, 3), Cell::Key(KeyFamily::One));
        assert_eq!(map.tile_at(5, 4), Cell::Lock(KeyFamily::One));
        assert_eq!(map.tile_at(3, 2), Cell::Box(FallState::Resting));
    }

    #[test]
    fn falling_codes_load_falling() {
        let def = LevelDef::new("t", &[&[3, 5, 7]]);
        let map = decode(&def).unwrap();
        assert_eq!(map.tile_at(1, 0), Cell::Rock(FallState::Falling));
        assert_eq!(map.tile_at(2, 0), Cell::Box(FallState::Falling));
    }

    #[test]
    fn invalid_code_is_rejected() {
        let def = LevelDef::new("t", &[&[3, 0], &[0, 12]]);
        assert_eq!(decode(&def).unwrap_err(), LevelError::InvalidCode { code: 12, x: 1, y: 1 });
    }

    #[test]
    fn ragged_rows_are_rejected() {
        let def = LevelDef::new("t", &[&[3, 0, 0], &[0, 0]]);
        assert_eq!(
            decode(&def).unwrap_err(),
            LevelError::Ragged { row: 1, expected: 3, found: 2 }
        );
    }

    #[test]
    fn player_count_is_enforced() {
        let none = LevelDef::new("t", &[&[0, 1, 2]]);
        assert_eq!(decode(&none).unwrap_err(), LevelError::NoPlayer);
        let two = LevelDef::new("t", &[&[3, 1, 3]]);
        assert_eq!(decode(&two).unwrap_err(), LevelError::MultiplePlayers { count: 2 });
    }

    #[test]
    fn empty_level_is_rejected() {
        let def = LevelDef { name: "t".into(), rows: vec![] };
        assert_eq!(decode(&def).unwrap_err(), LevelError::Empty);
    }
}
