/// Keys and locks.
///
/// A key and the locks it opens share a family tag. The tag selects one of
/// two fixed configurations (paint color + which locks a pickup removes);
/// cells store the tag by value, never a handle to the configuration.

use super::paint::Rgb;
use super::tile::Cell;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum KeyFamily {
    One,
    Two,
}

/// Static description of one key family.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct KeyConfig {
    pub color: Rgb,
    pub family: KeyFamily,
}

pub const YELLOW_KEY: KeyConfig = KeyConfig {
    color: Rgb::new(0xff, 0xcc, 0x00),
    family: KeyFamily::One,
};

pub const BLUE_KEY: KeyConfig = KeyConfig {
    color: Rgb::new(0x00, 0xcc, 0xff),
    family: KeyFamily::Two,
};

impl KeyFamily {
    pub fn config(self) -> &'static KeyConfig {
        match self {
            KeyFamily::One => &YELLOW_KEY,
            KeyFamily::Two => &BLUE_KEY,
        }
    }
}

impl KeyConfig {
    /// Should picking up this key remove `cell`?
    pub fn removes(&self, cell: Cell) -> bool {
        match self.family {
            KeyFamily::One => cell.is_lock1(),
            KeyFamily::Two => cell.is_lock2(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn family_selects_its_config() {
        assert_eq!(KeyFamily::One.config(), &YELLOW_KEY);
        assert_eq!(KeyFamily::Two.config(), &BLUE_KEY);
        assert_ne!(YELLOW_KEY.color, BLUE_KEY.color);
    }

    #[test]
    fn yellow_removes_only_lock1() {
        assert!(YELLOW_KEY.removes(Cell::Lock(KeyFamily::One)));
        assert!(!YELLOW_KEY.removes(Cell::Lock(KeyFamily::Two)));
        assert!(!YELLOW_KEY.removes(Cell::Key(KeyFamily::One)));
        assert!(!YELLOW_KEY.removes(Cell::Air));
    }

    #[test]
    fn blue_removes_only_lock2() {
        assert!(BLUE_KEY.removes(Cell::Lock(KeyFamily::Two)));
        assert!(!BLUE_KEY.removes(Cell::Lock(KeyFamily::One)));
    }
}
