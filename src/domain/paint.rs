/// Drawing capability consumed by the simulation.
///
/// The grid never talks to a terminal directly. It paints through a
/// `CellPainter`, which addresses whole grid cells; the implementor decides
/// how big a cell is on its surface.

/// A paint color token (24-bit RGB).
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Rgb { r, g, b }
    }
}

pub trait CellPainter {
    /// Wipe the surface before a new frame.
    fn clear(&mut self);

    /// Select the color used by subsequent `fill_cell_rect` calls.
    fn set_fill_color(&mut self, color: Rgb);

    /// Fill one grid cell, scaled by the painter's cell size.
    fn fill_cell_rect(&mut self, x: usize, y: usize);
}

// ── Palette ──

pub const FLUX_COLOR: Rgb = Rgb::new(0xcc, 0xff, 0xcc);
pub const UNBREAKABLE_COLOR: Rgb = Rgb::new(0x99, 0x99, 0x99);
pub const ROCK_COLOR: Rgb = Rgb::new(0x00, 0x00, 0xcc);
pub const BOX_COLOR: Rgb = Rgb::new(0x8b, 0x45, 0x13);
pub const PLAYER_COLOR: Rgb = Rgb::new(0xff, 0x00, 0x00);

#[cfg(test)]
pub mod testing {
    use super::*;

    /// One recorded painter call.
    #[derive(Clone, Copy, PartialEq, Eq, Debug)]
    pub enum Call {
        Clear,
        Color(Rgb),
        Fill(usize, usize),
    }

    /// Painter that records every call for later assertions.
    #[derive(Default)]
    pub struct RecordingPainter {
        pub calls: Vec<Call>,
    }

    impl RecordingPainter {
        /// Cells filled, paired with the color that was active at the time.
        pub fn fills(&self) -> Vec<(Rgb, usize, usize)> {
            let mut color = None;
            let mut out = vec![];
            for call in &self.calls {
                match *call {
                    Call::Clear => {}
                    Call::Color(c) => color = Some(c),
                    Call::Fill(x, y) => {
                        if let Some(c) = color {
                            out.push((c, x, y));
                        }
                    }
                }
            }
            out
        }
    }

    impl CellPainter for RecordingPainter {
        fn clear(&mut self) {
            self.calls.push(Call::Clear);
        }
        fn set_fill_color(&mut self, color: Rgb) {
            self.calls.push(Call::Color(color));
        }
        fn fill_cell_rect(&mut self, x: usize, y: usize) {
            self.calls.push(Call::Fill(x, y));
        }
    }
}
