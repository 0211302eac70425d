/// Presentation layer: double-buffered, diff-based terminal renderer.
///
/// How it works:
///   1. The simulation paints the grid into the `front` buffer through
///      `CellPainter` (one grid cell = `cell_width` terminal columns)
///   2. `present()` adds the HUD, message and help rows
///   3. Each cell is compared with the `back` buffer (previous frame)
///   4. Only cells that changed are emitted, batched with `queue!`,
///      flushed once
///   5. Swap front/back

use std::io::{self, BufWriter, Write};

use crossterm::{
    cursor::{self, MoveTo},
    execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, Clear, ClearType},
};

use crate::domain::paint::{CellPainter, Rgb};
use crate::sim::world::GameState;

// ── Cell: the unit of the back-buffer ──

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
struct Cell {
    ch: char,
    fg: Color,
    bg: Color,
}

impl Cell {
    /// Explicit background for every empty terminal cell, so gaps between
    /// rows match the cells on VTE terminals.
    const BASE_BG: Color = Color::Rgb { r: 22, g: 22, b: 35 };

    const BLANK: Cell = Cell { ch: ' ', fg: Color::White, bg: Cell::BASE_BG };

    /// Differs from any real cell; filling `back` with it forces a repaint.
    const INVALID: Cell = Cell { ch: '?', fg: Color::Magenta, bg: Color::Magenta };
}

fn to_color(c: Rgb) -> Color {
    Color::Rgb { r: c.r, g: c.g, b: c.b }
}

// ── FrameBuffer: a 2D grid of Cells ──

struct FrameBuffer {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl FrameBuffer {
    fn new(w: usize, h: usize) -> Self {
        FrameBuffer { width: w, height: h, cells: vec![Cell::BLANK; w * h] }
    }

    fn resize(&mut self, w: usize, h: usize) {
        if self.width != w || self.height != h {
            self.width = w;
            self.height = h;
            self.cells = vec![Cell::BLANK; w * h];
        }
    }

    fn clear(&mut self) {
        self.cells.fill(Cell::BLANK);
    }

    fn set(&mut self, x: usize, y: usize, cell: Cell) {
        if x < self.width && y < self.height {
            self.cells[y * self.width + x] = cell;
        }
    }

    fn get(&self, x: usize, y: usize) -> Cell {
        if x < self.width && y < self.height {
            self.cells[y * self.width + x]
        } else {
            Cell::BLANK
        }
    }

    /// Write a string at (x, y). Each char occupies 1 column.
    fn put_str(&mut self, x: usize, y: usize, s: &str, fg: Color, bg: Color) {
        for (i, ch) in s.chars().enumerate() {
            if x + i >= self.width { break; }
            self.set(x + i, y, Cell { ch, fg, bg });
        }
    }

    /// Paint a whole row with `bg`, then the text on top.
    fn put_bar(&mut self, y: usize, s: &str, fg: Color, bg: Color) {
        for x in 0..self.width {
            self.set(x, y, Cell { ch: ' ', fg, bg });
        }
        self.put_str(0, y, s, fg, bg);
    }
}

// ── Renderer ──

/// Vertical layout
const HUD_ROW: usize = 0;
const MAP_ROW: usize = 2;
const MAP_COL: usize = 2;

const HUD_BG: Color = Color::Rgb { r: 20, g: 20, b: 60 };
const MSG_BG: Color = Color::Rgb { r: 200, g: 180, b: 50 };

pub struct Renderer {
    writer: BufWriter<io::Stdout>,
    front: FrameBuffer,
    back: FrameBuffer,
    term_w: usize,
    term_h: usize,
    cell_width: usize,
    fill: Color,
}

impl Renderer {
    pub fn new(cell_width: usize) -> Self {
        Renderer {
            writer: BufWriter::with_capacity(16384, io::stdout()),
            front: FrameBuffer::new(0, 0),
            back: FrameBuffer::new(0, 0),
            term_w: 0,
            term_h: 0,
            cell_width: cell_width.max(1),
            fill: Cell::BASE_BG,
        }
    }

    pub fn init(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(
            self.writer,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            SetBackgroundColor(Cell::BASE_BG),
            Clear(ClearType::All)
        )?;
        self.sync_size()?;
        Ok(())
    }

    pub fn cleanup(&mut self) -> io::Result<()> {
        execute!(
            self.writer,
            ResetColor,
            cursor::Show,
            terminal::LeaveAlternateScreen
        )?;
        terminal::disable_raw_mode()
    }

    /// Pick up terminal resizes. Forces a full repaint when the size changed.
    fn sync_size(&mut self) -> io::Result<()> {
        let (tw, th) = terminal::size().unwrap_or((80, 24));
        if tw as usize != self.term_w || th as usize != self.term_h {
            self.term_w = tw as usize;
            self.term_h = th as usize;
            self.front.resize(self.term_w, self.term_h);
            self.back.resize(self.term_w, self.term_h);
            self.back.cells.fill(Cell::INVALID);
            queue!(self.writer, SetBackgroundColor(Cell::BASE_BG), Clear(ClearType::All))?;
        }
        Ok(())
    }

    /// Finish the frame the simulation painted: HUD, message, help, flush.
    pub fn present(&mut self, state: &GameState) -> io::Result<()> {
        let map_rows = state.map.height();

        let hud = format!(
            " ROCKFALL  {}  tick:{:<6} ",
            state.level_name(), state.tick,
        );
        self.front.put_bar(HUD_ROW, &hud, Color::White, HUD_BG);

        let msg_row = MAP_ROW + map_rows + 1;
        if !state.message.is_empty() {
            let msg = format!(" {} ", state.message);
            self.front.put_bar(msg_row, &msg, Color::Black, MSG_BG);
        }

        let help = " Arrows/WASD:Move  F1/P:Pause  R:Restart  Esc/Q:Quit";
        self.front.put_str(0, msg_row + 2, help, Color::DarkGrey, Cell::BASE_BG);

        self.flush_diff()?;
        std::mem::swap(&mut self.front, &mut self.back);
        Ok(())
    }

    // ── Diff flush: only write changed cells ──

    fn flush_diff(&mut self) -> io::Result<()> {
        let mut last_fg = Color::White;
        let mut last_bg = Cell::BASE_BG;

        // Explicit base colors; ResetColor would fall back to the
        // terminal's own default and leave line artifacts.
        queue!(self.writer,
            SetForegroundColor(last_fg),
            SetBackgroundColor(last_bg),
        )?;

        for y in 0..self.front.height {
            let mut need_move = true;
            for x in 0..self.front.width {
                let cell = self.front.get(x, y);
                if cell == self.back.get(x, y) {
                    need_move = true;
                    continue;
                }

                if need_move {
                    queue!(self.writer, MoveTo(x as u16, y as u16))?;
                    need_move = false;
                }
                if cell.fg != last_fg {
                    queue!(self.writer, SetForegroundColor(cell.fg))?;
                    last_fg = cell.fg;
                }
                if cell.bg != last_bg {
                    queue!(self.writer, SetBackgroundColor(cell.bg))?;
                    last_bg = cell.bg;
                }
                queue!(self.writer, Print(cell.ch))?;
            }
        }

        self.writer.flush()
    }
}

impl CellPainter for Renderer {
    /// Start a new frame. Also where terminal resizes are noticed.
    fn clear(&mut self) {
        if let Err(e) = self.sync_size() {
            log::warn!("terminal resize check failed: {e}");
        }
        self.front.clear();
    }

    fn set_fill_color(&mut self, color: Rgb) {
        self.fill = to_color(color);
    }

    fn fill_cell_rect(&mut self, x: usize, y: usize) {
        let col = MAP_COL + x * self.cell_width;
        let row = MAP_ROW + y;
        let cell = Cell { ch: ' ', fg: self.fill, bg: self.fill };
        for dx in 0..self.cell_width {
            self.front.set(col + dx, row, cell);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fill_covers_cell_width_columns() {
        let mut r = Renderer::new(3);
        r.front.resize(20, 10);
        r.set_fill_color(Rgb::new(1, 2, 3));
        r.fill_cell_rect(1, 2);
        let painted = Color::Rgb { r: 1, g: 2, b: 3 };
        let row = MAP_ROW + 2;
        let start = MAP_COL + 3;
        for col in start..start + 3 {
            assert_eq!(r.front.get(col, row).bg, painted);
        }
        assert_eq!(r.front.get(start - 1, row), Cell::BLANK);
        assert_eq!(r.front.get(start + 3, row), Cell::BLANK);
    }

    #[test]
    fn fill_outside_the_terminal_is_ignored() {
        let mut r = Renderer::new(2);
        r.front.resize(4, 4);
        r.set_fill_color(Rgb::new(9, 9, 9));
        r.fill_cell_rect(50, 50);
        assert!(r.front.cells.iter().all(|c| *c == Cell::BLANK));
    }

    #[test]
    fn put_bar_fills_the_row() {
        let mut fb = FrameBuffer::new(6, 2);
        fb.put_bar(1, "ab", Color::Black, Color::White);
        assert_eq!(fb.get(0, 1).ch, 'a');
        assert_eq!(fb.get(5, 1).bg, Color::White);
        assert_eq!(fb.get(5, 0), Cell::BLANK);
    }
}
