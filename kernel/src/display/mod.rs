//! Text-mode display
//!
//! - `ScreenChar`/`ColorCode`: the two-byte VGA cell (glyph, attribute).
//! - `FrameSink`: the framebuffer capability. Hardware (`arch::x86::vga`) and
//!   in-memory (`VirtualScreen`) implementations share the provided
//!   `clear`/`scroll_up`/`draw` logic.
//! - `console`: cursor-tracked text output on top of any sink.

pub mod console;

use crate::config::{GRID_HEIGHT, GRID_WIDTH};
use crate::game::Position;

#[allow(dead_code)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Color {
    Black = 0,
    Blue = 1,
    Green = 2,
    Cyan = 3,
    Red = 4,
    Magenta = 5,
    Brown = 6,
    LightGray = 7,
    DarkGray = 8,
    LightBlue = 9,
    LightGreen = 10,
    LightCyan = 11,
    LightRed = 12,
    Pink = 13,
    Yellow = 14,
    White = 15,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(transparent)]
pub struct ColorCode(u8);

impl ColorCode {
    pub const fn new(fg: Color, bg: Color) -> Self {
        Self((bg as u8) << 4 | (fg as u8))
    }

    pub const fn from_byte(attr: u8) -> Self {
        Self(attr)
    }

    pub const fn as_byte(self) -> u8 {
        self.0
    }

    /// 0x0F — cleared screen, scrolled-in rows.
    pub const DEFAULT: Self = Self::new(Color::White, Color::Black);
    /// 0x0C — food, game-over text.
    pub const ALERT: Self = Self::new(Color::LightRed, Color::Black);
    /// 0x0A — snake body, boot banner.
    pub const SNAKE: Self = Self::new(Color::LightGreen, Color::Black);
    /// 0x0E — score line.
    pub const SCORE: Self = Self::new(Color::Yellow, Color::Black);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(C)]
pub struct ScreenChar {
    pub ascii_character: u8,
    pub color_code: ColorCode,
}

impl ScreenChar {
    pub const fn new(ascii_character: u8, color_code: ColorCode) -> Self {
        Self { ascii_character, color_code }
    }

    pub const fn blank(color_code: ColorCode) -> Self {
        Self::new(b' ', color_code)
    }
}

// —————————————————— capability ——————————————————

/// A fixed-size grid of character cells.
///
/// `write_cell`/`read_cell` take row/column indices and must ignore
/// (respectively return a blank for) anything outside the grid. Writes are
/// visible immediately; there is nothing to flush.
pub trait FrameSink {
    fn width(&self) -> usize;
    fn height(&self) -> usize;
    fn write_cell(&mut self, row: usize, col: usize, cell: ScreenChar);
    fn read_cell(&self, row: usize, col: usize) -> ScreenChar;

    /// Fill every cell with a blank in `color`.
    fn clear(&mut self, color: ColorCode) {
        let blank = ScreenChar::blank(color);
        for row in 0..self.height() {
            for col in 0..self.width() {
                self.write_cell(row, col, blank);
            }
        }
    }

    /// Move every row up by one; the last row comes back blank in 0x0F.
    fn scroll_up(&mut self) {
        for row in 1..self.height() {
            for col in 0..self.width() {
                let ch = self.read_cell(row, col);
                self.write_cell(row - 1, col, ch);
            }
        }
        let last = self.height().saturating_sub(1);
        let blank = ScreenChar::blank(ColorCode::DEFAULT);
        for col in 0..self.width() {
            self.write_cell(last, col, blank);
        }
    }

    /// Draw one glyph at a game position. Off-grid positions are dropped.
    fn draw(&mut self, pos: Position, ch: u8, color: ColorCode) {
        if pos.x < 0 || pos.y < 0 {
            return;
        }
        let (col, row) = (pos.x as usize, pos.y as usize);
        if col < self.width() && row < self.height() {
            self.write_cell(row, col, ScreenChar::new(ch, color));
        }
    }
}

// —————————————————— in-memory sink ——————————————————

/// Host-side framebuffer. Same geometry rules as VGA, backed by an array.
#[derive(Clone)]
pub struct VirtualScreen<const W: usize = GRID_WIDTH, const H: usize = GRID_HEIGHT> {
    cells: [[ScreenChar; W]; H],
    writes: usize,
}

impl<const W: usize, const H: usize> VirtualScreen<W, H> {
    pub const fn new() -> Self {
        Self { cells: [[ScreenChar::blank(ColorCode::from_byte(0)); W]; H], writes: 0 }
    }

    pub fn cell(&self, row: usize, col: usize) -> ScreenChar {
        self.cells[row][col]
    }

    /// Number of in-bounds cell writes since creation.
    pub fn writes(&self) -> usize {
        self.writes
    }

    /// Glyphs of one row, trailing blanks included.
    pub fn row_bytes(&self, row: usize) -> [u8; W] {
        let mut out = [b' '; W];
        for (dst, cell) in out.iter_mut().zip(self.cells[row].iter()) {
            *dst = cell.ascii_character;
        }
        out
    }

    /// Every cell holding `ch`, as (x, y) game positions.
    pub fn find(&self, ch: u8) -> impl Iterator<Item = Position> + '_ {
        self.cells.iter().enumerate().flat_map(move |(y, row)| {
            row.iter()
                .enumerate()
                .filter(move |(_, c)| c.ascii_character == ch)
                .map(move |(x, _)| Position::new(x as i32, y as i32))
        })
    }
}

impl<const W: usize, const H: usize> Default for VirtualScreen<W, H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const W: usize, const H: usize> FrameSink for VirtualScreen<W, H> {
    fn width(&self) -> usize {
        W
    }

    fn height(&self) -> usize {
        H
    }

    fn write_cell(&mut self, row: usize, col: usize, cell: ScreenChar) {
        if row < H && col < W {
            self.cells[row][col] = cell;
            self.writes += 1;
        }
    }

    fn read_cell(&self, row: usize, col: usize) -> ScreenChar {
        if row < H && col < W {
            self.cells[row][col]
        } else {
            ScreenChar::blank(ColorCode::DEFAULT)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_codes_match_vga_attributes() {
        assert_eq!(ColorCode::DEFAULT.as_byte(), 0x0F);
        assert_eq!(ColorCode::ALERT.as_byte(), 0x0C);
        assert_eq!(ColorCode::SNAKE.as_byte(), 0x0A);
        assert_eq!(ColorCode::SCORE.as_byte(), 0x0E);
        assert_eq!(ColorCode::new(Color::White, Color::Blue).as_byte(), 0x1F);
        assert_eq!(core::mem::size_of::<ScreenChar>(), 2);
    }

    #[test]
    fn off_grid_draws_touch_nothing() {
        let mut screen: VirtualScreen = VirtualScreen::new();
        screen.clear(ColorCode::DEFAULT);
        let before = screen.clone();
        let writes = screen.writes();

        for pos in [
            Position::new(-1, 0),
            Position::new(0, -1),
            Position::new(80, 0),
            Position::new(0, 25),
            Position::new(i32::MIN, i32::MAX),
        ] {
            screen.draw(pos, b'#', ColorCode::ALERT);
        }

        assert_eq!(screen.writes(), writes);
        for row in 0..25 {
            for col in 0..80 {
                assert_eq!(screen.cell(row, col), before.cell(row, col));
            }
        }
    }

    #[test]
    fn draw_hits_exactly_one_cell() {
        let mut screen: VirtualScreen = VirtualScreen::new();
        screen.clear(ColorCode::DEFAULT);
        screen.draw(Position::new(79, 24), b'X', ColorCode::ALERT);

        assert_eq!(screen.cell(24, 79), ScreenChar::new(b'X', ColorCode::ALERT));
        assert_eq!(screen.find(b'X').count(), 1);
    }

    #[test]
    fn scroll_moves_rows_up_and_blanks_last() {
        let mut screen: VirtualScreen<4, 3> = VirtualScreen::new();
        screen.clear(ColorCode::SNAKE);
        screen.write_cell(1, 0, ScreenChar::new(b'a', ColorCode::SNAKE));
        screen.write_cell(2, 3, ScreenChar::new(b'b', ColorCode::SCORE));

        screen.scroll_up();

        assert_eq!(screen.cell(0, 0).ascii_character, b'a');
        assert_eq!(screen.cell(1, 3), ScreenChar::new(b'b', ColorCode::SCORE));
        assert_eq!(&screen.row_bytes(2), b"    ");
        assert_eq!(screen.cell(2, 3).color_code, ColorCode::DEFAULT);
    }
}
