// display/console.rs
//
// Cursor-tracked text output over any `FrameSink`.
// - put_char: newline, wrap at the right edge, scroll at the bottom
// - print_str / print_number (unsigned, no allocation)
// - fmt::Write in the console's current color, for panic screens

use core::fmt;

use super::{ColorCode, FrameSink, ScreenChar};

/// Current text position. Always inside the sink's grid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cursor {
    pub row: usize,
    pub col: usize,
}

pub struct Console<S: FrameSink> {
    sink: S,
    cursor: Cursor,
    color: ColorCode,
}

impl<S: FrameSink> Console<S> {
    pub fn new(sink: S) -> Self {
        Self { sink, cursor: Cursor::default(), color: ColorCode::DEFAULT }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Moves the cursor, clamped to the grid.
    pub fn set_cursor(&mut self, row: usize, col: usize) {
        self.cursor = Cursor {
            row: row.min(self.sink.height().saturating_sub(1)),
            col: col.min(self.sink.width().saturating_sub(1)),
        };
    }

    /// Color used by the `fmt::Write` path.
    pub fn set_color(&mut self, color: ColorCode) {
        self.color = color;
    }

    pub fn clear(&mut self, color: ColorCode) {
        self.sink.clear(color);
        self.cursor = Cursor::default();
    }

    pub fn scroll_up(&mut self) {
        self.sink.scroll_up();
        if self.cursor.row > 0 {
            self.cursor.row -= 1;
        }
    }

    pub fn put_char(&mut self, ch: u8, color: ColorCode) {
        if ch == b'\n' {
            self.new_line();
            return;
        }
        self.sink.write_cell(self.cursor.row, self.cursor.col, ScreenChar::new(ch, color));
        self.cursor.col += 1;
        if self.cursor.col >= self.sink.width() {
            self.new_line();
        }
    }

    fn new_line(&mut self) {
        self.cursor.col = 0;
        self.cursor.row += 1;
        if self.cursor.row >= self.sink.height() {
            self.scroll_up();
        }
    }

    pub fn print_str(&mut self, s: &str, color: ColorCode) {
        for byte in s.bytes() {
            self.put_char(byte, color);
        }
    }

    pub fn print_number(&mut self, n: u32, color: ColorCode) {
        if n == 0 {
            self.put_char(b'0', color);
            return;
        }
        // u32::MAX has 10 digits
        let mut buf = [0u8; 10];
        let mut len = 0;
        let mut n = n;
        while n > 0 {
            buf[len] = b'0' + (n % 10) as u8;
            n /= 10;
            len += 1;
        }
        for &digit in buf[..len].iter().rev() {
            self.put_char(digit, color);
        }
    }
}

impl<S: FrameSink> fmt::Write for Console<S> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let color = self.color;
        self.print_str(s, color);
        Ok(())
    }
}
