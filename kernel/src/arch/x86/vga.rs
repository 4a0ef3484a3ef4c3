// arch/x86/vga.rs
//! VGA text framebuffer
//!
//! 80×25 cells at 0xb8000, two bytes each (glyph, attribute). Every access is
//! volatile so the compiler never elides or reorders framebuffer stores.

use volatile::Volatile;

use crate::config::{GRID_HEIGHT, GRID_WIDTH, VGA_ADDRESS};
use crate::display::{ColorCode, FrameSink, ScreenChar};

pub const BUFFER_HEIGHT: usize = GRID_HEIGHT;
pub const BUFFER_WIDTH: usize = GRID_WIDTH;

#[repr(transparent)]
struct Buffer {
    chars: [[Volatile<ScreenChar>; BUFFER_WIDTH]; BUFFER_HEIGHT],
}

pub struct VgaBuffer {
    buffer: &'static mut Buffer,
}

impl VgaBuffer {
    /// # Safety
    /// VGA text memory must be identity mapped at `VGA_ADDRESS` (true in
    /// multiboot protected mode) and no other `VgaBuffer` may be in use,
    /// except on the panic path where the game loop is gone for good.
    pub unsafe fn new() -> Self {
        Self { buffer: &mut *(VGA_ADDRESS as *mut Buffer) }
    }
}

impl FrameSink for VgaBuffer {
    fn width(&self) -> usize {
        BUFFER_WIDTH
    }

    fn height(&self) -> usize {
        BUFFER_HEIGHT
    }

    fn write_cell(&mut self, row: usize, col: usize, cell: ScreenChar) {
        if row < BUFFER_HEIGHT && col < BUFFER_WIDTH {
            self.buffer.chars[row][col].write(cell);
        }
    }

    fn read_cell(&self, row: usize, col: usize) -> ScreenChar {
        if row < BUFFER_HEIGHT && col < BUFFER_WIDTH {
            self.buffer.chars[row][col].read()
        } else {
            ScreenChar::blank(ColorCode::DEFAULT)
        }
    }
}
