// arch/x86/keyboard.rs
//
// PS/2 keyboard (i8042), polled.
// - status port 0x64: bit 0 set when a byte is waiting
// - data port 0x60: scan code set 1, bit 7 = break
// - no IRQ, no ring buffer: one read per poll, the rest is the caller's job

use bitflags::bitflags;

use crate::arch::x86::port::inb;
use crate::input::KeySource;

// —————————————————— HW regs ——————————————————

const PS2_DATA: u16 = 0x60;
const PS2_STAT: u16 = 0x64;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Status: u8 {
        /// Output buffer full (data → CPU).
        const OUTPUT_FULL = 1 << 0;
        /// Input buffer full (CPU → controller busy).
        const INPUT_FULL  = 1 << 1;
        const SYSTEM      = 1 << 2;
        const COMMAND     = 1 << 3;
        const TIMEOUT     = 1 << 6;
        const PARITY      = 1 << 7;
    }
}

impl Status {
    pub const fn data_ready(self) -> bool {
        self.contains(Status::OUTPUT_FULL)
    }
}

pub struct Ps2Keyboard {
    _private: (),
}

impl Ps2Keyboard {
    /// # Safety
    /// Ports 0x60/0x64 must belong to an i8042 that nothing else reads.
    pub const unsafe fn new() -> Self {
        Self { _private: () }
    }

    pub fn status(&self) -> Status {
        Status::from_bits_truncate(unsafe { inb(PS2_STAT) })
    }
}

impl KeySource for Ps2Keyboard {
    fn poll_key(&mut self) -> Option<u8> {
        if !self.status().data_ready() {
            return None;
        }
        Some(unsafe { inb(PS2_DATA) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_bit_zero_signals_data() {
        assert!(Status::from_bits_truncate(0x01).data_ready());
        assert!(Status::from_bits_truncate(0x1D).data_ready());
        assert!(!Status::from_bits_truncate(0x1C).data_ready());
        assert!(!Status::from_bits_truncate(0x02).data_ready());
    }
}
