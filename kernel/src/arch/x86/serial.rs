// arch/x86/serial.rs
//! 16550 UART on COM1, transmit only. Backs the logger.

use core::fmt;
use spin::Mutex;

use super::port::{inb, outb};

pub const COM1: u16 = 0x3F8;

pub struct SerialPort {
    base: u16,
}

impl SerialPort {
    /// Creates a new serial port interface for the given base port.
    pub const unsafe fn new(base: u16) -> Self {
        SerialPort { base }
    }

    fn data(&self) -> u16 { self.base }
    fn int_enable(&self) -> u16 { self.base + 1 }
    fn fifo_ctrl(&self) -> u16 { self.base + 2 }
    fn line_ctrl(&self) -> u16 { self.base + 3 }
    fn modem_ctrl(&self) -> u16 { self.base + 4 }
    fn line_status(&self) -> u16 { self.base + 5 }

    /// 38400 baud, 8N1, FIFOs on, UART interrupts off (we poll).
    pub fn init(&mut self) {
        unsafe {
            outb(self.int_enable(), 0x00);

            // DLAB on, divisor 3
            outb(self.line_ctrl(), 0x80);
            outb(self.data(), 0x03);
            outb(self.int_enable(), 0x00);

            // 8 bits, no parity, one stop bit
            outb(self.line_ctrl(), 0x03);

            // Enable FIFO, clear them, with 14-byte threshold
            outb(self.fifo_ctrl(), 0xC7);

            // RTS/DSR set
            outb(self.modem_ctrl(), 0x0B);
        }
    }

    fn is_transmit_empty(&self) -> bool {
        unsafe { inb(self.line_status()) & 0x20 != 0 }
    }

    pub fn send(&mut self, data: u8) {
        while !self.is_transmit_empty() {
            core::hint::spin_loop();
        }
        unsafe {
            outb(self.data(), data);
        }
    }
}

impl fmt::Write for SerialPort {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for byte in s.bytes() {
            if byte == b'\n' {
                self.send(b'\r');
            }
            self.send(byte);
        }
        Ok(())
    }
}

static SERIAL1: Mutex<Option<SerialPort>> = Mutex::new(None);

pub fn init() {
    let mut serial = unsafe { SerialPort::new(COM1) };
    serial.init();
    *SERIAL1.lock() = Some(serial);
}

pub fn _print(args: fmt::Arguments) {
    use core::fmt::Write;
    if let Some(serial) = SERIAL1.lock().as_mut() {
        let _ = serial.write_fmt(args);
    }
}

/// Panic path: skip the lock if it is held by whoever panicked.
pub fn _print_critical(args: fmt::Arguments) {
    use core::fmt::Write;
    if let Some(mut guard) = SERIAL1.try_lock() {
        if let Some(serial) = guard.as_mut() {
            let _ = serial.write_fmt(args);
        }
    }
}
