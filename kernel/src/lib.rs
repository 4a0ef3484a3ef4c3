//! Snake Kernel — freestanding x86 Snake
//!
//! Boots from a multiboot loader straight into a single game:
//! - Multiboot v1 header + naked `_start` stub (no runtime, one static stack)
//! - VGA text framebuffer (80×25 @ 0xb8000) behind the `FrameSink` capability
//! - Polled PS/2 keyboard (ports 0x60/0x64) behind the `KeySource` capability
//! - Cursor-tracked console: wrap, scroll, decimal numbers
//! - Snake state machine + fixed-divisor game loop with a busy-wait clock
//! - COM1 serial logging through the `log` facade
//!
//! Everything except the boot stub and the hardware drivers also builds on
//! the host, where `VirtualScreen`, `ScriptedKeys` and `NoDelay` stand in for
//! the real devices.

#![cfg_attr(not(test), no_std)]

pub mod arch;
pub mod boot;
pub mod config;
pub mod display;
pub mod error;
pub mod game;
pub mod input;
pub mod logger;

pub use config::GameConfig;
pub use display::console::Console;
pub use display::{Color, ColorCode, FrameSink, ScreenChar, VirtualScreen};
pub use error::ConfigError;
pub use game::runner::{BusyWait, Clock, GameLoop, NoDelay, Phase};
pub use game::{Direction, Game, Position, Status};
pub use input::{KeySource, ScanCode, ScriptedKeys};
