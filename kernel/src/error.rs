// error.rs
//
// The core has no runtime faults: off-grid draws are dropped and GameOver is
// a state. The only rejectable input is a bad `GameConfig`.

use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// Playfield does not fit the 80×25 framebuffer.
    GridTooLarge { width: usize, height: usize },
    /// Playfield cannot hold the starting snake.
    GridTooSmall { width: usize, height: usize },
    ZeroDivisor,
    InitialLength(usize),
    MaxLength(usize),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GridTooLarge { width, height } => {
                write!(f, "grid {}x{} exceeds the framebuffer", width, height)
            }
            Self::GridTooSmall { width, height } => {
                write!(f, "grid {}x{} cannot hold the initial snake", width, height)
            }
            Self::ZeroDivisor => f.write_str("tick divisor must be non-zero"),
            Self::InitialLength(n) => write!(f, "initial length {} out of range", n),
            Self::MaxLength(n) => write!(f, "max length {} exceeds body capacity", n),
        }
    }
}
