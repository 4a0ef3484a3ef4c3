// config.rs
//
// Compile-time geometry and pacing, plus the validated `GameConfig` that the
// game and the loop are built from.

use crate::error::ConfigError;

// —————————————————— hardware geometry ——————————————————

/// VGA text mode columns.
pub const GRID_WIDTH: usize = 80;
/// VGA text mode rows.
pub const GRID_HEIGHT: usize = 25;
/// Physical address of the VGA text framebuffer.
pub const VGA_ADDRESS: usize = 0xb8000;

// —————————————————— game ——————————————————

/// Hard upper bound on snake length; sizes the fixed body array.
pub const MAX_SNAKE_LEN: usize = GRID_WIDTH * GRID_HEIGHT;
pub const INITIAL_SNAKE_LEN: usize = 3;
pub const DEFAULT_SEED: u32 = 0x1337;

// —————————————————— pacing ——————————————————

/// Loop iterations per tick while moving left/right.
pub const HORIZONTAL_DIVISOR: u32 = 700;
/// Loop iterations per tick while moving up/down. Cells are taller than wide.
pub const VERTICAL_DIVISOR: u32 = 1300;
/// Spins burned at the end of every loop iteration.
pub const THROTTLE_SPINS: u32 = 10_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    pub width: usize,
    pub height: usize,
    pub max_len: usize,
    pub initial_len: usize,
    pub seed: u32,
    pub horizontal_divisor: u32,
    pub vertical_divisor: u32,
    pub throttle_spins: u32,
}

impl GameConfig {
    pub const DEFAULT: Self = Self {
        width: GRID_WIDTH,
        height: GRID_HEIGHT,
        max_len: MAX_SNAKE_LEN,
        initial_len: INITIAL_SNAKE_LEN,
        seed: DEFAULT_SEED,
        horizontal_divisor: HORIZONTAL_DIVISOR,
        vertical_divisor: VERTICAL_DIVISOR,
        throttle_spins: THROTTLE_SPINS,
    };

    pub const fn with_grid(mut self, width: usize, height: usize) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub const fn with_seed(mut self, seed: u32) -> Self {
        self.seed = seed;
        self
    }

    pub const fn with_max_len(mut self, max_len: usize) -> Self {
        self.max_len = max_len;
        self
    }

    pub const fn with_divisors(mut self, horizontal: u32, vertical: u32) -> Self {
        self.horizontal_divisor = horizontal;
        self.vertical_divisor = vertical;
        self
    }

    pub const fn with_throttle(mut self, spins: u32) -> Self {
        self.throttle_spins = spins;
        self
    }

    /// Checks the config against the fixed framebuffer and body capacity.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width > GRID_WIDTH || self.height > GRID_HEIGHT {
            return Err(ConfigError::GridTooLarge { width: self.width, height: self.height });
        }
        if self.horizontal_divisor == 0 || self.vertical_divisor == 0 {
            return Err(ConfigError::ZeroDivisor);
        }
        if self.initial_len == 0 || self.initial_len > self.max_len {
            return Err(ConfigError::InitialLength(self.initial_len));
        }
        if self.max_len > MAX_SNAKE_LEN {
            return Err(ConfigError::MaxLength(self.max_len));
        }
        // the starting body extends left from the centre and must be on-grid,
        // with at least one cell left over for food
        if self.height == 0
            || self.width / 2 + 1 < self.initial_len
            || self.width * self.height <= self.initial_len
        {
            return Err(ConfigError::GridTooSmall { width: self.width, height: self.height });
        }
        Ok(())
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        assert!(GameConfig::DEFAULT.validate().is_ok());
        assert_eq!(GameConfig::default().max_len, 2000);
    }

    #[test]
    fn rejects_oversized_grid() {
        let cfg = GameConfig::DEFAULT.with_grid(81, 25);
        assert_eq!(cfg.validate(), Err(ConfigError::GridTooLarge { width: 81, height: 25 }));
    }

    #[test]
    fn rejects_zero_divisor() {
        let cfg = GameConfig::DEFAULT.with_divisors(0, 5);
        assert_eq!(cfg.validate(), Err(ConfigError::ZeroDivisor));
    }

    #[test]
    fn rejects_grid_too_narrow_for_initial_body() {
        let cfg = GameConfig::DEFAULT.with_grid(3, 3);
        assert_eq!(cfg.validate(), Err(ConfigError::GridTooSmall { width: 3, height: 3 }));
        // 4 wide: head at x=2, tail at x=0
        assert!(GameConfig::DEFAULT.with_grid(4, 1).validate().is_ok());
    }

    #[test]
    fn rejects_grid_with_no_room_for_food() {
        let cfg = GameConfig { initial_len: 2, ..GameConfig::DEFAULT.with_grid(2, 1) };
        assert_eq!(cfg.validate(), Err(ConfigError::GridTooSmall { width: 2, height: 1 }));

        let cfg = GameConfig { initial_len: 2, ..GameConfig::DEFAULT.with_grid(3, 1) };
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn rejects_max_len_bounds() {
        assert_eq!(
            GameConfig::DEFAULT.with_max_len(MAX_SNAKE_LEN + 1).validate(),
            Err(ConfigError::MaxLength(MAX_SNAKE_LEN + 1))
        );
        assert_eq!(
            GameConfig::DEFAULT.with_max_len(2).validate(),
            Err(ConfigError::InitialLength(3))
        );
    }
}
