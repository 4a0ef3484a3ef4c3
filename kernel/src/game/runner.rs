// game/runner.rs
//
// The game loop. One `GameLoop` value owns everything the game touches
// (console, key source, clock, game, last key, iteration counter); nothing
// lives in globals.
//
// Running phase, per iteration:
//   count → poll → pick divisor → tick+render on multiples → throttle
// GameOver phase, per iteration:
//   poll → restart once the restart key shows up

use crate::config::GameConfig;
use crate::display::console::Console;
use crate::display::{ColorCode, FrameSink};
use crate::error::ConfigError;
use crate::input::{self, KeySource, ScanCode};

use super::{Game, TickOutcome};

const SNAKE_GLYPH: u8 = b'O';
const FOOD_GLYPH: u8 = b'X';
const GAME_OVER_TEXT: &str = "\nGAME OVER\nPress SPACE to restart\n";

// —————————————————— clock ——————————————————

/// Paces the loop; called once at the end of every running iteration.
pub trait Clock {
    fn throttle(&mut self);
}

/// Spins a fixed number of iterations. The only time source on hardware.
#[derive(Debug, Clone, Copy)]
pub struct BusyWait {
    spins: u32,
}

impl BusyWait {
    pub const fn new(spins: u32) -> Self {
        Self { spins }
    }
}

impl Clock for BusyWait {
    fn throttle(&mut self) {
        for i in 0..self.spins {
            // keep the optimizer from deleting the loop
            core::hint::black_box(i);
            core::hint::spin_loop();
        }
    }
}

/// Returns immediately; counts how often the loop asked to wait.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDelay {
    throttles: u64,
}

impl NoDelay {
    pub const fn new() -> Self {
        Self { throttles: 0 }
    }

    pub fn throttles(&self) -> u64 {
        self.throttles
    }
}

impl Clock for NoDelay {
    fn throttle(&mut self) {
        self.throttles += 1;
    }
}

// —————————————————— loop ——————————————————

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Running,
    GameOver,
}

pub struct GameLoop<S: FrameSink, K: KeySource, C: Clock> {
    console: Console<S>,
    keys: K,
    clock: C,
    game: Game,
    last_key: Option<u8>,
    frame: u32,
    ticks: u64,
    phase: Phase,
}

impl<S: FrameSink, K: KeySource, C: Clock> GameLoop<S, K, C> {
    pub fn new(
        mut console: Console<S>,
        keys: K,
        clock: C,
        config: GameConfig,
    ) -> Result<Self, ConfigError> {
        let game = Game::new(config)?;
        console.clear(ColorCode::DEFAULT);
        log::info!(
            "game ready: {}x{} grid, seed {:#x}, divisors {}/{}",
            config.width,
            config.height,
            config.seed,
            config.horizontal_divisor,
            config.vertical_divisor
        );
        Ok(Self {
            console,
            keys,
            clock,
            game,
            last_key: None,
            frame: 0,
            ticks: 0,
            phase: Phase::Running,
        })
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn console(&self) -> &Console<S> {
        &self.console
    }

    pub fn keys_mut(&mut self) -> &mut K {
        &mut self.keys
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn last_key(&self) -> Option<u8> {
        self.last_key
    }

    /// Iterations since the current game started.
    pub fn frame(&self) -> u32 {
        self.frame
    }

    /// Game ticks since power-on, across restarts.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn run(&mut self) -> ! {
        loop {
            self.step();
        }
    }

    /// One loop iteration in the current phase.
    pub fn step(&mut self) -> Phase {
        match self.phase {
            Phase::Running => self.step_running(),
            Phase::GameOver => self.step_game_over(),
        }
        self.phase
    }

    fn divisor(&self) -> u32 {
        let cfg = self.game.config();
        if self.game.snake().direction().is_vertical() {
            cfg.vertical_divisor
        } else {
            cfg.horizontal_divisor
        }
    }

    fn step_running(&mut self) {
        self.frame = self.frame.wrapping_add(1);
        input::poll(&mut self.keys, &mut self.last_key, self.game.snake_mut());

        if self.frame % self.divisor() == 0 {
            self.ticks += 1;
            match self.game.tick() {
                TickOutcome::Died => {
                    self.enter_game_over();
                    return;
                }
                TickOutcome::Ate => {
                    log::debug!("ate, score {}", self.game.score());
                    self.render();
                }
                TickOutcome::Moved => self.render(),
            }
            log::trace!("tick {} head {:?}", self.ticks, self.game.snake().head());
        }

        self.clock.throttle();
    }

    fn step_game_over(&mut self) {
        input::poll(&mut self.keys, &mut self.last_key, self.game.snake_mut());
        if self.last_key == Some(ScanCode::RESTART.code()) {
            self.restart();
        }
    }

    fn enter_game_over(&mut self) {
        log::info!(
            "game over: score {}, length {}",
            self.game.score(),
            self.game.snake().len()
        );
        self.console.print_str(GAME_OVER_TEXT, ColorCode::ALERT);
        // a restart key pressed mid-game must not skip this screen
        self.last_key = None;
        self.phase = Phase::GameOver;
    }

    fn restart(&mut self) {
        self.game.restart();
        self.console.clear(ColorCode::DEFAULT);
        self.last_key = None;
        self.frame = 0;
        self.phase = Phase::Running;
    }

    fn render(&mut self) {
        self.console.clear(ColorCode::DEFAULT);

        let sink = self.console.sink_mut();
        sink.draw(self.game.food(), FOOD_GLYPH, ColorCode::ALERT);
        for &seg in self.game.snake().body() {
            sink.draw(seg, SNAKE_GLYPH, ColorCode::SNAKE);
        }

        self.console.set_cursor(0, 0);
        self.console.print_str("Score: ", ColorCode::SCORE);
        self.console.print_number(self.game.score(), ColorCode::SCORE);
    }
}
