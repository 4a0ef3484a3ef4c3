//! Snake game state machine
//!
//! - `Snake`: fixed-capacity body (head first), direction with reversal guard
//! - `Game`: snake + food + score + LCG; `spawn_food`, `advance`,
//!   `check_collision`, `check_food`, composed per tick by `tick`
//! - `runner`: the fixed-divisor loop that drives a `Game` on real or virtual
//!   devices
//!
//! No allocation: the body lives in an `ArrayVec` sized for the whole grid.

pub mod rng;
pub mod runner;

use arrayvec::ArrayVec;

use crate::config::{GameConfig, MAX_SNAKE_LEN};
use crate::error::ConfigError;
use rng::Lcg;

// —————————————————— geometry ——————————————————

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub const fn step(self, dir: Direction) -> Self {
        let (dx, dy) = dir.delta();
        Self { x: self.x + dx, y: self.y + dy }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// (dx, dy) in screen coordinates; y grows downwards.
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    pub const fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    pub const fn is_vertical(self) -> bool {
        matches!(self, Direction::Up | Direction::Down)
    }
}

// —————————————————— snake ——————————————————

#[derive(Debug, Clone)]
pub struct Snake {
    body: ArrayVec<Position, MAX_SNAKE_LEN>,
    max_len: usize,
    direction: Direction,
    // heading of the last advance; reversal is judged against this
    moved: Direction,
    // cell left behind by the tail on the last advance; growth refills it
    vacated: Option<Position>,
}

impl Snake {
    /// Horizontal snake heading right, tail extending to the left of `head`.
    pub fn new(head: Position, len: usize, max_len: usize) -> Self {
        let max_len = max_len.min(MAX_SNAKE_LEN);
        let body = (0..len.min(max_len) as i32)
            .map(|i| Position::new(head.x - i, head.y))
            .collect();
        Self { body, max_len, direction: Direction::Right, moved: Direction::Right, vacated: None }
    }

    /// Snake with explicit segments, head first. Extra segments past
    /// `max_len` are dropped.
    pub fn from_segments(segments: &[Position], direction: Direction, max_len: usize) -> Self {
        let max_len = max_len.min(MAX_SNAKE_LEN);
        let body = segments.iter().copied().take(max_len).collect();
        Self { body, max_len, direction, moved: direction, vacated: None }
    }

    pub fn head(&self) -> Position {
        self.body.first().copied().unwrap_or_default()
    }

    pub fn body(&self) -> &[Position] {
        &self.body
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn max_len(&self) -> usize {
        self.max_len
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Requests a new heading for the next advance. The reverse of the last
    /// heading actually moved is refused, however many turns came between.
    pub fn turn(&mut self, dir: Direction) -> bool {
        if dir == self.moved.opposite() {
            return false;
        }
        self.direction = dir;
        true
    }

    /// Every segment takes its predecessor's cell, then the head steps.
    pub fn advance(&mut self) {
        let len = self.body.len();
        if len == 0 {
            return;
        }
        self.vacated = Some(self.body[len - 1]);
        for i in (1..len).rev() {
            self.body[i] = self.body[i - 1];
        }
        self.body[0] = self.body[0].step(self.direction);
        self.moved = self.direction;
    }

    /// Appends one tail segment; a no-op at `max_len`.
    pub fn grow(&mut self) -> bool {
        if self.body.len() >= self.max_len {
            return false;
        }
        let tail = match self.vacated.take().or_else(|| self.body.last().copied()) {
            Some(p) => p,
            None => return false,
        };
        self.body.try_push(tail).is_ok()
    }

    pub fn contains(&self, p: Position) -> bool {
        self.body.iter().any(|&s| s == p)
    }

    /// Head overlaps another segment.
    pub fn hits_self(&self) -> bool {
        let head = self.head();
        self.body.iter().skip(1).any(|&s| s == head)
    }
}

// —————————————————— game ——————————————————

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Running,
    GameOver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Moved,
    Ate,
    Died,
}

#[derive(Debug, Clone)]
pub struct Game {
    config: GameConfig,
    snake: Snake,
    food: Position,
    score: u32,
    status: Status,
    rng: Lcg,
}

impl Game {
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::with_rng(config, Lcg::new(config.seed)))
    }

    fn with_rng(config: GameConfig, rng: Lcg) -> Self {
        let center = Position::new((config.width / 2) as i32, (config.height / 2) as i32);
        let mut game = Self {
            config,
            snake: Snake::new(center, config.initial_len, config.max_len),
            food: Position::default(),
            score: 0,
            status: Status::Running,
            rng,
        };
        game.spawn_food();
        game
    }

    /// Fresh game on the same config. The generator carries on where the
    /// previous game left it.
    pub fn restart(&mut self) {
        *self = Self::with_rng(self.config, self.rng);
        log::info!("new game, food at ({}, {})", self.food.x, self.food.y);
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn snake_mut(&mut self) -> &mut Snake {
        &mut self.snake
    }

    pub fn food(&self) -> Position {
        self.food
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn is_over(&self) -> bool {
        self.status == Status::GameOver
    }

    pub fn rng(&self) -> &Lcg {
        &self.rng
    }

    /// Rejection-samples a cell that is not under the snake. x is drawn
    /// before y.
    pub fn spawn_food(&mut self) {
        let (w, h) = (self.config.width as u32, self.config.height as u32);
        loop {
            let x = self.rng.below(w) as i32;
            let y = self.rng.below(h) as i32;
            let p = Position::new(x, y);
            if !self.snake.contains(p) {
                self.food = p;
                log::debug!("food at ({}, {})", x, y);
                return;
            }
        }
    }

    pub fn advance(&mut self) {
        self.snake.advance();
    }

    pub fn hits_wall(&self) -> bool {
        let head = self.snake.head();
        head.x < 0
            || head.y < 0
            || head.x >= self.config.width as i32
            || head.y >= self.config.height as i32
    }

    /// Ends the game on a wall or self hit.
    pub fn check_collision(&mut self) -> bool {
        let hit = self.hits_wall() || self.snake.hits_self();
        if hit {
            self.status = Status::GameOver;
        }
        hit
    }

    /// Eats, grows (up to max length), scores and respawns food.
    pub fn check_food(&mut self) -> bool {
        if self.snake.head() != self.food {
            return false;
        }
        self.snake.grow();
        self.score += 1;
        self.spawn_food();
        true
    }

    /// One game step. A fatal move is fatal even onto food.
    pub fn tick(&mut self) -> TickOutcome {
        if self.is_over() {
            return TickOutcome::Died;
        }
        self.advance();
        if self.check_collision() {
            return TickOutcome::Died;
        }
        if self.check_food() {
            TickOutcome::Ate
        } else {
            TickOutcome::Moved
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game() -> Game {
        Game::new(GameConfig::DEFAULT).unwrap()
    }

    fn p(x: i32, y: i32) -> Position {
        Position::new(x, y)
    }

    #[test]
    fn initial_state_is_centered_and_heading_right() {
        let g = game();
        assert_eq!(g.snake().body(), &[p(40, 12), p(39, 12), p(38, 12)]);
        assert_eq!(g.snake().direction(), Direction::Right);
        assert_eq!(g.score(), 0);
        assert_eq!(g.status(), Status::Running);
        assert!(!g.snake().contains(g.food()));
    }

    #[test]
    fn advance_shifts_body_and_moves_head() {
        let mut g = game();
        g.advance();
        assert_eq!(g.snake().body(), &[p(41, 12), p(40, 12), p(39, 12)]);
    }

    #[test]
    fn advance_preserves_length_and_follows_predecessor() {
        let mut g = game();
        let turns = [Direction::Up, Direction::Left, Direction::Down, Direction::Left];
        for dir in turns {
            g.snake_mut().turn(dir);
            let before: ArrayVec<Position, 8> = g.snake().body().iter().copied().collect();
            g.advance();
            let after = g.snake().body();
            assert_eq!(after.len(), before.len());
            for i in 1..after.len() {
                assert_eq!(after[i], before[i - 1]);
            }
            assert_eq!(after[0], before[0].step(dir));
        }
    }

    #[test]
    fn eating_food_ahead_grows_and_scores() {
        let mut g = game();
        g.food = p(41, 12);

        assert_eq!(g.tick(), TickOutcome::Ate);
        assert_eq!(g.snake().body(), &[p(41, 12), p(40, 12), p(39, 12), p(38, 12)]);
        assert_eq!(g.score(), 1);
        for seg in g.snake().body() {
            assert_ne!(*seg, g.food());
        }
    }

    #[test]
    fn growth_clamps_at_max_length() {
        let cfg = GameConfig::DEFAULT.with_max_len(3);
        let mut g = Game::new(cfg).unwrap();
        g.food = p(41, 12);

        assert_eq!(g.tick(), TickOutcome::Ate);
        assert_eq!(g.snake().len(), 3);
        assert_eq!(g.score(), 1);
    }

    #[test]
    fn left_wall_is_fatal() {
        let mut g = game();
        g.snake = Snake::from_segments(&[p(0, 5), p(1, 5), p(2, 5)], Direction::Left, 2000);

        assert_eq!(g.tick(), TickOutcome::Died);
        assert!(g.is_over());
    }

    #[test]
    fn wall_collision_on_every_edge() {
        let cases = [
            (p(79, 3), Direction::Right),
            (p(10, 0), Direction::Up),
            (p(10, 24), Direction::Down),
        ];
        for (head, dir) in cases {
            let mut g = game();
            g.snake = Snake::from_segments(&[head], dir, 2000);
            g.advance();
            assert!(g.check_collision(), "{:?} {:?}", head, dir);
        }

        // inside the last row/column is fine
        let mut g = game();
        g.snake = Snake::from_segments(&[p(78, 24)], Direction::Right, 2000);
        g.advance();
        assert!(!g.check_collision());
    }

    #[test]
    fn self_collision_only_on_overlap() {
        let mut g = game();
        // hook: heading down into its own body
        g.snake = Snake::from_segments(
            &[p(2, 2), p(3, 2), p(3, 3), p(2, 3), p(1, 3)],
            Direction::Down,
            2000,
        );
        g.advance();
        assert_eq!(g.snake().head(), p(2, 3));
        assert!(g.check_collision());

        // square: the head enters the cell the tail just left
        let mut g = game();
        g.snake = Snake::from_segments(&[p(2, 2), p(3, 2), p(3, 3), p(2, 3)], Direction::Down, 2000);
        g.advance();
        assert!(!g.check_collision());
        assert_eq!(g.status(), Status::Running);
    }

    #[test]
    fn collision_beats_food_on_same_tick() {
        let mut g = game();
        g.snake = Snake::from_segments(&[p(0, 5), p(1, 5), p(2, 5)], Direction::Left, 2000);
        g.food = p(-1, 5);

        assert_eq!(g.tick(), TickOutcome::Died);
        assert_eq!(g.score(), 0);
        assert_eq!(g.snake().len(), 3);
    }

    #[test]
    fn reversal_is_refused() {
        let mut s = Snake::new(p(10, 10), 3, 10);
        assert!(!s.turn(Direction::Left));
        assert_eq!(s.direction(), Direction::Right);

        assert!(s.turn(Direction::Up));
        s.advance();
        assert!(!s.turn(Direction::Down));
        assert_eq!(s.direction(), Direction::Up);
        assert!(s.turn(Direction::Up));
    }

    #[test]
    fn two_turns_between_moves_cannot_reverse() {
        let mut s = Snake::new(p(10, 10), 3, 10);
        // Up is legal, but Left would point back at the neck
        assert!(s.turn(Direction::Up));
        assert!(!s.turn(Direction::Left));
        assert_eq!(s.direction(), Direction::Up);

        s.advance();
        assert_eq!(s.body(), &[p(10, 9), p(10, 10), p(9, 10)]);
        assert!(!s.hits_self());

        // after moving up, Left is an ordinary turn
        assert!(s.turn(Direction::Left));
    }

    #[test]
    fn food_never_spawns_on_snake() {
        // 4x2 grid with one free cell
        let cfg = GameConfig::DEFAULT.with_grid(4, 2).with_max_len(8);
        let mut g = Game::new(cfg).unwrap();
        g.snake = Snake::from_segments(
            &[p(0, 0), p(1, 0), p(2, 0), p(3, 0), p(3, 1), p(2, 1), p(1, 1)],
            Direction::Down,
            8,
        );
        for _ in 0..20 {
            g.spawn_food();
            assert_eq!(g.food(), p(0, 1));
        }

        let mut g = game();
        for _ in 0..200 {
            g.spawn_food();
            assert!(!g.snake().contains(g.food()));
            let food = g.food();
            assert!((0..80).contains(&food.x) && (0..25).contains(&food.y));
        }
    }

    #[test]
    fn restart_matches_first_game() {
        let first = game();
        let mut g = game();
        g.snake_mut().turn(Direction::Down);
        g.food = p(40, 13);
        g.tick();
        for _ in 0..20 {
            g.tick();
        }
        assert!(g.is_over());

        g.restart();
        assert_eq!(g.snake().body(), first.snake().body());
        assert_eq!(g.snake().direction(), Direction::Right);
        assert_eq!(g.score(), 0);
        assert_eq!(g.status(), Status::Running);
        assert!(!g.snake().contains(g.food()));
    }

    #[test]
    fn restart_keeps_generator_running() {
        let mut g = game();
        let before = *g.rng();
        g.restart();
        assert_ne!(*g.rng(), before);
    }

    #[test]
    fn same_seed_same_food() {
        let a = game();
        let b = game();
        assert_eq!(a.food(), b.food());

        let c = Game::new(GameConfig::DEFAULT.with_seed(99)).unwrap();
        assert_ne!(c.food(), a.food());
    }

    #[test]
    fn invalid_config_is_rejected() {
        let cfg = GameConfig::DEFAULT.with_divisors(0, 0);
        assert_eq!(Game::new(cfg).unwrap_err(), ConfigError::ZeroDivisor);
    }
}
