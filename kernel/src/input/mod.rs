// input/mod.rs
//
// Polled keyboard input.
// - `KeySource`: one raw scan code per poll, or nothing (no queueing)
// - scan code set 1 subset: WASD, arrows, Space
// - `poll`: mask the release bit, remember the key, steer the snake
//
// Keys pressed and released between two polls are lost; the loop polls often
// enough that this is not noticeable.

use arrayvec::ArrayVec;

use crate::game::{Direction, Snake};

/// Set on break (key release) codes.
pub const RELEASE_BIT: u8 = 0x80;

/// A device that may have one key code ready.
pub trait KeySource {
    /// Raw scan code if the device has data, release bit included.
    fn poll_key(&mut self) -> Option<u8>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ScanCode {
    W = 0x11,
    A = 0x1E,
    S = 0x1F,
    D = 0x20,
    Space = 0x39,
    // keypad/arrow cluster (E0 prefix is ignored)
    Up = 0x48,
    Left = 0x4B,
    Right = 0x4D,
    Down = 0x50,
}

impl ScanCode {
    pub const RESTART: Self = ScanCode::Space;

    pub const fn from_raw(code: u8) -> Option<Self> {
        Some(match code & !RELEASE_BIT {
            0x11 => ScanCode::W,
            0x1E => ScanCode::A,
            0x1F => ScanCode::S,
            0x20 => ScanCode::D,
            0x39 => ScanCode::Space,
            0x48 => ScanCode::Up,
            0x4B => ScanCode::Left,
            0x4D => ScanCode::Right,
            0x50 => ScanCode::Down,
            _ => return None,
        })
    }

    pub const fn code(self) -> u8 {
        self as u8
    }

    pub const fn direction(self) -> Option<Direction> {
        match self {
            ScanCode::W | ScanCode::Up => Some(Direction::Up),
            ScanCode::S | ScanCode::Down => Some(Direction::Down),
            ScanCode::A | ScanCode::Left => Some(Direction::Left),
            ScanCode::D | ScanCode::Right => Some(Direction::Right),
            ScanCode::Space => None,
        }
    }
}

/// Reads at most one key. Any key overwrites `last_key`; movement keys also
/// request a turn (reversals are refused by the snake).
pub fn poll<K: KeySource + ?Sized>(
    keys: &mut K,
    last_key: &mut Option<u8>,
    snake: &mut Snake,
) -> Option<u8> {
    let code = keys.poll_key()? & !RELEASE_BIT;
    *last_key = Some(code);
    if let Some(dir) = ScanCode::from_raw(code).and_then(ScanCode::direction) {
        snake.turn(dir);
    }
    Some(code)
}

// —————————————————— scripted source ——————————————————

const SCRIPT_CAP: usize = 512;

/// Host-side key source that replays a script, one entry per poll.
/// `None` entries are idle polls; an exhausted script stays idle.
#[derive(Debug, Clone, Default)]
pub struct ScriptedKeys {
    script: ArrayVec<Option<u8>, SCRIPT_CAP>,
    next: usize,
}

impl ScriptedKeys {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_codes(codes: &[u8]) -> Self {
        let mut keys = Self::new();
        for &code in codes {
            keys.push(code);
        }
        keys
    }

    /// Queues a key for a future poll. Silently dropped once the script is full.
    pub fn push(&mut self, code: u8) -> &mut Self {
        let _ = self.script.try_push(Some(code));
        self
    }

    /// Queues `polls` idle polls.
    pub fn idle(&mut self, polls: usize) -> &mut Self {
        for _ in 0..polls {
            if self.script.try_push(None).is_err() {
                break;
            }
        }
        self
    }

    pub fn remaining(&self) -> usize {
        self.script.len() - self.next
    }
}

impl KeySource for ScriptedKeys {
    fn poll_key(&mut self) -> Option<u8> {
        let entry = self.script.get(self.next).copied()?;
        self.next += 1;
        entry
    }
}
