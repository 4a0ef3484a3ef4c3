// game/rng.rs
//
// Linear congruential generator (glibc `rand()` constants). Deterministic for
// a given seed and call sequence; never reseeded.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lcg {
    state: u32,
}

impl Lcg {
    const MUL: u32 = 1_103_515_245;
    const INC: u32 = 12_345;

    pub const fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    pub const fn state(&self) -> u32 {
        self.state
    }

    /// Next value in 0..=0x7FFF.
    pub fn next(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(Self::MUL).wrapping_add(Self::INC);
        (self.state >> 16) & 0x7FFF
    }

    /// Next value in 0..bound. `bound` must be non-zero.
    pub fn below(&mut self, bound: u32) -> u32 {
        self.next() % bound
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_reference_sequence() {
        // seed 1 is the classic rand() start: 16838, 5758, 10113
        let mut rng = Lcg::new(1);
        assert_eq!(rng.next(), 16838);
        assert_eq!(rng.next(), 5758);
        assert_eq!(rng.next(), 10113);
    }

    #[test]
    fn same_seed_same_stream() {
        let mut a = Lcg::new(0x1337);
        let mut b = Lcg::new(0x1337);
        for _ in 0..1000 {
            let v = a.next();
            assert_eq!(v, b.next());
            assert!(v <= 0x7FFF);
        }
        assert_eq!(a.state(), b.state());
    }

    #[test]
    fn below_stays_in_range() {
        let mut rng = Lcg::new(7);
        assert!((0..500).all(|_| rng.below(25) < 25));
    }
}
