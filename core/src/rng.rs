//! Deterministic random number generation.
//!
//! RULE: Nothing in the dashboard may call any platform RNG.
//! All randomness flows through StreamRng instances derived
//! from the single master seed on the DashboardConfig.
//!
//! Each stage gets its own RNG stream, seeded deterministically
//! from (master_seed XOR stream_index). This means:
//!   - Adding a new stage never changes existing stages' streams.
//!   - Each stage's stream is fully reproducible in isolation.

use rand::SeedableRng;
use rand_pcg::Pcg64Mcg;

/// A named, deterministic RNG for a single generation stage.
pub struct StreamRng {
    pub name: &'static str,
    inner: Pcg64Mcg,
}

impl StreamRng {
    /// Create a stream RNG from the master seed and a stable
    /// stream index. The index must never change once assigned.
    pub fn new(master_seed: u64, stream_index: u64) -> Self {
        let derived_seed = master_seed ^ (stream_index.wrapping_mul(0x9e37_79b9_7f4a_7c15));
        Self {
            name: "unnamed",
            inner: Pcg64Mcg::seed_from_u64(derived_seed),
        }
    }

    pub fn with_name(mut self, name: &'static str) -> Self {
        self.name = name;
        self
    }

    /// Roll a float in [0.0, 1.0).
    pub fn next_f64(&mut self) -> f64 {
        use rand::RngCore;
        let bits = self.inner.next_u64();
        (bits >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }

    /// Roll a u64 in [0, n).
    pub fn next_u64_below(&mut self, n: u64) -> u64 {
        use rand::Rng;
        assert!(n > 0, "n must be > 0");
        self.inner.gen_range(0..n)
    }

    /// Roll an integer in the half-open range [low, high).
    pub fn range_i64(&mut self, low: i64, high: i64) -> i64 {
        use rand::Rng;
        assert!(low < high, "empty range {low}..{high}");
        self.inner.gen_range(low..high)
    }

    /// Bernoulli trial: returns true with probability p.
    pub fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }

    /// Uniform pick from a non-empty slice.
    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        let idx = self.next_u64_below(items.len() as u64) as usize;
        &items[idx]
    }

    /// Index drawn from a discrete distribution given by `weights`.
    /// Weights need not sum to one; the last index absorbs rounding.
    pub fn weighted(&mut self, weights: &[f64]) -> usize {
        assert!(!weights.is_empty(), "weights must not be empty");
        let total: f64 = weights.iter().sum();
        let roll = self.next_f64() * total;
        let mut cumulative = 0.0;
        for (i, w) in weights.iter().enumerate() {
            cumulative += w;
            if roll < cumulative {
                return i;
            }
        }
        weights.len() - 1
    }
}

/// All stream RNGs for a single run, indexed by stable slot.
pub struct RngBank {
    master_seed: u64,
}

impl RngBank {
    pub fn new(master_seed: u64) -> Self {
        Self { master_seed }
    }

    pub fn master_seed(&self) -> u64 {
        self.master_seed
    }

    pub fn for_stream(&self, slot: StreamSlot) -> StreamRng {
        StreamRng::new(self.master_seed, slot as u64).with_name(slot.name())
    }
}

/// Stable stream slot assignments.
/// NEVER reorder or remove entries — only append.
/// Reordering changes every stream's seed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u64)]
pub enum StreamSlot {
    Loans = 0,
    Borrowers = 1,
    Bootstrap = 2,
}

impl StreamSlot {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Loans => "loans",
            Self::Borrowers => "borrowers",
            Self::Bootstrap => "bootstrap",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn streams_are_reproducible() {
        let bank = RngBank::new(42);
        let mut a = bank.for_stream(StreamSlot::Loans);
        let mut b = bank.for_stream(StreamSlot::Loans);
        for _ in 0..100 {
            assert_eq!(a.range_i64(5_000, 500_000), b.range_i64(5_000, 500_000));
        }
    }

    #[test]
    fn slots_get_independent_streams() {
        let bank = RngBank::new(42);
        let mut loans = bank.for_stream(StreamSlot::Loans);
        let mut borrowers = bank.for_stream(StreamSlot::Borrowers);
        let a: Vec<u64> = (0..16).map(|_| loans.next_u64_below(1_000_000)).collect();
        let b: Vec<u64> = (0..16).map(|_| borrowers.next_u64_below(1_000_000)).collect();
        assert_ne!(a, b, "Distinct slots should not share a stream");
        assert_eq!(loans.name, "loans");
    }

    #[test]
    fn range_stays_half_open() {
        let mut rng = RngBank::new(7).for_stream(StreamSlot::Borrowers);
        for _ in 0..1_000 {
            let age = rng.range_i64(20, 65);
            assert!((20..65).contains(&age), "age out of range: {age}");
        }
    }

    #[test]
    fn chance_tracks_probability() {
        let mut rng = RngBank::new(42).for_stream(StreamSlot::Loans);
        assert!((0..100).all(|_| !rng.chance(0.0)));
        assert!((0..100).all(|_| rng.chance(1.0)));
        let hits = (0..10_000).filter(|_| rng.chance(0.2)).count();
        assert!((1_700..2_300).contains(&hits), "hits = {hits}");
    }

    #[test]
    fn weighted_respects_zero_weights() {
        let mut rng = RngBank::new(3).for_stream(StreamSlot::Loans);
        for _ in 0..500 {
            assert_eq!(rng.weighted(&[0.0, 1.0]), 1);
        }
    }
}
