//! RNG module - swappable randomness for piece generation
//!
//! Two generators sit behind one [`RandomSource`] trait:
//!
//! - **Entropy**: OS-seeded `StdRng`, used for free play.
//! - **Seeded**: SplitMix64, used for the daily challenge. The seed is the FNV-1a 64-bit
//!   hash of the local date formatted as `yyyy-MM-dd`, so every client produces the same
//!   draw sequence on the same calendar day.
//!
//! Both the hash and the generator are bit-exact; changing either breaks the daily
//! fairness guarantee across clients.

use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

/// FNV-1a 64-bit offset basis
pub const FNV_OFFSET_BASIS: u64 = 14695981039346656037;

/// FNV-1a 64-bit prime
pub const FNV_PRIME: u64 = 1099511628211;

const SPLITMIX_GAMMA: u64 = 0x9E37_79B9_7F4A_7C15;

/// FNV-1a 64-bit hash: XOR each byte in, then multiply.
pub fn fnv1a64(bytes: &[u8]) -> u64 {
    let mut h = FNV_OFFSET_BASIS;
    for &b in bytes {
        h ^= b as u64;
        h = h.wrapping_mul(FNV_PRIME);
    }
    h
}

/// Daily seed for a date string already formatted as `yyyy-MM-dd`
pub fn seed_from_date_str(date: &str) -> u64 {
    fnv1a64(date.as_bytes())
}

/// Daily seed for a calendar date
pub fn daily_seed(date: NaiveDate) -> u64 {
    seed_from_date_str(&date.format("%Y-%m-%d").to_string())
}

/// Common interface over both generators
pub trait RandomSource {
    fn next_u64(&mut self) -> u64;

    /// Uniform float in the half-open interval `[0, 1)` built from the top 53 bits
    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }

    /// Random value in range `[0, max)`; 0 when `max` is 0
    fn next_below(&mut self, max: usize) -> usize {
        if max == 0 {
            return 0;
        }
        (self.next_u64() % max as u64) as usize
    }

    fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            return None;
        }
        let idx = self.next_below(items.len());
        items.get(idx)
    }

    /// Shuffle a slice using Fisher-Yates
    fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_below(i + 1);
            slice.swap(i, j);
        }
    }
}

/// SplitMix64 generator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitMix64 {
    state: u64,
}

impl SplitMix64 {
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Current internal state (the seed of the remaining stream)
    pub fn state(&self) -> u64 {
        self.state
    }
}

impl RandomSource for SplitMix64 {
    fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(SPLITMIX_GAMMA);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }
}

/// How a session draws its randomness
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RngMode {
    /// Platform entropy, different every session
    Random,
    /// Deterministic SplitMix64 stream from a fixed seed
    Seeded(u64),
}

impl RngMode {
    /// Daily-challenge mode for a `yyyy-MM-dd` date string
    pub fn daily(date: &str) -> Self {
        RngMode::Seeded(seed_from_date_str(date))
    }

    /// Daily-challenge mode for today's local date
    pub fn daily_today() -> Self {
        RngMode::Seeded(daily_seed(chrono::Local::now().date_naive()))
    }

    pub fn is_deterministic(&self) -> bool {
        matches!(self, RngMode::Seeded(_))
    }
}

impl Default for RngMode {
    fn default() -> Self {
        RngMode::Random
    }
}

/// The active generator. Built fresh from an [`RngMode`]; there is no state carried
/// across modes.
#[derive(Debug, Clone)]
pub enum GameRng {
    Entropy(StdRng),
    Seeded(SplitMix64),
}

impl GameRng {
    pub fn from_mode(mode: RngMode) -> Self {
        match mode {
            RngMode::Random => GameRng::Entropy(StdRng::from_os_rng()),
            RngMode::Seeded(seed) => GameRng::Seeded(SplitMix64::new(seed)),
        }
    }

    pub fn is_deterministic(&self) -> bool {
        matches!(self, GameRng::Seeded(_))
    }
}

impl RandomSource for GameRng {
    fn next_u64(&mut self) -> u64 {
        match self {
            GameRng::Entropy(rng) => rng.next_u64(),
            GameRng::Seeded(rng) => rng.next_u64(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fnv1a64_reference_vectors() {
        assert_eq!(fnv1a64(b""), FNV_OFFSET_BASIS);
        assert_eq!(fnv1a64(b"a"), 0xaf63dc4c8601ec8c);
        assert_eq!(fnv1a64(b"foobar"), 0x85944171f73967e8);
    }

    #[test]
    fn test_daily_seed_matches_formatted_string() {
        let date = NaiveDate::from_ymd_opt(2026, 2, 11).unwrap();
        assert_eq!(daily_seed(date), seed_from_date_str("2026-02-11"));
        assert_ne!(daily_seed(date), seed_from_date_str("2026-02-12"));
    }

    #[test]
    fn test_splitmix64_reference_stream() {
        let mut rng = SplitMix64::new(0);
        assert_eq!(rng.next_u64(), 0xe220a8397b1dcdaf);
        assert_eq!(rng.next_u64(), 0x6e789e6aa1b965f4);
    }

    #[test]
    fn test_rng_deterministic() {
        let mut rng1 = GameRng::from_mode(RngMode::daily("2026-02-11"));
        let mut rng2 = GameRng::from_mode(RngMode::daily("2026-02-11"));

        for _ in 0..100 {
            assert_eq!(rng1.next_u64(), rng2.next_u64());
        }
    }

    #[test]
    fn test_next_f64_half_open() {
        let mut rng = SplitMix64::new(42);
        for _ in 0..10_000 {
            let v = rng.next_f64();
            assert!((0.0..1.0).contains(&v));
        }
    }

    #[test]
    fn test_next_below_and_choose() {
        let mut rng = SplitMix64::new(7);
        for _ in 0..1000 {
            assert!(rng.next_below(6) < 6);
        }
        assert_eq!(rng.next_below(0), 0);

        let empty: [u8; 0] = [];
        assert!(rng.choose(&empty).is_none());
        assert_eq!(rng.choose(&[9u8]), Some(&9));
    }

    #[test]
    fn test_shuffle_is_permutation() {
        let mut rng = SplitMix64::new(99);
        let mut items = [1, 2, 3, 4, 5, 6, 7, 8];
        rng.shuffle(&mut items);
        let mut sorted = items;
        sorted.sort();
        assert_eq!(sorted, [1, 2, 3, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn test_modes() {
        assert!(RngMode::daily("2026-02-11").is_deterministic());
        assert!(!RngMode::Random.is_deterministic());
        assert!(GameRng::from_mode(RngMode::Seeded(1)).is_deterministic());
        assert!(!GameRng::from_mode(RngMode::Random).is_deterministic());
    }
}
