//! xorshift64* random number generator
//!
//! Fast, high-quality PRNG used to generate synthetic workloads for the
//! event queue.
//!
//! # Algorithm
//!
//! xorshift64* is a variant of xorshift that passes TestU01's BigCrush
//! statistical tests. It uses 64-bit state and produces 64-bit output.
//!
//! # Determinism
//!
//! Same seed → same sequence of random numbers. This is CRITICAL for:
//! - Debugging (reproduce an exact run)
//! - Testing (verify behavior)
//! - Research (validate results)

use serde::{Deserialize, Serialize};

/// Deterministic random number generator using xorshift64*
///
/// # Example
/// ```
/// use sampler_scheduler_core_rs::RngManager;
///
/// let mut rng = RngManager::new(12345);
/// let value = rng.next();
/// let variable = rng.range(0, 100); // [0, 100)
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngManager {
    /// Internal state (64-bit)
    state: u64,
}

impl RngManager {
    /// Create a new RNG with given seed
    ///
    /// # Arguments
    /// * `seed` - Initial seed value (u64)
    pub fn new(seed: u64) -> Self {
        // Ensure seed is never zero (xorshift requirement)
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u64 value
    ///
    /// This advances the internal state and returns a random value.
    pub fn next(&mut self) -> u64 {
        // xorshift64* algorithm
        let mut x = self.state;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.state = x;
        x.wrapping_mul(0x2545F4914F6CDD1D)
    }

    /// Generate a random index in range [min, max)
    ///
    /// Used to pick variables when generating synthetic workloads.
    ///
    /// # Panics
    /// Panics if min >= max
    ///
    /// # Example
    /// ```
    /// use sampler_scheduler_core_rs::RngManager;
    ///
    /// let mut rng = RngManager::new(12345);
    /// let variable = rng.range(0, 8);
    /// assert!(variable < 8);
    /// ```
    pub fn range(&mut self, min: usize, max: usize) -> usize {
        assert!(min < max, "min must be less than max");

        let value = self.next();
        let range_size = (max - min) as u64;
        min + (value % range_size) as usize
    }

    /// Get current RNG state (for checkpointing/replay)
    ///
    /// # Example
    /// ```
    /// use sampler_scheduler_core_rs::RngManager;
    ///
    /// let rng = RngManager::new(12345);
    /// let state = rng.get_state();
    ///
    /// // Later, can recreate RNG from this state
    /// let rng2 = RngManager::new(state);
    /// ```
    pub fn get_state(&self) -> u64 {
        self.state
    }

    /// Generate random f64 in range [0.0, 1.0)
    ///
    /// Useful for sampling from probability distributions.
    pub fn next_f64(&mut self) -> f64 {
        let value = self.next();
        // Convert to [0.0, 1.0) by dividing by 2^64
        (value >> 11) as f64 * (1.0 / ((1u64 << 53) as f64))
    }

    /// Sample an exponentially distributed holding time with the given rate
    ///
    /// Inverse-transform sampling: `-ln(1 - u) / rate` with `u` uniform in
    /// [0, 1). The result is always finite and non-negative, so it can be
    /// added to a clock and queued directly.
    ///
    /// # Panics
    /// Panics if rate <= 0
    ///
    /// # Example
    /// ```
    /// use sampler_scheduler_core_rs::RngManager;
    ///
    /// let mut rng = RngManager::new(12345);
    /// let holding_time = rng.next_exponential(2.0);
    /// assert!(holding_time >= 0.0);
    /// ```
    pub fn next_exponential(&mut self, rate: f64) -> f64 {
        assert!(rate > 0.0, "rate must be positive");

        let u = self.next_f64();
        // u < 1.0 always holds, so ln(1 - u) is finite
        -(1.0 - u).ln() / rate
    }
}
