//! Seedable PRNG used to scatter particles.
//!
//! Every random quantity in a field (position, velocity, radius, depth) is
//! drawn from one [`Xorshift64`], so a seed fully determines a generation.
//! Headless renders rely on this to be reproducible; the browser host seeds
//! it from `Math.random()`.

use serde::{Deserialize, Serialize};

/// Xorshift64 PRNG with shifts (13, 7, 17).
///
/// A seed of 0 is a fixed point of xorshift and is replaced with a non-zero
/// fallback.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Xorshift64 {
    state: u64,
}

impl Xorshift64 {
    const FALLBACK_SEED: u64 = 0x5EED_DEAD_BEEF_CAFE;

    /// Creates a new PRNG with the given seed.
    pub fn new(seed: u64) -> Self {
        Self {
            state: if seed == 0 { Self::FALLBACK_SEED } else { seed },
        }
    }

    /// Creates a PRNG from a float in `[0, 1)`, such as `Math.random()`.
    pub fn from_unit(value: f64) -> Self {
        let v = if value.is_finite() { value.abs().fract() } else { 0.0 };
        Self::new((v * u64::MAX as f64) as u64)
    }

    /// Advances the state and returns the next 64-bit value.
    pub fn next_u64(&mut self) -> u64 {
        self.state ^= self.state << 13;
        self.state ^= self.state >> 7;
        self.state ^= self.state << 17;
        self.state
    }

    /// Uniform f64 in `[0, 1)` built from the upper 53 bits.
    pub fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Uniform f64 in `[min, max)`. Returns `min` when the range is empty.
    pub fn next_range(&mut self, min: f64, max: f64) -> f64 {
        if max <= min {
            // keep the stream position independent of the range
            self.next_u64();
            return min;
        }
        let v = min + self.next_f64() * (max - min);
        // a fraction just below 1 can round up onto `max`
        if v >= max {
            below(max)
        } else {
            v
        }
    }

    /// Uniform f64 in `[-magnitude, magnitude)`.
    pub fn next_symmetric(&mut self, magnitude: f64) -> f64 {
        let m = magnitude.abs();
        self.next_range(-m, m)
    }
}

/// Largest f64 strictly less than `x` (finite `x`).
fn below(x: f64) -> f64 {
    if x > 0.0 {
        f64::from_bits(x.to_bits() - 1)
    } else if x == 0.0 {
        -f64::from_bits(1)
    } else {
        f64::from_bits(x.to_bits() + 1)
    }
}
