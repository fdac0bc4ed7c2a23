//! Deterministic random number generation
//!
//! Uses xorshift64* algorithm for fast, deterministic random number generation.
//! CRITICAL: All randomness in the planner MUST go through a [`RandomSource`]
//! passed in by the caller. There is no global generator.

mod xorshift;

pub use xorshift::RngManager;

/// Draw a seed from OS randomness for callers that did not pick one
///
/// Record the returned value if the run must be reproducible later.
pub fn fresh_seed() -> u64 {
    uuid::Uuid::new_v4().as_u128() as u64
}

/// Source of randomness injected into graph search and relaxation.
///
/// Implementors only provide [`RandomSource::next_u64`]; index selection and
/// shuffling are derived from it so every implementation shuffles the same way.
pub trait RandomSource {
    /// Next raw 64-bit value.
    fn next_u64(&mut self) -> u64;

    /// Uniform index in `[0, upper)`.
    ///
    /// Raw values from the incomplete top bucket are redrawn so every index
    /// is equally likely.
    ///
    /// # Panics
    /// Panics if `upper == 0`
    fn below(&mut self, upper: usize) -> usize {
        assert!(upper > 0, "upper bound must be positive");
        let upper = upper as u64;
        let zone = u64::MAX - u64::MAX % upper;
        loop {
            let value = self.next_u64();
            if value < zone {
                return (value % upper) as usize;
            }
        }
    }

    /// In-place Fisher–Yates shuffle.
    ///
    /// Index `i` is swapped with a uniformly chosen `j` in `[i, len)`.
    fn shuffle<T>(&mut self, items: &mut [T])
    where
        Self: Sized,
    {
        let len = items.len();
        for i in 0..len {
            let j = i + self.below(len - i);
            items.swap(i, j);
        }
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_u64(&mut self) -> u64 {
        (**self).next_u64()
    }
}
