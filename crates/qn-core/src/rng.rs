//! Multi-stream Lehmer pseudo-random number generator.
//!
//! # Determinism strategy
//!
//! One `RngStreams` holds 256 independent lanes of the classical Lehmer
//! multiplicative congruential generator
//!
//!   x' = a·x mod m,   a = 48271,   m = 2^31 − 1
//!
//! Lane `i+1` is planted from lane `i`'s seed via the jump multiplier
//! `A = a^k mod m` (k = period/256), which spaces the lanes evenly along the
//! single full-period cycle.  This means:
//!
//! - Lanes never interact: drawing from one lane cannot disturb another, so
//!   each stochastic component of a model (arrivals, one lane per service
//!   sampler, routing, seed chaining) can own a lane and stay reproducible
//!   no matter how the others interleave.
//! - Re-planting with the same seed reproduces every lane's sequence exactly.
//!
//! The state advance uses Schrage's decomposition so all intermediate values
//! stay within `i64` without overflow regardless of platform.
//!
//! `RngStreams` also implements [`rand::RngCore`] (31 significant bits per
//! `next_u32`, drawn from the selected lane) so `rand` distribution types can
//! ride a lane when a model needs something the [`dists`][crate::dists]
//! module does not provide.

/// Modulus `m = 2^31 − 1` (a Mersenne prime).
pub const MODULUS: i64 = 2_147_483_647;

/// Full-period multiplier.
pub const MULTIPLIER: i64 = 48_271;

/// Jump multiplier `a^k mod m` separating consecutive lane seeds.
const JUMP_MULTIPLIER: i64 = 22_925;

/// Number of independent lanes.
pub const STREAM_COUNT: usize = 256;

/// Seed used by [`RngStreams::default`].
pub const DEFAULT_SEED: i64 = 123_456_789;

// ── RngStreams ────────────────────────────────────────────────────────────────

/// 256 independent Lehmer lanes with one selected "current" lane.
///
/// All draws (`random`, the `dists` functions, the `RngCore` impl) advance
/// only the selected lane.  Select a lane with [`select_stream`] before
/// drawing; components that own a lane re-select it on every draw so the
/// selection of other components never leaks into their sequence.
///
/// [`select_stream`]: RngStreams::select_stream
pub struct RngStreams {
    states:  [i64; STREAM_COUNT],
    current: usize,
}

impl RngStreams {
    /// Create a stream set planted with `seed` (see [`plant_seeds`]).
    ///
    /// [`plant_seeds`]: RngStreams::plant_seeds
    pub fn new(seed: i64) -> Self {
        let mut streams = RngStreams {
            states:  [1; STREAM_COUNT],
            current: 0,
        };
        streams.plant_seeds(seed);
        streams
    }

    /// Plant all 256 lanes from a single seed and select lane 0.
    ///
    /// The seed is normalized into `[1, m−1]`; a seed congruent to zero is
    /// replaced by [`DEFAULT_SEED`] (zero is a fixed point of the recurrence
    /// and would freeze the lane).  Re-planting is the only way to reset a
    /// stream set.
    pub fn plant_seeds(&mut self, seed: i64) {
        let mut s = seed.rem_euclid(MODULUS);
        if s == 0 {
            s = DEFAULT_SEED;
        }
        self.states[0] = s;
        for i in 1..STREAM_COUNT {
            self.states[i] = schrage(JUMP_MULTIPLIER, JUMP_Q, JUMP_R, self.states[i - 1]);
        }
        self.current = 0;
    }

    /// Select the lane subsequent draws advance.
    ///
    /// # Panics
    /// Panics if `stream >= 256`; lane indices are fixed at model-construction
    /// time, so an out-of-range index is a programming error.
    #[inline]
    pub fn select_stream(&mut self, stream: usize) {
        assert!(
            stream < STREAM_COUNT,
            "stream index {stream} out of range (max {})",
            STREAM_COUNT - 1
        );
        self.current = stream;
    }

    /// Index of the currently selected lane.
    #[inline]
    pub fn stream(&self) -> usize {
        self.current
    }

    /// Draw a uniform variate in the open interval `(0, 1)`.
    ///
    /// Advances only the selected lane.  The endpoints are unreachable: the
    /// lane state is always in `[1, m−1]`, so `state / m` is in `(0, 1)`.
    #[inline]
    pub fn random(&mut self) -> f64 {
        self.advance() as f64 / MODULUS as f64
    }

    /// Current state of the selected lane.
    ///
    /// Reading the state after a draw is how replication drivers chain seeds:
    /// draw once on a dedicated lane, then use its state as the next
    /// replication's planting seed.
    #[inline]
    pub fn seed(&self) -> i64 {
        self.states[self.current]
    }

    /// Overwrite the selected lane's state (normalized like `plant_seeds`).
    pub fn put_seed(&mut self, seed: i64) {
        let mut s = seed.rem_euclid(MODULUS);
        if s == 0 {
            s = DEFAULT_SEED;
        }
        self.states[self.current] = s;
    }

    /// Advance the selected lane one step and return the new state.
    #[inline]
    fn advance(&mut self) -> i64 {
        let next = schrage(MULTIPLIER, Q, R, self.states[self.current]);
        self.states[self.current] = next;
        next
    }
}

impl Default for RngStreams {
    fn default() -> Self {
        RngStreams::new(DEFAULT_SEED)
    }
}

// ── Schrage decomposition ─────────────────────────────────────────────────────

const Q: i64 = MODULUS / MULTIPLIER;
const R: i64 = MODULUS % MULTIPLIER;
const JUMP_Q: i64 = MODULUS / JUMP_MULTIPLIER;
const JUMP_R: i64 = MODULUS % JUMP_MULTIPLIER;

/// One step of `a·x mod m` computed as `a·(x mod q) − r·(x / q)` with
/// `q = m/a`, `r = m mod a`, which never leaves `(−m, m)`.
#[inline]
fn schrage(a: i64, q: i64, r: i64, x: i64) -> i64 {
    let t = a * (x % q) - r * (x / q);
    if t > 0 { t } else { t + MODULUS }
}

// ── rand ecosystem bridge ─────────────────────────────────────────────────────

impl rand::RngCore for RngStreams {
    /// 31 significant bits from the selected lane (the high bit is zero).
    #[inline]
    fn next_u32(&mut self) -> u32 {
        // state is in [1, m−1]; m−1 fits in 31 bits
        (self.advance() - 1) as u32
    }

    #[inline]
    fn next_u64(&mut self) -> u64 {
        ((self.next_u32() as u64) << 31) | self.next_u32() as u64
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(4) {
            let word = self.next_u32().to_le_bytes();
            chunk.copy_from_slice(&word[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}
