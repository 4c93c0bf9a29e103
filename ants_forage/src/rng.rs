use rand::{RngCore, SeedableRng};
use std::f64::consts::TAU;
use std::time::{SystemTime, UNIX_EPOCH};

/// Modulus of the default Park-Miller generator (a Mersenne prime, 2^31 - 1).
pub const MODULUS: u64 = 2_147_483_647;
/// Multiplier of the default Park-Miller generator.
pub const MULTIPLIER: u64 = 16_807;
/// Increment of the default generator. Zero makes it a pure multiplicative generator.
pub const INCREMENT: u64 = 0;

/// Deterministic linear-congruential random source.
///
/// Every stochastic decision in the simulation draws from one instance of this type,
/// so two runs seeded identically and driven with the same calls produce identical results.
///
/// The type also implements [`RngCore`] and [`SeedableRng`], which lets it drive anything
/// in the `rand` ecosystem (`gen_range`, `shuffle`, distributions) without a second generator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RandomSource {
    state: u64,
    modulus: u64,
    multiplier: u64,
    increment: u64,
}

impl RandomSource {
    /// Creates a random source with the default Park-Miller constants.
    ///
    /// # Arguments
    /// * `seed` - The initial state. It is reduced modulo [`MODULUS`].
    pub fn new(seed: u64) -> RandomSource {
        RandomSource::with_constants(seed, MODULUS, MULTIPLIER, INCREMENT)
    }

    /// Creates a random source seeded from the wall clock (milliseconds since the epoch).
    pub fn from_clock() -> RandomSource {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis();
        RandomSource::new((millis % MODULUS as u128) as u64)
    }

    /// Creates a random source with custom generator constants.
    ///
    /// # Arguments
    /// * `seed` - The initial state, reduced modulo `modulus`.
    /// * `modulus` - The generator modulus. A modulus of zero is treated as one.
    /// * `multiplier` - The generator multiplier.
    /// * `increment` - The generator increment.
    pub fn with_constants(
        seed: u64,
        modulus: u64,
        multiplier: u64,
        increment: u64,
    ) -> RandomSource {
        let modulus = modulus.max(1);
        let mut state = seed % modulus;

        // Zero is a fixed point of a purely multiplicative generator
        if state == 0 && increment % modulus == 0 && modulus > 1 {
            state = 1;
        }

        RandomSource {
            state,
            modulus,
            multiplier,
            increment,
        }
    }

    /// The current generator state, always in `[0, modulus)`.
    pub fn state(&self) -> u64 {
        self.state
    }

    /// Advances the generator and returns a float in `[0, 1)`.
    pub fn draw01(&mut self) -> f64 {
        let next = (self.multiplier as u128 * self.state as u128 + self.increment as u128)
            % self.modulus as u128;
        self.state = next as u64;
        self.state as f64 / self.modulus as f64
    }

    /// Returns a float in `[a, b)`.
    pub fn uniform(&mut self, a: f64, b: f64) -> f64 {
        a + (b - a) * self.draw01()
    }

    /// Returns an integer in `[a, b]`, both ends inclusive.
    pub fn randint(&mut self, a: i64, b: i64) -> i64 {
        a + (self.draw01() * (b - a + 1) as f64) as i64
    }

    /// Returns a normally distributed float using the Box-Muller transform.
    ///
    /// Consumes exactly two draws. A first draw of zero is clamped to the smallest
    /// non-zero value the generator can produce so the result is always finite.
    pub fn normal(&mut self, mean: f64, std: f64) -> f64 {
        let u1 = self.draw01().max(self.min_draw());
        let u2 = self.draw01();
        let z0 = (-2.0 * u1.ln()).sqrt() * (TAU * u2).cos();
        mean + std * z0
    }

    fn min_draw(&self) -> f64 {
        1.0 / self.modulus as f64
    }
}

impl RngCore for RandomSource {
    fn next_u32(&mut self) -> u32 {
        (self.draw01() * 4_294_967_296.0) as u32
    }

    fn next_u64(&mut self) -> u64 {
        let high = self.next_u32() as u64;
        let low = self.next_u32() as u64;
        (high << 32) | low
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(4) {
            let bytes = self.next_u32().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl SeedableRng for RandomSource {
    type Seed = [u8; 8];

    fn from_seed(seed: Self::Seed) -> RandomSource {
        RandomSource::new(u64::from_le_bytes(seed))
    }

    // The default implementation scrambles the seed, we want it used as the state
    fn seed_from_u64(state: u64) -> RandomSource {
        RandomSource::new(state)
    }
}
