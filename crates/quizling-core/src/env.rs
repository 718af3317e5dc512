//! Environment abstraction for deterministic testing.
//!
//! Decouples game logic from system resources (time, randomness). Enables
//! deterministic simulation (virtual clock, seeded RNG) and production use with
//! real system resources.

use std::{future::Future, time::Duration};

use rand::RngCore;

/// Abstract environment providing time, randomness, and async primitives.
///
/// Given the same seed, a simulated environment MUST yield the same random
/// sequence.
pub trait Environment: Clone + Send + Sync + 'static {
    /// Sleeps for the specified duration.
    ///
    /// Only driver code awaits this (dismissal timers). Game logic never
    /// sleeps.
    fn sleep(&self, duration: Duration) -> impl Future<Output = ()> + Send;

    /// Fills the provided buffer with random bytes.
    fn random_bytes(&self, buffer: &mut [u8]);

    /// Generates a random `u64`.
    fn random_u64(&self) -> u64 {
        let mut bytes = [0u8; 8];
        self.random_bytes(&mut bytes);
        u64::from_be_bytes(bytes)
    }

    /// Borrow this environment as a [`rand::RngCore`].
    ///
    /// Lets `rand` algorithms (shuffling, ranges, choosing) draw from the
    /// environment's entropy source.
    fn rng(&self) -> EnvRng<'_, Self> {
        EnvRng { env: self }
    }
}

/// [`RngCore`] adapter over an [`Environment`].
#[derive(Debug)]
pub struct EnvRng<'a, E> {
    env: &'a E,
}

impl<E: Environment> RngCore for EnvRng<'_, E> {
    fn next_u32(&mut self) -> u32 {
        let mut bytes = [0u8; 4];
        self.env.random_bytes(&mut bytes);
        u32::from_be_bytes(bytes)
    }

    fn next_u64(&mut self) -> u64 {
        self.env.random_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.env.random_bytes(dest);
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.env.random_bytes(dest);
        Ok(())
    }
}
