//! Production Environment implementation using system time and RNG.
//!
//! `SystemEnv` is the production implementation of the Environment trait using
//! real system time and OS-seeded randomness.
//!
//! # Capabilities
//!
//! - ChaCha20 stream seeded once from the OS (getrandom). Not reproducible
//! - Tokio async sleep for actual wall-clock delays

use std::{
    sync::{Arc, Mutex, PoisonError},
    time::Duration,
};

use quizling_core::Environment;
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;

use crate::EntropyError;

/// Production environment using system time and OS-seeded randomness.
///
/// Clones share one random stream.
#[derive(Clone, Debug)]
pub struct SystemEnv {
    rng: Arc<Mutex<ChaCha20Rng>>,
}

impl SystemEnv {
    /// Create a new system environment.
    ///
    /// Entropy is read from the OS once, here; drawing random bytes later
    /// cannot fail.
    pub fn new() -> Result<Self, EntropyError> {
        let mut seed = [0u8; 32];
        getrandom::fill(&mut seed).map_err(EntropyError)?;
        Ok(Self { rng: Arc::new(Mutex::new(ChaCha20Rng::from_seed(seed))) })
    }
}

impl Environment for SystemEnv {
    fn sleep(&self, duration: Duration) -> impl std::future::Future<Output = ()> + Send {
        tokio::time::sleep(duration)
    }

    fn random_bytes(&self, buffer: &mut [u8]) {
        // The stream holds no invariant a panicking holder could break
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        rng.fill_bytes(buffer);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn setup_error_boxes_like_the_binary_expects() -> Result<(), Box<dyn std::error::Error>> {
        let env = SystemEnv::new()?;
        let _ = env.random_u64();
        Ok(())
    }

    #[test]
    fn independent_environments_differ() {
        let first = SystemEnv::new().unwrap();
        let second = SystemEnv::new().unwrap();

        // Extremely unlikely to be equal if seeded from the OS
        assert_ne!(first.random_u64(), second.random_u64());
    }

    #[test]
    fn clones_share_one_stream() {
        let env = SystemEnv::new().unwrap();
        let clone = env.clone();

        let mut bytes1 = [0u8; 32];
        let mut bytes2 = [0u8; 32];
        env.random_bytes(&mut bytes1);
        clone.random_bytes(&mut bytes2);

        assert_ne!(bytes1, bytes2, "A clone continues the stream, it does not replay it");
    }

    #[tokio::test]
    async fn system_env_sleep_works() {
        let env = SystemEnv::new().unwrap();

        let start = tokio::time::Instant::now();
        env.sleep(Duration::from_millis(50)).await;
        let elapsed = start.elapsed();

        assert!(elapsed >= Duration::from_millis(50), "Sleep should wait at least 50ms");
    }
}
