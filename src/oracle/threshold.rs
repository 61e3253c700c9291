//! Simulated threshold oracles backed by a private key.
//!
//! `ThresholdOracle` behaves like the challenge server: every call draws a
//! fresh threshold uniformly from `[7, n / 37]` and answers whether the
//! decrypted ciphertext lies below it. `FixedThresholdOracle` pins the
//! threshold at `n / 37`, which makes every comparison the attack issues
//! exact.

use num_bigint::{BigUint, RandBigInt};
use num_traits::One;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::Oracle;
use crate::utils::crypto::rsa::Rsa;

const THRESHOLD_FLOOR: u32 = 7;
const THRESHOLD_DIVISOR: u32 = 37;

fn threshold_ceiling(n: &BigUint) -> BigUint {
    n / THRESHOLD_DIVISOR
}

pub struct ThresholdOracle<R = StdRng> {
    rsa: Rsa,
    low: BigUint,
    // exclusive
    high: BigUint,
    rng: R,
}

impl ThresholdOracle<StdRng> {
    pub fn new(rsa: Rsa) -> Self {
        Self::with_rng(rsa, StdRng::from_entropy())
    }
}

impl<R: Rng> ThresholdOracle<R> {
    pub fn with_rng(rsa: Rsa, rng: R) -> Self {
        let high = threshold_ceiling(&rsa.n) + BigUint::one();
        ThresholdOracle {
            low: BigUint::from(THRESHOLD_FLOOR),
            high,
            rsa,
            rng,
        }
    }
}

impl<R: Rng> Oracle for ThresholdOracle<R> {
    fn decide(&mut self, ciphertext: &BigUint) -> bool {
        let threshold = self.rng.gen_biguint_range(&self.low, &self.high);
        self.rsa.decrypt(ciphertext) < threshold
    }
}

pub struct FixedThresholdOracle {
    rsa: Rsa,
    threshold: BigUint,
}

impl FixedThresholdOracle {
    pub fn new(rsa: Rsa) -> Self {
        let threshold = threshold_ceiling(&rsa.n);
        FixedThresholdOracle { rsa, threshold }
    }

    pub fn threshold(&self) -> &BigUint {
        &self.threshold
    }
}

impl Oracle for FixedThresholdOracle {
    fn decide(&mut self, ciphertext: &BigUint) -> bool {
        self.rsa.decrypt(ciphertext) < self.threshold
    }
}
