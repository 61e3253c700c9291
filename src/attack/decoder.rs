use num_bigint::{BigUint, RandBigInt};
use num_traits::One;
use rand::Rng;
use std::time::Instant;
use tracing::{debug, error, info, warn};

use super::compare::Comparator;
use super::divide::Divider;
use super::euclid::EuclidEngine;
use super::mapper::Mapper;
use crate::config::Config;
use crate::oracle::{Budget, Oracle, OracleClient};
use crate::utils::bigint;
use crate::utils::errors::{Error, Result};

/// Outcome of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recovery {
    pub plaintext: BigUint,
    pub queries: usize,
    pub attempts: usize,
}

/// Drives whole attempts: pick two small witnesses, run the encrypted
/// Euclid, invert and verify. Failed attempts are retried with fresh
/// witnesses until the budget (or deadline, or attempt cap) runs out.
pub struct Decoder<'a, O: ?Sized, R> {
    mapper: Mapper,
    config: Config,
    client: OracleClient<'a, O>,
    rng: R,
    attempts: usize,
}

impl<'a, O: Oracle + ?Sized, R: Rng> Decoder<'a, O, R> {
    pub fn new(
        n: &BigUint,
        e: &BigUint,
        ct: &BigUint,
        oracle: &'a mut O,
        config: Config,
        rng: R,
    ) -> Result<Self> {
        config.validate()?;
        let mapper = Mapper::new(n, e, ct)?;

        let mut budget = Budget::new(config.budget);
        if let Some(deadline) = config.deadline {
            budget = budget.with_deadline(Instant::now() + deadline);
        }

        Ok(Decoder {
            mapper,
            client: OracleClient::new(oracle, budget),
            config,
            rng,
            attempts: 0,
        })
    }

    pub fn queries(&self) -> usize {
        self.client.queries()
    }

    pub fn run(mut self) -> Result<Recovery> {
        loop {
            if let Some(max_attempts) = self.config.max_attempts {
                if self.attempts >= max_attempts {
                    break;
                }
            }
            self.attempts += 1;
            info!(
                attempt = self.attempts,
                queries = self.client.queries(),
                "starting attempt"
            );

            match self.attempt() {
                Ok(plaintext) => {
                    info!(
                        attempt = self.attempts,
                        queries = self.client.queries(),
                        "plaintext recovered"
                    );
                    return Ok(Recovery {
                        plaintext,
                        queries: self.client.queries(),
                        attempts: self.attempts,
                    });
                }
                Err(err) if err.is_terminal() => {
                    warn!(attempt = self.attempts, error = %err, "out of resources");
                    break;
                }
                Err(err) => {
                    warn!(
                        attempt = self.attempts,
                        error = %err,
                        "attempt failed, retrying with fresh witnesses"
                    );
                }
            }
        }

        let (attempts, queries) = (self.attempts, self.client.queries());
        error!(attempts, queries, "decryption failed");
        Err(Error::DecryptionFailed { attempts, queries })
    }

    fn attempt(&mut self) -> Result<BigUint> {
        let start = self.client.queries();
        let k = self.find_small_witness(start, None)?;
        let l = self.find_small_witness(start, Some(&k))?;
        debug!(
            setup_queries = self.client.queries() - start,
            "found two small witnesses"
        );

        self.attempt_with(&k, &l)
    }

    /// Runs the encrypted Euclid from a caller-chosen witness pair and
    /// verifies the result.
    pub fn attempt_with(&mut self, k: &BigUint, l: &BigUint) -> Result<BigUint> {
        let comparator = Comparator::new(&self.mapper, self.config.repetitions, self.config.vote);
        let engine = EuclidEngine::new(Divider::new(comparator));
        let state = engine.run(&mut self.client, k, l)?;
        info!(
            steps = state.steps(),
            queries = self.client.queries(),
            "euclidean algorithm terminated"
        );

        self.recover(state.u())
    }

    /// A single "below" answer on map(x) is conclusive: the oracle never
    /// reports a plaintext above its threshold as below it.
    fn find_small_witness(&mut self, start: usize, exclude: Option<&BigUint>) -> Result<BigUint> {
        let one = BigUint::one();
        let n = self.mapper.modulus();

        loop {
            let spent = self.client.queries() - start;
            if spent >= self.config.setup_limit {
                return Err(Error::NoSmallWitness { queries: spent });
            }

            let candidate = self.rng.gen_biguint_range(&one, n);
            if exclude == Some(&candidate) {
                continue;
            }
            if self.client.query(&self.mapper.map(&candidate))? {
                return Ok(candidate);
            }
        }
    }

    /// Inverts the candidate over the public integers and checks it against
    /// the public encryption equation.
    fn recover(&self, u: &BigUint) -> Result<BigUint> {
        let n = self.mapper.modulus();
        let candidate = bigint::invmod(u, n).ok_or(Error::VerificationFailed)?;

        if candidate.modpow(self.mapper.exponent(), n) != *self.mapper.ciphertext() {
            return Err(Error::VerificationFailed);
        }
        Ok(candidate)
    }
}
