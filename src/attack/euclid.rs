use num_bigint::BigUint;
use std::mem;
use tracing::debug;

use super::divide::Divider;
use super::mapper::Mapper;
use crate::oracle::{Oracle, OracleClient};
use crate::utils::bigint;
use crate::utils::errors::{Error, Result};

/// Witness pair of the encrypted Euclidean recurrence.
///
/// `pt * u` and `pt * v` (mod n) are always two consecutive remainders of
/// Euclid run on `pt * k` and `pt * l`. Since `u` and `v` evolve by the same
/// recurrence as those remainders, `u` is also the Bezout combination
/// `alpha * k + beta * l` of the current remainder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EuclidState {
    u: BigUint,
    v: BigUint,
    steps: usize,
}

impl EuclidState {
    pub fn new(k: BigUint, l: BigUint) -> Self {
        EuclidState { u: k, v: l, steps: 0 }
    }

    pub fn is_terminal(&self, mapper: &Mapper) -> bool {
        mapper.is_zero(&self.v)
    }

    /// (u, v) <- (v, u - q * v)
    pub fn advance(&mut self, q: &BigUint, n: &BigUint) {
        let remainder = bigint::sub_mod(&self.u, &bigint::mul_mod(&self.v, q, n), n);
        self.u = mem::replace(&mut self.v, remainder);
        self.steps += 1;
    }

    pub fn u(&self) -> &BigUint {
        &self.u
    }

    pub fn v(&self) -> &BigUint {
        &self.v
    }

    pub fn steps(&self) -> usize {
        self.steps
    }

    pub fn into_witness(self) -> BigUint {
        self.u
    }
}

#[derive(Debug, Clone, Copy)]
pub struct EuclidEngine<'m> {
    divider: Divider<'m>,
    max_steps: usize,
}

impl<'m> EuclidEngine<'m> {
    pub fn new(divider: Divider<'m>) -> Self {
        let bits = divider.comparator().mapper().modulus().bits() as usize;
        EuclidEngine {
            divider,
            max_steps: 2 * bits + 8,
        }
    }

    pub fn max_steps(&self) -> usize {
        self.max_steps
    }

    /// Runs the recurrence from (k, l) until `v` hits zero. The terminal `u`
    /// satisfies `pt * u = gcd(pt * k mod n, pt * l mod n) (mod n)`.
    pub fn run<O: Oracle + ?Sized>(
        &self,
        client: &mut OracleClient<O>,
        k: &BigUint,
        l: &BigUint,
    ) -> Result<EuclidState> {
        let mapper = self.divider.comparator().mapper();
        let n = mapper.modulus();
        let mut state = EuclidState::new(k.clone(), l.clone());

        while !state.is_terminal(mapper) {
            if state.steps() >= self.max_steps {
                return Err(Error::AmbiguousComparison);
            }

            debug!(
                iteration = state.steps() + 1,
                queries = client.queries(),
                "euclidean step"
            );
            let q = self.divider.divide(client, state.u(), state.v())?;
            state.advance(&q, n);
        }

        Ok(state)
    }
}
