use num_bigint::BigUint;
use num_traits::{One, Zero};
use tracing::trace;

use super::compare::Comparator;
use crate::oracle::{Oracle, OracleClient};
use crate::utils::bigint;
use crate::utils::errors::{Error, Result};

/// Integer division of two hidden plaintext multiples.
#[derive(Debug, Clone, Copy)]
pub struct Divider<'m> {
    comparator: Comparator<'m>,
    max_quotient_bits: u64,
}

impl<'m> Divider<'m> {
    pub fn new(comparator: Comparator<'m>) -> Self {
        // no quotient of two residues mod n reaches n
        let max_quotient_bits = comparator.mapper().modulus().bits();
        Divider {
            comparator,
            max_quotient_bits,
        }
    }

    pub fn comparator(&self) -> &Comparator<'m> {
        &self.comparator
    }

    /// floor((pt * a mod n) / (pt * b mod n)), found by galloping up to the
    /// first quotient that wraps and then bisecting the last bracket.
    pub fn divide<O: Oracle + ?Sized>(
        &self,
        client: &mut OracleClient<O>,
        a: &BigUint,
        b: &BigUint,
    ) -> Result<BigUint> {
        let mapper = self.comparator.mapper();
        if mapper.is_zero(b) {
            return Err(Error::DivisionByZero);
        }

        // invariant: fits(lo) holds, fits(hi) does not
        let mut lo = BigUint::zero();
        let mut hi = BigUint::one();
        while self.fits(client, a, b, &hi)? {
            lo = hi.clone();
            hi <<= 1u32;
            if hi.bits() > self.max_quotient_bits {
                return Err(Error::AmbiguousComparison);
            }
        }

        while &hi - &lo > BigUint::one() {
            let mid = (&lo + &hi) >> 1u32;
            if self.fits(client, a, b, &mid)? {
                lo = mid;
            } else {
                hi = mid;
            }
        }

        trace!(quotient = %lo, "divided");
        Ok(lo)
    }

    /// Does `q` copies of the divisor still fit under the dividend?
    fn fits<O: Oracle + ?Sized>(
        &self,
        client: &mut OracleClient<O>,
        a: &BigUint,
        b: &BigUint,
        q: &BigUint,
    ) -> Result<bool> {
        let n = self.comparator.mapper().modulus();
        self.comparator
            .greater_or_equal(client, a, &bigint::mul_mod(b, q, n))
    }
}
