use num_bigint::BigUint;

use super::mapper::Mapper;
use crate::oracle::{Oracle, OracleClient};
use crate::utils::bigint;
use crate::utils::errors::Result;

/// How repeated oracle answers on one ciphertext are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Vote {
    /// Strict majority of the answers; stops as soon as one side has it.
    /// Ties count as "not below".
    Majority,
    /// True at the first "below" answer. A wrapped plaintext is never below
    /// the oracle's threshold, so "below" is never a false positive.
    FirstBelow,
}

impl Default for Vote {
    fn default() -> Self {
        Vote::Majority
    }
}

/// Orders plaintext multiples through the oracle. Both multiples are
/// assumed to be small (below the oracle's threshold ceiling), so their
/// difference is small when it did not wrap around `n` and close to `n`
/// when it did.
#[derive(Debug, Clone, Copy)]
pub struct Comparator<'m> {
    mapper: &'m Mapper,
    repetitions: usize,
    vote: Vote,
}

impl<'m> Comparator<'m> {
    pub fn new(mapper: &'m Mapper, repetitions: usize, vote: Vote) -> Self {
        Comparator {
            mapper,
            repetitions: repetitions.max(1),
            vote,
        }
    }

    pub fn mapper(&self) -> &'m Mapper {
        self.mapper
    }

    /// Is `pt * a mod n >= pt * b mod n`?
    pub fn greater_or_equal<O: Oracle + ?Sized>(
        &self,
        client: &mut OracleClient<O>,
        a: &BigUint,
        b: &BigUint,
    ) -> Result<bool> {
        let n = self.mapper.modulus();
        if a % n == b % n {
            return Ok(true);
        }

        let probe = self.mapper.map(&bigint::sub_mod(a, b, n));
        let (mut below, mut above) = (0, 0);

        for _ in 0..self.repetitions {
            if client.query(&probe)? {
                below += 1;
            } else {
                above += 1;
            }

            let decided = match self.vote {
                Vote::Majority => 2 * below > self.repetitions || 2 * above > self.repetitions,
                Vote::FirstBelow => below > 0,
            };
            if decided {
                break;
            }
        }

        Ok(match self.vote {
            Vote::Majority => below > above,
            Vote::FirstBelow => below > 0,
        })
    }
}

#[cfg(test)]
mod tests {
    use num_traits::One;

    use super::*;
    use crate::oracle::threshold::FixedThresholdOracle;
    use crate::oracle::Budget;
    use crate::utils::crypto::rsa::Rsa;

    fn small_witnesses(rsa: &Rsa, pt: &BigUint) -> (BigUint, BigUint) {
        // plaintext multiples n / 50 and n / 60 in the witness domain
        let inverse = bigint::invmod(pt, &rsa.n).unwrap();
        let big = bigint::mul_mod(&(&rsa.n / 50u32), &inverse, &rsa.n);
        let small = bigint::mul_mod(&(&rsa.n / 60u32), &inverse, &rsa.n);
        (big, small)
    }

    #[test]
    fn test_orders_small_multiples() {
        let rsa = Rsa::new_with_size(256).unwrap();
        let pt = BigUint::from(0xc0ffeeu32);
        let mapper = Mapper::new(&rsa.n, &rsa.e, &rsa.encrypt(&pt)).unwrap();
        let (big, small) = small_witnesses(&rsa, &pt);

        let mut oracle = FixedThresholdOracle::new(rsa);
        let mut client = OracleClient::new(&mut oracle, Budget::new(100));
        let comparator = Comparator::new(&mapper, 3, Vote::Majority);

        assert!(comparator.greater_or_equal(&mut client, &big, &small).unwrap());
        assert!(!comparator.greater_or_equal(&mut client, &small, &big).unwrap());
        // exact oracle, so every majority is settled after two answers
        assert_eq!(client.queries(), 4);
    }

    #[test]
    fn test_equal_witnesses_skip_oracle() {
        let n = BigUint::from(3233u32);
        let mapper = Mapper::new(&n, &BigUint::from(17u32), &BigUint::from(2790u32)).unwrap();
        let mut oracle = |_: &BigUint| -> bool { panic!("no query expected") };
        let mut client = OracleClient::new(&mut oracle, Budget::new(10));
        let comparator = Comparator::new(&mapper, 5, Vote::Majority);

        let x = BigUint::from(77u32);
        assert!(comparator.greater_or_equal(&mut client, &x, &x).unwrap());
        assert!(comparator
            .greater_or_equal(&mut client, &x, &(&x + &n))
            .unwrap());
        assert_eq!(client.queries(), 0);
    }

    #[test]
    fn test_majority_outvotes_noise() {
        let n = BigUint::from(3233u32);
        let mapper = Mapper::new(&n, &BigUint::from(17u32), &BigUint::from(2790u32)).unwrap();
        let mut answers = vec![false, true, true, false, false].into_iter();
        let mut oracle = move |_: &BigUint| answers.next().unwrap_or(false);
        let mut client = OracleClient::new(&mut oracle, Budget::new(10));
        let comparator = Comparator::new(&mapper, 3, Vote::Majority);

        let (a, b) = (BigUint::from(9u32), BigUint::one());
        // false, true, true
        assert!(comparator.greater_or_equal(&mut client, &a, &b).unwrap());
        assert_eq!(client.queries(), 3);
        // false, false
        assert!(!comparator.greater_or_equal(&mut client, &a, &b).unwrap());
        assert_eq!(client.queries(), 5);
    }

    #[test]
    fn test_majority_tie_is_not_below() {
        let n = BigUint::from(3233u32);
        let mapper = Mapper::new(&n, &BigUint::from(17u32), &BigUint::from(2790u32)).unwrap();
        let mut answers = vec![true, false].into_iter();
        let mut oracle = move |_: &BigUint| answers.next().unwrap_or(false);
        let mut client = OracleClient::new(&mut oracle, Budget::new(10));
        let comparator = Comparator::new(&mapper, 2, Vote::Majority);

        assert!(!comparator
            .greater_or_equal(&mut client, &BigUint::from(9u32), &BigUint::one())
            .unwrap());
    }

    #[test]
    fn test_first_below_stops_early() {
        let n = BigUint::from(3233u32);
        let mapper = Mapper::new(&n, &BigUint::from(17u32), &BigUint::from(2790u32)).unwrap();
        let mut answers = vec![false, false, true, false, false, false, false].into_iter();
        let mut oracle = move |_: &BigUint| answers.next().unwrap_or(false);
        let mut client = OracleClient::new(&mut oracle, Budget::new(20));
        let comparator = Comparator::new(&mapper, 4, Vote::FirstBelow);

        let (a, b) = (BigUint::from(9u32), BigUint::one());
        assert!(comparator.greater_or_equal(&mut client, &a, &b).unwrap());
        assert_eq!(client.queries(), 3);
        assert!(!comparator.greater_or_equal(&mut client, &a, &b).unwrap());
        assert_eq!(client.queries(), 7);
    }

    #[test]
    fn test_propagates_budget_exhaustion() {
        let n = BigUint::from(3233u32);
        let mapper = Mapper::new(&n, &BigUint::from(17u32), &BigUint::from(2790u32)).unwrap();
        let mut oracle = |_: &BigUint| false;
        let mut client = OracleClient::new(&mut oracle, Budget::new(2));
        let comparator = Comparator::new(&mapper, 5, Vote::Majority);

        assert!(comparator
            .greater_or_equal(&mut client, &BigUint::from(9u32), &BigUint::one())
            .unwrap_err()
            .is_terminal());
        assert_eq!(client.queries(), 2);
    }
}
