use num_bigint::BigUint;
use num_traits::Zero;

use crate::utils::errors::{Error, Result};

/// Scales the hidden plaintext by a public witness: `map(x)` is a ciphertext
/// whose plaintext is `pt * x mod n`.
#[derive(Debug, Clone)]
pub struct Mapper {
    n: BigUint,
    e: BigUint,
    ct: BigUint,
    zero: BigUint,
}

impl Mapper {
    pub fn new(n: &BigUint, e: &BigUint, ct: &BigUint) -> Result<Mapper> {
        // witness pairs are drawn from [1, n) and must be distinct
        if n < &BigUint::from(4u32) {
            return Err(Error::InvalidParameters("modulus must be at least 4"));
        }
        if e.is_zero() {
            return Err(Error::InvalidParameters("public exponent must be positive"));
        }
        if ct.is_zero() || ct >= n {
            return Err(Error::InvalidParameters("ciphertext must lie in (0, n)"));
        }

        let mut mapper = Mapper {
            n: n.clone(),
            e: e.clone(),
            ct: ct.clone(),
            zero: BigUint::zero(),
        };
        mapper.zero = mapper.map(&BigUint::zero());
        Ok(mapper)
    }

    pub fn map(&self, x: &BigUint) -> BigUint {
        (&self.ct * x.modpow(&self.e, &self.n)) % &self.n
    }

    /// Exact zero-ciphertext test; never touches the oracle.
    pub fn is_zero(&self, x: &BigUint) -> bool {
        self.map(x) == self.zero
    }

    pub fn modulus(&self) -> &BigUint {
        &self.n
    }

    pub fn exponent(&self) -> &BigUint {
        &self.e
    }

    pub fn ciphertext(&self) -> &BigUint {
        &self.ct
    }
}

#[cfg(test)]
mod tests {
    use num_bigint::RandBigInt;
    use num_traits::One;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::utils::bigint;
    use crate::utils::crypto::rsa::Rsa;

    #[test]
    fn test_map_scales_plaintext() {
        let mut rng = StdRng::seed_from_u64(10);
        let rsa = Rsa::new_with_size(256).unwrap();
        let pt = rng.gen_biguint_range(&BigUint::one(), &rsa.n);
        let mapper = Mapper::new(&rsa.n, &rsa.e, &rsa.encrypt(&pt)).unwrap();

        for _ in 0..20 {
            let x = rng.gen_biguint_range(&BigUint::one(), &rsa.n);
            assert_eq!(rsa.decrypt(&mapper.map(&x)), bigint::mul_mod(&pt, &x, &rsa.n));
        }
        assert_eq!(mapper.map(&BigUint::one()), *mapper.ciphertext());
    }

    #[test]
    fn test_zero_sentinel() {
        let rsa = Rsa::new_with_size(256).unwrap();
        let mapper = Mapper::new(&rsa.n, &rsa.e, &rsa.encrypt(&BigUint::from(42u32))).unwrap();

        assert!(mapper.is_zero(&BigUint::zero()));
        assert!(mapper.is_zero(&rsa.n));
        assert!(!mapper.is_zero(&BigUint::one()));
        assert!(!mapper.is_zero(&(&rsa.n - 1u32)));
    }

    #[test]
    fn test_rejects_bad_parameters() {
        let n = BigUint::from(3233u32);
        let e = BigUint::from(17u32);
        assert!(Mapper::new(&n, &e, &BigUint::zero()).is_err());
        assert!(Mapper::new(&n, &e, &n).is_err());
        assert!(Mapper::new(&n, &BigUint::zero(), &BigUint::one()).is_err());
        assert!(Mapper::new(&BigUint::one(), &e, &BigUint::one()).is_err());
        for tiny in 2..4u32 {
            assert_eq!(
                Mapper::new(&BigUint::from(tiny), &e, &BigUint::one()).unwrap_err(),
                Error::InvalidParameters("modulus must be at least 4")
            );
        }
        assert!(Mapper::new(&BigUint::from(4u32), &e, &BigUint::one()).is_ok());
        assert!(Mapper::new(&n, &e, &BigUint::from(2790u32)).is_ok());
    }
}
