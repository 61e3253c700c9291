use num_bigint::BigUint;
use num_traits::{One, Zero};
use openssl::bn::BigNum;
use std::{cmp, ops};

pub fn bignum_to_biguint(bignum: &BigNum) -> BigUint {
    BigUint::from_bytes_be(&bignum.to_vec())
}

fn division_algorithm<T>(a: &T, b: &T) -> Option<(T, T)>
where
    T: From<u32> + cmp::PartialEq,
    for<'a> &'a T: ops::Div<Output = T> + ops::Rem<Output = T>,
{
    if b == &T::from(0) {
        return None;
    }
    Some((a / b, a % b))
}

/// Takes a pair (a, b) with b < a and returns (d, x) such that
///      d = gcd(a, b)
///      b * x % a = d
/// so when d == 1, x is the inverse of b modulo a.
/// Returns None when b is zero.
pub fn euclidean_algorithm<T>(a: &T, b: &T) -> Option<(T, T)>
where
    T: Clone + cmp::PartialEq + From<u32>,
    for<'a> &'a T: ops::Div<Output = T>
        + ops::Rem<Output = T>
        + ops::Mul<Output = T>
        + ops::Add<Output = T>
        + ops::Sub<Output = T>,
{
    let zero = T::from(0);
    let (q, r) = division_algorithm(a, b)?;

    let mut remainders = (b.clone(), r);
    // numerators of the continued fraction convergents of a / b
    let mut numerators = (T::from(1), q);
    let mut flips = 0usize;

    while remainders.1 != zero {
        let (q, r) = division_algorithm(&remainders.0, &remainders.1)?;
        let next = &(&q * &numerators.1) + &numerators.0;
        remainders = (remainders.1, r);
        numerators = (numerators.1, next);
        flips += 1;
    }

    // convergent numerators alternate sign relative to the gcd
    let x = if flips % 2 == 0 {
        numerators.0
    } else {
        a - &numerators.0
    };

    Some((remainders.0, x))
}

pub fn invmod(a: &BigUint, modulus: &BigUint) -> Option<BigUint> {
    let a = a % modulus;
    if a.is_zero() {
        return None;
    }

    match euclidean_algorithm(modulus, &a)? {
        (d, x) if d.is_one() => Some(x % modulus),
        _ => None,
    }
}

pub fn mul_mod(a: &BigUint, b: &BigUint, modulus: &BigUint) -> BigUint {
    (a * b) % modulus
}

/// (a - b) mod modulus without leaving the unsigned domain.
pub fn sub_mod(a: &BigUint, b: &BigUint, modulus: &BigUint) -> BigUint {
    ((a % modulus) + modulus - (b % modulus)) % modulus
}

pub fn string_to_biguint(string: &str) -> BigUint {
    BigUint::from_bytes_be(string.as_bytes())
}

pub fn biguint_to_string(num: &BigUint) -> String {
    let bytes = num.to_bytes_be();
    String::from_utf8_lossy(&bytes[..]).to_string()
}
