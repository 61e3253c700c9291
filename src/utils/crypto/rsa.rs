use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::One;
use openssl::bn::BigNum;

use crate::utils::bigint;
use crate::utils::errors::Result;

const PUBLIC_EXPONENT: u32 = 65537;

/// Textbook RSA keypair. Only used to stand up simulated oracles; the attack
/// itself never sees anything but `n` and `e`.
#[derive(Debug, Clone)]
pub struct Rsa {
    pub e: BigUint,
    pub n: BigUint,
    p: BigUint,
    q: BigUint,
    dp: BigUint,
    dq: BigUint,
    q_inv: BigUint,
}

fn generate_prime(bits: i32) -> Result<BigUint> {
    let mut prime = BigNum::new()?;
    prime.generate_prime(bits, false, None, None)?;
    Ok(bigint::bignum_to_biguint(&prime))
}

impl Rsa {
    pub fn new() -> Result<Rsa> {
        Self::new_with_size(1024)
    }

    /// `size` is the bit length of the modulus. OpenSSL sets the top two
    /// bits of each prime, so `n` has exactly `size` bits.
    pub fn new_with_size(size: i32) -> Result<Rsa> {
        let e = BigUint::from(PUBLIC_EXPONENT);
        let half = size / 2;

        loop {
            let p = generate_prime(half)?;
            let q = generate_prime(half)?;
            if p == q {
                continue;
            }

            let (p1, q1) = (&p - 1u32, &q - 1u32);
            if !e.gcd(&p1).is_one() || !e.gcd(&q1).is_one() {
                continue;
            }

            let et = &p1 * &q1;
            let private_key = match bigint::invmod(&e, &et) {
                Some(d) => d,
                None => continue,
            };
            let q_inv = match bigint::invmod(&q, &p) {
                Some(inverse) => inverse,
                None => continue,
            };

            return Ok(Rsa {
                n: &p * &q,
                dp: &private_key % &p1,
                dq: &private_key % &q1,
                e,
                p,
                q,
                q_inv,
            });
        }
    }

    pub fn encrypt(&self, plaintext: &BigUint) -> BigUint {
        plaintext.modpow(&self.e, &self.n)
    }

    /// CRT decryption; the simulated oracles call this once per query.
    pub fn decrypt(&self, ciphertext: &BigUint) -> BigUint {
        let m1 = ciphertext.modpow(&self.dp, &self.p);
        let m2 = ciphertext.modpow(&self.dq, &self.q);
        let h = bigint::mul_mod(&self.q_inv, &bigint::sub_mod(&m1, &m2, &self.p), &self.p);
        m2 + h * &self.q
    }

    pub fn encrypt_string(&self, plaintext: &str) -> BigUint {
        self.encrypt(&bigint::string_to_biguint(plaintext))
    }

    /// Inverse of `encrypt_string`, for checking recovered flags.
    pub fn decrypt_string(&self, ciphertext: &BigUint) -> String {
        let plaintext = self.decrypt(ciphertext);
        bigint::biguint_to_string(&plaintext)
    }
}
