//! Plaintext recovery from a threshold oracle.
//!
//! The attack never decrypts anything itself. It multiplies the hidden
//! plaintext by public witnesses (`mapper`), orders the resulting multiples
//! through the oracle (`compare`), divides them by galloping search
//! (`divide`) and runs Euclid on two of them (`euclid`). When the two
//! multiples are coprime the final witness is the plaintext's inverse.

pub mod compare;
pub mod decoder;
pub mod divide;
pub mod euclid;
pub mod mapper;

pub use self::compare::{Comparator, Vote};
pub use self::decoder::{Decoder, Recovery};
pub use self::divide::Divider;
pub use self::euclid::{EuclidEngine, EuclidState};
pub use self::mapper::Mapper;

use num_bigint::BigUint;

use crate::config::Config;
use crate::oracle::Oracle;
use crate::utils::errors::Result;

/// Recovers the plaintext of `ct` under `(n, e)` with at most `budget`
/// oracle calls, using the default configuration otherwise.
pub fn decrypt<O: Oracle + ?Sized>(
    n: &BigUint,
    e: &BigUint,
    ct: &BigUint,
    oracle: &mut O,
    budget: usize,
) -> Result<BigUint> {
    let config = Config::default().with_budget(budget);
    let decoder = Decoder::new(n, e, ct, oracle, config, rand::thread_rng())?;
    Ok(decoder.run()?.plaintext)
}
