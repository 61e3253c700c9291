//! Recovers an RSA plaintext from an oracle that only says whether a
//! ciphertext decrypts below a randomly drawn threshold.
//!
//! ```no_run
//! use blind_euclid::oracle::threshold::ThresholdOracle;
//! use blind_euclid::utils::crypto::rsa::Rsa;
//! use blind_euclid::DEFAULT_BUDGET;
//!
//! let rsa = Rsa::new().unwrap();
//! let ct = rsa.encrypt_string("attack at dawn");
//! let mut oracle = ThresholdOracle::new(rsa.clone());
//! let pt = blind_euclid::decrypt(&rsa.n, &rsa.e, &ct, &mut oracle, DEFAULT_BUDGET).unwrap();
//! ```

#![allow(clippy::many_single_char_names, clippy::unreadable_literal)]

extern crate num_bigint;
extern crate num_integer;
extern crate num_traits;
extern crate openssl;
extern crate rand;
extern crate thiserror;
extern crate tracing;

pub mod attack;
pub mod config;
pub mod oracle;
pub mod utils;

pub use crate::attack::{decrypt, Decoder, Recovery, Vote};
pub use crate::config::Config;
pub use crate::oracle::{Oracle, DEFAULT_BUDGET};
pub use crate::utils::errors::{Error, Result};

#[cfg(test)]
pub(crate) fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_test_writer()
        .try_init();
}
