use openssl::error::ErrorStack;
use std::result;

/// Everything that can go wrong while recovering a plaintext.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("oracle query budget of {limit} exhausted")]
    BudgetExhausted { limit: usize },

    #[error("deadline passed after {queries} oracle queries")]
    DeadlineExceeded { queries: usize },

    #[error("comparison could not resolve the quotient")]
    AmbiguousComparison,

    #[error("divisor witness maps to the zero ciphertext")]
    DivisionByZero,

    #[error("no small witness found within {queries} setup queries")]
    NoSmallWitness { queries: usize },

    #[error("candidate inverse failed verification")]
    VerificationFailed,

    #[error("decryption failed after {attempts} attempts and {queries} oracle queries")]
    DecryptionFailed { attempts: usize, queries: usize },

    #[error("invalid parameters: {0}")]
    InvalidParameters(&'static str),

    #[error("key generation failed: {0}")]
    KeyGeneration(String),
}

impl From<ErrorStack> for Error {
    fn from(err: ErrorStack) -> Self {
        Error::KeyGeneration(err.to_string())
    }
}

impl Error {
    /// Terminal errors end the whole run; everything else only ends the
    /// current attempt.
    pub fn is_terminal(&self) -> bool {
        match self {
            Error::BudgetExhausted { .. }
            | Error::DeadlineExceeded { .. }
            | Error::DecryptionFailed { .. }
            | Error::InvalidParameters(_)
            | Error::KeyGeneration(_) => true,
            _ => false,
        }
    }
}

pub type Result<T> = result::Result<T, Error>;
