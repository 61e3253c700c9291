pub mod threshold;

use num_bigint::BigUint;
use std::time::Instant;
use tracing::trace;

use crate::utils::errors::{Error, Result};

/// Oracle calls allowed for one decode run.
pub const DEFAULT_BUDGET: usize = 1 << 13;

/// The decision oracle: does the plaintext of `ciphertext` fall below a
/// freshly drawn threshold?
pub trait Oracle {
    fn decide(&mut self, ciphertext: &BigUint) -> bool;
}

impl<F> Oracle for F
where
    F: FnMut(&BigUint) -> bool,
{
    fn decide(&mut self, ciphertext: &BigUint) -> bool {
        self(ciphertext)
    }
}

#[derive(Debug, Clone)]
pub struct Budget {
    limit: usize,
    used: usize,
    deadline: Option<Instant>,
}

impl Budget {
    pub fn new(limit: usize) -> Budget {
        Budget {
            limit,
            used: 0,
            deadline: None,
        }
    }

    pub fn with_deadline(mut self, deadline: Instant) -> Budget {
        self.deadline = Some(deadline);
        self
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn used(&self) -> usize {
        self.used
    }

    pub fn remaining(&self) -> usize {
        self.limit - self.used
    }

    pub fn is_exhausted(&self) -> bool {
        self.used >= self.limit
    }

    fn consume(&mut self) -> Result<()> {
        if let Some(deadline) = self.deadline {
            if Instant::now() >= deadline {
                return Err(Error::DeadlineExceeded {
                    queries: self.used,
                });
            }
        }
        if self.is_exhausted() {
            return Err(Error::BudgetExhausted { limit: self.limit });
        }
        self.used += 1;
        Ok(())
    }
}

impl Default for Budget {
    fn default() -> Self {
        Budget::new(DEFAULT_BUDGET)
    }
}

/// Owns the budget of a single run and is the only way the attack talks to
/// the oracle.
pub struct OracleClient<'a, O: ?Sized> {
    oracle: &'a mut O,
    budget: Budget,
}

impl<'a, O: Oracle + ?Sized> OracleClient<'a, O> {
    pub fn new(oracle: &'a mut O, budget: Budget) -> Self {
        OracleClient { oracle, budget }
    }

    /// Spends one unit of budget, then asks the oracle.
    pub fn query(&mut self, ciphertext: &BigUint) -> Result<bool> {
        self.budget.consume()?;
        let below = self.oracle.decide(ciphertext);
        trace!(query = self.budget.used(), below, "oracle answered");
        Ok(below)
    }

    pub fn budget(&self) -> &Budget {
        &self.budget
    }

    pub fn queries(&self) -> usize {
        self.budget.used()
    }
}
