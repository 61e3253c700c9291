use std::time::Duration;

use crate::attack::compare::Vote;
use crate::oracle::DEFAULT_BUDGET;
use crate::utils::errors::{Error, Result};

/// Oracle queries one attempt may spend looking for its two small witnesses.
pub const DEFAULT_SETUP_LIMIT: usize = 1 << 11;

/// Oracle answers per comparison. One answer per comparison leaves room for
/// a retry inside the default budget at 1024 bits.
pub const DEFAULT_REPETITIONS: usize = 1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub budget: usize,
    pub repetitions: usize,
    pub vote: Vote,
    pub setup_limit: usize,
    pub max_attempts: Option<usize>,
    /// Measured from decoder construction.
    pub deadline: Option<Duration>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            budget: DEFAULT_BUDGET,
            repetitions: DEFAULT_REPETITIONS,
            vote: Vote::Majority,
            setup_limit: DEFAULT_SETUP_LIMIT,
            max_attempts: None,
            deadline: None,
        }
    }
}

impl Config {
    pub fn with_budget(mut self, budget: usize) -> Self {
        self.budget = budget;
        self
    }

    pub fn with_repetitions(mut self, repetitions: usize) -> Self {
        self.repetitions = repetitions;
        self
    }

    pub fn with_vote(mut self, vote: Vote) -> Self {
        self.vote = vote;
        self
    }

    pub fn with_setup_limit(mut self, setup_limit: usize) -> Self {
        self.setup_limit = setup_limit;
        self
    }

    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = Some(max_attempts);
        self
    }

    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.budget == 0 {
            return Err(Error::InvalidParameters("budget must allow at least one query"));
        }
        if self.repetitions == 0 {
            return Err(Error::InvalidParameters("repetitions must be at least 1"));
        }
        if self.setup_limit == 0 {
            return Err(Error::InvalidParameters("setup limit must be at least 1"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.budget, 8192);
        assert_eq!(config.setup_limit, 2048);
        assert_eq!(config.repetitions, 1);
        assert_eq!(config.vote, Vote::Majority);
        assert_eq!(config.max_attempts, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = Config::default()
            .with_budget(100)
            .with_repetitions(5)
            .with_vote(Vote::FirstBelow)
            .with_setup_limit(10)
            .with_max_attempts(2)
            .with_deadline(Duration::from_secs(1));
        assert_eq!(config.budget, 100);
        assert_eq!(config.repetitions, 5);
        assert_eq!(config.vote, Vote::FirstBelow);
        assert_eq!(config.setup_limit, 10);
        assert_eq!(config.max_attempts, Some(2));
        assert_eq!(config.deadline, Some(Duration::from_secs(1)));
    }

    #[test]
    fn test_validate() {
        assert!(Config::default().with_budget(0).validate().is_err());
        assert!(Config::default().with_repetitions(0).validate().is_err());
        assert!(Config::default().with_setup_limit(0).validate().is_err());
    }
}
