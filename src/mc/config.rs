//! Configuration options for the Monte Carlo control agent.

use serde::{Deserialize, Serialize};

/// Which occurrences of a (state, action) pair update the tables within one
/// episode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VisitKind {
    /// Only the first chronological occurrence per episode updates Q/N.
    FirstVisit,
    /// Every occurrence updates Q/N.
    EveryVisit,
}

/// Configuration for [`crate::mc::McAgent`].
///
/// # Example
/// ```
/// use poker_search_poc::mc::{McConfig, VisitKind};
///
/// let config = McConfig::default();
/// assert_eq!(config.visit, VisitKind::FirstVisit);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct McConfig {
    /// Probability of taking a uniformly random legal action (exploration).
    ///
    /// Suppressed entirely when stepping greedily (evaluation mode).
    pub epsilon: f64,

    /// Discount factor applied per step when accumulating returns.
    pub gamma: f64,

    /// First-visit or every-visit update rule.
    pub visit: VisitKind,

    /// Random seed for reproducibility.
    ///
    /// Drives both epsilon-greedy exploration and random tie-breaking.
    /// If `None`, a random seed is used.
    pub seed: Option<u64>,
}

impl Default for McConfig {
    fn default() -> Self {
        Self {
            epsilon: 0.1,
            gamma: 0.9,
            visit: VisitKind::FirstVisit,
            seed: None,
        }
    }
}

impl McConfig {
    /// Create a new config with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: set exploration probability.
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Builder method: set discount factor.
    pub fn with_gamma(mut self, gamma: f64) -> Self {
        self.gamma = gamma;
        self
    }

    /// Builder method: set the visit rule.
    pub fn with_visit(mut self, visit: VisitKind) -> Self {
        self.visit = visit;
        self
    }

    /// Builder method: set random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validate the configuration and return any errors.
    pub fn validate(&self) -> Result<(), McConfigError> {
        if !(0.0..=1.0).contains(&self.epsilon) {
            return Err(McConfigError::InvalidEpsilon(self.epsilon));
        }
        if !(0.0..=1.0).contains(&self.gamma) {
            return Err(McConfigError::InvalidGamma(self.gamma));
        }
        Ok(())
    }
}

/// Errors that can occur when validating MC configuration.
#[derive(Debug, Clone, PartialEq)]
pub enum McConfigError {
    /// Epsilon is out of range [0, 1].
    InvalidEpsilon(f64),
    /// Gamma is out of range [0, 1].
    InvalidGamma(f64),
}

impl std::fmt::Display for McConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            McConfigError::InvalidEpsilon(val) => {
                write!(f, "epsilon {} is out of range [0, 1]", val)
            }
            McConfigError::InvalidGamma(val) => {
                write!(f, "gamma {} is out of range [0, 1]", val)
            }
        }
    }
}

impl std::error::Error for McConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = McConfig::default();
        assert_eq!(config.epsilon, 0.1);
        assert_eq!(config.gamma, 0.9);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_range_validation() {
        assert_eq!(
            McConfig::default().with_epsilon(1.5).validate(),
            Err(McConfigError::InvalidEpsilon(1.5))
        );
        assert_eq!(
            McConfig::default().with_gamma(-0.1).validate(),
            Err(McConfigError::InvalidGamma(-0.1))
        );
    }
}
