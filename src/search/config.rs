//! Configuration options for the search engine.

use serde::{Deserialize, Serialize};

/// Configuration for the expectiminimax searcher.
///
/// This controls how chance nodes are expanded and how randomness is seeded:
/// - With `chance_samples = None` the searcher runs the exact variant,
///   summing over every chance outcome.
/// - With `chance_samples = Some(k)` chance nodes with more than `k` outcomes
///   are estimated from `k` outcomes sampled uniformly without replacement,
///   with the sampled probabilities renormalized to sum to 1.
///
/// # Example
/// ```
/// use poker_search_poc::search::SearchConfig;
///
/// let config = SearchConfig::default();
/// assert!(config.chance_samples.is_none()); // exact by default
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Number of chance outcomes to sample per chance node.
    ///
    /// `None` means exact full-width expansion. When set, chance-node
    /// sampling does *not* consume search depth, unlike exact expansion;
    /// see the engine docs for the rationale.
    pub chance_samples: Option<usize>,

    /// Random seed for reproducibility.
    ///
    /// If set, the searcher uses this seed for chance sampling, making
    /// results reproducible. If `None`, a random seed is used.
    pub seed: Option<u64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            chance_samples: None,
            seed: None,
        }
    }
}

impl SearchConfig {
    /// Create a new config with default settings (exact search).
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a config for the sampled variant with `k` chance samples.
    pub fn sampled(k: usize) -> Self {
        Self {
            chance_samples: Some(k),
            ..Default::default()
        }
    }

    /// Builder method: set the chance sample count.
    pub fn with_chance_samples(mut self, k: usize) -> Self {
        self.chance_samples = Some(k);
        self
    }

    /// Builder method: set random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validate the configuration and return any errors.
    pub fn validate(&self) -> Result<(), SearchConfigError> {
        if let Some(k) = self.chance_samples {
            if k == 0 {
                return Err(SearchConfigError::ZeroChanceSamples);
            }
        }
        Ok(())
    }
}

/// Errors that can occur when validating search configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchConfigError {
    /// `chance_samples` was set to 0, which would leave nothing to average.
    ZeroChanceSamples,
}

impl std::fmt::Display for SearchConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchConfigError::ZeroChanceSamples => {
                write!(f, "chance_samples must be at least 1 when set")
            }
        }
    }
}

impl std::error::Error for SearchConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_exact() {
        let config = SearchConfig::default();
        assert!(config.chance_samples.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_samples_rejected() {
        let config = SearchConfig::default().with_chance_samples(0);
        assert_eq!(config.validate(), Err(SearchConfigError::ZeroChanceSamples));
    }

    #[test]
    fn test_builder() {
        let config = SearchConfig::sampled(5).with_seed(42);
        assert_eq!(config.chance_samples, Some(5));
        assert_eq!(config.seed, Some(42));
    }
}
