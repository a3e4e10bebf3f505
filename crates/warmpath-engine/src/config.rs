//! Configuration for engine operations
//!
//! Defines traversal bounds, ranking limits, and scoring fallbacks.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the warm-path engine
///
/// Controls path-search bounds, candidate resolution thresholds, and the
/// scoring fallbacks for absent interaction data.
///
/// # Examples
///
/// ```
/// use warmpath_engine::EngineConfig;
///
/// // Default configuration (balanced)
/// let config = EngineConfig::default();
/// assert_eq!(config.max_hops, 5);
///
/// // Short chains only, high-confidence targets
/// let config = EngineConfig::strict();
/// assert_eq!(config.max_hops, 3);
///
/// // Wider search
/// let config = EngineConfig::broad();
/// assert_eq!(config.top_k, 10);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Maximum hop count for path search
    /// Default: 5
    pub max_hops: usize,

    /// Maximum ranked paths returned per target
    /// Default: 5
    pub top_k: usize,

    /// Maximum resolved target candidates searched per query
    /// Default: 3
    pub max_candidates: usize,

    /// Minimum resolver confidence for a candidate to be retained
    /// Candidates below this are dropped (empty result, not an error)
    /// Default: 0.5
    pub min_match_confidence: f64,

    /// Days of connection age at which the age factor saturates at 100
    /// Default: 1825 (5 years)
    pub age_saturation_days: u64,

    /// Interaction sub-score substituted when the interaction source has
    /// no data for a pair
    /// Default: 50.0
    #[serde(default = "default_interaction_score")]
    pub default_interaction_score: f64,
}

fn default_interaction_score() -> f64 {
    50.0
}

impl Default for EngineConfig {
    /// Create default configuration with balanced search bounds
    ///
    /// - Hop cap: 5 (classic warm-intro distance)
    /// - Top-K: 5 paths per target
    /// - Candidates: 3 per free-text query
    /// - Match floor: 0.5 (substring name match passes)
    /// - Age saturation: 5 years
    fn default() -> Self {
        Self {
            max_hops: 5,
            top_k: 5,
            max_candidates: 3,
            min_match_confidence: 0.5,
            age_saturation_days: 1825,
            default_interaction_score: 50.0,
        }
    }
}

impl EngineConfig {
    /// Strict configuration (short chains, unambiguous targets)
    ///
    /// Suitable when introduction requests should only surface close,
    /// high-confidence paths.
    ///
    /// - Hop cap: 3
    /// - Top-K: 3
    /// - Candidates: 1
    /// - Match floor: 0.8 (effectively exact-name only)
    pub fn strict() -> Self {
        Self {
            max_hops: 3,
            top_k: 3,
            max_candidates: 1,
            min_match_confidence: 0.8,
            age_saturation_days: 1825,
            default_interaction_score: 50.0,
        }
    }

    /// Broad configuration (wider search, more results)
    ///
    /// Suitable for exploratory queries over sparse graphs.
    ///
    /// - Hop cap: 6
    /// - Top-K: 10
    /// - Candidates: 5
    /// - Match floor: 0.4
    pub fn broad() -> Self {
        Self {
            max_hops: 6,
            top_k: 10,
            max_candidates: 5,
            min_match_confidence: 0.4,
            age_saturation_days: 1825,
            default_interaction_score: 50.0,
        }
    }

    /// Get the age-factor saturation point as a Duration
    pub fn age_saturation(&self) -> Duration {
        Duration::from_secs(self.age_saturation_days * 86400)
    }
}
