//! Ranking configuration.
//!
//! A [`RankConfig`] carries every tunable of a ranking run, so callers can
//! rank the same graph under several settings without shared state.
//!
//! # JSON shape
//!
//! ```json
//! {
//!   "damping": 0.85,
//!   "samples": 10000,
//!   "threshold": 0.001,
//!   "seed": 42,
//!   "dangling": "ignore"
//! }
//! ```
//!
//! Every field is optional; omitted fields take the defaults above (with no
//! seed). Unknown fields are rejected.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{check_damping, check_threshold, RankError, Result};
use crate::pagerank::iterative::{DanglingPolicy, IterativePageRank, DEFAULT_THRESHOLD};
use crate::pagerank::sampling::SamplingPageRank;

pub const DEFAULT_DAMPING: f64 = 0.85;
pub const DEFAULT_SAMPLES: usize = 10_000;

/// Settings shared by both estimators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RankConfig {
    /// Probability of following a link rather than jumping anywhere.
    pub damping: f64,

    /// Number of pages the sampling estimator visits.
    pub samples: usize,

    /// Max per-page change at which power iteration stops.
    pub threshold: f64,

    /// Fixed seed for the sampler; `None` seeds from the OS.
    pub seed: Option<u64>,

    /// Dangling-page treatment for power iteration.
    pub dangling: DanglingPolicy,
}

impl Default for RankConfig {
    fn default() -> Self {
        Self {
            damping: DEFAULT_DAMPING,
            samples: DEFAULT_SAMPLES,
            threshold: DEFAULT_THRESHOLD,
            seed: None,
            dangling: DanglingPolicy::Ignore,
        }
    }
}

impl RankConfig {
    /// Parse and validate a JSON configuration.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Check every field, reporting the first invalid one.
    pub fn validate(&self) -> Result<()> {
        check_damping(self.damping)?;
        if self.samples == 0 {
            return Err(RankError::InvalidSampleCount(self.samples));
        }
        check_threshold(self.threshold)
    }

    /// Sampling estimator for these settings
    pub fn sampler(&self) -> SamplingPageRank {
        SamplingPageRank::from_config(self)
    }

    /// Power-iteration estimator for these settings
    pub fn iterator(&self) -> IterativePageRank {
        IterativePageRank::from_config(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorCode;

    #[test]
    fn test_deserialize_empty_config() {
        let config = RankConfig::from_json("{}").unwrap();
        assert_eq!(config, RankConfig::default());
    }

    #[test]
    fn test_deserialize_full_config() {
        let json = r#"{
            "damping": 0.5,
            "samples": 500,
            "threshold": 0.0001,
            "seed": 7,
            "dangling": "redistribute"
        }"#;
        let config = RankConfig::from_json(json).unwrap();
        assert_eq!(config.damping, 0.5);
        assert_eq!(config.samples, 500);
        assert_eq!(config.threshold, 0.0001);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.dangling, DanglingPolicy::Redistribute);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = RankConfig::from_json(r#"{ "dampin": 0.5 }"#).unwrap_err();
        assert_eq!(err.code(), ErrorCode::Config);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let err = RankConfig::from_json(r#"{ "damping": 1.5 }"#).unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidDamping);

        let err = RankConfig::from_json(r#"{ "samples": 0 }"#).unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidSampleCount);

        let err = RankConfig::from_json(r#"{ "threshold": -1.0 }"#).unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidThreshold);
    }

    #[test]
    fn test_estimators_follow_config() {
        let config = RankConfig {
            damping: 0.6,
            samples: 123,
            threshold: 0.01,
            seed: Some(9),
            dangling: DanglingPolicy::Redistribute,
        };

        let sampler = config.sampler();
        assert_eq!(sampler.damping, 0.6);
        assert_eq!(sampler.samples, 123);
        assert_eq!(sampler.seed, Some(9));

        let iterator = config.iterator();
        assert_eq!(iterator.damping, 0.6);
        assert_eq!(iterator.convergence.threshold, 0.01);
        assert_eq!(iterator.dangling, DanglingPolicy::Redistribute);
    }

    #[test]
    fn test_serde_roundtrip() {
        let config = RankConfig {
            seed: Some(1),
            ..RankConfig::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(RankConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_from_missing_file() {
        let err = RankConfig::from_file("/nonexistent/rank.json").unwrap_err();
        assert_eq!(err.code(), ErrorCode::Io);
    }
}
