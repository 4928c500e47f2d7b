//! Error types for ranking and graph construction.
//!
//! Input failures are detected at the start of a call, before any score is
//! computed. [`RankError::Diverged`] is the one error raised mid-run; either
//! way a caller never sees a partially filled [`Distribution`].
//!
//! [`Distribution`]: crate::distribution::Distribution

use serde::Serialize;
use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, RankError>;

/// Stable, machine-readable identifier for each error kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    InvalidPage,
    EmptyGraph,
    InvalidDamping,
    InvalidSampleCount,
    InvalidThreshold,
    UnknownLinkTarget,
    ScoreLength,
    InvalidScore,
    Diverged,
    Sampling,
    Io,
    Walk,
    Pattern,
    Config,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidPage => "invalid_page",
            Self::EmptyGraph => "empty_graph",
            Self::InvalidDamping => "invalid_damping",
            Self::InvalidSampleCount => "invalid_sample_count",
            Self::InvalidThreshold => "invalid_threshold",
            Self::UnknownLinkTarget => "unknown_link_target",
            Self::ScoreLength => "score_length",
            Self::InvalidScore => "invalid_score",
            Self::Diverged => "diverged",
            Self::Sampling => "sampling",
            Self::Io => "io",
            Self::Walk => "walk",
            Self::Pattern => "pattern",
            Self::Config => "config",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors raised by the ranking engine and its collaborators.
#[derive(Debug, Error)]
pub enum RankError {
    #[error("page not in graph: {0}")]
    InvalidPage(String),

    #[error("graph has no pages")]
    EmptyGraph,

    #[error("damping factor must lie in (0, 1), got {0}")]
    InvalidDamping(f64),

    #[error("sample count must be at least 1, got {0}")]
    InvalidSampleCount(usize),

    #[error("convergence threshold must be finite and positive, got {0}")]
    InvalidThreshold(f64),

    #[error("page {from} links to unknown page {to}")]
    UnknownLinkTarget { from: String, to: String },

    #[error("expected {expected} scores, got {actual}")]
    ScoreLength { expected: usize, actual: usize },

    #[error("score for page {page} must be finite and non-negative, got {score}")]
    InvalidScore { page: String, score: f64 },

    #[error("power iteration produced a non-finite delta in round {0}")]
    Diverged(usize),

    #[error("cannot sample from transition row: {0}")]
    Sampling(#[from] rand::distributions::WeightedError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("walk directory error: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("regex error: {0}")]
    Pattern(#[from] regex::Error),

    #[error("configuration error: {0}")]
    Config(#[from] serde_json::Error),
}

impl RankError {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::InvalidPage(_) => ErrorCode::InvalidPage,
            Self::EmptyGraph => ErrorCode::EmptyGraph,
            Self::InvalidDamping(_) => ErrorCode::InvalidDamping,
            Self::InvalidSampleCount(_) => ErrorCode::InvalidSampleCount,
            Self::InvalidThreshold(_) => ErrorCode::InvalidThreshold,
            Self::UnknownLinkTarget { .. } => ErrorCode::UnknownLinkTarget,
            Self::ScoreLength { .. } => ErrorCode::ScoreLength,
            Self::InvalidScore { .. } => ErrorCode::InvalidScore,
            Self::Diverged(_) => ErrorCode::Diverged,
            Self::Sampling(_) => ErrorCode::Sampling,
            Self::Io(_) => ErrorCode::Io,
            Self::Walk(_) => ErrorCode::Walk,
            Self::Pattern(_) => ErrorCode::Pattern,
            Self::Config(_) => ErrorCode::Config,
        }
    }
}

/// Reject damping factors outside the open interval (0, 1).
pub(crate) fn check_damping(damping: f64) -> Result<()> {
    if damping > 0.0 && damping < 1.0 {
        Ok(())
    } else {
        Err(RankError::InvalidDamping(damping))
    }
}

/// Reject scores that cannot be part of a probability distribution.
pub(crate) fn check_score(page: &str, score: f64) -> Result<()> {
    if score.is_finite() && score >= 0.0 {
        Ok(())
    } else {
        Err(RankError::InvalidScore {
            page: page.to_string(),
            score,
        })
    }
}

/// Reject thresholds that would keep an unbounded loop running forever.
pub(crate) fn check_threshold(threshold: f64) -> Result<()> {
    if threshold.is_finite() && threshold > 0.0 {
        Ok(())
    } else {
        Err(RankError::InvalidThreshold(threshold))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_damping_bounds() {
        assert!(check_damping(0.85).is_ok());
        assert!(check_damping(0.0).is_err());
        assert!(check_damping(1.0).is_err());
        assert!(check_damping(f64::NAN).is_err());
        assert!(check_damping(-0.2).is_err());
    }

    #[test]
    fn test_threshold_bounds() {
        assert!(check_threshold(0.001).is_ok());
        assert!(check_threshold(0.0).is_err());
        assert!(check_threshold(f64::INFINITY).is_err());
        assert!(check_threshold(f64::NAN).is_err());
    }

    #[test]
    fn test_score_bounds() {
        assert!(check_score("a.html", 0.0).is_ok());
        assert!(check_score("a.html", 0.25).is_ok());
        assert!(check_score("a.html", -0.1).is_err());
        assert!(check_score("a.html", f64::NAN).is_err());
        assert!(check_score("a.html", f64::INFINITY).is_err());
        assert_eq!(
            check_score("a.html", -1.0).unwrap_err().code(),
            ErrorCode::InvalidScore
        );
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(RankError::EmptyGraph.code(), ErrorCode::EmptyGraph);
        assert_eq!(
            RankError::InvalidPage("x.html".into()).code().as_str(),
            "invalid_page"
        );
        let json = serde_json::to_value(ErrorCode::UnknownLinkTarget).unwrap();
        assert_eq!(json, "unknown_link_target");
    }

    #[test]
    fn test_display_messages() {
        let err = RankError::UnknownLinkTarget {
            from: "1.html".into(),
            to: "9.html".into(),
        };
        assert_eq!(err.to_string(), "page 1.html links to unknown page 9.html");
        assert_eq!(
            RankError::InvalidDamping(1.5).to_string(),
            "damping factor must lie in (0, 1), got 1.5"
        );
    }
}
