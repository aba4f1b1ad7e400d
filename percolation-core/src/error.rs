//! Error types for the percolation core crate.
//!
//! Every failure here is a caller programming error surfaced fail-fast; no
//! variant describes a recoverable runtime condition.

use thiserror::Error;

use crate::union_find::UnionFindError;

/// Error produced by the percolation model and the threshold estimator.
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum PercolationError {
    /// Grid size must be at least 1.
    #[error("grid size must be at least 1 (got {got})")]
    InvalidGridSize {
        /// The invalid side length supplied by the caller.
        got: usize,
    },
    /// The site universe `n*n + 2` does not fit in `usize`.
    #[error("grid size {got} overflows the site index space")]
    GridTooLarge {
        /// The side length whose square overflowed.
        got: usize,
    },
    /// A 1-indexed coordinate fell outside `[1, n]`.
    #[error("site ({row}, {col}) is out of range for a {n}-by-{n} grid")]
    SiteOutOfRange {
        /// The requested row, 1-indexed.
        row: usize,
        /// The requested column, 1-indexed.
        col: usize,
        /// The grid side length.
        n: usize,
    },
    /// Trial count must be at least 1.
    #[error("trial count must be at least 1 (got {got})")]
    InvalidTrialCount {
        /// The invalid trial count supplied by the caller.
        got: usize,
    },
    /// An internal disjoint-set operation rejected its indices.
    #[error(transparent)]
    UnionFind(#[from] UnionFindError),
}

impl PercolationError {
    /// Returns a stable, machine-readable error code for the variant.
    #[must_use]
    pub const fn code(&self) -> PercolationErrorCode {
        match self {
            Self::InvalidGridSize { .. } => PercolationErrorCode::InvalidGridSize,
            Self::GridTooLarge { .. } => PercolationErrorCode::GridTooLarge,
            Self::SiteOutOfRange { .. } => PercolationErrorCode::SiteOutOfRange,
            Self::InvalidTrialCount { .. } => PercolationErrorCode::InvalidTrialCount,
            Self::UnionFind(_) => PercolationErrorCode::UnionFindOutOfRange,
        }
    }
}

/// Machine-readable error codes for [`PercolationError`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum PercolationErrorCode {
    /// Grid size must be at least 1.
    InvalidGridSize,
    /// The site universe does not fit in `usize`.
    GridTooLarge,
    /// A coordinate fell outside `[1, n]`.
    SiteOutOfRange,
    /// Trial count must be at least 1.
    InvalidTrialCount,
    /// A disjoint-set operation rejected its indices.
    UnionFindOutOfRange,
}

impl PercolationErrorCode {
    /// Returns the symbolic identifier for logging surfaces.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InvalidGridSize => "INVALID_GRID_SIZE",
            Self::GridTooLarge => "GRID_TOO_LARGE",
            Self::SiteOutOfRange => "SITE_OUT_OF_RANGE",
            Self::InvalidTrialCount => "INVALID_TRIAL_COUNT",
            Self::UnionFindOutOfRange => "UNION_FIND_OUT_OF_RANGE",
        }
    }
}

/// Convenient alias for results returned by the core API.
pub type Result<T> = core::result::Result<T, PercolationError>;
