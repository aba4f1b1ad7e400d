//! Monte Carlo estimation of the percolation threshold of an n-by-n grid.
//!
//! The crate is built around two components. [`DisjointSet`] is a weighted
//! quick-union with path compression over a fixed universe of elements.
//! [`Percolation`] owns an n-by-n grid of sites that open monotonically and
//! wires two `DisjointSet` instances to virtual top/bottom nodes so that
//! "does the system percolate" and "is this site connected to the top" are
//! single connectivity probes. The second instance omits the virtual bottom
//! node, which keeps [`Percolation::is_full`] free of backwash false
//! positives once the system percolates.
//!
//! [`ThresholdEstimator`] drives repeated trials over fresh models and
//! reports the sample mean, standard deviation, and 95% confidence interval
//! of the observed thresholds.

mod error;
mod percolation;
mod stats;
mod union_find;

pub use crate::{
    error::{PercolationError, PercolationErrorCode, Result},
    percolation::Percolation,
    stats::{
        ThresholdEstimate, ThresholdEstimator, ThresholdEstimatorBuilder, estimate_threshold,
    },
    union_find::{DisjointSet, UnionFindError},
};
