//! Monte Carlo estimation of the percolation threshold.
//!
//! Every trial constructs a fresh [`Percolation`] model and opens uniformly
//! random sites until the system percolates. Trials share no state, so the
//! estimator fans them out across the Rayon pool with a deterministic
//! per-trial seed derivation; a given configuration produces the same
//! estimate regardless of thread scheduling.

use std::num::NonZeroUsize;

use rand::{Rng, SeedableRng, rngs::SmallRng};
use rayon::prelude::*;
use tracing::{info, instrument};

use crate::{
    error::{PercolationError, Result},
    percolation::Percolation,
};

/// Critical value of the two-sided 95% confidence interval.
const CONFIDENCE_95: f64 = 1.96;

/// SplitMix64 increment (the 64-bit golden ratio) used for per-trial seed
/// derivation.
const TRIAL_SEED_SPACING: u64 = 0x9E37_79B9_7F4A_7C15;
const SPLITMIX_MULT_A: u64 = 0xBF58_476D_1CE4_E5B9;
const SPLITMIX_MULT_B: u64 = 0x94D0_49BB_1331_11EB;

const DEFAULT_GRID_SIZE: usize = 20;
const DEFAULT_TRIALS: usize = 30;

/// Configures and constructs [`ThresholdEstimator`] instances.
///
/// # Examples
/// ```
/// use percolation_core::ThresholdEstimatorBuilder;
///
/// let estimator = ThresholdEstimatorBuilder::new()
///     .with_grid_size(10)
///     .with_trials(50)
///     .with_seed(7)
///     .build()?;
/// assert_eq!(estimator.grid_size().get(), 10);
/// assert_eq!(estimator.trials().get(), 50);
/// # Ok::<(), percolation_core::PercolationError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ThresholdEstimatorBuilder {
    grid_size: usize,
    trials: usize,
    seed: u64,
}

impl Default for ThresholdEstimatorBuilder {
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
            trials: DEFAULT_TRIALS,
            seed: 0,
        }
    }
}

impl ThresholdEstimatorBuilder {
    /// Creates a builder populated with default parameters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the grid side length used for every trial.
    #[must_use]
    pub const fn with_grid_size(mut self, grid_size: usize) -> Self {
        self.grid_size = grid_size;
        self
    }

    /// Returns the configured grid side length.
    #[must_use]
    pub const fn grid_size(&self) -> usize {
        self.grid_size
    }

    /// Overrides the number of independent trials.
    #[must_use]
    pub const fn with_trials(mut self, trials: usize) -> Self {
        self.trials = trials;
        self
    }

    /// Returns the configured trial count.
    #[must_use]
    pub const fn trials(&self) -> usize {
        self.trials
    }

    /// Sets the base seed the per-trial generators derive from.
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Returns the configured base seed.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Validates the configuration and constructs a [`ThresholdEstimator`].
    ///
    /// # Errors
    /// Returns [`PercolationError::InvalidGridSize`] when the grid size is
    /// zero and [`PercolationError::InvalidTrialCount`] when the trial count
    /// is zero.
    pub fn build(self) -> Result<ThresholdEstimator> {
        let grid_size = NonZeroUsize::new(self.grid_size)
            .ok_or(PercolationError::InvalidGridSize { got: self.grid_size })?;
        let trials = NonZeroUsize::new(self.trials)
            .ok_or(PercolationError::InvalidTrialCount { got: self.trials })?;

        Ok(ThresholdEstimator {
            grid_size,
            trials,
            seed: self.seed,
        })
    }
}

/// Runs independent percolation trials and aggregates their thresholds.
#[derive(Debug, Clone)]
pub struct ThresholdEstimator {
    grid_size: NonZeroUsize,
    trials: NonZeroUsize,
    seed: u64,
}

impl ThresholdEstimator {
    /// Returns the grid side length used for every trial.
    #[must_use]
    pub const fn grid_size(&self) -> NonZeroUsize {
        self.grid_size
    }

    /// Returns the number of independent trials.
    #[must_use]
    pub const fn trials(&self) -> NonZeroUsize {
        self.trials
    }

    /// Returns the base seed the per-trial generators derive from.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Executes every trial and aggregates the observed thresholds.
    ///
    /// Trials run on the Rayon pool. Each one seeds its own [`SmallRng`]
    /// from the base seed and the trial index, so results are reproducible
    /// across runs and thread counts.
    ///
    /// # Errors
    /// Returns [`PercolationError::GridTooLarge`] when the configured grid
    /// size overflows the site index space.
    #[instrument(
        name = "stats.run",
        err,
        skip(self),
        fields(grid_size = %self.grid_size, trials = %self.trials, seed = self.seed),
    )]
    pub fn run(&self) -> Result<ThresholdEstimate> {
        let thresholds = (0..self.trials.get())
            .into_par_iter()
            .map(|trial| {
                let mut rng = SmallRng::seed_from_u64(mix_trial_seed(self.seed, trial));
                estimate_threshold(self.grid_size, &mut rng)
            })
            .collect::<Result<Vec<f64>>>()?;

        let estimate = ThresholdEstimate::from_thresholds(thresholds);
        info!(
            mean = estimate.mean(),
            stddev = estimate.stddev(),
            "threshold estimation completed"
        );
        Ok(estimate)
    }
}

/// Runs a single trial against a caller-supplied random source.
///
/// Opens uniformly random sites on a fresh `grid_size`-by-`grid_size` model
/// until it percolates, then returns the fraction of open sites. Draws that
/// land on an already-open site are no-ops, matching a uniform choice over
/// the full grid on every step.
///
/// # Errors
/// Returns [`PercolationError::GridTooLarge`] when `grid_size` overflows the
/// site index space.
pub fn estimate_threshold<R: Rng>(grid_size: NonZeroUsize, rng: &mut R) -> Result<f64> {
    let n = grid_size.get();
    let mut model = Percolation::new(n)?;
    let sites = n * n;
    while !model.percolates()? {
        let site = rng.gen_range(0..sites);
        model.open(site / n + 1, site % n + 1)?;
    }
    Ok(model.number_of_open_sites() as f64 / sites as f64)
}

/// Aggregated outcome of a threshold estimation run.
///
/// The confidence interval follows `mean ± 1.96 * stddev / sqrt(trials)`.
/// With a single trial the sample standard deviation is undefined and
/// reported as `NaN`, and the interval degenerates with it.
#[derive(Debug, Clone, PartialEq)]
pub struct ThresholdEstimate {
    thresholds: Vec<f64>,
    mean: f64,
    stddev: f64,
}

impl ThresholdEstimate {
    /// Builds an estimate from per-trial thresholds.
    ///
    /// Callers guarantee at least one threshold; the estimator's trial count
    /// is non-zero by construction.
    fn from_thresholds(thresholds: Vec<f64>) -> Self {
        let count = thresholds.len() as f64;
        let mean = thresholds.iter().sum::<f64>() / count;
        let variance = thresholds
            .iter()
            .map(|threshold| (threshold - mean).powi(2))
            .sum::<f64>()
            / (count - 1.0);

        Self {
            thresholds,
            mean,
            stddev: variance.sqrt(),
        }
    }

    /// Returns the per-trial thresholds in trial order.
    #[must_use]
    pub fn thresholds(&self) -> &[f64] {
        &self.thresholds
    }

    /// Returns the number of trials that produced this estimate.
    #[must_use]
    pub fn trials(&self) -> usize {
        self.thresholds.len()
    }

    /// Returns the sample mean of the thresholds.
    #[must_use]
    pub const fn mean(&self) -> f64 {
        self.mean
    }

    /// Returns the sample standard deviation of the thresholds.
    #[must_use]
    pub const fn stddev(&self) -> f64 {
        self.stddev
    }

    /// Returns the low endpoint of the 95% confidence interval.
    #[must_use]
    pub fn confidence_lo(&self) -> f64 {
        self.mean - self.margin()
    }

    /// Returns the high endpoint of the 95% confidence interval.
    #[must_use]
    pub fn confidence_hi(&self) -> f64 {
        self.mean + self.margin()
    }

    fn margin(&self) -> f64 {
        CONFIDENCE_95 * self.stddev / (self.thresholds.len() as f64).sqrt()
    }
}

#[inline]
fn mix_trial_seed(base_seed: u64, trial: usize) -> u64 {
    splitmix64(base_seed ^ (trial as u64 + 1).wrapping_mul(TRIAL_SEED_SPACING))
}

#[inline]
fn splitmix64(mut state: u64) -> u64 {
    state = state.wrapping_add(TRIAL_SEED_SPACING);
    state = (state ^ (state >> 30)).wrapping_mul(SPLITMIX_MULT_A);
    state = (state ^ (state >> 27)).wrapping_mul(SPLITMIX_MULT_B);
    state ^ (state >> 31)
}
