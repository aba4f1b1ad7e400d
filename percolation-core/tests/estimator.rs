//! Tests for the Monte Carlo threshold estimator.

use std::num::NonZeroUsize;

use percolation_core::{ThresholdEstimatorBuilder, estimate_threshold};
use rand::{SeedableRng, rngs::SmallRng};
use rstest::{fixture, rstest};

#[fixture]
fn builder() -> ThresholdEstimatorBuilder {
    ThresholdEstimatorBuilder::new()
        .with_grid_size(20)
        .with_trials(40)
        .with_seed(1)
}

#[rstest]
fn estimate_reports_one_threshold_per_trial(builder: ThresholdEstimatorBuilder) {
    let estimator = builder.build().expect("configuration is valid");
    let estimate = estimator.run().expect("run must succeed");
    assert_eq!(estimate.trials(), 40);
    assert_eq!(estimate.thresholds().len(), 40);
    assert!(
        estimate
            .thresholds()
            .iter()
            .all(|&threshold| threshold > 0.0 && threshold <= 1.0)
    );
}

#[rstest]
fn mean_lands_near_the_known_threshold(builder: ThresholdEstimatorBuilder) {
    let estimator = builder.build().expect("configuration is valid");
    let estimate = estimator.run().expect("run must succeed");
    // The percolation threshold for site percolation on a square lattice is
    // roughly 0.593; at grid size 20 with 40 trials the sample mean stays
    // comfortably within this band.
    assert!(
        estimate.mean() > 0.5 && estimate.mean() < 0.7,
        "mean {} fell outside the expected band",
        estimate.mean()
    );
    assert!(estimate.confidence_lo() <= estimate.mean());
    assert!(estimate.mean() <= estimate.confidence_hi());
    assert!(estimate.confidence_lo() < estimate.confidence_hi());
}

#[rstest]
fn confidence_interval_narrows_with_more_trials(builder: ThresholdEstimatorBuilder) {
    let narrow = builder
        .clone()
        .with_trials(100)
        .build()
        .expect("configuration is valid")
        .run()
        .expect("run must succeed");
    let wide = builder
        .with_trials(10)
        .build()
        .expect("configuration is valid")
        .run()
        .expect("run must succeed");

    let narrow_width = narrow.confidence_hi() - narrow.confidence_lo();
    let wide_width = wide.confidence_hi() - wide.confidence_lo();
    assert!(
        narrow_width < wide_width,
        "expected {narrow_width} < {wide_width}"
    );
}

#[rstest]
fn single_trials_run_against_an_injected_generator() {
    let grid_size = NonZeroUsize::new(4).expect("non-zero");
    let mut rng = SmallRng::seed_from_u64(9);
    let first = estimate_threshold(grid_size, &mut rng).expect("trial must succeed");

    let mut replay = SmallRng::seed_from_u64(9);
    let second = estimate_threshold(grid_size, &mut replay).expect("trial must succeed");
    assert_eq!(first, second);
}
