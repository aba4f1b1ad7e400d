//! Command-line interface orchestration for the percolation estimator.
//!
//! The CLI offers an `estimate` command that runs independent Monte Carlo
//! trials and renders the threshold statistics to stdout.

mod commands;

pub use commands::{Cli, Command, EstimateCommand, ExecutionSummary, render_summary, run_cli};
