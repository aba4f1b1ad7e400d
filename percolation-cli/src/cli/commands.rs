//! Command implementations and argument parsing for the percolation CLI.

use std::io::{self, Write};

use clap::{Args, Parser, Subcommand};
use percolation_core::{Result, ThresholdEstimate, ThresholdEstimatorBuilder};
use tracing::{Span, field, info, instrument};

const DEFAULT_GRID_SIZE: usize = 20;
const DEFAULT_TRIALS: usize = 30;

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(
    name = "percolation",
    about = "Estimate the percolation threshold by Monte Carlo simulation."
)]
pub struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported CLI commands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Run independent trials and report threshold statistics.
    Estimate(EstimateCommand),
}

/// Options accepted by the `estimate` command.
#[derive(Debug, Args, Clone)]
pub struct EstimateCommand {
    /// Side length of the simulated grid.
    #[arg(long = "grid-size", default_value_t = DEFAULT_GRID_SIZE)]
    pub grid_size: usize,

    /// Number of independent trials to run.
    #[arg(long, default_value_t = DEFAULT_TRIALS)]
    pub trials: usize,

    /// Base seed for the per-trial random generators.
    #[arg(long, default_value_t = 0)]
    pub seed: u64,
}

/// Summarises the outcome of executing a CLI command.
#[derive(Debug, Clone)]
pub struct ExecutionSummary {
    /// Side length of the simulated grid.
    pub grid_size: usize,
    /// Number of trials that ran.
    pub trials: usize,
    /// Aggregated threshold statistics.
    pub estimate: ThresholdEstimate,
}

/// Executes the CLI command represented by `cli`.
///
/// # Errors
/// Returns [`percolation_core::PercolationError`] when the configuration is
/// invalid or the estimation run fails.
///
/// # Examples
/// ```
/// use percolation_cli::cli::{Cli, Command, EstimateCommand, run_cli};
///
/// let cli = Cli {
///     command: Command::Estimate(EstimateCommand {
///         grid_size: 4,
///         trials: 3,
///         seed: 7,
///     }),
/// };
/// let summary = run_cli(cli)?;
/// assert_eq!(summary.estimate.trials(), 3);
/// # Ok::<(), percolation_core::PercolationError>(())
/// ```
#[instrument(name = "cli.run", err, skip(cli), fields(command = field::Empty))]
pub fn run_cli(cli: Cli) -> Result<ExecutionSummary> {
    match cli.command {
        Command::Estimate(estimate) => {
            Span::current().record("command", field::display("estimate"));
            run_estimate(estimate)
        }
    }
}

#[instrument(
    name = "cli.estimate",
    err,
    skip(command),
    fields(grid_size = command.grid_size, trials = command.trials, seed = command.seed),
)]
pub(super) fn run_estimate(command: EstimateCommand) -> Result<ExecutionSummary> {
    let estimator = ThresholdEstimatorBuilder::new()
        .with_grid_size(command.grid_size)
        .with_trials(command.trials)
        .with_seed(command.seed)
        .build()?;
    let estimate = estimator.run()?;

    info!(
        mean = estimate.mean(),
        stddev = estimate.stddev(),
        "command completed"
    );
    Ok(ExecutionSummary {
        grid_size: command.grid_size,
        trials: command.trials,
        estimate,
    })
}

/// Renders `summary` to `writer` in a human-readable text format.
///
/// # Errors
/// Returns [`io::Error`] if writing to the supplied writer fails.
///
/// # Examples
/// ```
/// # use std::io::Cursor;
/// use percolation_cli::cli::{Cli, Command, EstimateCommand, render_summary, run_cli};
///
/// let cli = Cli {
///     command: Command::Estimate(EstimateCommand {
///         grid_size: 1,
///         trials: 2,
///         seed: 0,
///     }),
/// };
/// let summary = run_cli(cli)?;
/// let mut buffer = Cursor::new(Vec::new());
/// render_summary(&summary, &mut buffer)?;
/// let rendered = String::from_utf8(buffer.into_inner())?;
/// assert!(rendered.contains("mean"));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn render_summary(summary: &ExecutionSummary, mut writer: impl Write) -> io::Result<()> {
    writeln!(writer, "grid size: {}", summary.grid_size)?;
    writeln!(writer, "trials: {}", summary.trials)?;
    writeln!(writer, "mean = {}", summary.estimate.mean())?;
    writeln!(writer, "stddev = {}", summary.estimate.stddev())?;
    writeln!(
        writer,
        "95% confidence interval = [{}, {}]",
        summary.estimate.confidence_lo(),
        summary.estimate.confidence_hi()
    )?;
    Ok(())
}
