//! Antenna placement by pheromone-guided sampling.
//!
//! A variant of the colony that maximizes the share of interest points
//! covered by a fixed number of antennas. Antennas sit on interest points;
//! obstacles block lines of sight that pass too close to them.
//!
//! # Key Types
//!
//! - [`CoverageProblem`]: Interest points, obstacles, radius, antenna count
//! - [`CoverageConfig`]: Colony parameters
//! - [`CoverageRunner`]: Executes the optimization loop

mod config;
mod problem;
mod runner;

pub use config::CoverageConfig;
pub use problem::{CoverageProblem, Point};
pub use runner::{CoverageIterationResult, CoverageResult, CoverageRunner, Placement};
