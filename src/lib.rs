//! Ant Colony Optimization.
//!
//! Provides the Ant System metaheuristic for:
//!
//! - **Traveling Salesman Problem** ([`tsp`]): stochastic tour construction
//!   biased by pheromone and inverse distance, pheromone reinforcement and
//!   evaporation, and a control loop that tracks the best tour.
//! - **Antenna placement** ([`coverage`]): pheromone-guided selection of
//!   antenna sites maximizing interest-point coverage around obstacles.
//!
//! # Architecture
//!
//! Shared building blocks sit at the crate root: the symmetric
//! [`pheromone::PheromoneMatrix`], seedable randomness with per-ant
//! sub-streams ([`random`]), and the [`observer::Observer`] seam through
//! which runners publish one event per iteration. Rendering, persistence
//! and user interfaces are left to consumers of that stream.
//!
//! # Example
//!
//! ```
//! use u_antcolony::tsp::{AcoConfig, AcoRunner};
//!
//! let cities = [(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0)];
//! let config = AcoConfig::default()
//!     .with_n_ants(10)
//!     .with_n_iterations(50)
//!     .with_seed(42);
//! let result = AcoRunner::solve(&cities, &config).unwrap();
//! assert!((result.best.length - 4.0).abs() < 0.04);
//! ```

pub mod coverage;
pub mod error;
pub mod observer;
pub mod pheromone;
pub mod random;
pub mod tsp;

mod timing;

pub use error::{AcoError, Result};
