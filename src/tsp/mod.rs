//! Ant System for the symmetric Traveling Salesman Problem.
//!
//! Each iteration releases a generation of ants. Every ant builds a closed
//! tour by sampling the next city with probability proportional to
//! `tau^alpha * (1/d)^beta`. Once all ants are done, each deposits
//! `1/length` on the edges it used, the whole pheromone matrix evaporates
//! by `decay`, and the global best is updated.
//!
//! # Key Types
//!
//! - [`DistanceMatrix`]: Precomputed pairwise distances
//! - [`AntPathBuilder`]: Constructs one ant's tour
//! - [`Colony`]: Pheromone owner, steps one iteration at a time
//! - [`AcoRunner`]: Full run with observer, cancellation and time limit
//!
//! # References
//!
//! - Dorigo, Maniezzo & Colorni (1996), "Ant System: Optimization by a
//!   Colony of Cooperating Agents"
//! - Dorigo & Stützle (2004), *Ant Colony Optimization*

mod ant;
mod colony;
mod config;
mod distance;
mod runner;
mod types;

pub use ant::{AntPathBuilder, ZERO_DISTANCE_HEURISTIC};
pub use colony::Colony;
pub use config::AcoConfig;
pub use distance::DistanceMatrix;
pub use runner::{AcoResult, AcoRunner};
pub use types::{AntSolution, City, IterationResult, Path};
