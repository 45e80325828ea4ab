//! Heuristic local search for the Euclidean Traveling Salesman Problem.
//!
//! Given an ordered set of cities in the plane, find a cyclic visiting
//! order of minimal total length.
//!
//! - **Tabu Search (TS)**: segment-reversal neighborhood, a bounded memory
//!   of recently visited tours, percentage-based aspiration, and segment
//!   shuffling once the search stagnates. Stops on an iteration count or a
//!   wall-clock budget.
//! - **Simulated Annealing (SA)**: swap-move baseline with Metropolis
//!   acceptance and divisive cooling.
//! - **2-opt**: deterministic first-improvement baseline.
//! - **Comparison harness**: runs the algorithms side by side over random
//!   instances of growing size.
//!
//! # Architecture
//!
//! [`geometry`] holds the tour model and cost functions every algorithm
//! shares. Randomness always flows through an explicit RNG (see
//! [`random`]), so any run can be reproduced from a seed. Invalid
//! configurations are rejected with a [`TspError`] before a run starts.
//!
//! # Example
//!
//! ```
//! use u_tsp::geometry::generate_tour;
//! use u_tsp::random::create_rng;
//! use u_tsp::tabu::{TabuConfig, TabuSearch};
//!
//! let cities = generate_tour(50, (0, 100), (0, 100), &mut create_rng(1))?;
//! let config = TabuConfig::default()
//!     .with_tabu_size(20)
//!     .with_search_space_percent(30.0)
//!     .with_aspiration_criteria(0.1)
//!     .with_max_stuck_iterations(10)
//!     .with_iterations(100);
//!
//! let result = TabuSearch::with_seed(cities, 1).run(&config)?;
//! assert_eq!(result.best.len(), 50);
//! # Ok::<(), u_tsp::TspError>(())
//! ```

pub mod compare;
pub mod error;
pub mod geometry;
pub mod random;
pub mod sa;
pub mod tabu;
pub mod two_opt;

pub use error::{Result, TspError};
pub use geometry::{Point, Tour};
