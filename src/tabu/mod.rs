//! Tabu Search (TS) over Euclidean tours.
//!
//! A single-solution trajectory metaheuristic that remembers recently
//! visited tours (the tabu list) to avoid cycling, lets a forbidden tour
//! back in when its improvement is large enough (aspiration), and shuffles
//! candidate segments once the search stagnates (diversification).
//!
//! # References
//!
//! - Glover, F. (1989). "Tabu Search—Part I", *ORSA Journal on Computing* 1(3), 190-206.
//! - Glover, F. (1990). "Tabu Search—Part II", *ORSA Journal on Computing* 2(1), 4-32.

mod config;
mod memory;
mod neighborhood;
mod runner;
mod types;

pub use config::{TabuConfig, Termination};
pub use memory::TabuList;
pub use neighborhood::{batch_size, generate_candidates};
pub use runner::{TabuResult, TabuSearch};
pub use types::{IterationSnapshot, NoopObserver, TabuObserver};
