//! Simulated Annealing (SA) over Euclidean tours.
//!
//! Baseline used to compare against Tabu Search. Proposes random position
//! swaps and accepts worsening moves with a probability that decreases as
//! the temperature cools, allowing the search to escape local optima.
//!
//! # References
//!
//! - Kirkpatrick, Gelatt & Vecchi (1983), "Optimization by Simulated Annealing"
//! - Cerny (1985), "Thermodynamical Approach to the Travelling Salesman Problem"

mod config;
mod runner;

pub use config::SaConfig;
pub use runner::{SaResult, SaRunner};
