//! SA execution loop.

use rand::Rng;

use super::config::SaConfig;
use crate::error::Result;
use crate::geometry::{tour_cost, Point, Tour};
use crate::random::{create_rng, unseeded_rng};

/// Moves between two best-cost history samples.
const HISTORY_INTERVAL: usize = 100;

/// Result of a Simulated Annealing run.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SaResult {
    /// Best tour visited, not closed.
    pub best: Tour,

    /// Cycle length of `best`.
    pub best_cost: f64,

    /// Total number of proposed moves.
    pub iterations: usize,

    /// Temperature when the algorithm stopped.
    pub final_temperature: f64,

    /// Number of accepted moves (including improvements).
    pub accepted_moves: usize,

    /// Number of strictly improving moves.
    pub improving_moves: usize,

    /// Best cost sampled every 100 moves, plus the final value.
    pub cost_history: Vec<f64>,
}

/// Executes Simulated Annealing on a tour.
pub struct SaRunner;

impl SaRunner {
    /// Anneals `tour`, starting from the given order.
    ///
    /// # Errors
    ///
    /// Returns the validation error of `config`.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_tsp::geometry::{generate_tour, tour_cost};
    /// use u_tsp::random::create_rng;
    /// use u_tsp::sa::{SaConfig, SaRunner};
    ///
    /// let cities = generate_tour(20, (0, 100), (0, 100), &mut create_rng(1)).unwrap();
    /// let result = SaRunner::run(&cities, &SaConfig::default().with_seed(1)).unwrap();
    /// assert!(result.best_cost <= tour_cost(&cities));
    /// ```
    pub fn run(tour: &[Point], config: &SaConfig) -> Result<SaResult> {
        config.validate()?;

        let mut rng = match config.seed {
            Some(seed) => create_rng(seed),
            None => unseeded_rng(),
        };

        let mut current = tour.to_vec();
        let mut current_cost = tour_cost(&current);
        let mut best = current.clone();
        let mut best_cost = current_cost;

        let mut temperature = config.initial_temperature;
        let mut iterations = 0usize;
        let mut accepted_moves = 0usize;
        let mut improving_moves = 0usize;
        let mut cost_history = vec![best_cost];

        log::debug!(
            "sa.run: start n={} cost={current_cost:.3} t0={} t_min={} cooling={}",
            current.len(),
            config.initial_temperature,
            config.min_temperature,
            config.cooling_factor,
        );

        // A swap needs two distinct positions.
        let movable = current.len() >= 2;

        while movable
            && temperature > config.min_temperature
            && current_cost > config.energy_threshold
        {
            if config.max_iterations > 0 && iterations >= config.max_iterations {
                break;
            }

            let neighbor = swap_neighbor(&current, &mut rng);
            let neighbor_cost = tour_cost(&neighbor);
            let delta = neighbor_cost - current_cost;

            // Metropolis acceptance criterion
            let accept = if delta < 0.0 {
                improving_moves += 1;
                true
            } else {
                let probability = (-delta / temperature).exp();
                rng.random_range(0.0..1.0) < probability
            };

            if accept {
                current = neighbor;
                current_cost = neighbor_cost;
                accepted_moves += 1;

                if current_cost < best_cost {
                    best = current.clone();
                    best_cost = current_cost;
                }
            }

            iterations += 1;
            if iterations % HISTORY_INTERVAL == 0 {
                cost_history.push(best_cost);
            }

            temperature /= config.cooling_factor;
        }

        if cost_history
            .last()
            .map_or(true, |&last| (last - best_cost).abs() > 1e-15)
        {
            cost_history.push(best_cost);
        }

        log::debug!(
            "sa.run: done iterations={iterations} best_cost={best_cost:.3} accepted={accepted_moves} t={temperature:.4}"
        );

        Ok(SaResult {
            best,
            best_cost,
            iterations,
            final_temperature: temperature,
            accepted_moves,
            improving_moves,
            cost_history,
        })
    }
}

/// Swaps two distinct positions of a copy of `tour`. Requires `len >= 2`.
fn swap_neighbor<R: Rng + ?Sized>(tour: &[Point], rng: &mut R) -> Tour {
    let len = tour.len();
    let i = rng.random_range(0..len);
    let mut j = rng.random_range(0..len - 1);
    if j >= i {
        j += 1;
    }
    let mut neighbor = tour.to_vec();
    neighbor.swap(i, j);
    neighbor
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::generate_tour;

    fn random_cities(n: usize, seed: u64) -> Tour {
        generate_tour(n, (0, 100), (0, 100), &mut create_rng(seed)).unwrap()
    }

    fn sorted(tour: &[Point]) -> Vec<(f64, f64)> {
        let mut pts: Vec<(f64, f64)> = tour.iter().map(|p| (p.x, p.y)).collect();
        pts.sort_by(|a, b| a.partial_cmp(b).unwrap());
        pts
    }

    #[test]
    fn test_sa_improves_random_tour() {
        let cities = random_cities(30, 1);
        let result = SaRunner::run(&cities, &SaConfig::default().with_seed(42)).unwrap();
        assert!(
            result.best_cost < tour_cost(&cities),
            "expected improvement, got {} vs {}",
            result.best_cost,
            tour_cost(&cities)
        );
        assert!(result.improving_moves > 0);
        assert!(result.accepted_moves >= result.improving_moves);
        assert_eq!(sorted(&result.best), sorted(&cities));
    }

    #[test]
    fn test_sa_max_iterations_limit() {
        let cities = random_cities(20, 2);
        let config = SaConfig::default().with_max_iterations(100).with_seed(42);
        let result = SaRunner::run(&cities, &config).unwrap();
        assert_eq!(result.iterations, 100);
    }

    #[test]
    fn test_sa_energy_threshold_stops_immediately() {
        let cities = random_cities(20, 3);
        let config = SaConfig::default()
            .with_energy_threshold(1e9)
            .with_seed(42);
        let result = SaRunner::run(&cities, &config).unwrap();
        assert_eq!(result.iterations, 0);
        assert_eq!(result.best, cities);
    }

    #[test]
    fn test_sa_cools_to_min_temperature() {
        let cities = random_cities(10, 4);
        let config = SaConfig::default()
            .with_initial_temperature(10.0)
            .with_min_temperature(1.0)
            .with_cooling_factor(1.1)
            .with_energy_threshold(0.0)
            .with_seed(42);
        let result = SaRunner::run(&cities, &config).unwrap();
        assert!(result.final_temperature <= 1.0);
        // ceil(ln(10) / ln(1.1)) moves
        assert_eq!(result.iterations, 25);
    }

    #[test]
    fn test_sa_cost_history_non_increasing() {
        let cities = random_cities(25, 5);
        let result = SaRunner::run(&cities, &SaConfig::default().with_seed(7)).unwrap();
        for window in result.cost_history.windows(2) {
            assert!(
                window[1] <= window[0] + 1e-10,
                "best cost history should be non-increasing: {} > {}",
                window[1],
                window[0]
            );
        }
    }

    #[test]
    fn test_sa_tiny_tours_unchanged() {
        for n in 0..2 {
            let cities: Tour = (0..n).map(|i| Point::new(i as f64, 0.0)).collect();
            let result = SaRunner::run(&cities, &SaConfig::default().with_seed(1)).unwrap();
            assert_eq!(result.best, cities);
            assert_eq!(result.iterations, 0);
        }
    }

    #[test]
    fn test_sa_metropolis_accepts_uphill() {
        // At very high temperature, almost all moves should be accepted
        let cities = random_cities(20, 6);
        let config = SaConfig::default()
            .with_initial_temperature(1e8)
            .with_min_temperature(1e7)
            .with_cooling_factor(1.0001)
            .with_max_iterations(1000)
            .with_seed(42);
        let result = SaRunner::run(&cities, &config).unwrap();
        let acceptance_ratio = result.accepted_moves as f64 / result.iterations as f64;
        assert!(
            acceptance_ratio > 0.8,
            "expected high acceptance at high temp, got {acceptance_ratio}"
        );
    }

    #[test]
    fn test_sa_rejects_invalid_config() {
        let cities = random_cities(5, 7);
        assert!(SaRunner::run(&cities, &SaConfig::default().with_cooling_factor(0.5)).is_err());
    }

    #[test]
    fn test_swap_neighbor_distinct_positions() {
        let cities: Tour = (0..6).map(|i| Point::new(i as f64, 0.0)).collect();
        let mut rng = create_rng(8);
        for _ in 0..100 {
            let n = swap_neighbor(&cities, &mut rng);
            let changed = (0..6).filter(|&k| n[k] != cities[k]).count();
            assert_eq!(changed, 2);
        }
    }
}
