//! Tabu Search execution engine.
//!
//! # Algorithm
//!
//! 1. Shuffle the problem once at construction; that tour seeds every run
//! 2. At each iteration:
//!    a. Diversify (shuffle segments) once stagnation reaches the limit
//!    b. Generate a candidate batch from the working candidate
//!    c. Seed the working candidate with the first tour of the batch
//!    d. Scan the batch, admitting non-tabu improvements and tabu tours
//!       that meet the aspiration threshold
//!    e. Promote the working candidate to best solution if strictly better
//!    f. Remember the working candidate in the tabu list
//! 3. Terminate on the iteration or time budget
//!
//! # Reference
//!
//! Glover, F. (1989). "Tabu Search—Part I", *ORSA Journal on Computing* 1(3), 190-206.

use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::Rng;

use super::config::{TabuConfig, Termination};
use super::memory::TabuList;
use super::neighborhood::generate_candidates;
use super::types::{IterationSnapshot, NoopObserver, TabuObserver};
use crate::error::Result;
use crate::geometry::{tour_cost, Point, Tour};
use crate::random::{create_rng, shuffle, unseeded_rng};

/// Result of a Tabu Search run.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TabuResult {
    /// Best tour found, not closed.
    pub best: Tour,
    /// Cycle length of `best`.
    pub best_cost: f64,
    /// Iterations executed.
    pub iterations: usize,
    /// Iteration at which `best` was found (0 if never improved).
    pub best_iteration: usize,
    /// Iterations that used shuffled segments.
    pub diversifications: usize,
    /// Accumulated per-iteration wall-clock time.
    pub elapsed: Duration,
    /// Best cost after each iteration.
    pub cost_history: Vec<f64>,
}

/// How a candidate fared against the working candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Acceptance {
    Rejected,
    /// Strictly cheaper and not tabu.
    Improving,
    /// Tabu, but the gap meets the aspiration threshold.
    Aspired,
}

/// Applies the acceptance rule.
///
/// The aspiration threshold is `aspiration_criteria` percent of the working
/// candidate's cost, compared with `>=`; plain improvement uses strict `<`.
pub(crate) fn evaluate(
    cost: f64,
    current_cost: f64,
    is_tabu: bool,
    aspiration_criteria: f64,
) -> Acceptance {
    if is_tabu {
        let gap = current_cost - cost;
        if gap >= aspiration_criteria * current_cost / 100.0 {
            Acceptance::Aspired
        } else {
            Acceptance::Rejected
        }
    } else if cost < current_cost {
        Acceptance::Improving
    } else {
        Acceptance::Rejected
    }
}

/// Scans one candidate batch and returns the admitted working candidate
/// with its cost, or `None` for an empty batch.
///
/// The first tour seeds the working candidate. Every tour, the seed
/// included, is then judged against the current working candidate; a tabu
/// tour admitted through aspiration loses one entry in `tabu_list`.
pub(crate) fn select_candidate(
    batch: Vec<Tour>,
    tabu_list: &mut TabuList,
    aspiration_criteria: f64,
) -> Option<(Tour, f64)> {
    let mut batch = batch.into_iter();
    let first = batch.next()?;
    let mut current_cost = tour_cost(&first);
    let mut current = first;

    // The seed competes against itself, so only aspiration applies.
    if tabu_list.contains(&current)
        && evaluate(current_cost, current_cost, true, aspiration_criteria) == Acceptance::Aspired
    {
        tabu_list.remove_first(&current);
    }

    for candidate in batch {
        let cost = tour_cost(&candidate);
        let is_tabu = tabu_list.contains(&candidate);
        match evaluate(cost, current_cost, is_tabu, aspiration_criteria) {
            Acceptance::Rejected => {}
            Acceptance::Improving => {
                current = candidate;
                current_cost = cost;
            }
            Acceptance::Aspired => {
                tabu_list.remove_first(&candidate);
                current = candidate;
                current_cost = cost;
            }
        }
    }

    Some((current, current_cost))
}

/// Tabu Search over a fixed set of cities.
///
/// The engine owns its RNG and the shuffled starting tour. Each call to
/// [`run`](Self::run) starts from that tour with a fresh tabu list, so runs
/// share nothing but the RNG stream.
///
/// # Examples
///
/// ```
/// use u_tsp::geometry::{generate_tour, tour_cost};
/// use u_tsp::random::create_rng;
/// use u_tsp::tabu::{TabuConfig, TabuSearch};
///
/// let mut rng = create_rng(7);
/// let cities = generate_tour(30, (0, 100), (0, 100), &mut rng).unwrap();
///
/// let mut search = TabuSearch::with_seed(cities, 7);
/// let start_cost = tour_cost(search.initial_solution());
/// let config = TabuConfig::default()
///     .with_tabu_size(10)
///     .with_search_space_percent(30.0)
///     .with_iterations(200);
///
/// let result = search.run(&config).unwrap();
/// assert_eq!(result.iterations, 200);
/// assert!(result.best_cost <= start_cost);
/// ```
#[derive(Debug, Clone)]
pub struct TabuSearch<R = StdRng> {
    initial_solution: Tour,
    rng: R,
}

impl TabuSearch<StdRng> {
    /// Creates an engine with an entropy-seeded RNG.
    pub fn new(problem: Tour) -> Self {
        Self::with_rng(problem, unseeded_rng())
    }

    /// Creates a reproducible engine.
    pub fn with_seed(problem: Tour, seed: u64) -> Self {
        Self::with_rng(problem, create_rng(seed))
    }
}

impl<R: Rng> TabuSearch<R> {
    /// Shuffles `problem` with `rng` and keeps it as the starting tour.
    pub fn with_rng(mut problem: Tour, mut rng: R) -> Self {
        shuffle(&mut problem, &mut rng);
        Self {
            initial_solution: problem,
            rng,
        }
    }

    /// Uses `tour` as the starting tour without shuffling it.
    pub fn from_initial_solution(tour: Tour, rng: R) -> Self {
        Self {
            initial_solution: tour,
            rng,
        }
    }

    /// The tour every run starts from.
    pub fn initial_solution(&self) -> &[Point] {
        &self.initial_solution
    }

    /// Runs the search.
    ///
    /// # Errors
    ///
    /// Returns the validation error of `config` before any iteration runs.
    pub fn run(&mut self, config: &TabuConfig) -> Result<TabuResult> {
        self.run_with_observer(config, &mut NoopObserver)
    }

    /// Runs the search, reporting every completed iteration to `observer`.
    pub fn run_with_observer<O>(
        &mut self,
        config: &TabuConfig,
        observer: &mut O,
    ) -> Result<TabuResult>
    where
        O: TabuObserver + ?Sized,
    {
        config.validate()?;

        let initial = self.initial_solution.clone();
        let mut best_solution = initial.clone();
        let mut best_cost = tour_cost(&best_solution);
        let mut best_candidate = initial.clone();
        let mut candidate_cost = best_cost;

        let mut tabu_list = TabuList::new(config.tabu_size);
        tabu_list.push(initial);

        let mut stuck_iterations = 0usize;
        let mut iteration = 0usize;
        let mut best_iteration = 0usize;
        let mut diversifications = 0usize;
        let mut elapsed = Duration::ZERO;

        let mut cost_history = match config.termination {
            Termination::Iterations(n) => Vec::with_capacity(n),
            Termination::TimeBudget(_) => Vec::new(),
        };

        log::debug!(
            "tabu.run: start n={} cost={:.3} tabu_size={} search_space={}% aspiration={}% max_stuck={} termination={:?}",
            best_solution.len(),
            best_cost,
            config.tabu_size,
            config.search_space_percent,
            config.aspiration_criteria,
            config.max_stuck_iterations,
            config.termination,
        );

        while config.termination.should_continue(iteration, elapsed) {
            let started = Instant::now();
            iteration += 1;

            let diversify = stuck_iterations >= config.max_stuck_iterations;
            if diversify {
                diversifications += 1;
                if stuck_iterations == config.max_stuck_iterations {
                    log::debug!(
                        "tabu.run: diversifying at iteration={iteration} after {stuck_iterations} stuck iterations"
                    );
                }
            }

            let batch = generate_candidates(
                &best_candidate,
                config.search_space_percent,
                diversify,
                &mut self.rng,
            );
            let batch_len = batch.len();

            // An empty batch leaves the working candidate untouched.
            if let Some((tour, cost)) =
                select_candidate(batch, &mut tabu_list, config.aspiration_criteria)
            {
                best_candidate = tour;
                candidate_cost = cost;
            }

            if candidate_cost < best_cost {
                best_solution = best_candidate.clone();
                best_cost = candidate_cost;
                best_iteration = iteration;
                stuck_iterations = 0;
            } else {
                stuck_iterations += 1;
            }

            tabu_list.push(best_candidate.clone());

            elapsed += started.elapsed();
            cost_history.push(best_cost);

            let snapshot = IterationSnapshot {
                iteration,
                best_cost,
                candidate_cost,
                stuck_iterations,
                tabu_len: tabu_list.len(),
                candidates: batch_len,
                diversified: diversify,
                elapsed,
            };
            log::trace!(
                "tabu.run: iteration={} best={:.3} candidate={:.3} stuck={} tabu={} batch={}",
                snapshot.iteration,
                snapshot.best_cost,
                snapshot.candidate_cost,
                snapshot.stuck_iterations,
                snapshot.tabu_len,
                snapshot.candidates,
            );
            observer.on_iteration(&snapshot);
        }

        log::debug!(
            "tabu.run: done iterations={iteration} best_cost={best_cost:.3} best_iteration={best_iteration} diversifications={diversifications} elapsed_ms={}",
            elapsed.as_millis()
        );

        Ok(TabuResult {
            best: best_solution,
            best_cost,
            iterations: iteration,
            best_iteration,
            diversifications,
            elapsed,
            cost_history,
        })
    }
}
