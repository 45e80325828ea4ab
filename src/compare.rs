//! Benchmark harness comparing Tabu Search against the SA and 2-opt
//! baselines on random instances.
//!
//! Each (problem size, repeat) pair gets one random instance that every
//! algorithm solves, so costs within a repeat are directly comparable.
//! Runs are independent: each owns its engine and RNG, which is what makes
//! the optional parallel mode safe.

use std::time::{Duration, Instant};

use rand::Rng;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::error::{Result, TspError};
use crate::geometry::{generate_tour, Point};
use crate::random::{create_rng, unseeded_rng};
use crate::sa::{SaConfig, SaRunner};
use crate::tabu::{TabuConfig, TabuSearch};
use crate::two_opt::two_opt;

/// An algorithm taking part in a comparison.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Algorithm {
    /// Tabu Search from a shuffled start.
    TabuSearch(TabuConfig),
    /// Simulated Annealing from the generated order.
    SimulatedAnnealing(SaConfig),
    /// 2-opt local search from the generated order.
    TwoOpt,
}

impl Algorithm {
    /// Display name used in records and summaries.
    pub fn name(&self) -> &'static str {
        match self {
            Self::TabuSearch(_) => "Tabu Search",
            Self::SimulatedAnnealing(_) => "Simulated Annealing",
            Self::TwoOpt => "2-Opt",
        }
    }

    /// Validates the wrapped configuration, if any.
    pub fn validate(&self) -> Result<()> {
        match self {
            Self::TabuSearch(config) => config.validate(),
            Self::SimulatedAnnealing(config) => config.validate(),
            Self::TwoOpt => Ok(()),
        }
    }

    /// Solves `instance`, drawing any needed seed from `rng`.
    ///
    /// Returns the cycle length of the tour found.
    fn solve<R: Rng>(&self, instance: &[Point], rng: &mut R) -> Result<f64> {
        match self {
            Self::TabuSearch(config) => {
                let engine_rng = create_rng(rng.random());
                let mut search = TabuSearch::with_rng(instance.to_vec(), engine_rng);
                Ok(search.run(config)?.best_cost)
            }
            Self::SimulatedAnnealing(config) => {
                let config = match config.seed {
                    Some(_) => config.clone(),
                    None => config.clone().with_seed(rng.random()),
                };
                Ok(SaRunner::run(instance, &config)?.best_cost)
            }
            Self::TwoOpt => Ok(two_opt(instance).1),
        }
    }
}

/// The Tabu Search, SA and 2-opt line-up with their benchmark defaults.
pub fn default_algorithms() -> Vec<Algorithm> {
    vec![
        Algorithm::SimulatedAnnealing(SaConfig::default().with_cooling_factor(1.05)),
        Algorithm::TabuSearch(TabuConfig::default()),
        Algorithm::TwoOpt,
    ]
}

/// Four Tabu Search parameterizations for comparing tabu size, search
/// space and aspiration against each other.
///
/// Each entry is `(label, config)`; all use a stagnation limit of 100 and
/// 100 iterations.
pub fn tabu_variants() -> Vec<(&'static str, TabuConfig)> {
    [
        ("Version 1", 5, 20.0, 10.0),
        ("Version 2", 10, 15.0, 5.0),
        ("Version 3", 15, 25.0, 15.0),
        ("Version 4", 20, 30.0, 20.0),
    ]
    .into_iter()
    .map(|(label, tabu_size, search_space, aspiration)| {
        let config = TabuConfig::default()
            .with_tabu_size(tabu_size)
            .with_search_space_percent(search_space)
            .with_aspiration_criteria(aspiration)
            .with_max_stuck_iterations(100)
            .with_iterations(100);
        (label, config)
    })
    .collect()
}

/// Settings of a comparison sweep.
///
/// # Examples
///
/// ```
/// use u_tsp::compare::{compare_algorithms, summarize, Algorithm, ComparisonConfig};
/// use u_tsp::tabu::TabuConfig;
///
/// let config = ComparisonConfig::default()
///     .with_problem_sizes(vec![10, 20])
///     .with_repeats(2)
///     .with_seed(5);
/// let algorithms = [
///     Algorithm::TabuSearch(TabuConfig::default().with_iterations(20)),
///     Algorithm::TwoOpt,
/// ];
/// let records = compare_algorithms(&config, &algorithms).unwrap();
/// assert_eq!(records.len(), 2 * 2 * 2);
/// assert_eq!(summarize(&records).len(), 4);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ComparisonConfig {
    /// Number of cities per instance, one sweep point each.
    pub problem_sizes: Vec<usize>,
    /// Instances generated per problem size.
    pub repeats: usize,
    /// Inclusive x coordinate range of generated cities.
    pub x_range: (i32, i32),
    /// Inclusive y coordinate range of generated cities.
    pub y_range: (i32, i32),
    /// Master seed (None for random).
    pub seed: Option<u64>,
    /// Run instances on the rayon pool. Only honored with the `parallel`
    /// feature; otherwise runs are sequential.
    pub parallel: bool,
}

impl Default for ComparisonConfig {
    fn default() -> Self {
        Self {
            problem_sizes: (1..=10).map(|k| k * 10).collect(),
            repeats: 5,
            x_range: (0, 100),
            y_range: (0, 100),
            seed: None,
            parallel: false,
        }
    }
}

impl ComparisonConfig {
    /// Sets the swept problem sizes.
    pub fn with_problem_sizes(mut self, sizes: Vec<usize>) -> Self {
        self.problem_sizes = sizes;
        self
    }

    /// Sets the number of instances per size.
    pub fn with_repeats(mut self, repeats: usize) -> Self {
        self.repeats = repeats;
        self
    }

    /// Sets the coordinate ranges of generated cities.
    pub fn with_ranges(mut self, x_range: (i32, i32), y_range: (i32, i32)) -> Self {
        self.x_range = x_range;
        self.y_range = y_range;
        self
    }

    /// Sets the master seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Enables parallel execution (requires the `parallel` feature).
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.repeats == 0 {
            return Err(TspError::invalid("repeats", "must be positive"));
        }
        for (axis, (min, max)) in [("x", self.x_range), ("y", self.y_range)] {
            if min > max {
                return Err(TspError::EmptyRange { axis, min, max });
            }
        }
        Ok(())
    }
}

/// Outcome of one algorithm on one instance.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RunRecord {
    /// Number of cities in the instance.
    pub problem_size: usize,
    /// Repeat index within the problem size.
    pub repeat: usize,
    /// [`Algorithm::name`] of the solver.
    pub algorithm: &'static str,
    /// Cycle length of the returned tour.
    pub tour_cost: f64,
    /// Wall-clock time of the solve call.
    pub elapsed: Duration,
}

/// Mean outcome of one algorithm at one problem size.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Summary {
    /// Number of cities per instance.
    pub problem_size: usize,
    /// [`Algorithm::name`] of the solver.
    pub algorithm: &'static str,
    /// Records averaged.
    pub runs: usize,
    /// Mean tour cost.
    pub mean_cost: f64,
    /// Mean solve time in seconds.
    pub mean_seconds: f64,
}

/// One generated instance: its size, repeat index and seed.
#[derive(Debug, Clone, Copy)]
struct Job {
    problem_size: usize,
    repeat: usize,
    seed: u64,
}

/// Runs every algorithm on `repeats` random instances of every size.
///
/// Records are ordered by problem size, then repeat, then the order of
/// `algorithms`, regardless of parallelism.
///
/// # Errors
///
/// Fails before running anything if `config` or any algorithm config is
/// invalid.
pub fn compare_algorithms(
    config: &ComparisonConfig,
    algorithms: &[Algorithm],
) -> Result<Vec<RunRecord>> {
    config.validate()?;
    for algorithm in algorithms {
        algorithm.validate()?;
    }

    let mut master = match config.seed {
        Some(seed) => create_rng(seed),
        None => unseeded_rng(),
    };
    let jobs: Vec<Job> = config
        .problem_sizes
        .iter()
        .flat_map(|&problem_size| {
            (0..config.repeats).map(move |repeat| (problem_size, repeat))
        })
        .map(|(problem_size, repeat)| Job {
            problem_size,
            repeat,
            seed: master.random(),
        })
        .collect();

    log::info!(
        "compare: {} instances x {} algorithms (parallel={})",
        jobs.len(),
        algorithms.len(),
        config.parallel && cfg!(feature = "parallel"),
    );

    let per_job: Vec<Vec<RunRecord>> = run_jobs(&jobs, config, algorithms)?;
    Ok(per_job.into_iter().flatten().collect())
}

#[cfg(feature = "parallel")]
fn run_jobs(
    jobs: &[Job],
    config: &ComparisonConfig,
    algorithms: &[Algorithm],
) -> Result<Vec<Vec<RunRecord>>> {
    if config.parallel {
        jobs.par_iter()
            .map(|job| run_job(job, config, algorithms))
            .collect()
    } else {
        jobs.iter()
            .map(|job| run_job(job, config, algorithms))
            .collect()
    }
}

#[cfg(not(feature = "parallel"))]
fn run_jobs(
    jobs: &[Job],
    config: &ComparisonConfig,
    algorithms: &[Algorithm],
) -> Result<Vec<Vec<RunRecord>>> {
    jobs.iter()
        .map(|job| run_job(job, config, algorithms))
        .collect()
}

fn run_job(job: &Job, config: &ComparisonConfig, algorithms: &[Algorithm]) -> Result<Vec<RunRecord>> {
    let mut rng = create_rng(job.seed);
    let instance = generate_tour(job.problem_size, config.x_range, config.y_range, &mut rng)?;

    algorithms
        .iter()
        .map(|algorithm| {
            let started = Instant::now();
            let tour_cost = algorithm.solve(&instance, &mut rng)?;
            let elapsed = started.elapsed();
            log::debug!(
                "compare: n={} repeat={} algorithm={} cost={tour_cost:.3} ms={}",
                job.problem_size,
                job.repeat,
                algorithm.name(),
                elapsed.as_millis(),
            );
            Ok(RunRecord {
                problem_size: job.problem_size,
                repeat: job.repeat,
                algorithm: algorithm.name(),
                tour_cost,
                elapsed,
            })
        })
        .collect()
}

/// Averages records per (problem size, algorithm).
///
/// Output is ordered by first appearance of each pair in `records`.
pub fn summarize(records: &[RunRecord]) -> Vec<Summary> {
    let mut summaries: Vec<Summary> = Vec::new();
    for record in records {
        let slot = summaries
            .iter_mut()
            .find(|s| s.problem_size == record.problem_size && s.algorithm == record.algorithm);
        match slot {
            Some(summary) => {
                summary.runs += 1;
                summary.mean_cost += record.tour_cost;
                summary.mean_seconds += record.elapsed.as_secs_f64();
            }
            None => summaries.push(Summary {
                problem_size: record.problem_size,
                algorithm: record.algorithm,
                runs: 1,
                mean_cost: record.tour_cost,
                mean_seconds: record.elapsed.as_secs_f64(),
            }),
        }
    }
    for summary in &mut summaries {
        let runs = summary.runs as f64;
        summary.mean_cost /= runs;
        summary.mean_seconds /= runs;
    }
    summaries
}
