//! Progress reporting for Tabu Search runs.

use std::time::Duration;

/// State of the search after one completed iteration.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct IterationSnapshot {
    /// 1-based index of the iteration that just finished.
    pub iteration: usize,
    /// Cost of the best solution so far.
    pub best_cost: f64,
    /// Cost of the working candidate carried into the next iteration.
    pub candidate_cost: f64,
    /// Consecutive iterations without improving the best solution.
    pub stuck_iterations: usize,
    /// Tabu list length after the iteration's insertion.
    pub tabu_len: usize,
    /// Size of the candidate batch that was evaluated.
    pub candidates: usize,
    /// Whether this iteration used shuffled (diversified) segments.
    pub diversified: bool,
    /// Accumulated search time, including this iteration.
    pub elapsed: Duration,
}

/// Receives a snapshot after every iteration.
///
/// Any `FnMut(&IterationSnapshot)` closure is an observer.
///
/// ```
/// use u_tsp::tabu::{IterationSnapshot, TabuObserver};
///
/// fn accepts<O: TabuObserver>(_observer: O) {}
///
/// let mut count = 0;
/// accepts(|_: &IterationSnapshot| count += 1);
/// ```
pub trait TabuObserver {
    fn on_iteration(&mut self, snapshot: &IterationSnapshot);
}

impl<F> TabuObserver for F
where
    F: FnMut(&IterationSnapshot),
{
    fn on_iteration(&mut self, snapshot: &IterationSnapshot) {
        self(snapshot)
    }
}

/// Observer that ignores every snapshot.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl TabuObserver for NoopObserver {
    fn on_iteration(&mut self, _snapshot: &IterationSnapshot) {}
}
