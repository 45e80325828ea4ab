//! First-improvement 2-opt over a closed tour.
//!
//! # Algorithm
//!
//! For each pair of positions `1 <= i < j < n`, compute the change in cycle
//! length from reversing `tour[i..=j]`:
//!
//! ```text
//! delta = d(t[i-1], t[j]) + d(t[i], t[j+1]) - d(t[i-1], t[i]) - d(t[j], t[j+1])
//! ```
//!
//! where `t[n]` wraps to `t[0]`. Improving reversals are applied
//! immediately; passes repeat until none is found. The first city never
//! moves.
//!
//! # Complexity
//!
//! O(n²) per pass, O(n³) worst case for convergence.
//!
//! # Reference
//!
//! Croes, G.A. (1958). "A method for solving traveling salesman problems",
//! *Operations Research* 6(6), 791-812.

use crate::geometry::{distance, tour_cost, Point, Tour};

/// Improvements smaller than this are treated as noise.
const EPSILON: f64 = 1e-10;

/// Applies 2-opt to `tour` until no improving reversal remains.
///
/// Returns the improved tour (not closed) and its cycle length.
///
/// # Examples
///
/// ```
/// use u_tsp::geometry::Point;
/// use u_tsp::two_opt::two_opt;
///
/// // Crossing order around a square.
/// let tour = vec![
///     Point::new(0.0, 0.0),
///     Point::new(10.0, 10.0),
///     Point::new(10.0, 0.0),
///     Point::new(0.0, 10.0),
/// ];
/// let (_, cost) = two_opt(&tour);
/// assert!((cost - 40.0).abs() < 1e-9);
/// ```
pub fn two_opt(tour: &[Point]) -> (Tour, f64) {
    let mut current = tour.to_vec();
    let n = current.len();
    if n <= 3 {
        let cost = tour_cost(&current);
        return (current, cost);
    }

    let mut passes = 0usize;
    let mut improved = true;
    while improved {
        improved = false;
        passes += 1;
        for i in 1..n - 1 {
            for j in i + 1..n {
                if reversal_delta(&current, i, j) < -EPSILON {
                    current[i..=j].reverse();
                    improved = true;
                }
            }
        }
    }

    let cost = tour_cost(&current);
    log::debug!("two_opt: done n={n} passes={passes} cost={cost:.3}");
    (current, cost)
}

/// Change in cycle length from reversing `tour[i..=j]`, with `1 <= i < j < n`.
fn reversal_delta(tour: &[Point], i: usize, j: usize) -> f64 {
    let n = tour.len();
    let prev = &tour[i - 1];
    let next = &tour[(j + 1) % n];

    let old_cost = distance(prev, &tour[i]) + distance(&tour[j], next);
    let new_cost = distance(prev, &tour[j]) + distance(&tour[i], next);

    new_cost - old_cost
}
