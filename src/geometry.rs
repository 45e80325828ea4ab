//! Euclidean geometry over city coordinates.
//!
//! A [`Tour`] is an open Hamiltonian path: the edge from the last city back
//! to the first is never stored. [`close`] materializes that edge so that
//! [`tour_length`] measures the full cycle; [`tour_cost`] does both.

use rand::Rng;

use crate::error::{Result, TspError};

/// A city location in the plane.
///
/// Equality is by value; two tours are equal iff their points are equal
/// element-wise in the same order.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(f64::from(x), f64::from(y))
    }
}

/// Ordered visiting sequence of cities.
pub type Tour = Vec<Point>;

/// Euclidean distance between two points.
#[inline]
pub fn distance(a: &Point, b: &Point) -> f64 {
    (b.x - a.x).hypot(b.y - a.y)
}

/// Returns a copy of `tour` with its first point appended at the end.
///
/// An empty tour stays empty.
pub fn close(tour: &[Point]) -> Tour {
    let mut closed = Vec::with_capacity(tour.len() + 1);
    closed.extend_from_slice(tour);
    if let Some(&first) = tour.first() {
        closed.push(first);
    }
    closed
}

/// Sum of distances between consecutive points of `path`.
///
/// Only the edges present in `path` are counted; pass the result of
/// [`close`] to include the return edge.
pub fn tour_length(path: &[Point]) -> f64 {
    path.windows(2).map(|w| distance(&w[0], &w[1])).sum()
}

/// Length of the full cycle described by `tour`.
///
/// Equivalent to `tour_length(&close(tour))` without the allocation.
pub fn tour_cost(tour: &[Point]) -> f64 {
    match (tour.first(), tour.last()) {
        (Some(first), Some(last)) => tour_length(tour) + distance(last, first),
        _ => 0.0,
    }
}

/// Generates `n` cities with integer coordinates drawn uniformly from the
/// inclusive ranges, independently per axis. Duplicates are allowed.
///
/// # Errors
///
/// Returns [`TspError::EmptyRange`] if either range has `min > max`.
pub fn generate_tour<R: Rng + ?Sized>(
    n: usize,
    x_range: (i32, i32),
    y_range: (i32, i32),
    rng: &mut R,
) -> Result<Tour> {
    for (axis, (min, max)) in [("x", x_range), ("y", y_range)] {
        if min > max {
            return Err(TspError::EmptyRange { axis, min, max });
        }
    }

    Ok((0..n)
        .map(|_| {
            let x = rng.random_range(x_range.0..=x_range.1);
            let y = rng.random_range(y_range.0..=y_range.1);
            Point::from((x, y))
        })
        .collect())
}
