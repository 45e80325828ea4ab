//! Segment-reversal neighborhood over tours.
//!
//! A move picks two distinct cut positions `i < j` in `1..len` and reverses
//! `tour[i..j]`. Position 0 is never touched, which anchors the start of the
//! cycle and rules out trivial rotations. Because the upper cut is exclusive,
//! the last city also keeps its position.
//!
//! When diversifying, the reversed segment is additionally shuffled.

use rand::Rng;

use crate::geometry::{Point, Tour};
use crate::random::shuffle;

/// Number of candidates produced for a tour of `len` cities.
///
/// `floor(percent / 100 * len)`, and zero whenever no valid move exists
/// (`len <= 2`).
pub fn batch_size(len: usize, search_space_percent: f64) -> usize {
    if len <= 2 {
        return 0;
    }
    ((search_space_percent / 100.0) * len as f64).floor() as usize
}

/// Produces a batch of independent candidate tours derived from `tour`.
///
/// `tour` itself is never modified.
///
/// # Examples
///
/// ```
/// use u_tsp::geometry::Point;
/// use u_tsp::random::create_rng;
/// use u_tsp::tabu::generate_candidates;
///
/// let tour: Vec<Point> = (0..10).map(|i| Point::new(i as f64, 0.0)).collect();
/// let mut rng = create_rng(1);
/// let batch = generate_candidates(&tour, 50.0, false, &mut rng);
/// assert_eq!(batch.len(), 5);
/// assert!(batch.iter().all(|c| c[0] == tour[0]));
/// ```
pub fn generate_candidates<R: Rng + ?Sized>(
    tour: &[Point],
    search_space_percent: f64,
    randomize: bool,
    rng: &mut R,
) -> Vec<Tour> {
    let len = tour.len();
    let count = batch_size(len, search_space_percent);
    (0..count)
        .map(|_| {
            let (i, j) = sample_cut(len, rng);
            segment_move(tour, i, j, randomize, rng)
        })
        .collect()
}

/// Draws two distinct positions uniformly from `1..len` and orders them.
///
/// Requires `len >= 3`.
fn sample_cut<R: Rng + ?Sized>(len: usize, rng: &mut R) -> (usize, usize) {
    let a = rng.random_range(1..len);
    // Skip over `a` so the pair is distinct without rejection sampling.
    let mut b = rng.random_range(1..len - 1);
    if b >= a {
        b += 1;
    }
    (a.min(b), a.max(b))
}

fn segment_move<R: Rng + ?Sized>(
    tour: &[Point],
    i: usize,
    j: usize,
    randomize: bool,
    rng: &mut R,
) -> Tour {
    let mut candidate = tour.to_vec();
    let segment = &mut candidate[i..j];
    segment.reverse();
    if randomize {
        shuffle(segment, rng);
    }
    candidate
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;

    fn line(n: usize) -> Tour {
        (0..n).map(|i| Point::new(i as f64, (i * i) as f64)).collect()
    }

    fn sorted_xs(tour: &[Point]) -> Vec<f64> {
        let mut xs: Vec<f64> = tour.iter().map(|p| p.x).collect();
        xs.sort_by(|a, b| a.partial_cmp(b).unwrap());
        xs
    }

    #[test]
    fn test_batch_size_floors() {
        assert_eq!(batch_size(10, 20.0), 2);
        assert_eq!(batch_size(9, 20.0), 1);
        assert_eq!(batch_size(4, 50.0), 2);
        assert_eq!(batch_size(4, 10.0), 0);
        assert_eq!(batch_size(100, 100.0), 100);
        assert_eq!(batch_size(50, 0.0), 0);
    }

    #[test]
    fn test_batch_size_degenerate_lengths() {
        for len in 0..=2 {
            assert_eq!(batch_size(len, 100.0), 0);
        }
    }

    #[test]
    fn test_degenerate_tours_yield_nothing() {
        let mut rng = create_rng(3);
        for len in 0..=2 {
            let tour = line(len);
            assert!(generate_candidates(&tour, 100.0, false, &mut rng).is_empty());
            assert!(generate_candidates(&tour, 100.0, true, &mut rng).is_empty());
        }
    }

    #[test]
    fn test_sample_cut_bounds() {
        let mut rng = create_rng(11);
        for len in 3..12 {
            for _ in 0..200 {
                let (i, j) = sample_cut(len, &mut rng);
                assert!(1 <= i && i < j && j < len, "len={len} i={i} j={j}");
            }
        }
    }

    #[test]
    fn test_sample_cut_covers_all_pairs() {
        let mut rng = create_rng(5);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..2000 {
            seen.insert(sample_cut(5, &mut rng));
        }
        // Pairs from {1, 2, 3, 4}.
        assert_eq!(seen.len(), 6);
    }

    #[test]
    fn test_reversal_moves() {
        let tour = line(12);
        let mut rng = create_rng(42);
        let batch = generate_candidates(&tour, 100.0, false, &mut rng);
        assert_eq!(batch.len(), 12);

        for cand in &batch {
            assert_eq!(cand[0], tour[0]);
            assert_eq!(cand[11], tour[11]);
            let diff: Vec<usize> = (0..12).filter(|&k| cand[k] != tour[k]).collect();
            if let (Some(&a), Some(&b)) = (diff.first(), diff.last()) {
                let mut expected = tour[a..=b].to_vec();
                expected.reverse();
                assert_eq!(&cand[a..=b], expected.as_slice());
            }
        }
    }

    #[test]
    fn test_randomized_moves_keep_points() {
        let tour = line(15);
        let mut rng = create_rng(9);
        let batch = generate_candidates(&tour, 40.0, true, &mut rng);
        assert_eq!(batch.len(), 6);
        for cand in &batch {
            assert_eq!(cand.len(), tour.len());
            assert_eq!(cand[0], tour[0]);
            assert_eq!(sorted_xs(cand), sorted_xs(&tour));
        }
    }

    #[test]
    fn test_base_tour_untouched() {
        let tour = line(8);
        let copy = tour.clone();
        let mut rng = create_rng(1);
        let _ = generate_candidates(&tour, 100.0, true, &mut rng);
        assert_eq!(tour, copy);
    }

    #[test]
    fn test_three_cities_single_no_op_move() {
        // Only cut (1, 2) exists and reverses a one-element segment.
        let tour = line(3);
        let mut rng = create_rng(2);
        let batch = generate_candidates(&tour, 100.0, false, &mut rng);
        assert_eq!(batch.len(), 3);
        assert!(batch.iter().all(|c| *c == tour));
    }
}
