//! End-to-end scenarios through the public API.

use std::time::Duration;

use u_tsp::compare::{compare_algorithms, summarize, tabu_variants, Algorithm, ComparisonConfig};
use u_tsp::geometry::{generate_tour, tour_cost, Point};
use u_tsp::random::create_rng;
use u_tsp::sa::SaConfig;
use u_tsp::tabu::{TabuConfig, TabuSearch, Termination};
use u_tsp::TspError;

fn square() -> Vec<Point> {
    [(0, 0), (10, 0), (10, 10), (0, 10)]
        .into_iter()
        .map(Point::from)
        .collect()
}

#[test]
fn square_perimeter_is_kept() {
    let config = TabuConfig::default()
        .with_tabu_size(3)
        .with_search_space_percent(50.0)
        .with_aspiration_criteria(0.0)
        .with_max_stuck_iterations(2)
        .with_iterations(20);

    let mut search = TabuSearch::from_initial_solution(square(), create_rng(1));
    let result = search.run(&config).unwrap();
    assert!((result.best_cost - 40.0).abs() < 1e-9);
}

#[test]
fn single_and_empty_tours() {
    let config = TabuConfig::default().with_iterations(10);
    for tour in [vec![], vec![Point::new(3.0, 4.0)]] {
        let result = TabuSearch::with_seed(tour.clone(), 0).run(&config).unwrap();
        assert_eq!(result.best, tour);
        assert_eq!(result.best_cost, 0.0);
    }
}

#[test]
fn conflicting_budgets_rejected() {
    assert_eq!(
        Termination::from_options(Some(10), Some(5.0)),
        Err(TspError::ConflictingTermination)
    );
}

#[test]
fn time_budget_run() {
    let cities = generate_tour(30, (0, 100), (0, 100), &mut create_rng(3)).unwrap();
    let config = TabuConfig::default()
        .with_tabu_size(20)
        .with_search_space_percent(30.0)
        .with_aspiration_criteria(0.1)
        .with_max_stuck_iterations(10)
        .with_max_seconds(0.02)
        .unwrap();

    let mut search = TabuSearch::with_seed(cities, 3);
    let start = tour_cost(search.initial_solution());
    let result = search.run(&config).unwrap();
    assert!(result.elapsed > Duration::from_millis(20));
    assert!(result.best_cost <= start);
}

#[test]
fn tabu_beats_random_start_in_comparison() {
    let config = ComparisonConfig::default()
        .with_problem_sizes(vec![15])
        .with_repeats(2)
        .with_seed(9);
    let algorithms = [
        Algorithm::TabuSearch(TabuConfig::default().with_iterations(50)),
        Algorithm::SimulatedAnnealing(SaConfig::default().with_cooling_factor(1.05)),
        Algorithm::TwoOpt,
    ];
    let records = compare_algorithms(&config, &algorithms).unwrap();
    assert_eq!(records.len(), 6);
    assert!(records.iter().all(|r| r.tour_cost > 0.0));

    let summaries = summarize(&records);
    assert_eq!(summaries.len(), 3);
    assert!(summaries.iter().all(|s| s.runs == 2));
}

#[test]
fn tabu_variants_run() {
    let cities = generate_tour(20, (0, 100), (0, 100), &mut create_rng(4)).unwrap();
    for (label, config) in tabu_variants() {
        let result = TabuSearch::with_seed(cities.clone(), 4).run(&config).unwrap();
        assert_eq!(result.iterations, 100, "{label}");
    }
}
