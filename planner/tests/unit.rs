//! Property tests for the solver
//!
//! Sweep generated instances and compare the solver's verdict with an
//! exhaustive enumeration, plus targeted checks on capacity, ordering and
//! determinism.

use planner::{PlannerError, Solver, Strategy};
use shared::{Dataset, Driver, Job};

mod common;
use common::{TestFixtures, TestHelpers};

fn random_dataset(seed: u64) -> (Dataset, usize) {
    let mut state = seed;
    let drivers = (TestHelpers::lcg(&mut state) % 4) as usize;
    let jobs = (TestHelpers::lcg(&mut state) % 7) as usize;
    let zones = 2 + (TestHelpers::lcg(&mut state) % 3);
    let capacity = 1 + (TestHelpers::lcg(&mut state) % 3) as usize;

    let jobs = (0..jobs)
        .map(|n| {
            let pickup = TestHelpers::lcg(&mut state) % zones;
            let dropoff = TestHelpers::lcg(&mut state) % zones;
            Job::new(format!("J{n}"), format!("z{pickup}"), format!("z{dropoff}"))
        })
        .collect();

    (Dataset::new(TestFixtures::drivers(drivers), jobs), capacity)
}

#[test]
fn test_solver_agrees_with_enumeration() {
    for seed in 0..300 {
        let (dataset, capacity) = random_dataset(seed);
        let expected = TestHelpers::feasible_by_enumeration(&dataset, capacity);

        match Solver::new(capacity, None).solve(&dataset) {
            Ok(solution) => {
                assert!(expected, "seed {seed}: solver found an assignment enumeration missed");
                TestHelpers::assert_feasible(&dataset, &solution.assignment, capacity);
            }
            Err(PlannerError::InfeasibleAssignment { unassigned }) => {
                assert!(!expected, "seed {seed}: solver missed a feasible assignment");
                assert!(!unassigned.is_empty());
                assert!(unassigned.iter().all(|id| dataset.job(id).is_some()));
            }
            Err(other) => panic!("seed {seed}: unexpected error {other:?}"),
        }
    }
}

#[test]
fn test_solving_twice_gives_identical_assignments() {
    for seed in 0..50 {
        let (dataset, capacity) = random_dataset(seed);
        let solver = Solver::new(capacity, None);

        let first = solver.solve(&dataset).map(|solution| solution.assignment);
        let second = solver.solve(&dataset).map(|solution| solution.assignment);
        match (first, second) {
            (Ok(a), Ok(b)) => assert_eq!(a, b),
            (Err(a), Err(b)) => assert_eq!(a.offending_ids(), b.offending_ids()),
            _ => panic!("seed {seed}: verdicts differ between runs"),
        }
    }
}

#[test]
fn test_jobs_beyond_total_capacity_are_infeasible() {
    for drivers in 0..4 {
        let dataset = Dataset::new(TestFixtures::drivers(drivers), TestFixtures::line(3 * drivers + 1));

        let error = Solver::new(3, None).solve(&dataset).unwrap_err();
        assert_eq!(error.offending_ids(), vec![format!("L{:02}", 3 * drivers)]);
    }
}

#[test]
fn test_long_line_is_cut_into_full_routes() {
    let dataset = Dataset::new(TestFixtures::drivers(4), TestFixtures::line(10));

    let solution = Solver::new(3, None).solve(&dataset).unwrap();
    assert_eq!(solution.stats.strategy, Strategy::Greedy);
    assert_eq!(
        TestHelpers::route_ids(&solution.assignment, "DR-1"),
        vec!["L00", "L01", "L02"]
    );
    assert_eq!(TestHelpers::route_ids(&solution.assignment, "DR-4"), vec!["L09"]);
    TestHelpers::assert_feasible(&dataset, &solution.assignment, 3);
}

#[test]
fn test_spare_drivers_get_empty_routes() {
    let dataset = Dataset::new(
        vec![Driver::new("DR-1"), Driver::new("DR-2"), Driver::new("DR-3")],
        vec![Job::new("J1", "z1", "z2")],
    );

    let solution = Solver::new(3, None).solve(&dataset).unwrap();
    assert_eq!(solution.assignment.routes.len(), 3);
    assert_eq!(solution.assignment.active_drivers(), 1);
    assert!(solution.assignment.routes[1].is_empty());
}

#[test]
fn test_larger_instance_finishes_within_budget() {
    // Three interleaved lines sharing zone names force plenty of choices
    let mut jobs = Vec::new();
    for line in 0..3 {
        for step in 0..9 {
            jobs.push(Job::new(
                format!("{}{step}", ['A', 'B', 'C'][line]),
                format!("z{}", step + line),
                format!("z{}", step + line + 1),
            ));
        }
    }
    let dataset = Dataset::new(TestFixtures::drivers(9), jobs);

    let solution = Solver::new(3, Some(std::time::Duration::from_secs(10)))
        .solve(&dataset)
        .unwrap();
    TestHelpers::assert_feasible(&dataset, &solution.assignment, 3);
}
