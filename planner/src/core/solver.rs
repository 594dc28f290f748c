//! Assignment solver
//!
//! Routes are chains in the job compatibility graph, so an assignment is a
//! cover of every job by at most one chain per driver, each chain holding at
//! most `capacity` jobs. The solver first tries a greedy packing of longest
//! chains. When that leaves jobs behind it runs an exhaustive backtracking
//! search over chain decompositions. One wall-clock budget covers both steps.
//!
//! All choices are made in job-id order, so equal input yields equal output.

use std::collections::HashMap;
use std::fmt;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use shared::{process_debug, process_info, Assignment, Dataset, ProcessId, Route};

use super::graph::CompatibilityGraph;
use super::verify::verify_assignment;
use crate::error::{PlannerError, PlannerResult};

/// Which step produced the assignment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Nothing to assign
    Trivial,
    Greedy,
    Search,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Trivial => write!(f, "trivial"),
            Strategy::Greedy => write!(f, "greedy"),
            Strategy::Search => write!(f, "search"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolveStats {
    pub strategy: Strategy,
    /// Non-empty routes in the result
    pub chains: usize,
    /// Search nodes visited, 0 when greedy succeeded
    pub explored: u64,
    pub elapsed: Duration,
}

#[derive(Debug, Clone)]
pub struct Solution {
    pub assignment: Assignment,
    pub stats: SolveStats,
}

/// Solver settings
#[derive(Debug, Clone, Copy)]
pub struct Solver {
    capacity: usize,
    budget: Option<Duration>,
}

impl Solver {
    pub fn new(capacity: usize, budget: Option<Duration>) -> Self {
        Self {
            capacity: capacity.max(1),
            budget,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Assign every job in `dataset` to a driver
    pub fn solve(&self, dataset: &Dataset) -> PlannerResult<Solution> {
        let started = Instant::now();
        let drivers = dataset.drivers.len();
        let jobs = dataset.jobs.len();

        if jobs == 0 {
            let assignment = build_assignment(dataset, &[]);
            return Ok(Solution {
                assignment,
                stats: SolveStats {
                    strategy: Strategy::Trivial,
                    chains: 0,
                    explored: 0,
                    elapsed: started.elapsed(),
                },
            });
        }

        let slots = drivers.saturating_mul(self.capacity);
        if jobs > slots {
            let unassigned: Vec<String> = dataset.jobs[slots..].iter().map(|job| job.id.clone()).collect();
            process_info!(
                ProcessId::current(),
                "{} job(s) exceed the {} slot(s) of {} driver(s)",
                jobs,
                slots,
                drivers
            );
            return Err(PlannerError::InfeasibleAssignment { unassigned });
        }

        let graph = CompatibilityGraph::new(&dataset.jobs);
        process_debug!(
            ProcessId::current(),
            "Compatibility graph: {} job(s), {} edge(s)",
            graph.len(),
            graph.edge_count()
        );

        let deadline = Deadline::start(self.budget);
        let (chains, strategy, explored) = match greedy(&graph, drivers, self.capacity, deadline)? {
            Packing::Complete(chains) => (chains, Strategy::Greedy, 0),
            Packing::Partial { leftover } => {
                process_debug!(
                    ProcessId::current(),
                    "Greedy packing left {} job(s), starting search",
                    leftover.len()
                );
                let mut search = Search::new(&graph, self.capacity, deadline);
                match search.run(drivers)? {
                    Some(chains) => (chains, Strategy::Search, search.explored),
                    None => {
                        process_info!(
                            ProcessId::current(),
                            "No decomposition exists after {} search node(s)",
                            search.explored
                        );
                        let unassigned = leftover.into_iter().map(|index| dataset.jobs[index].id.clone()).collect();
                        return Err(PlannerError::InfeasibleAssignment { unassigned });
                    }
                }
            }
        };

        let assignment = build_assignment(dataset, &chains);
        let report = verify_assignment(dataset, &assignment, self.capacity);
        if let Some(violation) = report.violations.first() {
            return Err(PlannerError::InternalInvariant {
                message: violation.to_string(),
            });
        }

        let stats = SolveStats {
            strategy,
            chains: chains.len(),
            explored,
            elapsed: started.elapsed(),
        };
        process_info!(
            ProcessId::current(),
            "Assigned {} job(s) to {} of {} driver(s) using {} strategy in {:?}",
            jobs,
            stats.chains,
            drivers,
            stats.strategy,
            stats.elapsed
        );

        Ok(Solution { assignment, stats })
    }
}

/// Chain `i` goes to driver `i`; remaining drivers stay idle
fn build_assignment(dataset: &Dataset, chains: &[Vec<usize>]) -> Assignment {
    let routes = dataset
        .drivers
        .iter()
        .enumerate()
        .map(|(position, driver)| match chains.get(position) {
            Some(chain) => Route::new(
                driver.id.clone(),
                chain.iter().map(|&index| dataset.jobs[index].clone()).collect(),
            ),
            None => Route::empty(driver.id.clone()),
        })
        .collect();

    Assignment::new(routes)
}

/// Wall-clock limit shared by the greedy pass and the search
#[derive(Debug, Clone, Copy)]
struct Deadline {
    budget: Option<Duration>,
    at: Option<Instant>,
}

impl Deadline {
    /// A budget too large to represent as an instant is unlimited
    fn start(budget: Option<Duration>) -> Self {
        Self {
            budget,
            at: budget.and_then(|budget| Instant::now().checked_add(budget)),
        }
    }

    fn check(&self, explored: u64) -> PlannerResult<()> {
        match (self.budget, self.at) {
            (Some(budget), Some(at)) if Instant::now() >= at => Err(PlannerError::SearchTimeout { budget, explored }),
            _ => Ok(()),
        }
    }
}

/// Outcome of the greedy pass
enum Packing {
    Complete(Vec<Vec<usize>>),
    Partial { leftover: Vec<usize> },
}

/// Longest-chain-first packing
fn greedy(graph: &CompatibilityGraph, drivers: usize, capacity: usize, deadline: Deadline) -> PlannerResult<Packing> {
    let mut covered = vec![false; graph.len()];
    let mut remaining = graph.len();
    let mut chains = Vec::new();

    while remaining > 0 && chains.len() < drivers {
        let Some(chain) = longest_chain(graph, &covered, capacity, deadline)? else {
            break;
        };
        for &index in &chain {
            covered[index] = true;
        }
        remaining -= chain.len();
        chains.push(chain);
    }

    if remaining == 0 {
        Ok(Packing::Complete(chains))
    } else {
        Ok(Packing::Partial {
            leftover: (0..graph.len()).filter(|&index| !covered[index]).collect(),
        })
    }
}

/// Longest chain among uncovered jobs, lexicographically smallest by id on ties
fn longest_chain(
    graph: &CompatibilityGraph,
    covered: &[bool],
    capacity: usize,
    deadline: Deadline,
) -> PlannerResult<Option<Vec<usize>>> {
    // Depth-first in id order visits paths lexicographically, so the first
    // path found at a given length is the smallest one of that length.
    fn extend(
        graph: &CompatibilityGraph,
        covered: &[bool],
        capacity: usize,
        deadline: Deadline,
        path: &mut Vec<usize>,
        best: &mut Vec<usize>,
    ) -> PlannerResult<()> {
        deadline.check(0)?;
        if path.len() > best.len() {
            best.clone_from(path);
        }
        if path.len() == capacity || best.len() == capacity {
            return Ok(());
        }
        let Some(&last) = path.last() else { return Ok(()) };
        for &next in graph.successors(last) {
            if covered[next] || path.contains(&next) {
                continue;
            }
            path.push(next);
            extend(graph, covered, capacity, deadline, path, best)?;
            path.pop();
        }
        Ok(())
    }

    let mut best = Vec::new();
    let mut path = Vec::with_capacity(capacity.min(graph.len()));
    for &start in graph.order() {
        if covered[start] {
            continue;
        }
        path.push(start);
        extend(graph, covered, capacity, deadline, &mut path, &mut best)?;
        path.pop();
        if best.len() == capacity {
            break;
        }
    }

    Ok((!best.is_empty()).then_some(best))
}

/// Exhaustive search over chain decompositions
struct Search<'g> {
    graph: &'g CompatibilityGraph,
    capacity: usize,
    deadline: Deadline,
    covered: Vec<bool>,
    uncovered: usize,
    chains: Vec<Vec<usize>>,
    /// Uncovered-set bitmap to the most drivers it is known to fail with
    failed: HashMap<Vec<u64>, usize>,
    explored: u64,
}

impl<'g> Search<'g> {
    fn new(graph: &'g CompatibilityGraph, capacity: usize, deadline: Deadline) -> Self {
        Self {
            graph,
            capacity,
            deadline,
            covered: vec![false; graph.len()],
            uncovered: graph.len(),
            chains: Vec::new(),
            failed: HashMap::new(),
            explored: 0,
        }
    }

    /// `Ok(None)` when no decomposition exists
    fn run(&mut self, drivers: usize) -> PlannerResult<Option<Vec<Vec<usize>>>> {
        if self.descend(drivers)? {
            Ok(Some(std::mem::take(&mut self.chains)))
        } else {
            Ok(None)
        }
    }

    fn descend(&mut self, drivers_left: usize) -> PlannerResult<bool> {
        self.explored += 1;
        self.deadline.check(self.explored)?;

        if self.uncovered == 0 {
            return Ok(true);
        }
        if drivers_left == 0 || self.lower_bound() > drivers_left {
            return Ok(false);
        }

        let key = self.state_key();
        if self.failed.get(&key).is_some_and(|&failed_with| drivers_left <= failed_with) {
            return Ok(false);
        }

        let Some(pivot) = self.graph.order().iter().copied().find(|&index| !self.covered[index]) else {
            return Ok(true);
        };

        for chain in self.chains_through(pivot)? {
            self.cover(&chain, true);
            self.chains.push(chain);
            if self.descend(drivers_left - 1)? {
                return Ok(true);
            }
            if let Some(chain) = self.chains.pop() {
                self.cover(&chain, false);
            }
        }

        let entry = self.failed.entry(key).or_insert(0);
        *entry = (*entry).max(drivers_left);
        Ok(false)
    }

    fn cover(&mut self, chain: &[usize], covered: bool) {
        for &index in chain {
            self.covered[index] = covered;
        }
        if covered {
            self.uncovered -= chain.len();
        } else {
            self.uncovered += chain.len();
        }
    }

    /// Fewest chains that can still cover the uncovered jobs
    fn lower_bound(&self) -> usize {
        let mut starts = 0;
        let mut ends = 0;
        for index in 0..self.graph.len() {
            if self.covered[index] {
                continue;
            }
            if self.graph.predecessors(index).iter().all(|&other| self.covered[other]) {
                starts += 1;
            }
            if self.graph.successors(index).iter().all(|&other| self.covered[other]) {
                ends += 1;
            }
        }

        self.uncovered.div_ceil(self.capacity).max(starts).max(ends)
    }

    fn state_key(&self) -> Vec<u64> {
        let mut key = vec![0u64; self.covered.len().div_ceil(64)];
        for (index, &covered) in self.covered.iter().enumerate() {
            if !covered {
                key[index / 64] |= 1 << (index % 64);
            }
        }
        key
    }

    /// Every uncovered chain containing `pivot`, longest first, then by id
    fn chains_through(&self, pivot: usize) -> PlannerResult<Vec<Vec<usize>>> {
        let mut heads = Vec::new();
        let mut path = vec![pivot];
        self.walk(&mut path, self.capacity, false, &mut heads)?;

        let mut chains = Vec::new();
        for head in heads {
            // `head` runs backwards from the pivot
            let mut path: Vec<usize> = head.into_iter().rev().collect();
            self.walk(&mut path, self.capacity, true, &mut chains)?;
        }

        chains.sort_by(|a, b| {
            b.len()
                .cmp(&a.len())
                .then_with(|| self.graph.compare_chains(a, b))
        });
        Ok(chains)
    }

    /// Collect every extension of `path` up to `limit` jobs, in one direction
    fn walk(&self, path: &mut Vec<usize>, limit: usize, forward: bool, out: &mut Vec<Vec<usize>>) -> PlannerResult<()> {
        self.deadline.check(self.explored)?;
        out.push(path.clone());
        if path.len() == limit {
            return Ok(());
        }
        let Some(&frontier) = path.last() else { return Ok(()) };
        let neighbours = if forward {
            self.graph.successors(frontier)
        } else {
            self.graph.predecessors(frontier)
        };
        for &next in neighbours {
            if self.covered[next] || path.contains(&next) {
                continue;
            }
            path.push(next);
            self.walk(path, limit, forward, out)?;
            path.pop();
        }
        Ok(())
    }
}
