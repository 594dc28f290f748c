//! Job compatibility graph
//!
//! Edge `a -> b` exists when job `a` drops off in the zone where job `b`
//! picks up. Jobs are addressed by their index in the dataset; neighbour
//! lists are kept in job-id order so every traversal is deterministic.

use std::collections::HashMap;

use shared::Job;

#[derive(Debug, Clone)]
pub struct CompatibilityGraph {
    /// Job indices sorted by job id
    order: Vec<usize>,
    /// Position of each job in `order`
    rank: Vec<usize>,
    successors: Vec<Vec<usize>>,
    predecessors: Vec<Vec<usize>>,
}

impl CompatibilityGraph {
    pub fn new(jobs: &[Job]) -> Self {
        let mut order: Vec<usize> = (0..jobs.len()).collect();
        order.sort_by(|&a, &b| jobs[a].id.cmp(&jobs[b].id));

        let mut rank = vec![0; jobs.len()];
        for (position, &index) in order.iter().enumerate() {
            rank[index] = position;
        }

        let mut by_pickup: HashMap<&str, Vec<usize>> = HashMap::new();
        let mut by_dropoff: HashMap<&str, Vec<usize>> = HashMap::new();
        for &index in &order {
            by_pickup.entry(jobs[index].pickup_zone.as_str()).or_default().push(index);
            by_dropoff.entry(jobs[index].dropoff_zone.as_str()).or_default().push(index);
        }

        let neighbours = |index: usize, zone: &str, table: &HashMap<&str, Vec<usize>>| -> Vec<usize> {
            table
                .get(zone)
                .map(|candidates| candidates.iter().copied().filter(|&other| other != index).collect())
                .unwrap_or_default()
        };

        let successors = jobs
            .iter()
            .enumerate()
            .map(|(index, job)| neighbours(index, &job.dropoff_zone, &by_pickup))
            .collect();
        let predecessors = jobs
            .iter()
            .enumerate()
            .map(|(index, job)| neighbours(index, &job.pickup_zone, &by_dropoff))
            .collect();

        Self {
            order,
            rank,
            successors,
            predecessors,
        }
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Job indices in id order
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    /// Jobs that can follow `index`, in id order
    pub fn successors(&self, index: usize) -> &[usize] {
        &self.successors[index]
    }

    /// Jobs that can precede `index`, in id order
    pub fn predecessors(&self, index: usize) -> &[usize] {
        &self.predecessors[index]
    }

    pub fn edge_count(&self) -> usize {
        self.successors.iter().map(Vec::len).sum()
    }

    /// Compare two chains by the ids of their jobs
    pub fn compare_chains(&self, a: &[usize], b: &[usize]) -> std::cmp::Ordering {
        a.iter().map(|&i| self.rank[i]).cmp(b.iter().map(|&i| self.rank[i]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edges_follow_zones() {
        let jobs = vec![
            Job::new("J2", "z6", "z9"),
            Job::new("J1", "z1", "z6"),
            Job::new("J3", "z2", "z4"),
        ];
        let graph = CompatibilityGraph::new(&jobs);

        assert_eq!(graph.order(), &[1, 0, 2]);
        assert_eq!(graph.successors(1), &[0]);
        assert_eq!(graph.predecessors(0), &[1]);
        assert!(graph.successors(2).is_empty());
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn test_self_loop_job_does_not_follow_itself() {
        let jobs = vec![Job::new("A", "z1", "z1"), Job::new("B", "z1", "z2")];
        let graph = CompatibilityGraph::new(&jobs);

        assert_eq!(graph.successors(0), &[1]);
        assert!(graph.predecessors(0).is_empty());
    }

    #[test]
    fn test_neighbours_sorted_by_id() {
        let jobs = vec![
            Job::new("A", "z0", "z1"),
            Job::new("C", "z1", "z2"),
            Job::new("B", "z1", "z3"),
        ];
        let graph = CompatibilityGraph::new(&jobs);

        assert_eq!(graph.successors(0), &[2, 1]);
    }
}
