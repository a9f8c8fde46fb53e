//! Reversed-link PageRank over a [`CourseGraph`].
//!
//! # Overview
//!
//! A course is important when many courses build on it, directly or
//! through other important courses. Because [`CourseGraph`] stores edges as
//! `course → prerequisite`, the incoming links of a node are its dependents
//! and plain PageRank over the reversed graph rewards foundational courses.
//!
//! # Algorithm
//!
//! ```text
//! PR(v) = (1 - d) / N + d * Σ PR(u) / out_degree(u)   for each u → v
//! ```
//!
//! where `d` is the damping factor and `out_degree(u)` counts `u`'s direct
//! prerequisites. Every node reads the previous iteration's scores (two
//! buffers, swapped after each pass). Iteration stops after the first pass
//! whose largest per-node change is below the tolerance, or at the
//! iteration cap.
//!
//! # Dangling Nodes
//!
//! A node with no prerequisites passes nothing on, and its mass is *not*
//! spread back over the graph. Scores therefore need not sum to 1; they
//! stay within `((1 - d), N)` in total.

use petgraph::graph::NodeIndex;
use tracing::{debug, instrument, warn};

use keystone_core::config::RankConfig;

use crate::graph::build::CourseGraph;

/// Result of a PageRank computation.
#[derive(Debug, Clone, PartialEq)]
pub struct PageRankResult {
    /// Scores indexed by node index (input order).
    pub scores: Vec<f64>,
    /// Number of iterations performed.
    pub iterations: usize,
    /// Whether the largest change fell below the tolerance.
    pub converged: bool,
}

/// Compute scores for every node of `cg`.
///
/// An empty graph returns an empty result flagged as converged.
#[must_use]
#[instrument(skip(cg, config), fields(nodes = cg.node_count()))]
pub fn pagerank(cg: &CourseGraph, config: &RankConfig) -> PageRankResult {
    let n = cg.node_count();

    if n == 0 {
        return PageRankResult {
            scores: Vec::new(),
            iterations: 0,
            converged: true,
        };
    }

    // Flatten adjacency once; the loop below only touches plain vectors.
    let out_degree: Vec<usize> = (0..n).map(|i| cg.out_degree(NodeIndex::new(i))).collect();
    let dependents: Vec<Vec<usize>> = (0..n)
        .map(|i| {
            cg.dependents_of(NodeIndex::new(i))
                .into_iter()
                .map(NodeIndex::index)
                .collect()
        })
        .collect();

    #[allow(clippy::cast_precision_loss)]
    let n_f64 = n as f64;
    let base = (1.0 - config.damping) / n_f64;

    let mut ranks = vec![1.0 / n_f64; n];
    let mut new_ranks = vec![0.0_f64; n];

    let mut iterations = 0;
    let mut converged = false;

    for _ in 0..config.max_iterations {
        iterations += 1;

        for (v, incoming) in dependents.iter().enumerate() {
            let inflow: f64 = incoming
                .iter()
                .filter(|&&u| out_degree[u] > 0)
                .map(|&u| {
                    #[allow(clippy::cast_precision_loss)]
                    let degree = out_degree[u] as f64;
                    ranks[u] / degree
                })
                .sum();
            new_ranks[v] = config.damping.mul_add(inflow, base);
        }

        let max_delta = ranks
            .iter()
            .zip(new_ranks.iter())
            .map(|(old, new)| (new - old).abs())
            .fold(0.0_f64, f64::max);

        std::mem::swap(&mut ranks, &mut new_ranks);

        if max_delta < config.tolerance {
            converged = true;
            break;
        }
    }

    if converged {
        debug!(iterations, "pagerank converged");
    } else {
        warn!(
            iterations,
            tolerance = config.tolerance,
            "pagerank hit iteration cap without converging"
        );
    }

    PageRankResult {
        scores: ranks,
        iterations,
        converged,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use keystone_core::model::{Course, Prerequisite};

    fn graph(ids: &[&str], pairs: &[(&str, &str)]) -> CourseGraph {
        let courses: Vec<Course> = ids.iter().map(|id| Course::bare(*id)).collect();
        let edges: Vec<Prerequisite> = pairs
            .iter()
            .map(|(a, b)| Prerequisite::new(*a, *b))
            .collect();
        CourseGraph::build(&courses, &edges)
    }

    #[test]
    fn empty_graph_returns_empty() {
        let result = pagerank(&graph(&[], &[]), &RankConfig::default());
        assert!(result.scores.is_empty());
        assert_eq!(result.iterations, 0);
        assert!(result.converged);
    }

    #[test]
    fn single_node_without_links() {
        let result = pagerank(&graph(&["A"], &[]), &RankConfig::default());
        assert_eq!(result.scores.len(), 1);
        assert!((result.scores[0] - 0.15).abs() < 1e-12);
        assert!(result.converged);
    }

    #[test]
    fn no_links_converges_on_second_pass() {
        let result = pagerank(&graph(&["A", "B", "C", "D"], &[]), &RankConfig::default());
        let expected = 0.15 / 4.0;
        for score in &result.scores {
            assert!((score - expected).abs() < 1e-12);
        }
        // Pass 1 moves from 1/N to (1-d)/N; pass 2 changes nothing.
        assert_eq!(result.iterations, 2);
    }

    #[test]
    fn two_node_fixed_point() {
        // B requires A: A gets all of B's mass.
        let result = pagerank(&graph(&["A", "B"], &[("A", "B")]), &RankConfig::default());
        let b = 0.15 / 2.0;
        let a = 0.85f64.mul_add(b, b);
        assert!((result.scores[1] - b).abs() < 1e-9);
        assert!((result.scores[0] - a).abs() < 1e-6);
        assert!(result.converged);
    }

    #[test]
    fn iteration_cap_is_respected() {
        let config = RankConfig {
            max_iterations: 1,
            tolerance: 1e-15,
            ..RankConfig::default()
        };
        let result = pagerank(&graph(&["A", "B"], &[("A", "B")]), &config);
        assert_eq!(result.iterations, 1);
        assert!(!result.converged);
    }

    #[test]
    fn scores_split_across_prerequisites() {
        // C requires both A and B, so each gets half of C's mass.
        let result = pagerank(
            &graph(&["A", "B", "C"], &[("A", "C"), ("B", "C")]),
            &RankConfig::default(),
        );
        assert!((result.scores[0] - result.scores[1]).abs() < 1e-12);
        assert!(result.scores[0] > result.scores[2]);
    }

    #[test]
    fn cycle_is_tolerated() {
        let result = pagerank(
            &graph(&["A", "B"], &[("A", "B"), ("B", "A")]),
            &RankConfig::default(),
        );
        assert!(result.converged);
        assert!((result.scores[0] - result.scores[1]).abs() < 1e-12);
        assert!(result.scores.iter().all(|s| s.is_finite() && *s >= 0.0));
    }
}
