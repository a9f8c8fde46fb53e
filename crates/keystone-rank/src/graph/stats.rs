//! Summary statistics for a course graph.
//!
//! # Statistics Provided
//!
//! - **course_count**: Number of courses (nodes).
//! - **link_count**: Distinct prerequisite links between known courses.
//! - **density**: `link_count / (course_count * (course_count - 1))`. Zero
//!   for graphs with fewer than two courses.
//! - **foundational_count**: Courses with no prerequisites of their own.
//! - **capstone_count**: Courses nothing else depends on.
//! - **isolated_count**: Courses with neither prerequisites nor dependents.
//! - **component_count**: Weakly connected components. More than one means
//!   the curriculum splits into unrelated tracks.
//! - **max_dependents** / **max_prerequisites**: Largest in/out degree in
//!   the reversed graph.

use keystone_core::model::{Course, Prerequisite};
use petgraph::algo::connected_components;
use serde::Serialize;

use crate::graph::build::CourseGraph;

/// Summary statistics for a [`CourseGraph`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphStats {
    pub course_count: usize,
    pub link_count: usize,
    pub density: f64,
    pub foundational_count: usize,
    pub capstone_count: usize,
    pub isolated_count: usize,
    pub component_count: usize,
    pub max_dependents: usize,
    pub max_prerequisites: usize,
}

impl GraphStats {
    /// Build the graph for `courses` and summarise it.
    #[must_use]
    pub fn compute(courses: &[Course], prerequisites: &[Prerequisite]) -> Self {
        Self::from_graph(&CourseGraph::build(courses, prerequisites))
    }

    /// Compute statistics from a built graph.
    #[must_use]
    pub fn from_graph(cg: &CourseGraph) -> Self {
        let course_count = cg.node_count();
        let link_count = cg.edge_count();

        let degrees: Vec<(usize, usize)> = cg
            .graph
            .node_indices()
            .map(|idx| (cg.in_degree(idx), cg.out_degree(idx)))
            .collect();

        let foundational_count = degrees.iter().filter(|(_, out)| *out == 0).count();
        let capstone_count = degrees.iter().filter(|(inc, _)| *inc == 0).count();
        let isolated_count = degrees
            .iter()
            .filter(|(inc, out)| *inc == 0 && *out == 0)
            .count();
        let max_dependents = degrees.iter().map(|(inc, _)| *inc).max().unwrap_or(0);
        let max_prerequisites = degrees.iter().map(|(_, out)| *out).max().unwrap_or(0);

        Self {
            course_count,
            link_count,
            density: compute_density(course_count, link_count),
            foundational_count,
            capstone_count,
            isolated_count,
            component_count: connected_components(&cg.graph),
            max_dependents,
            max_prerequisites,
        }
    }
}

#[allow(clippy::cast_precision_loss)]
fn compute_density(nodes: usize, edges: usize) -> f64 {
    if nodes < 2 {
        return 0.0;
    }
    edges as f64 / (nodes as f64 * (nodes - 1) as f64)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
