//! Reversed prerequisite graph construction.
//!
//! # Edge Direction
//!
//! Input edges read `prerequisite → course`. The graph stores them the other
//! way round: an edge `course → prerequisite` for every input pair. A
//! course's outgoing links therefore point at its direct prerequisites, and
//! a course's incoming links come from everything that depends on it. Rank
//! accumulates along incoming links, so courses many others build on end up
//! at the top.
//!
//! ## Unknown Endpoints
//!
//! An edge whose `from` or `to` is not a known course id is dropped without
//! error. Every edge in a [`CourseGraph`] connects two known courses.
//!
//! ## Duplicate Edges
//!
//! Repeating the same `(from, to)` pair adds one link, not two.
//!
//! ## Duplicate Course Ids
//!
//! Every input course gets its own node, but id lookup resolves to the last
//! course carrying that id, so edges attach there.

#![allow(clippy::module_name_repetitions)]

use std::collections::HashMap;

use keystone_core::model::{Course, Prerequisite};
use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use tracing::{debug, instrument, trace};

// ---------------------------------------------------------------------------
// CourseGraph
// ---------------------------------------------------------------------------

/// A reversed prerequisite graph over a fixed course list.
///
/// Node `i` corresponds to `courses[i]` of the input, so node order is input
/// order. An edge `A → B` means "A requires B".
#[derive(Debug, Clone)]
pub struct CourseGraph {
    /// Directed graph: nodes = course ids, edges = reversed prerequisite links.
    pub graph: DiGraph<String, ()>,
    /// Mapping from course id to node index.
    pub node_map: HashMap<String, NodeIndex>,
}

impl CourseGraph {
    /// Build the reversed graph for `courses`, keeping only edges between
    /// known courses.
    #[must_use]
    #[instrument(skip_all, fields(courses = courses.len(), edges = prerequisites.len()))]
    pub fn build(courses: &[Course], prerequisites: &[Prerequisite]) -> Self {
        let mut graph = DiGraph::<String, ()>::with_capacity(courses.len(), prerequisites.len());
        let mut node_map: HashMap<String, NodeIndex> = HashMap::with_capacity(courses.len());

        for course in courses {
            let idx = graph.add_node(course.id.clone());
            node_map.insert(course.id.clone(), idx);
        }

        for edge in prerequisites {
            let (Some(&prereq), Some(&course)) =
                (node_map.get(&edge.from), node_map.get(&edge.to))
            else {
                trace!(from = %edge.from, to = %edge.to, "dropping edge with unknown endpoint");
                continue;
            };

            if !graph.contains_edge(course, prereq) {
                graph.add_edge(course, prereq, ());
            }
        }

        debug!(
            nodes = graph.node_count(),
            links = graph.edge_count(),
            "reversed course graph built"
        );

        Self { graph, node_map }
    }

    /// Number of courses (nodes).
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of distinct prerequisite links that survived filtering.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Look up the node for a course id.
    #[must_use]
    pub fn node_index(&self, course_id: &str) -> Option<NodeIndex> {
        self.node_map.get(course_id).copied()
    }

    /// Return the course id stored on a node.
    #[must_use]
    pub fn course_id(&self, idx: NodeIndex) -> Option<&str> {
        self.graph.node_weight(idx).map(String::as_str)
    }

    /// Number of direct prerequisites (outgoing reversed links).
    #[must_use]
    pub fn out_degree(&self, idx: NodeIndex) -> usize {
        self.graph.edges_directed(idx, Direction::Outgoing).count()
    }

    /// Number of direct dependents (incoming reversed links).
    #[must_use]
    pub fn in_degree(&self, idx: NodeIndex) -> usize {
        self.graph.edges_directed(idx, Direction::Incoming).count()
    }

    /// Direct prerequisites of `idx`, in the order their edges were added.
    #[must_use]
    pub fn prerequisites_of(&self, idx: NodeIndex) -> Vec<NodeIndex> {
        self.ordered_neighbors(idx, Direction::Outgoing)
    }

    /// Direct dependents of `idx`, in the order their edges were added.
    #[must_use]
    pub fn dependents_of(&self, idx: NodeIndex) -> Vec<NodeIndex> {
        self.ordered_neighbors(idx, Direction::Incoming)
    }

    /// Course ids of [`Self::prerequisites_of`].
    #[must_use]
    pub fn prerequisite_ids(&self, idx: NodeIndex) -> Vec<String> {
        self.ids(&self.prerequisites_of(idx))
    }

    /// Course ids of [`Self::dependents_of`].
    #[must_use]
    pub fn dependent_ids(&self, idx: NodeIndex) -> Vec<String> {
        self.ids(&self.dependents_of(idx))
    }

    // petgraph walks adjacency newest-first; sort by edge index to recover
    // insertion order.
    fn ordered_neighbors(&self, idx: NodeIndex, dir: Direction) -> Vec<NodeIndex> {
        let mut edges: Vec<_> = self
            .graph
            .edges_directed(idx, dir)
            .map(|e| {
                let other = match dir {
                    Direction::Outgoing => e.target(),
                    Direction::Incoming => e.source(),
                };
                (e.id(), other)
            })
            .collect();
        edges.sort_unstable_by_key(|(edge, _)| *edge);
        edges.into_iter().map(|(_, node)| node).collect()
    }

    fn ids(&self, nodes: &[NodeIndex]) -> Vec<String> {
        nodes
            .iter()
            .filter_map(|&n| self.course_id(n))
            .map(str::to_string)
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
