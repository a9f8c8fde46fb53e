//! The ranking engine: scores, rank assignment, and joined views.
//!
//! [`RankingEngine`] holds only its [`RankConfig`]. Every call rebuilds the
//! graph from the inputs, so calls are independent and repeatable: the same
//! inputs always produce bit-identical output.
//!
//! # Ordering
//!
//! Results are sorted by score descending with a stable sort. Courses with
//! exactly equal scores keep their input order.

use std::collections::HashMap;

use petgraph::graph::NodeIndex;
use serde::Serialize;
use tracing::{debug, instrument};

use keystone_core::config::{RankConfig, RankOverrides};
use keystone_core::model::{Course, EnrichedCourse, EnrichedNode, Prerequisite, RankResult};

use crate::graph::build::CourseGraph;
use crate::metrics::pagerank::{PageRankResult, pagerank};

/// Ranking plus convergence metadata.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankingOutcome {
    /// One entry per course, score descending.
    pub results: Vec<RankResult>,
    /// Power iterations performed.
    pub iterations: usize,
    /// `false` when the iteration cap was reached first.
    pub converged: bool,
}

/// Ranks courses by how foundational they are.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RankingEngine {
    config: RankConfig,
}

impl RankingEngine {
    #[must_use]
    pub const fn new(config: RankConfig) -> Self {
        Self { config }
    }

    /// Build an engine from partial parameters (zero means "use default").
    #[must_use]
    pub fn with_overrides(overrides: RankOverrides) -> Self {
        Self::new(RankConfig::from_overrides(overrides))
    }

    #[must_use]
    pub const fn config(&self) -> &RankConfig {
        &self.config
    }

    /// Rank every course, most foundational first.
    ///
    /// Edges with an unknown endpoint are ignored. An empty course list
    /// yields an empty ranking.
    #[must_use]
    pub fn compute_ranking(
        &self,
        courses: &[Course],
        prerequisites: &[Prerequisite],
    ) -> Vec<RankResult> {
        self.compute_ranking_detailed(courses, prerequisites).results
    }

    /// Like [`Self::compute_ranking`], also reporting iteration count and
    /// whether the scores converged.
    #[must_use]
    #[instrument(skip_all, fields(courses = courses.len()))]
    pub fn compute_ranking_detailed(
        &self,
        courses: &[Course],
        prerequisites: &[Prerequisite],
    ) -> RankingOutcome {
        let cg = CourseGraph::build(courses, prerequisites);
        let pr = pagerank(&cg, &self.config);
        let results = assign_ranks(&cg, &pr);

        debug!(
            ranked = results.len(),
            iterations = pr.iterations,
            converged = pr.converged,
            "ranking computed"
        );

        RankingOutcome {
            results,
            iterations: pr.iterations,
            converged: pr.converged,
        }
    }

    /// The `top_n` highest-ranked courses joined with their attributes.
    ///
    /// Returns `min(top_n, courses.len())` entries. Degree counts and
    /// adjacency lists are left empty in this view; use
    /// [`Self::enriched_nodes`] for those.
    #[must_use]
    pub fn top_foundational(
        &self,
        courses: &[Course],
        prerequisites: &[Prerequisite],
        top_n: usize,
    ) -> Vec<EnrichedCourse> {
        let lookup: HashMap<&str, &Course> = courses.iter().map(|c| (c.id.as_str(), c)).collect();

        self.compute_ranking(courses, prerequisites)
            .into_iter()
            .take(top_n)
            .filter_map(|r| {
                lookup
                    .get(r.id.as_str())
                    .map(|course| EnrichedCourse::from_ranked((*course).clone(), r.rank, r.score))
            })
            .collect()
    }

    /// Every course with its score, degrees and ordered neighbour ids, in
    /// input order.
    #[must_use]
    #[instrument(skip_all, fields(courses = courses.len()))]
    pub fn enriched_nodes(
        &self,
        courses: &[Course],
        prerequisites: &[Prerequisite],
    ) -> Vec<EnrichedNode> {
        let cg = CourseGraph::build(courses, prerequisites);
        let pr = pagerank(&cg, &self.config);

        courses
            .iter()
            .zip(pr.scores)
            .enumerate()
            .map(|(i, (course, score))| {
                let idx = NodeIndex::new(i);
                EnrichedNode {
                    course: course.clone(),
                    score,
                    in_degree_reversed: cg.in_degree(idx),
                    out_degree_reversed: cg.out_degree(idx),
                    prerequisite_ids: cg.prerequisite_ids(idx),
                    dependent_ids: cg.dependent_ids(idx),
                }
            })
            .collect()
    }
}

/// Sort nodes by score (stable, descending) and number them from 1.
fn assign_ranks(cg: &CourseGraph, pr: &PageRankResult) -> Vec<RankResult> {
    let mut order: Vec<usize> = (0..pr.scores.len()).collect();
    order.sort_by(|&a, &b| pr.scores[b].total_cmp(&pr.scores[a]));

    order
        .into_iter()
        .enumerate()
        .map(|(pos, idx)| RankResult {
            id: cg
                .course_id(NodeIndex::new(idx))
                .unwrap_or_default()
                .to_string(),
            rank: pos + 1,
            score: pr.scores[idx],
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
