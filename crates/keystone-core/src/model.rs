//! Course graph data model.
//!
//! # Overview
//!
//! Two kinds of input flow into the ranking engine:
//!
//! - [`Course`]: a node, identified by `id`. Uniqueness of ids is the
//!   caller's responsibility; the engine does not deduplicate.
//! - [`Prerequisite`]: a directed edge `from → to` meaning "`from` must be
//!   taken before `to`".
//!
//! Everything else in this module is derived output, rebuilt on every
//! ranking pass and never mutated afterwards:
//!
//! - [`RankResult`]: `(id, rank, score)`, ordered by score descending.
//! - [`EnrichedNode`]: course fields plus score, reversed-graph degrees and
//!   the ordered prerequisite/dependent id lists.
//! - [`EnrichedCourse`]: the presentation view returned by the top-N query.

use serde::{Deserialize, Serialize};

/// Weight assigned to courses that do not specify one.
pub const DEFAULT_WEIGHT: i64 = 1;

const fn default_weight() -> i64 {
    DEFAULT_WEIGHT
}

// ---------------------------------------------------------------------------
// Inputs
// ---------------------------------------------------------------------------

/// A course in the prerequisite graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    /// Unique key.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Free-form description.
    #[serde(default)]
    pub description: String,
    /// Free-form integer weight (credits, hours, ...). Not used for scoring.
    #[serde(default = "default_weight")]
    pub weight: i64,
}

impl Course {
    /// Create a course with an empty description and the default weight.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            weight: DEFAULT_WEIGHT,
        }
    }

    /// Create a course whose display name is its id.
    #[must_use]
    pub fn bare(id: impl Into<String>) -> Self {
        let id = id.into();
        Self::new(id.clone(), id)
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub const fn with_weight(mut self, weight: i64) -> Self {
        self.weight = weight;
        self
    }
}

/// A prerequisite relationship: `from` must precede `to`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Prerequisite {
    /// The prerequisite course id.
    pub from: String,
    /// The dependent course id.
    pub to: String,
}

impl Prerequisite {
    #[must_use]
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Derived output
// ---------------------------------------------------------------------------

/// One entry of a ranking: 1-based position and final score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankResult {
    pub id: String,
    /// 1-based position in the score-descending order.
    pub rank: usize,
    pub score: f64,
}

/// A course joined with everything the ranking pass learned about it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnrichedNode {
    #[serde(flatten)]
    pub course: Course,
    pub score: f64,
    /// Number of courses that list this course as a prerequisite.
    pub in_degree_reversed: usize,
    /// Number of direct prerequisites of this course.
    pub out_degree_reversed: usize,
    /// Direct prerequisites, in edge insertion order.
    pub prerequisite_ids: Vec<String>,
    /// Direct dependents, in edge insertion order.
    pub dependent_ids: Vec<String>,
}

/// Presentation view of a ranked course.
///
/// Built by joining a [`RankResult`] back to its [`Course`]. Degree counts
/// are always zero and the id lists always empty here; callers that need
/// adjacency detail should request [`EnrichedNode`]s instead.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnrichedCourse {
    #[serde(flatten)]
    pub course: Course,
    pub rank: usize,
    pub score: f64,
    pub in_degree_reversed: usize,
    pub out_degree_reversed: usize,
    pub prerequisite_ids: Vec<String>,
    pub dependent_ids: Vec<String>,
}

impl EnrichedCourse {
    /// Join a ranking entry with its course attributes.
    #[must_use]
    pub const fn from_ranked(course: Course, rank: usize, score: f64) -> Self {
        Self {
            course,
            rank,
            score,
            in_degree_reversed: 0,
            out_degree_reversed: 0,
            prerequisite_ids: Vec::new(),
            dependent_ids: Vec::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_course_uses_id_as_name() {
        let course = Course::bare("MATH101");
        assert_eq!(course.name, "MATH101");
        assert_eq!(course.description, "");
        assert_eq!(course.weight, DEFAULT_WEIGHT);
    }

    #[test]
    fn builder_sets_description_and_weight() {
        let course = Course::new("CS101", "Intro to CS")
            .with_description("Programming basics")
            .with_weight(4);
        assert_eq!(course.description, "Programming basics");
        assert_eq!(course.weight, 4);
    }

    #[test]
    fn course_deserializes_with_defaults() {
        let course: Course =
            serde_json::from_str(r#"{"id":"A","name":"Alpha"}"#).expect("parse course");
        assert_eq!(course, Course::new("A", "Alpha"));
    }

    #[test]
    fn enriched_course_has_empty_adjacency() {
        let view = EnrichedCourse::from_ranked(Course::bare("A"), 1, 0.5);
        assert_eq!(view.in_degree_reversed, 0);
        assert_eq!(view.out_degree_reversed, 0);
        assert!(view.prerequisite_ids.is_empty());
        assert!(view.dependent_ids.is_empty());
    }

    #[test]
    fn enriched_node_serializes_flat() {
        let node = EnrichedNode {
            course: Course::bare("A"),
            score: 0.25,
            in_degree_reversed: 2,
            out_degree_reversed: 0,
            prerequisite_ids: vec![],
            dependent_ids: vec!["B".into(), "C".into()],
        };
        let json = serde_json::to_value(&node).expect("serialize");
        assert_eq!(json["id"], "A");
        assert_eq!(json["in_degree_reversed"], 2);
        assert_eq!(json["dependent_ids"][1], "C");
    }
}
