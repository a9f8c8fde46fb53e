//! Scoring metrics for the course graph.
//!
//! All metrics take a [`crate::graph::CourseGraph`] and return scores
//! indexed by node index, which matches input course order.

pub mod pagerank;

pub use pagerank::{PageRankResult, pagerank};
