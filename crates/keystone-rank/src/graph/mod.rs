//! Course graph module.
//!
//! # Overview
//!
//! Builds the reversed prerequisite graph the ranking engine iterates over,
//! and derives summary statistics from it.
//!
//! ## Pipeline
//!
//! ```text
//! &[Course] + &[Prerequisite]
//!        ↓  build::CourseGraph::build()
//! CourseGraph (DiGraph, edges = course → prerequisite)
//!        ├─ metrics::pagerank::pagerank()
//!        └─ stats::GraphStats::from_graph()
//! ```

pub mod build;
pub mod stats;

pub use build::CourseGraph;
pub use stats::GraphStats;
