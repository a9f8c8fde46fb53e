#![forbid(unsafe_code)]
//! keystone-rank library.
//!
//! Ranks courses in a prerequisite graph by how much of the curriculum
//! builds on them.
//!
//! ```rust
//! use keystone_core::model::{Course, Prerequisite};
//! use keystone_rank::RankingEngine;
//!
//! let courses = vec![Course::bare("A"), Course::bare("B"), Course::bare("C")];
//! let prereqs = vec![Prerequisite::new("A", "B"), Prerequisite::new("B", "C")];
//!
//! let ranking = RankingEngine::default().compute_ranking(&courses, &prereqs);
//! assert_eq!(ranking[0].id, "A");
//! ```
//!
//! # Conventions
//!
//! - **Errors**: The engine is infallible; inputs are validated upstream.
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `error!`, `debug!`, `trace!`).

pub mod graph;
pub mod metrics;
pub mod ranking;

pub use graph::{CourseGraph, GraphStats};
pub use ranking::{RankingEngine, RankingOutcome};
