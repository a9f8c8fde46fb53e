#![forbid(unsafe_code)]
//! keystone-core library.
//!
//! # Conventions
//!
//! - **Errors**: Library code returns [`error::KeystoneError`]; binaries wrap it in `anyhow`.
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `error!`, `debug!`, `trace!`).

pub mod config;
pub mod error;
pub mod import;
pub mod model;

pub use config::{RankConfig, RankOverrides};
pub use error::{ErrorCode, KeystoneError};
pub use import::Dataset;
pub use model::{Course, EnrichedCourse, EnrichedNode, Prerequisite, RankResult};
