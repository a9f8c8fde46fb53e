//! Shared input handling for commands that rank a dataset.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use keystone_core::config::{ProjectConfig, RankConfig, RankOverrides};
use keystone_core::import::{self, Dataset};
use keystone_rank::RankingEngine;
use tracing::debug;

/// Input files and ranking parameters accepted by every ranking command.
#[derive(Args, Debug, Clone, Default)]
pub struct DataArgs {
    /// Prerequisite CSV with rows `prerequisite,course`.
    #[arg(long, short = 'e', value_name = "CSV")]
    pub edges: PathBuf,

    /// Course CSV with rows `id,name,description,weight`.
    ///
    /// When omitted, courses are derived from the ids in the edge file.
    #[arg(long, short = 'c', value_name = "CSV")]
    pub courses: Option<PathBuf>,

    /// Damping factor in (0, 1). Zero means "use the default".
    #[arg(long)]
    pub damping: Option<f64>,

    /// Iteration cap. Zero means "use the default".
    #[arg(long)]
    pub max_iterations: Option<usize>,

    /// Convergence tolerance. Zero means "use the default".
    #[arg(long)]
    pub tolerance: Option<f64>,
}

/// A loaded dataset and the engine configured for it.
#[derive(Debug)]
pub struct Prepared {
    pub dataset: Dataset,
    pub engine: RankingEngine,
}

impl DataArgs {
    /// Ranking parameters given on the command line.
    pub const fn overrides(&self) -> RankOverrides {
        RankOverrides {
            damping: self.damping,
            max_iterations: self.max_iterations,
            tolerance: self.tolerance,
        }
    }

    /// Resolve parameters (flags over config file over defaults), validate
    /// them, and load the input files.
    pub fn prepare(&self, project: &ProjectConfig) -> Result<Prepared> {
        let config = RankConfig::from_overrides(project.rank.merge(self.overrides()));
        config.validate()?;
        debug!(?config, "ranking parameters resolved");

        let dataset = import::load_dataset(&self.edges, self.courses.as_deref())
            .with_context(|| format!("loading {}", self.edges.display()))?;

        Ok(Prepared {
            dataset,
            engine: RankingEngine::new(config),
        })
    }
}
