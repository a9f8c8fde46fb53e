//! `ks stats`: curriculum structure and ranking summary.

use std::io::{self, Write};

use clap::Args;
use keystone_core::config::ProjectConfig;
use keystone_rank::GraphStats;
use serde::Serialize;

use crate::cmd::data::DataArgs;
use crate::output::{OutputMode, pretty_kv, pretty_section, render_mode};

/// Arguments for `ks stats`.
#[derive(Args, Debug, Clone)]
pub struct StatsArgs {
    #[command(flatten)]
    pub data: DataArgs,
}

/// Payload for `ks stats`.
#[derive(Debug, Serialize)]
pub struct StatsReport {
    pub graph: GraphStats,
    /// Prerequisite rows read from input, before filtering and dedup.
    pub input_links: usize,
    pub iterations: usize,
    pub converged: bool,
    pub top_course: Option<String>,
    pub score_total: f64,
}

/// Execute `ks stats`.
pub fn run_stats(
    args: &StatsArgs,
    output: OutputMode,
    project: &ProjectConfig,
) -> anyhow::Result<()> {
    let prepared = args.data.prepare(project)?;
    let dataset = &prepared.dataset;

    let graph = GraphStats::compute(&dataset.courses, &dataset.prerequisites);
    let outcome = prepared
        .engine
        .compute_ranking_detailed(&dataset.courses, &dataset.prerequisites);

    let report = StatsReport {
        graph,
        input_links: dataset.prerequisites.len(),
        iterations: outcome.iterations,
        converged: outcome.converged,
        top_course: outcome.results.first().map(|r| r.id.clone()),
        score_total: outcome.results.iter().map(|r| r.score).sum(),
    };

    render_mode(output, &report, render_stats_text, render_stats_pretty)
}

fn render_stats_text(report: &StatsReport, w: &mut dyn Write) -> io::Result<()> {
    let g = &report.graph;
    writeln!(w, "courses\t{}", g.course_count)?;
    writeln!(w, "links\t{}", g.link_count)?;
    writeln!(w, "input_links\t{}", report.input_links)?;
    writeln!(w, "density\t{:.6}", g.density)?;
    writeln!(w, "foundational\t{}", g.foundational_count)?;
    writeln!(w, "capstone\t{}", g.capstone_count)?;
    writeln!(w, "isolated\t{}", g.isolated_count)?;
    writeln!(w, "components\t{}", g.component_count)?;
    writeln!(w, "iterations\t{}", report.iterations)?;
    writeln!(w, "converged\t{}", report.converged)?;
    writeln!(w, "top\t{}", report.top_course.as_deref().unwrap_or("-"))?;
    Ok(())
}

fn render_stats_pretty(report: &StatsReport, w: &mut dyn Write) -> io::Result<()> {
    let g = &report.graph;
    pretty_section(w, "Curriculum")?;
    pretty_kv(w, "Courses", g.course_count.to_string())?;
    pretty_kv(
        w,
        "Links",
        format!("{} ({} in input)", g.link_count, report.input_links),
    )?;
    pretty_kv(w, "Density", format!("{:.4}", g.density))?;
    pretty_kv(w, "Foundational", g.foundational_count.to_string())?;
    pretty_kv(w, "Capstone", g.capstone_count.to_string())?;
    pretty_kv(w, "Isolated", g.isolated_count.to_string())?;
    pretty_kv(w, "Tracks", g.component_count.to_string())?;
    pretty_kv(w, "Max dependents", g.max_dependents.to_string())?;
    pretty_kv(w, "Max prereqs", g.max_prerequisites.to_string())?;
    writeln!(w)?;

    pretty_section(w, "Ranking")?;
    pretty_kv(w, "Iterations", report.iterations.to_string())?;
    pretty_kv(w, "Converged", if report.converged { "yes" } else { "no" })?;
    pretty_kv(w, "Top course", report.top_course.as_deref().unwrap_or("-"))?;
    pretty_kv(w, "Score total", format!("{:.6}", report.score_total))?;
    Ok(())
}
