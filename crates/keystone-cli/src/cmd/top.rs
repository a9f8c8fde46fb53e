//! `ks top`: the most foundational courses.

use std::io::{self, Write};

use clap::Args;
use keystone_core::config::ProjectConfig;
use keystone_core::model::EnrichedCourse;
use serde::Serialize;

use crate::cmd::data::DataArgs;
use crate::output::{OutputMode, pretty_section, render_mode};

/// Arguments for `ks top`.
#[derive(Args, Debug, Clone)]
pub struct TopArgs {
    #[command(flatten)]
    pub data: DataArgs,

    /// Number of courses to show. Defaults to `[output] top` in the config.
    #[arg(short = 'n', long = "limit")]
    pub limit: Option<usize>,
}

/// Payload for `ks top`.
#[derive(Debug, Serialize)]
pub struct TopReport {
    pub requested: usize,
    pub courses: Vec<EnrichedCourse>,
}

/// Execute `ks top`.
pub fn run_top(args: &TopArgs, output: OutputMode, project: &ProjectConfig) -> anyhow::Result<()> {
    let prepared = args.data.prepare(project)?;
    let requested = args.limit.unwrap_or(project.output.top);
    let courses = prepared.engine.top_foundational(
        &prepared.dataset.courses,
        &prepared.dataset.prerequisites,
        requested,
    );

    let report = TopReport { requested, courses };
    render_mode(output, &report, render_top_text, render_top_pretty)
}

fn render_top_text(report: &TopReport, w: &mut dyn Write) -> io::Result<()> {
    for c in &report.courses {
        writeln!(
            w,
            "{}\t{}\t{:.6}\t{}",
            c.rank, c.course.id, c.score, c.course.name
        )?;
    }
    Ok(())
}

fn render_top_pretty(report: &TopReport, w: &mut dyn Write) -> io::Result<()> {
    pretty_section(w, &format!("Top {} Foundational Courses", report.courses.len()))?;
    for c in &report.courses {
        writeln!(
            w,
            "{:>3}. {:<12} {:>10.6}  {}",
            c.rank, c.course.id, c.score, c.course.name
        )?;
        if !c.course.description.is_empty() {
            writeln!(w, "     {}", c.course.description)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use keystone_core::model::Course;

    #[test]
    fn pretty_includes_description_line() {
        let report = TopReport {
            requested: 5,
            courses: vec![EnrichedCourse::from_ranked(
                Course::new("MATH1", "Calculus").with_description("Limits and derivatives"),
                1,
                0.4,
            )],
        };
        let mut buf = Vec::new();
        render_top_pretty(&report, &mut buf).expect("render");
        let out = String::from_utf8(buf).expect("utf8");
        assert!(out.starts_with("Top 1 Foundational Courses"));
        assert!(out.contains("Limits and derivatives"));
    }
}
