//! `ks rank`: full ranking of every course.

use std::collections::HashMap;
use std::io::{self, Write};

use clap::Args;
use keystone_core::config::{ProjectConfig, RankConfig};
use keystone_core::model::Course;
use serde::Serialize;

use crate::cmd::data::DataArgs;
use crate::output::{OutputMode, pretty_kv, pretty_section, render_mode};

/// Arguments for `ks rank`.
#[derive(Args, Debug, Clone)]
pub struct RankArgs {
    #[command(flatten)]
    pub data: DataArgs,
}

/// One line of the ranking table.
#[derive(Debug, Clone, Serialize)]
pub struct RankRow {
    pub rank: usize,
    pub id: String,
    pub name: String,
    pub score: f64,
}

/// Payload for `ks rank`.
#[derive(Debug, Serialize)]
pub struct RankReport {
    pub config: RankConfig,
    pub iterations: usize,
    pub converged: bool,
    pub results: Vec<RankRow>,
}

/// Look up display names by id. Later duplicates win, matching graph lookup.
pub fn name_index(courses: &[Course]) -> HashMap<&str, &str> {
    courses
        .iter()
        .map(|c| (c.id.as_str(), c.name.as_str()))
        .collect()
}

/// Execute `ks rank`.
pub fn run_rank(args: &RankArgs, output: OutputMode, project: &ProjectConfig) -> anyhow::Result<()> {
    let prepared = args.data.prepare(project)?;
    let dataset = &prepared.dataset;
    let outcome = prepared
        .engine
        .compute_ranking_detailed(&dataset.courses, &dataset.prerequisites);

    let names = name_index(&dataset.courses);
    let results = outcome
        .results
        .into_iter()
        .map(|r| RankRow {
            name: names.get(r.id.as_str()).copied().unwrap_or_default().to_string(),
            rank: r.rank,
            id: r.id,
            score: r.score,
        })
        .collect();

    let report = RankReport {
        config: *prepared.engine.config(),
        iterations: outcome.iterations,
        converged: outcome.converged,
        results,
    };

    render_mode(output, &report, render_rank_text, render_rank_pretty)
}

fn render_rank_text(report: &RankReport, w: &mut dyn Write) -> io::Result<()> {
    for row in &report.results {
        writeln!(w, "{}\t{}\t{:.6}\t{}", row.rank, row.id, row.score, row.name)?;
    }
    Ok(())
}

fn render_rank_pretty(report: &RankReport, w: &mut dyn Write) -> io::Result<()> {
    pretty_section(w, "Course Ranking")?;
    pretty_kv(w, "Damping", format!("{}", report.config.damping))?;
    pretty_kv(
        w,
        "Iterations",
        format!(
            "{}{}",
            report.iterations,
            if report.converged { "" } else { " (not converged)" }
        ),
    )?;
    writeln!(w)?;

    if report.results.is_empty() {
        writeln!(w, "No courses to rank.")?;
        return Ok(());
    }

    writeln!(w, "{:>4}  {:<12} {:>10}  NAME", "RANK", "ID", "SCORE")?;
    for row in &report.results {
        writeln!(
            w,
            "{:>4}  {:<12} {:>10.6}  {}",
            row.rank, row.id, row.score, row.name
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> RankReport {
        RankReport {
            config: RankConfig::default(),
            iterations: 7,
            converged: false,
            results: vec![
                RankRow {
                    rank: 1,
                    id: "CS101".into(),
                    name: "Intro".into(),
                    score: 0.5,
                },
                RankRow {
                    rank: 2,
                    id: "CS201".into(),
                    name: "Data Structures".into(),
                    score: 0.25,
                },
            ],
        }
    }

    #[test]
    fn text_rows_are_tab_separated() {
        let mut buf = Vec::new();
        render_rank_text(&sample(), &mut buf).expect("render");
        let out = String::from_utf8(buf).expect("utf8");
        assert_eq!(out.lines().next(), Some("1\tCS101\t0.500000\tIntro"));
        assert_eq!(out.lines().count(), 2);
    }

    #[test]
    fn pretty_flags_non_convergence() {
        let mut buf = Vec::new();
        render_rank_pretty(&sample(), &mut buf).expect("render");
        let out = String::from_utf8(buf).expect("utf8");
        assert!(out.contains("7 (not converged)"));
        assert!(out.contains("Data Structures"));
    }

    #[test]
    fn name_index_prefers_last_duplicate() {
        let courses = vec![Course::new("A", "first"), Course::new("A", "second")];
        assert_eq!(name_index(&courses).get("A"), Some(&"second"));
    }
}
