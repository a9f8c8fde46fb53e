//! `ks show`: one course with its score and neighbourhood.

use std::io::{self, Write};

use clap::Args;
use keystone_core::config::ProjectConfig;
use keystone_core::error::KeystoneError;
use keystone_core::model::EnrichedNode;
use serde::Serialize;

use crate::cmd::data::DataArgs;
use crate::output::{OutputMode, pretty_kv, pretty_section, render_mode};

/// Arguments for `ks show`.
#[derive(Args, Debug, Clone)]
pub struct ShowArgs {
    /// Course id to display.
    pub id: String,

    #[command(flatten)]
    pub data: DataArgs,
}

/// Payload for `ks show`.
#[derive(Debug, Serialize)]
pub struct ShowReport {
    pub rank: usize,
    #[serde(flatten)]
    pub node: EnrichedNode,
}

/// Execute `ks show`.
pub fn run_show(args: &ShowArgs, output: OutputMode, project: &ProjectConfig) -> anyhow::Result<()> {
    let prepared = args.data.prepare(project)?;
    let courses = &prepared.dataset.courses;
    let prerequisites = &prepared.dataset.prerequisites;

    let nodes = prepared.engine.enriched_nodes(courses, prerequisites);
    // The graph resolves duplicate ids to the last entry.
    let pos = nodes
        .iter()
        .rposition(|n| n.course.id == args.id)
        .ok_or_else(|| KeystoneError::CourseNotFound(args.id.clone()))?;
    let rank = rank_of(&nodes, pos);
    let node = nodes
        .into_iter()
        .nth(pos)
        .ok_or_else(|| KeystoneError::CourseNotFound(args.id.clone()))?;

    let report = ShowReport { rank, node };
    render_mode(output, &report, render_show_text, render_show_pretty)
}

fn render_show_text(report: &ShowReport, w: &mut dyn Write) -> io::Result<()> {
    let n = &report.node;
    writeln!(w, "id\t{}", n.course.id)?;
    writeln!(w, "name\t{}", n.course.name)?;
    writeln!(w, "rank\t{}", report.rank)?;
    writeln!(w, "score\t{:.6}", n.score)?;
    writeln!(w, "weight\t{}", n.course.weight)?;
    writeln!(w, "prerequisites\t{}", n.prerequisite_ids.join(","))?;
    writeln!(w, "dependents\t{}", n.dependent_ids.join(","))?;
    Ok(())
}

fn render_show_pretty(report: &ShowReport, w: &mut dyn Write) -> io::Result<()> {
    let n = &report.node;
    pretty_section(w, &format!("{}  {}", n.course.id, n.course.name))?;
    if !n.course.description.is_empty() {
        writeln!(w, "{}", n.course.description)?;
        writeln!(w)?;
    }
    pretty_kv(w, "Rank", report.rank.to_string())?;
    pretty_kv(w, "Score", format!("{:.6}", n.score))?;
    pretty_kv(w, "Weight", n.course.weight.to_string())?;
    pretty_kv(
        w,
        "Prerequisites",
        format!("{} {}", n.out_degree_reversed, list_or_dash(&n.prerequisite_ids)),
    )?;
    pretty_kv(
        w,
        "Dependents",
        format!("{} {}", n.in_degree_reversed, list_or_dash(&n.dependent_ids)),
    )?;
    Ok(())
}

/// 1-based rank of `nodes[pos]` under the score-descending, input-order
/// tie-break ordering used by the ranking.
fn rank_of(nodes: &[EnrichedNode], pos: usize) -> usize {
    let score = nodes[pos].score;
    let ahead = nodes
        .iter()
        .enumerate()
        .filter(|(i, n)| match n.score.total_cmp(&score) {
            std::cmp::Ordering::Greater => true,
            std::cmp::Ordering::Equal => *i < pos,
            std::cmp::Ordering::Less => false,
        })
        .count();
    ahead + 1
}

fn list_or_dash(ids: &[String]) -> String {
    if ids.is_empty() {
        "-".to_string()
    } else {
        format!("[{}]", ids.join(", "))
    }
}
