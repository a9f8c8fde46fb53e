//! `ks export`: write the ranking as CSV.
//!
//! Columns: `rank,id,name,score,dependents,prerequisites`. The two count
//! columns come from the reversed graph (in/out degree).

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use keystone_core::config::ProjectConfig;
use keystone_core::model::EnrichedNode;
use keystone_core::model::RankResult;
use tracing::info;

use crate::cmd::data::DataArgs;

/// Arguments for `ks export`.
#[derive(Args, Debug, Clone)]
pub struct ExportArgs {
    #[command(flatten)]
    pub data: DataArgs,

    /// Output file path. Defaults to stdout.
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
}

/// Execute `ks export`.
pub fn run_export(args: &ExportArgs, project: &ProjectConfig) -> anyhow::Result<()> {
    let prepared = args.data.prepare(project)?;
    let courses = &prepared.dataset.courses;
    let prerequisites = &prepared.dataset.prerequisites;

    let ranking = prepared.engine.compute_ranking(courses, prerequisites);
    let nodes = prepared.engine.enriched_nodes(courses, prerequisites);

    let mut writer: Box<dyn Write> = if let Some(path) = &args.output {
        let file =
            File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
        Box::new(BufWriter::new(file))
    } else {
        Box::new(BufWriter::new(io::stdout().lock()))
    };

    let rows = write_csv(&mut writer, &ranking, &nodes)?;
    writer.flush()?;

    if let Some(path) = &args.output {
        info!(rows, path = %path.display(), "ranking exported");
    }
    Ok(())
}

/// Write ranking rows as CSV and return how many were written.
fn write_csv(
    w: &mut dyn Write,
    ranking: &[RankResult],
    nodes: &[EnrichedNode],
) -> io::Result<usize> {
    writeln!(w, "rank,id,name,score,dependents,prerequisites")?;

    // Pair every ranking entry with its node. Duplicated ids are consumed
    // in node order so each node is written exactly once.
    let mut used = vec![false; nodes.len()];
    for r in ranking {
        let node = nodes
            .iter()
            .enumerate()
            .find(|(i, n)| !used[*i] && n.course.id == r.id && n.score.total_cmp(&r.score).is_eq());
        let (name, dependents, prerequisites) = match node {
            Some((i, n)) => {
                used[i] = true;
                (
                    n.course.name.as_str(),
                    n.in_degree_reversed,
                    n.out_degree_reversed,
                )
            }
            None => ("", 0, 0),
        };
        writeln!(
            w,
            "{},{},{},{},{},{}",
            r.rank,
            csv_field(&r.id),
            csv_field(name),
            r.score,
            dependents,
            prerequisites
        )?;
    }
    Ok(ranking.len())
}

/// Quote a field if it contains a delimiter, quote, or line break.
fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use keystone_core::model::{Course, Prerequisite};
    use keystone_rank::RankingEngine;

    #[test]
    fn csv_field_quotes_when_needed() {
        assert_eq!(csv_field("plain"), "plain");
        assert_eq!(csv_field("a,b"), "\"a,b\"");
        assert_eq!(csv_field("say \"hi\""), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn export_writes_header_and_degrees() {
        let courses = vec![
            Course::new("A", "Intro, Part 1"),
            Course::bare("B"),
            Course::bare("C"),
        ];
        let edges = vec![Prerequisite::new("A", "B"), Prerequisite::new("B", "C")];
        let engine = RankingEngine::default();
        let ranking = engine.compute_ranking(&courses, &edges);
        let nodes = engine.enriched_nodes(&courses, &edges);

        let mut buf = Vec::new();
        let rows = write_csv(&mut buf, &ranking, &nodes).expect("write");
        let out = String::from_utf8(buf).expect("utf8");
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(rows, 3);
        assert_eq!(lines[0], "rank,id,name,score,dependents,prerequisites");
        assert!(lines[1].starts_with("1,A,\"Intro, Part 1\","));
        assert!(lines[1].ends_with(",1,0"));
        assert!(lines[3].starts_with("3,C,C,"));
        assert!(lines[3].ends_with(",0,1"));
    }
}
