//! CSV import for course and prerequisite data.
//!
//! # Edge CSV
//!
//! Two columns, `prerequisite,course`. Each row means "prerequisite must be
//! taken before course":
//!
//! ```text
//! prerequisite,course
//! MATH101,MATH201
//! "CS101","CS201"
//! ```
//!
//! The header row is optional and recognised by its first cell
//! (`prerequisite` or `from`, any case). Surrounding quotes are stripped,
//! fields are trimmed and blank lines are skipped. Extra columns are ignored.
//!
//! # Course CSV
//!
//! Optional. Columns `id,name,description,weight`; only `id` is required.
//! A missing name defaults to the id and a missing weight to
//! [`DEFAULT_WEIGHT`]. When no course file is given, the course set is
//! derived from the edges with [`derive_courses`].

use std::collections::HashSet;
use std::path::Path;

use tracing::{debug, instrument};

use crate::error::KeystoneError;
use crate::model::{Course, DEFAULT_WEIGHT, Prerequisite};

/// Courses and prerequisite edges, ready for the ranking engine.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dataset {
    pub courses: Vec<Course>,
    pub prerequisites: Vec<Prerequisite>,
}

/// Read the edge file and, if given, the course file.
///
/// # Errors
///
/// Returns [`KeystoneError::Io`] if a file cannot be read and
/// [`KeystoneError::MalformedRow`] for rows that cannot be parsed.
#[instrument(skip_all, fields(edges = %edges_path.display()))]
pub fn load_dataset(
    edges_path: &Path,
    courses_path: Option<&Path>,
) -> Result<Dataset, KeystoneError> {
    let edges_src = read_file(edges_path)?;
    let prerequisites = parse_edges(&edges_src, &edges_path.display().to_string())?;

    let courses = match courses_path {
        Some(path) => {
            let src = read_file(path)?;
            parse_courses(&src, &path.display().to_string())?
        }
        None => derive_courses(&prerequisites),
    };

    debug!(
        courses = courses.len(),
        prerequisites = prerequisites.len(),
        "dataset loaded"
    );

    Ok(Dataset {
        courses,
        prerequisites,
    })
}

/// Parse the two-column `prerequisite,course` format.
///
/// `source_name` only labels errors.
///
/// # Errors
///
/// Returns [`KeystoneError::MalformedRow`] for a row with fewer than two
/// non-empty fields.
pub fn parse_edges(content: &str, source_name: &str) -> Result<Vec<Prerequisite>, KeystoneError> {
    let mut edges = Vec::new();

    for (line_no, fields) in records(content, &["prerequisite", "from"]) {
        let mut cells = fields.into_iter();
        let from = cells.next().unwrap_or_default();
        let to = cells.next().unwrap_or_default();

        if from.is_empty() || to.is_empty() {
            return Err(KeystoneError::MalformedRow {
                source_name: source_name.to_string(),
                line: line_no,
                reason: "expected two non-empty columns: prerequisite,course".to_string(),
            });
        }

        edges.push(Prerequisite { from, to });
    }

    Ok(edges)
}

/// Parse the `id,name,description,weight` course format.
///
/// # Errors
///
/// Returns [`KeystoneError::MalformedRow`] for an empty id or a weight that
/// is not an integer.
pub fn parse_courses(content: &str, source_name: &str) -> Result<Vec<Course>, KeystoneError> {
    let mut courses = Vec::new();

    for (line_no, fields) in records(content, &["id"]) {
        let mut cells = fields.into_iter();
        let id = cells.next().unwrap_or_default();
        if id.is_empty() {
            return Err(KeystoneError::MalformedRow {
                source_name: source_name.to_string(),
                line: line_no,
                reason: "course id is empty".to_string(),
            });
        }

        let name = cells
            .next()
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| id.clone());
        let description = cells.next().unwrap_or_default();
        let weight = match cells.next().filter(|w| !w.is_empty()) {
            Some(raw) => raw.parse::<i64>().map_err(|_| KeystoneError::MalformedRow {
                source_name: source_name.to_string(),
                line: line_no,
                reason: format!("weight '{raw}' is not an integer"),
            })?,
            None => DEFAULT_WEIGHT,
        };

        courses.push(Course {
            id,
            name,
            description,
            weight,
        });
    }

    Ok(courses)
}

/// Build a course list from the ids mentioned by `edges`.
///
/// Ids appear in first-seen order, prerequisite before course within a row.
#[must_use]
pub fn derive_courses(edges: &[Prerequisite]) -> Vec<Course> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut courses = Vec::new();

    for edge in edges {
        for id in [edge.from.as_str(), edge.to.as_str()] {
            if seen.insert(id) {
                courses.push(Course::bare(id));
            }
        }
    }

    courses
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn read_file(path: &Path) -> Result<String, KeystoneError> {
    std::fs::read_to_string(path).map_err(|source| KeystoneError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Split `content` into `(1-based line number, fields)` records.
///
/// Blank lines are dropped. The first non-blank row is dropped when its
/// first cell matches one of `header_names`.
fn records<'a>(
    content: &'a str,
    header_names: &'a [&'a str],
) -> impl Iterator<Item = (usize, Vec<String>)> + 'a {
    let mut first = true;
    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .filter_map(move |(idx, line)| {
            let fields = split_fields(line);
            let is_header = first
                && fields.first().is_some_and(|cell| {
                    header_names.iter().any(|h| cell.eq_ignore_ascii_case(h))
                });
            first = false;
            (!is_header).then_some((idx + 1, fields))
        })
}

/// Split one CSV line on commas outside double quotes.
///
/// Quotes are removed and each field is trimmed. A doubled quote inside a
/// quoted field is kept as a single quote.
fn split_fields(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                current.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                fields.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(c),
        }
    }
    fields.push(current.trim().to_string());

    fields
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
