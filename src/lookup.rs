//! Spot annotation lookup keyed by lattice index.
//!
//! Tables are delimited text (comma or tab) with a header row. Column names are
//! matched case-insensitively against a few common spellings, so exports from
//! different plate layouts load without renaming. Indices are 0-based.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpotAnnotation {
    pub name: String,
    pub latin_name: String,
    pub category: String,
}

pub trait SpotLookup {
    fn lookup(&self, row: u32, col: u32) -> Option<&SpotAnnotation>;
}

#[derive(Debug, Error)]
pub enum LookupError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("lookup table is empty")]
    Empty,
    #[error("lookup table has no {0} column")]
    MissingColumn(&'static str),
    #[error("line {line}: invalid {field} value {value:?}")]
    Parse {
        line: usize,
        field: &'static str,
        value: String,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnnotationTable {
    entries: BTreeMap<(u32, u32), SpotAnnotation>,
}

/// No annotations at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLookup;

impl SpotLookup for NoLookup {
    fn lookup(&self, _row: u32, _col: u32) -> Option<&SpotAnnotation> {
        None
    }
}

impl SpotLookup for AnnotationTable {
    fn lookup(&self, row: u32, col: u32) -> Option<&SpotAnnotation> {
        self.entries.get(&(row, col))
    }
}

const ROW_ALIASES: &[&str] = &["row", "rows", "row_index", "grid_row"];
const COL_ALIASES: &[&str] = &["col", "column", "columns", "col_index", "grid_col"];
const NAME_ALIASES: &[&str] = &["name", "allergen", "allergen_name", "analyte"];
const LATIN_ALIASES: &[&str] = &["latin_name", "latin", "scientific_name", "species"];
const CATEGORY_ALIASES: &[&str] = &["category", "group", "class", "type"];

impl AnnotationTable {
    pub fn insert(&mut self, row: u32, col: u32, annotation: SpotAnnotation) {
        self.entries.insert((row, col), annotation);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn parse(text: &str) -> Result<Self, LookupError> {
        let mut lines = text
            .lines()
            .enumerate()
            .filter(|(_, l)| !l.trim().is_empty());
        let (_, header) = lines.next().ok_or(LookupError::Empty)?;
        let delimiter = if header.contains('\t') { '\t' } else { ',' };
        let columns: Vec<String> = split_fields(header, delimiter)
            .into_iter()
            .map(|c| normalize_header(&c))
            .collect();

        let row_idx = find_column(&columns, ROW_ALIASES).ok_or(LookupError::MissingColumn("row"))?;
        let col_idx =
            find_column(&columns, COL_ALIASES).ok_or(LookupError::MissingColumn("column"))?;
        let name_idx =
            find_column(&columns, NAME_ALIASES).ok_or(LookupError::MissingColumn("name"))?;
        let latin_idx = find_column(&columns, LATIN_ALIASES);
        let category_idx = find_column(&columns, CATEGORY_ALIASES);

        let mut table = AnnotationTable::default();
        for (line_no, line) in lines {
            let fields = split_fields(line, delimiter);
            let field = |idx: usize| fields.get(idx).map(|s| s.trim()).unwrap_or("");
            let row = parse_index(field(row_idx), line_no + 1, "row")?;
            let col = parse_index(field(col_idx), line_no + 1, "column")?;
            let annotation = SpotAnnotation {
                name: field(name_idx).to_string(),
                latin_name: latin_idx.map(field).unwrap_or("").to_string(),
                category: category_idx.map(field).unwrap_or("").to_string(),
            };
            if table.entries.insert((row, col), annotation).is_some() {
                warn!(row, col, line = line_no + 1, "duplicate lookup entry; keeping the last");
            }
        }
        debug!(entries = table.len(), "parsed spot lookup table");
        Ok(table)
    }
}

pub fn load_annotation_table(path: &Path) -> Result<AnnotationTable, LookupError> {
    let text = fs::read_to_string(path).map_err(|source| LookupError::Io {
        path: path.display().to_string(),
        source,
    })?;
    AnnotationTable::parse(&text)
}

fn normalize_header(name: &str) -> String {
    name.trim()
        .trim_start_matches('\u{feff}')
        .to_ascii_lowercase()
        .replace([' ', '-'], "_")
}

fn find_column(columns: &[String], aliases: &[&str]) -> Option<usize> {
    aliases
        .iter()
        .find_map(|alias| columns.iter().position(|c| c == alias))
}

fn parse_index(value: &str, line: usize, field: &'static str) -> Result<u32, LookupError> {
    value.parse::<u32>().map_err(|_| LookupError::Parse {
        line,
        field,
        value: value.to_string(),
    })
}

/// Splits one delimited line, honouring double-quoted fields with `""` escapes.
fn split_fields(line: &str, delimiter: char) -> Vec<String> {
    let mut out = Vec::new();
    let mut cur = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                cur.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            c if c == delimiter && !in_quotes => out.push(std::mem::take(&mut cur)),
            c => cur.push(c),
        }
    }
    out.push(cur);
    out
}

#[cfg(test)]
#[path = "../tests/src_inline/lookup.rs"]
mod tests;
