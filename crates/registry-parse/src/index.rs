//! Canonical index table parser
//!
//! Locates the single qualifying pipe table in the index document and
//! extracts its rows in document order. A qualifying table is one whose
//! header row carries every required column (order-insensitive, extra
//! columns allowed). The whole document is scanned before parsing so a
//! second qualifying table is always detected, wherever it appears.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{Error, Result};

/// Required index columns, as they appear in the document header.
pub const REQUIRED_COLUMNS: [&str; 8] = [
    "TOIL ID",
    "Product Name",
    "Category",
    "Lead Creator",
    "Status",
    "License State",
    "Aliases (Optional)",
    "Legacy IDs (Optional)",
];

/// Markdown table separator cell, e.g. `---` or `:---:`.
static SEPARATOR_CELL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^:?-{3,}:?$").unwrap());

/// One raw index row, untouched by semantic validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRow {
    /// 1-based line number of the row in the index document.
    pub line: usize,
    pub toil_id: String,
    pub product_name: String,
    pub category: String,
    pub lead_creator: String,
    pub status: String,
    pub license_state: String,
    pub aliases: Vec<String>,
    pub legacy_ids: Vec<String>,
}

/// The parsed canonical index table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexTable {
    /// 1-based line number of the header row.
    pub header_line: usize,
    /// Rows in document order.
    pub rows: Vec<RawRow>,
}

/// Parse the canonical index document.
///
/// # Errors
///
/// - `DuplicateTable` when more than one qualifying table exists.
/// - `TableNotFound` when none exists (the caller decides whether that is
///   fatal, which depends on whether any record files exist).
/// - `MalformedRow` when a row's cell count disagrees with the header.
pub fn parse_index(source: &str) -> Result<IndexTable> {
    let lines: Vec<&str> = source.lines().collect();

    let mut header_lines = Vec::new();
    for (i, line) in lines.iter().enumerate() {
        if !is_pipe_row(line) {
            continue;
        }
        let cells = split_row(line);
        if REQUIRED_COLUMNS
            .iter()
            .all(|col| cells.iter().any(|cell| cell == col))
        {
            header_lines.push(i);
        }
    }

    match header_lines.as_slice() {
        [] => Err(Error::TableNotFound),
        [header_idx] => parse_table_at(&lines, *header_idx),
        [first, second, ..] => Err(Error::DuplicateTable {
            first_line: first + 1,
            second_line: second + 1,
        }),
    }
}

fn parse_table_at(lines: &[&str], header_idx: usize) -> Result<IndexTable> {
    let header = split_row(lines[header_idx]);
    let column_of = |name: &str| {
        // Presence was established when the header qualified.
        header.iter().position(|cell| cell == name).unwrap()
    };
    let toil_id_col = column_of("TOIL ID");
    let product_name_col = column_of("Product Name");
    let category_col = column_of("Category");
    let lead_creator_col = column_of("Lead Creator");
    let status_col = column_of("Status");
    let license_state_col = column_of("License State");
    let aliases_col = column_of("Aliases (Optional)");
    let legacy_ids_col = column_of("Legacy IDs (Optional)");

    let mut rows = Vec::new();
    for (i, line) in lines.iter().enumerate().skip(header_idx + 1) {
        if !is_pipe_row(line) {
            break;
        }
        let cells = split_row(line);
        if is_separator_row(&cells) {
            continue;
        }
        if cells.len() != header.len() {
            return Err(Error::MalformedRow {
                line: i + 1,
                expected: header.len(),
                found: cells.len(),
            });
        }
        rows.push(RawRow {
            line: i + 1,
            toil_id: cells[toil_id_col].clone(),
            product_name: cells[product_name_col].clone(),
            category: cells[category_col].clone(),
            lead_creator: cells[lead_creator_col].clone(),
            status: cells[status_col].clone(),
            license_state: cells[license_state_col].clone(),
            aliases: split_optional_list(&cells[aliases_col]),
            legacy_ids: split_optional_list(&cells[legacy_ids_col]),
        });
    }

    tracing::debug!(rows = rows.len(), header_line = header_idx + 1, "parsed index table");

    Ok(IndexTable {
        header_line: header_idx + 1,
        rows,
    })
}

fn is_pipe_row(line: &str) -> bool {
    line.trim_start().starts_with('|')
}

fn split_row(line: &str) -> Vec<String> {
    line.trim()
        .trim_matches('|')
        .split('|')
        .map(|cell| cell.trim().to_string())
        .collect()
}

fn is_separator_row(cells: &[String]) -> bool {
    !cells.is_empty() && cells.iter().all(|cell| SEPARATOR_CELL.is_match(cell))
}

/// Split a comma-separated optional cell, dropping empty items.
fn split_optional_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|item| item.trim())
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}
