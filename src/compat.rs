//! Compatibility tables in the README and the per-year document
//!
//! The year document (`docs/version_compatibility_<year>.md`) looks like:
//!
//! ```text
//! # Version Compatibility
//!
//! | OpenInsight | OpenTelemetry Collector Contrib |
//! |-------------|---------------------------------|
//! | v0.1.0      | v0.63.0                         |
//! ```
//!
//! Line index 4 always holds the newest row. The README carries a copy of
//! that single row plus a sentence linking to the year document.

use crate::error::{Error, Result};
use crate::types::ReleaseVersion;
use regex::Regex;
use std::sync::LazyLock;

/// Line index of the newest row in the year document
pub const NEWEST_ROW_INDEX: usize = 4;

static VERSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"v[0-9]+\.[0-9]+\.[0-9]+").expect("valid regex"));

static TABLE_ROW: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\| v[0-9]+\.[0-9]+\.[0-9]+\s+\| v[0-9]+\.[0-9]+\.[0-9]+\s+\|$")
        .expect("valid regex")
});

static FILE_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"((?:[A-Za-z0-9_.-]+/)*)version_compatibility_[0-9]{4}\.md").expect("valid regex")
});

/// Documents after a sync
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdatedDocuments {
    /// Downstream release read from the year document
    pub downstream_version: String,
    /// The new table row
    pub row: String,
    /// Rewritten README
    pub readme: String,
    /// Year document with the new row inserted
    pub compatibility: String,
}

/// File name of the year document
pub fn compatibility_file_name(year: i32) -> String {
    format!("version_compatibility_{year}.md")
}

/// Repository path of the year document
pub fn compatibility_file_path(docs_dir: &str, year: i32) -> String {
    format!(
        "{}/{}",
        docs_dir.trim_end_matches('/'),
        compatibility_file_name(year)
    )
}

/// Downstream release recorded in the newest row of the year document
pub fn documented_version(document: &str) -> Result<String> {
    let line = document.split('\n').nth(NEWEST_ROW_INDEX).ok_or_else(|| {
        Error::Compatibility(format!(
            "document has no line {}; expected the newest table row there",
            NEWEST_ROW_INDEX + 1
        ))
    })?;

    VERSION
        .find(line)
        .map(|m| m.as_str().to_string())
        .ok_or_else(|| {
            Error::Compatibility(format!(
                "no version found on line {}: {line:?}",
                NEWEST_ROW_INDEX + 1
            ))
        })
}

/// Table row pairing a downstream release with an upstream release
pub fn format_row(downstream: &str, upstream: &ReleaseVersion) -> String {
    format!("| {downstream}              | {upstream}                  |")
}

/// Insert `row` as the newest row of the year document
pub fn insert_row(document: &str, row: &str) -> Result<String> {
    let mut lines: Vec<&str> = document.split('\n').collect();
    if lines.len() < NEWEST_ROW_INDEX {
        return Err(Error::Compatibility(format!(
            "document has {} lines; cannot insert at line {}",
            lines.len(),
            NEWEST_ROW_INDEX + 1
        )));
    }
    lines.insert(NEWEST_ROW_INDEX, row);
    Ok(lines.join("\n"))
}

/// Sentence linking the README to the current year document
pub fn pointer_sentence(docs_dir: &str, year: i32) -> String {
    format!(
        "This table only shows the latest version compatibility. For older versions see the [version compatibility list]({}).",
        compatibility_file_path(docs_dir, year)
    )
}

/// Whether `line` links a year document inside `docs_dir`
fn links_year_document(line: &str, docs_dir: &str) -> bool {
    let docs_dir = docs_dir.trim_end_matches('/');
    FILE_LINK
        .captures_iter(line)
        .any(|caps| caps.get(1).map_or("", |m| m.as_str()).trim_end_matches('/') == docs_dir)
}

/// Collapse the compatibility table to `row` and point year-document links
/// at the current year
///
/// The first table row becomes `row` and later rows are dropped. Lines
/// linking a year document under `docs_dir` become the pointer sentence;
/// everything else is untouched.
pub fn rewrite_readme(readme: &str, row: &str, docs_dir: &str, year: i32) -> String {
    let pointer = pointer_sentence(docs_dir, year);
    let mut replaced = false;
    readme
        .split('\n')
        .filter_map(|line| {
            if TABLE_ROW.is_match(line) {
                if replaced {
                    return None;
                }
                replaced = true;
                Some(row)
            } else if links_year_document(line, docs_dir) {
                Some(pointer.as_str())
            } else {
                Some(line)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Produce the README and year document for adopting `upstream`
pub fn update_documents(
    readme: &str,
    compatibility: &str,
    upstream: &ReleaseVersion,
    docs_dir: &str,
    year: i32,
) -> Result<UpdatedDocuments> {
    let downstream_version = documented_version(compatibility)?;
    let row = format_row(&downstream_version, upstream);
    let compatibility = insert_row(compatibility, &row)?;
    let readme = rewrite_readme(readme, &row, docs_dir, year);

    Ok(UpdatedDocuments {
        downstream_version,
        row,
        readme,
        compatibility,
    })
}
