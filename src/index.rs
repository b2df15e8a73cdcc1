// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

//! Root index adapter.
//!
//! The root index is a Markdown document (by default `LINKS.md` at the
//! repository root) that references every link file in the repository.
//! Tether never actually parses Markdown. A regex pass lifts candidate
//! `{ ... }` records out of the host document and pulls the `id`, `name`,
//! and `path` fields out of each record individually, so a half-written
//! record still comes through as a partially populated reference. Judging
//! partial records is the validator's job; the adapter's job is only to
//! never crash on them.

use crate::{link::LinkFileReference, path::absolutize};

use regex::Regex;
use std::{collections::HashSet, path::Path, sync::LazyLock};

/// Default root index file name, relative to the repository root.
pub const INDEX_FILE_NAME: &str = "LINKS.md";

// Literal patterns; compilation cannot fail.
static RECORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\{[^{}]*\}").unwrap());
static ID_FIELD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""id"\s*:\s*"([^"]*)""#).unwrap());
static NAME_FIELD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""name"\s*:\s*"([^"]*)""#).unwrap());
static PATH_FIELD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""path"\s*:\s*"([^"]*)""#).unwrap());

/// Extract candidate link file references from an index host document.
///
/// Records come back in document order. A record missing some fields is
/// kept as-is; a brace group mentioning none of the three fields is not
/// a candidate at all.
pub fn extract_references(document: &str) -> Vec<LinkFileReference> {
    let mut references = Vec::new();

    for record in RECORD.find_iter(document) {
        let record = record.as_str();
        let id = capture(&ID_FIELD, record);
        let name = capture(&NAME_FIELD, record);
        let path = capture(&PATH_FIELD, record);

        if id.is_none() && name.is_none() && path.is_none() {
            continue;
        }

        references.push(LinkFileReference { id, name, path });
    }

    references
}

/// Prepare a new reference for insertion into an existing index.
///
/// The addition is rejected outright when an existing entry resolves to
/// the same absolute path. A colliding id is not a reason to reject;
/// the new entry is renamed with the first free numeric suffix instead
/// (`api` becomes `api-2`, then `api-3`, and so on).
///
/// # Errors
///
/// - Return [`IndexError::MissingPath`] if the new reference has no path.
/// - Return [`IndexError::DuplicatePath`] if an existing reference
///   already resolves to the same file.
pub fn add_reference(
    references: &[LinkFileReference],
    new: LinkFileReference,
    root_dir: &Path,
) -> Result<LinkFileReference> {
    let Some(path) = new
        .path
        .as_deref()
        .map(str::trim)
        .filter(|path| !path.is_empty())
    else {
        return Err(IndexError::MissingPath);
    };

    let resolved = absolutize(path, root_dir);
    for (index, existing) in references.iter().enumerate() {
        let Some(existing_path) = existing.path.as_deref().filter(|p| !p.trim().is_empty())
        else {
            continue;
        };

        if absolutize(existing_path, root_dir) == resolved {
            return Err(IndexError::DuplicatePath {
                path: path.to_string(),
                index,
            });
        }
    }

    let mut adjusted = new;
    if let Some(id) = adjusted.id.clone().filter(|id| !id.trim().is_empty()) {
        let taken: HashSet<&str> = references
            .iter()
            .filter_map(|reference| reference.id.as_deref())
            .collect();

        if taken.contains(id.as_str()) {
            let mut suffix = 2;
            while taken.contains(format!("{id}-{suffix}").as_str()) {
                suffix += 1;
            }
            adjusted.id = Some(format!("{id}-{suffix}"));
        }
    }

    Ok(adjusted)
}

/// First capture group of a field pattern, if the record carries it.
fn capture(field: &Regex, record: &str) -> Option<String> {
    field
        .captures(record)
        .map(|captures| captures[1].to_string())
}

/// Root index adapter error types.
#[derive(Debug, thiserror::Error)]
pub enum IndexError {
    /// New reference carries no path to judge.
    #[error("new link file reference has no path")]
    MissingPath,

    /// New reference resolves to a path the index already holds.
    #[error("an entry for {path:?} already exists at references[{index}]")]
    DuplicatePath { path: String, index: usize },
}

/// Friendly result alias :3
pub type Result<T, E = IndexError> = std::result::Result<T, E>;
