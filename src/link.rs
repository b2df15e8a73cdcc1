// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

//! Link declaration layout.
//!
//! A __link__ declares that changes to a set of "watch" files should
//! prompt review of a set of "target" files, e.g., keep a guide in sync
//! with the implementation it documents. Links live in per-directory
//! __link files__, and a repository-wide root index references every
//! link file in play.
//!
//! # Link File Layout
//!
//! A link file is a document holding exactly one top-level list of link
//! definitions. Each definition either carries its own `watch`/`target`
//! pattern lists, or an `extends` path pulling in the definitions of
//! another link file wholesale. Three filenames are accepted, all equally
//! valid and freely mixable in one repository: `links.json`, plus the
//! dotfile spellings `.links.json` and `.tether-links.json`.
//!
//! This module only specifies the data layout and document parsing. The
//! interesting machinery lives in the submodules: [`resolve`] flattens
//! extends chains, [`validate`] judges the results, and [`load`] glues
//! the two together for consumers.

pub mod load;
pub mod resolve;
pub mod validate;

use crate::fs::FileAccess;

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Accepted link file names, primary spelling first.
pub const LINK_FILE_NAMES: [&str; 3] = ["links.json", ".links.json", ".tether-links.json"];

/// Check whether a filename is an accepted link file name.
pub fn is_link_file_name(name: &str) -> bool {
    LINK_FILE_NAMES.contains(&name)
}

/// A single link definition.
///
/// Either `extends` is a non-empty path to another link file, or both
/// `watch` and `target` are non-empty pattern lists. When `extends` is
/// set, `watch`/`target`/`watch_type` are ignored for resolution (their
/// presence draws an advisory warning), while `name` and `description`
/// stay meaningful for display.
///
/// `watch_type` is kept as a raw string rather than an enum so that an
/// invalid value surfaces as a per-entry validation finding instead of
/// failing the whole document parse.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LinkDefinition {
    /// Stable identifier, unique within a link file when present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Short display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// One sentence description of what the link keeps in sync.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Patterns identifying files whose changes trigger review.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub watch: Vec<String>,

    /// Patterns identifying files that may need updating.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub target: Vec<String>,

    /// Git change category that counts as "changed".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub watch_type: Option<String>,

    /// Path to another link file whose definitions replace this entry.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extends: Option<String>,
}

impl LinkDefinition {
    /// Compute the deduplication signature of this definition.
    ///
    /// Two definitions with the same watch type and the same watch and
    /// target sets (order-insensitive) are duplicates of each other no
    /// matter how their lists are ordered. An absent watch type counts
    /// as `uncommitted`.
    pub fn signature(&self) -> String {
        let watch_type = self.watch_type.as_deref().unwrap_or("uncommitted");

        let mut watch = self.watch.clone();
        watch.sort();
        let mut target = self.target.clone();
        target.sort();

        format!("{watch_type}::{}::{}", watch.join(","), target.join(","))
    }
}

/// A parsed link file: where it lives, and what it declares.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LinkFile {
    /// Absolute path of the document.
    pub path: PathBuf,

    /// Definitions in document order.
    pub links: Vec<LinkDefinition>,
}

impl LinkFile {
    /// Read and parse a link file from disk.
    ///
    /// # Errors
    ///
    /// - Return [`LinkError::Read`] if the document cannot be read.
    /// - Return [`LinkError::Parse`] or [`LinkError::NotAList`] if it is
    ///   not a single top-level list of definitions.
    pub fn load<F>(files: &F, path: &Path) -> Result<Self>
    where
        F: FileAccess,
    {
        let document = files.read_to_string(path).map_err(|err| LinkError::Read {
            source: err,
            path: path.to_path_buf(),
        })?;

        Ok(Self {
            path: path.to_path_buf(),
            links: parse_links(&document)?,
        })
    }
}

/// An entry of the root index pointing at one link file.
///
/// The index adapter extracts these textually and may only partially
/// populate them. Reporting the gaps is the validator's job, not the
/// adapter's.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LinkFileReference {
    /// Identifier, unique across the index.
    pub id: Option<String>,

    /// Display name.
    pub name: Option<String>,

    /// Path to the link file, relative to the repository root.
    pub path: Option<String>,
}

/// Parse a link file document into its definition list.
///
/// The document must hold exactly one top-level list.
///
/// # Errors
///
/// - Return [`LinkError::Parse`] if the document is not valid JSON, or an
///   entry has the wrong shape.
/// - Return [`LinkError::NotAList`] if the top-level value is anything
///   but a list.
pub fn parse_links(document: &str) -> Result<Vec<LinkDefinition>> {
    let value: serde_json::Value = serde_json::from_str(document).map_err(LinkError::Parse)?;

    if !value.is_array() {
        return Err(LinkError::NotAList);
    }

    serde_json::from_value(value).map_err(LinkError::Parse)
}

/// Link document error types.
#[derive(Debug, thiserror::Error)]
pub enum LinkError {
    /// Document cannot be read from disk.
    #[error("failed to read link file at {:?}", path.display())]
    Read {
        #[source]
        source: std::io::Error,
        path: PathBuf,
    },

    /// Document is unreadable as JSON or an entry has the wrong shape.
    #[error("invalid link document: {0}")]
    Parse(#[source] serde_json::Error),

    /// Document parses, but its top-level value is not a list.
    #[error("link document must contain a single top-level list")]
    NotAList,
}

/// Friendly result alias :3
pub type Result<T, E = LinkError> = std::result::Result<T, E>;
