// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

//! Change detection.
//!
//! A link's __watch type__ names which Git change category counts as
//! "changed" for its watch patterns: staged index changes, unstaged
//! working tree changes to tracked files, or anything uncommitted at all.
//! This module turns a watch type into the ordered list of relative paths
//! currently in that state, via a status walk of the repository.
//!
//! The rest of the crate only ever consumes that list; nothing else in
//! tether knows Git status semantics.

use git2::{Repository, Status, StatusOptions};
use std::{fmt::Display, path::Path, str::FromStr};

/// Accepted watch type names, in the order documentation lists them.
pub const WATCH_TYPE_NAMES: [&str; 3] = ["uncommitted", "unstaged", "staged"];

/// Git change category that counts as "changed".
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WatchType {
    /// Anything not yet committed: staged, unstaged, or untracked.
    #[default]
    Uncommitted,

    /// Working tree changes to tracked files.
    Unstaged,

    /// Changes staged in the index.
    Staged,
}

impl WatchType {
    fn matches(&self, status: Status) -> bool {
        let staged = Status::INDEX_NEW
            | Status::INDEX_MODIFIED
            | Status::INDEX_DELETED
            | Status::INDEX_RENAMED
            | Status::INDEX_TYPECHANGE;
        let unstaged = Status::WT_MODIFIED
            | Status::WT_DELETED
            | Status::WT_RENAMED
            | Status::WT_TYPECHANGE;

        match self {
            Self::Staged => status.intersects(staged),
            Self::Unstaged => status.intersects(unstaged),
            Self::Uncommitted => status.intersects(staged | unstaged | Status::WT_NEW),
        }
    }
}

impl FromStr for WatchType {
    type Err = ChangeError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "uncommitted" => Ok(Self::Uncommitted),
            "unstaged" => Ok(Self::Unstaged),
            "staged" => Ok(Self::Staged),
            _ => Err(ChangeError::UnknownWatchType {
                value: value.to_string(),
            }),
        }
    }
}

impl Display for WatchType {
    fn fmt(&self, fmt: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Uncommitted => "uncommitted",
            Self::Unstaged => "unstaged",
            Self::Staged => "staged",
        };
        fmt.write_str(name)
    }
}

/// List relative paths currently in the given change state.
///
/// Paths come back in the order the status walk yields them, relative to
/// the repository root with forward-slash separators, which is exactly
/// the shape watch patterns match against.
///
/// # Errors
///
/// - Return [`ChangeError::Git2`] if the repository cannot be opened or
///   its status walked.
pub fn changed_files(root_dir: &Path, watch_type: WatchType) -> Result<Vec<String>> {
    let repository = Repository::discover(root_dir)?;

    let mut options = StatusOptions::new();
    options
        .include_untracked(true)
        .recurse_untracked_dirs(true)
        .include_ignored(false);

    let statuses = repository.statuses(Some(&mut options))?;

    let mut paths = Vec::new();
    for entry in statuses.iter() {
        let Some(path) = entry.path() else {
            continue;
        };

        if watch_type.matches(entry.status()) {
            paths.push(path.to_string());
        }
    }

    Ok(paths)
}

/// Change detection error types.
#[derive(Debug, thiserror::Error)]
pub enum ChangeError {
    /// Watch type name outside the accepted set.
    #[error("unknown watch type {value:?}; expected one of: uncommitted, unstaged, staged")]
    UnknownWatchType { value: String },

    /// Operations from libgit2 fail.
    #[error(transparent)]
    Git2(#[from] git2::Error),
}

/// Friendly result alias :3
pub type Result<T, E = ChangeError> = std::result::Result<T, E>;
