// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

//! Path resolution utilities.
//!
//! Every path in a link file or the root index was typed by a human, and
//! all of them are interpreted relative to some base directory. This
//! module owns the arithmetic: lexical normalization, absolutization, the
//! repository boundary gate, and locating the repository root itself.
//!
//! Normalization here is purely lexical on purpose. The boundary verdict
//! for a reference like `../outside/links.json` must not depend on
//! whether anything actually exists at that path.

use git2::Repository;
use std::path::{Component, Path, PathBuf};

/// Lexically normalize a path.
///
/// Collapses `.` segments and resolves `..` against preceding normal
/// segments without consulting the filesystem. A `..` with nothing left
/// to pop is kept, except directly under the root where it is a no-op.
pub fn normalize(path: impl AsRef<Path>) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.as_ref().components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match normalized.components().next_back() {
                Some(Component::Normal(_)) => {
                    normalized.pop();
                }
                Some(Component::RootDir) => {}
                _ => normalized.push(Component::ParentDir),
            },
            part => normalized.push(part),
        }
    }

    normalized
}

/// Resolve a possibly-relative path against a base directory.
///
/// Absolute paths are normalized as-is; relative paths are joined onto
/// `base` first.
pub fn absolutize(path: impl AsRef<Path>, base: impl AsRef<Path>) -> PathBuf {
    let path = path.as_ref();
    if path.is_absolute() {
        normalize(path)
    } else {
        normalize(base.as_ref().join(path))
    }
}

/// Verdict of a repository boundary check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundaryCheck {
    /// Whether the candidate stays inside the root.
    pub is_valid: bool,

    /// Human-readable reason when the candidate escapes.
    pub detail: Option<String>,
}

/// Check that a candidate path does not escape a root directory.
///
/// Both paths are normalized lexically; the candidate is resolved against
/// the root when relative. The candidate is rejected when its path
/// relative to the root would begin with a parent-directory step or sit
/// on an unrelated root entirely.
pub fn is_within_root(candidate: impl AsRef<Path>, root: impl AsRef<Path>) -> BoundaryCheck {
    let root = normalize(root);
    let candidate = absolutize(candidate, &root);

    if candidate.strip_prefix(&root).is_ok() {
        BoundaryCheck {
            is_valid: true,
            detail: None,
        }
    } else {
        BoundaryCheck {
            is_valid: false,
            detail: Some(format!(
                "{} resolves outside of {}",
                candidate.display(),
                root.display()
            )),
        }
    }
}

/// Determine absolute path to the repository root.
///
/// Walks upward from `start` using Git discovery. The root is the
/// repository's working tree, so bare repositories are rejected.
///
/// # Errors
///
/// - Return [`PathError::NoRepository`] if no repository sits above `start`.
/// - Return [`PathError::NoWorkTree`] if the repository found is bare.
pub fn find_repo_root(start: impl AsRef<Path>) -> Result<PathBuf> {
    let repository = Repository::discover(start.as_ref()).map_err(|err| PathError::NoRepository {
        source: err,
        start: start.as_ref().to_path_buf(),
    })?;

    let workdir = repository
        .workdir()
        .map(Path::to_path_buf)
        .ok_or_else(|| PathError::NoWorkTree {
            gitdir: repository.path().to_path_buf(),
        })?;

    Ok(workdir)
}

/// Path resolution error types.
#[derive(Debug, thiserror::Error)]
pub enum PathError {
    /// No repository could be discovered above the starting point.
    #[error("no git repository found at or above {:?}", start.display())]
    NoRepository {
        #[source]
        source: git2::Error,
        start: PathBuf,
    },

    /// Discovered repository has no working tree to act as the root.
    #[error("repository at {:?} is bare and has no working tree", gitdir.display())]
    NoWorkTree { gitdir: PathBuf },
}

/// Friendly result alias :3
pub type Result<T, E = PathError> = std::result::Result<T, E>;
