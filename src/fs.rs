// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

//! Filesystem access layer.
//!
//! Every path that the resolver or validator touches comes out of a
//! configuration document that the user wrote by hand. Routing all reads
//! through one seam keeps that surface small, and lets tests swap the disk
//! out for whatever fixture layout they need.

use std::{
    fs::read_to_string,
    io::Result as IoResult,
    path::Path,
};

/// Layer of indirection for filesystem access.
pub trait FileAccess: Send + Sync + 'static {
    /// Check whether a path exists at all.
    fn exists(&self, path: &Path) -> bool;

    /// Check whether a path names a regular file.
    fn is_file(&self, path: &Path) -> bool;

    /// Check whether a path names a directory.
    fn is_dir(&self, path: &Path) -> bool;

    /// Read full contents of a file into a string.
    fn read_to_string(&self, path: &Path) -> IoResult<String>;

    /// Enumerate regular files under `base` matching a glob pattern.
    ///
    /// Returned paths are relative to `base` with forward-slash
    /// separators, in the order the underlying walker yields them.
    /// Enumeration failure of any kind produces an empty listing, never
    /// an error.
    fn glob_files(&self, base: &Path, pattern: &str) -> Vec<String>;
}

/// Filesystem access through [`std::fs`] and the glob crate.
#[derive(Debug, Default, Clone)]
pub struct DiskAccess;

impl DiskAccess {
    /// Construct new disk access layer.
    pub fn new() -> Self {
        Self
    }
}

impl FileAccess for DiskAccess {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn read_to_string(&self, path: &Path) -> IoResult<String> {
        read_to_string(path)
    }

    fn glob_files(&self, base: &Path, pattern: &str) -> Vec<String> {
        let full = base.join(pattern);
        let Some(full) = full.to_str() else {
            return Vec::new();
        };

        let Ok(entries) = glob::glob(full) else {
            return Vec::new();
        };

        // INVARIANT: Directories never count as matches.
        let mut matches = Vec::new();
        for entry in entries.flatten() {
            if !entry.is_file() {
                continue;
            }

            if let Ok(relative) = entry.strip_prefix(base) {
                matches.push(relative.to_string_lossy().replace('\\', "/"));
            }
        }

        matches
    }
}
