// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

//! Extends chain resolution.
//!
//! A link definition can carry an `extends` path instead of its own
//! watch/target lists, pulling in every definition of another link file.
//! Those files can extend further files in turn, so what the consumer
//! actually wants is the flattened picture: one ordered, extends-free
//! list of concrete definitions.
//!
//! Flattening is depth-first and order-preserving. Definitions of a file
//! appear before anything pulled in through a later entry's `extends`,
//! and a chain A → B → C surfaces C's definitions as if A had declared
//! them itself. A chain that revisits a file it is already inside of is a
//! cycle; the entire branch that found it is abandoned, because a
//! partially flattened branch would be a lie.
//!
//! Failures stay local to their branch. A missing, misnamed, or
//! unparseable extended file contributes zero definitions and one error,
//! and traversal of sibling branches carries on.

use crate::{
    fs::FileAccess,
    link::{is_link_file_name, parse_links, LinkDefinition, LINK_FILE_NAMES},
    path::{absolutize, is_within_root},
};

use std::{
    collections::HashSet,
    path::{Path, PathBuf},
};
use tracing::{debug, instrument};

/// Outcome of flattening one extends reference.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// Flattened, extends-free definitions in traversal order.
    pub links: Vec<LinkDefinition>,

    /// Errors collected across the traversed branch.
    pub errors: Vec<String>,

    /// Warnings collected across the traversed branch.
    pub warnings: Vec<String>,

    /// Whether the branch revisited a file already being processed.
    pub has_circular_reference: bool,
}

/// Walks extends chains into flat link lists.
#[derive(Debug)]
pub struct Resolver<'a, F>
where
    F: FileAccess,
{
    files: &'a F,
}

impl<'a, F> Resolver<'a, F>
where
    F: FileAccess,
{
    /// Construct new resolver over a filesystem access layer.
    pub fn new(files: &'a F) -> Self {
        Self { files }
    }

    /// Flatten the extends reference `extends_path` into concrete links.
    ///
    /// The reference is resolved against `base_dir` first; when nothing
    /// exists there and a `fallback_root` is supplied, it is retried
    /// against that root, so both directory-relative and repository-root
    /// relative reference styles work. `visited` holds the normalized
    /// absolute paths already being processed on this branch; each
    /// recursion gets its own copy, never a shared mutable set, so
    /// sibling branches cannot trip each other's cycle detection.
    #[instrument(skip(self, visited, fallback_root), level = "debug")]
    pub fn resolve(
        &self,
        extends_path: &str,
        base_dir: &Path,
        visited: &HashSet<PathBuf>,
        fallback_root: Option<&Path>,
    ) -> Resolution {
        let mut resolution = Resolution::default();

        let mut target = absolutize(extends_path, base_dir);
        if !self.files.exists(&target) {
            if let Some(root) = fallback_root {
                let retry = absolutize(extends_path, root);
                if self.files.exists(&retry) {
                    target = retry;
                }
            }
        }

        // INVARIANT: An unacceptable filename is the strongest possible
        // rejection. No cycle or existence check gets to run first.
        let file_name = target
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        if !is_link_file_name(&file_name) {
            resolution.errors.push(format!(
                "extends path {extends_path:?} must name a link file ({})",
                LINK_FILE_NAMES.join(", ")
            ));
            return resolution;
        }

        if let Some(root) = fallback_root {
            let check = is_within_root(&target, root);
            if !check.is_valid {
                resolution.errors.push(format!(
                    "extends path {extends_path:?} escapes the repository root"
                ));
                return resolution;
            }
        }

        // INVARIANT: Cycle check runs before the existence check. A
        // self-reference to a file that does exist is a cycle, not new
        // work.
        if visited.contains(&target) {
            resolution.has_circular_reference = true;
            resolution.errors.push(format!(
                "circular extends chain detected at {}",
                target.display()
            ));
            return resolution;
        }

        if !self.files.exists(&target) {
            resolution
                .errors
                .push(format!("extends file not found: {}", target.display()));
            return resolution;
        }

        if !self.files.is_file(&target) {
            resolution.errors.push(format!(
                "extends path is not a regular file: {}",
                target.display()
            ));
            return resolution;
        }

        let mut branch_visited = visited.clone();
        branch_visited.insert(target.clone());

        let document = match self.files.read_to_string(&target) {
            Ok(document) => document,
            Err(err) => {
                resolution
                    .errors
                    .push(format!("failed to read {}: {err}", target.display()));
                return resolution;
            }
        };

        let links = match parse_links(&document) {
            Ok(links) => links,
            Err(err) => {
                resolution
                    .errors
                    .push(format!("failed to parse {}: {err}", target.display()));
                return resolution;
            }
        };

        debug!("flatten {} entries from {}", links.len(), target.display());
        let parent = target.parent().map(Path::to_path_buf).unwrap_or_default();
        for link in links {
            if let Some(nested_path) = link.extends.clone() {
                let nested = self.resolve(&nested_path, &parent, &branch_visited, fallback_root);
                resolution.errors.extend(nested.errors);
                resolution.warnings.extend(nested.warnings);

                // INVARIANT: A cycle anywhere in a branch invalidates the
                // whole branch, sibling entries included.
                if nested.has_circular_reference {
                    resolution.has_circular_reference = true;
                    resolution.links.clear();
                    return resolution;
                }

                resolution.links.extend(nested.links);
            } else {
                resolution.links.push(link);
            }
        }

        resolution
    }
}
