// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

//! Keep files in sync by watching their counterparts.
//!
//! Tether lets a repository declare __links__: when files matching a
//! link's watch patterns change, the files matching its target patterns
//! probably need a look too, e.g., documentation that shadows an
//! implementation. Links live in per-directory link files, a root index
//! references every link file, and link files can pull in other link
//! files wholesale through `extends` chains.
//!
//! The heart of the crate is the resolution and validation machinery in
//! [`link`]: flattening extends chains into one cycle-free link list, and
//! judging every declaration structurally, semantically, and against the
//! filesystem. [`pattern`] supplies the wildcard matching both of those
//! lean on, [`path`] the boundary arithmetic, [`change`] the Git change
//! categories, and [`index`] the textual root index adapter.

pub mod change;
pub mod fs;
pub mod index;
pub mod link;
pub mod path;
pub mod pattern;

pub use crate::{
    change::{changed_files, WatchType},
    fs::{DiskAccess, FileAccess},
    link::{
        load::{LinkSet, Loader},
        resolve::{Resolution, Resolver},
        validate::{Severity, Validation, ValidationIssue, Validator},
        LinkDefinition, LinkFile, LinkFileReference,
    },
    path::{find_repo_root, is_within_root, BoundaryCheck},
};
