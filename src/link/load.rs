// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

//! Link set loading.
//!
//! Thin orchestration over the resolver and validator: parse a link file,
//! validate what it literally says, flatten what its `extends` entries
//! pull in, validate the spliced-in links, and hand consumers one
//! deduplicated flat list. The same flow repeats per reference when
//! loading through the root index.
//!
//! Order is load-bearing everywhere here. Files load in index order,
//! definitions flatten in document order, and deduplication keeps the
//! first occurrence, so error messages and dedup outcomes are
//! reproducible run over run.

use crate::{
    fs::FileAccess,
    index::extract_references,
    link::{
        is_link_file_name,
        resolve::Resolver,
        validate::{Validation, Validator},
        LinkDefinition, LinkFile,
    },
    path::{absolutize, is_within_root},
};

use std::{
    collections::HashSet,
    path::{Path, PathBuf},
};
use tracing::{debug, instrument};

/// A loaded, flattened, deduplicated set of links.
#[derive(Debug, Default, Clone)]
pub struct LinkSet {
    /// Flattened extends-free definitions, first occurrence first.
    pub links: Vec<LinkDefinition>,

    /// Everything the validators and resolver had to say.
    pub validation: Validation,

    /// Whether any extends chain revisited a file.
    pub has_circular_reference: bool,
}

/// Loads link files into consumable link sets.
#[derive(Debug)]
pub struct Loader<'a, F>
where
    F: FileAccess,
{
    files: &'a F,
    root_dir: PathBuf,
}

impl<'a, F> Loader<'a, F>
where
    F: FileAccess,
{
    /// Construct new loader rooted at the repository root.
    pub fn new(files: &'a F, root_dir: impl Into<PathBuf>) -> Self {
        Self {
            files,
            root_dir: root_dir.into(),
        }
    }

    /// Load one link file into a flat link set.
    ///
    /// A document that cannot be read or is not a single top-level list
    /// is terminal for the file: one error, zero links. Everything else
    /// is collected per entry. The raw list is validated first (the only
    /// pass that sees `extends` entries), then each `extends` entry is
    /// resolved in document order with a fresh visited set and its
    /// flattened links spliced in place; links pulled in by resolution
    /// get their own validation pass; a cycle drops that branch's links
    /// entirely. The final list is deduplicated by signature, first
    /// occurrence wins.
    #[instrument(skip(self), level = "debug")]
    pub fn load_file(&self, path: &Path) -> LinkSet {
        let path = absolutize(path, &self.root_dir);
        let mut set = LinkSet::default();

        let file = match LinkFile::load(self.files, &path) {
            Ok(file) => file,
            Err(err) => {
                set.validation
                    .error(None, format!("failed to load {}: {err}", path.display()));
                return set;
            }
        };

        let raw = file.links;
        let base_dir = file
            .path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.root_dir.clone());

        let validator = Validator::new(self.files);
        set.validation
            .merge(validator.validate_links(&raw, &base_dir, Some(&self.root_dir)));

        let resolver = Resolver::new(self.files);
        let mut flat = Vec::new();
        let mut spliced = Vec::new();
        for link in raw {
            let Some(extends) = link.extends.clone() else {
                flat.push(link);
                continue;
            };

            // Already reported as a structural finding by the pre-pass.
            if extends.trim().is_empty() {
                continue;
            }

            let resolution =
                resolver.resolve(&extends, &base_dir, &HashSet::new(), Some(&self.root_dir));
            for error in resolution.errors {
                set.validation.error(None, error);
            }
            for warning in resolution.warnings {
                set.validation.warning(None, warning);
            }

            if resolution.has_circular_reference {
                set.has_circular_reference = true;
                continue;
            }

            spliced.extend(resolution.links.iter().cloned());
            flat.extend(resolution.links);
        }

        // Second validation pass covers only what resolution spliced in,
        // so plain entries are not reported twice.
        if !spliced.is_empty() {
            set.validation
                .merge(validator.validate_links(&spliced, &base_dir, Some(&self.root_dir)));
        }

        debug!("loaded {} definitions from {}", flat.len(), path.display());
        set.links = dedup(flat);
        set
    }

    /// Load every link file referenced by the root index.
    ///
    /// The index host document is read and its references extracted
    /// textually; an unreadable host document is terminal. References
    /// load in index order, and only those that stay in-root, carry an
    /// accepted name, and point at a regular file are loaded — the index
    /// validation pass has already reported the rest. Per-file findings
    /// get their breadcrumbs qualified with the reference's path, and
    /// the merged list is deduplicated across files.
    #[instrument(skip(self), level = "debug")]
    pub fn load(&self, index_path: &Path) -> LinkSet {
        let index_path = absolutize(index_path, &self.root_dir);
        let mut set = LinkSet::default();

        let document = match self.files.read_to_string(&index_path) {
            Ok(document) => document,
            Err(err) => {
                set.validation.error(
                    None,
                    format!("failed to read root index {}: {err}", index_path.display()),
                );
                return set;
            }
        };

        let references = extract_references(&document);
        let validator = Validator::new(self.files);
        set.validation
            .merge(validator.validate_index(&references, &self.root_dir));

        let mut flat = Vec::new();
        for reference in &references {
            let Some(path) = reference.path.as_deref().map(str::trim).filter(|p| !p.is_empty())
            else {
                continue;
            };

            let resolved = absolutize(path, &self.root_dir);
            if !is_within_root(&resolved, &self.root_dir).is_valid {
                continue;
            }
            let file_name = resolved
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default();
            if !is_link_file_name(&file_name) {
                continue;
            }
            if !self.files.is_file(&resolved) {
                continue;
            }

            let file_set = self.load_file(&resolved);
            set.has_circular_reference |= file_set.has_circular_reference;

            let mut file_validation = file_set.validation;
            file_validation.prefix_context(path);
            set.validation.merge(file_validation);

            flat.extend(file_set.links);
        }

        set.links = dedup(flat);
        set
    }
}

/// Collapse duplicate definitions by signature, keeping the first.
fn dedup(links: Vec<LinkDefinition>) -> Vec<LinkDefinition> {
    let mut seen = HashSet::new();
    links
        .into_iter()
        .filter(|link| seen.insert(link.signature()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::DiskAccess;
    use crate::link::validate::Severity;

    use indoc::indoc;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    fn write(root: &Path, relative: &str, contents: &str) {
        let path = root.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, contents).unwrap();
    }

    #[test]
    fn load_file_dedups_by_signature_first_occurrence_wins() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        write(root, "w", "contents");
        write(root, "t", "contents");
        write(
            root,
            "links.json",
            indoc! {r#"
                [
                  {"id": "first", "watch": ["w"], "target": ["t"]},
                  {"id": "second", "watch": ["w"], "target": ["t"], "watchType": "uncommitted"}
                ]
            "#},
        );

        let files = DiskAccess::new();
        let loader = Loader::new(&files, root);
        let set = loader.load_file(&root.join("links.json"));

        assert_eq!(set.links.len(), 1);
        assert_eq!(set.links[0].id.as_deref(), Some("first"));
        // The duplicate is still flagged before dedup collapses it.
        assert_eq!(set.validation.warnings().count(), 1);
    }

    #[test]
    fn load_file_parse_failure_is_terminal_for_the_file() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        write(root, "links.json", r#"{"not": "a list"}"#);

        let files = DiskAccess::new();
        let loader = Loader::new(&files, root);
        let set = loader.load_file(&root.join("links.json"));

        assert_eq!(set.links.len(), 0);
        assert_eq!(set.validation.errors().count(), 1);
    }

    #[test]
    fn load_file_validates_spliced_links_once() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        write(root, "w", "contents");
        write(root, "t", "contents");
        write(
            root,
            "links.json",
            indoc! {r#"
                [
                  {"watch": ["w"], "target": ["t"]},
                  {"extends": "shared/links.json"}
                ]
            "#},
        );
        write(
            root,
            "shared/links.json",
            r#"[{"watch": ["w"], "target": ["missing.md"]}]"#,
        );

        let files = DiskAccess::new();
        let loader = Loader::new(&files, root);
        let set = loader.load_file(&root.join("links.json"));

        assert_eq!(set.links.len(), 2);
        // Exactly one finding: the spliced link's missing target, checked
        // in the second pass and only there.
        let warnings: Vec<_> = set.validation.warnings().collect();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].message.contains("missing.md"));
        assert_eq!(warnings[0].severity, Severity::Warning);
    }

    #[test]
    fn load_file_cycle_drops_branch_links_and_sets_the_flag() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        write(root, "w", "contents");
        write(root, "t", "contents");
        write(
            root,
            "links.json",
            indoc! {r#"
                [
                  {"watch": ["w"], "target": ["t"]},
                  {"extends": "loop/links.json"}
                ]
            "#},
        );
        write(root, "loop/links.json", r#"[{"extends": "links.json"}]"#);

        let files = DiskAccess::new();
        let loader = Loader::new(&files, root);
        let set = loader.load_file(&root.join("links.json"));

        assert!(set.has_circular_reference);
        // The plain sibling survives; only the cyclic branch is dropped.
        assert_eq!(set.links.len(), 1);
        assert!(set.validation.errors().count() >= 1);
    }

    #[test]
    fn load_merges_files_in_index_order_and_prefixes_contexts() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        write(root, "a/w", "contents");
        write(root, "a/t", "contents");
        write(
            root,
            "a/links.json",
            r#"[{"watch": ["a/w"], "target": ["a/t"]}]"#,
        );
        write(
            root,
            "b/.links.json",
            r#"[{"watch": ["gone"], "target": ["also-gone"]}]"#,
        );
        write(
            root,
            "LINKS.md",
            indoc! {r#"
                # Link files

                ```json
                [
                  {"id": "a", "name": "A", "path": "a/links.json"},
                  {"id": "b", "name": "B", "path": "b/.links.json"}
                ]
                ```
            "#},
        );

        let files = DiskAccess::new();
        let loader = Loader::new(&files, root);
        let set = loader.load(&root.join("LINKS.md"));

        assert_eq!(set.links.len(), 2);
        assert_eq!(set.links[0].watch, vec!["a/w".to_string()]);
        assert!(!set.validation.has_errors());

        let contexts: Vec<_> = set
            .validation
            .warnings()
            .map(|issue| issue.context.clone().unwrap())
            .collect();
        assert_eq!(
            contexts,
            vec![
                "b/.links.json: links[0].watch[0]",
                "b/.links.json: links[0].target[0]"
            ]
        );
    }

    #[test]
    fn load_skips_references_that_failed_the_gates() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        write(
            root,
            "LINKS.md",
            indoc! {r#"
                ```json
                [
                  {"id": "out", "name": "out", "path": "../outside/links.json"},
                  {"id": "gone", "name": "gone", "path": "missing/links.json"}
                ]
                ```
            "#},
        );

        let files = DiskAccess::new();
        let loader = Loader::new(&files, root);
        let set = loader.load(&root.join("LINKS.md"));

        assert_eq!(set.links.len(), 0);
        assert_eq!(set.validation.errors().count(), 2);
    }
}
