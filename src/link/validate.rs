// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

//! Link graph validation.
//!
//! Two validators share one issue vocabulary: [`Validator::validate_index`]
//! judges the root index's references, and [`Validator::validate_links`]
//! judges a list of link definitions, which may still contain unresolved
//! `extends` entries.
//!
//! Problems are collected, never thrown. One bad entry does not stop
//! validation of its siblings, and a warning never fails anything; only
//! errors make a validate-style operation report failure to its caller.
//!
//! # Dual-Pass Contract
//!
//! The loader runs `validate_links` against a file's raw definition list
//! first, then resolves `extends` chains and runs it again over only the
//! links the resolution spliced in. The first pass is the only one that
//! can see `extends` entries, so extends-specific findings ("field X is
//! ignored") appear exactly once, while existence, duplicate, and pattern
//! checks still cover the full expanded content.

use crate::{
    change::WATCH_TYPE_NAMES,
    fs::FileAccess,
    link::{is_link_file_name, LinkDefinition, LinkFileReference, LINK_FILE_NAMES},
    path::{absolutize, is_within_root},
    pattern,
};

use std::{
    collections::{hash_map::Entry, HashMap, HashSet},
    path::{Path, PathBuf},
};

/// How bad a validation finding is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Finding that fails the overall operation.
    Error,

    /// Advisory finding; never fails anything.
    Warning,
}

/// One validation finding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    /// Severity of the finding.
    pub severity: Severity,

    /// What went wrong.
    pub message: String,

    /// Breadcrumb locating the finding, e.g. `links[2].watch[0]`.
    pub context: Option<String>,
}

/// Ordered collection of validation findings.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Validation {
    issues: Vec<ValidationIssue>,
}

impl Validation {
    /// Construct new empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an error finding.
    pub fn error(&mut self, context: Option<String>, message: impl Into<String>) {
        self.issues.push(ValidationIssue {
            severity: Severity::Error,
            message: message.into(),
            context,
        });
    }

    /// Record a warning finding.
    pub fn warning(&mut self, context: Option<String>, message: impl Into<String>) {
        self.issues.push(ValidationIssue {
            severity: Severity::Warning,
            message: message.into(),
            context,
        });
    }

    /// All findings in the order they were recorded.
    pub fn issues(&self) -> &[ValidationIssue] {
        &self.issues
    }

    /// Error findings only.
    pub fn errors(&self) -> impl Iterator<Item = &ValidationIssue> + '_ {
        self.issues
            .iter()
            .filter(|issue| issue.severity == Severity::Error)
    }

    /// Warning findings only.
    pub fn warnings(&self) -> impl Iterator<Item = &ValidationIssue> + '_ {
        self.issues
            .iter()
            .filter(|issue| issue.severity == Severity::Warning)
    }

    /// Check whether any error-severity finding was recorded.
    pub fn has_errors(&self) -> bool {
        self.errors().next().is_some()
    }

    /// Check whether nothing at all was recorded.
    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    /// Absorb another collection, preserving order.
    pub fn merge(&mut self, other: Validation) {
        self.issues.extend(other.issues);
    }

    /// Prepend a label to every breadcrumb.
    ///
    /// The loader uses this to qualify per-file findings with the link
    /// file they came from before merging across files.
    pub fn prefix_context(&mut self, prefix: &str) {
        for issue in &mut self.issues {
            issue.context = Some(match issue.context.take() {
                Some(context) => format!("{prefix}: {context}"),
                None => prefix.to_string(),
            });
        }
    }
}

/// Judges root indexes and link definition lists.
#[derive(Debug)]
pub struct Validator<'a, F>
where
    F: FileAccess,
{
    files: &'a F,
}

impl<'a, F> Validator<'a, F>
where
    F: FileAccess,
{
    /// Construct new validator over a filesystem access layer.
    pub fn new(files: &'a F) -> Self {
        Self { files }
    }

    /// Validate the root index's reference list.
    ///
    /// An empty index is a warning, not an error. Per reference: `id`,
    /// `name`, and `path` must be non-empty; the path must resolve
    /// inside `root_dir`, carry an accepted link file name, and point at
    /// an existing regular file; ids and *resolved* paths must be unique
    /// across the index, with duplicates naming the first occurrence.
    pub fn validate_index(
        &self,
        references: &[LinkFileReference],
        root_dir: &Path,
    ) -> Validation {
        let mut validation = Validation::new();

        if references.is_empty() {
            validation.warning(None, "root index does not reference any link files");
            return validation;
        }

        let mut seen_ids: HashMap<String, usize> = HashMap::new();
        let mut seen_paths: HashMap<PathBuf, usize> = HashMap::new();

        for (index, reference) in references.iter().enumerate() {
            let id = trimmed(&reference.id);
            if id.is_none() {
                validation.error(
                    Some(format!("references[{index}].id")),
                    "link file reference is missing an id",
                );
            }
            if trimmed(&reference.name).is_none() {
                validation.error(
                    Some(format!("references[{index}].name")),
                    "link file reference is missing a name",
                );
            }

            if let Some(id) = id {
                match seen_ids.entry(id.to_string()) {
                    Entry::Occupied(first) => validation.error(
                        Some(format!("references[{index}].id")),
                        format!("duplicate id {id:?}; first used by references[{}]", first.get()),
                    ),
                    Entry::Vacant(slot) => {
                        slot.insert(index);
                    }
                }
            }

            let Some(path) = trimmed(&reference.path) else {
                validation.error(
                    Some(format!("references[{index}].path")),
                    "link file reference is missing a path",
                );
                continue;
            };
            let context = format!("references[{index}].path");

            // INVARIANT: Boundary gate runs before any duplicate or
            // existence bookkeeping touches the resolved path.
            let resolved = absolutize(path, root_dir);
            if !is_within_root(&resolved, root_dir).is_valid {
                validation.error(
                    Some(context),
                    format!("path {path:?} escapes the repository root"),
                );
                continue;
            }

            match seen_paths.entry(resolved.clone()) {
                Entry::Occupied(first) => {
                    validation.error(
                        Some(context.clone()),
                        format!(
                            "duplicate path {path:?}; first used by references[{}]",
                            first.get()
                        ),
                    );
                }
                Entry::Vacant(slot) => {
                    slot.insert(index);
                }
            }

            let file_name = resolved
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default();
            if !is_link_file_name(&file_name) {
                validation.error(
                    Some(context),
                    format!(
                        "path {path:?} must name a link file ({})",
                        LINK_FILE_NAMES.join(", ")
                    ),
                );
                continue;
            }

            if !self.files.exists(&resolved) {
                validation.error(Some(context), format!("link file not found: {path:?}"));
            } else if !self.files.is_file(&resolved) {
                validation.error(
                    Some(context),
                    format!("path {path:?} is not a regular file"),
                );
            }
        }

        validation
    }

    /// Validate a list of link definitions.
    ///
    /// The list may still contain unresolved `extends` entries; those get
    /// extends-specific checks and skip the pattern machinery entirely.
    /// Extends references resolve against `base_dir` first and fall back
    /// to `fallback_root`, the same two-style resolution the resolver
    /// applies. Watch/target patterns are root-relative, so they are
    /// evaluated against `fallback_root` when one is given and `base_dir`
    /// otherwise.
    pub fn validate_links(
        &self,
        links: &[LinkDefinition],
        base_dir: &Path,
        fallback_root: Option<&Path>,
    ) -> Validation {
        let mut validation = Validation::new();
        let mut seen_ids: HashMap<String, usize> = HashMap::new();
        let mut seen_signatures: HashMap<String, usize> = HashMap::new();
        let pattern_base = fallback_root.unwrap_or(base_dir);

        for (index, link) in links.iter().enumerate() {
            let context = format!("links[{index}]");

            if let Some(id) = trimmed(&link.id) {
                match seen_ids.entry(id.to_string()) {
                    Entry::Occupied(first) => validation.error(
                        Some(format!("{context}.id")),
                        format!("duplicate id {id:?}; first used by links[{}]", first.get()),
                    ),
                    Entry::Vacant(slot) => {
                        slot.insert(index);
                    }
                }
            }

            if link.extends.is_some() {
                self.check_extends(link, base_dir, fallback_root, &context, &mut validation);
                continue;
            }

            if link.watch.is_empty() {
                validation.error(
                    Some(format!("{context}.watch")),
                    "watch must list at least one path or pattern",
                );
            }
            if link.target.is_empty() {
                validation.error(
                    Some(format!("{context}.target")),
                    "target must list at least one path or pattern",
                );
            }

            if let Some(watch_type) = &link.watch_type {
                if !WATCH_TYPE_NAMES.contains(&watch_type.as_str()) {
                    validation.error(
                        Some(format!("{context}.watchType")),
                        format!(
                            "invalid watchType {watch_type:?}; expected one of: {}",
                            WATCH_TYPE_NAMES.join(", ")
                        ),
                    );
                }
            }

            // Duplicates are tolerated but flagged; the loader's dedup
            // collapses them at consumption time anyway.
            match seen_signatures.entry(link.signature()) {
                Entry::Occupied(first) => validation.warning(
                    Some(context.clone()),
                    format!(
                        "duplicate link definition; identical watch, target, and watchType first declared at links[{}]",
                        first.get()
                    ),
                ),
                Entry::Vacant(slot) => {
                    slot.insert(index);
                }
            }

            let watched: HashSet<String> = link.watch.iter().map(|entry| normalize_entry(entry)).collect();
            for target in &link.target {
                if watched.contains(&normalize_entry(target)) {
                    validation.error(
                        Some(context.clone()),
                        format!("{target:?} appears in both watch and target; a file cannot watch itself"),
                    );
                }
            }

            for (field, entries) in [("watch", &link.watch), ("target", &link.target)] {
                for (entry_index, entry) in entries.iter().enumerate() {
                    self.check_pattern(
                        entry,
                        pattern_base,
                        format!("{context}.{field}[{entry_index}]"),
                        &mut validation,
                    );
                }
            }
        }

        validation
    }

    /// Check one `extends` entry.
    fn check_extends(
        &self,
        link: &LinkDefinition,
        base_dir: &Path,
        fallback_root: Option<&Path>,
        context: &str,
        validation: &mut Validation,
    ) {
        let extends = link.extends.as_deref().unwrap_or_default();

        if extends.trim().is_empty() {
            validation.error(
                Some(format!("{context}.extends")),
                "extends must be a non-empty path",
            );
        } else {
            let mut target = absolutize(extends, base_dir);
            if !self.files.exists(&target) {
                if let Some(root) = fallback_root {
                    let retry = absolutize(extends, root);
                    if self.files.exists(&retry) {
                        target = retry;
                    }
                }
            }

            let escapes = fallback_root
                .map(|root| !is_within_root(&target, root).is_valid)
                .unwrap_or(false);
            if escapes {
                validation.error(
                    Some(format!("{context}.extends")),
                    format!("extends path {extends:?} escapes the repository root"),
                );
            } else if !self.files.exists(&target) {
                validation.error(
                    Some(format!("{context}.extends")),
                    format!("extends file not found: {extends:?}"),
                );
            } else if !self.files.is_file(&target) {
                validation.error(
                    Some(format!("{context}.extends")),
                    format!("extends path {extends:?} is not a regular file"),
                );
            }
        }

        // INVARIANT: name/description stay meaningful alongside extends
        // and never count as ignored.
        let mut ignored = Vec::new();
        if !link.watch.is_empty() {
            ignored.push("\"watch\"");
        }
        if !link.target.is_empty() {
            ignored.push("\"target\"");
        }
        if link.watch_type.is_some() {
            ignored.push("\"watchType\"");
        }
        if !ignored.is_empty() {
            validation.warning(
                Some(context.to_string()),
                format!("\"extends\" is set; ignoring {}", ignored.join(", ")),
            );
        }
    }

    /// Check one watch/target entry against the filesystem.
    fn check_pattern(
        &self,
        entry: &str,
        base_dir: &Path,
        context: String,
        validation: &mut Validation,
    ) {
        if !pattern::is_wildcard(entry) {
            let full = absolutize(entry, base_dir);
            if !self.files.exists(&full) {
                validation.warning(context.into(), format!("{entry:?} does not exist"));
            } else if self.files.is_dir(&full) {
                validation.error(
                    context.into(),
                    format!("{entry:?} is a directory; use {entry}/**/* to match the files within"),
                );
            }
            return;
        }

        if pattern::find_matches(entry, base_dir, self.files).is_empty() {
            let mut message = format!("pattern {entry:?} matches no files");
            if entry.contains('*') && !entry.contains("**") {
                message.push_str(
                    "; a single \"*\" does not cross directories, use \"**/\" to match recursively",
                );
            }
            validation.warning(context.into(), message);
        }
    }
}

/// Non-empty trimmed view of an optional field.
fn trimmed(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

/// Normalize a watch/target entry for overlap comparison.
fn normalize_entry(entry: &str) -> String {
    entry
        .replace('\\', "/")
        .trim_start_matches("./")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::DiskAccess;

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

    fn reference(id: &str, name: &str, path: &str) -> LinkFileReference {
        LinkFileReference {
            id: Some(id.into()),
            name: Some(name.into()),
            path: Some(path.into()),
        }
    }

    fn link(watch: &[&str], target: &[&str]) -> LinkDefinition {
        LinkDefinition {
            watch: watch.iter().map(|s| s.to_string()).collect(),
            target: target.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn empty_index_is_a_warning_not_an_error() {
        let temp = TempDir::new().unwrap();
        let files = DiskAccess::new();
        let validator = Validator::new(&files);

        let validation = validator.validate_index(&[], temp.path());

        assert!(!validation.has_errors());
        assert_eq!(validation.warnings().count(), 1);
    }

    #[test]
    fn index_reports_missing_fields_with_breadcrumbs() {
        let temp = TempDir::new().unwrap();
        let files = DiskAccess::new();
        let validator = Validator::new(&files);

        let references = vec![LinkFileReference {
            id: None,
            name: Some("   ".into()),
            path: None,
        }];
        let validation = validator.validate_index(&references, temp.path());

        let contexts: Vec<_> = validation
            .errors()
            .map(|issue| issue.context.clone().unwrap())
            .collect();
        assert_eq!(
            contexts,
            vec!["references[0].id", "references[0].name", "references[0].path"]
        );
    }

    #[test]
    fn index_flags_duplicate_ids_naming_first_occurrence() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "a/links.json", "[]");
        write(temp.path(), "b/links.json", "[]");
        let files = DiskAccess::new();
        let validator = Validator::new(&files);

        let references = vec![
            reference("api", "a", "a/links.json"),
            reference("api", "b", "b/links.json"),
        ];
        let validation = validator.validate_index(&references, temp.path());

        let errors: Vec<_> = validation.errors().collect();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.contains("first used by references[0]"));
        assert_eq!(errors[0].context.as_deref(), Some("references[1].id"));
    }

    #[test]
    fn index_flags_duplicate_resolved_paths_not_raw_strings() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "links.json", "[]");
        let files = DiskAccess::new();
        let validator = Validator::new(&files);

        // Different spellings, same resolved path.
        let references = vec![
            reference("a", "a", "./links.json"),
            reference("b", "b", "links.json"),
        ];
        let validation = validator.validate_index(&references, temp.path());

        let errors: Vec<_> = validation.errors().collect();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.contains("first used by references[0]"));
    }

    #[test]
    fn index_rejects_root_escapes_regardless_of_existence() {
        let temp = TempDir::new().unwrap();
        let files = DiskAccess::new();
        let validator = Validator::new(&files);

        let references = vec![reference("out", "out", "../outside/links.json")];
        let validation = validator.validate_index(&references, temp.path());

        let errors: Vec<_> = validation.errors().collect();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.contains("escapes the repository root"));
    }

    #[test]
    fn index_requires_accepted_names_and_real_files() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "rules.json", "[]");
        fs::create_dir_all(temp.path().join("dir/links.json")).unwrap();
        let files = DiskAccess::new();
        let validator = Validator::new(&files);

        let references = vec![
            reference("a", "a", "rules.json"),
            reference("b", "b", "missing/links.json"),
            reference("c", "c", "dir/links.json"),
        ];
        let validation = validator.validate_index(&references, temp.path());

        let messages: Vec<_> = validation.errors().map(|issue| issue.message.clone()).collect();
        assert!(messages[0].contains("must name a link file"));
        assert!(messages[1].contains("not found"));
        assert!(messages[2].contains("not a regular file"));
    }

    #[test]
    fn watching_yourself_is_an_error() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "x", "contents");
        let files = DiskAccess::new();
        let validator = Validator::new(&files);

        let links = vec![link(&["x"], &["x"])];
        let validation = validator.validate_links(&links, temp.path(), None);

        let errors: Vec<_> = validation.errors().collect();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.contains("cannot watch itself"));
    }

    #[test]
    fn overlap_comparison_normalizes_spellings() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "x", "contents");
        let files = DiskAccess::new();
        let validator = Validator::new(&files);

        let links = vec![link(&["./x"], &["x"])];
        let validation = validator.validate_links(&links, temp.path(), None);

        assert!(validation.has_errors());
    }

    #[test]
    fn duplicate_definitions_warn_once_naming_first_index() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "w", "contents");
        write(temp.path(), "t", "contents");
        let files = DiskAccess::new();
        let validator = Validator::new(&files);

        // Same signature despite list order and explicit default type.
        let mut second = link(&["w"], &["t"]);
        second.watch_type = Some("uncommitted".into());
        let links = vec![link(&["w"], &["t"]), second];
        let validation = validator.validate_links(&links, temp.path(), None);

        assert!(!validation.has_errors());
        let warnings: Vec<_> = validation.warnings().collect();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].message.contains("first declared at links[0]"));
        assert_eq!(warnings[0].context.as_deref(), Some("links[1]"));
    }

    #[test]
    fn empty_watch_and_target_are_structural_errors() {
        let temp = TempDir::new().unwrap();
        let files = DiskAccess::new();
        let validator = Validator::new(&files);

        let links = vec![LinkDefinition::default()];
        let validation = validator.validate_links(&links, temp.path(), None);

        let contexts: Vec<_> = validation
            .errors()
            .map(|issue| issue.context.clone().unwrap())
            .collect();
        assert_eq!(contexts, vec!["links[0].watch", "links[0].target"]);
    }

    #[test]
    fn invalid_watch_type_is_a_per_entry_error() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "w", "contents");
        write(temp.path(), "t", "contents");
        let files = DiskAccess::new();
        let validator = Validator::new(&files);

        let mut bad = link(&["w"], &["t"]);
        bad.watch_type = Some("committed".into());
        let validation = validator.validate_links(&[bad], temp.path(), None);

        let errors: Vec<_> = validation.errors().collect();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].context.as_deref(), Some("links[0].watchType"));
        assert!(errors[0].message.contains("uncommitted, unstaged, staged"));
    }

    #[test]
    fn duplicate_link_ids_are_errors() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "w", "contents");
        write(temp.path(), "t", "contents");
        write(temp.path(), "w2", "contents");
        write(temp.path(), "t2", "contents");
        let files = DiskAccess::new();
        let validator = Validator::new(&files);

        let mut first = link(&["w"], &["t"]);
        first.id = Some("same".into());
        let mut second = link(&["w2"], &["t2"]);
        second.id = Some("same".into());
        let validation = validator.validate_links(&[first, second], temp.path(), None);

        let errors: Vec<_> = validation.errors().collect();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.contains("first used by links[0]"));
    }

    #[test]
    fn extends_alongside_ignored_fields_warns_with_field_names() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "shared/links.json", "[]");
        let files = DiskAccess::new();
        let validator = Validator::new(&files);

        let links = vec![LinkDefinition {
            name: Some("display name is fine".into()),
            description: Some("so is this".into()),
            watch: vec!["w".into()],
            watch_type: Some("staged".into()),
            extends: Some("shared/links.json".into()),
            ..Default::default()
        }];
        let validation = validator.validate_links(&links, temp.path(), Some(temp.path()));

        assert!(!validation.has_errors());
        let warnings: Vec<_> = validation.warnings().collect();
        assert_eq!(warnings.len(), 1);
        assert_eq!(
            warnings[0].message,
            "\"extends\" is set; ignoring \"watch\", \"watchType\""
        );
    }

    #[test]
    fn extends_must_point_at_an_existing_regular_file() {
        let temp = TempDir::new().unwrap();
        let files = DiskAccess::new();
        let validator = Validator::new(&files);

        let links = vec![
            LinkDefinition {
                extends: Some("missing/links.json".into()),
                ..Default::default()
            },
            LinkDefinition {
                extends: Some("  ".into()),
                ..Default::default()
            },
        ];
        let validation = validator.validate_links(&links, temp.path(), Some(temp.path()));

        let messages: Vec<_> = validation.errors().map(|issue| issue.message.clone()).collect();
        assert!(messages[0].contains("not found"));
        assert!(messages[1].contains("non-empty"));
    }

    #[test]
    fn literal_directory_entries_are_errors_with_guidance() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "docs/guide.md", "contents");
        write(temp.path(), "w", "contents");
        let files = DiskAccess::new();
        let validator = Validator::new(&files);

        let links = vec![link(&["w"], &["docs"])];
        let validation = validator.validate_links(&links, temp.path(), None);

        let errors: Vec<_> = validation.errors().collect();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.contains("use docs/**/* to match"));
    }

    #[test]
    fn missing_literal_entries_are_warnings() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "w", "contents");
        let files = DiskAccess::new();
        let validator = Validator::new(&files);

        let links = vec![link(&["w"], &["does-not-exist.md"])];
        let validation = validator.validate_links(&links, temp.path(), None);

        assert!(!validation.has_errors());
        let warnings: Vec<_> = validation.warnings().collect();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].message.contains("does not exist"));
    }

    #[test]
    fn single_star_zero_matches_carries_the_recursive_hint() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "docs/guides/x.md", "contents");
        write(temp.path(), "w", "contents");
        let files = DiskAccess::new();
        let validator = Validator::new(&files);

        let links = vec![link(&["w"], &["docs/*.md"])];
        let validation = validator.validate_links(&links, temp.path(), None);

        let warnings: Vec<_> = validation.warnings().collect();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].message.contains("matches no files"));
        assert!(warnings[0].message.contains("use \"**/\""));
    }

    #[test]
    fn recursive_pattern_finds_nested_files_without_warning() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "docs/guides/x.md", "contents");
        write(temp.path(), "w", "contents");
        let files = DiskAccess::new();
        let validator = Validator::new(&files);

        let links = vec![link(&["w"], &["docs/**/*.md"])];
        let validation = validator.validate_links(&links, temp.path(), None);

        assert!(validation.is_empty());
    }

    #[test]
    fn question_mark_only_pattern_omits_the_hint() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "w", "contents");
        let files = DiskAccess::new();
        let validator = Validator::new(&files);

        let links = vec![link(&["w"], &["docs/guide?.md"])];
        let validation = validator.validate_links(&links, temp.path(), None);

        let warnings: Vec<_> = validation.warnings().collect();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].message.contains("matches no files"));
        assert!(!warnings[0].message.contains("use \"**/\""));
    }
}
