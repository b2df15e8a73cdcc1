// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

//! Wildcard pattern matching.
//!
//! Watch and target entries in a link file are path patterns. Tether
//! needs to match them two different ways: test a path string it already
//! has in hand (a changed file reported by Git) against a pattern without
//! touching the filesystem, and enumerate which files on disk currently
//! satisfy a pattern. Both live here.
//!
//! # Pattern Vocabulary
//!
//! Only three characters are special: `**` matches across path segments,
//! `*` matches within a single segment, and `?` matches one character
//! within a segment. Everything else is literal text. In particular,
//! square brackets and parentheses are NOT character classes, because
//! framework route directories like `app/[id]` or `app/(marketing)` are
//! ordinary directory names that patterns must spell out verbatim.
//!
//! # Double-Star Contract
//!
//! The separator adjoining a `**` segment stays literal, so a `**` always
//! demands at least one real path level: `**/*.ts` does not match a bare
//! `f.ts` at the root, while it does match `a/f.ts`. Existing link files
//! depend on which files this considers already covered, so this behavior
//! is a contract, not a bug. Do not "fix" it.

use crate::fs::FileAccess;

use regex::Regex;
use std::path::Path;

/// Check whether a pattern uses any wildcard character.
pub fn is_wildcard(pattern: &str) -> bool {
    pattern.contains('*') || pattern.contains('?')
}

/// Match a relative path string against a wildcard pattern.
///
/// Both operands are normalized to forward-slash separators first. The
/// match is anchored: the pattern must cover the entire path.
pub fn matches(path: impl AsRef<str>, pattern: impl AsRef<str>) -> bool {
    let path = path.as_ref().replace('\\', "/");
    let pattern = pattern.as_ref().replace('\\', "/");

    match Regex::new(&translate(&pattern)) {
        Ok(matcher) => matcher.is_match(&path),
        Err(_) => false,
    }
}

/// Enumerate files under `base` that satisfy a pattern.
///
/// A pattern without wildcards only matches itself, and only when it
/// names an existing regular file. Wildcard patterns delegate to the
/// filesystem glob primitive after re-escaping bracket characters, so
/// literal bracket directory segments survive enumeration while `*` and
/// `?` stay active. Enumeration failures come back as zero matches.
pub fn find_matches<F>(pattern: &str, base: &Path, files: &F) -> Vec<String>
where
    F: FileAccess,
{
    if !is_wildcard(pattern) {
        if files.is_file(&base.join(pattern)) {
            return vec![pattern.to_string()];
        }

        return Vec::new();
    }

    files.glob_files(base, &escape_brackets(pattern))
}

/// Translate a pattern into an anchored regular expression.
///
/// Walks the pattern left to right. Wildcards become their regex
/// equivalents, and every other character is escaped, which is what keeps
/// bracket and parenthesis segments literal.
fn translate(pattern: &str) -> String {
    let mut expression = String::from("^");

    let mut chars = pattern.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '*' => {
                if chars.peek() == Some(&'*') {
                    chars.next();
                    expression.push_str(".*");
                } else {
                    expression.push_str("[^/]*");
                }
            }
            '?' => expression.push_str("[^/]"),
            _ => expression.push_str(&regex::escape(ch.encode_utf8(&mut [0; 4]))),
        }
    }

    expression.push('$');
    expression
}

/// Escape bracket characters for glob enumeration.
///
/// The glob collaborator treats `[...]` as a character class, so literal
/// bracket segments must be wrapped before enumeration. Wildcards are
/// deliberately left untouched.
fn escape_brackets(pattern: &str) -> String {
    let mut escaped = String::with_capacity(pattern.len());
    for ch in pattern.chars() {
        match ch {
            '[' => escaped.push_str("[[]"),
            ']' => escaped.push_str("[]]"),
            _ => escaped.push(ch),
        }
    }

    escaped
}
