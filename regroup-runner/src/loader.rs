// Copyright (c) The junit-regroup Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Resolve input patterns and load the JUnit reports they match.

use crate::errors::LoadError;
use camino::{Utf8Path, Utf8PathBuf};
use globset::{GlobBuilder, GlobMatcher};
use junit_xml::{ParsedSuite, parse_suites};
use std::io;
use tracing::{debug, info};

/// Loads the input suites for a run.
pub trait ReportLoader {
    /// Resolves `pattern` and returns every suite from every matching report, in match order.
    fn load(&self, pattern: &str) -> Result<Vec<ParsedSuite>, LoadError>;
}

/// A [`ReportLoader`] that reads JUnit XML files from disk.
///
/// Patterns support `*`, `?`, `[...]` and `{a,b}` within a path segment, and `**` across
/// segments. Matches are read in lexicographic order.
#[derive(Clone, Debug, Default)]
pub struct GlobLoader {
    _private: (),
}

impl GlobLoader {
    /// Creates a new `GlobLoader`.
    pub fn new() -> Self {
        Self::default()
    }
}

impl ReportLoader for GlobLoader {
    fn load(&self, pattern: &str) -> Result<Vec<ParsedSuite>, LoadError> {
        let paths = expand_pattern(pattern)?;
        if paths.is_empty() {
            return Err(LoadError::NoMatches {
                pattern: pattern.to_owned(),
            });
        }

        let mut suites = Vec::new();
        for path in &paths {
            suites.extend(load_file(path)?);
        }
        Ok(suites)
    }
}

/// Returns the files matching `pattern`, sorted lexicographically.
///
/// A pattern whose fixed prefix doesn't exist matches nothing. Only directories that could
/// contain a match are searched, and errors for paths the pattern can't match are skipped.
pub fn expand_pattern(pattern: &str) -> Result<Vec<Utf8PathBuf>, LoadError> {
    let matcher = GlobBuilder::new(pattern)
        // `*` and `?` stay within a path segment, and `**` crosses segments.
        .literal_separator(true)
        .build()
        .map_err(|error| LoadError::InvalidPattern {
            pattern: pattern.to_owned(),
            error,
        })?
        .compile_matcher();

    let base = base_dir(pattern);
    let walk_root = if base.as_str().is_empty() {
        Utf8Path::new(".")
    } else {
        base
    };
    let segments = SegmentFilter::new(remainder(pattern, base));
    debug!("searching {walk_root} for files matching {pattern}");

    let walker = walkdir::WalkDir::new(walk_root)
        .follow_links(true)
        .max_depth(segments.max_depth())
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            if entry.depth() == 0 || !entry.file_type().is_dir() {
                return true;
            }
            entry
                .path()
                .strip_prefix(walk_root)
                .ok()
                .and_then(Utf8Path::from_path)
                .is_none_or(|relative| segments.may_contain_matches(relative))
        });

    let mut matches = Vec::new();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(error) if error.depth() == 0 && is_not_found(&error) => break,
            Err(error) => {
                let could_match = error
                    .path()
                    .and_then(Utf8Path::from_path)
                    .is_none_or(|path| matcher.is_match(match_candidate(path, base).as_str()));
                if !could_match {
                    debug!("skipping path that can't match {pattern}: {error}");
                    continue;
                }
                return Err(LoadError::WalkDir {
                    dir: walk_root.to_owned(),
                    error,
                });
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }

        // Patterns are UTF-8, so other paths can't match.
        let Some(path) = Utf8Path::from_path(entry.path()) else {
            debug!("skipping non-UTF-8 path {}", entry.path().display());
            continue;
        };
        let candidate = match_candidate(path, base);
        if matcher.is_match(candidate.as_str()) {
            matches.push(candidate.to_owned());
        }
    }

    matches.sort();
    Ok(matches)
}

/// Reads and parses a single JUnit report.
///
/// Every returned suite records `path` as its source.
pub fn load_file(path: &Utf8Path) -> Result<Vec<ParsedSuite>, LoadError> {
    info!("loading file {path}");

    // The file handle is closed before parsing starts.
    let bytes = std::fs::read(path).map_err(|error| LoadError::Read {
        path: path.to_owned(),
        error,
    })?;
    let contents = String::from_utf8(bytes).map_err(|error| LoadError::InvalidUtf8 {
        path: path.to_owned(),
        error,
    })?;

    let mut suites = match parse_suites(&contents) {
        Ok(suites) => suites,
        Err(error) => {
            return Err(LoadError::Parse {
                path: path.to_owned(),
                contents,
                error,
            });
        }
    };
    for suite in &mut suites {
        suite.set_source(path.as_str());
    }
    debug!(
        "{path}: read {} suites with {} test cases",
        suites.len(),
        suites.iter().map(|suite| suite.tests.len()).sum::<usize>(),
    );

    Ok(suites)
}

/// Returns the longest directory prefix of `pattern` that contains no glob metacharacters.
fn base_dir(pattern: &str) -> &Utf8Path {
    let literal_len = pattern
        .find(['*', '?', '[', '{'])
        .unwrap_or(pattern.len());
    let literal = &pattern[..literal_len];

    if literal_len == pattern.len() {
        // No metacharacters: the pattern names a single path.
        return Utf8Path::new(literal);
    }
    match literal.rfind('/') {
        Some(0) => Utf8Path::new("/"),
        Some(index) => Utf8Path::new(&literal[..index]),
        None => Utf8Path::new(""),
    }
}

/// Returns the part of `pattern` below `base`.
fn remainder<'a>(pattern: &'a str, base: &Utf8Path) -> &'a str {
    pattern[base.as_str().len()..].trim_start_matches('/')
}

/// Relative patterns are matched against paths relative to the current directory.
fn match_candidate<'a>(path: &'a Utf8Path, base: &Utf8Path) -> &'a Utf8Path {
    if base.as_str().is_empty() {
        path.strip_prefix(".").unwrap_or(path)
    } else {
        path
    }
}

/// Matches directories below the base directory against the leading segments of a pattern.
#[derive(Debug)]
struct SegmentFilter {
    // One matcher per segment, up to the first `**`.
    leading: Vec<GlobMatcher>,
    // Whether matches can be arbitrarily deep.
    recursive: bool,
    segment_count: usize,
}

impl SegmentFilter {
    fn new(remainder: &str) -> Self {
        let segments: Vec<&str> = if remainder.is_empty() {
            Vec::new()
        } else {
            remainder.split('/').collect()
        };

        let mut leading = Vec::new();
        let mut recursive = false;
        for segment in &segments {
            if segment.contains("**") {
                recursive = true;
                break;
            }
            match GlobBuilder::new(segment).literal_separator(true).build() {
                Ok(glob) => leading.push(glob.compile_matcher()),
                // An alternate spanning a `/`, such as `{a/b,c}`, can't be split into segments.
                Err(_) => {
                    recursive = true;
                    break;
                }
            }
        }

        Self {
            leading,
            recursive,
            segment_count: segments.len(),
        }
    }

    fn max_depth(&self) -> usize {
        if self.recursive {
            usize::MAX
        } else {
            self.segment_count
        }
    }

    /// Returns true if the directory at `relative` (relative to the base directory) could
    /// contain a match.
    fn may_contain_matches(&self, relative: &Utf8Path) -> bool {
        for (index, component) in relative.components().enumerate() {
            match self.leading.get(index) {
                Some(matcher) => {
                    if !matcher.is_match(component.as_str()) {
                        return false;
                    }
                }
                None => return self.recursive,
            }
        }
        true
    }
}

fn is_not_found(error: &walkdir::Error) -> bool {
    error
        .io_error()
        .is_some_and(|error| error.kind() == io::ErrorKind::NotFound)
}
