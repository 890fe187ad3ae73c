// Copyright (c) The junit-regroup Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Regroup test cases across suites.

use indexmap::IndexMap;
use junit_xml::{ParsedSuite, ParsedTest};
use std::fmt;

/// The property test cases are grouped by, unless configured otherwise.
pub static DEFAULT_GROUP_PROPERTY: &str = "file";

/// How test cases are assigned to output suites.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GroupBy {
    /// Group by the value of a test case property. Test cases without the property share the
    /// empty-string group.
    Property(String),

    /// Group by the name of the suite each test case was read from.
    ///
    /// A report produced by this tool re-aggregates to itself under this mode.
    SuiteName,
}

impl GroupBy {
    /// Returns the key of `test`, which was read as part of `suite`.
    pub fn key<'a>(&self, suite: &'a ParsedSuite, test: &'a ParsedTest) -> &'a str {
        match self {
            Self::Property(name) => test.property(name).unwrap_or(""),
            Self::SuiteName => &suite.name,
        }
    }
}

impl Default for GroupBy {
    fn default() -> Self {
        Self::Property(DEFAULT_GROUP_PROPERTY.to_owned())
    }
}

impl fmt::Display for GroupBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Property(name) => write!(f, "property `{name}`"),
            Self::SuiteName => write!(f, "suite name"),
        }
    }
}

/// Buckets every test case in `suites` by its key, discarding the original suite boundaries.
///
/// Groups appear in the order their first test case was seen. Within a group, test cases keep
/// their input order: suite order first, then document order within each suite.
pub fn regroup<'a>(
    suites: &'a [ParsedSuite],
    group_by: &GroupBy,
) -> IndexMap<&'a str, Vec<&'a ParsedTest>> {
    let mut groups: IndexMap<&'a str, Vec<&'a ParsedTest>> = IndexMap::new();
    for suite in suites {
        for test in &suite.tests {
            groups
                .entry(group_by.key(suite, test))
                .or_default()
                .push(test);
        }
    }
    groups
}
