// Copyright (c) The junit-regroup Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Errors produced by junit-regroup.

use camino::Utf8PathBuf;
use junit_xml::{DeserializeError, DurationParseError, SerializeError, TestStatus};
use std::io;
use thiserror::Error;

/// An error that occurs while resolving an input pattern or loading the reports it matches.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LoadError {
    /// The input pattern could not be compiled.
    #[error("invalid input pattern `{pattern}`")]
    InvalidPattern {
        /// The pattern.
        pattern: String,

        /// The underlying error.
        #[source]
        error: globset::Error,
    },

    /// The input pattern did not match any files.
    #[error("no files matched input pattern `{pattern}`")]
    NoMatches {
        /// The pattern.
        pattern: String,
    },

    /// An error occurred while walking a directory looking for matches.
    #[error("error searching `{dir}` for input files")]
    WalkDir {
        /// The directory being searched.
        dir: Utf8PathBuf,

        /// The underlying error.
        #[source]
        error: walkdir::Error,
    },

    /// An input file could not be read.
    #[error("error reading `{path}`")]
    Read {
        /// The file.
        path: Utf8PathBuf,

        /// The underlying error.
        #[source]
        error: io::Error,
    },

    /// An input file was not valid UTF-8.
    #[error("`{path}` is not valid UTF-8")]
    InvalidUtf8 {
        /// The file.
        path: Utf8PathBuf,

        /// The underlying error.
        #[source]
        error: std::string::FromUtf8Error,
    },

    /// An input file was not a valid JUnit report.
    #[error("error parsing JUnit report `{path}`")]
    Parse {
        /// The file.
        path: Utf8PathBuf,

        /// The contents of the file, for diagnostics.
        contents: String,

        /// The underlying error.
        #[source]
        error: DeserializeError,
    },
}

/// An error that occurs while building regrouped suites.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AggregateError {
    /// A failed or errored test had no failure details to copy into the report.
    #[error(
        "test `{name}` (classname `{classname}`) in group `{key}` is {status} \
         but has no failure details"
    )]
    MissingFailurePayload {
        /// The group the test belongs to.
        key: String,

        /// The name of the test.
        name: String,

        /// The classname of the test.
        classname: String,

        /// The status of the test.
        status: TestStatus,
    },

    /// The total duration of a group could not be represented.
    #[error("total duration of group `{key}` overflowed")]
    DurationOverflow {
        /// The group.
        key: String,
    },

    /// The test cases of a group could not be sorted.
    #[error("error sorting test cases in group `{key}` by duration")]
    SortTestCases {
        /// The group.
        key: String,

        /// The underlying error.
        #[source]
        error: SortError,
    },

    /// The suites of the report could not be sorted.
    #[error("error sorting suites by duration")]
    SortSuites(#[source] SortError),
}

/// A rendered duration could not be parsed back while sorting.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("invalid rendered duration `{rendered}`")]
pub struct SortError {
    rendered: String,
    #[source]
    error: DurationParseError,
}

impl SortError {
    pub(crate) fn new(rendered: impl Into<String>, error: DurationParseError) -> Self {
        Self {
            rendered: rendered.into(),
            error,
        }
    }

    /// Returns the string that failed to parse.
    pub fn rendered(&self) -> &str {
        &self.rendered
    }
}

/// An error that occurs while rendering a report.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RenderError {
    /// The report could not be written out as XML.
    #[error("error rendering report as XML")]
    Xml(#[source] SerializeError),
}
