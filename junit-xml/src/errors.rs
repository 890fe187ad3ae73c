// Copyright (c) The junit-regroup Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use std::{fmt, io, str::Utf8Error};
use thiserror::Error;

/// An error that occurs while serializing a [`Report`](crate::Report).
///
/// Returned by [`Report::serialize`](crate::Report::serialize) and
/// [`Report::to_string`](crate::Report::to_string).
#[derive(Debug, Error)]
#[error("error serializing JUnit report")]
pub struct SerializeError {
    #[source]
    inner: SerializeErrorInner,
}

#[derive(Debug, Error)]
enum SerializeErrorInner {
    #[error(transparent)]
    Io(io::Error),
    #[error(transparent)]
    Xml(quick_xml::Error),
    #[error(transparent)]
    Utf8(std::string::FromUtf8Error),
}

impl From<io::Error> for SerializeError {
    fn from(error: io::Error) -> Self {
        Self {
            inner: SerializeErrorInner::Io(error),
        }
    }
}

impl From<quick_xml::Error> for SerializeError {
    fn from(error: quick_xml::Error) -> Self {
        Self {
            inner: SerializeErrorInner::Xml(error),
        }
    }
}

impl From<std::string::FromUtf8Error> for SerializeError {
    fn from(error: std::string::FromUtf8Error) -> Self {
        Self {
            inner: SerializeErrorInner::Utf8(error),
        }
    }
}

/// An error that occurs while reading a JUnit report with [`parse_suites`](crate::parse_suites).
#[derive(Debug, Error)]
#[error("error parsing JUnit report at byte {position}")]
pub struct DeserializeError {
    position: usize,
    #[source]
    kind: DeserializeErrorKind,
}

impl DeserializeError {
    pub(crate) fn new(position: usize, kind: DeserializeErrorKind) -> Self {
        Self { position, kind }
    }

    /// Returns the byte offset into the input at which the error was detected.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Returns the kind of error that occurred.
    pub fn kind(&self) -> &DeserializeErrorKind {
        &self.kind
    }
}

/// The kind of error contained within a [`DeserializeError`].
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DeserializeErrorKind {
    /// The document is not well-formed XML.
    #[error("malformed XML")]
    Xml(#[from] quick_xml::Error),

    /// The document does not contain any elements.
    #[error("document has no root element")]
    MissingRoot,

    /// The document ended while elements were still open.
    #[error("unexpected end of document")]
    UnexpectedEof,

    /// A `<testcase>` appeared outside of any `<testsuite>`.
    #[error("test case `{name}` is not inside a test suite")]
    TestCaseOutsideSuite {
        /// The name of the test case.
        name: String,
    },

    /// A `<testcase>` was opened inside another `<testcase>`.
    #[error("test case `{name}` is nested inside test case `{parent}`")]
    NestedTestCase {
        /// The name of the nested test case.
        name: String,

        /// The name of the enclosing test case.
        parent: String,
    },

    /// A `<testcase>` has a `time` attribute that can't be interpreted as a duration.
    #[error("test case `{name}` has an invalid `time` attribute")]
    InvalidTime {
        /// The name of the test case.
        name: String,

        /// The underlying parse error.
        #[source]
        error: DurationParseError,
    },

    /// A CDATA section is not valid UTF-8.
    #[error("CDATA section is not valid UTF-8")]
    InvalidCData(#[source] Utf8Error),
}

/// An error that occurs while parsing a duration string.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("invalid duration `{input}`: {reason}")]
pub struct DurationParseError {
    input: String,
    reason: DurationParseReason,
}

impl DurationParseError {
    pub(crate) fn new(input: impl Into<String>, reason: DurationParseReason) -> Self {
        Self {
            input: input.into(),
            reason,
        }
    }

    /// Returns the string that failed to parse.
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Returns the reason the string failed to parse.
    pub fn reason(&self) -> DurationParseReason {
        self.reason
    }
}

/// The reason a [`DurationParseError`] occurred.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum DurationParseReason {
    /// The input was empty.
    Empty,

    /// The input contains characters other than ASCII digits and a single decimal point.
    InvalidCharacter,

    /// The input is negative.
    Negative,

    /// The input is not a finite number.
    NotFinite,

    /// The input is too large to be represented.
    Overflow,
}

impl fmt::Display for DurationParseReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "input is empty"),
            Self::InvalidCharacter => write!(f, "expected decimal seconds"),
            Self::Negative => write!(f, "duration is negative"),
            Self::NotFinite => write!(f, "duration is not a finite number"),
            Self::Overflow => write!(f, "duration is too large"),
        }
    }
}
