// Copyright (c) The junit-regroup Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{
    FailurePayload, SerializeError, TestStatus, duration::format_seconds,
    serialize::serialize_report,
};
use std::{io, time::Duration};

/// The root element of a regrouped JUnit report.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Report {
    /// The total number of tests from all test suites.
    pub tests: usize,

    /// The total number of failures from all test suites.
    pub failures: usize,

    /// The total number of errors from all test suites.
    pub errors: usize,

    /// The total number of skipped tests from all test suites.
    pub skipped: usize,

    /// The test suites contained in this report.
    pub test_suites: Vec<TestSuite>,
}

impl Report {
    /// Creates a new, empty `Report`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a new test suite and updates the `tests`, `failures`, `errors` and `skipped` counts.
    ///
    /// When generating a new report, use of this method is recommended over adding to
    /// `self.test_suites` directly.
    pub fn add_test_suite(&mut self, test_suite: TestSuite) -> &mut Self {
        self.tests += test_suite.tests;
        self.failures += test_suite.failures;
        self.errors += test_suite.errors;
        self.skipped += test_suite.skipped;
        self.test_suites.push(test_suite);
        self
    }

    /// Adds several test suites and updates the counts.
    pub fn add_test_suites(
        &mut self,
        test_suites: impl IntoIterator<Item = TestSuite>,
    ) -> &mut Self {
        for test_suite in test_suites {
            self.add_test_suite(test_suite);
        }
        self
    }

    /// Serialize this report to the given writer.
    pub fn serialize(&self, writer: impl io::Write) -> Result<(), SerializeError> {
        self.serialize_with_options(writer, &SerializeOptions::default())
    }

    /// Serialize this report to the given writer, using the given options.
    pub fn serialize_with_options(
        &self,
        writer: impl io::Write,
        options: &SerializeOptions,
    ) -> Result<(), SerializeError> {
        serialize_report(self, writer, options)
    }

    /// Serialize this report to a string.
    pub fn to_string(&self) -> Result<String, SerializeError> {
        let mut buf: Vec<u8> = vec![];
        self.serialize(&mut buf)?;
        Ok(String::from_utf8(buf)?)
    }
}

/// Options controlling how a [`Report`] is written out.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SerializeOptions {
    /// Whether to start the document with `<?xml version="1.0" encoding="UTF-8"?>`.
    pub xml_declaration: bool,
}

/// Represents a single regrouped test suite.
///
/// A `TestSuite` groups together all the test cases that share a key.
#[derive(Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub struct TestSuite {
    /// The name of this test suite.
    pub name: String,

    /// The total number of tests in this test suite.
    pub tests: usize,

    /// The total number of tests in this suite that failed.
    pub failures: usize,

    /// The total number of tests in this suite that errored.
    pub errors: usize,

    /// The total number of tests in this suite that were skipped.
    pub skipped: usize,

    /// The overall time taken by the test suite, as rendered by
    /// [`format_seconds`](crate::format_seconds).
    pub time: String,

    /// The test cases that form this test suite.
    pub test_cases: Vec<TestCase>,
}

impl TestSuite {
    /// Creates a new `TestSuite` with no test cases and a zero duration.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tests: 0,
            failures: 0,
            errors: 0,
            skipped: 0,
            time: format_seconds(Duration::ZERO),
            test_cases: vec![],
        }
    }

    /// Sets the time taken for the test suite.
    pub fn set_time(&mut self, time: Duration) -> &mut Self {
        self.time = format_seconds(time);
        self
    }

    /// Adds a test case to this test suite and updates the counts.
    ///
    /// When generating a new report, use of this method is recommended over adding to
    /// `self.test_cases` directly.
    pub fn add_test_case(&mut self, test_case: TestCase) -> &mut Self {
        self.tests += 1;
        match &test_case.result {
            TestCaseResult::Pass => {}
            TestCaseResult::Failure(_) => self.failures += 1,
            TestCaseResult::Error(_) => self.errors += 1,
            TestCaseResult::Skipped => self.skipped += 1,
        }
        self.test_cases.push(test_case);
        self
    }

    /// Adds several test cases to this test suite and updates the counts.
    pub fn add_test_cases(&mut self, test_cases: impl IntoIterator<Item = TestCase>) -> &mut Self {
        for test_case in test_cases {
            self.add_test_case(test_case);
        }
        self
    }
}

/// Represents a single test case in a regrouped report.
#[derive(Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub struct TestCase {
    /// The name of the test case.
    pub name: String,

    /// The "classname" of the test case.
    pub classname: String,

    /// The time it took to execute this test case, as rendered by
    /// [`format_seconds`](crate::format_seconds).
    pub time: String,

    /// The result block of this test case.
    pub result: TestCaseResult,
}

impl TestCase {
    /// Creates a new test case with a zero duration.
    pub fn new(
        name: impl Into<String>,
        classname: impl Into<String>,
        result: TestCaseResult,
    ) -> Self {
        Self {
            name: name.into(),
            classname: classname.into(),
            time: format_seconds(Duration::ZERO),
            result,
        }
    }

    /// Sets the time taken for the test case.
    pub fn set_time(&mut self, time: Duration) -> &mut Self {
        self.time = format_seconds(time);
        self
    }

    /// Returns the status of this test case, as written to its `status` attribute.
    pub fn status(&self) -> TestStatus {
        self.result.status()
    }
}

/// The result block written inside a `<testcase>`.
///
/// Every [`TestStatus`] corresponds to exactly one variant.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TestCaseResult {
    /// No result block: the test passed.
    Pass,

    /// A `<failure>` block.
    Failure(FailurePayload),

    /// An `<error>` block.
    Error(FailurePayload),

    /// An empty `<skipped/>` marker.
    Skipped,
}

impl TestCaseResult {
    /// Returns the status corresponding to this result block.
    pub fn status(&self) -> TestStatus {
        match self {
            Self::Pass => TestStatus::Passed,
            Self::Failure(_) => TestStatus::Failed,
            Self::Error(_) => TestStatus::Errored,
            Self::Skipped => TestStatus::Skipped,
        }
    }
}
