// Copyright (c) The junit-regroup Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use indexmap::IndexMap;
use std::{fmt, time::Duration};

/// A test suite as read from an input report.
///
/// Produced by [`parse_suites`](crate::parse_suites).
#[derive(Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub struct ParsedSuite {
    /// The name of this test suite.
    pub name: String,

    /// The package this test suite belongs to, if the report recorded one.
    pub package: Option<String>,

    /// Properties recorded for the whole suite.
    pub properties: IndexMap<String, String>,

    /// The test cases in this suite, in document order.
    pub tests: Vec<ParsedTest>,

    /// Where this suite was read from, for diagnostics.
    pub source: Option<String>,
}

impl ParsedSuite {
    /// Creates a new, empty `ParsedSuite`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            package: None,
            properties: IndexMap::new(),
            tests: vec![],
            source: None,
        }
    }

    /// Records where this suite was read from.
    pub fn set_source(&mut self, source: impl Into<String>) -> &mut Self {
        self.source = Some(source.into());
        self
    }

    /// Sets the package of this suite.
    pub fn set_package(&mut self, package: impl Into<String>) -> &mut Self {
        self.package = Some(package.into());
        self
    }

    /// Adds a suite-level property, replacing any earlier value for the same name.
    pub fn add_property(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.properties.insert(name.into(), value.into());
        self
    }

    /// Adds a test case to this suite.
    pub fn add_test(&mut self, test: ParsedTest) -> &mut Self {
        self.tests.push(test);
        self
    }

    /// Adds several test cases to this suite.
    pub fn add_tests(&mut self, tests: impl IntoIterator<Item = ParsedTest>) -> &mut Self {
        self.tests.extend(tests);
        self
    }
}

/// A single test case as read from an input report.
#[derive(Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub struct ParsedTest {
    /// The name of the test case.
    pub name: String,

    /// The "classname" of the test case.
    pub classname: String,

    /// The outcome recorded for this test case.
    pub status: TestStatus,

    /// The time it took to execute this test case.
    pub duration: Duration,

    /// The property bag of this test case.
    ///
    /// When read from XML, this contains every attribute of the `<testcase>` element, followed by
    /// any `<property>` children (which win over attributes with the same name).
    pub properties: IndexMap<String, String>,

    /// The failure details recorded for this test case.
    ///
    /// Present whenever the report contained a `<failure>` or `<error>` element for the test. A
    /// test that is [`TestStatus::Failed`] or [`TestStatus::Errored`] is expected to have one.
    pub failure: Option<FailurePayload>,
}

impl ParsedTest {
    /// Creates a new test case with the given status and no other data.
    pub fn new(name: impl Into<String>, status: TestStatus) -> Self {
        Self {
            name: name.into(),
            classname: String::new(),
            status,
            duration: Duration::ZERO,
            properties: IndexMap::new(),
            failure: None,
        }
    }

    /// Sets the classname of the test.
    pub fn set_classname(&mut self, classname: impl Into<String>) -> &mut Self {
        self.classname = classname.into();
        self
    }

    /// Sets the status of the test.
    pub fn set_status(&mut self, status: TestStatus) -> &mut Self {
        self.status = status;
        self
    }

    /// Sets the time taken by the test.
    pub fn set_duration(&mut self, duration: Duration) -> &mut Self {
        self.duration = duration;
        self
    }

    /// Adds a property, replacing any earlier value for the same name.
    pub fn add_property(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.properties.insert(name.into(), value.into());
        self
    }

    /// Returns the value of the given property, if set.
    pub fn property(&self, name: &str) -> Option<&str> {
        self.properties.get(name).map(String::as_str)
    }

    /// Sets the failure details of the test.
    pub fn set_failure(&mut self, failure: FailurePayload) -> &mut Self {
        self.failure = Some(failure);
        self
    }
}

/// The outcome of a test case.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TestStatus {
    /// The test passed.
    Passed,

    /// The test failed in an expected way (a `<failure>` element).
    Failed,

    /// The test failed in an unexpected way (an `<error>` element).
    Errored,

    /// The test was not run (a `<skipped>` element).
    Skipped,
}

impl TestStatus {
    /// Returns the string used for the `status` attribute of a regrouped test case.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Passed => "passed",
            Self::Failed => "failed",
            Self::Errored => "error",
            Self::Skipped => "skipped",
        }
    }
}

impl fmt::Display for TestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Details attached to a failed or errored test case.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FailurePayload {
    /// The `message` attribute.
    pub message: String,

    /// The `type` attribute.
    pub ty: String,

    /// The text content of the element.
    pub body: String,
}

impl FailurePayload {
    /// Creates a new `FailurePayload`.
    pub fn new(message: impl Into<String>, ty: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ty: ty.into(),
            body: body.into(),
        }
    }
}
