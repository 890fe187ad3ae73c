// Copyright (c) The junit-regroup Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Build one output suite out of a group of test cases.

use crate::{errors::AggregateError, sort::sort_by_duration_desc};
use junit_xml::{ParsedTest, TestCase, TestCaseResult, TestStatus, TestSuite};
use std::time::Duration;

/// Builds the output suite for the group `key`.
///
/// The suite is named after the key. Its time is the exact sum of the test durations, and its
/// test cases are ordered by duration, longest first.
pub fn build_suite(key: &str, tests: &[&ParsedTest]) -> Result<TestSuite, AggregateError> {
    let mut total = Duration::ZERO;
    let mut test_cases = Vec::with_capacity(tests.len());
    for test in tests {
        total = total
            .checked_add(test.duration)
            .ok_or_else(|| AggregateError::DurationOverflow {
                key: key.to_owned(),
            })?;
        test_cases.push(test_case_for(key, test)?);
    }

    sort_by_duration_desc(&mut test_cases, |test_case| test_case.time.as_str()).map_err(
        |error| AggregateError::SortTestCases {
            key: key.to_owned(),
            error,
        },
    )?;

    let mut test_suite = TestSuite::new(key);
    test_suite.set_time(total).add_test_cases(test_cases);
    Ok(test_suite)
}

/// Converts an input test into its output form.
fn test_case_for(key: &str, test: &ParsedTest) -> Result<TestCase, AggregateError> {
    let result = match test.status {
        TestStatus::Passed => TestCaseResult::Pass,
        // Any failure details recorded for a skipped test are dropped.
        TestStatus::Skipped => TestCaseResult::Skipped,
        TestStatus::Failed | TestStatus::Errored => {
            let payload = test
                .failure
                .clone()
                .ok_or_else(|| AggregateError::MissingFailurePayload {
                    key: key.to_owned(),
                    name: test.name.clone(),
                    classname: test.classname.clone(),
                    status: test.status,
                })?;
            if test.status == TestStatus::Failed {
                TestCaseResult::Failure(payload)
            } else {
                TestCaseResult::Error(payload)
            }
        }
    };

    let mut test_case = TestCase::new(&test.name, &test.classname, result);
    test_case.set_time(test.duration);
    Ok(test_case)
}

#[cfg(test)]
mod tests {
    use super::*;
    use junit_xml::{FailurePayload, parse_seconds};
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use test_case::test_case;

    fn parsed(name: &str, status: TestStatus, millis: u64) -> ParsedTest {
        let mut test = ParsedTest::new(name, status);
        test.set_classname("pkg").set_duration(Duration::from_millis(millis));
        test
    }

    #[test]
    fn suite_sums_and_sorts() {
        let fast = parsed("TestFast", TestStatus::Passed, 250);
        let slow = parsed("TestSlow", TestStatus::Passed, 750);
        let suite = build_suite("pkg/a_test.go", &[&fast, &slow]).expect("suite builds");

        assert_eq!(suite.name, "pkg/a_test.go");
        assert_eq!(suite.time, "1.000000");
        assert_eq!(suite.tests, 2);
        assert_eq!((suite.failures, suite.errors, suite.skipped), (0, 0, 0));
        let order: Vec<_> = suite
            .test_cases
            .iter()
            .map(|test_case| (test_case.name.as_str(), test_case.time.as_str()))
            .collect();
        assert_eq!(order, [("TestSlow", "0.750000"), ("TestFast", "0.250000")]);
    }

    #[test_case(TestStatus::Passed, None, TestCaseResult::Pass ; "passed")]
    #[test_case(
        TestStatus::Failed,
        Some(FailurePayload::new("boom", "assert", "body")),
        TestCaseResult::Failure(FailurePayload::new("boom", "assert", "body"))
        ; "failed"
    )]
    #[test_case(
        TestStatus::Errored,
        Some(FailurePayload::new("panic", "", "")),
        TestCaseResult::Error(FailurePayload::new("panic", "", ""))
        ; "errored"
    )]
    #[test_case(TestStatus::Skipped, None, TestCaseResult::Skipped ; "skipped")]
    #[test_case(
        TestStatus::Skipped,
        Some(FailurePayload::new("stray", "t", "ignored")),
        TestCaseResult::Skipped
        ; "skipped with stray payload"
    )]
    fn status_maps_to_result(
        status: TestStatus,
        failure: Option<FailurePayload>,
        expected: TestCaseResult,
    ) {
        let mut test = parsed("TestX", status, 1500);
        if let Some(failure) = failure {
            test.set_failure(failure);
        }

        let suite = build_suite("key", &[&test]).expect("suite builds");
        let test_case = &suite.test_cases[0];
        assert_eq!(test_case.result, expected);
        assert_eq!(test_case.status(), status, "status round-trips through the result");
        assert_eq!(test_case.classname, "pkg");
        assert_eq!(test_case.time, "1.500000");
    }

    #[test_case(TestStatus::Failed ; "failed")]
    #[test_case(TestStatus::Errored ; "errored")]
    fn missing_payload_is_an_error(status: TestStatus) {
        let test = parsed("TestBroken", status, 0);
        let error = build_suite("pkg/x_test.go", &[&test]).expect_err("payload is missing");
        match error {
            AggregateError::MissingFailurePayload {
                key,
                name,
                classname,
                status: error_status,
            } => {
                assert_eq!(key, "pkg/x_test.go");
                assert_eq!(name, "TestBroken");
                assert_eq!(classname, "pkg");
                assert_eq!(error_status, status);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn counts_by_status() {
        let mut failed = parsed("f", TestStatus::Failed, 1);
        failed.set_failure(FailurePayload::default());
        let mut errored = parsed("e", TestStatus::Errored, 1);
        errored.set_failure(FailurePayload::default());
        let skipped = parsed("s", TestStatus::Skipped, 1);
        let passed = parsed("p", TestStatus::Passed, 1);

        let suite =
            build_suite("k", &[&failed, &errored, &skipped, &passed]).expect("suite builds");
        assert_eq!(
            (suite.tests, suite.failures, suite.errors, suite.skipped),
            (4, 1, 1, 1)
        );
    }

    proptest! {
        // The suite time is the exact sum of the inputs, rounded once when rendered.
        #[test]
        fn duration_is_conserved(nanos in prop::collection::vec(0..10_000_000_000u64, 1..20)) {
            let tests: Vec<_> = nanos
                .iter()
                .enumerate()
                .map(|(index, &nanos)| {
                    let mut test = ParsedTest::new(format!("t{index}"), TestStatus::Passed);
                    test.set_duration(Duration::from_nanos(nanos));
                    test
                })
                .collect();
            let refs: Vec<_> = tests.iter().collect();

            let suite = build_suite("k", &refs).expect("suite builds");
            let total: Duration = tests.iter().map(|test| test.duration).sum();
            prop_assert_eq!(&suite.time, &junit_xml::format_seconds(total));
            prop_assert_eq!(suite.tests, tests.len());

            let times: Vec<_> = suite
                .test_cases
                .iter()
                .map(|test_case| parse_seconds(&test_case.time).expect("rendered time parses"))
                .collect();
            prop_assert!(times.windows(2).all(|w| w[0] >= w[1]));
        }
    }
}
