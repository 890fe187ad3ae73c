// Copyright (c) The junit-regroup Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use goldenfile::Mint;
use junit_xml::{
    FailurePayload, Report, TestCase, TestCaseResult, TestStatus, TestSuite, parse_suites,
};
use pretty_assertions::assert_eq;
use std::time::Duration;

#[test]
fn fixtures() {
    let mut mint = Mint::new("tests/fixtures");

    let f = mint
        .new_goldenfile("basic_report.xml")
        .expect("creating new goldenfile succeeds");

    let basic_report = basic_report();
    basic_report
        .serialize(f)
        .expect("serializing basic_report succeeds");
}

#[test]
fn fixture_reads_back() {
    let input = std::fs::read_to_string("tests/fixtures/basic_report.xml")
        .expect("reading fixture succeeds");
    let suites = parse_suites(&input).expect("parsing fixture succeeds");

    let summary: Vec<_> = suites
        .iter()
        .map(|suite| {
            let tests: Vec<_> = suite
                .tests
                .iter()
                .map(|test| (test.name.as_str(), test.status, test.duration))
                .collect();
            (suite.name.as_str(), tests)
        })
        .collect();
    assert_eq!(
        summary,
        [
            (
                "pkg/slow_test.go",
                vec![
                    ("TestSlow", TestStatus::Passed, Duration::from_millis(2500)),
                    ("TestFlaky", TestStatus::Failed, Duration::from_millis(750)),
                ]
            ),
            (
                "pkg/quick_test.go",
                vec![
                    ("TestBroken", TestStatus::Errored, Duration::from_millis(1)),
                    ("TestQuick", TestStatus::Skipped, Duration::ZERO),
                ]
            ),
        ]
    );

    // The status attribute written out becomes part of the property bag when read back in.
    assert_eq!(suites[1].tests[0].property("status"), Some("error"));
    assert_eq!(
        suites[0].tests[1].failure,
        Some(FailurePayload::new(
            "expected 1, got 2",
            "",
            "slow_test.go:20: mismatch"
        ))
    );
}

fn basic_report() -> Report {
    let mut report = Report::new();

    let mut slow = TestSuite::new("pkg/slow_test.go");
    slow.set_time(Duration::from_millis(3250));

    let mut test_case = TestCase::new("TestSlow", "example.com/pkg", TestCaseResult::Pass);
    test_case.set_time(Duration::from_millis(2500));
    slow.add_test_case(test_case);

    let mut test_case = TestCase::new(
        "TestFlaky",
        "example.com/pkg",
        TestCaseResult::Failure(FailurePayload::new(
            "expected 1, got 2",
            "",
            "slow_test.go:20: mismatch",
        )),
    );
    test_case.set_time(Duration::from_millis(750));
    slow.add_test_case(test_case);

    let mut quick = TestSuite::new("pkg/quick_test.go");
    quick.set_time(Duration::from_millis(1));

    let mut test_case = TestCase::new(
        "TestBroken",
        "example.com/pkg",
        TestCaseResult::Error(FailurePayload::new("panic: nil map", "runtime", "")),
    );
    test_case.set_time(Duration::from_millis(1));
    quick.add_test_case(test_case);

    quick.add_test_case(TestCase::new(
        "TestQuick",
        "example.com/pkg",
        TestCaseResult::Skipped,
    ));

    report.add_test_suites([slow, quick]);
    report
}
