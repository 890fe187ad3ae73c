// Copyright (c) The junit-regroup Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Assemble the regrouped report.

use crate::{
    aggregate::build_suite,
    errors::AggregateError,
    regroup::{GroupBy, regroup},
    sort::sort_by_duration_desc,
};
use junit_xml::{ParsedSuite, Report};
use tracing::debug;

/// Regroups the test cases in `suites` and builds the output report.
///
/// The report contains one suite per group, ordered by total duration, longest first. Groups
/// with equal durations keep the order in which they were first seen.
pub fn build_report(suites: &[ParsedSuite], group_by: &GroupBy) -> Result<Report, AggregateError> {
    let groups = regroup(suites, group_by);
    debug!(
        "regrouped {} test cases from {} suites into {} groups by {group_by}",
        groups.values().map(Vec::len).sum::<usize>(),
        suites.len(),
        groups.len(),
    );

    let mut test_suites = groups
        .iter()
        .map(|(key, tests)| build_suite(key, tests))
        .collect::<Result<Vec<_>, _>>()?;
    sort_by_duration_desc(&mut test_suites, |test_suite| test_suite.time.as_str())
        .map_err(AggregateError::SortSuites)?;

    let mut report = Report::new();
    report.add_test_suites(test_suites);
    Ok(report)
}
