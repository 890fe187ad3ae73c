// Copyright (c) The junit-regroup Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

/// Documented exit codes for `junit-regroup` failures.
///
/// Unknown/unexpected failures will always result in exit code 1. Invalid command-line arguments
/// result in exit code 2.
pub enum RegroupExitCode {}

impl RegroupExitCode {
    /// No errors occurred and the report was written out.
    pub const OK: i32 = 0;

    /// The input pattern was invalid, matched no files, or a matched file couldn't be read.
    pub const INPUT_RESOLUTION_FAILED: i32 = 100;

    /// An input file was not a valid JUnit report.
    pub const REPORT_PARSE_FAILED: i32 = 101;

    /// An input report contained data that couldn't be carried over into the regrouped report.
    pub const INVALID_REPORT_DATA: i32 = 102;

    /// Writing the report out produced an error.
    pub const WRITE_OUTPUT_ERROR: i32 = 110;
}
