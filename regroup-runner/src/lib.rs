// Copyright (c) The junit-regroup Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

#![warn(missing_docs)]

//! Core functionality for junit-regroup.
//!
//! The flow of a run is linear:
//!
//! 1. a [`ReportLoader`](loader::ReportLoader) resolves a pattern into parsed suites,
//! 2. [`build_report`](report::build_report) regroups the test cases and builds a sorted
//!    [`Report`](junit_xml::Report),
//! 3. a [`ReportRenderer`](render::ReportRenderer) turns the report into bytes.

pub mod aggregate;
pub mod errors;
pub mod loader;
pub mod regroup;
pub mod render;
pub mod report;
pub mod sort;
