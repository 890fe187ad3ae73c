// Copyright (c) The junit-regroup Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Regroup JUnit XML test reports by source file.
//!
//! This crate contains the command-line interface. For the underlying functionality, see
//! `junit-regroup-runner`.

#![warn(missing_docs)]

mod dispatch;
mod errors;
mod exit_codes;
mod output;
#[cfg(test)]
mod tests_integration;

#[doc(hidden)]
pub use dispatch::*;
#[doc(hidden)]
pub use errors::*;
pub use exit_codes::RegroupExitCode;
#[doc(hidden)]
pub use output::{OutputContext, OutputWriter, StderrStyles};
