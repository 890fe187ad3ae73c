// Copyright (c) The junit-regroup Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Read JUnit reports into a flat test model, and write the regrouped report back out.
//!
//! Two models live here:
//!
//! * [`ParsedSuite`] and [`ParsedTest`] describe reports as they are read from disk, using
//!   [`parse_suites`].
//! * [`Report`], [`TestSuite`] and [`TestCase`] describe the report that is written out, using
//!   [`Report::serialize`].

#![warn(missing_docs)]

mod deserialize;
mod duration;
mod errors;
mod parsed;
mod report;
mod serialize;

pub use deserialize::parse_suites;
pub use duration::{format_seconds, parse_seconds, parse_time_attribute};
pub use errors::*;
pub use parsed::*;
pub use report::*;
