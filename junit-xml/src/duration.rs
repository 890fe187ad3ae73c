// Copyright (c) The junit-regroup Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Conversions between [`Duration`] and the decimal-seconds strings used in JUnit reports.

use crate::{DurationParseError, DurationParseReason};
use std::time::Duration;

const NANOS_PER_MICRO: u128 = 1_000;
const MICROS_PER_SEC: u128 = 1_000_000;

/// Renders a duration as seconds with exactly six fractional digits.
///
/// The value is rounded half-up to the nearest microsecond, so `1.5s` renders as `"1.500000"`
/// and `0.0000005s` renders as `"0.000001"`. This is the canonical form of every `time`
/// attribute in the regrouped report.
pub fn format_seconds(duration: Duration) -> String {
    let micros = (duration.as_nanos() + NANOS_PER_MICRO / 2) / NANOS_PER_MICRO;
    format!("{}.{:06}", micros / MICROS_PER_SEC, micros % MICROS_PER_SEC)
}

/// Parses a string of decimal seconds, such as `"1.500000"`, into a duration.
///
/// Parsing is exact: digits past nanosecond precision are truncated, and no floating-point
/// rounding is involved. Signs, exponents, and whitespace are rejected.
pub fn parse_seconds(input: &str) -> Result<Duration, DurationParseError> {
    let err = |reason| DurationParseError::new(input, reason);

    let (whole, fraction) = input.split_once('.').unwrap_or((input, ""));
    if whole.is_empty() && fraction.is_empty() {
        return Err(err(DurationParseReason::Empty));
    }
    if input.starts_with('-') {
        return Err(err(DurationParseReason::Negative));
    }
    if !whole.bytes().chain(fraction.bytes()).all(|b| b.is_ascii_digit()) {
        return Err(err(DurationParseReason::InvalidCharacter));
    }

    let secs = if whole.is_empty() {
        0
    } else {
        whole
            .parse::<u64>()
            .map_err(|_| err(DurationParseReason::Overflow))?
    };

    let mut nanos = 0u32;
    let mut scale = 100_000_000u32;
    for digit in fraction.bytes().take(9) {
        nanos += u32::from(digit - b'0') * scale;
        scale /= 10;
    }

    Ok(Duration::new(secs, nanos))
}

/// Parses the `time` attribute of a test case as it appears in input reports.
///
/// Input reports come from many different tools, so this is more lenient than
/// [`parse_seconds`]:
///
/// * surrounding whitespace and `,` thousands separators are ignored,
/// * an empty attribute is treated as zero,
/// * floating-point notation such as `1e-3` is accepted,
/// * durations with units, such as `1m 30s` or `250ms`, are accepted.
///
/// Negative and non-finite values are rejected.
pub fn parse_time_attribute(input: &str) -> Result<Duration, DurationParseError> {
    let cleaned: String = input.trim().chars().filter(|&c| c != ',').collect();
    if cleaned.is_empty() {
        return Ok(Duration::ZERO);
    }

    match parse_seconds(&cleaned) {
        Ok(duration) => return Ok(duration),
        Err(error) if error.reason() == DurationParseReason::Negative => {
            return Err(DurationParseError::new(input, DurationParseReason::Negative));
        }
        Err(_) => {}
    }

    if let Ok(secs) = cleaned.parse::<f64>() {
        if !secs.is_finite() {
            return Err(DurationParseError::new(input, DurationParseReason::NotFinite));
        }
        if secs < 0.0 {
            return Err(DurationParseError::new(input, DurationParseReason::Negative));
        }
        return Duration::try_from_secs_f64(secs)
            .map_err(|_| DurationParseError::new(input, DurationParseReason::Overflow));
    }

    humantime::parse_duration(&cleaned)
        .map_err(|_| DurationParseError::new(input, DurationParseReason::InvalidCharacter))
}
