// Copyright (c) The junit-regroup Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ordering by rendered duration.

use crate::errors::SortError;
use junit_xml::parse_seconds;
use std::time::Duration;

/// Stable-sorts `items` by duration, longest first.
///
/// Durations are read back from their rendered form (as produced by
/// [`format_seconds`](junit_xml::format_seconds)), so items that differ only below the
/// microsecond compare equal and keep their relative order.
///
/// If any rendered duration fails to parse, `items` is left untouched.
pub fn sort_by_duration_desc<T>(
    items: &mut Vec<T>,
    rendered: impl Fn(&T) -> &str,
) -> Result<(), SortError> {
    let keys = items
        .iter()
        .map(|item| {
            let rendered = rendered(item);
            parse_seconds(rendered).map_err(|error| SortError::new(rendered, error))
        })
        .collect::<Result<Vec<Duration>, _>>()?;

    let mut keyed: Vec<_> = keys.into_iter().zip(items.drain(..)).collect();
    // sort_by is stable.
    keyed.sort_by(|(a, _), (b, _)| b.cmp(a));
    items.extend(keyed.into_iter().map(|(_, item)| item));

    Ok(())
}
