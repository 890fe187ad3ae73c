// Copyright (c) The junit-regroup Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Turn a finished report into bytes.

use crate::errors::RenderError;
use junit_xml::{Report, SerializeOptions};

/// Renders a finished [`Report`].
pub trait ReportRenderer {
    /// Renders `report` into a complete document.
    fn render(&self, report: &Report) -> Result<Vec<u8>, RenderError>;
}

/// A [`ReportRenderer`] that produces JUnit XML.
#[derive(Clone, Copy, Debug, Default)]
pub struct XmlRenderer {
    options: SerializeOptions,
}

impl XmlRenderer {
    /// Creates a new `XmlRenderer` with the given options.
    pub fn new(options: SerializeOptions) -> Self {
        Self { options }
    }
}

impl ReportRenderer for XmlRenderer {
    fn render(&self, report: &Report) -> Result<Vec<u8>, RenderError> {
        let mut buf = Vec::new();
        report
            .serialize_with_options(&mut buf, &self.options)
            .map_err(RenderError::Xml)?;
        Ok(buf)
    }
}
