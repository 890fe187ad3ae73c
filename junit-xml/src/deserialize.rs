// Copyright (c) The junit-regroup Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Read JUnit XML into [`ParsedSuite`]s.

use crate::{
    DeserializeError, DeserializeErrorKind, FailurePayload, ParsedSuite, ParsedTest, TestStatus,
    duration::parse_time_attribute,
};
use quick_xml::{
    Reader,
    events::{BytesStart, Event},
};
use std::mem;

static TESTSUITE_TAG: &[u8] = b"testsuite";
static TESTCASE_TAG: &[u8] = b"testcase";
static PROPERTY_TAG: &[u8] = b"property";
static FAILURE_TAG: &[u8] = b"failure";
static ERROR_TAG: &[u8] = b"error";
static SKIPPED_TAG: &[u8] = b"skipped";

/// Parses a JUnit XML document into a flat list of test suites.
///
/// The root element may be `<testsuites>` or a bare `<testsuite>`. Nested `<testsuite>`
/// elements are flattened, in the order in which they are opened. Elements that aren't part of
/// the model, such as `<system-out>`, are ignored.
///
/// The property bag of each test case holds all of the attributes of its `<testcase>`
/// element, followed by the `name`/`value` pairs of its `<property>` children.
pub fn parse_suites(input: &str) -> Result<Vec<ParsedSuite>, DeserializeError> {
    let input = input.strip_prefix('\u{feff}').unwrap_or(input);
    let mut reader = Reader::from_str(input);
    let mut parser = SuiteParser::default();

    loop {
        let position = reader.buffer_position() as usize;
        let event = reader.read_event().map_err(|error| {
            DeserializeError::new(reader.error_position() as usize, error.into())
        })?;
        if matches!(event, Event::Eof) {
            break;
        }
        parser
            .handle_event(event)
            .map_err(|kind| DeserializeError::new(position, kind))?;
    }

    parser
        .finish()
        .map_err(|kind| DeserializeError::new(input.len(), kind))
}

#[derive(Debug, Default)]
struct SuiteParser {
    saw_root: bool,
    suites: Vec<ParsedSuite>,
    // Indexes into `suites` of the currently open `<testsuite>` elements.
    open_suites: Vec<usize>,
    current_test: Option<ParsedTest>,
    // Set between the start and end tags of a test case's `<failure>` or `<error>`.
    in_failure_body: bool,
    text: String,
}

impl SuiteParser {
    fn handle_event(&mut self, event: Event<'_>) -> Result<(), DeserializeErrorKind> {
        match event {
            Event::Start(e) => {
                self.saw_root = true;
                self.open(&e)
            }
            Event::Empty(e) => {
                self.saw_root = true;
                self.open(&e)?;
                self.close(e.local_name().as_ref())
            }
            Event::End(e) => self.close(e.local_name().as_ref()),
            Event::Text(e) => {
                if self.in_failure_body {
                    self.text.push_str(&e.unescape()?);
                }
                Ok(())
            }
            Event::CData(e) => {
                if self.in_failure_body {
                    let text =
                        std::str::from_utf8(&e).map_err(DeserializeErrorKind::InvalidCData)?;
                    self.text.push_str(text);
                }
                Ok(())
            }
            _ => Ok(()),
        }
    }

    fn open(&mut self, e: &BytesStart<'_>) -> Result<(), DeserializeErrorKind> {
        let name = e.local_name();
        match name.as_ref() {
            tag if tag == TESTSUITE_TAG => self.open_test_suite(e),
            tag if tag == TESTCASE_TAG => self.open_test_case(e),
            tag if tag == PROPERTY_TAG => self.add_property(e),
            tag if tag == FAILURE_TAG => self.set_failure(e, TestStatus::Failed),
            tag if tag == ERROR_TAG => self.set_failure(e, TestStatus::Errored),
            tag if tag == SKIPPED_TAG => {
                if let Some(test) = &mut self.current_test {
                    test.set_status(TestStatus::Skipped);
                }
                Ok(())
            }
            _ => Ok(()),
        }
    }

    fn close(&mut self, tag: &[u8]) -> Result<(), DeserializeErrorKind> {
        if tag == TESTSUITE_TAG {
            self.open_suites.pop();
        } else if tag == TESTCASE_TAG {
            if let (Some(test), Some(&index)) = (self.current_test.take(), self.open_suites.last())
            {
                self.suites[index].add_test(test);
            }
        } else if tag == FAILURE_TAG || tag == ERROR_TAG {
            if mem::take(&mut self.in_failure_body) {
                let body = mem::take(&mut self.text);
                if let Some(failure) = self.current_test.as_mut().and_then(|t| t.failure.as_mut()) {
                    failure.body = body;
                }
            }
        }
        Ok(())
    }

    fn open_test_suite(&mut self, e: &BytesStart<'_>) -> Result<(), DeserializeErrorKind> {
        let mut suite = ParsedSuite::new(String::new());
        for (key, value) in attributes(e)? {
            match key.as_str() {
                "name" => suite.name = value,
                "package" => {
                    suite.set_package(value);
                }
                _ => {}
            }
        }

        self.open_suites.push(self.suites.len());
        self.suites.push(suite);
        Ok(())
    }

    fn open_test_case(&mut self, e: &BytesStart<'_>) -> Result<(), DeserializeErrorKind> {
        let attributes = attributes(e)?;
        let name = attributes
            .iter()
            .find(|(key, _)| key == "name")
            .map(|(_, value)| value.clone())
            .unwrap_or_default();

        if let Some(parent) = &self.current_test {
            return Err(DeserializeErrorKind::NestedTestCase {
                name,
                parent: parent.name.clone(),
            });
        }
        if self.open_suites.is_empty() {
            return Err(DeserializeErrorKind::TestCaseOutsideSuite { name });
        }

        let mut test = ParsedTest::new(name, TestStatus::Passed);
        for (key, value) in attributes {
            match key.as_str() {
                "classname" => {
                    test.set_classname(value.clone());
                }
                "time" => {
                    let duration = parse_time_attribute(&value).map_err(|error| {
                        DeserializeErrorKind::InvalidTime {
                            name: test.name.clone(),
                            error,
                        }
                    })?;
                    test.set_duration(duration);
                }
                _ => {}
            }
            test.add_property(key, value);
        }

        self.current_test = Some(test);
        Ok(())
    }

    fn add_property(&mut self, e: &BytesStart<'_>) -> Result<(), DeserializeErrorKind> {
        let mut name = None;
        let mut value = String::new();
        for (key, attr_value) in attributes(e)? {
            match key.as_str() {
                "name" => name = Some(attr_value),
                "value" => value = attr_value,
                _ => {}
            }
        }
        let Some(name) = name else {
            return Ok(());
        };

        if let Some(test) = &mut self.current_test {
            test.add_property(name, value);
        } else if let Some(&index) = self.open_suites.last() {
            self.suites[index].add_property(name, value);
        }
        Ok(())
    }

    fn set_failure(
        &mut self,
        e: &BytesStart<'_>,
        status: TestStatus,
    ) -> Result<(), DeserializeErrorKind> {
        let Some(test) = &mut self.current_test else {
            // Suite-level failures aren't part of the model.
            return Ok(());
        };

        let mut payload = FailurePayload::default();
        for (key, value) in attributes(e)? {
            match key.as_str() {
                "message" => payload.message = value,
                "type" => payload.ty = value,
                _ => {}
            }
        }
        test.set_status(status).set_failure(payload);

        self.text.clear();
        self.in_failure_body = true;
        Ok(())
    }

    fn finish(self) -> Result<Vec<ParsedSuite>, DeserializeErrorKind> {
        if !self.saw_root {
            return Err(DeserializeErrorKind::MissingRoot);
        }
        if !self.open_suites.is_empty() || self.current_test.is_some() {
            return Err(DeserializeErrorKind::UnexpectedEof);
        }
        Ok(self.suites)
    }
}

fn attributes(e: &BytesStart<'_>) -> Result<Vec<(String, String)>, quick_xml::Error> {
    e.attributes()
        .map(|attr| {
            let attr = attr?;
            let key = String::from_utf8_lossy(attr.key.local_name().as_ref()).into_owned();
            let value = attr.unescape_value()?.into_owned();
            Ok((key, value))
        })
        .collect()
}
