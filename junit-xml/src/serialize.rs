// Copyright (c) The junit-regroup Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Serialize a `Report`.

use crate::{
    FailurePayload, Report, SerializeError, SerializeOptions, TestCase, TestCaseResult, TestSuite,
};
use quick_xml::{
    Writer,
    escape::escape,
    events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event},
};
use std::{
    borrow::Cow,
    io::{self, Write},
};

static TESTSUITES_TAG: &str = "testsuites";
static TESTSUITE_TAG: &str = "testsuite";
static TESTCASE_TAG: &str = "testcase";
static FAILURE_TAG: &str = "failure";
static ERROR_TAG: &str = "error";
static SKIPPED_TAG: &str = "skipped";

// Every line starts with a single space, and each nesting level adds two more.
static BASE_INDENT: &[u8] = b" ";
static LEVEL_INDENT: &[u8] = b"  ";

pub(crate) fn serialize_report(
    report: &Report,
    writer: impl io::Write,
    options: &SerializeOptions,
) -> Result<(), SerializeError> {
    let mut writer = IndentWriter::new(writer);

    if options.xml_declaration {
        let decl = BytesDecl::new("1.0", Some("UTF-8"), None);
        writer.inner.write_event(Event::Decl(decl))?;
        writer.started = true;
    }

    serialize_report_impl(report, &mut writer)?;

    // Add a trailing newline.
    writer.inner.get_mut().write_all(b"\n")?;
    Ok(())
}

fn serialize_report_impl(
    report: &Report,
    writer: &mut IndentWriter<impl io::Write>,
) -> Result<(), SerializeError> {
    // Use the destructuring syntax to ensure that all fields are handled.
    let Report {
        tests,
        failures,
        errors,
        skipped,
        test_suites,
    } = report;

    let mut testsuites_tag = BytesStart::new(TESTSUITES_TAG);
    push_attributes(
        &mut testsuites_tag,
        [
            ("tests", tests.to_string().as_str()),
            ("failures", failures.to_string().as_str()),
            ("errors", errors.to_string().as_str()),
            ("skipped", skipped.to_string().as_str()),
        ],
    );

    writer.indent(0)?;
    if test_suites.is_empty() {
        writer.inner.write_event(Event::Empty(testsuites_tag))?;
        return Ok(());
    }

    writer.inner.write_event(Event::Start(testsuites_tag))?;
    for test_suite in test_suites {
        serialize_test_suite(test_suite, 1, writer)?;
    }
    serialize_end_tag(TESTSUITES_TAG, 0, writer)?;

    Ok(())
}

fn serialize_test_suite(
    test_suite: &TestSuite,
    depth: usize,
    writer: &mut IndentWriter<impl io::Write>,
) -> Result<(), SerializeError> {
    // Use the destructuring syntax to ensure that all fields are handled.
    let TestSuite {
        name,
        tests,
        failures,
        errors,
        skipped,
        time,
        test_cases,
    } = test_suite;

    let mut testsuite_tag = BytesStart::new(TESTSUITE_TAG);
    push_attributes(
        &mut testsuite_tag,
        [
            ("name", name.as_str()),
            ("tests", tests.to_string().as_str()),
            ("failures", failures.to_string().as_str()),
            ("errors", errors.to_string().as_str()),
            ("skipped", skipped.to_string().as_str()),
            ("time", time.as_str()),
        ],
    );

    writer.indent(depth)?;
    if test_cases.is_empty() {
        writer.inner.write_event(Event::Empty(testsuite_tag))?;
        return Ok(());
    }

    writer.inner.write_event(Event::Start(testsuite_tag))?;
    for test_case in test_cases {
        serialize_test_case(test_case, depth + 1, writer)?;
    }
    serialize_end_tag(TESTSUITE_TAG, depth, writer)?;

    Ok(())
}

fn serialize_test_case(
    test_case: &TestCase,
    depth: usize,
    writer: &mut IndentWriter<impl io::Write>,
) -> Result<(), SerializeError> {
    let TestCase {
        name,
        classname,
        time,
        result,
    } = test_case;

    let mut testcase_tag = BytesStart::new(TESTCASE_TAG);
    push_attributes(
        &mut testcase_tag,
        [
            ("name", name.as_str()),
            ("classname", classname.as_str()),
            ("time", time.as_str()),
            ("status", result.status().as_str()),
        ],
    );

    writer.indent(depth)?;
    match result {
        TestCaseResult::Pass => {
            writer.inner.write_event(Event::Empty(testcase_tag))?;
            return Ok(());
        }
        TestCaseResult::Failure(payload) => {
            writer.inner.write_event(Event::Start(testcase_tag))?;
            serialize_payload(payload, FAILURE_TAG, depth + 1, writer)?;
        }
        TestCaseResult::Error(payload) => {
            writer.inner.write_event(Event::Start(testcase_tag))?;
            serialize_payload(payload, ERROR_TAG, depth + 1, writer)?;
        }
        TestCaseResult::Skipped => {
            writer.inner.write_event(Event::Start(testcase_tag))?;
            writer.indent(depth + 1)?;
            writer.inner.write_event(Event::Empty(BytesStart::new(SKIPPED_TAG)))?;
        }
    }
    serialize_end_tag(TESTCASE_TAG, depth, writer)?;

    Ok(())
}

fn serialize_payload(
    payload: &FailurePayload,
    tag_name: &'static str,
    depth: usize,
    writer: &mut IndentWriter<impl io::Write>,
) -> Result<(), SerializeError> {
    let FailurePayload { message, ty, body } = payload;

    let mut tag = BytesStart::new(tag_name);
    push_attributes(
        &mut tag,
        [("message", message.as_str()), ("type", ty.as_str())],
    );

    writer.indent(depth)?;
    if body.is_empty() {
        writer.inner.write_event(Event::Empty(tag))?;
    } else {
        // The body is written on the same line as the tags so that it round-trips verbatim.
        writer.inner.write_event(Event::Start(tag))?;
        let body = escape_text(body);
        writer.inner.write_event(Event::Text(BytesText::from_escaped(body)))?;
        writer.inner.write_event(Event::End(BytesEnd::new(tag_name)))?;
    }

    Ok(())
}

/// Adds attributes to `tag`, escaping their values.
///
/// Tabs and line breaks are written as character references so that XML readers, which
/// normalize literal whitespace in attribute values to spaces, see the original text.
fn push_attributes<'a>(
    tag: &mut BytesStart<'_>,
    attributes: impl IntoIterator<Item = (&'a str, &'a str)>,
) {
    for (key, value) in attributes {
        let value = escape_attribute(value);
        tag.push_attribute((key.as_bytes(), value.as_bytes()));
    }
}

fn escape_attribute(value: &str) -> Cow<'_, str> {
    let escaped = escape(value);
    if !escaped.contains(['\t', '\n', '\r']) {
        return escaped;
    }

    let mut out = String::with_capacity(escaped.len() + 8);
    for c in escaped.chars() {
        match c {
            '\t' => out.push_str("&#x9;"),
            '\n' => out.push_str("&#xA;"),
            '\r' => out.push_str("&#xD;"),
            c => out.push(c),
        }
    }
    Cow::Owned(out)
}

// XML readers turn `\r` and `\r\n` in text into `\n`.
fn escape_text(body: &str) -> Cow<'_, str> {
    let escaped = escape(body);
    if escaped.contains('\r') {
        Cow::Owned(escaped.replace('\r', "&#xD;"))
    } else {
        escaped
    }
}

fn serialize_end_tag(
    tag_name: &'static str,
    depth: usize,
    writer: &mut IndentWriter<impl io::Write>,
) -> Result<(), SerializeError> {
    writer.indent(depth)?;
    writer.inner.write_event(Event::End(BytesEnd::new(tag_name)))?;
    Ok(())
}

/// Wraps a quick-xml writer and places every element on its own line.
///
/// quick-xml's built-in indentation can't express a base indent, so indentation is written
/// directly to the underlying writer instead.
struct IndentWriter<W> {
    inner: Writer<W>,
    started: bool,
}

impl<W: io::Write> IndentWriter<W> {
    fn new(writer: W) -> Self {
        Self {
            inner: Writer::new(writer),
            started: false,
        }
    }

    fn indent(&mut self, depth: usize) -> io::Result<()> {
        let out = self.inner.get_mut();
        if self.started {
            out.write_all(b"\n")?;
        }
        self.started = true;
        out.write_all(BASE_INDENT)?;
        for _ in 0..depth {
            out.write_all(LEVEL_INDENT)?;
        }
        Ok(())
    }
}
