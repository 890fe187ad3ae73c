// Copyright (c) The junit-regroup Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests
//!
//! These run the app in-process against reports written to a temporary directory, with standard
//! output captured through [`OutputWriter::Test`].

use crate::{ExpectedError, JunitRegroupApp, OutputWriter, RegroupExitCode};
use camino::Utf8Path;
use camino_tempfile::Utf8TempDir;
use clap::Parser;
use indoc::indoc;
use pretty_assertions::assert_eq;

static FILE_A: &str = indoc! {r#"
    <?xml version="1.0" encoding="UTF-8"?>
    <testsuites>
      <testsuite name="example.com/pkg" tests="2">
        <testcase name="TestA1" classname="example.com/pkg" time="0.25" file="pkg/a_test.go"/>
        <testcase name="TestB" classname="example.com/pkg" time="1.0" file="pkg/b_test.go">
          <failure message="boom" type="assertion">b_test.go:7: got 2</failure>
        </testcase>
      </testsuite>
    </testsuites>
"#};

static FILE_B: &str = indoc! {r#"
    <testsuite name="example.com/pkg" tests="2">
      <testcase name="TestA2" classname="example.com/pkg" time="0.75" file="pkg/a_test.go"/>
      <testcase name="TestSkip" classname="example.com/pkg" time="0">
        <skipped message="short mode"/>
      </testcase>
    </testsuite>
"#};

// The one-space base indent can't be expressed with indoc.
static EXPECTED: &str = r#" <testsuites tests="4" failures="1" errors="0" skipped="1">
   <testsuite name="pkg/a_test.go" tests="2" failures="0" errors="0" skipped="0" time="1.000000">
     <testcase name="TestA2" classname="example.com/pkg" time="0.750000" status="passed"/>
     <testcase name="TestA1" classname="example.com/pkg" time="0.250000" status="passed"/>
   </testsuite>
   <testsuite name="pkg/b_test.go" tests="1" failures="1" errors="0" skipped="0" time="1.000000">
     <testcase name="TestB" classname="example.com/pkg" time="1.000000" status="failed">
       <failure message="boom" type="assertion">b_test.go:7: got 2</failure>
     </testcase>
   </testsuite>
   <testsuite name="" tests="1" failures="0" errors="0" skipped="1" time="0.000000">
     <testcase name="TestSkip" classname="example.com/pkg" time="0.000000" status="skipped">
       <skipped/>
     </testcase>
   </testsuite>
 </testsuites>
"#;

fn write_inputs(dir: &Utf8Path) {
    std::fs::create_dir_all(dir.join("reports/unit")).expect("creating report dirs succeeds");
    std::fs::write(dir.join("reports/a.xml"), FILE_A).expect("writing a.xml succeeds");
    std::fs::write(dir.join("reports/unit/b.xml"), FILE_B).expect("writing b.xml succeeds");
    std::fs::write(dir.join("reports/notes.txt"), "not a report").expect("writing notes succeeds");
}

fn run(args: &[&str]) -> (Result<i32, ExpectedError>, OutputWriter) {
    let app = JunitRegroupApp::try_parse_from(
        std::iter::once("junit-regroup").chain(args.iter().copied()),
    )
    .expect("arguments are valid");
    let mut output = OutputWriter::new_test();
    let result = app.exec(&mut output);
    (result, output)
}

#[test]
fn regroup_to_stdout() {
    let dir = Utf8TempDir::new().expect("creating temp dir succeeds");
    write_inputs(dir.path());

    let pattern = format!("{}/reports/**/*.xml", dir.path());
    let (result, output) = run(&["--in", &pattern]);

    assert_eq!(result.expect("run succeeds"), RegroupExitCode::OK);
    assert_eq!(output.stdout().expect("stdout is captured"), EXPECTED);
}

#[test]
fn regroup_to_file_with_declaration() {
    let dir = Utf8TempDir::new().expect("creating temp dir succeeds");
    write_inputs(dir.path());

    let pattern = format!("{}/reports/**/*.xml", dir.path());
    let out_path = dir.path().join("regrouped.xml");
    let (result, output) = run(&[
        "--in",
        &pattern,
        "--output",
        out_path.as_str(),
        "--xml-declaration",
    ]);

    assert_eq!(result.expect("run succeeds"), RegroupExitCode::OK);
    assert_eq!(output.stdout().expect("stdout is captured"), "");

    let written = std::fs::read_to_string(&out_path).expect("report was written");
    assert_eq!(
        written,
        format!("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n{EXPECTED}")
    );
}

#[test]
fn reaggregate_own_output() {
    let dir = Utf8TempDir::new().expect("creating temp dir succeeds");
    write_inputs(dir.path());

    let pattern = format!("{}/reports/**/*.xml", dir.path());
    let out_path = dir.path().join("regrouped.xml");
    let (result, _) = run(&["--in", &pattern, "-o", out_path.as_str()]);
    result.expect("first run succeeds");

    let (result, output) = run(&["--in", out_path.as_str(), "--by-suite-name"]);
    assert_eq!(result.expect("second run succeeds"), RegroupExitCode::OK);
    assert_eq!(output.stdout().expect("stdout is captured"), EXPECTED);
}

#[test]
fn group_by_other_property() {
    let dir = Utf8TempDir::new().expect("creating temp dir succeeds");
    let input = indoc! {r#"
        <testsuite name="s">
          <testcase name="TestOne" classname="c" time="1">
            <properties>
              <property name="owner" value="storage"/>
            </properties>
          </testcase>
          <testcase name="TestTwo" classname="c" time="2" owner="network"/>
        </testsuite>
    "#};
    std::fs::write(dir.path().join("report.xml"), input).expect("writing report succeeds");

    let pattern = format!("{}/*.xml", dir.path());
    let (result, output) = run(&["--in", &pattern, "--group-property", "owner"]);
    assert_eq!(result.expect("run succeeds"), RegroupExitCode::OK);

    let stdout = output.stdout().expect("stdout is captured");
    let network = stdout
        .find(r#"<testsuite name="network""#)
        .expect("network suite is present");
    let storage = stdout
        .find(r#"<testsuite name="storage""#)
        .expect("storage suite is present");
    assert!(network < storage, "slower suite comes first:\n{stdout}");
}

#[test]
fn no_matching_files() {
    let dir = Utf8TempDir::new().expect("creating temp dir succeeds");

    let pattern = format!("{}/**/*.xml", dir.path());
    let (result, output) = run(&["--in", &pattern]);

    let error = result.expect_err("nothing matches");
    assert_eq!(
        error.process_exit_code(),
        RegroupExitCode::INPUT_RESOLUTION_FAILED
    );
    assert_eq!(output.stdout().expect("stdout is captured"), "");
}

#[test]
fn malformed_report() {
    let dir = Utf8TempDir::new().expect("creating temp dir succeeds");
    write_inputs(dir.path());
    std::fs::write(
        dir.path().join("reports/broken.xml"),
        "<testsuite name=\"s\"><testcase name=\"t\"></testsuite>",
    )
    .expect("writing broken report succeeds");

    let pattern = format!("{}/reports/**/*.xml", dir.path());
    let (result, output) = run(&["--in", &pattern]);

    let error = result.expect_err("report is malformed");
    assert_eq!(
        error.process_exit_code(),
        RegroupExitCode::REPORT_PARSE_FAILED
    );
    assert_eq!(output.stdout().expect("stdout is captured"), "");
}

#[test]
fn invalid_time() {
    let dir = Utf8TempDir::new().expect("creating temp dir succeeds");
    std::fs::write(
        dir.path().join("report.xml"),
        r#"<testsuite name="s"><testcase name="t" time="eventually"/></testsuite>"#,
    )
    .expect("writing report succeeds");

    let pattern = format!("{}/report.xml", dir.path());
    let (result, _) = run(&["--in", &pattern]);

    let error = result.expect_err("time is invalid");
    assert_eq!(
        error.process_exit_code(),
        RegroupExitCode::REPORT_PARSE_FAILED
    );
}
