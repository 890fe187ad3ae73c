// Copyright (c) The junit-regroup Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{
    ExpectedError, OutputContext, RegroupExitCode,
    output::{OutputOpts, OutputWriter},
};
use camino::Utf8PathBuf;
use clap::{Args, Parser};
use junit_regroup_runner::{
    loader::{GlobLoader, ReportLoader},
    regroup::{DEFAULT_GROUP_PROPERTY, GroupBy},
    render::{ReportRenderer, XmlRenderer},
    report::build_report,
};
use junit_xml::SerializeOptions;
use std::io::Write;
use tracing::debug;

/// Regroup JUnit XML test reports by source file.
///
/// Reads every report matching the input pattern, regroups the test cases by the file they
/// belong to, and writes a single report to standard output. Suites and test cases are ordered
/// by duration, slowest first.
#[derive(Debug, Parser)]
#[command(version, name = "junit-regroup")]
pub struct JunitRegroupApp {
    /// Glob pattern matching the JUnit reports to read (e.g. 'reports/**/*.xml')
    #[arg(long = "in", value_name = "PATTERN", env = "JUNIT_REGROUP_IN")]
    input: String,

    #[command(flatten)]
    group_opts: GroupOpts,

    /// Write the report to this file instead of standard output
    #[arg(long, short = 'o', value_name = "PATH")]
    output: Option<Utf8PathBuf>,

    /// Start the report with an XML declaration
    #[arg(long)]
    xml_declaration: bool,

    #[command(flatten)]
    output_opts: OutputOpts,
}

impl JunitRegroupApp {
    /// Initializes the output context.
    pub fn init_output(&self) -> OutputContext {
        self.output_opts.init()
    }

    /// Executes the app.
    ///
    /// Returns the exit code of the process on success.
    pub fn exec(self, output_writer: &mut OutputWriter) -> Result<i32, ExpectedError> {
        let group_by = self.group_opts.group_by();

        let suites = GlobLoader::new().load(&self.input)?;
        let report = build_report(&suites, &group_by)?;
        debug!(
            "writing {} suites ({} tests, {} failures, {} errors, {} skipped)",
            report.test_suites.len(),
            report.tests,
            report.failures,
            report.errors,
            report.skipped,
        );

        let renderer = XmlRenderer::new(SerializeOptions {
            xml_declaration: self.xml_declaration,
        });
        let bytes = renderer.render(&report)?;

        match &self.output {
            Some(path) => {
                std::fs::write(path, &bytes)
                    .map_err(|error| ExpectedError::write_output_file(path, error))?;
            }
            None => {
                let mut writer = output_writer.stdout_writer();
                writer
                    .write_all(&bytes)
                    .and_then(|()| writer.flush())
                    .map_err(|error| ExpectedError::WriteOutput { error })?;
            }
        }

        Ok(RegroupExitCode::OK)
    }
}

#[derive(Debug, Args)]
#[command(next_help_heading = "Grouping options")]
struct GroupOpts {
    /// Test case property to group by
    #[arg(
        long,
        value_name = "NAME",
        env = "JUNIT_REGROUP_PROPERTY",
        default_value = DEFAULT_GROUP_PROPERTY,
        conflicts_with = "by_suite_name"
    )]
    group_property: String,

    /// Group by the name of the suite each test case was read from
    ///
    /// Use this to re-aggregate a report produced by junit-regroup.
    #[arg(long)]
    by_suite_name: bool,
}

impl GroupOpts {
    fn group_by(&self) -> GroupBy {
        if self.by_suite_name {
            GroupBy::SuiteName
        } else {
            GroupBy::Property(self.group_property.clone())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_app() {
        JunitRegroupApp::command().debug_assert();
    }

    #[test]
    fn group_opts() {
        let app = JunitRegroupApp::try_parse_from(["junit-regroup", "--in", "*.xml"])
            .expect("arguments are valid");
        assert_eq!(app.group_opts.group_by(), GroupBy::default());

        let app = JunitRegroupApp::try_parse_from([
            "junit-regroup",
            "--in",
            "*.xml",
            "--group-property",
            "owner",
        ])
        .expect("arguments are valid");
        assert_eq!(
            app.group_opts.group_by(),
            GroupBy::Property("owner".to_owned())
        );

        let app =
            JunitRegroupApp::try_parse_from(["junit-regroup", "--in", "*.xml", "--by-suite-name"])
                .expect("arguments are valid");
        assert_eq!(app.group_opts.group_by(), GroupBy::SuiteName);
    }

    #[test]
    fn invalid_arguments() {
        let error = JunitRegroupApp::try_parse_from([
            "junit-regroup",
            "--in",
            "*.xml",
            "--by-suite-name",
            "--group-property",
            "owner",
        ])
        .expect_err("options conflict");
        assert_eq!(error.kind(), clap::error::ErrorKind::ArgumentConflict);
        assert_eq!(error.exit_code(), 2);
    }
}
