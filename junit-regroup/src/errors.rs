// Copyright (c) The junit-regroup Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{RegroupExitCode, StderrStyles, output::NO_HEADING_TARGET};
use camino::{Utf8Path, Utf8PathBuf};
use junit_regroup_runner::errors::{AggregateError, LoadError, RenderError};
use junit_xml::DeserializeError;
use miette::{Diagnostic, NamedSource, SourceSpan};
use owo_colors::OwoColorize;
use std::error::Error;
use thiserror::Error;

// Note that the #[error()] strings are mostly placeholder messages -- the expected way to print out
// errors is with the display_to_stderr method, which colorizes errors.

/// An expected failure while regrouping reports.
#[derive(Debug, Error)]
#[doc(hidden)]
pub enum ExpectedError {
    #[error("error loading input reports")]
    Load(#[from] LoadError),
    #[error("error building regrouped report")]
    Aggregate(#[from] AggregateError),
    #[error("error rendering regrouped report")]
    Render(#[from] RenderError),
    #[error("error writing report to standard output")]
    WriteOutput {
        #[source]
        error: std::io::Error,
    },
    #[error("error writing report to `{path}`")]
    WriteOutputFile {
        path: Utf8PathBuf,
        #[source]
        error: std::io::Error,
    },
}

impl ExpectedError {
    pub(crate) fn write_output_file(path: &Utf8Path, error: std::io::Error) -> Self {
        Self::WriteOutputFile {
            path: path.to_owned(),
            error,
        }
    }

    /// Returns the exit code for the process.
    pub fn process_exit_code(&self) -> i32 {
        match self {
            Self::Load(LoadError::Parse { .. } | LoadError::InvalidUtf8 { .. }) => {
                RegroupExitCode::REPORT_PARSE_FAILED
            }
            Self::Load(_) => RegroupExitCode::INPUT_RESOLUTION_FAILED,
            Self::Aggregate(_) => RegroupExitCode::INVALID_REPORT_DATA,
            Self::Render(_) | Self::WriteOutput { .. } | Self::WriteOutputFile { .. } => {
                RegroupExitCode::WRITE_OUTPUT_ERROR
            }
        }
    }

    /// Displays this error to stderr.
    pub fn display_to_stderr(&self, styles: &StderrStyles) {
        let mut next_error = match self {
            Self::Load(error) => display_load_error(error, styles),
            Self::Aggregate(error) => {
                tracing::error!("{error}");
                error.source()
            }
            Self::Render(error) => {
                tracing::error!("{error}");
                error.source()
            }
            Self::WriteOutput { error } => {
                tracing::error!("error writing report to standard output");
                Some(error as &dyn Error)
            }
            Self::WriteOutputFile { path, error } => {
                tracing::error!("error writing report to `{}`", path.style(styles.bold));
                Some(error as &dyn Error)
            }
        };

        while let Some(err) = next_error {
            tracing::error!(target: NO_HEADING_TARGET, "\nCaused by:\n  {}", err);
            next_error = err.source();
        }
    }
}

fn display_load_error<'a>(error: &'a LoadError, styles: &StderrStyles) -> Option<&'a dyn Error> {
    match error {
        LoadError::InvalidPattern { pattern, error } => {
            tracing::error!("invalid input pattern `{}`", pattern.style(styles.bold));
            Some(error as &dyn Error)
        }
        LoadError::NoMatches { pattern } => {
            tracing::error!("no files matched input pattern `{}`", pattern.style(styles.bold));
            None
        }
        LoadError::WalkDir { dir, error } => {
            tracing::error!("error searching `{}` for input files", dir.style(styles.bold));
            Some(error as &dyn Error)
        }
        LoadError::Read { path, error } => {
            tracing::error!("error reading `{}`", path.style(styles.bold));
            Some(error as &dyn Error)
        }
        LoadError::InvalidUtf8 { path, error } => {
            tracing::error!("`{}` is not valid UTF-8", path.style(styles.bold));
            Some(error as &dyn Error)
        }
        LoadError::Parse {
            path,
            contents,
            error,
        } => {
            tracing::error!("error parsing JUnit report `{}`", path.style(styles.bold));
            let report = miette::Report::new(ReportParseDiagnostic::new(contents, error))
                .with_source_code(NamedSource::new(path.as_str(), contents.clone()));
            tracing::error!(target: NO_HEADING_TARGET, "{:?}", report);
            None
        }
        other => {
            tracing::error!("{other}");
            other.source()
        }
    }
}

/// Points at the place in an input report where parsing failed.
#[derive(Debug, Error, Diagnostic)]
#[error("invalid JUnit report")]
struct ReportParseDiagnostic {
    #[label("{}", message)]
    span: SourceSpan,
    message: String,
}

impl ReportParseDiagnostic {
    fn new(contents: &str, error: &DeserializeError) -> Self {
        // Fold the whole cause chain into the label, since the report is printed on its own.
        let mut message = error.kind().to_string();
        let mut source = error.kind().source();
        while let Some(err) = source {
            message.push_str(": ");
            message.push_str(&err.to_string());
            source = err.source();
        }

        Self {
            span: SourceSpan::from(error.position().min(contents.len())),
            message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use junit_xml::parse_suites;
    use pretty_assertions::assert_eq;

    #[test]
    fn parse_diagnostic_folds_causes() {
        let contents = r#"<testsuite name="s"><testcase name="slow" time="-3"/></testsuite>"#;
        let error = parse_suites(contents).expect_err("time is negative");

        let diagnostic = ReportParseDiagnostic::new(contents, &error);
        assert_eq!(
            diagnostic.message,
            format!(
                "{}: {}",
                error.kind(),
                error.kind().source().expect("invalid time has a source")
            )
        );
        assert_eq!(diagnostic.span.offset(), error.position());
    }

    #[test]
    fn exit_codes_by_error_class() {
        let no_matches = ExpectedError::Load(LoadError::NoMatches {
            pattern: "*.xml".to_owned(),
        });
        assert_eq!(
            no_matches.process_exit_code(),
            RegroupExitCode::INPUT_RESOLUTION_FAILED
        );

        let contents = "<testsuite>".to_owned();
        let error = parse_suites(&contents).expect_err("suite isn't closed");
        let parse = ExpectedError::Load(LoadError::Parse {
            path: "bad.xml".into(),
            contents,
            error,
        });
        assert_eq!(
            parse.process_exit_code(),
            RegroupExitCode::REPORT_PARSE_FAILED
        );

        let write = ExpectedError::write_output_file(
            Utf8Path::new("out.xml"),
            std::io::Error::other("disk full"),
        );
        assert_eq!(
            write.process_exit_code(),
            RegroupExitCode::WRITE_OUTPUT_ERROR
        );
    }
}
