//! Process-level driver
//!
//! Resolves configuration, runs the suite and turns the single outcome into
//! an exit code. Nothing below this module prints a failure diagnostic or
//! decides how the process ends.

use std::error::Error as _;
use std::fmt::Write as _;

use colored::Colorize;

use crate::common::{Config, Error};
use crate::http::HttpClient;
use crate::testing::{canonical, Outcome, RunReport, ScenarioRunner};

/// Every scenario passed
pub const EXIT_SUCCESS: i32 = 0;

/// Configuration, transport or assertion failure
pub const EXIT_FAILURE: i32 = 1;

/// Run the whole harness and return the process exit code
pub async fn run() -> i32 {
    // Configuration must be settled before any client exists
    let config = match Config::resolve() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", render_diagnostic(&e));
            return EXIT_FAILURE;
        }
    };
    tracing::debug!(?config, "configuration resolved");

    let client = match HttpClient::new(&config) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Error: {}", render_diagnostic(&e));
            return EXIT_FAILURE;
        }
    };

    println!(
        "{} {}",
        "Running E2E tests against".blue().bold(),
        config.target().white().bold()
    );

    let report = ScenarioRunner::new(&client, canonical()).run().await;
    conclude(&report)
}

/// Print the summary or the failure diagnostic for a finished run
pub fn conclude(report: &RunReport) -> i32 {
    match &report.outcome {
        Outcome::AllPassed => {
            println!(
                "\n{} {} ({}/{})",
                "✓".green().bold(),
                "All E2E tests passed".green().bold(),
                report.passed,
                report.total
            );
            EXIT_SUCCESS
        }
        Outcome::Failed(e) => {
            tracing::debug!(code = e.code(), kind = ?e.kind(), "run aborted");
            eprintln!(
                "\n{} ({}/{} passed)",
                "E2E tests failed:".red().bold(),
                report.passed,
                report.total
            );
            eprintln!("{}", render_diagnostic(e));
            EXIT_FAILURE
        }
    }
}

/// Message plus the chain of underlying causes
pub fn render_diagnostic(error: &Error) -> String {
    let mut out = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        let _ = write!(out, "\n  Caused by: {}", cause);
        source = cause.source();
    }
    out
}
