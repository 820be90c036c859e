//! api-e2e - end-to-end smoke test harness
//!
//! This library holds the pieces the `api-e2e` binary wires together:
//! environment configuration, an HTTP adapter that treats every status code
//! as data, structural JSON assertions and a fail-fast scenario runner.

pub mod cli;
pub mod common;
pub mod http;
pub mod testing;

// Re-export commonly used types for tests
pub use common::{Config, Error, ErrorKind, Result};
pub use http::{HttpClient, HttpResponse, RequestSpec, Transport};
pub use testing::{Outcome, RunReport, Scenario, ScenarioRunner};
