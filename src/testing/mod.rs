//! E2E scenario execution
//!
//! Scenarios are plain values: a request and an expectation function. The
//! runner executes them in order against a [`crate::http::Transport`] and
//! reports a single outcome for the whole suite.

pub mod assert;
pub mod runner;
pub mod scenario;

pub use runner::{Outcome, RunReport, RunState, ScenarioRunner};
pub use scenario::{canonical, Scenario};
