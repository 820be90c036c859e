//! Scenario runner
//!
//! Drives scenarios one at a time through a [`Transport`] and stops at the
//! first failure. The runner narrates progress on stdout but never prints a
//! failure diagnostic itself; the error travels back in the [`RunReport`].

use colored::Colorize;

use crate::common::{Error, Result};
use crate::http::Transport;

use super::scenario::Scenario;

/// Lifecycle of a run
#[derive(Debug)]
pub enum RunState {
    NotStarted,
    /// Executing the scenario at this zero-based index
    Running(usize),
    Completed,
    Aborted(Error),
}

impl RunState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, RunState::Completed | RunState::Aborted(_))
    }
}

/// Terminal result of a run
#[derive(Debug)]
pub enum Outcome {
    AllPassed,
    Failed(Error),
}

/// What the runner hands to the exit controller
#[derive(Debug)]
pub struct RunReport {
    /// Scenarios that passed before the run ended
    pub passed: usize,
    pub total: usize,
    pub outcome: Outcome,
}

impl RunReport {
    pub fn succeeded(&self) -> bool {
        matches!(self.outcome, Outcome::AllPassed)
    }
}

/// Sequential, fail-fast executor for a fixed scenario list
pub struct ScenarioRunner<'a> {
    transport: &'a dyn Transport,
    scenarios: Vec<Scenario>,
    state: RunState,
}

impl<'a> ScenarioRunner<'a> {
    pub fn new(transport: &'a dyn Transport, scenarios: Vec<Scenario>) -> Self {
        Self {
            transport,
            scenarios,
            state: RunState::NotStarted,
        }
    }

    pub fn state(&self) -> &RunState {
        &self.state
    }

    /// Run every scenario in order, stopping at the first failure
    pub async fn run(mut self) -> RunReport {
        let total = self.scenarios.len();
        let mut passed = 0;

        for (index, scenario) in self.scenarios.iter().enumerate() {
            let test_num = index + 1;
            self.state = RunState::Running(index);
            tracing::debug!(test = test_num, "scenario started");

            println!(
                "\n{} {}",
                format!("Test {}:", test_num).cyan(),
                scenario.description
            );

            match execute(self.transport, scenario).await {
                Ok(()) => {
                    passed += 1;
                    println!("  {} Test {} passed", "✓".green(), test_num);
                }
                Err(e) => {
                    tracing::debug!(test = test_num, code = e.code(), "scenario failed");
                    println!("  {} Test {} failed", "✗".red(), test_num);
                    self.state = RunState::Aborted(e);
                    break;
                }
            }
        }

        if !self.state.is_terminal() {
            self.state = RunState::Completed;
        }

        let outcome = match self.state {
            RunState::Completed => Outcome::AllPassed,
            RunState::Aborted(e) => Outcome::Failed(e),
            RunState::NotStarted | RunState::Running(_) => Outcome::Failed(Error::Internal(
                "runner stopped before reaching a terminal state".to_string(),
            )),
        };

        RunReport {
            passed,
            total,
            outcome,
        }
    }
}

/// Issue a scenario's request and check its expectation
async fn execute(transport: &dyn Transport, scenario: &Scenario) -> Result<()> {
    let response = transport.get(&scenario.request).await?;
    (scenario.expect)(&response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::ErrorKind;
    use crate::http::{HttpResponse, RequestSpec};
    use crate::testing::scenario::canonical;
    use async_trait::async_trait;
    use serde_json::json;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Transport that replays canned results and records every request
    struct ScriptedTransport {
        replies: Mutex<VecDeque<Result<HttpResponse>>>,
        seen: Mutex<Vec<RequestSpec>>,
    }

    impl ScriptedTransport {
        fn new(replies: Vec<Result<HttpResponse>>) -> Self {
            Self {
                replies: Mutex::new(replies.into()),
                seen: Mutex::new(Vec::new()),
            }
        }

        fn requests(&self) -> Vec<RequestSpec> {
            self.seen.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Transport for ScriptedTransport {
        async fn get(&self, request: &RequestSpec) -> Result<HttpResponse> {
            self.seen.lock().unwrap().push(request.clone());
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(Error::Internal("no scripted reply".to_string())))
        }
    }

    fn ok(status: u16, body: serde_json::Value) -> Result<HttpResponse> {
        Ok(HttpResponse { status, body })
    }

    fn compliant_replies() -> Vec<Result<HttpResponse>> {
        vec![
            ok(400, json!({"error": "No code provided"})),
            ok(200, json!({"result": 2})),
            ok(400, json!({"error": "Failed to execute code"})),
        ]
    }

    #[tokio::test]
    async fn test_all_scenarios_pass() {
        let transport = ScriptedTransport::new(compliant_replies());
        let report = ScenarioRunner::new(&transport, canonical()).run().await;

        assert!(report.succeeded());
        assert_eq!(report.passed, 3);
        assert_eq!(report.total, 3);
        assert_eq!(transport.requests().len(), 3);
    }

    #[tokio::test]
    async fn test_stops_at_first_failure() {
        let transport = ScriptedTransport::new(vec![
            ok(400, json!({"error": "No code provided"})),
            ok(200, json!({"result": 3})),
            ok(400, json!({"error": "Failed to execute code"})),
        ]);
        let report = ScenarioRunner::new(&transport, canonical()).run().await;

        assert_eq!(report.passed, 1);
        match report.outcome {
            Outcome::Failed(e) => assert_eq!(e.kind(), ErrorKind::Assertion),
            Outcome::AllPassed => panic!("Expected failure"),
        }
        // The third scenario never issued its request
        assert_eq!(transport.requests().len(), 2);
    }

    #[tokio::test]
    async fn test_transport_error_aborts_run() {
        let source = reqwest::Client::new()
            .get("http://[::1")
            .build()
            .unwrap_err();
        let transport = ScriptedTransport::new(vec![Err(Error::Timeout {
            url: "http://localhost:1337/api".to_string(),
            millis: 5000,
            source,
        })]);
        let report = ScenarioRunner::new(&transport, canonical()).run().await;

        assert_eq!(report.passed, 0);
        assert!(matches!(report.outcome, Outcome::Failed(Error::Timeout { .. })));
        assert_eq!(transport.requests(), vec![RequestSpec::get("/api")]);
    }

    #[tokio::test]
    async fn test_requests_follow_scenario_order() {
        let transport = ScriptedTransport::new(compliant_replies());
        ScenarioRunner::new(&transport, canonical()).run().await;

        let paths: Vec<_> = transport
            .requests()
            .into_iter()
            .map(|r| r.query.first().map(|(_, v)| v.clone()))
            .collect();
        assert_eq!(
            paths,
            vec![
                None,
                Some("MSsx".to_string()),
                Some("dGhyb3cgbmV3IEVycm9yKCJ4Iik=".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_empty_suite_completes() {
        let transport = ScriptedTransport::new(Vec::new());
        let runner = ScenarioRunner::new(&transport, Vec::new());
        assert!(matches!(runner.state(), RunState::NotStarted));

        let report = runner.run().await;
        assert!(report.succeeded());
        assert_eq!(report.total, 0);
        assert!(transport.requests().is_empty());
    }
}
