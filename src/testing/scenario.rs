//! Scenario definitions
//!
//! A scenario is a request plus an expectation over the response. The
//! canonical list below exercises the `/api` endpoint of the code-execution
//! service: a missing payload, a payload that evaluates, and a payload that
//! throws. Order is significant.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde_json::json;

use crate::common::{Error, Result};
use crate::http::{HttpResponse, RequestSpec};

use super::assert::{as_number, assert_equal, assert_status};

/// Endpoint that evaluates a base64-encoded snippet
pub const API_PATH: &str = "/api";

/// Query parameter carrying the encoded snippet
pub const CODE_PARAM: &str = "c";

/// Snippet that should evaluate to 2
pub const VALID_CODE: &str = "1+1";

/// Snippet that raises when evaluated
pub const THROWING_CODE: &str = r#"throw new Error("x")"#;

/// Checks a response, failing with a diagnostic on mismatch
pub type Expectation = fn(&HttpResponse) -> Result<()>;

/// One ordered step of the suite
pub struct Scenario {
    /// Human-readable description, narrated before the request
    pub description: String,
    pub request: RequestSpec,
    pub expect: Expectation,
}

impl Scenario {
    pub fn new(description: impl Into<String>, request: RequestSpec, expect: Expectation) -> Self {
        Self {
            description: description.into(),
            request,
            expect,
        }
    }
}

/// Encode a snippet the way the service expects it in `c`
pub fn encode_code(code: &str) -> String {
    STANDARD.encode(code.as_bytes())
}

/// The fixed suite, in execution order
pub fn canonical() -> Vec<Scenario> {
    vec![
        Scenario::new(
            "missing c parameter -> expect 400 and error message",
            RequestSpec::get(API_PATH),
            expect_missing_code,
        ),
        Scenario::new(
            format!("valid code '{}' -> expect 200 and result 2", VALID_CODE),
            RequestSpec::get(API_PATH).param(CODE_PARAM, encode_code(VALID_CODE)),
            expect_evaluated,
        ),
        Scenario::new(
            format!("invalid code '{}' -> expect 400", THROWING_CODE),
            RequestSpec::get(API_PATH).param(CODE_PARAM, encode_code(THROWING_CODE)),
            expect_execution_failure,
        ),
    ]
}

fn expect_missing_code(response: &HttpResponse) -> Result<()> {
    assert_status(response, 400, "/api without c")?;
    assert_equal(
        &response.body,
        &json!({ "error": "No code provided" }),
        "/api without c expected JSON { error: 'No code provided' }",
    )
}

fn expect_evaluated(response: &HttpResponse) -> Result<()> {
    assert_status(response, 200, "/api with code")?;

    let result = response.body.get("result").ok_or_else(|| {
        Error::assertion(
            "/api with code expected JSON with 'result'",
            r#"{"result":2}"#,
            response.body.to_string(),
        )
    })?;

    if as_number(result) != Some(2.0) {
        return Err(Error::assertion(
            "/api with code expected result 2",
            "2",
            result.to_string(),
        ));
    }
    Ok(())
}

fn expect_execution_failure(response: &HttpResponse) -> Result<()> {
    assert_status(response, 400, "/api with invalid code")?;
    assert_equal(
        &response.body,
        &json!({ "error": "Failed to execute code" }),
        "/api with invalid code expected JSON { error: 'Failed to execute code' }",
    )
}
