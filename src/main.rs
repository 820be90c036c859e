//! api-e2e - end-to-end smoke tests for a deployed code-execution API
//!
//! Reads `E2E_URL` (and optionally `API_TOKEN`) from the environment, runs
//! the fixed scenario suite against the service and exits 0 when every
//! scenario passes, 1 otherwise.

use api_e2e::{cli, common::logging};
use clap::Parser;

#[derive(Parser)]
#[command(
    name = "api-e2e",
    about = "End-to-end smoke tests for a deployed code-execution API",
    after_help = "Environment:\n  E2E_URL    Base URL of the service under test (required)\n  API_TOKEN  Bearer token sent on every request (optional)"
)]
#[command(version, long_about = None)]
struct Cli {}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    logging::init_cli();

    let _cli = Cli::parse();

    let code = cli::run().await;
    std::process::exit(code);
}
