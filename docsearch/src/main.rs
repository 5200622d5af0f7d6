//! Docsearch connectivity check.
//!
//! Builds a signed client handle from the environment. Construction resolves
//! credentials and probes the deployment, so a zero exit status means signed
//! requests are accepted.

use std::error::Error;
use std::process::ExitCode;

use tracing::{error, info};

use docsearch::{init_tracing, Dependencies, Settings};

#[tokio::main]
async fn main() -> ExitCode {
    dotenv::dotenv().ok();

    let settings = match Settings::from_env() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    init_tracing(settings.log_format.as_deref());

    match Dependencies::new(&settings).await {
        Ok(_) => {
            info!(url = %settings.url, "Deployment accepts signed requests");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "Startup failed");

            let mut source = e.source();
            while let Some(err) = source {
                eprintln!("  Caused by: {}", err);
                source = err.source();
            }
            ExitCode::FAILURE
        }
    }
}
