//! CLI command: revue health
//!
//! Usage:
//!   revue health [--url http://127.0.0.1:5000] [--format text|json]

use anyhow::Context;
use revue_client::{HealthResponse, HealthStatus, ReviewClient, ReviewService};

use crate::cli::args::{HealthArgs, OutputFormat};
use crate::exit_codes;

pub async fn run(args: HealthArgs) -> anyhow::Result<i32> {
    let config = args.service.to_config();
    config.validate().context("invalid service configuration")?;

    let client = ReviewClient::new(config)?;
    let status = client.health().await;

    match args.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string(&HealthResponse { status })?);
        }
        OutputFormat::Text => match status {
            HealthStatus::Healthy => println!("healthy"),
            HealthStatus::Unhealthy => println!("unhealthy ({})", client.base_url()),
        },
    }

    Ok(match status {
        HealthStatus::Healthy => exit_codes::SUCCESS,
        HealthStatus::Unhealthy => exit_codes::UNHEALTHY,
    })
}
