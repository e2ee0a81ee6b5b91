//! CLI command: revue review
//!
//! Submit one file (or stdin) for review and print the outcome.
//!
//! Usage:
//!   revue review [FILE] [--url URL] [--timeout-ms MS] [--format text|json]
//!
//! Examples:
//!   revue review src/main.rs
//!   cat snippet.py | revue review --format json

use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use revue_client::{Phase, ReviewClient, ReviewSession, SubmitOutcome};
use tracing::debug;

use crate::cli::args::{OutputFormat, ReviewArgs};
use crate::exit_codes;
use crate::render::{self, ReviewReport};

pub async fn run(args: ReviewArgs, verbose: bool) -> anyhow::Result<i32> {
    let code = read_input(args.file.as_deref())?;

    let mut config = args.service.to_config();
    if let Some(max) = args.max_length {
        config = config.with_max_code_length(max);
    }
    config.validate().context("invalid service configuration")?;

    debug!(url = %config.base_url(), timeout_ms = config.timeout_ms, "review configuration");

    let client = ReviewClient::new(config.clone())?;
    let mut session = ReviewSession::new(Arc::new(client), &config);
    session.edit(code);

    if verbose {
        eprintln!(
            "{}",
            render::counter(session.draft(), session.max_code_length())
        );
    }

    if session.submit_draft() == SubmitOutcome::Started && args.format == OutputFormat::Text {
        eprintln!("{}", render::phase_text(session.state()));
    }
    session.settle().await;

    let state = session.state();
    match args.format {
        OutputFormat::Json => {
            let report = ReviewReport::new(
                state,
                session.draft(),
                session.max_code_length(),
                session.error_status(),
            );
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Text => match state.phase {
            Phase::Success => println!("{}", render::phase_text(state)),
            _ => eprintln!("{}", render::phase_text(state)),
        },
    }

    Ok(match (state.phase, session.error_status()) {
        (Phase::Success, _) => exit_codes::SUCCESS,
        (_, Some(status)) => exit_codes::for_status(status),
        (_, None) => exit_codes::INVALID_INPUT,
    })
}

/// Read the submission verbatim; no trimming or newline normalization.
fn read_input(file: Option<&Path>) -> anyhow::Result<String> {
    match file {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        _ => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read stdin")?;
            Ok(buf)
        }
    }
}
