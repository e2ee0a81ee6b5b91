use clap::{Parser, Subcommand, ValueEnum};
use revue_client::ReviewConfig;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "revue",
    version,
    about = "Submit source code to a review service and print the assessment"
)]
pub struct Cli {
    /// Debug logging on stderr (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Submit code for review
    Review(ReviewArgs),
    /// Check whether the review service is up
    Health(HealthArgs),
    Version,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Connection settings. Flags override REVUE_* environment variables;
/// numeric settings fall back to [`ReviewConfig::from_env`], which ignores
/// unparseable values instead of failing the parse.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct ServiceArgs {
    /// Review service base URL
    #[arg(long, env = "REVUE_API_URL")]
    pub url: Option<String>,

    /// Review request timeout in milliseconds
    #[arg(long)]
    pub timeout_ms: Option<u64>,

    /// Health check timeout in milliseconds
    #[arg(long)]
    pub health_timeout_ms: Option<u64>,
}

impl ServiceArgs {
    pub fn to_config(&self) -> ReviewConfig {
        let mut config = ReviewConfig::from_env();
        if let Some(url) = &self.url {
            config = config.with_url(url.clone());
        }
        if let Some(ms) = self.timeout_ms {
            config = config.with_timeout_ms(ms);
        }
        if let Some(ms) = self.health_timeout_ms {
            config = config.with_health_timeout_ms(ms);
        }
        config
    }
}

#[derive(clap::Args, Debug, Clone)]
pub struct ReviewArgs {
    /// File to review (reads stdin when omitted or "-")
    pub file: Option<PathBuf>,

    /// Maximum submission length in characters
    #[arg(long)]
    pub max_length: Option<usize>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    #[command(flatten)]
    pub service: ServiceArgs,
}

#[derive(clap::Args, Debug, Clone)]
pub struct HealthArgs {
    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    #[command(flatten)]
    pub service: ServiceArgs,
}
