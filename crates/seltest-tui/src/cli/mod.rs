// ABOUTME: CLI command definitions using clap.
// ABOUTME: The wizard runs by default; subcommands cover headless use.

pub mod context;
pub mod generate;
pub mod models;
pub mod setup;

use clap::{Args, Parser, Subcommand};
use seltest_client::{ApiError, SeltestClient};
use std::path::PathBuf;

use crate::config::{Config, Overrides};
use crate::error::{AppError, Result};

#[derive(Parser, Debug)]
#[command(
    name = "seltest",
    version,
    about = "AI-powered Selenium test generator"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Backend API URL override
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Directory for downloaded scripts and exported plans
    #[arg(long, short, global = true)]
    pub output: Option<PathBuf>,
}

impl Cli {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            api_url: self.api_url.clone(),
            output_dir: self.output.clone(),
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List the backend's models and mark the current one
    Models,
    /// Configure and test the backend URL
    Setup,
    /// Show the app context the backend currently holds
    Context,
    /// Run all four steps without the interactive wizard
    Generate(GenerateArgs),
}

#[derive(Args, Debug, Clone)]
pub struct GenerateArgs {
    /// Zipped codebase of the application under test
    #[arg(long)]
    pub codebase: PathBuf,

    /// Requirements text
    #[arg(long, conflicts_with = "requirements_file")]
    pub requirements: Option<String>,

    /// Read requirements from a file
    #[arg(long)]
    pub requirements_file: Option<PathBuf>,

    /// URL of the application under test
    #[arg(long)]
    pub url: String,

    /// Comma-separated pages to cover
    #[arg(long)]
    pub pages: String,

    #[arg(long)]
    pub username: Option<String>,

    #[arg(long)]
    pub password: Option<String>,

    /// Model id; defaults to the backend's current model
    #[arg(long)]
    pub model: Option<String>,

    /// Stop after the test plan and export it as JSON
    #[arg(long)]
    pub plan_only: bool,
}

pub fn client_for(config: &Config) -> Result<SeltestClient> {
    Ok(SeltestClient::with_timeout(
        &config.api.base_url,
        config.api.timeout(),
    )?)
}

/// Transport failures get a hint about where the backend was expected.
pub fn backend_error(err: ApiError, config: &Config) -> AppError {
    match err {
        ApiError::Connection(message) => AppError::BackendUnreachable {
            message,
            url: config.api.base_url.clone(),
        },
        other => AppError::Api(other),
    }
}
