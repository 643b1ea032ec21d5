mod cli;
mod config;
mod error;
mod llm;
mod pipeline;
mod select;
mod tutor;

pub const USER_AGENT: &str = concat!("phrasecards/", env!("CARGO_PKG_VERSION"));

use std::env;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use reqwest::Client;
use tracing::info;
use tracing_subscriber::EnvFilter;

use cli::Args;
use config::Config;
use error::{AppError, ServiceError};
use llm::LlmClient;
use select::{Selector, TerminalSelector};
use tutor::{LanguageService, Tutor};

/// TCP connection establishment timeout.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
/// Global HTTP client timeout covering connect + response body.
const HTTP_TIMEOUT: Duration = Duration::from_secs(90);

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("phrasecards=warn")),
        )
        .init();

    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "run failed");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<(), AppError> {
    let mut selector = TerminalSelector::stdio();
    execute(&args, |name| env::var(name).ok(), connect, &mut selector).await
}

fn connect(config: &Config) -> Result<Tutor<LlmClient>, AppError> {
    let http = Client::builder()
        .connect_timeout(CONNECT_TIMEOUT)
        .timeout(HTTP_TIMEOUT)
        .build()
        .map_err(ServiceError::from)?;
    Ok(Tutor::new(LlmClient::from_config(http, &config.provider)))
}

/// Validates the input and environment, and only then builds the language
/// service with `connect` and runs the pipeline.
async fn execute<S: LanguageService>(
    args: &Args,
    lookup: impl Fn(&str) -> Option<String>,
    connect: impl FnOnce(&Config) -> Result<S, AppError>,
    selector: &mut impl Selector,
) -> Result<(), AppError> {
    let config = Config::validate(args, lookup)?;
    info!(
        words = config.words.len(),
        num_phrases = config.num_phrases,
        provider = ?config.provider.kind,
        "starting"
    );

    let service = connect(&config)?;
    let pairs = pipeline::run(&config, &service, selector).await?;
    info!(cards = pairs.len(), "done");
    Ok(())
}
