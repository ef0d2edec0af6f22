mod cli;
mod config;
mod errors;
mod formatter;
mod openai_client;
mod schema;
mod session;
mod spinner;
mod terminal;

use anyhow::Result;
use cli::{Cli, Outcome};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    // Load env variables from .env if present
    let _ = dotenvy::dotenv();
    // init logging; stdout is reserved for the rendered document
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    let cli = <Cli as clap::Parser>::parse();

    match cli::handle_translate(cli).await? {
        Outcome::Succeeded => Ok(ExitCode::SUCCESS),
        Outcome::Failed => Ok(ExitCode::FAILURE),
    }
}
