//! sdfix server binary
//!
//! Starts the HTTP server that remediates retired sales-document table references.

use clap::Parser;
use sdfix_server::{cli::Cli, init_tracing, start_server, ServerError};
use std::process;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

async fn run() -> Result<(), ServerError> {
    let cli = Cli::parse();
    let config = cli.load_config()?;

    init_tracing(&config);

    start_server(config).await?;

    Ok(())
}
