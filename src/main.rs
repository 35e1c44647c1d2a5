//! Binary entrypoint.
//!
//! The crate follows a layered split:
//! - domain: rows, documents, error taxonomy, row policy port
//! - usecase: conversion workflow + progress events
//! - infrastructure: csv + serde_json + async file IO
//! - interface: CLI wiring

use anyhow::Result;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    facility_csv_converter::interface::cli::run().await
}
