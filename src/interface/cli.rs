use crate::domain::model::RowPolicy;
use crate::infrastructure::event_ndjson::spawn_ndjson_printer;
use crate::infrastructure::row_reconciler::reconciler_for;
use crate::usecase::convert::{convert_with, ConvertRequest, DEFAULT_OUTPUT};
use crate::usecase::event::AppEvent;
use anyhow::{anyhow, Context, Result};
use std::env;
use std::path::PathBuf;
use tokio::sync::mpsc;
use tracing::info;

pub async fn run() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    run_with_args(&args).await
}

pub async fn run_with_args(args: &[String]) -> Result<()> {
    let cli = Cli::parse(args)?;

    let (tx, rx) = mpsc::channel::<AppEvent>(1024);
    let printer = if cli.emit_events {
        Some(spawn_ndjson_printer(rx))
    } else {
        drop(rx);
        None
    };
    let sink = if cli.emit_events { Some(tx) } else { None };

    let request = ConvertRequest {
        dry_run: cli.dry_run,
        pretty: cli.pretty,
        ..ConvertRequest::new(&cli.input, DEFAULT_OUTPUT)
    };
    info!(source = %cli.input.display(), policy = ?cli.policy, "converting");

    let result = convert_with(&request, reconciler_for(cli.policy), sink).await;

    if let Some(handle) = printer {
        handle.await.ok();
    }

    let stats = result.with_context(|| format!("converting {}", cli.input.display()))?;

    eprintln!(
        "summary: rows={} columns={} padded={} overflowed={} bytes={}{}",
        stats.rows,
        stats.columns,
        stats.rows_padded,
        stats.rows_overflowed,
        stats.bytes_written,
        if cli.dry_run { " (dry run)" } else { "" }
    );

    Ok(())
}

#[derive(Debug, PartialEq, Eq)]
struct Cli {
    input: PathBuf,
    policy: RowPolicy,
    dry_run: bool,
    pretty: bool,
    emit_events: bool,
}

impl Cli {
    fn parse(args: &[String]) -> Result<Self> {
        // Expected:
        // <bin> <source.csv> [--strict] [--dry-run] [--pretty] [--emit-events]
        let mut input: Option<PathBuf> = None;
        let mut policy = RowPolicy::Permissive;
        let mut dry_run = false;
        let mut pretty = false;
        let mut emit_events = false;

        for arg in args.iter().skip(1) {
            match arg.as_str() {
                "--strict" => policy = RowPolicy::Strict,
                "--dry-run" => dry_run = true,
                "--pretty" => pretty = true,
                "--emit-events" => emit_events = true,
                "-h" | "--help" => return Err(anyhow!(usage())),
                other if other.starts_with("--") => {
                    return Err(anyhow!(format!("unknown arg: {other}\n\n{}", usage())))
                }
                other => {
                    if input.is_some() {
                        return Err(anyhow!(format!(
                            "unexpected extra argument: {other}\n\n{}",
                            usage()
                        )));
                    }
                    input = Some(PathBuf::from(other));
                }
            }
        }

        let input =
            input.ok_or_else(|| anyhow!(format!("missing source CSV path\n\n{}", usage())))?;

        Ok(Cli {
            input,
            policy,
            dry_run,
            pretty,
            emit_events,
        })
    }
}

fn usage() -> &'static str {
    "Usage:\n  facility-csv-converter <source.csv> [--strict] [--dry-run] [--pretty] [--emit-events]\n\nOutput:\n  Rows are written as a JSON array to parsed_facilities.json in the current directory.\n\nRows:\n  Short rows are padded with null and extra cells are kept under \"__overflow__\".\n  With --strict, any row whose field count differs from the header is an error.\n\nEvents:\n  If --emit-events is set, NDJSON events are written to stdout; summary goes to stderr."
}
