use crate::domain::error::ConvertError;
use crate::domain::model::{Document, Header, RawRecord};
use crate::domain::traits::RowReconciler;
use crate::infrastructure::csv_source::read_csv_file;
use crate::infrastructure::json_sink::write_document_file;
use crate::infrastructure::row_reconciler::PermissiveReconciler;
use crate::usecase::event::AppEvent;
use crate::usecase::stats::ConvertStats;
use std::path::{Path, PathBuf};
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// Output file name used by the command line.
pub const DEFAULT_OUTPUT: &str = "parsed_facilities.json";

#[derive(Debug, Clone)]
pub struct ConvertRequest {
    pub source: PathBuf,
    pub dest: PathBuf,
    /// Parse and count only; the destination is left untouched.
    pub dry_run: bool,
    pub pretty: bool,
}

impl ConvertRequest {
    pub fn new(source: impl Into<PathBuf>, dest: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            dest: dest.into(),
            dry_run: false,
            pretty: false,
        }
    }
}

/// Convert `source` into a JSON array at `dest`, padding ragged rows.
///
/// Returns the number of rows written.
pub async fn convert(source: &Path, dest: &Path) -> Result<usize, ConvertError> {
    let request = ConvertRequest::new(source, dest);
    let stats = convert_with(&request, &PermissiveReconciler, None).await?;
    Ok(stats.rows)
}

pub async fn convert_with(
    request: &ConvertRequest,
    reconciler: &dyn RowReconciler,
    sink: Option<mpsc::Sender<AppEvent>>,
) -> Result<ConvertStats, ConvertError> {
    let mut stats = ConvertStats::default();

    emit(
        &sink,
        AppEvent::PhaseStarted {
            name: "read_csv".into(),
        },
    )
    .await;
    let table = read_csv_file(&request.source).await?;
    debug!(
        source = %request.source.display(),
        columns = table.header.len(),
        records = table.records.len(),
        "csv source tokenized"
    );
    stats.columns = table.header.len();
    emit(
        &sink,
        AppEvent::HeaderParsed {
            columns: table.header.columns().to_vec(),
        },
    )
    .await;
    emit(
        &sink,
        AppEvent::PhaseFinished {
            name: "read_csv".into(),
        },
    )
    .await;

    emit(
        &sink,
        AppEvent::PhaseStarted {
            name: "build_document".into(),
        },
    )
    .await;
    let document =
        build_document(&table.header, table.records, reconciler, &sink, &mut stats).await?;
    emit(
        &sink,
        AppEvent::PhaseFinished {
            name: "build_document".into(),
        },
    )
    .await;

    if request.dry_run {
        debug!(rows = stats.rows, "dry run, skipping output");
    } else {
        emit(
            &sink,
            AppEvent::PhaseStarted {
                name: "write_json".into(),
            },
        )
        .await;
        let bytes = write_document_file(&request.dest, &document, request.pretty).await?;
        stats.bytes_written = bytes;
        debug!(dest = %request.dest.display(), bytes, "json document written");
        emit(
            &sink,
            AppEvent::OutputWritten {
                path: request.dest.display().to_string(),
                bytes,
            },
        )
        .await;
        emit(
            &sink,
            AppEvent::PhaseFinished {
                name: "write_json".into(),
            },
        )
        .await;
    }

    emit(
        &sink,
        AppEvent::Finished {
            stats: stats.clone(),
        },
    )
    .await;

    Ok(stats)
}

/// Key every record by the header, in source order.
pub async fn build_document(
    header: &Header,
    records: Vec<RawRecord>,
    reconciler: &dyn RowReconciler,
    sink: &Option<mpsc::Sender<AppEvent>>,
    stats: &mut ConvertStats,
) -> Result<Document, ConvertError> {
    let mut document = Document::new();

    for record in records {
        let line = record.line;
        let reconciled = reconciler.reconcile(header, record)?;

        if reconciled.padded > 0 {
            stats.rows_padded += 1;
            warn!(
                line,
                missing = reconciled.padded,
                "row shorter than header, padded with null"
            );
            emit(
                sink,
                AppEvent::RowPadded {
                    line,
                    missing: reconciled.padded,
                },
            )
            .await;
        }
        if reconciled.overflow > 0 {
            stats.rows_overflowed += 1;
            warn!(
                line,
                extra = reconciled.overflow,
                "row longer than header, extras kept as overflow"
            );
            emit(
                sink,
                AppEvent::RowOverflowed {
                    line,
                    extra: reconciled.overflow,
                },
            )
            .await;
        }

        document.push(reconciled.row);
    }

    stats.rows = document.len();
    Ok(document)
}

async fn emit(sink: &Option<mpsc::Sender<AppEvent>>, ev: AppEvent) {
    if let Some(tx) = sink {
        let _ = tx.send(ev).await;
    }
}
