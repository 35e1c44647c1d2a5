// Infrastructure layer: CSV input, JSON output, row policies, eventing
pub mod csv_source;
pub mod event_ndjson;
pub mod json_sink;
pub mod row_reconciler;
