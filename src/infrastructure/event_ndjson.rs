use crate::usecase::event::AppEvent;
use serde_json::json;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

fn app_event_to_json(ev: &AppEvent) -> serde_json::Value {
    serde_json::to_value(ev)
        .unwrap_or_else(|e| json!({"type": "encode_error", "error": e.to_string()}))
}

pub fn spawn_ndjson_printer(mut rx: mpsc::Receiver<AppEvent>) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(ev) = rx.recv().await {
            let line = app_event_to_json(&ev);

            // NDJSON to stdout.
            println!("{line}");
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecase::stats::ConvertStats;

    #[test]
    fn app_event_to_json_covers_all_variants() {
        let v = app_event_to_json(&AppEvent::PhaseStarted {
            name: "x".to_string(),
        });
        assert_eq!(v["type"], "phase_started");
        assert_eq!(v["name"], "x");

        let v = app_event_to_json(&AppEvent::PhaseFinished {
            name: "x".to_string(),
        });
        assert_eq!(v["type"], "phase_finished");

        let v = app_event_to_json(&AppEvent::HeaderParsed {
            columns: vec!["name".to_string(), "city".to_string()],
        });
        assert_eq!(v["type"], "header_parsed");
        assert_eq!(v["columns"][1], "city");

        let v = app_event_to_json(&AppEvent::RowPadded { line: 3, missing: 2 });
        assert_eq!(v["type"], "row_padded");
        assert_eq!(v["missing"], 2);

        let v = app_event_to_json(&AppEvent::RowOverflowed { line: 4, extra: 1 });
        assert_eq!(v["type"], "row_overflowed");
        assert_eq!(v["line"], 4);

        let v = app_event_to_json(&AppEvent::OutputWritten {
            path: "parsed_facilities.json".to_string(),
            bytes: 10,
        });
        assert_eq!(v["type"], "output_written");

        let v = app_event_to_json(&AppEvent::Finished {
            stats: ConvertStats::default(),
        });
        assert_eq!(v["type"], "finished");
        assert_eq!(v["stats"]["rows"], 0);
    }

    #[tokio::test]
    async fn spawn_ndjson_printer_drains_and_exits() {
        let (tx, rx) = mpsc::channel::<AppEvent>(8);
        let handle = spawn_ndjson_printer(rx);

        tx.send(AppEvent::PhaseStarted {
            name: "x".to_string(),
        })
        .await
        .expect("send");
        drop(tx);

        handle.await.expect("join");
    }
}
