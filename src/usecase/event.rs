use crate::usecase::stats::ConvertStats;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AppEvent {
    PhaseStarted {
        name: String,
    },
    PhaseFinished {
        name: String,
    },

    HeaderParsed {
        columns: Vec<String>,
    },

    RowPadded {
        line: u64,
        missing: usize,
    },

    RowOverflowed {
        line: u64,
        extra: usize,
    },

    OutputWritten {
        path: String,
        bytes: usize,
    },

    Finished {
        stats: ConvertStats,
    },
}
