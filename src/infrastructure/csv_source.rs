use crate::domain::error::ConvertError;
use crate::domain::model::{Header, RawRecord};
use csv::ReaderBuilder;
use std::io;
use std::path::Path;
use tokio::fs;

/// Header plus every data record of a CSV file, in source order.
#[derive(Debug, Clone, Default)]
pub struct CsvTable {
    pub header: Header,
    pub records: Vec<RawRecord>,
}

pub async fn read_csv_file(path: &Path) -> Result<CsvTable, ConvertError> {
    let raw = fs::read(path)
        .await
        .map_err(|e| ConvertError::from_source_io(path, e))?;

    parse_csv(&raw).map_err(|e| ConvertError::SourceUnreadable {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Tokenize CSV bytes: comma delimiter, double-quote quoting, `""` escapes.
///
/// Records may be ragged; fitting them to the header is left to the reconciler.
/// Blank lines are skipped.
pub fn parse_csv(raw: &[u8]) -> io::Result<CsvTable> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(raw);

    let header = Header::new(reader.headers()?.iter().map(str::to_string).collect());

    let mut records = Vec::new();
    for result in reader.records() {
        let record = result?;
        let line = record.position().map(|p| p.line()).unwrap_or_default();
        records.push(RawRecord {
            line,
            fields: record.iter().map(str::to_string).collect(),
        });
    }

    Ok(CsvTable { header, records })
}
