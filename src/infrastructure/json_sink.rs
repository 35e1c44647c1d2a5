use crate::domain::error::ConvertError;
use crate::domain::model::Document;
use std::io::{self, Write};
use std::path::Path;
use tempfile::Builder;
use tokio::task;

pub fn render_document(document: &Document, pretty: bool) -> io::Result<Vec<u8>> {
    let bytes = if pretty {
        serde_json::to_vec_pretty(document)?
    } else {
        serde_json::to_vec(document)?
    };
    Ok(bytes)
}

/// Serialize `document` and replace `path` with it.
///
/// Bytes go to a uniquely named temp file in the destination directory and are
/// renamed into place, so a failed write never leaves a truncated destination
/// and never touches another file. Returns the number of bytes written.
pub async fn write_document_file(
    path: &Path,
    document: &Document,
    pretty: bool,
) -> Result<usize, ConvertError> {
    let unwritable = |source: io::Error| ConvertError::DestinationUnwritable {
        path: path.to_path_buf(),
        source,
    };

    let bytes = render_document(document, pretty).map_err(unwritable)?;
    let written = bytes.len();
    let dest = path.to_path_buf();

    task::spawn_blocking(move || persist_atomically(&dest, &bytes))
        .await
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))
        .and_then(|res| res)
        .map_err(unwritable)?;

    Ok(written)
}

// The temp file is deleted on drop, which covers every failure below.
fn persist_atomically(dest: &Path, bytes: &[u8]) -> io::Result<()> {
    let dir = match dest.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = Builder::new()
        .prefix(".parsed-")
        .suffix(".tmp")
        .tempfile_in(dir)?;
    tmp.write_all(bytes)?;
    tmp.flush()?;
    tmp.persist(dest).map_err(|e| e.error)?;
    Ok(())
}
