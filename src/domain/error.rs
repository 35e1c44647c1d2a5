use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Fieldless view of [`ConvertError`] for callers that only branch on the category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    SourceNotFound,
    SourceUnreadable,
    MalformedRow,
    DestinationUnwritable,
}

#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("source file not found: {}", path.display())]
    SourceNotFound { path: PathBuf },

    #[error("cannot read source file {}: {source}", path.display())]
    SourceUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed row at line {line}: expected {expected} fields, found {found}")]
    MalformedRow {
        line: u64,
        expected: usize,
        found: usize,
    },

    #[error("cannot write destination file {}: {source}", path.display())]
    DestinationUnwritable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ConvertError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ConvertError::SourceNotFound { .. } => ErrorKind::SourceNotFound,
            ConvertError::SourceUnreadable { .. } => ErrorKind::SourceUnreadable,
            ConvertError::MalformedRow { .. } => ErrorKind::MalformedRow,
            ConvertError::DestinationUnwritable { .. } => ErrorKind::DestinationUnwritable,
        }
    }

    /// Classify a failure to open or read the source file.
    pub fn from_source_io(path: impl Into<PathBuf>, err: io::Error) -> Self {
        let path = path.into();
        if err.kind() == io::ErrorKind::NotFound {
            ConvertError::SourceNotFound { path }
        } else {
            ConvertError::SourceUnreadable { path, source: err }
        }
    }
}
