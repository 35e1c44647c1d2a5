use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConvertStats {
    pub rows: usize,
    pub columns: usize,
    pub rows_padded: usize,
    pub rows_overflowed: usize,
    pub bytes_written: usize,
}
