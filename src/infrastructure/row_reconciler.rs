use crate::domain::error::ConvertError;
use crate::domain::model::{Header, RawRecord, Reconciled, Row, RowPolicy};
use crate::domain::traits::RowReconciler;

/// Pads short rows with `null` and keeps extra cells under the overflow key.
pub struct PermissiveReconciler;

/// Rejects any row whose field count differs from the header's.
pub struct StrictReconciler;

impl RowReconciler for PermissiveReconciler {
    fn reconcile(&self, header: &Header, record: RawRecord) -> Result<Reconciled, ConvertError> {
        let found = record.fields.len();
        let (mut row, extra) = zip_with_header(header, record.fields);

        let padded = header.len().saturating_sub(found);
        let overflow = extra.len();
        if !extra.is_empty() {
            row.set_overflow(header.overflow_key(), extra);
        }

        Ok(Reconciled {
            row,
            padded,
            overflow,
        })
    }
}

impl RowReconciler for StrictReconciler {
    fn reconcile(&self, header: &Header, record: RawRecord) -> Result<Reconciled, ConvertError> {
        let found = record.fields.len();
        if found != header.len() {
            return Err(ConvertError::MalformedRow {
                line: record.line,
                expected: header.len(),
                found,
            });
        }

        let (row, _extra) = zip_with_header(header, record.fields);
        Ok(Reconciled {
            row,
            padded: 0,
            overflow: 0,
        })
    }
}

pub fn reconciler_for(policy: RowPolicy) -> &'static dyn RowReconciler {
    match policy {
        RowPolicy::Permissive => &PermissiveReconciler,
        RowPolicy::Strict => &StrictReconciler,
    }
}

/// Positional zip; missing trailing cells become `null`, leftovers are returned.
fn zip_with_header(header: &Header, fields: Vec<String>) -> (Row, Vec<String>) {
    let mut fields = fields.into_iter();
    let mut row = Row::new();

    for column in header.columns() {
        match fields.next() {
            Some(value) => row.insert_text(column, value),
            None => row.insert_null(column),
        }
    }

    (row, fields.collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::ErrorKind;
    use crate::domain::model::OVERFLOW_KEY;
    use serde_json::{json, Value};

    fn header(cols: &[&str]) -> Header {
        Header::new(cols.iter().map(|c| c.to_string()).collect())
    }

    fn record(line: u64, fields: &[&str]) -> RawRecord {
        RawRecord {
            line,
            fields: fields.iter().map(|f| f.to_string()).collect(),
        }
    }

    #[test]
    fn permissive_exact_row_maps_every_column() {
        let out = PermissiveReconciler
            .reconcile(&header(&["x", "y"]), record(2, &["a,b", "c"]))
            .expect("reconcile");

        assert_eq!(out.padded, 0);
        assert_eq!(out.overflow, 0);
        assert_eq!(
            serde_json::to_value(&out.row).expect("value"),
            json!({"x": "a,b", "y": "c"})
        );
    }

    #[test]
    fn permissive_pads_missing_trailing_fields_with_null() {
        let out = PermissiveReconciler
            .reconcile(&header(&["name", "city", "phone"]), record(3, &["Shelter"]))
            .expect("reconcile");

        assert_eq!(out.padded, 2);
        assert_eq!(out.row.get("city"), Some(&Value::Null));
        assert_eq!(out.row.get("phone"), Some(&Value::Null));
        assert_eq!(out.row.get(OVERFLOW_KEY), None);
    }

    #[test]
    fn permissive_collects_extra_fields_under_overflow_key() {
        let out = PermissiveReconciler
            .reconcile(&header(&["name"]), record(5, &["Shelter", "x", "y"]))
            .expect("reconcile");

        assert_eq!(out.overflow, 2);
        assert_eq!(out.row.get(OVERFLOW_KEY), Some(&json!(["x", "y"])));
        let keys: Vec<&str> = out.row.keys().collect();
        assert_eq!(keys, vec!["name", OVERFLOW_KEY]);
    }

    #[test]
    fn permissive_overflow_never_replaces_a_real_column() {
        let h = header(&["a", OVERFLOW_KEY]);
        let out = PermissiveReconciler
            .reconcile(&h, record(3, &["2", "lost", "extra"]))
            .expect("reconcile");

        assert_eq!(out.overflow, 1);
        assert_eq!(
            serde_json::to_value(&out.row).expect("value"),
            json!({"a": "2", "__overflow__": "lost", "__overflow__1": ["extra"]})
        );
    }

    #[test]
    fn strict_rejects_short_and_long_rows_with_line_number() {
        let h = header(&["a", "b"]);

        let err = StrictReconciler
            .reconcile(&h, record(7, &["1"]))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedRow);
        assert!(err.to_string().contains("line 7"));

        let err = StrictReconciler
            .reconcile(&h, record(9, &["1", "2", "3"]))
            .unwrap_err();
        assert!(err.to_string().contains("found 3"));
    }

    #[test]
    fn strict_accepts_matching_row() {
        let out = StrictReconciler
            .reconcile(&header(&["a", "b"]), record(2, &["", "2"]))
            .expect("reconcile");
        assert_eq!(out.row.get("a"), Some(&Value::String(String::new())));
    }

    #[test]
    fn reconciler_for_selects_policy() {
        let h = header(&["a", "b"]);
        assert!(reconciler_for(RowPolicy::Strict)
            .reconcile(&h, record(2, &["1"]))
            .is_err());
        assert!(reconciler_for(RowPolicy::Permissive)
            .reconcile(&h, record(2, &["1"]))
            .is_ok());
    }
}
