use crate::domain::error::ConvertError;
use crate::domain::model::{Header, RawRecord, Reconciled};

pub trait RowReconciler {
    fn reconcile(&self, header: &Header, record: RawRecord) -> Result<Reconciled, ConvertError>;
}
