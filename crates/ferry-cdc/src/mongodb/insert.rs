use ferry_projection::{Envelope, ID_FIELD};

use crate::error::CdcError;
use crate::mongodb::{AFTER_FIELD, embedded_document};
use crate::operation::CdcOperation;
use crate::write_model::WriteModel;

/// Upserts the full document carried in the event's `after` field.
#[derive(Debug, Clone, Copy, Default)]
pub struct Insert;

impl CdcOperation for Insert {
    fn perform(&self, envelope: &Envelope) -> Result<WriteModel, CdcError> {
        let value = envelope
            .value()
            .ok_or(CdcError::MissingField(AFTER_FIELD))?;
        let replacement = embedded_document(value, AFTER_FIELD)?;

        let id = replacement.get(ID_FIELD).cloned().ok_or_else(|| {
            CdcError::MalformedDocument(format!("\"{AFTER_FIELD}\" document has no {ID_FIELD}"))
        })?;
        let mut filter = bson::Document::new();
        filter.insert(ID_FIELD, id);

        Ok(WriteModel::ReplaceOne {
            filter,
            replacement,
            upsert: true,
        })
    }
}
