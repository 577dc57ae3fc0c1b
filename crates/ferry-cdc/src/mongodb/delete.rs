use ferry_projection::Envelope;

use crate::error::CdcError;
use crate::mongodb::id_filter;
use crate::operation::CdcOperation;
use crate::write_model::WriteModel;

/// Deletes the document whose `_id` is named by the event key.
#[derive(Debug, Clone, Copy, Default)]
pub struct Delete;

impl CdcOperation for Delete {
    fn perform(&self, envelope: &Envelope) -> Result<WriteModel, CdcError> {
        let key = envelope.key().ok_or(CdcError::MissingKeyDocument)?;
        Ok(WriteModel::DeleteOne {
            filter: id_filter(key)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use bson::doc;

    use super::*;

    #[test]
    fn deletes_by_key_id() {
        let envelope = Envelope::new(Some(doc! { "id": "\"ABC-123\"" }), None);
        assert_eq!(
            Delete.perform(&envelope).unwrap(),
            WriteModel::DeleteOne {
                filter: doc! { "_id": "ABC-123" }
            }
        );
    }

    #[test]
    fn missing_key_document() {
        let envelope = Envelope::new(None, Some(doc! { "op": "d" }));
        assert_eq!(
            Delete.perform(&envelope).unwrap_err(),
            CdcError::MissingKeyDocument
        );
    }

    #[test]
    fn unparsable_identifier() {
        let envelope = Envelope::new(Some(doc! { "id": "{not json" }), None);
        assert!(matches!(
            Delete.perform(&envelope),
            Err(CdcError::MalformedIdentifier(_))
        ));

        let envelope = Envelope::new(Some(doc! { "id": 42 }), None);
        assert!(matches!(
            Delete.perform(&envelope),
            Err(CdcError::MalformedIdentifier(_))
        ));
    }
}
