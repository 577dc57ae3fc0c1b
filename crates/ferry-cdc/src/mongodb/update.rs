use bson::Document;
use ferry_projection::{Envelope, ID_FIELD};

use crate::error::CdcError;
use crate::mongodb::{PATCH_FIELD, embedded_document, id_filter};
use crate::operation::CdcOperation;
use crate::write_model::WriteModel;

/// Applies the event's `patch` field.
///
/// A patch that carries its own `_id` is a full replacement document; any
/// other patch is an update (`$set`, `$unset`, ...) against the document
/// named by the event key.
#[derive(Debug, Clone, Copy, Default)]
pub struct Update;

impl CdcOperation for Update {
    fn perform(&self, envelope: &Envelope) -> Result<WriteModel, CdcError> {
        let value = envelope
            .value()
            .ok_or(CdcError::MissingField(PATCH_FIELD))?;
        let patch = embedded_document(value, PATCH_FIELD)?;

        if let Some(id) = patch.get(ID_FIELD).cloned() {
            let mut filter = Document::new();
            filter.insert(ID_FIELD, id);
            return Ok(WriteModel::ReplaceOne {
                filter,
                replacement: patch,
                upsert: true,
            });
        }

        let key = envelope.key().ok_or(CdcError::MissingKeyDocument)?;
        Ok(WriteModel::UpdateOne {
            filter: id_filter(key)?,
            update: patch,
        })
    }
}

#[cfg(test)]
mod tests {
    use bson::doc;

    use super::*;

    #[test]
    fn full_document_patch_replaces() {
        let envelope = Envelope::new(
            Some(doc! { "id": "\"x\"" }),
            Some(doc! { "op": "u", "patch": r#"{"_id": "x", "name": "Anne"}"# }),
        );
        assert_eq!(
            Update.perform(&envelope).unwrap(),
            WriteModel::ReplaceOne {
                filter: doc! { "_id": "x" },
                replacement: doc! { "_id": "x", "name": "Anne" },
                upsert: true,
            }
        );
    }

    #[test]
    fn operator_patch_updates_by_key() {
        let envelope = Envelope::new(
            Some(doc! { "id": "\"x\"" }),
            Some(doc! { "op": "u", "patch": r#"{"$set": {"name": "Anne"}}"# }),
        );
        assert_eq!(
            Update.perform(&envelope).unwrap(),
            WriteModel::UpdateOne {
                filter: doc! { "_id": "x" },
                update: doc! { "$set": { "name": "Anne" } },
            }
        );
    }

    #[test]
    fn operator_patch_needs_key() {
        let envelope = Envelope::new(None, Some(doc! { "patch": r#"{"$set": {"a": 1}}"# }));
        assert_eq!(
            Update.perform(&envelope).unwrap_err(),
            CdcError::MissingKeyDocument
        );
    }

    #[test]
    fn malformed_patch() {
        let envelope = Envelope::new(None, Some(doc! { "patch": "[1, 2]" }));
        assert!(matches!(
            Update.perform(&envelope),
            Err(CdcError::MalformedDocument(_))
        ));
    }
}
