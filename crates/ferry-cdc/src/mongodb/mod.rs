//! Debezium MongoDB change events.
//!
//! Keys carry the document identifier as an extended JSON string under
//! `id`; values carry the operation code under `op` and the payload as an
//! extended JSON string under `after` (inserts) or `patch` (updates).

mod delete;
mod insert;
mod update;

use std::collections::HashMap;

use bson::Document;
use ferry_projection::{Envelope, ID_FIELD};
use tracing::debug;

pub use delete::Delete;
pub use insert::Insert;
pub use update::Update;

use crate::error::CdcError;
use crate::extjson;
use crate::operation::{CdcOperation, OperationType};
use crate::write_model::WriteModel;

pub(crate) const KEY_ID_FIELD: &str = "id";
pub(crate) const OP_FIELD: &str = "op";
pub(crate) const AFTER_FIELD: &str = "after";
pub(crate) const PATCH_FIELD: &str = "patch";

/// `{ "_id": <parsed key id> }`
pub(crate) fn id_filter(key: &Document) -> Result<Document, CdcError> {
    let raw = key.get_str(KEY_ID_FIELD).map_err(|_| {
        CdcError::MalformedIdentifier(format!(
            "key document has no string field \"{KEY_ID_FIELD}\""
        ))
    })?;
    let id = extjson::parse_value(raw).map_err(CdcError::MalformedIdentifier)?;

    let mut filter = Document::new();
    filter.insert(ID_FIELD, id);
    Ok(filter)
}

/// Parse the extended JSON document stored as a string under `field`.
pub(crate) fn embedded_document(
    value: &Document,
    field: &'static str,
) -> Result<Document, CdcError> {
    let raw = value
        .get_str(field)
        .map_err(|_| CdcError::MissingField(field))?;
    extjson::parse_document(raw).map_err(CdcError::MalformedDocument)
}

/// Dispatches change events to the operation registered for their `op`.
pub struct MongoDbHandler {
    operations: HashMap<OperationType, Box<dyn CdcOperation>>,
}

impl Default for MongoDbHandler {
    fn default() -> Self {
        let mut operations: HashMap<OperationType, Box<dyn CdcOperation>> = HashMap::new();
        operations.insert(OperationType::Create, Box::new(Insert));
        operations.insert(OperationType::Read, Box::new(Insert));
        operations.insert(OperationType::Update, Box::new(Update));
        operations.insert(OperationType::Delete, Box::new(Delete));
        MongoDbHandler { operations }
    }
}

impl MongoDbHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the operation used for `op`.
    pub fn with_operation(
        mut self,
        op: OperationType,
        operation: impl CdcOperation + 'static,
    ) -> Self {
        self.operations.insert(op, Box::new(operation));
        self
    }

    /// Translate one event into a write.
    ///
    /// Events without a value (or with an empty one) are tombstones kept for
    /// topic compaction and produce no write.
    pub fn handle(&self, envelope: &Envelope) -> Result<Option<WriteModel>, CdcError> {
        let key = envelope.key().ok_or(CdcError::MissingKeyDocument)?;

        let value = match envelope.value() {
            Some(value) if !value.is_empty() => value,
            _ => {
                debug!(key = %key, "skipping tombstone event");
                return Ok(None);
            }
        };

        let op: OperationType = value
            .get_str(OP_FIELD)
            .map_err(|_| CdcError::MissingField(OP_FIELD))?
            .parse()?;

        let operation = self
            .operations
            .get(&op)
            .ok_or_else(|| CdcError::UnknownOperation(op.to_string()))?;

        debug!(op = %op, key = %key, "handling change event");
        operation.perform(envelope).map(Some)
    }
}
