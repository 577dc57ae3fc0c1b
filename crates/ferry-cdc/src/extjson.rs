use bson::{Bson, Document};

/// Parse a single MongoDB extended JSON value, e.g. `"abc"`, `1004` or
/// `{"$oid": "..."}`.
pub(crate) fn parse_value(text: &str) -> Result<Bson, String> {
    let json: serde_json::Value =
        serde_json::from_str(text).map_err(|e| format!("invalid JSON \"{text}\": {e}"))?;
    Bson::try_from(json).map_err(|e| format!("invalid extended JSON \"{text}\": {e}"))
}

/// Parse an extended JSON object into a document.
pub(crate) fn parse_document(text: &str) -> Result<Document, String> {
    match parse_value(text)? {
        Bson::Document(doc) => Ok(doc),
        other => Err(format!("expected a document, got {:?}", other.element_type())),
    }
}
