use bson::{Bson, Document};
use ferry_projection::Envelope;
use serde_json::{Map, Value, json};

use crate::error::SinkError;
use crate::pipeline::Output;

/// Parse one input line: `{"key": <doc or null>, "value": <doc or null>}`
/// with both halves in MongoDB extended JSON.
pub fn parse_record(line: &str) -> Result<Envelope, SinkError> {
    let json: Value = serde_json::from_str(line)?;
    let Value::Object(mut fields) = json else {
        return Err(SinkError::InvalidRecord(
            "record must be a JSON object".into(),
        ));
    };

    let key = half(&mut fields, "key")?;
    let value = half(&mut fields, "value")?;
    Ok(Envelope::new(key, value))
}

fn half(fields: &mut Map<String, Value>, name: &str) -> Result<Option<Document>, SinkError> {
    match fields.remove(name) {
        None | Some(Value::Null) => Ok(None),
        Some(value @ Value::Object(_)) => match Bson::try_from(value) {
            Ok(Bson::Document(doc)) => Ok(Some(doc)),
            Ok(other) => Err(SinkError::InvalidRecord(format!(
                "{name} is not a document but {:?}",
                other.element_type()
            ))),
            Err(e) => Err(SinkError::InvalidRecord(format!("{name}: {e}"))),
        },
        Some(other) => Err(SinkError::InvalidRecord(format!(
            "{name} must be an object or null, got {other}"
        ))),
    }
}

/// Render an output as relaxed extended JSON. Skipped records render as
/// nothing.
pub fn render_output(output: &Output) -> Option<Value> {
    match output {
        Output::Record(envelope) => Some(json!({
            "key": envelope.key().map(relaxed),
            "value": envelope.value().map(relaxed),
        })),
        Output::Write(model) => Some(relaxed(&model.to_document())),
        Output::Skipped => None,
    }
}

fn relaxed(doc: &Document) -> Value {
    Bson::Document(doc.clone()).into_relaxed_extjson()
}

#[cfg(test)]
mod tests {
    use bson::doc;
    use ferry_cdc::WriteModel;

    use super::*;

    #[test]
    fn parses_both_halves() {
        let env = parse_record(r#"{"key": {"_id": 1}, "value": {"a": {"$numberLong": "5"}}}"#)
            .unwrap();
        assert_eq!(env.key(), Some(&doc! { "_id": 1 }));
        assert_eq!(env.value(), Some(&doc! { "a": 5_i64 }));
    }

    #[test]
    fn missing_and_null_halves() {
        let env = parse_record(r#"{"key": null}"#).unwrap();
        assert_eq!(env, Envelope::default());
    }

    #[test]
    fn rejects_non_documents() {
        assert!(matches!(parse_record("[1]"), Err(SinkError::InvalidRecord(_))));
        assert!(matches!(
            parse_record(r#"{"key": "abc"}"#),
            Err(SinkError::InvalidRecord(_))
        ));
        assert!(matches!(
            parse_record(r#"{"value": {"$oid": "596e275826f08b2730779e1f"}}"#),
            Err(SinkError::InvalidRecord(_))
        ));
        assert!(matches!(parse_record("{"), Err(SinkError::Json(_))));
    }

    #[test]
    fn renders_outputs() {
        let record = Output::Record(Envelope::new(None, Some(doc! { "a": "b" })));
        assert_eq!(
            render_output(&record),
            Some(json!({ "key": null, "value": { "a": "b" } }))
        );

        let write = Output::Write(WriteModel::DeleteOne {
            filter: doc! { "_id": "x" },
        });
        assert_eq!(
            render_output(&write),
            Some(json!({ "deleteOne": { "filter": { "_id": "x" } } }))
        );

        assert_eq!(render_output(&Output::Skipped), None);
    }
}
