use bson::spec::BinarySubtype;
use bson::{Binary, Bson, Document, doc};
use ferry_projection::{
    Envelope, FieldProjector, ProjectionMode, ProjectorKind, Target, parse_field_list,
};

pub fn bytes(raw: &[u8]) -> Bson {
    Bson::Binary(Binary {
        subtype: BinarySubtype::Generic,
        bytes: raw.to_vec(),
    })
}

pub fn flat_envelope() -> Envelope {
    Envelope::new(
        Some(doc! {
            "_id": "ABC-123", "myBoolean": true, "myInt": 42,
            "myBytes": bytes(b"ABC"), "myArray": [],
        }),
        Some(doc! {
            "_id": "XYZ-789", "myLong": 42_i64, "myDouble": 23.23, "myString": "BSON",
            "myBytes": bytes(b"xyz"), "myArray": [],
        }),
    )
}

pub fn nested_envelope() -> Envelope {
    Envelope::new(
        Some(doc! {
            "_id": "ABC-123", "myInt": 42,
            "subDoc1": { "myString": "BSON1", "myBoolean": false },
            "subDoc2": { "myString": "BSON2", "myBoolean": true },
        }),
        Some(doc! {
            "_id": "XYZ-789", "myBoolean": true,
            "subDoc1": {
                "myFieldA": "some text", "myFieldB": 12.34,
                "subSubDoc": { "myString": "some text", "myInt": 0, "myBoolean": false },
            },
            "subDoc2": {
                "myFieldA": "some text", "myFieldB": 12.34,
                "subSubDoc": {
                    "myBytes": bytes(b"xyz"),
                    "myArray": [ { "key": "abc", "value": 123 }, { "key": "xyz", "value": 987 } ],
                },
            },
        }),
    )
}

/// One row of a projection table: the configured field list and the
/// document expected in the projected slot.
pub struct Case {
    pub fields: &'static str,
    pub expected: Document,
}

pub fn case(fields: &'static str, expected: Document) -> Case {
    Case { fields, expected }
}

pub fn projector(kind: ProjectorKind, fields: &str) -> FieldProjector {
    let patterns = parse_field_list(fields).unwrap();
    match kind.mode() {
        ProjectionMode::Blacklist => match kind.target() {
            Target::Key => FieldProjector::blacklist_key(patterns),
            Target::Value => FieldProjector::blacklist_value(patterns),
        },
        ProjectionMode::Whitelist => match kind.target() {
            Target::Key => FieldProjector::whitelist_key(patterns),
            Target::Value => FieldProjector::whitelist_value(patterns),
        },
    }
}

/// Run every case against a fresh envelope and compare the projected slot.
pub fn run_table(kind: ProjectorKind, input: fn() -> Envelope, cases: Vec<Case>) {
    for Case { fields, expected } in cases {
        let mut envelope = input();
        projector(kind, fields).project(&mut envelope).unwrap();
        let actual = envelope
            .get(kind.target())
            .unwrap_or_else(|| panic!("{kind} with [{fields}]: slot vanished"));
        assert_eq!(actual, &expected, "{kind} with [{fields}]");
    }
}
