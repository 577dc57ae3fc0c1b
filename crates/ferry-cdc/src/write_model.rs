use bson::{Document, doc};

/// A single write against the target collection.
#[derive(Debug, Clone, PartialEq)]
pub enum WriteModel {
    DeleteOne {
        filter: Document,
    },
    ReplaceOne {
        filter: Document,
        replacement: Document,
        upsert: bool,
    },
    UpdateOne {
        filter: Document,
        update: Document,
    },
}

impl WriteModel {
    pub fn filter(&self) -> &Document {
        match self {
            WriteModel::DeleteOne { filter }
            | WriteModel::ReplaceOne { filter, .. }
            | WriteModel::UpdateOne { filter, .. } => filter,
        }
    }

    /// Render as a command-style document, e.g.
    /// `{ "deleteOne": { "filter": { "_id": 1 } } }`.
    pub fn to_document(&self) -> Document {
        match self {
            WriteModel::DeleteOne { filter } => doc! {
                "deleteOne": { "filter": filter.clone() },
            },
            WriteModel::ReplaceOne {
                filter,
                replacement,
                upsert,
            } => doc! {
                "replaceOne": {
                    "filter": filter.clone(),
                    "replacement": replacement.clone(),
                    "upsert": *upsert,
                },
            },
            WriteModel::UpdateOne { filter, update } => doc! {
                "updateOne": { "filter": filter.clone(), "update": update.clone() },
            },
        }
    }
}
