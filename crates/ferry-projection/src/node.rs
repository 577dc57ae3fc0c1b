use bson::{Array, Bson, Document};

/// Borrowed view of a BSON value as the projection engine sees it.
///
/// Everything that is neither a document nor an array (strings, numbers,
/// binary, dates, ...) is an opaque scalar and is never looked into.
#[derive(Debug, Clone, Copy)]
pub enum Node<'a> {
    Scalar(&'a Bson),
    Array(&'a Array),
    Document(&'a Document),
}

impl<'a> Node<'a> {
    pub fn of(value: &'a Bson) -> Self {
        match value {
            Bson::Document(doc) => Node::Document(doc),
            Bson::Array(arr) => Node::Array(arr),
            other => Node::Scalar(other),
        }
    }

    /// The elements of an array as sub-documents, or `None` if this is not
    /// an array or any element is something other than a document.
    ///
    /// An empty array yields an empty list.
    pub fn documents(&self) -> Option<Vec<&'a Document>> {
        match *self {
            Node::Array(arr) => arr
                .iter()
                .map(|elem| match elem {
                    Bson::Document(doc) => Some(doc),
                    _ => None,
                })
                .collect(),
            _ => None,
        }
    }
}
