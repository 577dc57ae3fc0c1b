use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CdcError {
    MissingKeyDocument,
    MissingField(&'static str),
    MalformedIdentifier(String),
    MalformedDocument(String),
    UnknownOperation(String),
}

impl fmt::Display for CdcError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CdcError::MissingKeyDocument => {
                write!(f, "key document must not be missing for change data capture")
            }
            CdcError::MissingField(field) => {
                write!(f, "value document is missing string field \"{field}\"")
            }
            CdcError::MalformedIdentifier(msg) => write!(f, "malformed identifier: {msg}"),
            CdcError::MalformedDocument(msg) => write!(f, "malformed document: {msg}"),
            CdcError::UnknownOperation(op) => write!(f, "unknown operation type: {op}"),
        }
    }
}

impl std::error::Error for CdcError {}
