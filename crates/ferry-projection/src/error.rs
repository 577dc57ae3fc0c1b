use std::fmt;

use crate::envelope::Target;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectionError {
    InvalidPattern(String),
    MissingDocument(Target),
}

impl fmt::Display for ProjectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProjectionError::InvalidPattern(msg) => write!(f, "invalid field pattern: {msg}"),
            ProjectionError::MissingDocument(target) => {
                write!(f, "{target} document must not be missing for projection")
            }
        }
    }
}

impl std::error::Error for ProjectionError {}
