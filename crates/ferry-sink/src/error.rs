use std::fmt;

use ferry_cdc::CdcError;
use ferry_projection::ProjectionError;

#[derive(Debug)]
pub enum SinkError {
    Io(std::io::Error),
    Json(serde_json::Error),
    Config(String),
    InvalidRecord(String),
    Projection(ProjectionError),
    Cdc(CdcError),
}

impl fmt::Display for SinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SinkError::Io(e) => write!(f, "io error: {e}"),
            SinkError::Json(e) => write!(f, "json error: {e}"),
            SinkError::Config(msg) => write!(f, "config error: {msg}"),
            SinkError::InvalidRecord(msg) => write!(f, "invalid record: {msg}"),
            SinkError::Projection(e) => write!(f, "projection error: {e}"),
            SinkError::Cdc(e) => write!(f, "cdc error: {e}"),
        }
    }
}

impl std::error::Error for SinkError {}

impl From<std::io::Error> for SinkError {
    fn from(e: std::io::Error) -> Self {
        SinkError::Io(e)
    }
}

impl From<serde_json::Error> for SinkError {
    fn from(e: serde_json::Error) -> Self {
        SinkError::Json(e)
    }
}

impl From<ProjectionError> for SinkError {
    fn from(e: ProjectionError) -> Self {
        SinkError::Projection(e)
    }
}

impl From<CdcError> for SinkError {
    fn from(e: CdcError) -> Self {
        SinkError::Cdc(e)
    }
}
