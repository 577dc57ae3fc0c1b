use std::fmt;
use std::str::FromStr;

use ferry_projection::Envelope;

use crate::error::CdcError;
use crate::write_model::WriteModel;

/// Turns one change event into the write that applies it.
pub trait CdcOperation: Send + Sync {
    fn perform(&self, envelope: &Envelope) -> Result<WriteModel, CdcError>;
}

/// The `op` code carried by a change event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationType {
    Create,
    Read,
    Update,
    Delete,
}

impl OperationType {
    pub fn code(self) -> &'static str {
        match self {
            OperationType::Create => "c",
            OperationType::Read => "r",
            OperationType::Update => "u",
            OperationType::Delete => "d",
        }
    }
}

impl FromStr for OperationType {
    type Err = CdcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "c" => Ok(OperationType::Create),
            "r" => Ok(OperationType::Read),
            "u" => Ok(OperationType::Update),
            "d" => Ok(OperationType::Delete),
            other => Err(CdcError::UnknownOperation(other.to_string())),
        }
    }
}

impl fmt::Display for OperationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_codes() {
        for op in [
            OperationType::Create,
            OperationType::Read,
            OperationType::Update,
            OperationType::Delete,
        ] {
            assert_eq!(op.code().parse::<OperationType>().unwrap(), op);
        }
    }

    #[test]
    fn rejects_unknown_codes() {
        assert_eq!(
            "x".parse::<OperationType>(),
            Err(CdcError::UnknownOperation("x".into()))
        );
        assert!("".parse::<OperationType>().is_err());
        assert!("create".parse::<OperationType>().is_err());
    }
}
