use std::path::Path;

use ferry_projection::{Projection, ProjectionMode};
use serde::{Deserialize, Serialize};

use crate::error::SinkError;

/// Projection flavour for one half of the record. `none` installs no
/// projector at all.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectionType {
    #[default]
    None,
    Blacklist,
    Whitelist,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectionConfig {
    #[serde(default)]
    pub mode: ProjectionType,
    /// Comma-separated dotted paths, e.g. `"a,b.*,c.**"`.
    #[serde(default)]
    pub fields: String,
}

impl ProjectionConfig {
    pub fn new(mode: ProjectionType, fields: &str) -> Self {
        ProjectionConfig {
            mode,
            fields: fields.to_string(),
        }
    }

    /// The parsed projection, or `None` when projection is switched off.
    pub fn projection(&self) -> Result<Option<Projection>, SinkError> {
        let mode = match self.mode {
            ProjectionType::None => return Ok(None),
            ProjectionType::Blacklist => ProjectionMode::Blacklist,
            ProjectionType::Whitelist => ProjectionMode::Whitelist,
        };
        let projection = Projection::from_field_list(mode, &self.fields)
            .map_err(|e| SinkError::Config(e.to_string()))?;
        Ok(Some(projection))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CdcHandlerType {
    Mongodb,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SinkConfig {
    #[serde(default)]
    pub key_projection: ProjectionConfig,
    #[serde(default)]
    pub value_projection: ProjectionConfig,
    #[serde(default)]
    pub change_data_capture: Option<CdcHandlerType>,
}

impl SinkConfig {
    /// Parse and validate a JSON config. Field lists are checked here so a
    /// bad pattern fails at startup rather than on the first record.
    pub fn from_json(text: &str) -> Result<Self, SinkError> {
        let config: SinkConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, SinkError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn validate(&self) -> Result<(), SinkError> {
        self.key_projection
            .projection()
            .map_err(|e| prefixed("key_projection", e))?;
        self.value_projection
            .projection()
            .map_err(|e| prefixed("value_projection", e))?;
        Ok(())
    }
}

fn prefixed(section: &str, err: SinkError) -> SinkError {
    match err {
        SinkError::Config(msg) => SinkError::Config(format!("{section}: {msg}")),
        other => other,
    }
}
