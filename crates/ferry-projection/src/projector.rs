use std::fmt;

use tracing::{debug, trace};

use crate::engine::{self, ProjectionMode};
use crate::envelope::{Envelope, Target};
use crate::error::ProjectionError;
use crate::pattern::{PathPattern, parse_field_list};
use crate::processor::PostProcessor;

/// A mode together with the patterns it applies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Projection {
    pub mode: ProjectionMode,
    pub patterns: Vec<PathPattern>,
}

impl Projection {
    pub fn new(mode: ProjectionMode, patterns: Vec<PathPattern>) -> Self {
        Projection { mode, patterns }
    }

    /// Build from a comma-separated field list such as `"a,b.*,c.**"`.
    pub fn from_field_list(mode: ProjectionMode, list: &str) -> Result<Self, ProjectionError> {
        Ok(Projection::new(mode, parse_field_list(list)?))
    }
}

/// The four projector flavours.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectorKind {
    BlacklistKey,
    BlacklistValue,
    WhitelistKey,
    WhitelistValue,
}

impl ProjectorKind {
    pub fn new(mode: ProjectionMode, target: Target) -> Self {
        match (mode, target) {
            (ProjectionMode::Blacklist, Target::Key) => ProjectorKind::BlacklistKey,
            (ProjectionMode::Blacklist, Target::Value) => ProjectorKind::BlacklistValue,
            (ProjectionMode::Whitelist, Target::Key) => ProjectorKind::WhitelistKey,
            (ProjectionMode::Whitelist, Target::Value) => ProjectorKind::WhitelistValue,
        }
    }

    pub fn mode(self) -> ProjectionMode {
        match self {
            ProjectorKind::BlacklistKey | ProjectorKind::BlacklistValue => ProjectionMode::Blacklist,
            ProjectorKind::WhitelistKey | ProjectorKind::WhitelistValue => ProjectionMode::Whitelist,
        }
    }

    pub fn target(self) -> Target {
        match self {
            ProjectorKind::BlacklistKey | ProjectorKind::WhitelistKey => Target::Key,
            ProjectorKind::BlacklistValue | ProjectorKind::WhitelistValue => Target::Value,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ProjectorKind::BlacklistKey => "blacklist_key_projector",
            ProjectorKind::BlacklistValue => "blacklist_value_projector",
            ProjectorKind::WhitelistKey => "whitelist_key_projector",
            ProjectorKind::WhitelistValue => "whitelist_value_projector",
        }
    }
}

impl fmt::Display for ProjectorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Filters the key or value document of each envelope it is given.
///
/// Holds only immutable configuration, so one instance can be shared across
/// threads and reused for every record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldProjector {
    kind: ProjectorKind,
    patterns: Vec<PathPattern>,
}

impl FieldProjector {
    pub fn new(target: Target, projection: Projection) -> Self {
        let kind = ProjectorKind::new(projection.mode, target);
        debug!(
            projector = kind.name(),
            fields = ?projection.patterns.iter().map(ToString::to_string).collect::<Vec<_>>(),
            "configured field projector"
        );
        FieldProjector {
            kind,
            patterns: projection.patterns,
        }
    }

    pub fn blacklist_key(patterns: Vec<PathPattern>) -> Self {
        Self::new(Target::Key, Projection::new(ProjectionMode::Blacklist, patterns))
    }

    pub fn blacklist_value(patterns: Vec<PathPattern>) -> Self {
        Self::new(Target::Value, Projection::new(ProjectionMode::Blacklist, patterns))
    }

    pub fn whitelist_key(patterns: Vec<PathPattern>) -> Self {
        Self::new(Target::Key, Projection::new(ProjectionMode::Whitelist, patterns))
    }

    pub fn whitelist_value(patterns: Vec<PathPattern>) -> Self {
        Self::new(Target::Value, Projection::new(ProjectionMode::Whitelist, patterns))
    }

    /// Replace the targeted document of `envelope` with its projection.
    ///
    /// Fails without touching the envelope if the targeted half is absent.
    pub fn project(&self, envelope: &mut Envelope) -> Result<(), ProjectionError> {
        let target = self.kind.target();
        let doc = envelope
            .get_mut(target)
            .ok_or(ProjectionError::MissingDocument(target))?;

        let projected = engine::project(doc, self.kind.mode(), &self.patterns);
        trace!(
            projector = self.kind.name(),
            before = doc.len(),
            after = projected.len(),
            "projected document"
        );
        *doc = projected;
        Ok(())
    }
}

impl PostProcessor for FieldProjector {
    fn process(&self, envelope: &mut Envelope) -> Result<(), ProjectionError> {
        self.project(envelope)
    }

    fn name(&self) -> &str {
        self.kind.name()
    }
}
