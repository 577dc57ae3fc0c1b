use std::fmt;

use serde::{Deserialize, Deserializer};

use crate::error::ProjectionError;

const WILDCARD: &str = "*";
const DEEP_WILDCARD: &str = "**";

/// One dot-separated component of a [`PathPattern`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Matches a field with exactly this name.
    Literal(String),
    /// `*`: any single field name at the current level.
    Wildcard,
    /// `**`: the field and everything beneath it.
    DeepWildcard,
}

impl Segment {
    fn parse(part: &str) -> Self {
        match part {
            WILDCARD => Segment::Wildcard,
            DEEP_WILDCARD => Segment::DeepWildcard,
            name => Segment::Literal(name.to_string()),
        }
    }

    /// Whether this segment applies to a field called `name`.
    pub fn matches(&self, name: &str) -> bool {
        match self {
            Segment::Literal(literal) => literal == name,
            Segment::Wildcard | Segment::DeepWildcard => true,
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Literal(name) => f.write_str(name),
            Segment::Wildcard => f.write_str(WILDCARD),
            Segment::DeepWildcard => f.write_str(DEEP_WILDCARD),
        }
    }
}

/// A parsed dot-notation field path such as `subDoc.*.name` or `meta.**`.
///
/// Parsed once at configuration time and shared read-only afterwards. There
/// is no escaping: a field name containing a literal `.` cannot be addressed.
///
/// The segment list is never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPattern {
    segments: Vec<Segment>,
}

impl PathPattern {
    /// Parse a dotted path. Only the zero-length string is rejected; every
    /// component of a non-empty path is a legal segment (even an empty one,
    /// as in `a..b`).
    pub fn parse(text: &str) -> Result<Self, ProjectionError> {
        if text.is_empty() {
            return Err(ProjectionError::InvalidPattern(
                "field path must not be empty".into(),
            ));
        }
        Ok(PathPattern {
            segments: text.split('.').map(Segment::parse).collect(),
        })
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }
}

impl fmt::Display for PathPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}

impl std::str::FromStr for PathPattern {
    type Err = ProjectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PathPattern::parse(s)
    }
}

impl<'de> Deserialize<'de> for PathPattern {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        PathPattern::parse(&text).map_err(serde::de::Error::custom)
    }
}

/// Parse a comma-separated list of dotted paths, e.g. `"a, b.c, *.d"`.
///
/// Entries are trimmed and de-duplicated while keeping their first-seen
/// order. A blank list yields no patterns; a blank entry inside a non-blank
/// list is an error.
pub fn parse_field_list(list: &str) -> Result<Vec<PathPattern>, ProjectionError> {
    if list.trim().is_empty() {
        return Ok(Vec::new());
    }

    let mut patterns: Vec<PathPattern> = Vec::new();
    for entry in list.split(',') {
        let pattern = PathPattern::parse(entry.trim()).map_err(|_| {
            ProjectionError::InvalidPattern(format!("empty field path in list \"{list}\""))
        })?;
        if !patterns.contains(&pattern) {
            patterns.push(pattern);
        }
    }
    Ok(patterns)
}
