//! Field projection for change-event envelopes.
//!
//! A [`FieldProjector`] filters the key or value document of an
//! [`Envelope`] against a set of dotted [`PathPattern`]s, either removing
//! what they name (blacklist) or keeping only what they name (whitelist).

mod engine;
mod envelope;
mod error;
mod node;
mod pattern;
mod processor;
mod projector;

pub use bson::{Bson, Document};
pub use engine::{ID_FIELD, ProjectionMode, project};
pub use envelope::{Envelope, Target};
pub use error::ProjectionError;
pub use node::Node;
pub use pattern::{PathPattern, Segment, parse_field_list};
pub use processor::{PostProcessor, ProcessorChain};
pub use projector::{FieldProjector, Projection, ProjectorKind};
