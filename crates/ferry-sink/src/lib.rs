pub mod config;
mod error;
mod pipeline;
mod record;

pub use config::{CdcHandlerType, ProjectionConfig, ProjectionType, SinkConfig};
pub use error::SinkError;
pub use pipeline::{Output, Pipeline, RunStats, run};
pub use record::{parse_record, render_output};
