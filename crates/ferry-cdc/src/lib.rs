//! Change data capture: turning change-event envelopes into write models.

mod error;
mod extjson;
pub mod mongodb;
mod operation;
mod write_model;

pub use error::CdcError;
pub use mongodb::MongoDbHandler;
pub use operation::{CdcOperation, OperationType};
pub use write_model::WriteModel;
