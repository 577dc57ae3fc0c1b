use std::io::{BufRead, Write};

use ferry_cdc::{MongoDbHandler, WriteModel};
use ferry_projection::{Envelope, FieldProjector, ProcessorChain, Target};
use tracing::{debug, warn};

use crate::config::{CdcHandlerType, SinkConfig};
use crate::error::SinkError;
use crate::record::{parse_record, render_output};

/// What became of one record.
#[derive(Debug, Clone, PartialEq)]
pub enum Output {
    /// No change data capture configured: the processed envelope itself.
    Record(Envelope),
    Write(WriteModel),
    /// A tombstone, nothing to write.
    Skipped,
}

/// Post processors followed by an optional change data capture handler.
pub struct Pipeline {
    chain: ProcessorChain,
    handler: Option<MongoDbHandler>,
}

impl Pipeline {
    pub fn from_config(config: &SinkConfig) -> Result<Self, SinkError> {
        let mut chain = ProcessorChain::new();
        if let Some(projection) = config.key_projection.projection()? {
            chain.push(FieldProjector::new(Target::Key, projection));
        }
        if let Some(projection) = config.value_projection.projection()? {
            chain.push(FieldProjector::new(Target::Value, projection));
        }

        let handler = config.change_data_capture.map(|kind| match kind {
            CdcHandlerType::Mongodb => MongoDbHandler::new(),
        });

        Ok(Pipeline { chain, handler })
    }

    pub fn processor_names(&self) -> Vec<&str> {
        self.chain.names()
    }

    pub fn has_cdc(&self) -> bool {
        self.handler.is_some()
    }

    pub fn process(&self, mut envelope: Envelope) -> Result<Output, SinkError> {
        self.chain.process(&mut envelope)?;

        let Some(handler) = &self.handler else {
            return Ok(Output::Record(envelope));
        };
        match handler.handle(&envelope)? {
            Some(model) => Ok(Output::Write(model)),
            None => Ok(Output::Skipped),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    pub processed: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// Process newline-delimited records from `input`, writing one rendered
/// output per line to `output`.
///
/// A bad record, including a line that is not UTF-8, is logged and counted,
/// and processing moves on. Only I/O errors end the run.
pub fn run<R: BufRead, W: Write>(
    input: R,
    output: &mut W,
    pipeline: &Pipeline,
) -> Result<RunStats, SinkError> {
    let mut stats = RunStats::default();

    for (index, raw) in input.split(b'\n').enumerate() {
        let raw = raw?;
        let line = match String::from_utf8(raw) {
            Ok(line) => line,
            Err(e) => {
                let e = SinkError::InvalidRecord(format!("record is not valid UTF-8: {e}"));
                warn!(line = index + 1, error = %e, "record failed");
                stats.failed += 1;
                continue;
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        let result = parse_record(&line).and_then(|envelope| pipeline.process(envelope));
        match result {
            Ok(out) => match render_output(&out) {
                Some(rendered) => {
                    writeln!(output, "{rendered}")?;
                    stats.processed += 1;
                }
                None => {
                    debug!(line = index + 1, "skipped record");
                    stats.skipped += 1;
                }
            },
            Err(e) => {
                warn!(line = index + 1, error = %e, "record failed");
                stats.failed += 1;
            }
        }
    }

    output.flush()?;
    Ok(stats)
}
