use tracing::trace;

use crate::envelope::Envelope;
use crate::error::ProjectionError;

/// A per-record transform applied to an envelope before it becomes a write.
pub trait PostProcessor: Send + Sync {
    fn process(&self, envelope: &mut Envelope) -> Result<(), ProjectionError>;

    fn name(&self) -> &str;
}

/// Runs post processors in insertion order, stopping at the first failure.
#[derive(Default)]
pub struct ProcessorChain {
    processors: Vec<Box<dyn PostProcessor>>,
}

impl ProcessorChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, processor: impl PostProcessor + 'static) -> &mut Self {
        self.processors.push(Box::new(processor));
        self
    }

    pub fn len(&self) -> usize {
        self.processors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.processors.is_empty()
    }

    pub fn names(&self) -> Vec<&str> {
        self.processors.iter().map(|p| p.name()).collect()
    }

    pub fn process(&self, envelope: &mut Envelope) -> Result<(), ProjectionError> {
        for processor in &self.processors {
            trace!(processor = processor.name(), "running post processor");
            processor.process(envelope)?;
        }
        Ok(())
    }
}

impl std::fmt::Debug for ProcessorChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProcessorChain")
            .field("processors", &self.names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use bson::doc;

    use super::*;
    use crate::envelope::Target;
    use crate::pattern::parse_field_list;
    use crate::projector::FieldProjector;

    #[test]
    fn empty_chain_is_identity() {
        let chain = ProcessorChain::new();
        let mut env = Envelope::new(Some(doc! { "_id": 1, "a": 2 }), None);
        chain.process(&mut env).unwrap();
        assert_eq!(env.key(), Some(&doc! { "_id": 1, "a": 2 }));
        assert!(chain.is_empty());
    }

    #[test]
    fn runs_in_order() {
        let mut chain = ProcessorChain::new();
        chain
            .push(FieldProjector::whitelist_value(parse_field_list("a,b").unwrap()))
            .push(FieldProjector::blacklist_value(parse_field_list("b").unwrap()));

        let mut env = Envelope::new(None, Some(doc! { "_id": 1, "a": 1, "b": 2, "c": 3 }));
        chain.process(&mut env).unwrap();
        assert_eq!(env.value(), Some(&doc! { "_id": 1, "a": 1 }));
        assert_eq!(
            chain.names(),
            vec!["whitelist_value_projector", "blacklist_value_projector"]
        );
    }

    #[test]
    fn stops_at_first_failure() {
        let mut chain = ProcessorChain::new();
        chain
            .push(FieldProjector::blacklist_key(parse_field_list("a").unwrap()))
            .push(FieldProjector::blacklist_value(parse_field_list("a").unwrap()));

        let mut env = Envelope::new(None, Some(doc! { "_id": 1, "a": 1 }));
        let err = chain.process(&mut env).unwrap_err();
        assert_eq!(err, ProjectionError::MissingDocument(Target::Key));
        assert_eq!(env.value(), Some(&doc! { "_id": 1, "a": 1 }));
    }
}
