use std::fmt;

use bson::Document;
/// Which half of an [`Envelope`] an operation works on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Key,
    Value,
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Key => f.write_str("key"),
            Target::Value => f.write_str("value"),
        }
    }
}

/// The key and value documents of a single change event.
///
/// Either half may be absent (a tombstone has no value, a keyless topic has
/// no key).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Envelope {
    pub key: Option<Document>,
    pub value: Option<Document>,
}

impl Envelope {
    pub fn new(key: Option<Document>, value: Option<Document>) -> Self {
        Envelope { key, value }
    }

    pub fn key(&self) -> Option<&Document> {
        self.key.as_ref()
    }

    pub fn value(&self) -> Option<&Document> {
        self.value.as_ref()
    }

    pub fn get(&self, target: Target) -> Option<&Document> {
        match target {
            Target::Key => self.key.as_ref(),
            Target::Value => self.value.as_ref(),
        }
    }

    pub fn get_mut(&mut self, target: Target) -> Option<&mut Document> {
        match target {
            Target::Key => self.key.as_mut(),
            Target::Value => self.value.as_mut(),
        }
    }

    /// Put `doc` into the given slot, returning what was there.
    pub fn replace(&mut self, target: Target, doc: Document) -> Option<Document> {
        let slot = match target {
            Target::Key => &mut self.key,
            Target::Value => &mut self.value,
        };
        slot.replace(doc)
    }
}

#[cfg(test)]
mod tests {
    use bson::doc;

    use super::*;

    #[test]
    fn slots_by_target() {
        let mut env = Envelope::new(Some(doc! { "_id": 1 }), None);
        assert_eq!(env.get(Target::Key), Some(&doc! { "_id": 1 }));
        assert!(env.get(Target::Value).is_none());
        assert!(env.get_mut(Target::Value).is_none());

        let old = env.replace(Target::Value, doc! { "a": 2 });
        assert!(old.is_none());
        assert_eq!(env.value(), Some(&doc! { "a": 2 }));

        let old = env.replace(Target::Key, doc! { "_id": 3 });
        assert_eq!(old, Some(doc! { "_id": 1 }));
        assert_eq!(env.key(), Some(&doc! { "_id": 3 }));
    }

    #[test]
    fn target_display() {
        assert_eq!(Target::Key.to_string(), "key");
        assert_eq!(Target::Value.to_string(), "value");
    }
}
