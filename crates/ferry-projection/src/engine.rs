use bson::{Bson, Document};

use crate::node::Node;
use crate::pattern::{PathPattern, Segment};

/// Top-level field that survives every projection.
pub const ID_FIELD: &str = "_id";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectionMode {
    /// Keep everything except the fields the patterns name.
    Blacklist,
    /// Drop everything except the fields the patterns name.
    Whitelist,
}

/// What a single pattern says about a single field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Verdict<'p> {
    NoOp,
    RemoveWhole,
    KeepWhole,
    KeepEmpty,
    Recurse(&'p [Segment]),
}

/// How a field value is treated for the patterns that apply to it.
enum Shape<'a> {
    /// Scalars, and arrays nothing needs to look inside.
    Leaf,
    Document(&'a Document),
    /// An array whose elements are all documents, with at least one pattern
    /// continuing past the field name.
    Documents(Vec<&'a Document>),
}

impl<'a> Shape<'a> {
    fn of(value: &'a Bson, paths: &[&[Segment]]) -> Self {
        match Node::of(value) {
            Node::Document(doc) => Shape::Document(doc),
            node @ Node::Array(_) if continues_past(paths) => {
                node.documents().map_or(Shape::Leaf, Shape::Documents)
            }
            _ => Shape::Leaf,
        }
    }

    fn is_branch(&self) -> bool {
        !matches!(self, Shape::Leaf)
    }

    fn descend(&self, mode: ProjectionMode, paths: &[&[Segment]]) -> Option<Bson> {
        match self {
            Shape::Leaf => None,
            Shape::Document(doc) => Some(Bson::Document(project_level(doc, mode, paths, false))),
            Shape::Documents(docs) => Some(Bson::Array(
                docs.iter()
                    .map(|doc| Bson::Document(project_level(doc, mode, paths, false)))
                    .collect(),
            )),
        }
    }
}

/// Whether any path has segments left after the current one. A `**` head
/// swallows its tail, so it never continues.
fn continues_past(paths: &[&[Segment]]) -> bool {
    paths
        .iter()
        .any(|path| path.len() > 1 && path.first() != Some(&Segment::DeepWildcard))
}

/// Filter `doc` against `patterns`, returning a new document.
///
/// The input is only borrowed; callers swap the result in once it is
/// complete. Field order is preserved, arrays keep their length and order,
/// and a top-level `_id` is always carried over.
pub fn project(doc: &Document, mode: ProjectionMode, patterns: &[PathPattern]) -> Document {
    let paths: Vec<&[Segment]> = patterns.iter().map(PathPattern::segments).collect();
    project_level(doc, mode, &paths, true)
}

fn project_level(
    doc: &Document,
    mode: ProjectionMode,
    paths: &[&[Segment]],
    top_level: bool,
) -> Document {
    let mut dest = Document::new();

    for (name, value) in doc {
        if top_level && name == ID_FIELD {
            dest.insert(name.clone(), value.clone());
            continue;
        }

        if let Some(projected) = project_field(name, value, mode, paths) {
            dest.insert(name.clone(), projected);
        }
    }

    dest
}

fn project_field(
    name: &str,
    value: &Bson,
    mode: ProjectionMode,
    paths: &[&[Segment]],
) -> Option<Bson> {
    let applicable: Vec<&[Segment]> = paths
        .iter()
        .copied()
        .filter(|path| path.first().is_some_and(|head| head.matches(name)))
        .collect();

    if applicable.is_empty() {
        return match mode {
            ProjectionMode::Blacklist => Some(value.clone()),
            ProjectionMode::Whitelist => None,
        };
    }

    let shape = Shape::of(value, &applicable);
    let mut remainders: Vec<&[Segment]> = Vec::new();

    match mode {
        ProjectionMode::Blacklist => {
            for &path in &applicable {
                match verdict(path, &shape, mode) {
                    Verdict::RemoveWhole => return None,
                    Verdict::Recurse(rest) => remainders.push(rest),
                    _ => {}
                }
            }
            if remainders.is_empty() {
                Some(value.clone())
            } else {
                shape.descend(mode, &remainders)
            }
        }
        ProjectionMode::Whitelist => {
            let mut include = false;
            for &path in &applicable {
                match verdict(path, &shape, mode) {
                    Verdict::KeepWhole => return Some(value.clone()),
                    Verdict::KeepEmpty => include = true,
                    Verdict::Recurse(rest) => {
                        include = true;
                        remainders.push(rest);
                    }
                    _ => {}
                }
            }
            if include {
                shape.descend(mode, &remainders)
            } else {
                None
            }
        }
    }
}

/// Decide what one applicable path does to a field of the given shape.
fn verdict<'p>(path: &'p [Segment], shape: &Shape<'_>, mode: ProjectionMode) -> Verdict<'p> {
    let Some((head, rest)) = path.split_first() else {
        return Verdict::NoOp;
    };

    if *head == Segment::DeepWildcard {
        return match mode {
            ProjectionMode::Blacklist => Verdict::RemoveWhole,
            ProjectionMode::Whitelist => Verdict::KeepWhole,
        };
    }

    match (rest.is_empty(), shape.is_branch(), mode) {
        // `*` never removes a sub-document wholesale, a named field does. An
        // array is removed whatever other paths continue into it.
        (true, true, ProjectionMode::Blacklist) => match (head, shape) {
            (Segment::Wildcard, Shape::Document(_)) => Verdict::NoOp,
            _ => Verdict::RemoveWhole,
        },
        (true, true, ProjectionMode::Whitelist) => Verdict::KeepEmpty,
        (true, false, ProjectionMode::Blacklist) => Verdict::RemoveWhole,
        (true, false, ProjectionMode::Whitelist) => Verdict::KeepWhole,
        (false, true, _) => Verdict::Recurse(rest),
        // Leftover path on a leaf.
        (false, false, ProjectionMode::Blacklist) => Verdict::RemoveWhole,
        (false, false, ProjectionMode::Whitelist) => Verdict::NoOp,
    }
}
