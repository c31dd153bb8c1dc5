use serde_json::Value;
use tracing::{debug, trace, warn};

use crate::filter::Condition;
use crate::parser::Cursor;
use crate::value::Lookup;

static NULL: Value = Value::Null;

/// A tokenized and classified query path, e.g. `personagens[?raca=="Saiyajin"].nome`.
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    pub segments: Vec<Segment>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub raw: String,
    pub kind: SegmentKind,
}

/// An empty `prop` means "apply to the current value itself".
#[derive(Debug, Clone, PartialEq)]
pub enum SegmentKind {
    /// `name`
    Plain(String),
    /// `*` or `[]`
    Wildcard,
    /// `prop[3]` or `[3]`
    Index { prop: String, index: usize },
    /// `prop[]`
    Expand { prop: String },
    /// `prop[?k=="v"]` or `[?k=="v"]`; `condition` is `None` when malformed.
    Filter {
        prop: String,
        condition: Option<Condition>,
    },
}

impl Path {
    pub fn parse(input: &str) -> Path {
        let segments = tokenize(input)
            .into_iter()
            .map(|raw| Segment {
                raw: raw.to_string(),
                kind: classify(raw),
            })
            .collect::<Vec<_>>();
        debug!(path = input, segments = segments.len(), "parsed path");
        Path { segments }
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

/// Split a path on `.`, except inside `[...]` runs.
///
/// Empty segments between consecutive dots are kept; a trailing empty one is
/// not. An unmatched `[` extends to the end of the input.
pub fn tokenize(path: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut p = Cursor::new(path);
    let mut start = 0;
    while let Some(c) = p.peek_char() {
        match c {
            '.' => {
                out.push(&path[start..p.pos()]);
                p.consume_char('.');
                start = p.pos();
            }
            '[' => {
                p.take_bracketed();
            }
            _ => {
                p.consume_char(c);
            }
        }
    }
    if start < path.len() {
        out.push(&path[start..]);
    }
    out
}

/// Decide what a raw segment means. First match wins:
/// wildcard, filter, index, expand, plain key.
pub fn classify(raw: &str) -> SegmentKind {
    let kind = if raw == "*" || raw == "[]" {
        SegmentKind::Wildcard
    } else if let Some((prop, cond)) = split_filter(raw) {
        let condition = Condition::parse(cond);
        if condition.is_none() {
            warn!(segment = raw, "malformed filter condition, nothing will match");
        }
        SegmentKind::Filter {
            prop: prop.to_string(),
            condition,
        }
    } else if let Some((prop, digits)) = split_index(raw) {
        SegmentKind::Index {
            prop: prop.to_string(),
            // too large for usize is out of range for any array anyway
            index: digits.parse().unwrap_or(usize::MAX),
        }
    } else if let Some(prop) = raw.strip_suffix("[]") {
        SegmentKind::Expand {
            prop: prop.to_string(),
        }
    } else {
        SegmentKind::Plain(raw.to_string())
    };
    trace!(segment = raw, ?kind, "classified segment");
    kind
}

// `<prop>[?<cond>]`, prop may be empty; the condition runs to the final `]`.
fn split_filter(raw: &str) -> Option<(&str, &str)> {
    let body = raw.strip_suffix(']')?;
    let at = body.find("[?")?;
    Some((&body[..at], &body[at + 2..]))
}

// `<prop>[<digits>]`, prop may be empty.
fn split_index(raw: &str) -> Option<(&str, &str)> {
    let body = raw.strip_suffix(']')?;
    let at = body.rfind('[')?;
    let digits = &body[at + 1..];
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some((&body[..at], digits))
}

/// The working set of values while a path is walked.
///
/// Never empty: a step that produces no candidates yields `[null]`.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolutionSet<'a> {
    values: Vec<&'a Value>,
}

impl<'a> ResolutionSet<'a> {
    pub fn single(v: &'a Value) -> Self {
        Self { values: vec![v] }
    }

    pub fn missing() -> Self {
        Self::single(&NULL)
    }

    pub fn from_fan_out(values: Vec<&'a Value>) -> Self {
        if values.is_empty() {
            Self::missing()
        } else {
            Self { values }
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn first(&self) -> &'a Value {
        self.values[0]
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a Value> + '_ {
        self.values.iter().copied()
    }

    pub fn to_vec(&self) -> Vec<Value> {
        self.iter().cloned().collect()
    }

    /// The legacy answer shape: a lone value as itself, several as an array.
    pub fn into_value(self) -> Value {
        if self.values.len() == 1 {
            self.values[0].clone()
        } else {
            Value::Array(self.to_vec())
        }
    }
}

/// Walk `path` over `root`. Lookup misses and shape mismatches become `null`
/// entries; `null` entries contribute nothing to the next step.
pub fn evaluate<'a>(root: &'a Value, path: &Path) -> ResolutionSet<'a> {
    if path.is_empty() {
        return ResolutionSet::missing();
    }
    let mut current = ResolutionSet::single(root);
    for seg in &path.segments {
        let mut next = Vec::new();
        for v in current.iter().filter(|v| !v.is_null()) {
            step(&seg.kind, v, &mut next);
        }
        trace!(segment = %seg.raw, fan_out = next.len(), "applied segment");
        current = ResolutionSet::from_fan_out(next);
    }
    current
}

fn step<'a>(kind: &SegmentKind, v: &'a Value, next: &mut Vec<&'a Value>) {
    match kind {
        SegmentKind::Wildcard => match v {
            Value::Array(arr) => next.extend(arr),
            Value::Object(map) => next.extend(map.values()),
            _ => next.push(&NULL),
        },
        SegmentKind::Filter { prop, condition } => {
            match target(v, prop).and_then(Lookup::as_sequence) {
                Some(arr) => next.extend(
                    arr.iter()
                        .filter(|el| condition.as_ref().is_some_and(|c| c.matches(el))),
                ),
                None => next.push(&NULL),
            }
        }
        SegmentKind::Index { prop, index } => {
            next.push(
                target(v, prop)
                    .and_then(|t| t.try_get_by_index(*index))
                    .unwrap_or(&NULL),
            );
        }
        SegmentKind::Expand { prop } => match target(v, prop).and_then(Lookup::as_sequence) {
            Some(arr) => next.extend(arr),
            None => next.push(&NULL),
        },
        SegmentKind::Plain(key) => next.push(v.try_get_by_key(key).unwrap_or(&NULL)),
    }
}

fn target<'a>(v: &'a Value, prop: &str) -> Option<&'a Value> {
    if prop.is_empty() {
        Some(v)
    } else {
        v.try_get_by_key(prop)
    }
}
