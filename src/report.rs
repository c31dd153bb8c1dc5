use std::io::Write;

use itertools::Itertools;
use serde_json::Value;
use tracing::debug;

use crate::cli::{parse_operand, Operand};
use crate::comparison::{canonical, eq_ignore_case, values_equal};
use crate::engine::get_json_value;
use crate::errors::{exit_codes, CmdError, Result};

/// Whether a run found what it was asked about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Found,
    NotFound,
}

impl Outcome {
    pub fn exit_code(self) -> u8 {
        match self {
            Outcome::Found => exit_codes::OK,
            Outcome::NotFound => exit_codes::DIFF,
        }
    }
}

/// Text shown after `label : `. Strings are printed raw, everything else as
/// compact JSON.
pub fn render(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Label for the `idx`-th element of a multi-valued answer: each `[]` and
/// `*` in the key becomes `[idx]`.
pub fn element_label(key: &str, idx: usize) -> String {
    let slot = format!("[{idx}]");
    key.replace("[]", &slot).replace('*', &slot)
}

/// Read mode: print every comma-separated key's value(s).
pub fn run_read<W: Write>(doc: &Value, payload: &str, out: &mut W) -> Result<Outcome> {
    for key in payload.split(',').map(str::trim).filter(|k| !k.is_empty()) {
        match get_json_value(doc, key) {
            Value::Array(items) => {
                for (idx, item) in items.iter().enumerate() {
                    writeln!(out, "{} : {}", element_label(key, idx), render(item))?;
                }
            }
            single => writeln!(out, "{key} : {}", render(&single))?,
        }
    }
    Ok(Outcome::Found)
}

/// Compare mode: `left,right` where right is `@literal` or another path.
pub fn run_compare<W: Write>(doc: &Value, payload: &str, out: &mut W) -> Result<Outcome> {
    let (left_path, right_token) = payload
        .split_once(',')
        .map(|(l, r)| (l.trim(), r.trim()))
        .ok_or_else(|| CmdError::Usage("/compare expects left,right".into()))?;

    let right = match parse_operand(right_token)? {
        Operand::Literal(s) => Value::String(s),
        Operand::Path(p) => get_json_value(doc, &p),
    };
    let right_text = canonical(&right);

    // `<prefix>.<value>` names the value being looked for inside <prefix>
    if let Some((prefix, last)) = split_last_key(left_path) {
        if eq_ignore_case(last, &right_text) {
            let found = match get_json_value(doc, prefix) {
                Value::Array(items) => items.iter().any(|el| values_equal(el, &right)),
                single => values_equal(&single, &right),
            };
            debug!(prefix, found, "membership check");
            writeln!(out, "{}", if found { "EXISTS" } else { "DOES NOT EXIST" })?;
            return Ok(if found { Outcome::Found } else { Outcome::NotFound });
        }
    }

    let left = get_json_value(doc, left_path);
    let matches: Vec<(usize, &Value)> = match &left {
        Value::Array(items) => items
            .iter()
            .positions(|lv| values_equal(lv, &right))
            .map(|i| (i, &items[i]))
            .collect(),
        single if values_equal(single, &right) => vec![(0, single)],
        _ => Vec::new(),
    };
    debug!(left = left_path, matches = matches.len(), "compared values");

    if matches.is_empty() {
        writeln!(out, "No matching items found.")?;
        return Ok(Outcome::NotFound);
    }
    writeln!(out, "FOUND: {}", matches.len())?;
    for (idx, val) in matches {
        writeln!(out, "[{idx}] : {}", render(val))?;
    }
    Ok(Outcome::Found)
}

// Split `a.b.c` into (`a.b`, `c`) when the last key has no `.`, `[` or `]`.
fn split_last_key(path: &str) -> Option<(&str, &str)> {
    let (prefix, last) = path.rsplit_once('.')?;
    if last.is_empty() || last.contains(['[', ']']) {
        return None;
    }
    Some((prefix, last))
}
