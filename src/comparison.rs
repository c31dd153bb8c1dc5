use serde_json::Value;

/// Stable textual form of a value, used whenever two answers are compared.
///
/// `null` is the empty string, strings are themselves, everything else is
/// its compact JSON serialization.
pub fn canonical(v: &Value) -> String {
    match v {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => serde_json::to_string(other).unwrap_or_else(|_| other.to_string()),
    }
}

/// Value-vs-value equality on canonical forms.
///
/// Case-insensitive as soon as either side is a string; structural and
/// numeric forms compare exactly.
pub fn values_equal(a: &Value, b: &Value) -> bool {
    let (ca, cb) = (canonical(a), canonical(b));
    if a.is_string() || b.is_string() {
        eq_ignore_case(&ca, &cb)
    } else {
        ca == cb
    }
}

pub fn eq_ignore_case(a: &str, b: &str) -> bool {
    a == b || a.to_lowercase() == b.to_lowercase()
}
