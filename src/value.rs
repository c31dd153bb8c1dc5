use serde_json::{Map, Value};

/// Non-failing accessors over a JSON value.
///
/// Every lookup answers `None` for a missing key, an out-of-range index or a
/// container of the wrong shape, so callers never branch on the value's type.
pub trait Lookup {
    fn try_get_by_key(&self, key: &str) -> Option<&Value>;
    fn try_get_by_index(&self, index: usize) -> Option<&Value>;
    fn as_sequence(&self) -> Option<&[Value]>;
    fn as_mapping(&self) -> Option<&Map<String, Value>>;
}

impl Lookup for Value {
    fn try_get_by_key(&self, key: &str) -> Option<&Value> {
        self.as_mapping()?.get(key)
    }

    fn try_get_by_index(&self, index: usize) -> Option<&Value> {
        self.as_sequence()?.get(index)
    }

    fn as_sequence(&self) -> Option<&[Value]> {
        match self {
            Value::Array(arr) => Some(arr.as_slice()),
            _ => None,
        }
    }

    fn as_mapping(&self) -> Option<&Map<String, Value>> {
        match self {
            Value::Object(map) => Some(map),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn lookups_degrade_to_none() {
        let doc = json!({"a": [1, 2], "s": "text"});
        assert_eq!(doc.try_get_by_key("a"), Some(&json!([1, 2])));
        assert_eq!(doc.try_get_by_key("missing"), None);
        assert_eq!(doc["a"].try_get_by_key("0"), None);
        assert_eq!(doc["a"].try_get_by_index(1), Some(&json!(2)));
        assert_eq!(doc["a"].try_get_by_index(2), None);
        assert_eq!(doc["s"].try_get_by_index(0), None);
        assert!(doc["s"].as_sequence().is_none());
    }
}
