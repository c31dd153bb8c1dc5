use std::fs::File;
use std::io::BufReader;
use std::path::Path as FsPath;

use serde_json::Value;
use tracing::debug;

use crate::errors::{CmdError, Result};
use crate::jsonpath::{self, Path, ResolutionSet};

/// =========================
/// Public API (Queries)
/// =========================

/// Resolve `path` against `doc`, keeping every match.
pub fn query<'a>(doc: &'a Value, path: &str) -> ResolutionSet<'a> {
    jsonpath::evaluate(doc, &Path::parse(path))
}

/// Resolve `path` against `doc` in the legacy shape: one match is returned
/// as itself, several as an array, none as `null`.
pub fn get_json_value(doc: &Value, path: &str) -> Value {
    query(doc, path).into_value()
}

/// Convenience: parse JSON text and resolve `path`. Invalid JSON is `null`.
pub fn from_json(json_str: &str, path: &str) -> Value {
    match serde_json::from_str::<Value>(json_str) {
        Ok(doc) => get_json_value(&doc, path),
        Err(_) => Value::Null,
    }
}

/// =========================
/// Public API (Documents)
/// =========================

/// Read and parse a JSON file.
pub fn load_document(file: &FsPath) -> Result<Value> {
    if !file.exists() {
        return Err(CmdError::NoFile(file.to_path_buf()));
    }
    let reader = BufReader::new(File::open(file)?);
    let doc = serde_json::from_reader(reader)?;
    debug!(file = %file.display(), "loaded JSON document");
    Ok(doc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn sample_json() -> &'static str {
        r#"
        {
          "otel": {
            "client_id": [1131109258, 1919201358, 556614944, 1080005413],
            "resourceSpans": [{
              "resource": {
                "attributes": [
                  { "key": "service.name", "value": "nexa-agent-server" },
                  { "key": "service.version", "value": "0.0.3" },
                  { "key": "environment", "value": "production" }
                ]
              }
            }]
          }
        }
        "#
    }

    #[test]
    fn dotted_literal_inside_filter() {
        let out = from_json(
            sample_json(),
            r#"otel.resourceSpans[0].resource.attributes[?key=="service.name"].value"#,
        );
        assert_eq!(out, json!("nexa-agent-server"));
    }

    #[test]
    fn many_matches_come_back_as_array() {
        let out = from_json(sample_json(), "otel.resourceSpans[].resource.attributes[].key");
        assert_eq!(out, json!(["service.name", "service.version", "environment"]));
    }

    #[test]
    fn query_keeps_single_match_as_set() {
        let doc: Value = serde_json::from_str(sample_json()).unwrap();
        let set = query(&doc, "otel.client_id");
        assert_eq!(set.len(), 1);
        assert_eq!(set.first(), &json!([1131109258, 1919201358, 556614944, 1080005413]));
    }

    #[test]
    fn invalid_json_is_null() {
        assert_eq!(from_json("{not json", "a"), Value::Null);
    }

    #[test]
    fn missing_file_is_reported() {
        let err = load_document(FsPath::new("definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, CmdError::NoFile(_)));
        assert_eq!(err.exit_code(), crate::errors::exit_codes::NO_FILE);
    }
}
