use serde_json::Value;

use crate::comparison::{canonical, eq_ignore_case};
use crate::parser::Cursor;
use crate::value::Lookup;

/// A parsed `key == value` filter condition.
///
/// `expected` keeps the literal's raw text: quotes are stripped, nothing is
/// unescaped and no JSON typing is applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Condition {
    pub key: String,
    pub expected: String,
}

impl Condition {
    /// Parse `<key> == <value>`, where value is `"..."`, `'...'` or a bare
    /// token. Surrounding whitespace is allowed; anything else is `None`.
    pub fn parse(input: &str) -> Option<Condition> {
        let mut p = Cursor::new(input);
        p.skip_ws();
        let key = p.take_while(|c| !c.is_whitespace() && !matches!(c, '=' | '<' | '>' | '!'));
        if key.is_empty() {
            return None;
        }
        p.skip_ws();
        if !p.consume_str("==") {
            return None;
        }
        p.skip_ws();
        let expected = match p.peek_char()? {
            '"' | '\'' => p.take_quoted()?,
            _ => p.take_while(|c| !c.is_whitespace()),
        };
        p.skip_ws();
        if !p.eof() {
            return None;
        }
        Some(Condition {
            key: key.to_string(),
            expected: expected.to_string(),
        })
    }

    /// Does `element[key]` equal the expected literal?
    ///
    /// A missing or `null` property never matches. String properties compare
    /// case-insensitively, anything else by canonical form.
    pub fn matches(&self, element: &Value) -> bool {
        match element.try_get_by_key(&self.key) {
            None | Some(Value::Null) => false,
            Some(Value::String(s)) => eq_ignore_case(s, &self.expected),
            Some(other) => canonical(other) == self.expected,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn matches_filter(element: &Value, cond: &str) -> bool {
        Condition::parse(cond).is_some_and(|c| c.matches(element))
    }

    fn cond(key: &str, expected: &str) -> Option<Condition> {
        Some(Condition {
            key: key.into(),
            expected: expected.into(),
        })
    }

    #[test]
    fn parses_all_literal_forms() {
        assert_eq!(Condition::parse(r#"nome=="Goku""#), cond("nome", "Goku"));
        assert_eq!(Condition::parse("nome=='Son Goku'"), cond("nome", "Son Goku"));
        assert_eq!(Condition::parse("  age == 30  "), cond("age", "30"));
        assert_eq!(Condition::parse(r#"k=="x.y""#), cond("k", "x.y"));
        assert_eq!(Condition::parse(r#"k=="""#), cond("k", ""));
    }

    #[test]
    fn rejects_malformed() {
        for bad in [
            "",
            "k",
            "k=",
            "k==",
            "k = 'a'",
            "k!='a'",
            "k<3",
            r#"k=="a"b"#,
            r#"k=="unterminated"#,
            "k==a b",
            "==a",
        ] {
            assert_eq!(Condition::parse(bad), None, "{bad:?} should not parse");
        }
    }

    #[test]
    fn string_match_ignores_case() {
        let el = json!({"raca": "Saiyajin"});
        assert!(matches_filter(&el, r#"raca=="saiyajin""#));
        assert!(!matches_filter(&el, r#"raca=="Namekuseijin""#));
    }

    #[test]
    fn non_string_match_uses_canonical_form() {
        let el = json!({"age": 30, "alive": true, "tags": ["a", "b"]});
        assert!(matches_filter(&el, "age==30"));
        assert!(matches_filter(&el, "alive=='true'"));
        assert!(matches_filter(&el, r#"tags=='["a","b"]'"#));
        assert!(!matches_filter(&el, "age==30.0"));
    }

    #[test]
    fn null_and_absent_never_match() {
        let el = json!({"k": null});
        assert!(!matches_filter(&el, "k==null"));
        assert!(!matches_filter(&el, "k==''"));
        assert!(!matches_filter(&el, "other==x"));
        assert!(!matches_filter(&json!(["k"]), "k==x"));
        assert!(!matches_filter(&json!("k"), "k==k"));
    }
}
