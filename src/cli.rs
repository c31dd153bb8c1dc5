use std::path::PathBuf;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use tracing::debug;

use crate::errors::{CmdError, Result};
use crate::parser::Cursor;

pub const DEFAULT_FILE: &str = "data.json";

pub const USAGE: &str =
    "Usage: jsoncmd key1,key2,... [/f file.json]  OR  jsoncmd /compare left,right [/f file.json]";

pub const HELP: &str = r#"jsoncmd - query JSON documents from the command line.

GENERAL USAGE:
  jsoncmd key1,key2,... [/f file.json]
    - Reads the given paths/keys from the JSON document and prints their values.
    - Example: jsoncmd personagens[].nome /f "my_characters.json"
    - Default JSON file: data.json

  jsoncmd /compare left,right [/f file.json]
    - Compares left with right. right can be:
      * @literal -> a literal value (supports b64:base64data)
      * another path into the JSON document
    - Example: jsoncmd /compare personagens[].nome,raca
      Example with a literal: jsoncmd /compare personagens[].nome,@Goku

OPTIONS:
  /?                - Show this help.
  /f file.json      - JSON file to read (default: data.json).
  /compare          - Comparison mode (see above).
  @literal          - Prefix with @ to pass a literal (use b64:... for Base64).
  -v, -vv           - Log progress to stderr.
  Filters:   personagens[?nome=="Goku"]
  Indexes:   personagens[2].nome
  Expansion: personagens[].nome or *

EXIT CODES:
  0  - OK (found or displayed)
  1  - Difference / not found (compare failed)
  2  - Usage error / help
  3  - JSON file not found
  4  - JSON read/parse error
  5  - Base64 decoding error

EXAMPLES:
  jsoncmd personagens[?raca=="Saiyajin"].nome /f data.json
  jsoncmd personagens[].nome
  jsoncmd /compare personagens[].nome,@Goku"#;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Read,
    Compare,
}

/// What the wrapper arguments asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub mode: Mode,
    pub payload: String,
    pub file: PathBuf,
}

/// Right-hand side of `/compare left,right`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operand {
    Literal(String),
    Path(String),
}

pub fn wants_help(args: &[String]) -> bool {
    args.iter()
        .any(|a| matches!(a.trim(), "/?" | "/h" | "-h" | "--help"))
}

/// Interpret the raw argument words.
///
/// The words are joined with spaces; the first `/f <file>` or `/file <file>`
/// picks the document and is removed, and a leading `/compare` selects
/// compare mode.
pub fn parse_wrapper_args(args: &[String]) -> Invocation {
    let mut raw = args.join(" ");
    let mut file = PathBuf::from(DEFAULT_FILE);
    if let Some((matched, token)) = find_file_option(&raw) {
        file = PathBuf::from(token.trim_matches('"'));
        raw = raw.replace(&matched, "");
    }
    let raw = raw.trim();

    let invocation = match strip_compare(raw) {
        Some(rest) => Invocation {
            mode: Mode::Compare,
            payload: rest.trim().to_string(),
            file,
        },
        None => Invocation {
            mode: Mode::Read,
            payload: raw.to_string(),
            file,
        },
    };
    debug!(?invocation, "parsed wrapper arguments");
    invocation
}

// Leftmost `/f` or `/file` (any case) followed by whitespace and a token.
// Returns the whole matched text and the token.
fn find_file_option(raw: &str) -> Option<(String, String)> {
    for (i, _) in raw.match_indices('/') {
        let rest = &raw[i..];
        for flag in ["/f", "/file"] {
            if !starts_with_ci(rest, flag) {
                continue;
            }
            let mut p = Cursor::new(&rest[flag.len()..]);
            if p.take_while(char::is_whitespace).is_empty() {
                continue;
            }
            let token = match p.peek_char() {
                Some('"') => p.take_quoted().map(|body| format!("\"{body}\"")),
                _ => None,
            }
            .unwrap_or_else(|| p.take_while(|c| !c.is_whitespace()).to_string());
            if token.is_empty() {
                continue;
            }
            let end = i + flag.len() + p.pos();
            return Some((raw[i..end].to_string(), token));
        }
    }
    None
}

fn strip_compare(raw: &str) -> Option<&str> {
    const FLAG: &str = "/compare";
    if !starts_with_ci(raw, FLAG) {
        return None;
    }
    let rest = &raw[FLAG.len()..];
    match rest.chars().next() {
        Some(c) if c.is_alphanumeric() || c == '_' => None,
        _ => Some(rest),
    }
}

fn starts_with_ci(s: &str, prefix: &str) -> bool {
    s.get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
}

/// `@literal` is a literal (see [`decode_literal`]); anything else is a path.
pub fn parse_operand(token: &str) -> Result<Operand> {
    match token.strip_prefix('@') {
        Some(lit) => Ok(Operand::Literal(decode_literal(lit)?)),
        None => Ok(Operand::Path(token.to_string())),
    }
}

/// Decode a `b64:`-prefixed literal (prefix in any case) to UTF-8 text;
/// other literals are returned as-is. Characters outside the base64
/// alphabet are dropped before decoding; bad padding is still an error.
pub fn decode_literal(tok: &str) -> Result<String> {
    if !starts_with_ci(tok, "b64:") {
        return Ok(tok.to_string());
    }
    let encoded: String = tok[4..]
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '/' | '='))
        .collect();
    let bytes = STANDARD
        .decode(encoded)
        .map_err(|e| CmdError::Base64(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| CmdError::Base64(e.to_string()))
}
