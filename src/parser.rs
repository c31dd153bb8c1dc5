// src/parser.rs

/// Byte-offset cursor over a path or condition string.
///
/// All helpers are non-failing: they either advance and report success, or
/// leave the position untouched.
pub struct Cursor<'a> {
    s: &'a str,
    i: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(s: &'a str) -> Self {
        Self { s, i: 0 }
    }

    pub fn pos(&self) -> usize {
        self.i
    }

    /// Consume a run of chars for which `pred` holds, returning the slice.
    pub fn take_while<F>(&mut self, pred: F) -> &'a str
    where
        F: Fn(char) -> bool,
    {
        let start = self.i;
        while let Some(c) = self.peek_char() {
            if pred(c) {
                self.i += c.len_utf8();
            } else {
                break;
            }
        }
        &self.s[start..self.i]
    }

    /// Consume a `[...]` run through its matching `]`, honouring nesting.
    /// An unmatched `[` swallows the rest of the input.
    pub fn take_bracketed(&mut self) -> &'a str {
        let start = self.i;
        let mut depth = 0usize;
        while let Some(c) = self.peek_char() {
            self.i += c.len_utf8();
            match c {
                '[' => depth += 1,
                ']' => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        break;
                    }
                }
                _ => {}
            }
        }
        &self.s[start..self.i]
    }

    /// Consume a `'...'` or `"..."` literal and return its body verbatim.
    /// Backslashes are not escapes. Returns `None` without consuming on an
    /// unterminated literal.
    pub fn take_quoted(&mut self) -> Option<&'a str> {
        let quote = self.peek_char().filter(|c| *c == '"' || *c == '\'')?;
        let body_start = self.i + 1;
        let len = self.s[body_start..].find(quote)?;
        self.i = body_start + len + 1;
        Some(&self.s[body_start..body_start + len])
    }

    pub fn consume_str(&mut self, lit: &str) -> bool {
        if self.peek_str(lit) {
            self.i += lit.len();
            true
        } else {
            false
        }
    }

    pub fn consume_char(&mut self, c: char) -> bool {
        if self.peek_char() == Some(c) {
            self.i += c.len_utf8();
            true
        } else {
            false
        }
    }

    pub fn peek_char(&self) -> Option<char> {
        self.s[self.i..].chars().next()
    }

    pub fn peek_str(&self, lit: &str) -> bool {
        self.s[self.i..].starts_with(lit)
    }

    pub fn skip_ws(&mut self) {
        self.take_while(char::is_whitespace);
    }

    pub fn eof(&self) -> bool {
        self.i >= self.s.len()
    }
}
