//! Wildcard patterns for type names.
//!
//! `*` matches any run of characters (including none), `?` exactly one;
//! everything else matches literally. Patterns are compiled to anchored
//! regular expressions once, when the registry is built.

use regex::Regex;

use crate::error::{Result, StlScopeError};

#[derive(Debug, Clone)]
pub struct Wildcard {
    pattern: String,
    regex: Regex,
}

impl Wildcard {
    pub fn new(pattern: &str) -> Result<Self> {
        let mut re = String::with_capacity(pattern.len() * 2 + 8);
        re.push_str("^(?s:");
        let mut literal = [0u8; 4];
        for ch in pattern.chars() {
            match ch {
                '*' => re.push_str(".*"),
                '?' => re.push('.'),
                c => re.push_str(&regex::escape(c.encode_utf8(&mut literal))),
            }
        }
        re.push_str(")$");
        let regex = Regex::new(&re).map_err(|e| StlScopeError::Pattern {
            pattern: pattern.to_owned(),
            message: e.to_string(),
        })?;
        Ok(Self {
            pattern: pattern.to_owned(),
            regex,
        })
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }

    pub fn as_str(&self) -> &str {
        &self.pattern
    }
}

/// One-shot convenience: does `text` match `pattern`?
pub fn match_wildcard(text: &str, pattern: &str) -> Result<bool> {
    Ok(Wildcard::new(pattern)?.is_match(text))
}
