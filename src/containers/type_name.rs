//! Fixed-capacity type-name buffer.
//!
//! Debug-information services hand out UTF-16 names. Matching works on a
//! narrowed copy kept on the stack, so looking a name up never allocates.

use std::fmt;

use crate::names::simplify_in_place;

/// Longest name kept; longer names are truncated.
pub const TYPE_NAME_CAPACITY: usize = 1000;

/// A narrowed, ASCII-only type name.
#[derive(Clone)]
pub struct TypeName {
    buf: [u8; TYPE_NAME_CAPACITY],
    len: usize,
    truncated: bool,
}

impl TypeName {
    fn empty() -> Self {
        Self {
            buf: [0; TYPE_NAME_CAPACITY],
            len: 0,
            truncated: false,
        }
    }

    fn push(&mut self, ch: char) -> bool {
        if self.len == TYPE_NAME_CAPACITY {
            self.truncated = true;
            return false;
        }
        // non-ASCII cannot appear in any registered pattern
        self.buf[self.len] = if ch.is_ascii() { ch as u8 } else { b'?' };
        self.len += 1;
        true
    }

    /// Narrows a UTF-16 name, stopping at the first NUL unit. Unpaired
    /// surrogates and non-ASCII characters become `?`.
    pub fn from_wide(wide: &[u16]) -> Self {
        let mut name = Self::empty();
        let units = wide.iter().copied().take_while(|&u| u != 0);
        for ch in char::decode_utf16(units) {
            if !name.push(ch.unwrap_or('?')) {
                break;
            }
        }
        name
    }

    /// Narrows a UTF-8 name the same way as [`TypeName::from_wide`].
    pub fn from_narrow(s: &str) -> Self {
        let mut name = Self::empty();
        for ch in s.chars().take_while(|&c| c != '\0') {
            if !name.push(ch) {
                break;
            }
        }
        name
    }

    pub fn as_str(&self) -> &str {
        // only ASCII bytes are ever stored
        std::str::from_utf8(&self.buf[..self.len]).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Whether the source name did not fit.
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    /// Rewrites the name into its short display form, in place. Truncated
    /// names are left alone; their brackets no longer balance.
    pub fn simplify(&mut self) {
        if self.truncated {
            return;
        }
        self.len = simplify_in_place(&mut self.buf[..self.len]);
    }
}

impl fmt::Debug for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeName")
            .field("name", &self.as_str())
            .field("truncated", &self.truncated)
            .finish()
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
