//! Simplification of template-instantiated C++ type names.
//!
//! Debug information spells out every default template argument, so a plain
//! `std::string` arrives as
//! `std::basic_string<char, std::char_traits<char>, std::allocator<char> >`.
//! [`simplify_in_place`] rewrites such names into short display labels
//! (`string<char>`) in a single left-to-right pass over the buffer. The
//! output never grows, which is what makes the in-place rewrite possible.
//!
//! See <http://www.bdsoft.com/tools/stlfilt.html> for the same idea applied
//! to compiler diagnostics.

pub mod demangle;

pub use demangle::{readable_type_name, SymbolFlavor};

#[derive(Debug, Clone, Copy)]
enum Action {
    /// Emit a shorter fixed replacement.
    Replace(&'static [u8]),
    /// Emit nothing.
    Strip,
    /// Drop preceding separators, then the whole bracketed argument list
    /// that follows.
    Elide,
    /// Emit a single separating space unless the output already ends in one.
    NodeMarker,
}

#[derive(Debug)]
struct Rule {
    pattern: &'static [u8],
    action: Action,
    /// Only matches a whole word: no identifier byte on either side.
    word: bool,
}

const fn rule(pattern: &'static [u8], action: Action) -> Rule {
    Rule {
        pattern,
        action,
        word: false,
    }
}

const fn word(pattern: &'static [u8], action: Action) -> Rule {
    Rule {
        pattern,
        action,
        word: true,
    }
}

/// Rules whose pattern does not start with `s`; tested at every position.
static GENERAL_RULES: &[Rule] = &[
    // ">::_Node>" must not collapse into ">>"
    rule(b"::_Node", Action::NodeMarker),
    word(b"unsigned short int", Action::Replace(b"u16")),
    word(b"unsigned short", Action::Replace(b"u16")),
    word(b"unsigned int", Action::Replace(b"uint")),
    word(b"unsigned __int64", Action::Replace(b"u64")),
    // tree traits: trailing "allow duplicates" flag plus its bracket
    rule(b",0> ", Action::Strip),
    rule(b",1> ", Action::Strip),
];

/// Rules for `std::` names; only tested when the current byte is `s`.
/// Order matters: longer patterns sharing a prefix come first.
static STD_RULES: &[Rule] = &[
    rule(b"std::_Tree_nod<std::_Tmap_traits", Action::Replace(b"map ")),
    rule(b"std::_Tree_nod<std::_Tset_traits", Action::Replace(b"set ")),
    rule(b"std::_List_nod", Action::Replace(b"list")),
    rule(b"std::_Tree_nod", Action::Replace(b"map")),
    rule(b"std::__cxx11::basic_string<", Action::Replace(b"string<")),
    rule(b"std::basic_string<", Action::Replace(b"string<")),
    rule(b"std::_Tmap_traits", Action::Strip),
    rule(b"std::_Tset_traits", Action::Strip),
    rule(b"std::allocator<", Action::Elide),
    rule(b"std::less<", Action::Elide),
    rule(b"std::char_traits<", Action::Elide),
    rule(b"std::hash<", Action::Elide),
    rule(b"std::equal_to<", Action::Elide),
    rule(b"std::__cxx11::", Action::Strip),
    rule(b"std::", Action::Strip),
];

/// First rule matching at the start of `rest`. `prev` is the input byte
/// just before it.
fn find_rule(rules: &'static [Rule], rest: &[u8], prev: Option<u8>) -> Option<&'static Rule> {
    rules.iter().find(|r| {
        rest.starts_with(r.pattern)
            && (!r.word
                || (!prev.is_some_and(is_ident)
                    && !rest.get(r.pattern.len()).copied().is_some_and(is_ident)))
    })
}

fn is_ident(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || !b.is_ascii()
}

fn is_separator(b: u8) -> bool {
    b == b',' || b == b' '
}

/// Rewrites the name held in `buf` in place and returns its new length.
///
/// The name ends at the first NUL byte or at the end of the buffer. If there
/// is room, the result is NUL-terminated so C-string consumers can use the
/// buffer directly.
pub fn simplify_in_place(buf: &mut [u8]) -> usize {
    let len = buf.iter().position(|&b| b == 0).unwrap_or(buf.len());
    // While > 0, everything up to the bracket that returns it to 0 is dropped.
    let mut nesting = 0usize;
    let mut src = 0usize;
    let mut dst = 0usize;

    while src < len {
        let c = buf[src];

        if nesting > 0 {
            match c {
                b'<' => nesting += 1,
                b'>' => nesting -= 1,
                _ => {}
            }
            src += 1;
            continue;
        }

        // dst <= src, and while they are equal every write copied its own
        // input byte, so buf[src - 1] still holds input
        let prev = src.checked_sub(1).map(|i| buf[i]);
        let matched = match find_rule(GENERAL_RULES, &buf[src..len], prev) {
            Some(r) => Some(r),
            None if c == b's' => find_rule(STD_RULES, &buf[src..len], prev),
            None => None,
        };

        let Some(rule) = matched else {
            if c == b'>'
                && dst > 0
                && buf[dst - 1] == b' '
                && (dst < 2 || buf[dst - 2] != b'>')
            {
                // "char >" => "char>", but "> >" stays
                dst -= 1;
            }
            buf[dst] = c;
            dst += 1;
            src += 1;
            continue;
        };

        src += rule.pattern.len();
        match rule.action {
            Action::Replace(with) => {
                // replacements are shorter than their patterns, so this only
                // overwrites input that has already been consumed
                debug_assert!(with.len() <= rule.pattern.len());
                buf[dst..dst + with.len()].copy_from_slice(with);
                dst += with.len();
            }
            Action::Strip => {}
            Action::Elide => {
                while dst > 0 && is_separator(buf[dst - 1]) {
                    dst -= 1;
                }
                nesting = 1;
            }
            Action::NodeMarker => {
                if dst > 0 && buf[dst - 1] != b' ' {
                    buf[dst] = b' ';
                    dst += 1;
                }
            }
        }
    }

    debug_assert_eq!(nesting, 0, "unbalanced template brackets in type name");
    if dst < buf.len() {
        buf[dst] = 0;
    }
    dst
}

/// Simplifies `name` in place.
pub fn simplify(name: &mut String) {
    let mut bytes = std::mem::take(name).into_bytes();
    let len = simplify_in_place(&mut bytes);
    bytes.truncate(len);
    // Only whole ASCII-delimited runs are ever removed, so UTF-8 survives.
    *name = String::from_utf8(bytes)
        .unwrap_or_else(|e| String::from_utf8_lossy(e.as_bytes()).into_owned());
}

/// Returns the simplified form of `name`.
pub fn simplified(name: &str) -> String {
    let mut out = name.to_owned();
    simplify(&mut out);
    out
}
