//! Demangle-then-simplify helpers for symbol names.
//!
//! Symbol services sometimes hand over raw linker names instead of the
//! pretty type names found in debug information. These helpers turn either
//! form into the short label used in diagnostic output.

use super::simplify;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolFlavor {
    /// Itanium C++ ABI (`_Z…`), used by GCC and Clang.
    Itanium,
    /// Microsoft Visual C++ (`?…`).
    Msvc,
    /// Already human-readable.
    Plain,
}

pub fn detect_flavor(s: &str) -> SymbolFlavor {
    if s.starts_with("_Z") || s.starts_with("__Z") {
        SymbolFlavor::Itanium
    } else if s.starts_with('?') {
        SymbolFlavor::Msvc
    } else {
        SymbolFlavor::Plain
    }
}

/// Attempt to demangle a single symbol. Returns None when it is not mangled
/// or the demangler rejects it.
pub fn demangle(s: &str) -> Option<String> {
    match detect_flavor(s) {
        SymbolFlavor::Itanium => {
            // Mach-O symbols carry an extra leading underscore
            let raw = s.strip_prefix('_').filter(|r| r.starts_with("_Z")).unwrap_or(s);
            let sym = cpp_demangle::Symbol::new(raw).ok()?;
            Some(sym.to_string())
        }
        SymbolFlavor::Msvc => {
            msvc_demangler::demangle(s, msvc_demangler::DemangleFlags::COMPLETE).ok()
        }
        SymbolFlavor::Plain => None,
    }
}

/// Demangles `symbol` when it is mangled, then simplifies the result.
pub fn readable_type_name(symbol: &str) -> String {
    let mut name = demangle(symbol).unwrap_or_else(|| symbol.to_owned());
    simplify(&mut name);
    name
}
