//! The fixed table of recognised container types.
//!
//! Entries are tried in priority order and the first matching pattern wins:
//! plain containers, then the adapters built on `deque`, then the
//! capability-gated hashed and singly linked kinds. The table is built once
//! and never changes afterwards.
//!
//! Wildcards cannot see bracket depth, so an entry may carry a guard that
//! looks at the name's template arguments after the patterns have matched.

use once_cell::sync::Lazy;

use super::kinds::{deque, list, string, tree, vector};
#[cfg(feature = "hash-containers")]
use super::kinds::hash;
#[cfg(feature = "slist")]
use super::kinds::forward_list;
use super::wildcard::Wildcard;
use super::{ContainerHandler, ContainerKind};

pub(crate) struct Entry {
    pub kind: ContainerKind,
    pub handler: &'static ContainerHandler,
    patterns: Vec<Wildcard>,
    guard: fn(&str) -> bool,
}

impl Entry {
    fn matches(&self, type_name: &str) -> bool {
        self.patterns.iter().any(|w| w.is_match(type_name)) && (self.guard)(type_name)
    }
}

static REGISTRY: Lazy<Vec<Entry>> = Lazy::new(build);

fn entry(kind: ContainerKind, handler: &'static ContainerHandler, patterns: &[&str]) -> Entry {
    let patterns = patterns
        .iter()
        .map(|p| Wildcard::new(p).expect("registry patterns are valid wildcards"))
        .collect();
    Entry {
        kind,
        handler,
        patterns,
        guard: |_| true,
    }
}

/// An adapter entry: `pattern` must match and the adapter's backing
/// container, its last template argument, must be a `std::deque`.
fn deque_adapter(kind: ContainerKind, pattern: &str) -> Entry {
    Entry {
        guard: backed_by_deque,
        ..entry(kind, &deque::HANDLER, &[pattern])
    }
}

fn backed_by_deque(type_name: &str) -> bool {
    last_template_argument(type_name).is_some_and(|arg| arg.starts_with("std::deque<"))
}

/// The last top-level argument of the first template argument list in
/// `type_name`, trimmed.
fn last_template_argument(type_name: &str) -> Option<&str> {
    let mut depth = 0usize;
    let mut start = 0usize;
    for (i, b) in type_name.bytes().enumerate() {
        match b {
            b'<' => {
                depth += 1;
                if depth == 1 {
                    start = i + 1;
                }
            }
            b',' if depth == 1 => start = i + 1,
            b'>' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(type_name[start..i].trim());
                }
            }
            _ => {}
        }
    }
    None
}

fn build() -> Vec<Entry> {
    let mut entries = vec![
        entry(ContainerKind::Deque, &deque::HANDLER, &["std::deque<*>"]),
        entry(
            ContainerKind::List,
            &list::HANDLER,
            &["std::list<*>", "std::__cxx11::list<*>"],
        ),
        entry(ContainerKind::Map, &tree::HANDLER, &["std::map<*>"]),
        entry(ContainerKind::Multimap, &tree::HANDLER, &["std::multimap<*>"]),
        entry(ContainerKind::Set, &tree::HANDLER, &["std::set<*>"]),
        entry(ContainerKind::Multiset, &tree::HANDLER, &["std::multiset<*>"]),
        entry(ContainerKind::Vector, &vector::HANDLER, &["std::vector<*>"]),
        entry(
            ContainerKind::String,
            &string::HANDLER,
            &[
                "std::basic_string<*>",
                "std::__cxx11::basic_string<*>",
                "std::string",
                "std::wstring",
                "std::__cxx11::string",
            ],
        ),
        // adapters are only readable when they sit on top of a deque
        deque_adapter(ContainerKind::Queue, "std::queue<*>"),
        deque_adapter(ContainerKind::Stack, "std::stack<*>"),
    ];

    #[cfg(feature = "hash-containers")]
    entries.extend([
        entry(ContainerKind::HashMap, &hash::HANDLER, &["std::unordered_map<*>"]),
        entry(
            ContainerKind::HashMultimap,
            &hash::HANDLER,
            &["std::unordered_multimap<*>"],
        ),
        entry(ContainerKind::HashSet, &hash::HANDLER, &["std::unordered_set<*>"]),
        entry(
            ContainerKind::HashMultiset,
            &hash::HANDLER,
            &["std::unordered_multiset<*>"],
        ),
    ]);

    #[cfg(feature = "slist")]
    entries.push(entry(
        ContainerKind::SinglyLinkedList,
        &forward_list::HANDLER,
        &["std::forward_list<*>", "__gnu_cxx::slist<*>"],
    ));

    entries
}

/// First entry, in priority order, whose patterns match `type_name`.
pub(crate) fn lookup(type_name: &str) -> Option<&'static Entry> {
    REGISTRY.iter().find(|e| e.matches(type_name))
}

/// The kind `type_name` would be read as, if any.
pub fn classify(type_name: &str) -> Option<ContainerKind> {
    lookup(type_name).map(|e| e.kind)
}

/// Registered kinds in priority order.
pub fn registered_kinds() -> impl Iterator<Item = ContainerKind> {
    REGISTRY.iter().map(|e| e.kind)
}

/// Static size of the stand-in layout for `kind`, if it is registered.
pub fn layout_size(kind: ContainerKind) -> Option<usize> {
    REGISTRY
        .iter()
        .find(|e| e.kind == kind)
        .map(|e| e.handler.layout_size)
}
