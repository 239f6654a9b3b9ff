//! Introspection of opaque C++ standard-library containers.
//!
//! Given a type name, the address and size of an object and the size of one
//! element, [`inspect`] decides whether the bytes look like a well-formed
//! container of a known kind, and if so reports the element count and a
//! [`Cursor`] positioned at the first element. None of the container's own
//! code is run: fields are read at the offsets of a `#[repr(C)]` stand-in
//! layout through a [`MemoryView`], and every structural invariant the
//! real container would assert is re-derived as a cheap heuristic check.
//!
//! The checks are plausibility tests, not proofs. They exist so that a
//! diagnostic tool walking a damaged process does not fault on garbage.

pub mod cursor;
mod kinds;
pub(crate) mod layout;
pub mod registry;
pub mod type_name;
pub mod wildcard;

use std::fmt;

use tracing::{debug, trace};

use crate::config::{InspectConfig, DEFAULT_MAX_ELEMENTS};
use crate::error::InspectError;
use crate::memory::MemoryView;

pub use cursor::{Cursor, Elements};
pub use type_name::{TypeName, TYPE_NAME_CAPACITY};
pub use wildcard::Wildcard;

/// The closed set of container kinds this crate can read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContainerKind {
    Deque,
    List,
    Map,
    Multimap,
    Set,
    Multiset,
    Vector,
    String,
    Queue,
    Stack,
    HashMap,
    HashMultimap,
    HashSet,
    HashMultiset,
    SinglyLinkedList,
}

impl ContainerKind {
    pub const ALL: [ContainerKind; 15] = [
        ContainerKind::Deque,
        ContainerKind::List,
        ContainerKind::Map,
        ContainerKind::Multimap,
        ContainerKind::Set,
        ContainerKind::Multiset,
        ContainerKind::Vector,
        ContainerKind::String,
        ContainerKind::Queue,
        ContainerKind::Stack,
        ContainerKind::HashMap,
        ContainerKind::HashMultimap,
        ContainerKind::HashSet,
        ContainerKind::HashMultiset,
        ContainerKind::SinglyLinkedList,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ContainerKind::Deque => "deque",
            ContainerKind::List => "list",
            ContainerKind::Map => "map",
            ContainerKind::Multimap => "multimap",
            ContainerKind::Set => "set",
            ContainerKind::Multiset => "multiset",
            ContainerKind::Vector => "vector",
            ContainerKind::String => "string",
            ContainerKind::Queue => "queue",
            ContainerKind::Stack => "stack",
            ContainerKind::HashMap => "hash_map",
            ContainerKind::HashMultimap => "hash_multimap",
            ContainerKind::HashSet => "hash_set",
            ContainerKind::HashMultiset => "hash_multiset",
            ContainerKind::SinglyLinkedList => "slist",
        }
    }

    /// Whether elements are linked nodes rather than contiguous or chunked
    /// storage.
    pub fn is_node_based(self) -> bool {
        !matches!(
            self,
            ContainerKind::Vector
                | ContainerKind::String
                | ContainerKind::Deque
                | ContainerKind::Queue
                | ContainerKind::Stack
        )
    }
}

impl fmt::Display for ContainerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The object being inspected: `[address, address + size)` in the inspected
/// address space. Owned by the caller and never written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Blob {
    pub address: usize,
    pub size: usize,
}

impl Blob {
    pub fn new(address: usize, size: usize) -> Self {
        Self { address, size }
    }
}

/// A container that passed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContainerInfo {
    pub kind: ContainerKind,
    /// Logical element count. Iteration must stop after this many elements.
    pub count: usize,
    pub el_size: usize,
    /// Positioned at the first element.
    pub cursor: Cursor,
}

impl ContainerInfo {
    /// Addresses of the elements in the container's logical order.
    pub fn elements<'m>(&self, mem: &'m dyn MemoryView) -> Elements<'m> {
        Elements::new(mem, self.cursor, self.el_size, self.count)
    }
}

/// Everything a handler may look at for one inspection.
pub(crate) struct Probe<'a> {
    pub mem: &'a dyn MemoryView,
    pub blob: Blob,
    pub el_size: usize,
    pub max_elements: usize,
}

impl Probe<'_> {
    /// Address of a field inside the blob.
    pub fn at(&self, offset: usize) -> usize {
        self.blob.address.wrapping_add(offset)
    }

    /// Reads a pointer-sized field of the blob.
    pub fn field(&self, offset: usize) -> Option<usize> {
        self.mem.read_usize(self.blob.address.checked_add(offset)?)
    }

    /// Reads a pointer-sized field of some other object.
    pub fn deref(&self, addr: usize, offset: usize) -> Option<usize> {
        if self.mem.is_bogus(addr) {
            return None;
        }
        self.mem.read_usize(addr.checked_add(offset)?)
    }

    pub fn is_bogus(&self, addr: usize) -> bool {
        self.mem.is_bogus(addr)
    }

    /// Sanity check shared by every kind: the count is believable, and the
    /// first element, if there is one, is not at an obviously bad address.
    pub fn plausible(&self, first: usize, count: usize) -> bool {
        if count > self.max_elements {
            return false;
        }
        // an empty container has no first element; that is not an error
        count == 0 || !self.mem.is_bogus(first)
    }
}

/// The operations every container kind provides over its stand-in layout.
/// Plain function pointers: stand-ins carry no vtable of their own.
pub(crate) struct ContainerHandler {
    /// Static size of the stand-in layout.
    pub layout_size: usize,
    pub count: fn(&Probe<'_>) -> usize,
    pub validate: fn(&Probe<'_>) -> bool,
    pub begin: fn(&Probe<'_>) -> Cursor,
}

/// Inspects containers in one address space.
#[derive(Clone, Copy)]
pub struct Inspector<'m> {
    mem: &'m dyn MemoryView,
    max_elements: usize,
}

impl<'m> Inspector<'m> {
    pub fn new(mem: &'m dyn MemoryView) -> Self {
        Self {
            mem,
            max_elements: DEFAULT_MAX_ELEMENTS,
        }
    }

    /// Applies `config.max_elements`. The pointer oracle lives in the memory
    /// view, so build that from [`InspectConfig::oracle()`] first.
    pub fn with_config(mem: &'m dyn MemoryView, config: &InspectConfig) -> Self {
        Self {
            mem,
            max_elements: config.max_elements,
        }
    }

    pub fn memory(&self) -> &'m dyn MemoryView {
        self.mem
    }

    /// Looks up `type_name`, validates the blob and returns its element count
    /// and a cursor at the first element.
    pub fn inspect(
        &self,
        type_name: &str,
        blob: Blob,
        el_size: usize,
    ) -> Result<ContainerInfo, InspectError> {
        let Some(entry) = registry::lookup(type_name) else {
            trace!(type_name, "no container pattern matches");
            return Err(InspectError::Unknown);
        };
        let kind = entry.kind;
        let handler = entry.handler;

        // a mismatch means the stand-in no longer matches the real ABI
        debug_assert_eq!(
            blob.size, handler.layout_size,
            "{kind} stand-in layout size differs from the object size"
        );
        if el_size == 0 {
            debug!(%kind, "zero element size");
            return Err(InspectError::Invalid { kind });
        }

        let probe = Probe {
            mem: self.mem,
            blob,
            el_size,
            max_elements: self.max_elements,
        };
        let count = (handler.count)(&probe);
        if !(handler.validate)(&probe) {
            debug!(%kind, address = blob.address, count, "container failed validation");
            return Err(InspectError::Invalid { kind });
        }
        let cursor = (handler.begin)(&probe);
        trace!(%kind, address = blob.address, count, "container inspected");
        Ok(ContainerInfo {
            kind,
            count,
            el_size,
            cursor,
        })
    }

    /// Like [`Inspector::inspect`], for a UTF-16 type name as delivered by
    /// debug-information services. The name is narrowed into a fixed stack
    /// buffer first.
    pub fn inspect_wide(
        &self,
        wide_type_name: &[u16],
        blob: Blob,
        el_size: usize,
    ) -> Result<ContainerInfo, InspectError> {
        let name = TypeName::from_wide(wide_type_name);
        self.inspect(name.as_str(), blob, el_size)
    }
}

/// Inspects one object with the default limits.
pub fn inspect(
    mem: &dyn MemoryView,
    type_name: &str,
    blob: Blob,
    el_size: usize,
) -> Result<ContainerInfo, InspectError> {
    Inspector::new(mem).inspect(type_name, blob, el_size)
}

/// Inspects one object named by a UTF-16 type name with the default limits.
pub fn inspect_wide(
    mem: &dyn MemoryView,
    wide_type_name: &[u16],
    blob: Blob,
    el_size: usize,
) -> Result<ContainerInfo, InspectError> {
    Inspector::new(mem).inspect_wide(wide_type_name, blob, el_size)
}
