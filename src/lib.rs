//! stlscope: read C++ standard-library containers without running their code.
//!
//! Two independent pieces:
//!
//! - [`names`] shortens template-instantiated type names
//!   (`std::basic_string<char, std::char_traits<char>, std::allocator<char> >`
//!   becomes `string<char>`) in one in-place pass.
//! - [`containers`] takes a type name, the address and size of an object and
//!   the size of one element, checks that the bytes look like a well-formed
//!   container of a known kind, and reports its element count together with a
//!   cursor over the element addresses.
//!
//! Memory is only ever touched through a [`MemoryView`], either the live
//! process ([`LiveMemory`]) or captured regions ([`SnapshotMemory`]).
//!
//! ```
//! use stlscope::{inspect, Blob, SnapshotMemory};
//!
//! let base = 0x1000_0000usize;
//! let data = base + 0x100;
//! let mut object = Vec::new();
//! for word in [data, data + 8, data + 8] {
//!     object.extend_from_slice(&word.to_ne_bytes());
//! }
//! let elements: Vec<u8> = [1i32, 2].iter().flat_map(|v| v.to_ne_bytes()).collect();
//! let mem = SnapshotMemory::new()
//!     .with_region(base, object)
//!     .with_region(data, elements);
//!
//! let size = 3 * std::mem::size_of::<usize>();
//! let info = inspect(&mem, "std::vector<int, std::allocator<int> >", Blob::new(base, size), 4)
//!     .unwrap();
//! assert_eq!(info.count, 2);
//! assert_eq!(info.elements(&mem).collect::<Vec<_>>(), vec![data, data + 4]);
//! ```

pub mod config;
pub mod containers;
pub mod error;
pub mod logging;
pub mod memory;
pub mod names;

pub use config::{InspectConfig, OracleConfig, DEFAULT_MAX_ELEMENTS};
pub use containers::{
    inspect, inspect_wide, Blob, ContainerInfo, ContainerKind, Cursor, Elements, Inspector,
    TypeName,
};
pub use error::{ErrorCode, InspectError, Result, StlScopeError};
pub use memory::{HeuristicOracle, LiveMemory, MemoryView, PointerOracle, SnapshotMemory};
pub use names::{readable_type_name, simplified, simplify, simplify_in_place};
