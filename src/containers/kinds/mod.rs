//! Per-kind handlers over the stand-in layouts.
//!
//! Each module exports one `HANDLER` table. Adapters share the handler of
//! the container they wrap, and the four ordered (and four hashed) kinds share
//! one handler each, since their layouts are identical.

pub(crate) mod deque;
#[cfg(feature = "slist")]
pub(crate) mod forward_list;
#[cfg(feature = "hash-containers")]
pub(crate) mod hash;
pub(crate) mod list;
pub(crate) mod string;
pub(crate) mod tree;
pub(crate) mod vector;
