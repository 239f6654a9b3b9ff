//! Stand-in layouts of the libstdc++ containers.
//!
//! Each struct is a byte-for-byte twin of a libstdc++ (C++11 ABI) container
//! instantiated with `int` elements, written with `usize` fields so that the
//! same definitions hold on 32- and 64-bit targets. They are only measured
//! with `offset_of!`/`size_of`, never constructed and never read as values:
//! handlers read individual fields through a `MemoryView` at the offsets
//! exported below.
//!
//! Node value offsets assume element alignment no larger than the pointer
//! width. Matching the real ABI is an assumption, not something checked here.

#![allow(dead_code)]

use std::mem::{offset_of, size_of};

pub(crate) const WORD: usize = size_of::<usize>();

// std::vector<T>: _Vector_impl_data

#[repr(C)]
pub(crate) struct VectorLayout {
    start: usize,
    finish: usize,
    end_of_storage: usize,
}

pub(crate) const VECTOR_SIZE: usize = size_of::<VectorLayout>();
pub(crate) const VECTOR_START: usize = offset_of!(VectorLayout, start);
pub(crate) const VECTOR_FINISH: usize = offset_of!(VectorLayout, finish);
pub(crate) const VECTOR_END_OF_STORAGE: usize = offset_of!(VectorLayout, end_of_storage);

// std::__cxx11::basic_string<CharT>: _M_dataplus, _M_string_length, then a
// union of the local buffer and _M_allocated_capacity.

pub(crate) const STRING_LOCAL_BYTES: usize = 16;

#[repr(C)]
pub(crate) struct StringLayout {
    data: usize,
    length: usize,
    local_or_capacity: [usize; STRING_LOCAL_BYTES / WORD],
}

pub(crate) const STRING_SIZE: usize = size_of::<StringLayout>();
pub(crate) const STRING_DATA: usize = offset_of!(StringLayout, data);
pub(crate) const STRING_LENGTH: usize = offset_of!(StringLayout, length);
pub(crate) const STRING_LOCAL: usize = offset_of!(StringLayout, local_or_capacity);
pub(crate) const STRING_CAPACITY: usize = STRING_LOCAL;

/// Characters a string can hold without a heap allocation.
pub(crate) fn string_local_capacity(el_size: usize) -> usize {
    (STRING_LOCAL_BYTES - 1) / el_size.max(1)
}

// std::deque<T>: _M_map, _M_map_size, _M_start, _M_finish

#[repr(C)]
pub(crate) struct DequeIterLayout {
    cur: usize,
    first: usize,
    last: usize,
    node: usize,
}

#[repr(C)]
pub(crate) struct DequeLayout {
    map: usize,
    map_size: usize,
    start: DequeIterLayout,
    finish: DequeIterLayout,
}

pub(crate) const DEQUE_SIZE: usize = size_of::<DequeLayout>();
pub(crate) const DEQUE_MAP: usize = offset_of!(DequeLayout, map);
pub(crate) const DEQUE_MAP_SIZE: usize = offset_of!(DequeLayout, map_size);
pub(crate) const DEQUE_START: usize = offset_of!(DequeLayout, start);
pub(crate) const DEQUE_FINISH: usize = offset_of!(DequeLayout, finish);
pub(crate) const DEQUE_ITER_CUR: usize = offset_of!(DequeIterLayout, cur);
pub(crate) const DEQUE_ITER_FIRST: usize = offset_of!(DequeIterLayout, first);
pub(crate) const DEQUE_ITER_LAST: usize = offset_of!(DequeIterLayout, last);
pub(crate) const DEQUE_ITER_NODE: usize = offset_of!(DequeIterLayout, node);

/// Bytes per deque chunk (`_GLIBCXX_DEQUE_BUF_SIZE`).
pub(crate) const DEQUE_CHUNK_BYTES: usize = 512;

/// Elements per deque chunk; depends on the real element width.
pub(crate) fn deque_buffer_size(el_size: usize) -> usize {
    let el_size = el_size.max(1);
    if el_size < DEQUE_CHUNK_BYTES {
        DEQUE_CHUNK_BYTES / el_size
    } else {
        1
    }
}

// std::__cxx11::list<T>: the sentinel node lives inside the object

#[repr(C)]
pub(crate) struct ListLayout {
    next: usize,
    prev: usize,
    size: usize,
}

#[repr(C)]
pub(crate) struct ListNode {
    next: usize,
    prev: usize,
    value: i32,
}

pub(crate) const LIST_SIZE: usize = size_of::<ListLayout>();
pub(crate) const LIST_NEXT: usize = offset_of!(ListLayout, next);
pub(crate) const LIST_PREV: usize = offset_of!(ListLayout, prev);
pub(crate) const LIST_COUNT: usize = offset_of!(ListLayout, size);
pub(crate) const LIST_NODE_NEXT: usize = offset_of!(ListNode, next);
pub(crate) const LIST_NODE_PREV: usize = offset_of!(ListNode, prev);
pub(crate) const LIST_NODE_VALUE: usize = offset_of!(ListNode, value);

// std::map / multimap / set / multiset: _Rb_tree_impl

#[repr(C)]
pub(crate) struct TreeNodeBase {
    color: u32,
    parent: usize,
    left: usize,
    right: usize,
}

#[repr(C)]
pub(crate) struct TreeLayout {
    /// `std::less<>` is empty but still occupies a (padded) byte.
    key_compare: u8,
    header: TreeNodeBase,
    node_count: usize,
}

#[repr(C)]
pub(crate) struct TreeNode {
    base: TreeNodeBase,
    value: i32,
}

pub(crate) const TREE_SIZE: usize = size_of::<TreeLayout>();
pub(crate) const TREE_HEADER: usize = offset_of!(TreeLayout, header);
pub(crate) const TREE_NODE_COUNT: usize = offset_of!(TreeLayout, node_count);
pub(crate) const TREE_COLOR: usize = offset_of!(TreeNodeBase, color);
pub(crate) const TREE_PARENT: usize = offset_of!(TreeNodeBase, parent);
pub(crate) const TREE_LEFT: usize = offset_of!(TreeNodeBase, left);
pub(crate) const TREE_RIGHT: usize = offset_of!(TreeNodeBase, right);
pub(crate) const TREE_NODE_VALUE: usize = offset_of!(TreeNode, value);
/// `_S_red`; the header node is always red.
pub(crate) const TREE_RED: u32 = 0;

// std::unordered_{map,multimap,set,multiset}: _Hashtable

#[repr(C)]
pub(crate) struct HashtableLayout {
    buckets: usize,
    bucket_count: usize,
    before_begin: usize,
    element_count: usize,
    max_load_factor: f32,
    next_resize: usize,
    single_bucket: usize,
}

#[repr(C)]
pub(crate) struct HashNode {
    next: usize,
    value: i32,
}

pub(crate) const HASH_SIZE: usize = size_of::<HashtableLayout>();
pub(crate) const HASH_BUCKETS: usize = offset_of!(HashtableLayout, buckets);
pub(crate) const HASH_BUCKET_COUNT: usize = offset_of!(HashtableLayout, bucket_count);
pub(crate) const HASH_BEFORE_BEGIN: usize = offset_of!(HashtableLayout, before_begin);
pub(crate) const HASH_ELEMENT_COUNT: usize = offset_of!(HashtableLayout, element_count);
pub(crate) const HASH_MAX_LOAD_FACTOR: usize = offset_of!(HashtableLayout, max_load_factor);
pub(crate) const HASH_SINGLE_BUCKET: usize = offset_of!(HashtableLayout, single_bucket);
pub(crate) const HASH_NODE_NEXT: usize = offset_of!(HashNode, next);
pub(crate) const HASH_NODE_VALUE: usize = offset_of!(HashNode, value);

// std::forward_list<T> and __gnu_cxx::slist<T>: a bare head link

#[repr(C)]
pub(crate) struct ForwardListLayout {
    head: usize,
}

#[repr(C)]
pub(crate) struct ForwardListNode {
    next: usize,
    value: i32,
}

pub(crate) const FORWARD_LIST_SIZE: usize = size_of::<ForwardListLayout>();
pub(crate) const FORWARD_LIST_HEAD: usize = offset_of!(ForwardListLayout, head);
pub(crate) const FORWARD_LIST_NODE_NEXT: usize = offset_of!(ForwardListNode, next);
pub(crate) const FORWARD_LIST_NODE_VALUE: usize = offset_of!(ForwardListNode, value);
