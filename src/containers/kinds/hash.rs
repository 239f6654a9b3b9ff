//! `std::unordered_{map,multimap,set,multiset}`: a bucket array over one
//! singly linked chain of nodes that starts at the before-begin link.

use crate::containers::layout::{
    HASH_BEFORE_BEGIN, HASH_BUCKETS, HASH_BUCKET_COUNT, HASH_ELEMENT_COUNT, HASH_MAX_LOAD_FACTOR,
    HASH_NODE_VALUE, HASH_SINGLE_BUCKET, HASH_SIZE,
};
use crate::containers::{ContainerHandler, Cursor, Probe};

pub(crate) static HANDLER: ContainerHandler = ContainerHandler {
    layout_size: HASH_SIZE,
    count,
    validate,
    begin,
};

fn count(p: &Probe<'_>) -> usize {
    p.field(HASH_ELEMENT_COUNT).unwrap_or(0)
}

fn validate(p: &Probe<'_>) -> bool {
    let (Some(first), Some(n)) = (p.field(HASH_BEFORE_BEGIN), p.field(HASH_ELEMENT_COUNT)) else {
        return false;
    };
    if n > 0 && p.is_bogus(first) {
        return false;
    }
    if !p.plausible(first.wrapping_add(HASH_NODE_VALUE), n) {
        return false;
    }
    !cfg!(feature = "layout-checks") || layout_ok(p, first, n)
}

fn layout_ok(p: &Probe<'_>, first: usize, n: usize) -> bool {
    let (Some(buckets), Some(bucket_count)) = (p.field(HASH_BUCKETS), p.field(HASH_BUCKET_COUNT))
    else {
        return false;
    };
    if bucket_count == 0 || buckets == 0 || p.is_bogus(buckets) {
        return false;
    }
    // a single bucket is stored inline rather than allocated
    if bucket_count == 1 && buckets != p.at(HASH_SINGLE_BUCKET) {
        return false;
    }
    let Some(bits) = p.mem.read_u32(p.at(HASH_MAX_LOAD_FACTOR)) else {
        return false;
    };
    let max_load_factor = f32::from_bits(bits);
    if !max_load_factor.is_finite() || max_load_factor <= 0.0 {
        return false;
    }
    (n == 0) == (first == 0)
}

fn begin(p: &Probe<'_>) -> Cursor {
    Cursor::Linked {
        node: p.field(HASH_BEFORE_BEGIN).unwrap_or(0),
        value_offset: HASH_NODE_VALUE,
    }
}
