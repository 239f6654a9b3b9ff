//! `std::list`: a circular doubly linked list whose sentinel node is the
//! object itself.

use crate::containers::layout::{
    LIST_COUNT, LIST_NEXT, LIST_NODE_NEXT, LIST_NODE_PREV, LIST_NODE_VALUE, LIST_PREV, LIST_SIZE,
};
use crate::containers::{ContainerHandler, Cursor, Probe};

pub(crate) static HANDLER: ContainerHandler = ContainerHandler {
    layout_size: LIST_SIZE,
    count,
    validate,
    begin,
};

fn count(p: &Probe<'_>) -> usize {
    p.field(LIST_COUNT).unwrap_or(0)
}

fn validate(p: &Probe<'_>) -> bool {
    let (Some(next), Some(prev), Some(size)) =
        (p.field(LIST_NEXT), p.field(LIST_PREV), p.field(LIST_COUNT))
    else {
        return false;
    };
    if size > 0 && p.is_bogus(next) {
        return false;
    }
    if !p.plausible(next.wrapping_add(LIST_NODE_VALUE), size) {
        return false;
    }
    !cfg!(feature = "layout-checks") || layout_ok(p, next, prev, size)
}

fn layout_ok(p: &Probe<'_>, next: usize, prev: usize, size: usize) -> bool {
    let sentinel = p.at(LIST_NEXT);
    if size == 0 {
        return next == sentinel && prev == sentinel;
    }
    if next == sentinel || prev == sentinel || p.is_bogus(prev) {
        return false;
    }
    // both ends link back to the sentinel
    p.deref(next, LIST_NODE_PREV) == Some(sentinel) && p.deref(prev, LIST_NODE_NEXT) == Some(sentinel)
}

fn begin(p: &Probe<'_>) -> Cursor {
    Cursor::Linked {
        node: p.field(LIST_NEXT).unwrap_or(0),
        value_offset: LIST_NODE_VALUE,
    }
}
