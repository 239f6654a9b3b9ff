//! `std::map`, `std::multimap`, `std::set` and `std::multiset`: a red-black
//! tree whose header node lives inside the object. The header's parent is the
//! root, its left and right links the leftmost and rightmost nodes.

use crate::containers::layout::{
    TREE_COLOR, TREE_HEADER, TREE_LEFT, TREE_NODE_COUNT, TREE_NODE_VALUE, TREE_PARENT, TREE_RED,
    TREE_RIGHT, TREE_SIZE,
};
use crate::containers::{ContainerHandler, Cursor, Probe};

pub(crate) static HANDLER: ContainerHandler = ContainerHandler {
    layout_size: TREE_SIZE,
    count,
    validate,
    begin,
};

struct Header {
    color: u32,
    root: usize,
    leftmost: usize,
    rightmost: usize,
}

fn header(p: &Probe<'_>) -> Option<Header> {
    Some(Header {
        color: p.mem.read_u32(p.blob.address.checked_add(TREE_HEADER + TREE_COLOR)?)?,
        root: p.field(TREE_HEADER + TREE_PARENT)?,
        leftmost: p.field(TREE_HEADER + TREE_LEFT)?,
        rightmost: p.field(TREE_HEADER + TREE_RIGHT)?,
    })
}

fn count(p: &Probe<'_>) -> usize {
    p.field(TREE_NODE_COUNT).unwrap_or(0)
}

fn validate(p: &Probe<'_>) -> bool {
    let (Some(h), Some(n)) = (header(p), p.field(TREE_NODE_COUNT)) else {
        return false;
    };
    if n > 0 && p.is_bogus(h.leftmost) {
        return false;
    }
    if !p.plausible(h.leftmost.wrapping_add(TREE_NODE_VALUE), n) {
        return false;
    }
    !cfg!(feature = "layout-checks") || layout_ok(p, &h, n)
}

fn layout_ok(p: &Probe<'_>, h: &Header, n: usize) -> bool {
    let head = p.at(TREE_HEADER);
    if h.color != TREE_RED {
        return false;
    }
    if n == 0 {
        return h.root == 0 && h.leftmost == head && h.rightmost == head;
    }
    if h.root == 0 || p.is_bogus(h.root) || p.is_bogus(h.rightmost) {
        return false;
    }
    p.deref(h.root, TREE_PARENT) == Some(head)
        && p.deref(h.leftmost, TREE_LEFT) == Some(0)
        && p.deref(h.rightmost, TREE_RIGHT) == Some(0)
}

fn begin(p: &Probe<'_>) -> Cursor {
    let header = p.at(TREE_HEADER);
    Cursor::Tree {
        node: p.field(TREE_HEADER + TREE_LEFT).unwrap_or(header),
        header,
    }
}
