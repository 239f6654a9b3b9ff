//! Type-erased element cursors.
//!
//! A [`Cursor`] is the equivalent of one native container iterator: small,
//! `Copy`, and free of heap storage. Its representation depends on the kind
//! of container it walks, and every operation takes the real element size,
//! because the stand-in layouts were measured with `int` elements.

use crate::memory::MemoryView;

use super::layout::{deque_buffer_size, TREE_LEFT, TREE_NODE_VALUE, TREE_PARENT, TREE_RIGHT, WORD};

/// Tree walks longer than this are treated as corruption: a red-black tree
/// over a full address space cannot be deeper than twice the pointer width.
const MAX_TREE_DEPTH: usize = 2 * usize::BITS as usize;

/// Position inside a container, advanced and dereferenced with the real
/// element size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cursor {
    /// Contiguous storage (vector, string): the element address itself.
    Contiguous { ptr: usize },
    /// Chunked storage (deque and its adapters): chunk pointers start at
    /// `first_node` in the map, the first element sits `first_offset`
    /// elements into its chunk, and `index` is the logical position.
    Chunked {
        first_node: usize,
        first_offset: usize,
        index: usize,
    },
    /// Singly or doubly linked nodes whose `next` link is at offset 0.
    Linked { node: usize, value_offset: usize },
    /// Red-black tree node; `header` is the end sentinel.
    Tree { node: usize, header: usize },
}

impl Cursor {
    /// Address of the element under the cursor, or None when it cannot be
    /// located without touching implausible memory.
    pub fn dereference(&self, mem: &dyn MemoryView, el_size: usize) -> Option<usize> {
        match *self {
            Cursor::Contiguous { ptr } => Some(ptr),
            Cursor::Chunked {
                first_node,
                first_offset,
                index,
            } => {
                // chunk capacity depends on the element width, so the chunk
                // and slot have to be recomputed from the logical index
                let per_chunk = deque_buffer_size(el_size);
                let offset = first_offset.checked_add(index)?;
                let node = first_node.checked_add((offset / per_chunk).checked_mul(WORD)?)?;
                let chunk = mem.read_usize(node)?;
                if mem.is_bogus(chunk) {
                    return None;
                }
                chunk.checked_add((offset % per_chunk).checked_mul(el_size)?)
            }
            Cursor::Linked { node, value_offset } => {
                if node == 0 {
                    None
                } else {
                    node.checked_add(value_offset)
                }
            }
            Cursor::Tree { node, header } => {
                if node == 0 || node == header {
                    None
                } else {
                    node.checked_add(TREE_NODE_VALUE)
                }
            }
        }
    }

    /// Moves to the next element in the container's logical order.
    pub fn advance(&mut self, mem: &dyn MemoryView, el_size: usize) {
        match self {
            Cursor::Contiguous { ptr } => *ptr = ptr.wrapping_add(el_size),
            Cursor::Chunked { index, .. } => *index += 1,
            Cursor::Linked { node, .. } => {
                // an unreadable link ends the walk
                *node = if *node == 0 {
                    0
                } else {
                    mem.read_usize(*node).unwrap_or(0)
                };
            }
            Cursor::Tree { node, header } => {
                *node = tree_successor(mem, *node, *header).unwrap_or(*header);
            }
        }
    }

    /// Dereferences, then advances.
    pub fn next_element(&mut self, mem: &dyn MemoryView, el_size: usize) -> Option<usize> {
        let addr = self.dereference(mem, el_size)?;
        self.advance(mem, el_size);
        Some(addr)
    }
}

fn link(mem: &dyn MemoryView, node: usize, offset: usize) -> Option<usize> {
    if mem.is_bogus(node) {
        return None;
    }
    mem.read_usize(node.checked_add(offset)?)
}

/// In-order successor (`_Rb_tree_increment`). Child links are null at the
/// leaves, so no element-size-dependent nil flag is needed.
fn tree_successor(mem: &dyn MemoryView, node: usize, header: usize) -> Option<usize> {
    if node == header {
        return Some(header);
    }
    let right = link(mem, node, TREE_RIGHT)?;
    if right != 0 {
        // leftmost node of the right subtree
        let mut n = right;
        for _ in 0..MAX_TREE_DEPTH {
            let left = link(mem, n, TREE_LEFT)?;
            if left == 0 {
                return Some(n);
            }
            n = left;
        }
        return None;
    }

    // climb while we are a right child
    let mut x = node;
    let mut y = link(mem, x, TREE_PARENT)?;
    for _ in 0..MAX_TREE_DEPTH {
        if x != link(mem, y, TREE_RIGHT)? {
            // the header's right link is the rightmost node; climbing out of
            // a root without a right subtree must stop at the header
            return Some(if link(mem, x, TREE_RIGHT)? != y { y } else { x });
        }
        x = y;
        y = link(mem, y, TREE_PARENT)?;
    }
    None
}

/// Iterator over the element addresses of an inspected container. Yields at
/// most `count` addresses, and stops early if one cannot be located.
pub struct Elements<'m> {
    mem: &'m dyn MemoryView,
    cursor: Cursor,
    el_size: usize,
    remaining: usize,
}

impl<'m> Elements<'m> {
    pub(crate) fn new(mem: &'m dyn MemoryView, cursor: Cursor, el_size: usize, count: usize) -> Self {
        Self {
            mem,
            cursor,
            el_size,
            remaining: count,
        }
    }

    /// Current cursor state.
    pub fn cursor(&self) -> Cursor {
        self.cursor
    }
}

impl Iterator for Elements<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        // the last element is never advanced past, so nothing beyond `count`
        // is ever read
        let addr = self.cursor.dereference(self.mem, self.el_size);
        match addr {
            Some(a) if self.remaining > 0 => {
                self.cursor.advance(self.mem, self.el_size);
                Some(a)
            }
            Some(a) => Some(a),
            None => {
                self.remaining = 0;
                None
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.remaining))
    }
}
