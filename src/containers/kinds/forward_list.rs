//! `std::forward_list` and `__gnu_cxx::slist`: a bare head link and no size
//! field, so the element count comes from walking the chain.

use crate::containers::layout::{
    FORWARD_LIST_HEAD, FORWARD_LIST_NODE_NEXT, FORWARD_LIST_NODE_VALUE, FORWARD_LIST_SIZE,
};
use crate::containers::{ContainerHandler, Cursor, Probe};

pub(crate) static HANDLER: ContainerHandler = ContainerHandler {
    layout_size: FORWARD_LIST_SIZE,
    count,
    validate,
    begin,
};

/// Result of walking the chain from the head link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Walk {
    nodes: usize,
    /// The chain ended at a null link, without a cycle, bogus link or
    /// running past the element limit.
    terminated: bool,
}

/// Walks the chain with Brent's cycle detection, bounded by the element
/// limit.
fn walk(p: &Probe<'_>) -> Walk {
    let Some(head) = p.field(FORWARD_LIST_HEAD) else {
        return Walk {
            nodes: 0,
            terminated: false,
        };
    };
    let broken = |nodes| Walk {
        nodes,
        terminated: false,
    };

    let mut node = head;
    let mut nodes = 0usize;
    let mut anchor = head;
    let mut power = 1usize;
    let mut steps = 0usize;
    while node != 0 {
        if nodes == p.max_elements {
            return broken(nodes);
        }
        let Some(next) = p.deref(node, FORWARD_LIST_NODE_NEXT) else {
            return broken(nodes);
        };
        nodes += 1;
        node = next;
        if node != 0 && node == anchor {
            return broken(nodes);
        }
        steps += 1;
        if steps == power {
            anchor = node;
            power = power.saturating_mul(2);
            steps = 0;
        }
    }
    Walk {
        nodes,
        terminated: true,
    }
}

fn count(p: &Probe<'_>) -> usize {
    walk(p).nodes
}

fn validate(p: &Probe<'_>) -> bool {
    let walk = walk(p);
    let head = p.field(FORWARD_LIST_HEAD).unwrap_or(0);
    walk.terminated && p.plausible(head.wrapping_add(FORWARD_LIST_NODE_VALUE), walk.nodes)
}

fn begin(p: &Probe<'_>) -> Cursor {
    Cursor::Linked {
        node: p.field(FORWARD_LIST_HEAD).unwrap_or(0),
        value_offset: FORWARD_LIST_NODE_VALUE,
    }
}
