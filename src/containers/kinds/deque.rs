//! `std::deque` and the adapters built on it: a map of chunk pointers and
//! two iterators bracketing the live elements.

use crate::containers::layout::{
    deque_buffer_size, DEQUE_FINISH, DEQUE_ITER_CUR, DEQUE_ITER_FIRST, DEQUE_ITER_LAST,
    DEQUE_ITER_NODE, DEQUE_MAP, DEQUE_MAP_SIZE, DEQUE_SIZE, DEQUE_START, WORD,
};
use crate::containers::{ContainerHandler, Cursor, Probe};

pub(crate) static HANDLER: ContainerHandler = ContainerHandler {
    layout_size: DEQUE_SIZE,
    count,
    validate,
    begin,
};

#[derive(Debug, Clone, Copy)]
struct Iter {
    cur: usize,
    first: usize,
    last: usize,
    node: usize,
}

struct Fields {
    map: usize,
    map_size: usize,
    start: Iter,
    finish: Iter,
}

fn read_iter(p: &Probe<'_>, base: usize) -> Option<Iter> {
    Some(Iter {
        cur: p.field(base + DEQUE_ITER_CUR)?,
        first: p.field(base + DEQUE_ITER_FIRST)?,
        last: p.field(base + DEQUE_ITER_LAST)?,
        node: p.field(base + DEQUE_ITER_NODE)?,
    })
}

fn fields(p: &Probe<'_>) -> Option<Fields> {
    Some(Fields {
        map: p.field(DEQUE_MAP)?,
        map_size: p.field(DEQUE_MAP_SIZE)?,
        start: read_iter(p, DEQUE_START)?,
        finish: read_iter(p, DEQUE_FINISH)?,
    })
}

/// `finish - start` as the deque computes it. Garbage iterators can make
/// this negative or huge, so it is kept wide and signed.
fn signed_count(d: &Fields, el_size: usize) -> i128 {
    if d.finish.node == 0 {
        return 0;
    }
    let el = el_size as i128;
    let buf = deque_buffer_size(el_size) as i128;
    let nodes = (d.finish.node as i128 - d.start.node as i128) / WORD as i128;
    let tail = (d.finish.cur as i128 - d.finish.first as i128) / el;
    let head = (d.start.last as i128 - d.start.cur as i128) / el;
    buf * (nodes - 1) + tail + head
}

fn count(p: &Probe<'_>) -> usize {
    fields(p)
        .map(|d| signed_count(&d, p.el_size))
        .and_then(|n| usize::try_from(n).ok())
        .unwrap_or(0)
}

fn validate(p: &Probe<'_>) -> bool {
    let Some(d) = fields(p) else {
        return false;
    };
    // `cur` may sit at any element boundary; the chunk base is what the
    // allocator handed out
    if p.is_bogus(d.map) || p.is_bogus(d.start.first) {
        return false;
    }
    if d.start.cur < d.start.first || d.start.cur >= d.start.last {
        return false;
    }
    let Ok(n) = usize::try_from(signed_count(&d, p.el_size)) else {
        return false;
    };
    if !p.plausible(d.start.first, n) {
        return false;
    }
    !cfg!(feature = "layout-checks") || layout_ok(p, &d)
}

fn layout_ok(p: &Probe<'_>, d: &Fields) -> bool {
    let Some(span) = deque_buffer_size(p.el_size).checked_mul(p.el_size) else {
        return false;
    };
    let iter_ok = |it: &Iter| {
        it.first <= it.cur
            && it.cur < it.last
            && it.last - it.first == span
            && (it.cur - it.first) % p.el_size == 0
    };
    if !iter_ok(&d.start) || !iter_ok(&d.finish) {
        return false;
    }

    let Some(map_end) = d.map_size.checked_mul(WORD).and_then(|n| d.map.checked_add(n)) else {
        return false;
    };
    if d.map_size == 0
        || d.start.node < d.map
        || d.start.node > d.finish.node
        || d.finish.node >= map_end
        || (d.start.node - d.map) % WORD != 0
        || (d.finish.node - d.map) % WORD != 0
    {
        return false;
    }

    // each iterator's chunk is the one its map slot points at
    p.mem.read_usize(d.start.node) == Some(d.start.first)
        && p.mem.read_usize(d.finish.node) == Some(d.finish.first)
}

fn begin(p: &Probe<'_>) -> Cursor {
    match fields(p) {
        Some(d) => Cursor::Chunked {
            first_node: d.start.node,
            first_offset: d.start.cur.saturating_sub(d.start.first) / p.el_size,
            index: 0,
        },
        None => Cursor::Chunked {
            first_node: 0,
            first_offset: 0,
            index: 0,
        },
    }
}
