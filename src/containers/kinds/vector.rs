//! `std::vector`: three pointers into one contiguous allocation.

use crate::containers::layout::{VECTOR_END_OF_STORAGE, VECTOR_FINISH, VECTOR_SIZE, VECTOR_START};
use crate::containers::{ContainerHandler, Cursor, Probe};

pub(crate) static HANDLER: ContainerHandler = ContainerHandler {
    layout_size: VECTOR_SIZE,
    count,
    validate,
    begin,
};

struct Fields {
    start: usize,
    finish: usize,
    end: usize,
}

fn fields(p: &Probe<'_>) -> Option<Fields> {
    Some(Fields {
        start: p.field(VECTOR_START)?,
        finish: p.field(VECTOR_FINISH)?,
        end: p.field(VECTOR_END_OF_STORAGE)?,
    })
}

fn count(p: &Probe<'_>) -> usize {
    fields(p).map_or(0, |v| v.finish.saturating_sub(v.start) / p.el_size)
}

fn validate(p: &Probe<'_>) -> bool {
    let Some(v) = fields(p) else {
        return false;
    };
    if v.start == 0 && v.finish == 0 && v.end == 0 {
        // default-constructed, never allocated
        return true;
    }
    // finish and end may legitimately point one past the allocation, so only
    // the storage base has to be a readable address
    if p.is_bogus(v.start) {
        return false;
    }
    if v.start > v.finish || v.finish > v.end {
        return false;
    }
    if (v.finish - v.start) % p.el_size != 0 || (v.end - v.start) % p.el_size != 0 {
        return false;
    }
    p.plausible(v.start, count(p))
}

fn begin(p: &Probe<'_>) -> Cursor {
    Cursor::Contiguous {
        ptr: p.field(VECTOR_START).unwrap_or(0),
    }
}
