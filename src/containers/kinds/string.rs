//! `std::__cxx11::basic_string`: pointer, length and a small-string buffer
//! that doubles as the heap capacity.

use crate::containers::layout::{
    string_local_capacity, STRING_CAPACITY, STRING_DATA, STRING_LENGTH, STRING_LOCAL, STRING_SIZE,
};
use crate::containers::{ContainerHandler, Cursor, Probe};

pub(crate) static HANDLER: ContainerHandler = ContainerHandler {
    layout_size: STRING_SIZE,
    count,
    validate,
    begin,
};

fn count(p: &Probe<'_>) -> usize {
    p.field(STRING_LENGTH).unwrap_or(0)
}

fn validate(p: &Probe<'_>) -> bool {
    let (Some(data), Some(length)) = (p.field(STRING_DATA), p.field(STRING_LENGTH)) else {
        return false;
    };
    // even the empty string points at its local buffer
    if p.is_bogus(data) || !p.plausible(data, length) {
        return false;
    }
    !cfg!(feature = "layout-checks") || layout_ok(p, data, length)
}

fn layout_ok(p: &Probe<'_>, data: usize, length: usize) -> bool {
    let local_capacity = string_local_capacity(p.el_size);
    if data == p.at(STRING_LOCAL) {
        if length > local_capacity {
            return false;
        }
    } else {
        let Some(capacity) = p.field(STRING_CAPACITY) else {
            return false;
        };
        if capacity < length || capacity <= local_capacity {
            return false;
        }
    }
    terminated(p, data, length)
}

/// The character after the last one is zero.
fn terminated(p: &Probe<'_>, data: usize, length: usize) -> bool {
    let Some(at) = length
        .checked_mul(p.el_size)
        .and_then(|n| data.checked_add(n))
    else {
        return false;
    };
    let mut nul = [0xFFu8; 8];
    let width = p.el_size.min(nul.len());
    p.mem.read_into(at, &mut nul[..width]) && nul[..width].iter().all(|&b| b == 0)
}

fn begin(p: &Probe<'_>) -> Cursor {
    Cursor::Contiguous {
        ptr: p.field(STRING_DATA).unwrap_or(0),
    }
}
