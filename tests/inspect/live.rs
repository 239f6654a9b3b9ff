//! Inspection of objects in this process's own memory through `LiveMemory`.

use std::mem::size_of;

use stlscope::{inspect, Blob, ContainerKind, HeuristicOracle, InspectError, LiveMemory, MemoryView};

#[repr(C)]
struct RawVector {
    start: *const i32,
    finish: *const i32,
    end_of_storage: *const i32,
}

#[repr(C)]
struct RawString {
    data: usize,
    length: usize,
    local: [u8; 16],
}

#[repr(C)]
struct RawList {
    next: usize,
    prev: usize,
    size: usize,
}

#[repr(C)]
struct RawListNode {
    next: usize,
    prev: usize,
    value: i32,
}

fn blob_of<T>(value: &T) -> Blob {
    Blob::new(value as *const T as usize, size_of::<T>())
}

fn ints(mem: &dyn MemoryView, addrs: impl Iterator<Item = usize>) -> Vec<i32> {
    addrs.map(|a| mem.read_u32(a).unwrap() as i32).collect()
}

#[test]
fn live_vector() {
    let values = vec![10, 20, 30, 40];
    let raw = RawVector {
        start: values.as_ptr(),
        finish: values.as_ptr().wrapping_add(values.len()),
        end_of_storage: values.as_ptr().wrapping_add(values.capacity()),
    };
    // SAFETY: the only pointers in play are `raw` and the buffer of `values`,
    // both alive for the whole test.
    let mem = unsafe { LiveMemory::new(HeuristicOracle::default()) };
    let info = inspect(&mem, "std::vector<int, std::allocator<int> >", blob_of(&raw), 4).unwrap();
    assert_eq!(info.count, 4);
    assert_eq!(ints(&mem, info.elements(&mem)), values);
}

#[test]
fn live_short_string() {
    let mut raw = Box::new(RawString {
        data: 0,
        length: 5,
        local: [0; 16],
    });
    raw.local[..5].copy_from_slice(b"hello");
    raw.data = raw.local.as_ptr() as usize;

    // SAFETY: `raw` owns every byte the string points at.
    let mem = unsafe { LiveMemory::new(HeuristicOracle::default()) };
    let info = inspect(&mem, "std::string", blob_of(&*raw), 1).unwrap();
    assert_eq!(info.kind, ContainerKind::String);
    let text: Vec<u8> = info
        .elements(&mem)
        .map(|a| mem.read_u8(a).unwrap())
        .collect();
    assert_eq!(text, b"hello");
}

#[test]
fn live_list() {
    let values = [1, 2, 3];
    let mut obj = Box::new(RawList {
        next: 0,
        prev: 0,
        size: values.len(),
    });
    let mut nodes: Vec<Box<RawListNode>> = values
        .iter()
        .map(|&value| {
            Box::new(RawListNode {
                next: 0,
                prev: 0,
                value,
            })
        })
        .collect();

    let sentinel = &*obj as *const RawList as usize;
    let mut ring = vec![sentinel];
    ring.extend(nodes.iter().map(|n| &**n as *const RawListNode as usize));
    for (i, node) in nodes.iter_mut().enumerate() {
        node.prev = ring[i];
        node.next = ring[(i + 2) % ring.len()];
    }
    obj.next = ring[1];
    obj.prev = ring[ring.len() - 1];

    // SAFETY: the list object and its nodes are owned by this test.
    let mem = unsafe { LiveMemory::new(HeuristicOracle::default()) };
    let info = inspect(&mem, "std::list<int, std::allocator<int> >", blob_of(&*obj), 4).unwrap();
    assert_eq!(ints(&mem, info.elements(&mem)), values);
    assert_eq!(nodes.len(), 3);
}

#[test]
fn closure_oracle_can_veto_everything() {
    let values = vec![1, 2];
    let raw = RawVector {
        start: values.as_ptr(),
        finish: values.as_ptr().wrapping_add(values.len()),
        end_of_storage: values.as_ptr().wrapping_add(values.len()),
    };
    // SAFETY: the oracle rejects every address, so nothing is ever read.
    let mem = unsafe { LiveMemory::new(|_addr: usize| true) };
    assert_eq!(
        inspect(&mem, "std::vector<int, std::allocator<int> >", blob_of(&raw), 4),
        Err(InspectError::Invalid {
            kind: ContainerKind::Vector
        })
    );
}
