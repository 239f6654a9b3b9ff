//! Uninitialized, freed and unrelated memory must never look like a
//! container.

use stlscope::containers::registry::{layout_size, registered_kinds};
use stlscope::{
    inspect, inspect_wide, Blob, ContainerKind, ErrorCode, InspectError, SnapshotMemory,
};

use crate::common::*;

fn sample_name(kind: ContainerKind) -> &'static str {
    match kind {
        ContainerKind::Deque => "std::deque<int, std::allocator<int> >",
        ContainerKind::List => "std::list<int, std::allocator<int> >",
        ContainerKind::Map => "std::map<int, int, std::less<int>, std::allocator<std::pair<int const, int> > >",
        ContainerKind::Multimap => "std::multimap<int, int, std::less<int>, std::allocator<std::pair<int const, int> > >",
        ContainerKind::Set => "std::set<int, std::less<int>, std::allocator<int> >",
        ContainerKind::Multiset => "std::multiset<int, std::less<int>, std::allocator<int> >",
        ContainerKind::Vector => "std::vector<int, std::allocator<int> >",
        ContainerKind::String => "std::__cxx11::basic_string<char, std::char_traits<char>, std::allocator<char> >",
        ContainerKind::Queue => "std::queue<int, std::deque<int, std::allocator<int> > >",
        ContainerKind::Stack => "std::stack<int, std::deque<int, std::allocator<int> > >",
        ContainerKind::HashMap => "std::unordered_map<int, int, std::hash<int>, std::equal_to<int>, std::allocator<std::pair<int const, int> > >",
        ContainerKind::HashMultimap => "std::unordered_multimap<int, int, std::hash<int>, std::equal_to<int>, std::allocator<std::pair<int const, int> > >",
        ContainerKind::HashSet => "std::unordered_set<int, std::hash<int>, std::equal_to<int>, std::allocator<int> >",
        ContainerKind::HashMultiset => "std::unordered_multiset<int, std::hash<int>, std::equal_to<int>, std::allocator<int> >",
        ContainerKind::SinglyLinkedList => "std::forward_list<int, std::allocator<int> >",
    }
}

#[test]
fn debug_heap_fill_is_invalid_for_every_kind() {
    for kind in registered_kinds() {
        let size = layout_size(kind).unwrap();
        let mut heap = FakeHeap::new();
        let addr = heap.alloc_filled(size, 0xCD);
        let mem = heap.memory();
        let res = inspect(&mem, sample_name(kind), Blob::new(addr, size), 4);
        assert_eq!(res, Err(InspectError::Invalid { kind }), "{kind}");
        assert_eq!(ErrorCode::from(&res), ErrorCode::ContainerInvalid);
    }
}

#[test]
fn freed_memory_fill_is_invalid() {
    for kind in registered_kinds() {
        let size = layout_size(kind).unwrap();
        let mut heap = FakeHeap::new();
        let addr = heap.alloc_filled(size, 0xDD);
        let mem = heap.memory();
        let res = inspect(&mem, sample_name(kind), Blob::new(addr, size), 4);
        assert_eq!(res, Err(InspectError::Invalid { kind }), "{kind}");
    }
}

#[test]
fn registered_names_classify_as_their_kind() {
    for kind in registered_kinds() {
        assert_eq!(
            stlscope::containers::registry::classify(sample_name(kind)),
            Some(kind)
        );
    }
}

#[test]
fn unknown_names_are_unknown_regardless_of_contents() {
    let mut heap = FakeHeap::new();
    let good = vector(&mut heap, &[1, 2, 3]);
    let mem = heap.memory();
    for name in [
        "MyVector<int>",
        "std::array<int, 3>",
        "std::priority_queue<int, std::vector<int>, std::less<int> >",
        "std::vector",
        "",
    ] {
        let res = inspect(&mem, name, good, 4);
        assert_eq!(res, Err(InspectError::Unknown), "{name}");
        assert_eq!(ErrorCode::from(&res).as_i32(), 1);
    }
}

#[test]
fn unreadable_object_is_invalid() {
    // nothing captured at the object address
    let mem = SnapshotMemory::new();
    let res = inspect(
        &mem,
        "std::vector<int, std::allocator<int> >",
        Blob::new(HEAP_BASE, VECTOR_SIZE),
        4,
    );
    assert_eq!(
        res,
        Err(InspectError::Invalid {
            kind: ContainerKind::Vector
        })
    );
}

#[test]
fn overlong_wide_names_do_not_match() {
    let mut heap = FakeHeap::new();
    let blob = vector(&mut heap, &[1]);
    let mem = heap.memory();
    // the pattern's closing bracket is cut off by truncation
    let name = format!("std::vector<{}>", "x".repeat(2000));
    let wide: Vec<u16> = name.encode_utf16().collect();
    assert_eq!(inspect_wide(&mem, &wide, blob, 4), Err(InspectError::Unknown));
}
