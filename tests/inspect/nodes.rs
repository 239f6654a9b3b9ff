//! Node-based containers: list, ordered trees, hashed tables, singly linked
//! lists.

use stlscope::{inspect, ContainerKind, InspectConfig, InspectError, Inspector, MemoryView};

use crate::common::*;

const LIST: &str = "std::__cxx11::list<int, std::allocator<int> >";
const SET: &str = "std::set<int, std::less<int>, std::allocator<int> >";
const MULTISET: &str = "std::multiset<int, std::less<int>, std::allocator<int> >";
const UNORDERED_SET: &str =
    "std::unordered_set<int, std::hash<int>, std::equal_to<int>, std::allocator<int> >";
const FORWARD_LIST: &str = "std::forward_list<int, std::allocator<int> >";

#[test]
fn list_in_insertion_order() {
    let mut heap = FakeHeap::new();
    let blob = list(&mut heap, &[3, 1, 4, 1, 5]);
    let mem = heap.memory();
    let info = inspect(&mem, LIST, blob, 4).unwrap();
    assert_eq!(info.kind, ContainerKind::List);
    assert_eq!(info.count, 5);
    assert_eq!(collect_ints(&mem, &info), vec![3, 1, 4, 1, 5]);
}

#[test]
fn empty_list_is_valid() {
    let mut heap = FakeHeap::new();
    let blob = list(&mut heap, &[]);
    let mem = heap.memory();
    let info = inspect(&mem, "std::list<int, std::allocator<int> >", blob, 4).unwrap();
    assert_eq!(info.count, 0);
    assert!(collect_ints(&mem, &info).is_empty());
}

#[test]
fn element_limit_comes_from_config() {
    let mut heap = FakeHeap::new();
    let blob = list(&mut heap, &[1, 2, 3, 4, 5]);
    let mem = heap.memory();

    let config = InspectConfig {
        max_elements: 4,
        ..InspectConfig::default()
    };
    let inspector = Inspector::with_config(&mem, &config);
    assert_eq!(
        inspector.inspect(LIST, blob, 4),
        Err(InspectError::Invalid {
            kind: ContainerKind::List
        })
    );
    assert!(Inspector::new(&mem).inspect(LIST, blob, 4).is_ok());
}

#[test]
fn tree_iterates_in_key_order() {
    let mut heap = FakeHeap::new();
    let keys = [50, 20, 80, 10, 30, 70, 90, 60, 40, 25, 35];
    let blob = tree(&mut heap, &keys);
    let mem = heap.memory();

    let info = inspect(&mem, SET, blob, 4).unwrap();
    assert_eq!(info.kind, ContainerKind::Set);
    assert_eq!(info.count, keys.len());
    let mut sorted = keys.to_vec();
    sorted.sort_unstable();
    assert_eq!(collect_ints(&mem, &info), sorted);
}

#[test]
fn tree_of_one_and_empty_tree() {
    let mut heap = FakeHeap::new();
    let one = tree(&mut heap, &[9]);
    let none = tree(&mut heap, &[]);
    let mem = heap.memory();

    let info = inspect(&mem, MULTISET, one, 4).unwrap();
    assert_eq!(info.kind, ContainerKind::Multiset);
    assert_eq!(collect_ints(&mem, &info), vec![9]);

    let info = inspect(&mem, SET, none, 4).unwrap();
    assert_eq!(info.count, 0);
    assert!(collect_ints(&mem, &info).is_empty());
}

#[test]
fn map_yields_pairs_in_key_order() {
    const PAIR: usize = 8;
    let mut heap = FakeHeap::new();
    let pairs = [(40, 400), (10, 100), (30, 300), (70, 700), (20, 200), (60, 600), (50, 500)];
    let blob = map(&mut heap, &pairs);
    let mem = heap.memory();
    let name = "std::map<int, int, std::less<int>, std::allocator<std::pair<int const, int> > >";

    let info = inspect(&mem, name, blob, PAIR).unwrap();
    assert_eq!(info.kind, ContainerKind::Map);
    assert_eq!(info.count, pairs.len());
    let read: Vec<(i32, i32)> = info
        .elements(&mem)
        .map(|addr| {
            let key = mem.read_u32(addr).unwrap() as i32;
            let value = mem.read_u32(addr + 4).unwrap() as i32;
            (key, value)
        })
        .collect();
    let mut sorted = pairs.to_vec();
    sorted.sort_unstable();
    assert_eq!(read, sorted);

    let multimap = "std::multimap<int, int, std::less<int>, std::allocator<std::pair<int const, int> > >";
    let info = inspect(&mem, multimap, blob, PAIR).unwrap();
    assert_eq!(info.kind, ContainerKind::Multimap);
    assert_eq!(info.elements(&mem).count(), pairs.len());
}

#[test]
fn map_names_use_the_tree_handler() {
    let mut heap = FakeHeap::new();
    let blob = tree(&mut heap, &[]);
    let mem = heap.memory();
    let name = "std::map<int, int, std::less<int>, std::allocator<std::pair<int const, int> > >";
    let info = inspect(&mem, name, blob, 8).unwrap();
    assert_eq!(info.kind, ContainerKind::Map);
    assert_eq!(info.count, 0);
}

#[test]
#[cfg(feature = "hash-containers")]
fn hashed_set_follows_its_chain() {
    let mut heap = FakeHeap::new();
    let blob = hash_set(&mut heap, &[42, 7, 19]);
    let empty = hash_set(&mut heap, &[]);
    let mem = heap.memory();

    let info = inspect(&mem, UNORDERED_SET, blob, 4).unwrap();
    assert_eq!(info.kind, ContainerKind::HashSet);
    assert_eq!(collect_ints(&mem, &info), vec![42, 7, 19]);

    let info = inspect(&mem, UNORDERED_SET, empty, 4).unwrap();
    assert_eq!(info.count, 0);
}

#[test]
#[cfg(not(feature = "hash-containers"))]
fn hashed_set_unknown_without_capability() {
    let mut heap = FakeHeap::new();
    let blob = hash_set(&mut heap, &[1]);
    let mem = heap.memory();
    assert_eq!(
        inspect(&mem, UNORDERED_SET, blob, 4),
        Err(InspectError::Unknown)
    );
}

#[test]
#[cfg(feature = "slist")]
fn forward_list_counts_by_walking() {
    let mut heap = FakeHeap::new();
    let blob = forward_list(&mut heap, &[5, 6, 7, 8]);
    let empty = forward_list(&mut heap, &[]);
    let mem = heap.memory();

    let info = inspect(&mem, FORWARD_LIST, blob, 4).unwrap();
    assert_eq!(info.kind, ContainerKind::SinglyLinkedList);
    assert_eq!(info.count, 4);
    assert_eq!(collect_ints(&mem, &info), vec![5, 6, 7, 8]);

    let info = inspect(&mem, "__gnu_cxx::slist<int, std::allocator<int> >", empty, 4).unwrap();
    assert_eq!(info.count, 0);
}

#[test]
#[cfg(feature = "slist")]
fn forward_list_longer_than_limit_is_invalid() {
    let mut heap = FakeHeap::new();
    let blob = forward_list(&mut heap, &[1, 2, 3]);
    let mem = heap.memory();
    let config = InspectConfig {
        max_elements: 2,
        ..InspectConfig::default()
    };
    assert_eq!(
        Inspector::with_config(&mem, &config).inspect(FORWARD_LIST, blob, 4),
        Err(InspectError::Invalid {
            kind: ContainerKind::SinglyLinkedList
        })
    );
}
