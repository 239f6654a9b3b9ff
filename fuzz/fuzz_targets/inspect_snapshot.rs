#![no_main]
use libfuzzer_sys::fuzz_target;
use stlscope::containers::registry::{layout_size, registered_kinds};
use stlscope::{Blob, Inspector, SnapshotMemory};

const BASE: usize = 0x1000_0000;

const NAMES: &[&str] = &[
    "std::deque<int>",
    "std::list<int>",
    "std::map<int, int>",
    "std::multimap<int, int>",
    "std::set<int>",
    "std::multiset<int>",
    "std::vector<int>",
    "std::string",
    "std::queue<int, std::deque<int> >",
    "std::stack<int, std::deque<int> >",
    "std::unordered_map<int, int>",
    "std::unordered_multimap<int, int>",
    "std::unordered_set<int>",
    "std::unordered_multiset<int>",
    "std::forward_list<int>",
];

fuzz_target!(|data: &[u8]| {
    if data.len() < 2 {
        return;
    }
    let name = NAMES[data[0] as usize % NAMES.len()];
    let el_size = usize::from(data[1] % 64) + 1;
    let mem = SnapshotMemory::new().with_region(BASE, data[2..].to_vec());
    let inspector = Inspector::new(&mem);

    for kind in registered_kinds() {
        let Some(size) = layout_size(kind) else {
            continue;
        };
        if stlscope::containers::registry::classify(name) != Some(kind) {
            continue;
        }
        // every offset into the snapshot is a candidate object
        for offset in (0..data.len().saturating_sub(2)).step_by(std::mem::size_of::<usize>()) {
            if let Ok(info) = inspector.inspect(name, Blob::new(BASE + offset, size), el_size) {
                for addr in info.elements(&mem).take(4096) {
                    std::hint::black_box(addr);
                }
            }
        }
    }
});
