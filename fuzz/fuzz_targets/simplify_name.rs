#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // only bracket-balanced names are well formed; skip the rest
    let mut depth = 0i64;
    for &b in data {
        match b {
            b'<' => depth += 1,
            b'>' => depth -= 1,
            0 => break,
            _ => {}
        }
        if depth < 0 {
            return;
        }
    }
    if depth != 0 {
        return;
    }
    let mut buf = data.to_vec();
    let len = stlscope::simplify_in_place(&mut buf);
    assert!(len <= data.len());
});
