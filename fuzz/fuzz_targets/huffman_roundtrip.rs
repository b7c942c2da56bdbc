#![no_main]
use huffcode::{compress, decode, Archive};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }

    let c = compress(data).unwrap();
    let decoded = decode(&c.encoded, &c.tree).unwrap();
    assert_eq!(data, decoded.as_slice());

    let archive = Archive::from_compressed(&c).unwrap();
    let restored = Archive::<u8>::from_bytes(&archive.to_bytes().unwrap()).unwrap();
    assert_eq!(restored.decode().unwrap(), data);
});
