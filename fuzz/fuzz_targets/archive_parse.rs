#![no_main]
use huffcode::Archive;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Arbitrary bytes must fail cleanly, never panic.
    if let Ok(archive) = Archive::<u8>::from_bytes(data) {
        let _ = archive.decode();
    }
    if let Ok(archive) = Archive::<char>::from_bytes(data) {
        let _ = archive.decode();
    }
});
