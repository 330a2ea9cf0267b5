#![no_main]
#[macro_use] extern crate libfuzzer_sys;
extern crate huffpack;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        match huffpack::compress(text) {
            Ok(packed) => {
                let recovered = huffpack::decompress(&packed).unwrap();
                assert_eq!(recovered, text);
            }
            Err(err) => assert!(err.is_empty_input() && text.is_empty()),
        }
    }
});
