#![no_main]
use libfuzzer_sys::fuzz_target;
use jws_cipher::serialize::{deserialize_token, serialize_compact};

fuzz_target!(|data: &[u8]| {
    // Must never panic, regardless of input.
    if let Ok(token) = deserialize_token(data) {
        // Segments are kept verbatim, so joining them reproduces the input.
        assert_eq!(serialize_compact(&token.compact).as_bytes(), data);
    }
});
