#![no_main]
use libfuzzer_sys::fuzz_target;
use jws_cipher::SigningCipher;

fuzz_target!(|data: &[u8]| {
    // Must never panic, and random input must never verify.
    let cipher = SigningCipher::with_secret("fuzz-secret-fuzz-secret-fuzz-secret");
    if let Ok(verified) = cipher.verify(data) {
        assert!(verified.is_none(), "forged token verified");
    }
});
