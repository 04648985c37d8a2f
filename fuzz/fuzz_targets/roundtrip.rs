#![no_main]
use libfuzzer_sys::fuzz_target;
use jws_cipher::SigningCipher;

fuzz_target!(|data: &[u8]| {
    // Any payload signed under a key must verify back to itself.
    let cipher = SigningCipher::with_secret("fuzz-secret-fuzz-secret-fuzz-secret");
    let token = cipher.sign(data).expect("signing with a bound key cannot fail");
    assert_eq!(cipher.verify(&token).expect("own token parses"), Some(data.to_vec()));
});
