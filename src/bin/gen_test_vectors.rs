//! Generates test vectors for HS512 wire format regression testing.
//! Run with: cargo run --bin gen_test_vectors > testdata/v0_vectors.json

use jws_cipher::keys::{compute_key_hash, SigningKey};
use jws_cipher::serialize::serialize_compact;
use jws_cipher::sign::sign_hs512;
use jws_cipher::types::HS512_SIG_LEN;
use jws_cipher::CipherError;

const TEST_SECRET: &str = "0123456789abcdef0123456789abcdef";

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let long_secret = "x".repeat(96);
    let binary: Vec<u8> = (0u8..64).collect();

    let cases: [(&str, &str, &[u8]); 5] = [
        ("signed_hello", TEST_SECRET, b"hello"),
        ("signed_empty", TEST_SECRET, b""),
        ("signed_binary", TEST_SECRET, &binary),
        (
            "signed_long_key",
            &long_secret,
            b"TGT-1-abcdefghijklmnopqrstuvwxyz-cas",
        ),
        (
            "signed_utf8",
            "über-secret-éè",
            "ticket ✓ été".as_bytes(),
        ),
    ];

    let mut vectors: Vec<serde_json::Value> = Vec::new();

    for (name, secret, payload) in cases {
        vectors.push(signed_vector(name, secret, payload)?);
    }

    for (name, secret) in [("key_hash_hello", TEST_SECRET), ("key_hash_empty", "")] {
        vectors.push(serde_json::json!({
            "name": name,
            "type": "key_hash",
            "secret": secret,
            "expected_hex": hex::encode(compute_key_hash(secret.as_bytes()))
        }));
    }

    let output = serde_json::json!({
        "format_version": "v0",
        "description": "HS512 compact serialization test vectors. Any change in these values indicates a wire format regression.",
        "generated_by": "gen_test_vectors",
        "vectors": vectors
    });

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn signed_vector(name: &str, secret: &str, payload: &[u8]) -> Result<serde_json::Value, CipherError> {
    let token = sign_hs512(&SigningKey::from_secret(secret), payload)?;
    Ok(serde_json::json!({
        "name": name,
        "type": "signed",
        "secret": secret,
        "payload_hex": hex::encode(payload),
        "expected_token": serialize_compact(&token),
        "header_segment": token.header,
        "payload_segment": token.payload,
        "signature_len": HS512_SIG_LEN
    }))
}
