#![allow(clippy::expect_used)]

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use jws_cipher::keys::SigningKey;
use jws_cipher::sign::sign_hs512;
use jws_cipher::verify::verify_hs512;
use jws_cipher::SigningCipher;

fn bench_hs512(c: &mut Criterion) {
    let cipher = SigningCipher::with_key(SigningKey::generate());
    let payload = b"TGT-1-abcdefghijklmnopqrstuvwxyz-cas.example.org";
    let token = cipher.sign(payload).expect("sign");

    c.bench_function("hs512_sign", |b| {
        b.iter(|| cipher.sign(payload).expect("sign"));
    });
    c.bench_function("hs512_verify", |b| {
        b.iter(|| cipher.verify(&token).expect("verify"));
    });
}

fn bench_payload_sizes(c: &mut Criterion) {
    let key = SigningKey::generate();
    let mut group = c.benchmark_group("hs512_payload_size");

    for size in [16usize, 256, 4096] {
        let payload = vec![0x5au8; size];
        let token = sign_hs512(&key, &payload).expect("sign");
        let token = jws_cipher::serialize::serialize_compact(&token).into_bytes();

        group.bench_with_input(BenchmarkId::new("sign", size), &payload, |b, payload| {
            b.iter(|| sign_hs512(&key, payload).expect("sign"));
        });
        group.bench_with_input(BenchmarkId::new("verify", size), &token, |b, token| {
            b.iter(|| verify_hs512(&key, token).expect("verify"));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_hs512, bench_payload_sizes);
criterion_main!(benches);
