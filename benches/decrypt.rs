// benches/decrypt.rs
//! Secure-data and credentials decryption benchmarks (pre-sealed data)

use passport_crypt::encryptor::{seal_credentials, seal_secure_data};
use passport_crypt::{decrypt_credentials, decrypt_secure_data, BotPrivateKey};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::hint::black_box;

const BOT_KEY_PKCS8: &str = include_str!("../tests/test_data/bot_key_pkcs8.pem");

// --- Size constants ---
const KB: usize = 1024;
const MB: usize = 1024 * 1024;

fn format_size(bytes: usize) -> String {
    if bytes >= MB {
        format!("{} MiB", bytes / MB)
    } else if bytes >= KB {
        format!("{} KiB", bytes / KB)
    } else {
        format!("{bytes} B")
    }
}

fn bench_secure_data(c: &mut Criterion) {
    let mut group = c.benchmark_group("secure_data");
    let secret = [0x5au8; 32];

    // Field-sized JSON up to a large document scan
    let sizes = [256, 64 * KB, MB, 10 * MB];

    for &size in &sizes {
        let payload = vec![0x41u8; size];
        let sealed = seal_secure_data(&secret, &payload).unwrap();

        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::new("size", format_size(size)), &size, |b, _| {
            b.iter(|| {
                let plaintext =
                    decrypt_secure_data(black_box(&secret), black_box(&sealed.hash), black_box(&sealed.data))
                        .unwrap();
                black_box(plaintext);
            });
        });
    }

    group.finish();
}

fn bench_credentials(c: &mut Criterion) {
    let key = BotPrivateKey::from_pem(BOT_KEY_PKCS8).unwrap();
    let json = br#"{"nonce":"bench","secure_data":{}}"#;
    let wire = seal_credentials(&key.public_key(), &[0x11; 32], json).unwrap();

    // Dominated by the RSA-2048 private-key operation
    c.bench_function("credentials_rsa2048", |b| {
        b.iter(|| {
            let credentials = decrypt_credentials(black_box(&key), black_box(&wire)).unwrap();
            black_box(credentials);
        });
    });
}

criterion_group!(benches, bench_secure_data, bench_credentials);
criterion_main!(benches);
