use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use lattice_ntru::sampling::sample_ternary;
use lattice_ntru::*;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

fn bench_ring_multiply(c: &mut Criterion) {
    let mut group = c.benchmark_group("ring_multiply");
    let mut rng = ChaCha20Rng::seed_from_u64(1);

    for &n in &[11usize, 107, 251] {
        let ring = TruncatedRing::new(n, 2048).unwrap();
        let a = sample_ternary(n, n / 3, n / 3, &mut rng).unwrap();
        let b = sample_ternary(n, n / 4, n / 4, &mut rng).unwrap();

        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |bench, _| {
            bench.iter(|| black_box(ring.multiply(black_box(&a), black_box(&b))));
        });
    }
    group.finish();
}

fn bench_ring_invert(c: &mut Criterion) {
    let mut group = c.benchmark_group("ring_invert");
    let mut rng = ChaCha20Rng::seed_from_u64(2);

    for &(n, q) in &[(11usize, 32i64), (107, 2048), (107, 2039)] {
        let params = NtruParams::new(n, 3, q).unwrap();
        let f = sample_private_key(&params, n / 4, &mut rng, 1000).unwrap();
        let ring = TruncatedRing::new(n, q).unwrap();

        group.bench_function(format!("n{}_q{}", n, q), |bench| {
            bench.iter(|| black_box(ring.invert(black_box(&f))));
        });
    }
    group.finish();
}

fn bench_ntru(c: &mut Criterion) {
    let mut rng = ChaCha20Rng::seed_from_u64(3);
    let params = NtruParams::new(107, 3, 2048).unwrap();
    let (public_key, private_key) = generate_random_keys(&params, 15, &mut rng).unwrap();
    let phi = sample_ternary(params.n, 12, 12, &mut rng).unwrap();
    let m = sample_ternary(params.n, 20, 20, &mut rng).unwrap();

    c.bench_function("ntru_encrypt_n107", |b| {
        b.iter(|| black_box(encrypt(black_box(&public_key), black_box(&phi), black_box(&m))));
    });

    let ciphertext = encrypt(&public_key, &phi, &m).unwrap();
    c.bench_function("ntru_decrypt_n107", |b| {
        b.iter(|| {
            black_box(decrypt(
                black_box(&public_key),
                black_box(&private_key),
                black_box(&ciphertext),
            ))
        });
    });
}

criterion_group!(benches, bench_ring_multiply, bench_ring_invert, bench_ntru);
criterion_main!(benches);
