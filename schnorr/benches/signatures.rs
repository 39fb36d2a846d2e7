use criterion::{Criterion, black_box, criterion_group, criterion_main};
use curve::Goldilocks;
use rand::SeedableRng;
use rand::rngs::StdRng;
use schnorr::{SigningKey, VerifyingKey, hash_to_quintic_extension};

fn bench_hash(c: &mut Criterion) {
    let input: Vec<Goldilocks> = (0..16).map(Goldilocks::new).collect();

    c.bench_function("poseidon2_hash_16", |bencher| {
        bencher.iter(|| black_box(hash_to_quintic_extension(black_box(&input))))
    });
}

fn bench_sign(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(42);
    let sk = SigningKey::random(&mut rng);
    let msg = hash_to_quintic_extension(&[
        Goldilocks::new(1),
        Goldilocks::new(2),
        Goldilocks::new(3),
    ]);

    c.bench_function("schnorr_sign", |bencher| {
        bencher.iter(|| {
            let sig = sk.sign(&mut rng, black_box(&msg)).expect("sign");
            black_box(sig);
        })
    });
}

fn bench_verify(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(42);
    let sk = SigningKey::random(&mut rng);
    let vk = VerifyingKey::from(&sk);
    let msg = hash_to_quintic_extension(&[
        Goldilocks::new(1),
        Goldilocks::new(2),
        Goldilocks::new(3),
    ]);
    let sig = sk.sign(&mut rng, &msg).expect("sign");

    c.bench_function("schnorr_verify", |bencher| {
        bencher.iter(|| {
            let ok = vk.verify(black_box(&msg), black_box(&sig)).expect("verify");
            black_box(ok);
        })
    });
}

criterion_group!(benches, bench_hash, bench_sign, bench_verify);
criterion_main!(benches);
