use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::{thread_rng, Rng};
use sha_bloom::{bit_positions, Filter};

const ELEMENT: &[u8] = "Hello, 世界 🤪".as_bytes();

fn bench_add(c: &mut Criterion) {
    let mut group = c.benchmark_group("add");

    let mut bf = Filter::new(1_000_000, 0.01).unwrap();
    group.bench_function("1.198MB", |b| b.iter(|| bf.add(black_box(ELEMENT))));

    group.finish();
}

fn bench_has(c: &mut Criterion) {
    let mut bf = Filter::new(1_000_000, 0.01).unwrap();
    let mut rng = thread_rng();
    for _ in 0..1_000_000 {
        bf.add(&rng.gen::<u64>().to_be_bytes()).unwrap();
    }
    bf.add(ELEMENT).unwrap();

    let mut group = c.benchmark_group("has");
    group.bench_function("inserted", |b| b.iter(|| bf.has(black_box(ELEMENT))));
    group.bench_function("random", |b| {
        b.iter(|| bf.has(&rng.gen::<u64>().to_be_bytes()))
    });
    group.finish();
}

fn bench_positions(c: &mut Criterion) {
    c.bench_function("bit_positions k=7", |b| {
        b.iter(|| bit_positions(black_box(ELEMENT), 7, 9_585_059))
    });
}

criterion_group!(benches, bench_add, bench_has, bench_positions);
criterion_main!(benches);
