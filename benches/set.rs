use criterion::{Bencher, Criterion, black_box};
use rand::prelude::*;
use skipset::SkipSet;

fn bench_insert(b: &mut Bencher, base: usize, inserts: usize) {
    let mut set: SkipSet<u32> = SkipSet::with_capacity(base + inserts);
    let mut rng = SmallRng::from_os_rng();

    for _ in 0..base {
        set.insert(rng.random());
    }

    b.iter(|| {
        for _ in 0..inserts {
            set.insert(rng.random());
        }
    });
}

fn bench_contains(b: &mut Bencher, size: usize) {
    let mut set: SkipSet<u32> = SkipSet::with_capacity(size);
    let mut rng = SmallRng::from_os_rng();

    for _ in 0..size {
        set.insert(rng.random());
    }

    b.iter(|| {
        black_box(set.contains(&rng.random()));
    });
}

fn bench_iter(b: &mut Bencher, size: usize) {
    let mut set: SkipSet<u32> = SkipSet::with_capacity(size);
    let mut rng = SmallRng::from_os_rng();

    for _ in 0..size {
        set.insert(rng.random());
    }

    b.iter(|| {
        for entry in &set {
            black_box(entry);
        }
    });
}

pub fn benchmark(c: &mut Criterion) {
    c.bench_function("SkipSet insert 100 (empty)", |b| {
        bench_insert(b, 0, 100);
    });
    c.bench_function("SkipSet insert 1000 (empty)", |b| {
        bench_insert(b, 0, 1_000);
    });
    c.bench_function("SkipSet insert 100 (filled)", |b| {
        bench_insert(b, 100_000, 100);
    });
    c.bench_function("SkipSet insert 1000 (filled)", |b| {
        bench_insert(b, 100_000, 1_000);
    });

    c.bench_function("SkipSet contains 1000", |b| {
        bench_contains(b, 1_000);
    });
    c.bench_function("SkipSet contains 100000", |b| {
        bench_contains(b, 100_000);
    });

    c.bench_function("SkipSet iter 1000", |b| {
        bench_iter(b, 1_000);
    });
    c.bench_function("SkipSet iter 10000", |b| {
        bench_iter(b, 10_000);
    });
}
