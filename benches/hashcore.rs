//! Benchmarks for `HashCore` insert/lookup/remove.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use primal_collections::maps::IntIntMap;

pub fn hashcore_insert_lookup_remove(c: &mut Criterion) {
    c.bench_function("hashcore insert 10_000 fresh keys", |b| {
        b.iter(|| {
            let mut m = IntIntMap::new();
            for i in 0..10_000i64 {
                m.put(black_box(i), black_box(i * 2)).unwrap();
            }
            assert_eq!(m.size(), 10_000);
        });
    });

    let mut populated = IntIntMap::new();
    for i in 0..10_000i64 {
        populated.put(i, i * 2).unwrap();
    }

    c.bench_function("hashcore lookup in populated map", |b| {
        b.iter(|| {
            for i in 0..10_000i64 {
                let v = populated.get(black_box(i)).unwrap();
                assert_eq!(v, Some(i * 2));
            }
        });
    });

    c.bench_function("hashcore insert then remove 10_000 keys", |b| {
        b.iter(|| {
            let mut m = IntIntMap::new();
            for i in 0..10_000i64 {
                m.put(black_box(i), i).unwrap();
            }
            for i in 0..10_000i64 {
                assert!(m.remove(black_box(i)).unwrap());
            }
            assert_eq!(m.size(), 0);
        });
    });
}

criterion_group! {
    name = hashcore_benches;
    config = Criterion::default().without_plots().sample_size(20);
    targets = hashcore_insert_lookup_remove
}

criterion_main!(hashcore_benches);
