use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use chunkvec::DynArray;

fn random_ints(len: usize) -> Vec<i32> {
    let mut rng = StdRng::seed_from_u64(42);
    (0..len).map(|_| rng.gen()).collect()
}

fn bench_new(c: &mut Criterion) {
    c.bench_function("new", |b| {
        b.iter(|| {
            let v: DynArray<u32> = black_box(DynArray::new());
            assert_eq!(v.len(), 0);
            assert_eq!(v.capacity(), 0);
        })
    });
    c.bench_function("new_std", |b| {
        b.iter(|| {
            let v: Vec<u32> = black_box(Vec::new());
            assert_eq!(v.len(), 0);
            assert_eq!(v.capacity(), 0);
        })
    });
}

fn bench_push_back(c: &mut Criterion) {
    let mut group = c.benchmark_group("push_back");
    for len in [10usize, 100, 1000, 10_000] {
        group.bench_with_input(BenchmarkId::new("chunkvec", len), &len, |b, &len| {
            b.iter(|| {
                let mut v: DynArray<u32> = DynArray::new();
                for i in 0..len as u32 {
                    v.push_back(i);
                }
                black_box(v)
            })
        });
        group.bench_with_input(BenchmarkId::new("std", len), &len, |b, &len| {
            b.iter(|| {
                let mut v: Vec<u32> = Vec::new();
                for i in 0..len as u32 {
                    v.push(i);
                }
                black_box(v)
            })
        });
    }
    group.finish();
}

fn bench_push_front(c: &mut Criterion) {
    let mut group = c.benchmark_group("push_front");
    for len in [10usize, 100, 1000] {
        group.bench_with_input(BenchmarkId::from_parameter(len), &len, |b, &len| {
            b.iter(|| {
                let mut v: DynArray<u32> = DynArray::new();
                for i in 0..len as u32 {
                    v.push_front(i);
                }
                black_box(v)
            })
        });
    }
    group.finish();
}

fn bench_sorts(c: &mut Criterion) {
    let mut group = c.benchmark_group("sort");
    for len in [100usize, 1000] {
        let data = random_ints(len);
        group.bench_with_input(BenchmarkId::new("selection", len), &data, |b, data| {
            b.iter(|| {
                let mut v: DynArray<i32> = DynArray::from(&data[..]);
                v.sort();
                black_box(v)
            })
        });
    }
    for len in [1000usize, 100_000] {
        let data = random_ints(len);
        group.bench_with_input(BenchmarkId::new("quick", len), &data, |b, data| {
            b.iter(|| {
                let mut v: DynArray<i32> = DynArray::from(&data[..]);
                v.quick_sort();
                black_box(v)
            })
        });
        group.bench_with_input(BenchmarkId::new("std_unstable", len), &data, |b, data| {
            b.iter(|| {
                let mut v = data.clone();
                v.sort_unstable();
                black_box(v)
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_new, bench_push_back, bench_push_front, bench_sorts);
criterion_main!(benches);
