use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use lrucache::LruCache;

fn bench_cached_get(c: &mut Criterion) {
    let mut group = c.benchmark_group("cached_get");
    group.sample_size(50);
    group.throughput(Throughput::Elements(1));

    group.bench_function("get_hit", |b| {
        let mut cache = LruCache::new(1000).unwrap();
        let data = vec![b'x'; 1024];

        // Pre-populate
        for id in 0..100u64 {
            cache.put(id, data.clone());
        }

        let mut counter = 0u64;
        b.iter(|| {
            black_box(cache.get(&(counter % 100)));
            counter += 1;
        });
    });

    group.bench_function("peek_hit", |b| {
        let mut cache = LruCache::new(1000).unwrap();
        for id in 0..100u64 {
            cache.put(id, id);
        }

        let mut counter = 0u64;
        b.iter(|| {
            black_box(cache.peek(&(counter % 100)));
            counter += 1;
        });
    });

    group.finish();
}

fn bench_mixed_50_50(c: &mut Criterion) {
    let mut group = c.benchmark_group("mixed");
    group.sample_size(50);
    group.throughput(Throughput::Elements(1));

    group.bench_function("50_read_50_write", |b| {
        let mut cache = LruCache::new(1000).unwrap();

        // Pre-populate
        for id in 0..100u64 {
            cache.put(id, id);
        }

        let mut counter = 0u64;
        b.iter(|| {
            if counter % 2 == 0 {
                black_box(cache.get(&(counter % 100)));
            } else {
                black_box(cache.put(counter % 2000, counter));
            }
            counter += 1;
        });
    });

    group.finish();
}

fn bench_eviction(c: &mut Criterion) {
    let mut group = c.benchmark_group("eviction");
    group.sample_size(50);
    group.throughput(Throughput::Elements(1));

    group.bench_function("put_evicting", |b| {
        let mut cache = LruCache::with_eviction_callback(10, |value: u64| {
            black_box(value);
        })
        .unwrap(); // Small cache

        let mut counter = 0u64;
        b.iter(|| {
            // Every put is a new key, so every put past warm-up evicts
            black_box(cache.put(counter, counter));
            counter += 1;
        });
    });

    group.finish();
}

criterion_group!(benches, bench_cached_get, bench_mixed_50_50, bench_eviction);
criterion_main!(benches);
