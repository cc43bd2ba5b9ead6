use criterion::{black_box, criterion_group, criterion_main, Criterion};
use solo_core::{define_singleton, singleton, Eager, SingletonCell};

pub struct Config {
    threads: usize,
}
singleton!(Config, Config { threads: 8 });

pub struct Catalog {
    threads: usize,
}
define_singleton!(CATALOG, Catalog, Catalog { threads: 8 });

static LIMITS: Eager<Config> = Eager::new(Config { threads: 8 });

fn bench_fast_path(c: &mut Criterion) {
    Config::get_instance();
    let mut group = c.benchmark_group("fast_path");
    group.bench_function("double_checked", |b| {
        b.iter(|| black_box(Config::get_instance().threads))
    });
    group.bench_function("lazy_lock", |b| b.iter(|| black_box(CATALOG.threads)));
    group.bench_function("eager", |b| b.iter(|| black_box(LIMITS.get().threads)));
    group.finish();
}

fn bench_first_access(c: &mut Criterion) {
    c.bench_function("first_access", |b| {
        b.iter(|| {
            let cell = SingletonCell::new();
            black_box(cell.get_or_init(|| Config { threads: 1 }).threads)
        })
    });
}

criterion_group!(benches, bench_fast_path, bench_first_access);
criterion_main!(benches);
