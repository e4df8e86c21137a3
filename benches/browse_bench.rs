//! Benchmarks for the Namika browse view and store mutations
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use namika::store::{seed, BrowseFilter, Study, StudyCategory, StudyLocation, StudyStore};

fn create_test_studies(count: usize) -> Vec<Study> {
    let seeds = seed::studies();
    (0..count)
        .map(|i| {
            let mut study = seeds[i % seeds.len()].clone();
            study.id = i.to_string();
            study.compensation = (i % 500) as f64;
            study
        })
        .collect()
}

fn bench_browse(c: &mut Criterion) {
    let mut group = c.benchmark_group("browse");

    let filters = [
        ("unfiltered", BrowseFilter::new()),
        ("category", BrowseFilter::new().category(StudyCategory::UxResearch)),
        ("search", BrowseFilter::new().search("usability")),
        (
            "combined",
            BrowseFilter::new()
                .search("app")
                .location(StudyLocation::Remote)
                .min_compensation(100.0),
        ),
    ];

    for size in [100, 1000, 10000] {
        let studies = create_test_studies(size);
        group.throughput(Throughput::Elements(size as u64));

        for (name, filter) in &filters {
            group.bench_function(format!("{}_{}", name, size), |b| {
                b.iter(|| filter.apply(black_box(&studies)).len())
            });
        }
    }

    group.finish();
}

fn bench_store(c: &mut Criterion) {
    let mut group = c.benchmark_group("store");

    group.bench_function("apply_to_study", |b| {
        let mut store = StudyStore::seeded();
        b.iter(|| {
            store
                .apply_to_study(black_box("4"), black_box("p1"), Vec::new())
                .id
                .len()
        });
    });

    group.bench_function("has_applied_1000", |b| {
        let mut store = StudyStore::seeded();
        for i in 0..1000 {
            store.apply_to_study("4", &format!("p{}", i), Vec::new());
        }
        b.iter(|| store.has_applied(black_box("p999"), black_box("4")));
    });

    group.finish();
}

criterion_group!(benches, bench_browse, bench_store);
criterion_main!(benches);
