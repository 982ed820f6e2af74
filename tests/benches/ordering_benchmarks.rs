//! # Folio CMS Ordering Benchmarks
//!
//! | Operation | Expected cost |
//! |-----------|---------------|
//! | Display sort | O(n log n), stable |
//! | Free slot lookup | O(capacity) |
//! | Local order edit | O(n) lookup, no I/O |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::seq::SliceRandom;
use rand::Rng;
use std::sync::Arc;

use cms_01_ordering::{
    first_free_slot, sort_for_display, InMemoryOrderStore, MutatorConfig, OrderMutator,
    TracingNotifier, BANNER_CAPACITY,
};
use shared_types::{Project, RecordId};

fn random_projects(count: usize) -> Vec<Project> {
    let mut rng = rand::thread_rng();
    let mut projects: Vec<Project> = (0..count as i64)
        .map(|id| Project {
            id: Some(RecordId::Int(id)),
            title: format!("Project {id}"),
            // Roughly one in ten rows has no order yet.
            order: (!rng.gen_ratio(1, 10)).then(|| rng.gen_range(1..=count as i64)),
            ..Default::default()
        })
        .collect();
    projects.shuffle(&mut rng);
    projects
}

// ============================================================================
// Display sort
// ============================================================================

fn bench_display_sort(c: &mut Criterion) {
    let mut group = c.benchmark_group("display-sort");

    for size in [10, 100, 1_000, 10_000] {
        let projects = random_projects(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &projects, |b, projects| {
            b.iter_batched(
                || projects.clone(),
                |mut projects| {
                    sort_for_display(&mut projects);
                    black_box(projects)
                },
                criterion::BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

// ============================================================================
// Slot allocation
// ============================================================================

fn bench_first_free_slot(c: &mut Criterion) {
    let mut group = c.benchmark_group("first-free-slot");

    group.bench_function("banners_gap", |b| {
        b.iter(|| black_box(first_free_slot(black_box([1i64, 3]), BANNER_CAPACITY)))
    });

    for capacity in [16u32, 256, 4_096] {
        // Every slot taken except the last.
        let occupied: Vec<i64> = (1..i64::from(capacity)).collect();
        group.bench_with_input(BenchmarkId::new("nearly_full", capacity), &occupied, |b, occupied| {
            b.iter(|| black_box(first_free_slot(occupied.iter().copied(), capacity)))
        });
    }

    group.finish();
}

// ============================================================================
// Optimistic edit
// ============================================================================

fn bench_begin_change(c: &mut Criterion) {
    let mut group = c.benchmark_group("begin-change");

    for size in [100, 1_000] {
        let store = Arc::new(InMemoryOrderStore::new(random_projects(size)));
        let mutator = OrderMutator::<Project, _>::with_records(
            store,
            Arc::new(TracingNotifier),
            MutatorConfig::permissive(),
            random_projects(size),
        );
        let last = RecordId::Int(size as i64 - 1);

        group.bench_with_input(BenchmarkId::from_parameter(size), &last, |b, id| {
            let mut order = 0i64;
            b.iter(|| {
                order += 1;
                black_box(mutator.begin_change(id, order).is_ok())
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_display_sort, bench_first_free_slot, bench_begin_change);
criterion_main!(benches);
