//! Benchmarks for the table pipeline on large collections.
//!
//! Run with: cargo bench --bench pipeline_benchmark

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use postdesk::model::{Post, post_columns};
use postdesk::table::{StructuredFilter, Table, TableOptions};
use std::hint::black_box;

/// Generate `count` posts spread over 10 users.
fn generate_posts(count: usize) -> Vec<Post> {
    (0..count as u64)
        .map(|i| Post {
            id: i + 1,
            user_id: i % 10 + 1,
            title: format!("post number {i} about topic {}", i % 37),
            body: format!("body text {} for post {i}", i % 101),
        })
        .collect()
}

fn table(posts: Vec<Post>) -> Table<Post> {
    Table::new(post_columns(30), posts, Post::key, TableOptions::default())
        .expect("benchmark table")
}

fn bench_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("search");
    for size in [1_000, 10_000, 50_000] {
        let posts = generate_posts(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &posts, |b, posts| {
            let mut table = table(posts.clone());
            b.iter(|| {
                table.search(black_box("topic 3"));
                black_box(table.working_len())
            });
        });
    }
    group.finish();
}

fn bench_filters(c: &mut Criterion) {
    let mut group = c.benchmark_group("structured_filters");
    for size in [1_000, 10_000, 50_000] {
        let posts = generate_posts(size);
        let filters = vec![
            StructuredFilter::exact("userId", 1u64),
            StructuredFilter::exact("userId", 2u64),
            StructuredFilter::free_text("title", "topic 1"),
        ];
        group.bench_with_input(BenchmarkId::from_parameter(size), &posts, |b, posts| {
            let mut table = table(posts.clone());
            b.iter(|| {
                table
                    .apply_filters(black_box(filters.clone()))
                    .expect("filterable keys");
                black_box(table.working_len())
            });
        });
    }
    group.finish();
}

fn bench_sort_and_page(c: &mut Criterion) {
    let mut group = c.benchmark_group("sort_then_page");
    for size in [1_000, 10_000, 50_000] {
        let posts = generate_posts(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &posts, |b, posts| {
            let mut table = table(posts.clone());
            b.iter(|| {
                table.sort_by(black_box("title")).expect("sortable");
                table.go_to_page(black_box(7));
                black_box(table.visible_page().len())
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_search, bench_filters, bench_sort_and_page);
criterion_main!(benches);
