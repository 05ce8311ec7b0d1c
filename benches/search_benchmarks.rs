//! Benchmarks for query parsing and note filtering.
//!
//! Run with: cargo bench --bench search_benchmarks

use chrono::{Duration, TimeZone, Utc};
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use fastnote::domain::{Note, OwnerId, Tag};
use fastnote::search::{evaluate, parse, search_notes};
use fastnote::store::{ContentInput, NewNote, NoteStore, SqliteStore};
use std::hint::black_box;

// =============================================================================
// Test Data Generation
// =============================================================================

/// Tags to deterministically assign to notes
const TAGS: &[&str] = &[
    "draft", "review", "done", "urgent", "blocked", "rust", "cli", "database",
];

/// Sample words for generating realistic note content
const WORDS: &[&str] = &[
    "architecture",
    "design",
    "pattern",
    "system",
    "component",
    "interface",
    "module",
    "function",
    "testing",
    "integration",
    "performance",
    "optimization",
];

const QUERIES: &[(&str, &str)] = &[
    ("empty", ""),
    ("single_word", "design"),
    ("single_tag", "#rust"),
    ("or_group", "OR(#urgent,#blocked)"),
    ("combination", "design system #done OR(#urgent,#blocked)"),
];

fn owner() -> OwnerId {
    OwnerId::new("bench").unwrap()
}

fn new_note(index: usize) -> NewNote {
    let body: Vec<&str> = (0..50).map(|j| WORDS[(index + j * 7) % WORDS.len()]).collect();
    let tags = vec![
        Tag::new(TAGS[index % TAGS.len()]).unwrap(),
        Tag::new(TAGS[(index + 3) % TAGS.len()]).unwrap(),
    ];
    let created = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
        + Duration::minutes((index * 37 % 10_000) as i64);
    NewNote::new(owner(), ContentInput::Markdown(body.join(" ")), tags).created_at(created)
}

/// Set up an in-memory store with N notes
fn setup_store(count: usize) -> SqliteStore {
    let mut store = SqliteStore::open_in_memory().expect("Failed to open store");
    for i in 0..count {
        store.create_note(new_note(i)).expect("Failed to create note");
    }
    store
}

fn load_notes(count: usize) -> Vec<Note> {
    setup_store(count).list_notes(&owner()).unwrap()
}

// =============================================================================
// Benchmarks
// =============================================================================

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");

    for (name, query) in QUERIES {
        group.bench_function(*name, |b| b.iter(|| parse(black_box(query))));
    }

    let long = "alpha #a OR(#b,#c) beta ".repeat(50);
    group.bench_function("long_query", |b| b.iter(|| parse(black_box(&long))));

    group.finish();
}

fn bench_evaluate(c: &mut Criterion) {
    let mut group = c.benchmark_group("evaluate");

    for size in [100, 1000, 10_000] {
        let notes = load_notes(size);
        let predicate = parse("design system #done OR(#urgent,#blocked)");

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("combination", size), &size, |b, _| {
            b.iter(|| evaluate(&predicate, black_box(&notes)))
        });
    }

    group.finish();
}

fn bench_search_notes(c: &mut Criterion) {
    let store = setup_store(1000);
    let owner = owner();

    let mut group = c.benchmark_group("search_notes");
    for (name, query) in QUERIES {
        group.bench_function(*name, |b| {
            b.iter(|| search_notes(&store, &owner, black_box(query)).unwrap())
        });
    }
    group.finish();
}

// =============================================================================
// Criterion Groups
// =============================================================================

criterion_group!(query_benches, bench_parse, bench_evaluate);
criterion_group!(store_benches, bench_search_notes);

criterion_main!(query_benches, store_benches);
