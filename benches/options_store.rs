//! Scan Option Store Benchmarks
//!
//! **Purpose:** Measure the load/save cycle of persisted scan options
//!
//! **Baseline Metrics:** record locally with
//! `cargo bench --bench options_store -- --save-baseline main`
//!
//! **Regression Threshold:** >20% slower than baseline
//!
//! **How to Run:**
//! ```bash
//! cargo bench --bench options_store
//! ```
//!
//! **What's Being Measured:**
//! 1. `load options from memory` - JSON decode of a stored record
//! 2. `load corrupt record` - Fallback path to defaults
//! 3. `save options to file` - JSON encode + file write
//!
//! **Performance Notes:**
//! - The record is a six-field flat object
//! - File-backed saves are dominated by the write syscall

use criterion::{criterion_group, criterion_main, Criterion};
use oobee_scan::infra::{FileKeyValueStore, MemoryKeyValueStore};
use oobee_scan::options::{ScanConfigStore, ScanOptions, Viewport, SCAN_OPTIONS_KEY};
use std::hint::black_box;
use tempfile::TempDir;

fn sample_options() -> ScanOptions {
    ScanOptions {
        viewport: Viewport::Mobile,
        include_screenshots: true,
        custom_checks: true,
        ..ScanOptions::default()
    }
}

fn bench_load(c: &mut Criterion) {
    let backend = MemoryKeyValueStore::new();
    let store = ScanConfigStore::new(backend);
    store.save(sample_options());

    c.bench_function("load options from memory", |b| {
        b.iter(|| black_box(store.load()))
    });
}

fn bench_load_corrupt(c: &mut Criterion) {
    let backend = MemoryKeyValueStore::new();
    backend.insert_raw(SCAN_OPTIONS_KEY, "{\"viewport\": \"mobile\"");
    let store = ScanConfigStore::new(backend);

    c.bench_function("load corrupt record", |b| b.iter(|| black_box(store.load())));
}

fn bench_save_file(c: &mut Criterion) {
    let temp_dir = TempDir::new().unwrap();
    let store = ScanConfigStore::new(FileKeyValueStore::new(temp_dir.path()));

    c.bench_function("save options to file", |b| {
        b.iter(|| store.save(black_box(sample_options())))
    });
}

criterion_group!(benches, bench_load, bench_load_corrupt, bench_save_file);
criterion_main!(benches);
