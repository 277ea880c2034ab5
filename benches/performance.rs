// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Performance benchmarks for MASHUP
//!
//! Run with: cargo bench
//!
//! These benchmarks measure:
//! - Progress event handling through a whole playlist
//! - List edits while playback is running
//! - Transfer document encode/decode

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use mashup::playlist::{ClipDraft, PlaylistStore, TransferDocument};
use mashup::sequencer::{PlayerEvent, RecordingPlayer, Sequencer, SequencerState};
use mashup::Session;

fn store_of(size: usize) -> PlaylistStore {
    let mut store = PlaylistStore::default();
    for i in 0..size {
        let fields = ClipDraft::new(format!("https://example.com/{}", i), 0.0, 2.0)
            .validate()
            .unwrap();
        store.add(fields);
    }
    store.take_changes();
    store
}

/// Benchmark playing a playlist to the end at 500ms ticks
fn bench_progress_events(c: &mut Criterion) {
    let mut group = c.benchmark_group("progress_events");

    for size in [10, 100, 1000].iter() {
        let store = store_of(*size);
        group.bench_with_input(BenchmarkId::new("play_through", size), &store, |b, store| {
            b.iter(|| {
                let mut seq = Sequencer::new();
                let mut commands = seq.play(store).unwrap().len();
                while seq.state() == SequencerState::Playing {
                    let generation = seq.generation();
                    commands += seq.on_ready(generation, store).len();
                    for step in 1..=4 {
                        commands += seq.on_progress(generation, step as f64 * 0.5, store).len();
                    }
                }
                black_box(commands)
            })
        });
    }

    group.finish();
}

/// Benchmark reordering and removing while a clip is playing
fn bench_edits_during_playback(c: &mut Criterion) {
    let mut group = c.benchmark_group("edits_during_playback");

    for size in [10, 100, 1000].iter() {
        group.bench_with_input(BenchmarkId::new("shuffle_and_trim", size), size, |b, &size| {
            b.iter_batched(
                || {
                    let mut session = Session::with_store(store_of(size), RecordingPlayer::new());
                    session.play().unwrap();
                    session
                },
                |mut session| {
                    for i in 0..size {
                        session.move_down(i);
                    }
                    while let Some(id) = session.store().clips().last().map(|c| c.id()) {
                        session.remove_clip(id).unwrap();
                        let generation = session.sequencer().generation();
                        session.handle_event(PlayerEvent::Ready { generation });
                    }
                    black_box(session.player().commands().len())
                },
                criterion::BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

/// Benchmark encoding and decoding transfer documents
fn bench_transfer(c: &mut Criterion) {
    let json = store_of(500).export_snapshot().to_json().unwrap();

    c.bench_function("transfer_encode_500", |b| {
        let doc = store_of(500).export_snapshot();
        b.iter(|| black_box(doc.to_json().unwrap().len()))
    });

    c.bench_function("transfer_decode_500", |b| {
        b.iter(|| black_box(TransferDocument::decode(black_box(&json)).unwrap().items.len()))
    });
}

criterion_group!(
    benches,
    bench_progress_events,
    bench_edits_during_playback,
    bench_transfer,
);

criterion_main!(benches);
