//! Criterion benchmarks for remote key code translation.
//!
//! Every streamed keystroke (and every synthesized text-action keypress)
//! goes through [`KeycodeTable::translate`] on the main thread's poll path,
//! so a lookup must stay a bounds check plus an array index.
//!
//! Run with:
//! ```bash
//! cargo bench --package cloudwin-core --bench keymap_bench
//! ```

use cloudwin_core::keymap::{KeycodeTable, RemoteKeyCode};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

// ── Representative key codes ─────────────────────────────────────────────────

const BENCH_REMOTE_CODES: &[RemoteKeyCode] = &[
    RemoteKeyCode::A,
    RemoteKeyCode::Z,
    RemoteKeyCode::ENTER,
    RemoteKeyCode::ESCAPE,
    RemoteKeyCode::BACKSPACE,
    RemoteKeyCode::TAB,
    RemoteKeyCode::SPACEBAR,
    RemoteKeyCode::F1,
    RemoteKeyCode::F12,
    RemoteKeyCode::LEFT_CONTROL,
    RemoteKeyCode::LEFT_SHIFT,
    RemoteKeyCode::LEFT_ALT,
    RemoteKeyCode::LEFT_GUI,
    RemoteKeyCode::LEFT,
    RemoteKeyCode::RIGHT,
    RemoteKeyCode::UP,
    RemoteKeyCode::DOWN,
    RemoteKeyCode::DIGIT_1,
    RemoteKeyCode::DIGIT_0,
    RemoteKeyCode(0xFFFF),
];

// ── Benchmarks ───────────────────────────────────────────────────────────────

fn bench_table_construction(c: &mut Criterion) {
    c.bench_function("keycode_table_new", |b| b.iter(KeycodeTable::new));
}

fn bench_translate(c: &mut Criterion) {
    let table = KeycodeTable::new();
    let mut group = c.benchmark_group("keymap_translate");

    group.bench_with_input(
        BenchmarkId::new("translate", "A"),
        &RemoteKeyCode::A,
        |b, &code| b.iter(|| table.translate(black_box(code))),
    );

    group.bench_with_input(
        BenchmarkId::new("translate", "out_of_range"),
        &RemoteKeyCode(0xFFFF),
        |b, &code| b.iter(|| table.translate(black_box(code))),
    );

    // Burst of 20 diverse codes (a fast typist plus modifiers)
    group.bench_function("translate_batch_20", |b| {
        b.iter(|| {
            BENCH_REMOTE_CODES
                .iter()
                .map(|&code| table.translate(black_box(code)))
                .collect::<Vec<_>>()
        })
    });

    group.finish();
}

criterion_group!(benches, bench_table_construction, bench_translate);
criterion_main!(benches);
