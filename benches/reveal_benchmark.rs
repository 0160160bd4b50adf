//! Reveal benchmark: Measure the cost of one scheduler tick.
//!
//! Target: a tick (advance, dispatch, re-arm) well under a frame budget,
//! including a rendering observer.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::time::Duration;
use typewriter::render::{write_text, OutputBuffer};
use typewriter::{
    CompletionRegistry, ManualClock, MarkdownView, RevealCallbacks, RevealConfig, RevealScheduler,
    Theme,
};

const MESSAGE: &str = "A **long** reply with `code`, *emphasis* and [links](https://example.com). ";

fn scheduler() -> (ManualClock, RevealScheduler<ManualClock>) {
    let clock = ManualClock::new();
    let scheduler =
        RevealScheduler::with_clock(RevealConfig::default(), CompletionRegistry::new(), clock.clone())
            .unwrap();
    (clock, scheduler)
}

fn reveal_full_message(c: &mut Criterion) {
    let text = MESSAGE.repeat(20);
    let mut id = 0u64;
    c.bench_function("reveal_full_message", |b| {
        let (clock, mut scheduler) = scheduler();
        b.iter(|| {
            id += 1;
            scheduler.start(id, text.as_str(), RevealCallbacks::new());
            while scheduler.is_running() {
                scheduler.pump();
                clock.advance(Duration::from_millis(20));
            }
        });
    });
}

fn reveal_with_view(c: &mut Criterion) {
    let text = MESSAGE.repeat(20);
    let theme = Theme::default();
    let mut id = 0u64;
    c.bench_function("reveal_with_view_render", |b| {
        let (clock, mut scheduler) = scheduler();
        let view = MarkdownView::shared();
        scheduler.add_observer(std::rc::Rc::clone(&view));
        let mut out = OutputBuffer::new();
        b.iter(|| {
            id += 1;
            scheduler.start(id, text.as_str(), RevealCallbacks::new());
            while scheduler.is_running() {
                if scheduler.pump() {
                    out.clear();
                    write_text(&mut out, view.borrow().text(), &theme);
                    black_box(out.len());
                }
                clock.advance(Duration::from_millis(20));
            }
        });
    });
}

fn replay_completed(c: &mut Criterion) {
    let (clock, mut scheduler) = scheduler();
    scheduler.start("done", MESSAGE, RevealCallbacks::new());
    while scheduler.is_running() {
        scheduler.pump();
        clock.advance(Duration::from_millis(20));
    }

    c.bench_function("replay_completed", |b| {
        b.iter(|| scheduler.start(black_box("done"), MESSAGE, RevealCallbacks::new()));
    });
}

criterion_group!(benches, reveal_full_message, reveal_with_view, replay_completed);
criterion_main!(benches);
