//! Typewriter Demo: Reveals a short chat transcript in the terminal.
//!
//! Each assistant message is revealed one character at a time and redrawn
//! in place with inline markdown styling. The first message is shown a
//! second time at the end to demonstrate that completed messages come
//! back in full without animating.
//!
//! Set `RUST_LOG=typewriter=debug` to see scheduler transitions on stderr.

use std::cell::RefCell;
use std::io::Write;
use std::rc::Rc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;
use typewriter::reveal::ScrollReason;
use typewriter::{
    CompletionRegistry, LiveRegion, MarkdownView, RevealCallbacks, RevealConfig, RevealScheduler,
    StartOutcome, Theme, TickerActor,
};

const TRANSCRIPT: &[(&str, &str)] = &[
    (
        "msg-1",
        "Sure! The reveal runs **one character per tick**, and *nothing* is batched.",
    ),
    (
        "msg-2",
        "Inline code like `pump()` is styled as soon as its closing tick arrives.\n\
         Links render with their target: [crossterm](https://docs.rs/crossterm).",
    ),
    (
        "msg-3",
        "Unclosed markers such as **this stay literal until they close.",
    ),
];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = RevealConfig::default().with_cadence(Duration::from_millis(25));
    let registry = CompletionRegistry::new();
    let mut scheduler = RevealScheduler::with_config(config, registry.clone())?;

    let view = MarkdownView::shared();
    scheduler.add_observer(Rc::clone(&view));
    let scroll_rx = scheduler.scroll_sync();

    let ticker = TickerActor::spawn(Duration::from_millis(5))?;
    let width = crossterm::terminal::size().map_or(80, |(cols, _)| cols);
    let stdout = std::io::stdout();
    let mut region = LiveRegion::new(stdout.lock(), Theme::default(), width);

    for &(id, text) in TRANSCRIPT {
        reveal(&mut scheduler, &ticker, &view, &mut region, id, text)?;
        let scrolls = scroll_rx.try_iter().collect::<Vec<_>>();
        let strides = scrolls
            .iter()
            .filter(|request| request.reason == ScrollReason::Stride)
            .count();
        tracing::info!(id, strides, total = scrolls.len(), "scroll requests");
    }

    // Already complete: delivered synchronously, no timer armed.
    let armed = scheduler.timers_armed();
    let (id, text) = TRANSCRIPT[0];
    let shown = Rc::new(RefCell::new(String::new()));
    let sink = Rc::clone(&shown);
    let outcome = scheduler.start(
        id,
        text,
        RevealCallbacks::new().on_complete(move |full| {
            sink.borrow_mut().push_str(full);
            Ok(())
        }),
    );
    assert_eq!(outcome, StartOutcome::AlreadyComplete);
    assert_eq!(scheduler.timers_armed(), armed);
    region.draw(&shown.borrow())?;
    region.finish()?;

    drop(region);
    writeln!(std::io::stdout(), "\n{} messages completed.", registry.len())?;
    ticker.join();
    Ok(())
}

fn reveal<W: Write>(
    scheduler: &mut RevealScheduler,
    ticker: &TickerActor,
    view: &Rc<RefCell<MarkdownView>>,
    region: &mut LiveRegion<W>,
    id: &str,
    text: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    view.borrow_mut().clear();
    scheduler.start(id, text, RevealCallbacks::new());
    while scheduler.is_running() {
        ticker.receiver().recv()?;
        if scheduler.pump() {
            region.draw(view.borrow().text())?;
        }
    }
    region.finish()?;
    Ok(())
}
