//! Ticker Actor: Dedicated thread that wakes the reveal loop.
//!
//! The reveal scheduler is single-threaded and never sleeps on its own.
//! A host that has no frame loop of its own spawns a ticker and calls
//! [`RevealScheduler::pump`](crate::reveal::RevealScheduler::pump) on
//! every [`Tick`]. Ticks are paced, never queued: a slow consumer sees
//! gaps, not a burst.

use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, Sender, TrySendError};
use std::io;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// Shortest interval a ticker accepts.
pub const MIN_INTERVAL: Duration = Duration::from_millis(1);

/// A wake-up sent at a regular interval.
#[derive(Debug, Clone, Copy)]
pub struct Tick {
    /// Frame number (monotonically increasing, gaps mean dropped ticks).
    pub frame: u64,
    /// When the tick was produced.
    pub at: Instant,
    /// Time elapsed since the ticker was spawned.
    pub elapsed: Duration,
}

/// Ticker actor that generates regular timing events.
#[derive(Debug)]
pub struct TickerActor {
    handle: Option<JoinHandle<()>>,
    /// Dropping this sender stops the thread.
    stop_tx: Option<Sender<()>>,
    tick_rx: Receiver<Tick>,
    interval: Duration,
}

impl TickerActor {
    /// Spawn a ticker that fires every `interval`.
    ///
    /// Intervals below [`MIN_INTERVAL`] are raised to it.
    ///
    /// # Errors
    ///
    /// Returns an error if the OS fails to spawn the ticker thread.
    pub fn spawn(interval: Duration) -> io::Result<Self> {
        let interval = interval.max(MIN_INTERVAL);
        let (stop_tx, stop_rx) = bounded::<()>(0);
        // Two slots: one tick in flight, one waiting.
        let (tick_tx, tick_rx) = bounded(2);

        let handle = thread::Builder::new()
            .name("typewriter-ticker".to_string())
            .spawn(move || run_loop(&tick_tx, &stop_rx, interval))?;
        tracing::debug!(
            interval_ms = u64::try_from(interval.as_millis()).unwrap_or(u64::MAX),
            "ticker spawned"
        );

        Ok(Self {
            handle: Some(handle),
            stop_tx: Some(stop_tx),
            tick_rx,
            interval,
        })
    }

    /// The tick receiver, for `recv` or `select!`.
    #[inline]
    pub const fn receiver(&self) -> &Receiver<Tick> {
        &self.tick_rx
    }

    /// The pacing interval.
    pub const fn interval(&self) -> Duration {
        self.interval
    }

    /// Signal the ticker to stop. Ticks already queued stay readable.
    pub fn shutdown(&mut self) {
        self.stop_tx.take();
    }

    /// Stop the ticker and wait for its thread to finish.
    pub fn join(mut self) {
        self.shutdown();
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                tracing::warn!("ticker thread panicked");
            }
        }
    }
}

impl Drop for TickerActor {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn run_loop(tick_tx: &Sender<Tick>, stop_rx: &Receiver<()>, interval: Duration) {
    let start = Instant::now();
    let mut frame = 0u64;
    let mut next_tick = start + interval;

    loop {
        let wait = next_tick.saturating_duration_since(Instant::now());
        match stop_rx.recv_timeout(wait) {
            Err(RecvTimeoutError::Timeout) => {}
            Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
        }

        let now = Instant::now();
        let tick = Tick {
            frame,
            at: now,
            elapsed: now - start,
        };
        match tick_tx.try_send(tick) {
            Ok(()) => {}
            Err(TrySendError::Full(_)) => tracing::trace!(frame, "tick dropped"),
            Err(TrySendError::Disconnected(_)) => break,
        }

        frame += 1;
        next_tick += interval;
        // Behind schedule: skip ahead instead of bursting.
        if next_tick < now {
            next_tick = now + interval;
        }
    }
    tracing::debug!(frames = frame, "ticker stopped");
}
