//! Reveal Scheduler: the typewriter state machine for the current message.
//!
//! A scheduler owns one *slot*: the message currently being revealed (or
//! the last one that was). Starting a different message supersedes the
//! one in the slot, so at most one reveal is live at any time.
//!
//! # Driving
//!
//! The scheduler never sleeps and never spawns anything. The host calls
//! [`RevealScheduler::pump`] whenever it wakes up (a frame, a
//! [`TickerActor`](crate::actor::TickerActor) tick, a test step), and each
//! call fires at most one due timer transition. All state lives on the
//! calling thread.
//!
//! # Example
//!
//! ```rust
//! use std::time::Duration;
//! use typewriter::reveal::{CompletionRegistry, ManualClock, RevealConfig, RevealScheduler};
//!
//! let clock = ManualClock::new();
//! let mut scheduler = RevealScheduler::with_clock(
//!     RevealConfig::default(),
//!     CompletionRegistry::new(),
//!     clock.clone(),
//! )
//! .unwrap();
//!
//! scheduler.start("m1", "hi", Default::default());
//! scheduler.pump(); // initial deferral: Idle -> Running
//! clock.advance(Duration::from_millis(20));
//! scheduler.pump();
//! assert_eq!(scheduler.revealed(), "h");
//! ```

use super::clock::{Clock, SystemClock};
use super::config::RevealConfig;
use super::error::{ConfigError, ObserverError};
use super::event::{ObserverResult, RevealCallbacks, RevealEvent, RevealObserver};
use super::registry::CompletionRegistry;
use super::scroll::{ScrollRequest, ScrollSync};
use super::state::{CancelReason, MessageId, Phase, RevealState};
use super::timer::{next_deadline, TimerSlot};
use crossbeam_channel::Receiver;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::time::{Duration, Instant};

/// What `start` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOutcome {
    /// A new reveal was created and its first timer armed.
    Scheduled,
    /// The same message is already being revealed; nothing changed.
    AlreadyRunning,
    /// The message completed before; the full text was delivered
    /// synchronously and no timer was armed.
    AlreadyComplete,
}

/// One reveal instance.
#[derive(Debug)]
struct Reveal {
    state: RevealState,
    phase: Phase,
    timer: TimerSlot,
    cadence: Duration,
    callbacks: RevealCallbacks,
}

type Observers = Vec<Box<dyn RevealObserver>>;

/// Typewriter scheduler for one "current message" slot.
pub struct RevealScheduler<C: Clock = SystemClock> {
    config: RevealConfig,
    clock: C,
    registry: CompletionRegistry,
    slot: Option<Reveal>,
    observers: Observers,
    /// Timer arms of reveals that have left the slot.
    retired_arms: u64,
}

impl RevealScheduler<SystemClock> {
    /// Create a scheduler with the default configuration.
    pub fn new(registry: CompletionRegistry) -> Self {
        Self::build(RevealConfig::default(), registry, SystemClock)
    }

    /// Create a scheduler with a custom configuration.
    pub fn with_config(
        config: RevealConfig,
        registry: CompletionRegistry,
    ) -> Result<Self, ConfigError> {
        Self::with_clock(config, registry, SystemClock)
    }
}

impl<C: Clock> RevealScheduler<C> {
    /// Create a scheduler reading time from `clock`.
    pub fn with_clock(
        config: RevealConfig,
        registry: CompletionRegistry,
        clock: C,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config, registry, clock))
    }

    fn build(config: RevealConfig, registry: CompletionRegistry, clock: C) -> Self {
        Self {
            config,
            clock,
            registry,
            slot: None,
            observers: Vec::new(),
            retired_arms: 0,
        }
    }

    /// Subscribe an observer to every reveal this scheduler runs.
    ///
    /// Observers see events after the per-`start` callbacks, in the order
    /// they were added.
    pub fn add_observer(&mut self, observer: impl RevealObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Attach a [`ScrollSync`] at the configured scroll stride and return
    /// the receiving end for the viewport.
    pub fn scroll_sync(&mut self) -> Receiver<ScrollRequest> {
        let (sync, rx) = ScrollSync::channel(self.config.scroll_stride);
        self.add_observer(sync);
        rx
    }

    /// Start revealing `full_text` for `id` at the configured cadence.
    pub fn start(
        &mut self,
        id: impl Into<MessageId>,
        full_text: impl Into<String>,
        callbacks: RevealCallbacks,
    ) -> StartOutcome {
        let cadence = self.config.cadence;
        self.start_with_cadence(id, full_text, cadence, callbacks)
    }

    /// Start revealing `full_text` for `id`, one character per `cadence`.
    ///
    /// - If `id` is in the completion registry, `on_complete` runs right away
    ///   with `full_text` and nothing is scheduled.
    /// - If `id` is already live in the slot, nothing changes: the running
    ///   reveal keeps its text and callbacks.
    /// - Otherwise any live reveal of another message is cancelled
    ///   ([`CancelReason::Superseded`]) and a new reveal starts from zero.
    pub fn start_with_cadence(
        &mut self,
        id: impl Into<MessageId>,
        full_text: impl Into<String>,
        cadence: Duration,
        callbacks: RevealCallbacks,
    ) -> StartOutcome {
        let id = id.into();
        let full_text = full_text.into();

        if self.live().is_some_and(|reveal| reveal.state.id() == &id) {
            return StartOutcome::AlreadyRunning;
        }
        self.cancel_live(CancelReason::Superseded { by: id.clone() });

        if self.registry.has(&id) {
            self.replay_complete(RevealState::fully_revealed(id, full_text), callbacks);
            return StartOutcome::AlreadyComplete;
        }

        let state = RevealState::new(id, full_text);
        let mut timer = TimerSlot::new();
        timer.arm(self.clock.now() + self.config.initial_delay);
        tracing::debug!(
            id = %state.id(),
            total = state.total(),
            cadence_ms = u64::try_from(cadence.as_millis()).unwrap_or(u64::MAX),
            "reveal scheduled"
        );

        self.replace_slot(Reveal {
            state,
            phase: Phase::Idle,
            timer,
            cadence,
            callbacks,
        });
        StartOutcome::Scheduled
    }

    /// Cancel the reveal of `id`.
    ///
    /// Stops its timer and drops its callbacks without registering it as
    /// complete. Returns `false` (a no-op) if `id` is not live.
    pub fn cancel(&mut self, id: impl Into<MessageId>) -> bool {
        let id = id.into();
        if self.live().is_some_and(|reveal| reveal.state.id() == &id) {
            self.cancel_live(CancelReason::Requested)
        } else {
            false
        }
    }

    /// Cancel whatever is live: the consumer is going away.
    pub fn teardown(&mut self) -> bool {
        self.cancel_live(CancelReason::Teardown)
    }

    /// Start a new conversation: cancel the live reveal and clear the
    /// completion registry.
    pub fn reset_session(&mut self) {
        self.cancel_live(CancelReason::SessionReset);
        let forgotten = self.registry.len();
        self.registry.clear();
        tracing::debug!(forgotten, "reveal session reset");
    }

    /// Fire the slot's timer if it is due.
    ///
    /// Returns `true` if a transition ran (the deferral elapsing or one
    /// character being revealed).
    pub fn pump(&mut self) -> bool {
        let now = self.clock.now();
        let Self {
            slot,
            observers,
            registry,
            ..
        } = self;

        let Some(reveal) = slot.as_mut() else {
            return false;
        };
        let Some(fired) = reveal.timer.fire(now) else {
            return false;
        };

        match reveal.phase {
            Phase::Idle => {
                reveal.phase = Phase::Running;
                tracing::debug!(id = %reveal.state.id(), "reveal running");
                if reveal.state.is_fully_revealed() {
                    complete(reveal, observers, registry);
                } else {
                    reveal.timer.arm(now + reveal.cadence);
                }
            }
            Phase::Running => tick(reveal, observers, registry, fired, now),
            Phase::Completed | Phase::Cancelled(_) => {}
        }
        true
    }

    /// The configuration.
    pub const fn config(&self) -> &RevealConfig {
        &self.config
    }

    /// The completion registry this scheduler records into.
    pub const fn registry(&self) -> &CompletionRegistry {
        &self.registry
    }

    /// The clock this scheduler reads.
    pub const fn clock(&self) -> &C {
        &self.clock
    }

    /// The id of the live reveal.
    pub fn active_id(&self) -> Option<&MessageId> {
        self.live().map(|reveal| reveal.state.id())
    }

    /// Whether a reveal is live (`Idle` or `Running`).
    pub fn is_running(&self) -> bool {
        self.live().is_some()
    }

    /// Phase of the reveal in the slot, live or finished.
    pub fn phase(&self) -> Option<&Phase> {
        self.slot.as_ref().map(|reveal| &reveal.phase)
    }

    /// Id of the reveal in the slot, live or finished.
    pub fn slot_id(&self) -> Option<&MessageId> {
        self.slot.as_ref().map(|reveal| reveal.state.id())
    }

    /// The revealed prefix of the message in the slot.
    pub fn revealed(&self) -> &str {
        self.slot.as_ref().map_or("", |reveal| reveal.state.prefix())
    }

    /// Characters revealed for the message in the slot.
    pub fn revealed_len(&self) -> usize {
        self.slot
            .as_ref()
            .map_or(0, |reveal| reveal.state.revealed_len())
    }

    /// Whether a timer is armed.
    pub fn has_pending_timer(&self) -> bool {
        self.slot
            .as_ref()
            .is_some_and(|reveal| reveal.timer.is_armed())
    }

    /// When the armed timer is due.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.slot.as_ref().and_then(|reveal| reveal.timer.deadline())
    }

    /// Total timer arms since this scheduler was created.
    pub fn timers_armed(&self) -> u64 {
        self.retired_arms + self.slot.as_ref().map_or(0, |reveal| reveal.timer.arms())
    }

    fn live(&self) -> Option<&Reveal> {
        self.slot.as_ref().filter(|reveal| reveal.phase.is_live())
    }

    fn replace_slot(&mut self, reveal: Reveal) {
        if let Some(old) = self.slot.replace(reveal) {
            self.retired_arms += old.timer.arms();
        }
    }

    /// Move the live reveal (if any) to `Cancelled(reason)`.
    fn cancel_live(&mut self, reason: CancelReason) -> bool {
        match self.slot.as_mut() {
            Some(reveal) if reveal.phase.is_live() => {
                cancel(reveal, &mut self.observers, reason);
                true
            }
            _ => false,
        }
    }

    /// Put an already-complete message in the slot and deliver its
    /// completion synchronously, without arming a timer.
    fn replay_complete(&mut self, state: RevealState, mut callbacks: RevealCallbacks) {
        let cadence = self.config.cadence;
        self.replace_slot(Reveal {
            state,
            phase: Phase::Completed,
            timer: TimerSlot::new(),
            cadence,
            callbacks: RevealCallbacks::new(),
        });

        let Some(reveal) = self.slot.as_ref() else {
            return;
        };
        let id = reveal.state.id();
        let event = RevealEvent::Completed {
            id,
            text: reveal.state.full_text(),
            total: reveal.state.total(),
            replayed: true,
        };
        if let Err(err) = dispatch(&mut callbacks, &mut self.observers, &event) {
            tracing::warn!(%id, error = %err, "observer failed on replayed completion");
        }
        tracing::trace!(%id, "reveal replayed from registry");
    }
}

impl<C: Clock> Drop for RevealScheduler<C> {
    fn drop(&mut self) {
        if std::thread::panicking() {
            if let Some(reveal) = self.slot.as_mut() {
                reveal.timer.disarm();
            }
            return;
        }
        self.teardown();
    }
}

impl<C: Clock> std::fmt::Debug for RevealScheduler<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RevealScheduler")
            .field("config", &self.config)
            .field("slot", &self.slot)
            .field("observers", &self.observers.len())
            .field("completed", &self.registry.len())
            .finish_non_exhaustive()
    }
}

/// Reveal one character. The slot's timer was disarmed by firing.
fn tick(
    reveal: &mut Reveal,
    observers: &mut Observers,
    registry: &CompletionRegistry,
    fired: Instant,
    now: Instant,
) {
    if reveal.phase != Phase::Running {
        return;
    }

    reveal.state.advance();
    let event = RevealEvent::Progress {
        id: reveal.state.id(),
        prefix: reveal.state.prefix(),
        revealed: reveal.state.revealed_len(),
        total: reveal.state.total(),
    };
    tracing::trace!(
        id = %reveal.state.id(),
        revealed = reveal.state.revealed_len(),
        total = reveal.state.total(),
        "reveal tick"
    );

    if let Err(err) = dispatch(&mut reveal.callbacks, observers, &event) {
        fail(reveal, observers, err);
        return;
    }

    if reveal.state.is_fully_revealed() {
        complete(reveal, observers, registry);
    } else {
        reveal.timer.arm(next_deadline(fired, now, reveal.cadence));
    }
}

/// `Running` → `Completed`: notify `on_complete`, register, notify observers.
fn complete(reveal: &mut Reveal, observers: &mut Observers, registry: &CompletionRegistry) {
    let id = reveal.state.id();
    let event = RevealEvent::Completed {
        id,
        text: reveal.state.full_text(),
        total: reveal.state.total(),
        replayed: false,
    };

    if let Err(err) = guarded(&mut reveal.callbacks, &event) {
        fail(reveal, observers, err);
        return;
    }
    registry.add(id.clone());
    tracing::debug!(%id, total = reveal.state.total(), "reveal completed");

    for observer in observers.iter_mut() {
        if let Err(err) = guarded(observer, &event) {
            tracing::warn!(%id, error = %err, "observer failed on completion");
        }
    }
    reveal.phase = Phase::Completed;
    reveal.callbacks = RevealCallbacks::new();
}

fn fail(reveal: &mut Reveal, observers: &mut Observers, err: ObserverError) {
    tracing::warn!(
        id = %reveal.state.id(),
        revealed = reveal.state.revealed_len(),
        error = %err,
        "reveal stopped by failing observer"
    );
    cancel(reveal, observers, CancelReason::ObserverFailed(err));
}

/// Any live phase → `Cancelled(reason)`.
fn cancel(reveal: &mut Reveal, observers: &mut Observers, reason: CancelReason) {
    reveal.timer.disarm();
    reveal.callbacks = RevealCallbacks::new();
    reveal.phase = Phase::Cancelled(reason);

    let Phase::Cancelled(reason) = &reveal.phase else {
        return;
    };
    let id = reveal.state.id();
    tracing::debug!(%id, revealed = reveal.state.revealed_len(), %reason, "reveal cancelled");

    let event = RevealEvent::Cancelled { id, reason };
    for observer in observers.iter_mut() {
        if let Err(err) = guarded(observer, &event) {
            tracing::warn!(%id, error = %err, "observer failed on cancellation");
        }
    }
}

/// Deliver `event` to the callbacks, then to every observer, stopping at
/// the first failure.
fn dispatch(
    callbacks: &mut RevealCallbacks,
    observers: &mut Observers,
    event: &RevealEvent<'_>,
) -> ObserverResult {
    guarded(callbacks, event)?;
    for observer in observers.iter_mut() {
        guarded(observer, event)?;
    }
    Ok(())
}

/// Run one observer, turning a panic into an [`ObserverError`].
fn guarded<O: RevealObserver + ?Sized>(observer: &mut O, event: &RevealEvent<'_>) -> ObserverResult {
    panic::catch_unwind(AssertUnwindSafe(|| observer.on_event(event)))
        .unwrap_or_else(|payload| Err(ObserverError::Panicked(panic_message(&*payload))))
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|s| (*s).to_owned())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "non-string panic payload".to_owned())
}
