//! Reveal Engine: Character-by-character typewriter reveal of chat messages.
//!
//! The engine is split into small, independently testable pieces:
//!
//! - [`RevealState`] / [`Phase`]: progress and lifecycle of one message
//! - [`TimerSlot`]: the single timer handle a reveal owns
//! - [`CompletionRegistry`]: session-scoped set of fully revealed ids
//! - [`RevealScheduler`]: the state machine that ties them together
//! - [`RevealObserver`]: subscribers such as [`ScrollSync`] and renderers
//!
//! Time comes from a [`Clock`], so tests drive the scheduler with a
//! [`ManualClock`] instead of sleeping.

mod clock;
mod config;
mod error;
mod event;
mod registry;
mod scheduler;
mod scroll;
mod state;
mod timer;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{RevealConfig, DEFAULT_CADENCE, DEFAULT_SCROLL_STRIDE};
pub use error::{ConfigError, ObserverError};
pub use event::{ObserverResult, RevealCallbacks, RevealEvent, RevealObserver};
pub use registry::CompletionRegistry;
pub use scheduler::{RevealScheduler, StartOutcome};
pub use scroll::{ScrollReason, ScrollRequest, ScrollSync, SCROLL_QUEUE_CAPACITY};
pub use state::{CancelReason, MessageId, Phase, RevealState};
pub use timer::{next_deadline, TimerSlot};
