//! Actors: Background threads that feed the single-threaded reveal loop.
//!
//! ```text
//! ┌───────────────┐     Tick      ┌──────────────────────┐
//! │ Ticker Thread │ ────────────▶ │ Host loop            │
//! └───────────────┘               │   scheduler.pump()   │
//!                                 └──────────────────────┘
//! ```
//!
//! Actors only ever send; all reveal state stays on the host thread.

mod ticker;

pub use ticker::{Tick, TickerActor, MIN_INTERVAL};
