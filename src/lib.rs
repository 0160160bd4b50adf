//! # Typewriter
//!
//! Incremental markdown for chat transcripts: reveal an assistant message
//! one character at a time, and render whatever prefix is showing as
//! styled inline markdown.
//!
//! ## Core Concepts
//!
//! - **Total tokenizer**: every line maps to typed spans (text, bold,
//!   italic, code, link); malformed markup degrades to plain text
//! - **One live reveal**: a scheduler owns a single "current message" slot;
//!   a new identity supersedes the old one, cancelling its timer
//! - **Completion registry**: messages that finished revealing are shown
//!   in full immediately when they come back into view
//! - **Observers**: rendering and scroll-sync subscribe to reveal events
//!   instead of living inside the tick loop
//!
//! ## Example
//!
//! ```rust
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use std::time::Duration;
//! use typewriter::{CompletionRegistry, ManualClock, RevealCallbacks, RevealConfig, RevealScheduler};
//!
//! let clock = ManualClock::new();
//! let mut scheduler =
//!     RevealScheduler::with_clock(RevealConfig::default(), CompletionRegistry::new(), clock.clone())
//!         .unwrap();
//!
//! let shown = Rc::new(RefCell::new(String::new()));
//! let sink = Rc::clone(&shown);
//! scheduler.start(
//!     "msg-1",
//!     "**hi**",
//!     RevealCallbacks::new().on_complete(move |text| {
//!         sink.borrow_mut().push_str(text);
//!         Ok(())
//!     }),
//! );
//!
//! while scheduler.is_running() {
//!     scheduler.pump();
//!     clock.advance(Duration::from_millis(20));
//! }
//! let text = shown.borrow();
//! assert_eq!(*text, "**hi**");
//!
//! let spans = typewriter::tokenize(&text);
//! assert_eq!(spans[0].content, "hi");
//! ```

#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod actor;
pub mod markdown;
pub mod render;
pub mod reveal;

// Re-exports for convenience
pub use actor::{Tick, TickerActor};
pub use markdown::{tokenize, tokenize_text, Segment, Span, SpanKind};
pub use render::{LiveRegion, MarkdownView, OutputBuffer, Theme};
pub use reveal::{
    CancelReason, Clock, CompletionRegistry, ManualClock, MessageId, Phase, RevealCallbacks,
    RevealConfig, RevealEvent, RevealObserver, RevealScheduler, ScrollRequest, ScrollSync,
    StartOutcome, SystemClock,
};
