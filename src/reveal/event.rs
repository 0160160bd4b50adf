//! Reveal events and the observers that consume them.
//!
//! The scheduler publishes one event stream per slot. Rendering and
//! scroll-sync are both plain subscribers of that stream; neither is part
//! of the tick loop itself.

use super::error::ObserverError;
use super::state::{CancelReason, MessageId};
use std::cell::RefCell;
use std::rc::Rc;

/// Result type returned by observers and callbacks.
pub type ObserverResult = Result<(), ObserverError>;

/// Something that happened to a reveal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealEvent<'a> {
    /// One more character was revealed.
    Progress {
        /// The message being revealed.
        id: &'a MessageId,
        /// Everything revealed so far.
        prefix: &'a str,
        /// Characters revealed so far.
        revealed: usize,
        /// Characters in the full text.
        total: usize,
    },
    /// The full text is showing.
    Completed {
        /// The message.
        id: &'a MessageId,
        /// The full text.
        text: &'a str,
        /// Characters in the full text.
        total: usize,
        /// `true` when served from the completion registry without animating.
        replayed: bool,
    },
    /// The reveal stopped early.
    Cancelled {
        /// The message.
        id: &'a MessageId,
        /// Why it stopped.
        reason: &'a CancelReason,
    },
}

impl<'a> RevealEvent<'a> {
    /// The message this event is about.
    pub const fn id(&self) -> &'a MessageId {
        match self {
            Self::Progress { id, .. } | Self::Completed { id, .. } | Self::Cancelled { id, .. } => {
                id
            }
        }
    }
}

/// A subscriber to reveal events.
///
/// Returning an error (or panicking) stops the reveal that produced the
/// event. Errors returned for [`RevealEvent::Cancelled`] are only logged.
pub trait RevealObserver {
    /// Handle one event.
    fn on_event(&mut self, event: &RevealEvent<'_>) -> ObserverResult;
}

impl<T: RevealObserver + ?Sized> RevealObserver for Box<T> {
    fn on_event(&mut self, event: &RevealEvent<'_>) -> ObserverResult {
        (**self).on_event(event)
    }
}

/// Lets the host keep a handle on an observer the scheduler owns.
impl<T: RevealObserver + ?Sized> RevealObserver for Rc<RefCell<T>> {
    fn on_event(&mut self, event: &RevealEvent<'_>) -> ObserverResult {
        self.try_borrow_mut()
            .map_err(|_| ObserverError::failed("observer is already borrowed"))?
            .on_event(event)
    }
}

type TextCallback = Box<dyn FnMut(&str) -> ObserverResult>;

/// The `on_progress` / `on_complete` pair handed to a single `start` call.
///
/// Both callbacks receive text: the revealed prefix for progress and the
/// full text for completion.
#[derive(Default)]
pub struct RevealCallbacks {
    on_progress: Option<TextCallback>,
    on_complete: Option<TextCallback>,
}

impl RevealCallbacks {
    /// No callbacks.
    pub fn new() -> Self {
        Self::default()
    }

    /// Called on every tick with the revealed prefix.
    #[must_use]
    pub fn on_progress(mut self, f: impl FnMut(&str) -> ObserverResult + 'static) -> Self {
        self.on_progress = Some(Box::new(f));
        self
    }

    /// Called once with the full text when the reveal completes.
    #[must_use]
    pub fn on_complete(mut self, f: impl FnMut(&str) -> ObserverResult + 'static) -> Self {
        self.on_complete = Some(Box::new(f));
        self
    }
}

impl std::fmt::Debug for RevealCallbacks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RevealCallbacks")
            .field("on_progress", &self.on_progress.is_some())
            .field("on_complete", &self.on_complete.is_some())
            .finish()
    }
}

impl RevealObserver for RevealCallbacks {
    fn on_event(&mut self, event: &RevealEvent<'_>) -> ObserverResult {
        match event {
            RevealEvent::Progress { prefix, .. } => match self.on_progress.as_mut() {
                Some(f) => f(prefix),
                None => Ok(()),
            },
            RevealEvent::Completed { text, .. } => match self.on_complete.as_mut() {
                Some(f) => f(text),
                None => Ok(()),
            },
            RevealEvent::Cancelled { .. } => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_callbacks_route_by_event() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let progress_log = Rc::clone(&seen);
        let complete_log = Rc::clone(&seen);
        let mut callbacks = RevealCallbacks::new()
            .on_progress(move |prefix| {
                progress_log.borrow_mut().push(format!("p:{prefix}"));
                Ok(())
            })
            .on_complete(move |text| {
                complete_log.borrow_mut().push(format!("c:{text}"));
                Ok(())
            });

        let id = MessageId::new("m");
        callbacks
            .on_event(&RevealEvent::Progress {
                id: &id,
                prefix: "h",
                revealed: 1,
                total: 2,
            })
            .unwrap();
        callbacks
            .on_event(&RevealEvent::Completed {
                id: &id,
                text: "hi",
                total: 2,
                replayed: false,
            })
            .unwrap();
        callbacks
            .on_event(&RevealEvent::Cancelled {
                id: &id,
                reason: &CancelReason::Requested,
            })
            .unwrap();

        assert_eq!(*seen.borrow(), vec!["p:h".to_string(), "c:hi".to_string()]);
    }

    #[test]
    fn test_shared_observer_reports_reentrant_borrow() {
        struct Nop;
        impl RevealObserver for Nop {
            fn on_event(&mut self, _event: &RevealEvent<'_>) -> ObserverResult {
                Ok(())
            }
        }

        let shared = Rc::new(RefCell::new(Nop));
        let mut handle = Rc::clone(&shared);
        let id = MessageId::new("m");
        let event = RevealEvent::Cancelled {
            id: &id,
            reason: &CancelReason::Teardown,
        };

        let _guard = shared.borrow_mut();
        assert!(handle.on_event(&event).is_err());
    }
}
