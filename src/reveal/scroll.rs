//! Scroll-sync: viewport scroll requests derived from reveal events.
//!
//! The viewport controller decides *how* to scroll; this observer only
//! decides *when* to ask. Stride requests are coalesced once
//! [`SCROLL_QUEUE_CAPACITY`] of them are pending, so a viewport that falls
//! behind never sees a growing queue. `Final` requests are never dropped.

use super::error::ObserverError;
use super::event::{ObserverResult, RevealEvent, RevealObserver};
use super::state::MessageId;
use crossbeam_channel::{unbounded, Receiver, Sender, TrySendError};

/// Pending requests a viewport may lag behind by before stride requests
/// are dropped.
pub const SCROLL_QUEUE_CAPACITY: usize = 8;

/// Why a scroll was requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollReason {
    /// The revealed length hit a multiple of the stride.
    Stride,
    /// The reveal completed (or was replayed complete).
    Final,
}

/// A request for the viewport to reposition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrollRequest {
    /// Message that grew.
    pub id: MessageId,
    /// Characters revealed when the request was made.
    pub revealed: usize,
    /// Why the request was made.
    pub reason: ScrollReason,
}

/// Observer that emits [`ScrollRequest`]s every `stride` characters and
/// once more on completion.
///
/// The completing tick only produces the `Final` request, even when its
/// length is a multiple of the stride.
#[derive(Debug)]
pub struct ScrollSync {
    stride: usize,
    tx: Sender<ScrollRequest>,
}

impl ScrollSync {
    /// Create an observer feeding `tx`.
    ///
    /// `tx` should be unbounded: a bounded channel that fills up turns a
    /// `Final` request into an observer failure. A `stride` of zero is
    /// treated as one.
    pub fn new(stride: usize, tx: Sender<ScrollRequest>) -> Self {
        Self {
            stride: stride.max(1),
            tx,
        }
    }

    /// Create an observer together with the receiving end for the viewport.
    pub fn channel(stride: usize) -> (Self, Receiver<ScrollRequest>) {
        let (tx, rx) = unbounded();
        (Self::new(stride, tx), rx)
    }

    /// The configured stride.
    pub const fn stride(&self) -> usize {
        self.stride
    }

    fn request(&self, id: &MessageId, revealed: usize, reason: ScrollReason) -> ObserverResult {
        if reason == ScrollReason::Stride && self.tx.len() >= SCROLL_QUEUE_CAPACITY {
            tracing::trace!(%id, revealed, "scroll request coalesced");
            return Ok(());
        }
        let request = ScrollRequest {
            id: id.clone(),
            revealed,
            reason,
        };
        match self.tx.try_send(request) {
            Ok(()) => Ok(()),
            Err(TrySendError::Full(request)) => Err(ObserverError::failed(format!(
                "scroll queue full, {:?} request for {} lost",
                request.reason, request.id
            ))),
            Err(TrySendError::Disconnected(_)) => Err(ObserverError::Disconnected),
        }
    }
}

impl RevealObserver for ScrollSync {
    fn on_event(&mut self, event: &RevealEvent<'_>) -> ObserverResult {
        match *event {
            RevealEvent::Progress {
                id,
                revealed,
                total,
                ..
            } if revealed < total && revealed % self.stride == 0 => {
                self.request(id, revealed, ScrollReason::Stride)
            }
            RevealEvent::Completed { id, total, .. } => {
                self.request(id, total, ScrollReason::Final)
            }
            RevealEvent::Progress { .. } | RevealEvent::Cancelled { .. } => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn progress(sync: &mut ScrollSync, id: &MessageId, revealed: usize, total: usize) {
        sync.on_event(&RevealEvent::Progress {
            id,
            prefix: "",
            revealed,
            total,
        })
        .unwrap();
    }

    #[test]
    fn test_stride_and_final() {
        let (mut sync, rx) = ScrollSync::channel(5);
        let id = MessageId::new("m");

        let mut fired = Vec::new();
        for revealed in 1..=10 {
            progress(&mut sync, &id, revealed, 10);
            fired.extend(rx.try_iter().map(|r| (r.revealed, r.reason)));
        }
        sync.on_event(&RevealEvent::Completed {
            id: &id,
            text: "",
            total: 10,
            replayed: false,
        })
        .unwrap();
        fired.extend(rx.try_iter().map(|r| (r.revealed, r.reason)));

        assert_eq!(
            fired,
            vec![(5, ScrollReason::Stride), (10, ScrollReason::Final)]
        );
    }

    #[test]
    fn test_final_survives_full_queue() {
        let (mut sync, rx) = ScrollSync::channel(1);
        let id = MessageId::new("m");
        for revealed in 1..50 {
            progress(&mut sync, &id, revealed, 50);
        }
        sync.on_event(&RevealEvent::Completed {
            id: &id,
            text: "",
            total: 50,
            replayed: false,
        })
        .unwrap();

        let requests: Vec<_> = rx.try_iter().collect();
        assert_eq!(requests.len(), SCROLL_QUEUE_CAPACITY + 1);
        assert_eq!(
            requests.last().map(|r| (r.revealed, r.reason)),
            Some((50, ScrollReason::Final))
        );
    }

    #[test]
    fn test_full_queue_coalesces() {
        let (mut sync, rx) = ScrollSync::channel(1);
        let id = MessageId::new("m");
        for revealed in 1..100 {
            progress(&mut sync, &id, revealed, 100);
        }
        assert_eq!(rx.len(), SCROLL_QUEUE_CAPACITY);
    }

    #[test]
    fn test_disconnected_viewport_is_an_error() {
        let (mut sync, rx) = ScrollSync::channel(1);
        drop(rx);
        let id = MessageId::new("m");
        let result = sync.on_event(&RevealEvent::Progress {
            id: &id,
            prefix: "a",
            revealed: 1,
            total: 3,
        });
        assert_eq!(result, Err(ObserverError::Disconnected));
    }

    #[test]
    fn test_zero_stride_is_clamped() {
        let (tx, _rx) = unbounded();
        assert_eq!(ScrollSync::new(0, tx).stride(), 1);
    }
}
