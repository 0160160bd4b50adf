//! Markdown view: the presentation-side observer of a reveal.

use super::output::OutputBuffer;
use super::style::Theme;
use super::write_text;
use crate::markdown::{self, Span};
use crate::reveal::{MessageId, ObserverResult, RevealEvent, RevealObserver};
use std::cell::RefCell;
use std::rc::Rc;

/// What the view is currently showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewStatus {
    /// Nothing yet.
    #[default]
    Empty,
    /// A prefix of the message.
    Revealing,
    /// The full message.
    Complete,
    /// A prefix frozen by cancellation.
    Interrupted,
}

/// Keeps the latest revealed text of the message in the slot.
///
/// Attach it to a scheduler with [`MarkdownView::shared`] so the host can
/// read it back between pumps. Progress for a new id replaces the text.
#[derive(Debug, Default)]
pub struct MarkdownView {
    id: Option<MessageId>,
    text: String,
    status: ViewStatus,
}

impl MarkdownView {
    /// An empty view.
    pub fn new() -> Self {
        Self::default()
    }

    /// A view behind `Rc<RefCell<_>>`, ready to pass to
    /// [`RevealScheduler::add_observer`](crate::reveal::RevealScheduler::add_observer)
    /// as a clone.
    pub fn shared() -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self::new()))
    }

    /// Message currently shown.
    pub const fn id(&self) -> Option<&MessageId> {
        self.id.as_ref()
    }

    /// Raw revealed text, markers included.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Current status.
    pub const fn status(&self) -> ViewStatus {
        self.status
    }

    /// The revealed text tokenized per line.
    pub fn lines(&self) -> Vec<Vec<Span<'_>>> {
        markdown::lines(&self.text).collect()
    }

    /// Render the revealed text into `out`.
    pub fn render(&self, out: &mut OutputBuffer, theme: &Theme) {
        write_text(out, &self.text, theme);
    }

    /// Forget the shown message.
    pub fn clear(&mut self) {
        self.id = None;
        self.text.clear();
        self.status = ViewStatus::Empty;
    }

    fn show(&mut self, id: &MessageId, text: &str, status: ViewStatus) {
        if self.id.as_ref() != Some(id) {
            self.id = Some(id.clone());
        }
        self.text.clear();
        self.text.push_str(text);
        self.status = status;
    }
}

impl RevealObserver for MarkdownView {
    fn on_event(&mut self, event: &RevealEvent<'_>) -> ObserverResult {
        match *event {
            RevealEvent::Progress { id, prefix, .. } => {
                self.show(id, prefix, ViewStatus::Revealing);
            }
            RevealEvent::Completed { id, text, .. } => {
                self.show(id, text, ViewStatus::Complete);
            }
            RevealEvent::Cancelled { id, .. } => {
                if self.id.as_ref() == Some(id) {
                    self.status = ViewStatus::Interrupted;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markdown::SpanKind;
    use crate::reveal::CancelReason;

    #[test]
    fn test_view_follows_events() {
        let mut view = MarkdownView::new();
        let id = MessageId::new("m");
        assert_eq!(view.status(), ViewStatus::Empty);

        view.on_event(&RevealEvent::Progress {
            id: &id,
            prefix: "**bo",
            revealed: 4,
            total: 8,
        })
        .unwrap();
        assert_eq!(view.status(), ViewStatus::Revealing);
        assert_eq!(view.lines()[0][0].kind, SpanKind::Text);

        view.on_event(&RevealEvent::Completed {
            id: &id,
            text: "**bold**",
            total: 8,
            replayed: false,
        })
        .unwrap();
        assert_eq!(view.status(), ViewStatus::Complete);
        assert_eq!(view.lines()[0][0].kind, SpanKind::Bold);
        assert_eq!(view.id(), Some(&id));
    }

    #[test]
    fn test_cancel_freezes_matching_message_only() {
        let mut view = MarkdownView::new();
        let a = MessageId::new("a");
        let b = MessageId::new("b");
        view.on_event(&RevealEvent::Progress {
            id: &a,
            prefix: "he",
            revealed: 2,
            total: 5,
        })
        .unwrap();

        view.on_event(&RevealEvent::Cancelled {
            id: &b,
            reason: &CancelReason::Requested,
        })
        .unwrap();
        assert_eq!(view.status(), ViewStatus::Revealing);

        view.on_event(&RevealEvent::Cancelled {
            id: &a,
            reason: &CancelReason::Requested,
        })
        .unwrap();
        assert_eq!(view.status(), ViewStatus::Interrupted);
        assert_eq!(view.text(), "he");

        view.clear();
        assert_eq!(view.status(), ViewStatus::Empty);
        assert!(view.id().is_none());
    }
}
