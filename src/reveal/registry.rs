//! Completion registry: message ids whose reveal has finished.
//!
//! Once an id is registered, every later `start` for it shows the full text
//! immediately. The registry is append-only until [`CompletionRegistry::clear`]
//! is called at a session boundary.

use super::state::MessageId;
use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

/// Shared handle to a set of completed message ids.
///
/// Cloning the handle shares the underlying set, so several schedulers
/// (and the host) can observe one conversation's registry. The registry
/// is single-threaded: it is mutated only from scheduler ticks on the
/// thread that owns it.
#[derive(Debug, Clone, Default)]
pub struct CompletionRegistry {
    completed: Rc<RefCell<HashSet<MessageId>>>,
}

impl CompletionRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `id` has completed its reveal.
    pub fn has(&self, id: &MessageId) -> bool {
        self.completed.borrow().contains(id)
    }

    /// Record `id` as completed. Returns `false` if it already was.
    pub fn add(&self, id: MessageId) -> bool {
        self.completed.borrow_mut().insert(id)
    }

    /// Forget every completed id.
    pub fn clear(&self) {
        self.completed.borrow_mut().clear();
    }

    /// Number of completed ids.
    pub fn len(&self) -> usize {
        self.completed.borrow().len()
    }

    /// Whether no id has completed yet.
    pub fn is_empty(&self) -> bool {
        self.completed.borrow().is_empty()
    }

    /// Whether two handles share the same underlying set.
    pub fn same_registry(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.completed, &other.completed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_add_has_clear() {
        let registry = CompletionRegistry::new();
        let id = MessageId::new("m1");
        assert!(!registry.has(&id));

        assert!(registry.add(id.clone()));
        assert!(!registry.add(id.clone()));
        assert!(registry.has(&id));
        assert_eq!(registry.len(), 1);

        registry.clear();
        assert!(registry.is_empty());
        assert!(!registry.has(&id));
    }

    #[test]
    fn test_clones_share_state() {
        let registry = CompletionRegistry::new();
        let handle = registry.clone();
        handle.add("x".into());
        assert!(registry.has(&"x".into()));
        assert!(registry.same_registry(&handle));
        assert!(!registry.same_registry(&CompletionRegistry::new()));
    }
}
