//! Error types for the reveal engine.

use thiserror::Error;

/// Failure reported by (or on behalf of) a reveal observer.
///
/// Any of these is fatal to the reveal that triggered it, and only to
/// that reveal: the scheduler stops ticking it and keeps going.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ObserverError {
    /// The observer returned an error.
    #[error("observer failed: {0}")]
    Failed(String),

    /// The observer panicked while handling an event.
    #[error("observer panicked: {0}")]
    Panicked(String),

    /// The observer's downstream consumer went away.
    #[error("observer channel disconnected")]
    Disconnected,
}

impl ObserverError {
    /// Shorthand for [`ObserverError::Failed`].
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed(message.into())
    }
}

/// Invalid [`RevealConfig`](super::RevealConfig).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The per-character cadence was zero.
    #[error("reveal cadence must be greater than zero")]
    ZeroCadence,

    /// The scroll-sync stride was zero.
    #[error("scroll stride must be greater than zero")]
    ZeroStride,
}
