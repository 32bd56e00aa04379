use std::fmt;
use std::sync::mpsc::{self, TryRecvError};

/// A source that may eventually yield one value.
///
/// Polled without blocking. `None` means "not yet", including the case
/// where the source will never complete.
pub trait PendingAsset<T> {
    fn poll_ready(&mut self) -> Option<T>;
}

impl<T> PendingAsset<T> for mpsc::Receiver<T> {
    fn poll_ready(&mut self) -> Option<T> {
        match self.try_recv() {
            Ok(value) => Some(value),
            Err(TryRecvError::Empty | TryRecvError::Disconnected) => None,
        }
    }
}

/// A source that never completes.
#[derive(Debug, Clone, Copy, Default)]
pub struct Never;

impl<T> PendingAsset<T> for Never {
    fn poll_ready(&mut self) -> Option<T> {
        None
    }
}

/// Loading state of an asynchronously delivered asset.
pub enum AssetSlot<T> {
    Pending(Box<dyn PendingAsset<T>>),
    Ready(T),
}

impl<T> AssetSlot<T> {
    pub fn pending(source: impl PendingAsset<T> + 'static) -> Self {
        Self::Pending(Box::new(source))
    }

    /// Poll a pending source once. Returns `true` on the transition to ready.
    pub fn poll(&mut self) -> bool {
        let Self::Pending(source) = self else {
            return false;
        };
        match source.poll_ready() {
            Some(value) => {
                *self = Self::Ready(value);
                true
            }
            None => false,
        }
    }

    pub fn get(&self) -> Option<&T> {
        match self {
            Self::Ready(value) => Some(value),
            Self::Pending(_) => None,
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }
}

impl<T: fmt::Debug> fmt::Debug for AssetSlot<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending(_) => f.write_str("Pending"),
            Self::Ready(value) => f.debug_tuple("Ready").field(value).finish(),
        }
    }
}
