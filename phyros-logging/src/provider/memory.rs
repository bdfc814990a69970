use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use super::{LogProvider, ReleaseState};
use crate::{Error, LogEntry, Severity};

/// A provider for testing that keeps every written entry in memory.
///
/// Entries are recorded as clones, so assertions see exactly what was written even if the caller
/// keeps enriching its own copy afterwards.
#[derive(Debug)]
pub struct MemoryProvider {
    entries: MemoryHandle,
    minimum_level: Severity,
    state: ReleaseState,
}

/// Shared view of the entries recorded by a [`MemoryProvider`].
///
/// Stays readable after the provider has been released.
#[derive(Clone, Debug, Default)]
pub struct MemoryHandle {
    entries: Arc<Mutex<Vec<LogEntry>>>,
    released: Arc<AtomicBool>,
}

impl MemoryProvider {
    /// Creates a new memory provider and returns both the provider and a handle to its entries.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use phyros_logging::{LogEntry, LogProvider, MemoryProvider};
    ///
    /// let (provider, entries) = MemoryProvider::new();
    /// provider.write(&LogEntry::information("hello", [])).unwrap();
    ///
    /// assert_eq!(entries.len(), 1);
    /// assert_eq!(entries.snapshot()[0].message_template(), "hello");
    /// ```
    pub fn new() -> (Self, MemoryHandle) {
        let entries = MemoryHandle::default();
        (
            Self {
                entries: entries.clone(),
                minimum_level: Severity::Debug,
                state: ReleaseState::default(),
            },
            entries,
        )
    }

    /// Skips entries below `minimum_level`.
    pub fn with_minimum_level(mut self, minimum_level: Severity) -> Self {
        self.minimum_level = minimum_level;
        self
    }
}

impl MemoryHandle {
    /// Returns a copy of all recorded entries, in write order.
    pub fn snapshot(&self) -> Vec<LogEntry> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of recorded entries.
    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Returns `true` if nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Removes and returns all recorded entries.
    pub fn take(&self) -> Vec<LogEntry> {
        std::mem::take(&mut *self.entries.lock().unwrap_or_else(PoisonError::into_inner))
    }

    /// Returns `true` once the owning provider has been released.
    pub fn is_released(&self) -> bool {
        self.released.load(Ordering::Acquire)
    }
}

impl LogProvider for MemoryProvider {
    fn write(&self, entry: &LogEntry) -> Result<(), Error> {
        self.state.check("memory log provider")?;

        if entry.severity() >= self.minimum_level {
            self.entries
                .entries
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(entry.clone());
        }
        Ok(())
    }

    fn release(&self) {
        if self.state.release() {
            self.entries.released.store(true, Ordering::Release);
            tracing::trace!("released memory log provider");
        }
    }
}
