use std::sync::atomic::{AtomicBool, Ordering};

use crate::{Error, LogEntry, LogProvider};

/// The façade applications log through.
///
/// Wraps exactly one provider and forwards every entry to it. After [`shutdown`](Self::shutdown)
/// every call to [`log`](Self::log) fails with [`Error::Disposed`]. Dropping the writer shuts it
/// down.
///
/// # Examples
///
/// ```rust
/// use phyros_logging::{LogEntry, LogWriter, MemoryProvider, arguments};
///
/// let (provider, entries) = MemoryProvider::new();
/// let writer = LogWriter::new(provider);
///
/// writer.log(LogEntry::information("Order {Id} shipped", arguments![1017]).add_property("carrier", "ups"))?;
/// writer.shutdown();
///
/// assert_eq!(entries.len(), 1);
/// assert!(writer.log(&LogEntry::information("late", [])).is_err());
/// # Ok::<(), phyros_logging::Error>(())
/// ```
#[derive(Debug)]
pub struct LogWriter {
    provider: Box<dyn LogProvider>,
    shut_down: AtomicBool,
}

impl LogWriter {
    /// Wraps `provider`.
    pub fn new(provider: impl LogProvider + 'static) -> Self {
        Self::from_boxed(Box::new(provider))
    }

    /// Wraps an already boxed provider, as returned by
    /// [`LoggerBuilder::build`](crate::LoggerBuilder::build).
    pub fn from_boxed(provider: Box<dyn LogProvider>) -> Self {
        Self {
            provider,
            shut_down: AtomicBool::new(false),
        }
    }

    /// Forwards `entry` to the provider.
    ///
    /// Provider failures are returned unchanged; nothing is retried.
    pub fn log(&self, entry: &LogEntry) -> Result<(), Error> {
        if self.shut_down.load(Ordering::Acquire) {
            return Err(Error::disposed("log writer"));
        }
        self.provider.write(entry)
    }

    /// Releases the provider.
    ///
    /// Idempotent: only the first call releases the provider, later calls do nothing.
    pub fn shutdown(&self) {
        if !self.shut_down.swap(true, Ordering::AcqRel) {
            tracing::debug!("shutting down log writer");
            self.provider.release();
        }
    }

    /// Returns `true` once [`shutdown`](Self::shutdown) has been called.
    pub fn is_shut_down(&self) -> bool {
        self.shut_down.load(Ordering::Acquire)
    }
}

impl Drop for LogWriter {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::AtomicUsize;

    use super::*;
    use crate::{ErrorKind, MemoryProvider};

    #[derive(Debug, Default)]
    struct CountingProvider {
        releases: Arc<AtomicUsize>,
    }

    impl LogProvider for CountingProvider {
        fn write(&self, _: &LogEntry) -> Result<(), Error> {
            Ok(())
        }

        fn release(&self) {
            self.releases.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[derive(Debug)]
    struct FailingProvider;

    impl LogProvider for FailingProvider {
        fn write(&self, _: &LogEntry) -> Result<(), Error> {
            Err(std::io::Error::other("disk full").into())
        }

        fn release(&self) {}
    }

    #[test]
    fn forwards_entries() {
        let (provider, entries) = MemoryProvider::new();
        let writer = LogWriter::new(provider);

        writer.log(&LogEntry::information("one", [])).unwrap();
        writer.log(&LogEntry::warning("two", [])).unwrap();

        let templates: Vec<_> = entries
            .snapshot()
            .iter()
            .map(|entry| entry.message_template().to_owned())
            .collect();
        assert_eq!(templates, ["one", "two"]);
    }

    #[test]
    fn rejects_after_shutdown() {
        let (provider, entries) = MemoryProvider::new();
        let writer = LogWriter::new(provider);

        writer.shutdown();

        let error = writer.log(&LogEntry::information("late", [])).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::InvalidState);
        assert_eq!(
            error.to_string(),
            "cannot use log writer after it has been released"
        );
        assert!(entries.is_empty());
        assert!(entries.is_released());
    }

    #[test]
    fn shutdown_releases_once() {
        let releases = Arc::new(AtomicUsize::new(0));
        let writer = LogWriter::new(CountingProvider {
            releases: releases.clone(),
        });

        writer.shutdown();
        writer.shutdown();
        assert!(writer.is_shut_down());
        drop(writer);

        assert_eq!(releases.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn drop_releases_provider() {
        let releases = Arc::new(AtomicUsize::new(0));
        drop(LogWriter::new(CountingProvider {
            releases: releases.clone(),
        }));
        assert_eq!(releases.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn provider_errors_propagate() {
        let writer = LogWriter::new(FailingProvider);
        let error = writer
            .log(&LogEntry::error("failed", FailingError, []))
            .unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Backend);
    }

    #[derive(thiserror::Error, Debug)]
    #[error("failing")]
    struct FailingError;
}
