//! The provider capability and the built-in providers.
//!
//! A [`LogProvider`] is the single seam a backend has to implement: it accepts entries and
//! releases its resources on shutdown. The pipeline only ever talks to this trait, never to a
//! concrete backend.
//!
//! # Built-in Providers
//!
//! - [`ConsoleProvider`] - Human-readable lines on stdout or stderr
//! - [`JsonProvider`] - One JSON object per line into any [`std::io::Write`]
//! - [`MemoryProvider`] - Keeps written entries in memory for assertions in tests

mod console;
mod json;
mod memory;

use std::fmt::Debug;
use std::sync::atomic::{AtomicBool, Ordering};

pub use console::{ConsoleOptions, ConsoleProvider, ConsoleStream};
pub use json::JsonProvider;
pub use memory::{MemoryHandle, MemoryProvider};

use crate::{Error, LogEntry};

/// A backend that performs the actual write of log entries.
///
/// Implementations must be usable from several threads at once; the pipeline shares one provider
/// between every caller of the [`LogWriter`](crate::LogWriter).
///
/// # Examples
///
/// ```rust
/// use phyros_logging::{Error, LogEntry, LogProvider};
///
/// #[derive(Debug)]
/// struct StdoutProvider;
///
/// impl LogProvider for StdoutProvider {
///     fn write(&self, entry: &LogEntry) -> Result<(), Error> {
///         println!("{}: {}", entry.severity(), entry.render_message());
///         Ok(())
///     }
///
///     fn release(&self) {}
/// }
/// ```
pub trait LogProvider: Debug + Send + Sync {
    /// Writes one entry.
    ///
    /// Implementations may skip entries (e.g. below a minimum level) but must fail with
    /// [`ErrorKind::InvalidState`](crate::ErrorKind::InvalidState) once [`release`](Self::release)
    /// has been called.
    fn write(&self, entry: &LogEntry) -> Result<(), Error>;

    /// Releases backend resources.
    ///
    /// Must be idempotent; only the first call has an effect.
    fn release(&self);
}

impl<P> LogProvider for Box<P>
where
    P: LogProvider + ?Sized,
{
    fn write(&self, entry: &LogEntry) -> Result<(), Error> {
        (**self).write(entry)
    }

    fn release(&self) {
        (**self).release()
    }
}

/// Tracks whether a provider has been released.
#[derive(Debug, Default)]
pub(crate) struct ReleaseState {
    released: AtomicBool,
}

impl ReleaseState {
    /// Fails with [`Error::Disposed`] once released.
    pub(crate) fn check(&self, component: &'static str) -> Result<(), Error> {
        if self.released.load(Ordering::Acquire) {
            return Err(Error::disposed(component));
        }
        Ok(())
    }

    /// Marks the state as released, returns `true` only for the first call.
    pub(crate) fn release(&self) -> bool {
        !self.released.swap(true, Ordering::AcqRel)
    }
}

#[cfg(test)]
mod tests {
    use super::ReleaseState;
    use crate::ErrorKind;

    #[test]
    fn release_state_transitions_once() {
        let state = ReleaseState::default();
        assert!(state.check("provider").is_ok());

        assert!(state.release());
        assert!(!state.release());

        let error = state.check("provider").unwrap_err();
        assert_eq!(error.kind(), ErrorKind::InvalidState);
    }
}
