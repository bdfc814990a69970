//! Process-wide registration of a single log writer.

use std::sync::{Mutex, MutexGuard};

use crate::{Error, LogProvider, LogWriter, LoggerBuilder};

/// The registered writer; `None` until the first successful registration.
///
/// Writers are leaked on registration so they can be handed out as `&'static`. Registration
/// happens at most once per process, so at most one writer is leaked.
static GLOBAL_WRITER: Mutex<Option<&'static LogWriter>> = Mutex::new(None);

/// Registers the process-wide log writer, configuring it with `configure` on first use.
///
/// The first successful call runs `configure` on a fresh [`LoggerBuilder`], builds the provider and
/// stores the writer. Every later call returns that same writer without running its `configure`
/// callback: re-registration with a different configuration is ignored, not merged.
///
/// Concurrent first calls are serialized, so exactly one writer is ever created. If building fails
/// the error is returned and nothing is registered, so a later call can try again.
///
/// The registered writer lives for the rest of the process and is never dropped, call
/// [`LogWriter::shutdown`] before exiting to release its provider.
///
/// `configure`, and a provider factory it installs, run while the registration lock is held, so
/// they must not call back into the registration functions or [`global`]. Registration events are
/// only emitted to `tracing` after the lock is released, so a subscriber may call [`global`].
///
/// # Examples
///
/// ```rust
/// use phyros_logging::{ConsoleOptions, ConsoleProvider, LogEntry};
///
/// let writer = phyros_logging::register(|builder| {
///     builder.use_provider(ConsoleProvider::new(ConsoleOptions::default()));
/// })?;
/// writer.log(&LogEntry::information("Service started", []))?;
///
/// let again = phyros_logging::register(|_| unreachable!("already registered"))?;
/// assert!(std::ptr::eq(writer, again));
/// # Ok::<(), phyros_logging::Error>(())
/// ```
pub fn register<F>(configure: F) -> Result<&'static LogWriter, Error>
where
    F: FnOnce(&mut LoggerBuilder),
{
    let mut slot = lock_slot();

    if let Some(writer) = *slot {
        drop(slot);
        tracing::debug!("log writer already registered, ignoring new configuration");
        return Ok(writer);
    }

    let mut builder = LoggerBuilder::new();
    configure(&mut builder);
    let provider = builder.build()?;

    let writer: &'static LogWriter = Box::leak(Box::new(LogWriter::from_boxed(provider)));
    *slot = Some(writer);
    drop(slot);

    tracing::debug!(?writer, "registered process-wide log writer");
    Ok(writer)
}

/// Registers the process-wide log writer with `provider`.
///
/// Shorthand for [`register`] with [`LoggerBuilder::use_provider`]; `provider` is dropped
/// unused if a writer is already registered.
pub fn register_provider(
    provider: impl LogProvider + 'static,
) -> Result<&'static LogWriter, Error> {
    register(|builder| {
        builder.use_provider(provider);
    })
}

/// Registers the process-wide log writer with a provider created by `factory`.
///
/// Shorthand for [`register`] with [`LoggerBuilder::use_provider_factory`]; `factory` is never
/// run if a writer is already registered.
pub fn register_provider_factory<F, P>(factory: F) -> Result<&'static LogWriter, Error>
where
    F: FnOnce() -> Result<P, Error> + Send + 'static,
    P: LogProvider + 'static,
{
    register(|builder| {
        builder.use_provider_factory(factory);
    })
}

/// Returns the registered process-wide writer, if any.
pub fn global() -> Option<&'static LogWriter> {
    *lock_slot()
}

fn lock_slot() -> MutexGuard<'static, Option<&'static LogWriter>> {
    // A panicking `configure` leaves the slot untouched, so the poisoned value is still valid.
    match GLOBAL_WRITER.lock() {
        Ok(slot) => slot,
        Err(poisoned) => poisoned.into_inner(),
    }
}
