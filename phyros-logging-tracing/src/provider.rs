use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};

use phyros_logging::{Error, LogEntry, LogProvider, Severity};
use tracing::{Dispatch, Level};

const COMPONENT: &str = "tracing log provider";

/// Provider that emits every entry as a `tracing` event under a specific [`Dispatch`].
///
/// Releasing the provider drops its handle to the dispatcher only if the provider owns it, a
/// caller-supplied dispatcher that is not owned stays untouched until the provider itself is
/// dropped. Writes fail after release either way.
#[derive(Debug)]
pub struct TracingProvider {
    dispatch: Mutex<Option<Dispatch>>,
    owns_dispatch: bool,
    released: AtomicBool,
}

impl TracingProvider {
    /// Wraps a caller-supplied dispatcher.
    ///
    /// With `owns_dispatch` the provider drops its handle on release, which tears the subscriber
    /// down once no other handle is left.
    pub fn new(dispatch: Dispatch, owns_dispatch: bool) -> Self {
        Self {
            dispatch: Mutex::new(Some(dispatch)),
            owns_dispatch,
            released: AtomicBool::new(false),
        }
    }

    /// Creates the dispatcher with `factory`; the provider always owns a dispatcher it created.
    pub fn from_factory<F>(factory: F) -> Self
    where
        F: FnOnce() -> Dispatch,
    {
        Self::new(factory(), true)
    }

    /// Returns `true` if the provider releases its dispatcher handle on release.
    pub fn owns_dispatch(&self) -> bool {
        self.owns_dispatch
    }
}

/// Encodes the properties as one JSON object, collection values as JSON strings.
fn encode_properties(entry: &LogEntry) -> Result<String, Error> {
    let mut object = serde_json::Map::with_capacity(entry.properties().len());
    for (key, value) in entry.properties() {
        let value = if value.is_collection() {
            serde_json::Value::String(serde_json::to_string(value)?)
        } else {
            serde_json::to_value(value)?
        };
        object.insert(key.clone(), value);
    }
    Ok(serde_json::to_string(&object)?)
}

/// Emits an event at the level closest to `$severity`; `tracing` levels must be constants.
macro_rules! emit {
    ($severity:expr, $($fields:tt)+) => {
        match $severity {
            Severity::Debug => tracing::event!(target: "phyros_logging", Level::DEBUG, $($fields)+),
            Severity::Information => tracing::event!(target: "phyros_logging", Level::INFO, $($fields)+),
            Severity::Warning => tracing::event!(target: "phyros_logging", Level::WARN, $($fields)+),
            Severity::Error | Severity::Fatal => {
                tracing::event!(target: "phyros_logging", Level::ERROR, $($fields)+)
            }
        }
    };
}

impl LogProvider for TracingProvider {
    fn write(&self, entry: &LogEntry) -> Result<(), Error> {
        if self.released.load(Ordering::Acquire) {
            return Err(Error::disposed(COMPONENT));
        }

        let dispatch = self
            .dispatch
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
            .ok_or_else(|| Error::disposed(COMPONENT))?;

        let message = entry.render_message();
        let properties = encode_properties(entry)?;
        let error = entry.error_ref().map(ToString::to_string);

        tracing::dispatcher::with_default(&dispatch, || {
            emit!(
                entry.severity(),
                message_template = entry.message_template(),
                severity = entry.severity().as_str(),
                correlation_id = %entry.correlation_id(),
                properties = properties.as_str(),
                error = error.as_deref(),
                "{message}"
            );
        });

        Ok(())
    }

    fn release(&self) {
        if self.released.swap(true, Ordering::AcqRel) {
            return;
        }

        if self.owns_dispatch {
            drop(
                self.dispatch
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .take(),
            );
        }
        tracing::trace!(owned = self.owns_dispatch, "released tracing log provider");
    }
}
