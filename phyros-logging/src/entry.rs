//! The log entry data model and its enrichment operations.
//!
//! A [`LogEntry`] is created once per event, enriched through zero or more `add_*` calls and then
//! handed to a [`LogWriter`](crate::LogWriter). Enrichment mutates the entry in place and returns
//! `&mut Self` for chaining; nothing is copied. An entry must not be enriched from several call
//! sites concurrently, and must not be changed after it has been written.
//!
//! Properties and the attached error deliberately merge differently:
//!
//! - Properties are **first write wins**: adding an existing key is a no-op.
//! - The error is **last write wins**: [`LogEntry::add_error`] always replaces it.
//!
//! # Examples
//!
//! ```rust
//! use phyros_logging::{CorrelationId, LogEntry, Severity, arguments};
//!
//! let request = CorrelationId::new();
//! let mut entry = LogEntry::information("User {Id} logged in", arguments![42]);
//! entry
//!     .add_property("region", "eu-west")
//!     .add_property("region", "ignored")
//!     .add_correlation_id(request);
//!
//! assert_eq!(entry.severity(), Severity::Information);
//! assert_eq!(entry.render_message(), "User 42 logged in");
//! assert_eq!(entry.property("region").and_then(|v| v.as_str()), Some("eu-west"));
//! assert_eq!(entry.correlation_id(), request);
//! ```

use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;

use crate::{CorrelationId, Error, Severity, Value, template};

/// A failure attached to a log entry.
///
/// This is a cheaply cloneable shared handle, so the entry can be recorded by in-memory providers
/// while the original error stays identifiable through [`EntryError::same_as`].
#[derive(Clone)]
pub struct EntryError(Arc<dyn StdError + Send + Sync + 'static>);

impl EntryError {
    /// Wraps an error.
    pub fn new<E>(error: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self(Arc::new(error))
    }

    /// Wraps an already boxed error.
    pub fn from_boxed(error: Box<dyn StdError + Send + Sync + 'static>) -> Self {
        Self(Arc::from(error))
    }

    /// Returns `true` if both handles refer to the same underlying error.
    pub fn same_as(&self, other: &EntryError) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// Returns the underlying error.
    pub fn as_error(&self) -> &(dyn StdError + Send + Sync + 'static) {
        &*self.0
    }
}

impl<E> From<E> for EntryError
where
    E: StdError + Send + Sync + 'static,
{
    fn from(error: E) -> Self {
        Self::new(error)
    }
}

impl fmt::Debug for EntryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.0, f)
    }
}

impl fmt::Display for EntryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&*self.0, f)?;

        let mut source = self.0.source();
        while let Some(error) = source {
            write!(f, ": {error}")?;
            source = error.source();
        }
        Ok(())
    }
}

/// One structured logging event.
///
/// Entries are created through one constructor per severity ([`LogEntry::debug`] through
/// [`LogEntry::fatal`]) and enriched in place. Because [`LogEntry::error`] names the constructor,
/// the attached error is read back with [`LogEntry::error_ref`].
#[derive(Clone, Debug)]
pub struct LogEntry {
    severity: Severity,
    message_template: String,
    arguments: Vec<Value>,
    correlation_id: CorrelationId,
    properties: IndexMap<String, Value>,
    error: Option<EntryError>,
}

impl LogEntry {
    /// Creates an entry with a fresh correlation id, no properties and no error.
    ///
    /// `message_template` must not be empty or whitespace; this is a caller contract checked with
    /// a debug assertion. Use [`LogEntry::try_new`] for untrusted templates.
    pub fn new(
        severity: Severity,
        message_template: impl Into<String>,
        arguments: impl IntoIterator<Item = Value>,
    ) -> Self {
        let message_template = message_template.into();
        debug_assert!(
            !message_template.trim().is_empty(),
            "log entry message template must not be blank"
        );

        Self {
            severity,
            message_template,
            arguments: arguments.into_iter().collect(),
            correlation_id: CorrelationId::new(),
            properties: IndexMap::new(),
            error: None,
        }
    }

    /// Like [`LogEntry::new`], but rejects a blank template with [`Error::InvalidArgument`].
    pub fn try_new(
        severity: Severity,
        message_template: impl Into<String>,
        arguments: impl IntoIterator<Item = Value>,
    ) -> Result<Self, Error> {
        let message_template = message_template.into();
        if message_template.trim().is_empty() {
            return Err(Error::InvalidArgument {
                name: "message_template",
                reason: "must not be empty or whitespace".to_owned(),
            });
        }
        Ok(Self::new(severity, message_template, arguments))
    }

    /// Creates a [`Severity::Debug`] entry.
    pub fn debug(
        message_template: impl Into<String>,
        arguments: impl IntoIterator<Item = Value>,
    ) -> Self {
        Self::new(Severity::Debug, message_template, arguments)
    }

    /// Creates a [`Severity::Information`] entry.
    pub fn information(
        message_template: impl Into<String>,
        arguments: impl IntoIterator<Item = Value>,
    ) -> Self {
        Self::new(Severity::Information, message_template, arguments)
    }

    /// Creates a [`Severity::Warning`] entry.
    pub fn warning(
        message_template: impl Into<String>,
        arguments: impl IntoIterator<Item = Value>,
    ) -> Self {
        Self::new(Severity::Warning, message_template, arguments)
    }

    /// Creates a [`Severity::Error`] entry with `error` attached.
    pub fn error(
        message_template: impl Into<String>,
        error: impl Into<EntryError>,
        arguments: impl IntoIterator<Item = Value>,
    ) -> Self {
        let mut entry = Self::new(Severity::Error, message_template, arguments);
        entry.error = Some(error.into());
        entry
    }

    /// Creates a [`Severity::Fatal`] entry with `error` attached.
    pub fn fatal(
        message_template: impl Into<String>,
        error: impl Into<EntryError>,
        arguments: impl IntoIterator<Item = Value>,
    ) -> Self {
        let mut entry = Self::new(Severity::Fatal, message_template, arguments);
        entry.error = Some(error.into());
        entry
    }

    /// Adds a property unless `key` is already present, in which case the existing value is kept.
    pub fn add_property(&mut self, key: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.properties
            .entry(key.into())
            .or_insert_with(|| value.into());
        self
    }

    /// Applies [`add_property`](Self::add_property) to each pair, in iteration order.
    ///
    /// Accepts maps as well as sequences of pairs; the first value seen for a key wins, whether it
    /// was already on the entry or appears earlier in `properties`.
    pub fn add_properties<I, K, V>(&mut self, properties: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        for (key, value) in properties {
            self.add_property(key, value);
        }
        self
    }

    /// Replaces the correlation id, unless `correlation_id` is nil in which case nothing changes.
    pub fn add_correlation_id(&mut self, correlation_id: impl Into<CorrelationId>) -> &mut Self {
        let correlation_id = correlation_id.into();
        if !correlation_id.is_nil() {
            self.correlation_id = correlation_id;
        }
        self
    }

    /// Attaches `error`, replacing any previously attached error.
    pub fn add_error(&mut self, error: impl Into<EntryError>) -> &mut Self {
        self.error = Some(error.into());
        self
    }

    /// The severity of this entry.
    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// The unrendered message template.
    pub fn message_template(&self) -> &str {
        &self.message_template
    }

    /// The arguments bound positionally to the template's placeholders.
    pub fn arguments(&self) -> &[Value] {
        &self.arguments
    }

    /// The correlation id, never nil.
    pub fn correlation_id(&self) -> CorrelationId {
        self.correlation_id
    }

    /// The properties, in insertion order.
    pub fn properties(&self) -> &IndexMap<String, Value> {
        &self.properties
    }

    /// Looks up a single property.
    pub fn property(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }

    /// The attached error, if any.
    pub fn error_ref(&self) -> Option<&EntryError> {
        self.error.as_ref()
    }

    /// Renders the message template with the entry's arguments, see [`template::render`].
    pub fn render_message(&self) -> String {
        template::render(&self.message_template, &self.arguments)
    }
}
