use std::io::{Stdout, Write};
use std::sync::{Mutex, PoisonError};

use indexmap::IndexMap;
use serde::Serialize;

use super::{LogProvider, ReleaseState};
use crate::{CorrelationId, Error, LogEntry, Severity, Value};

/// Provider that writes one JSON object per line.
///
/// The provider owns its writer: releasing it flushes and drops the writer.
///
/// ```json
/// {"severity":"Information","messageTemplate":"User {Id} logged in","message":"User 42 logged in","arguments":[42],"correlationId":"…","properties":{},"error":null}
/// ```
///
/// # Examples
///
/// ```rust
/// use phyros_logging::{JsonProvider, LogEntry, LogProvider};
///
/// let provider = JsonProvider::new(Vec::new()).with_application("billing");
/// provider.write(&LogEntry::information("Invoice sent", [])).unwrap();
/// provider.release();
/// ```
#[derive(Debug)]
pub struct JsonProvider<W> {
    writer: Mutex<Option<W>>,
    minimum_level: Severity,
    application: Option<String>,
    host: Option<String>,
    state: ReleaseState,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Record<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    application: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    host: Option<&'a str>,
    severity: Severity,
    message_template: &'a str,
    message: String,
    arguments: &'a [Value],
    correlation_id: CorrelationId,
    properties: &'a IndexMap<String, Value>,
    error: Option<String>,
}

impl JsonProvider<Stdout> {
    /// Creates a provider writing to standard output.
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W> JsonProvider<W>
where
    W: Write + Send,
{
    /// Creates a provider writing every entry to `writer`.
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(Some(writer)),
            minimum_level: Severity::Debug,
            application: None,
            host: None,
            state: ReleaseState::default(),
        }
    }

    /// Skips entries below `minimum_level`.
    pub fn with_minimum_level(mut self, minimum_level: Severity) -> Self {
        self.minimum_level = minimum_level;
        self
    }

    /// Adds an `application` field to every record.
    pub fn with_application(mut self, application: impl Into<String>) -> Self {
        self.application = Some(application.into());
        self
    }

    /// Adds a `host` field to every record.
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    fn record<'a>(&'a self, entry: &'a LogEntry) -> Record<'a> {
        Record {
            application: self.application.as_deref(),
            host: self.host.as_deref(),
            severity: entry.severity(),
            message_template: entry.message_template(),
            message: entry.render_message(),
            arguments: entry.arguments(),
            correlation_id: entry.correlation_id(),
            properties: entry.properties(),
            error: entry.error_ref().map(ToString::to_string),
        }
    }
}

impl<W> LogProvider for JsonProvider<W>
where
    W: Write + Send + std::fmt::Debug,
{
    fn write(&self, entry: &LogEntry) -> Result<(), Error> {
        self.state.check("JSON log provider")?;

        if entry.severity() < self.minimum_level {
            return Ok(());
        }

        let mut line = serde_json::to_vec(&self.record(entry))?;
        line.push(b'\n');

        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        // A release racing with this write may have taken the writer already.
        let writer = writer
            .as_mut()
            .ok_or_else(|| Error::disposed("JSON log provider"))?;
        writer.write_all(&line)?;

        Ok(())
    }

    fn release(&self) {
        if !self.state.release() {
            return;
        }

        let writer = self
            .writer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(mut writer) = writer
            && let Err(error) = writer.flush()
        {
            tracing::warn!(%error, "failed to flush JSON log provider on release");
        }
        tracing::trace!("released JSON log provider");
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::{ErrorKind, arguments};

    #[derive(Debug, Clone, Default)]
    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl SharedBuffer {
        fn lines(&self) -> Vec<serde_json::Value> {
            let bytes = self.0.lock().unwrap();
            std::str::from_utf8(&bytes)
                .unwrap()
                .lines()
                .map(|line| serde_json::from_str(line).unwrap())
                .collect()
        }
    }

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[derive(Debug)]
    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::from(std::io::ErrorKind::BrokenPipe))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[derive(thiserror::Error, Debug)]
    #[error("quota exceeded")]
    struct QuotaError;

    #[test]
    fn writes_one_object_per_line() {
        let buffer = SharedBuffer::default();
        let provider = JsonProvider::new(buffer.clone())
            .with_application("billing")
            .with_host("node-1");

        let correlation_id: CorrelationId = "0d4f6a52-3c1b-4a8e-8f57-1b2c3d4e5f60".parse().unwrap();
        let mut entry = LogEntry::warning("User {Id} over quota {Quota}", arguments![42, "gold"]);
        entry
            .add_correlation_id(correlation_id)
            .add_property("region", "eu")
            .add_property("limits", vec![1, 2])
            .add_error(QuotaError);

        provider.write(&entry).unwrap();
        provider.write(&LogEntry::debug("second", [])).unwrap();

        let lines = buffer.lines();
        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[0],
            json!({
                "application": "billing",
                "host": "node-1",
                "severity": "Warning",
                "messageTemplate": "User {Id} over quota {Quota}",
                "message": "User 42 over quota \"gold\"",
                "arguments": [42, "gold"],
                "correlationId": "0d4f6a52-3c1b-4a8e-8f57-1b2c3d4e5f60",
                "properties": { "region": "eu", "limits": [1, 2] },
                "error": "quota exceeded"
            })
        );
        assert_eq!(lines[1]["error"], serde_json::Value::Null);
    }

    #[test]
    fn optional_fields_are_omitted() {
        let buffer = SharedBuffer::default();
        let provider = JsonProvider::new(buffer.clone());

        provider.write(&LogEntry::information("plain", [])).unwrap();

        let line = &buffer.lines()[0];
        assert!(line.get("application").is_none());
        assert!(line.get("host").is_none());
    }

    #[test]
    fn minimum_level_filters() {
        let buffer = SharedBuffer::default();
        let provider = JsonProvider::new(buffer.clone())
            .with_minimum_level(Severity::Error);

        provider.write(&LogEntry::warning("skipped", [])).unwrap();
        provider
            .write(&LogEntry::fatal("kept", QuotaError, []))
            .unwrap();

        let lines = buffer.lines();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0]["severity"], "Fatal");
    }

    #[test]
    fn io_failure_surfaces_as_backend_error() {
        let provider = JsonProvider::new(BrokenPipe);

        let error = provider
            .write(&LogEntry::information("lost", []))
            .unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Backend);
    }

    #[test]
    fn release_drops_writer_and_rejects_writes() {
        let buffer = SharedBuffer::default();
        let provider = JsonProvider::new(buffer.clone());

        provider.release();
        provider.release();

        // Only the test's handle is left once the provider dropped its writer.
        assert_eq!(Arc::strong_count(&buffer.0), 1);
        let error = provider
            .write(&LogEntry::information("late", []))
            .unwrap_err();
        assert_eq!(error.kind(), ErrorKind::InvalidState);
    }
}
