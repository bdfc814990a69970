#![expect(missing_docs, reason = "tests")]

use std::io::Write;
use std::sync::{Arc, Mutex};

use phyros_logging::{
    CorrelationId, EntryError, ErrorKind, JsonProvider, LogEntry, LogWriter, LoggerBuilder,
    MemoryProvider, Severity, Value, arguments, properties,
};
use pretty_assertions::assert_eq;
use test_case::test_case;

#[derive(thiserror::Error, Debug)]
#[error("payment declined: {reason}")]
struct PaymentError {
    reason: &'static str,
}

#[derive(Debug, Clone, Default)]
struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

fn memory_writer() -> (LogWriter, phyros_logging::MemoryHandle) {
    let (provider, entries) = MemoryProvider::new();
    let mut builder = LoggerBuilder::new();
    builder.use_provider(provider);
    (LogWriter::from_boxed(builder.build().unwrap()), entries)
}

#[test]
fn enriched_entry_reaches_provider_unchanged() {
    let (writer, entries) = memory_writer();
    let correlation_id = CorrelationId::new();
    let error = EntryError::new(PaymentError { reason: "expired card" });

    writer
        .log(
            LogEntry::error("Charge {ChargeId} failed", error.clone(), arguments!["ch_1"])
                .add_properties(properties!(amount = 1999, currency = "EUR"))
                .add_property("amount", 0)
                .add_correlation_id(correlation_id),
        )
        .unwrap();

    let [entry] = entries.snapshot().try_into().unwrap();
    assert_eq!(entry.severity(), Severity::Error);
    assert_eq!(entry.render_message(), r#"Charge "ch_1" failed"#);
    assert_eq!(entry.correlation_id(), correlation_id);
    assert_eq!(entry.property("amount"), Some(&Value::from(1999)));
    assert!(entry.error_ref().unwrap().same_as(&error));
    assert_eq!(
        entry.error_ref().unwrap().to_string(),
        "payment declined: expired card"
    );
}

#[test_case(Severity::Debug)]
#[test_case(Severity::Information)]
#[test_case(Severity::Warning)]
#[test_case(Severity::Error)]
#[test_case(Severity::Fatal)]
fn every_severity_is_forwarded(severity: Severity) {
    let (writer, entries) = memory_writer();

    writer.log(&LogEntry::new(severity, "event", [])).unwrap();

    assert_eq!(entries.snapshot()[0].severity(), severity);
}

#[test]
fn correlated_entries_share_an_id() {
    let (writer, entries) = memory_writer();
    let operation = CorrelationId::new();

    for step in ["validate", "reserve", "commit"] {
        let mut entry = LogEntry::debug("Step {Step}", arguments![step]);
        writer.log(entry.add_correlation_id(operation)).unwrap();
    }
    let mut unrelated = LogEntry::debug("unrelated", []);
    writer
        .log(unrelated.add_correlation_id(CorrelationId::NIL))
        .unwrap();

    let ids: Vec<_> = entries
        .snapshot()
        .iter()
        .map(LogEntry::correlation_id)
        .collect();
    assert_eq!(&ids[..3], [operation; 3]);
    assert_ne!(ids[3], operation);
    assert!(!ids[3].is_nil());
}

#[test]
fn json_pipeline_writes_lines() {
    let buffer = SharedBuffer::default();
    let mut builder = LoggerBuilder::new();
    builder.use_provider_factory({
        let buffer = buffer.clone();
        move || Ok(JsonProvider::new(buffer).with_application("checkout"))
    });
    let writer = LogWriter::from_boxed(builder.build().unwrap());

    let mut cart = LogEntry::information("Cart {CartId} created", arguments![7]);
    writer.log(cart.add_property("items", 2)).unwrap();
    writer.shutdown();

    let output = String::from_utf8(buffer.0.lock().unwrap().clone()).unwrap();
    let record: serde_json::Value = serde_json::from_str(output.trim_end()).unwrap();
    assert_eq!(record["application"], "checkout");
    assert_eq!(record["message"], "Cart 7 created");
    assert_eq!(record["properties"]["items"], 2);

    let error = writer.log(&LogEntry::information("late", [])).unwrap_err();
    assert_eq!(error.kind(), ErrorKind::InvalidState);
}

#[test]
fn writer_is_shared_across_threads() {
    let (writer, entries) = memory_writer();
    let writer = Arc::new(writer);

    let handles: Vec<_> = (0..8)
        .map(|thread| {
            let writer = writer.clone();
            std::thread::spawn(move || {
                for index in 0..25 {
                    writer
                        .log(&LogEntry::information(
                            "thread {Thread} entry {Index}",
                            arguments![thread, index],
                        ))
                        .unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(entries.len(), 200);
}
