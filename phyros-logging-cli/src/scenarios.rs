//! Sample entries written by the demo.

use phyros_logging::{CorrelationId, Error, LogEntry, LogWriter, arguments, properties};

#[derive(thiserror::Error, Debug)]
#[error("upstream returned {status}")]
struct UpstreamError {
    status: u16,
}

#[derive(thiserror::Error, Debug)]
#[error("checkout aborted")]
struct CheckoutError(#[source] UpstreamError);

/// Writes plain, structured, correlated and failing entries through `writer`.
pub fn run(writer: &LogWriter) -> Result<(), Error> {
    writer.log(&LogEntry::information("This is an information message", []))?;
    writer.log(&LogEntry::warning("This is a warning message", []))?;
    writer.log(&LogEntry::debug(
        "Only shown with a debug minimum level",
        [],
    ))?;

    writer.log(&LogEntry::information(
        "Testing structured logging with {Count} items",
        arguments![42],
    ))?;
    writer.log(
        LogEntry::information("Order {OrderId} placed by {Customer}", arguments![1017, "c-42"])
            .add_properties(properties!(items = 3, express = true, tags = vec!["gift", "fragile"])),
    )?;

    let correlation_id = CorrelationId::new();
    writer.log(
        LogEntry::information("Message with explicit correlation ID", [])
            .add_correlation_id(correlation_id),
    )?;
    writer.log(
        LogEntry::information("Follow-up message with same correlation ID", [])
            .add_correlation_id(correlation_id),
    )?;

    writer.log(
        LogEntry::error(
            "Checkout for cart {CartId} failed",
            CheckoutError(UpstreamError { status: 503 }),
            arguments![7],
        )
        .add_correlation_id(correlation_id),
    )?;
    writer.log(&LogEntry::fatal(
        "Payment gateway unreachable, giving up",
        UpstreamError { status: 504 },
        [],
    ))?;

    Ok(())
}
