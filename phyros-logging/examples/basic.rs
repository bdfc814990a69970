#![expect(missing_docs, reason = "example")]

use phyros_logging::{
    ConsoleOptions, ConsoleProvider, CorrelationId, LogEntry, Severity, arguments, properties,
};

#[derive(thiserror::Error, Debug)]
#[error("inventory service timed out")]
struct InventoryTimeout;

fn main() -> Result<(), phyros_logging::Error> {
    let writer = phyros_logging::register(|builder| {
        builder.use_provider(ConsoleProvider::new(ConsoleOptions {
            minimum_level: Severity::Debug,
            ..ConsoleOptions::default()
        }));
    })?;

    let order = CorrelationId::new();

    writer.log(
        LogEntry::information("Order {OrderId} received", arguments![1017])
            .add_properties(properties!(customer = "c-42", items = 3))
            .add_correlation_id(order),
    )?;
    writer.log(
        LogEntry::debug("Reserving stock", [])
            .add_correlation_id(order),
    )?;
    writer.log(
        LogEntry::error("Reservation for {OrderId} failed", InventoryTimeout, arguments![1017])
            .add_correlation_id(order),
    )?;

    writer.shutdown();
    Ok(())
}
