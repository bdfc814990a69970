//! # `phyros-logging-tracing`
//!
//! A [`LogProvider`](phyros_logging::LogProvider) that writes entries as events into a
//! [`tracing`] dispatcher, so applications logging through `phyros-logging` can reuse any
//! `tracing` subscriber as their backend.
//!
//! ```rust
//! use phyros_logging::{LogEntry, LoggerBuilder, LogWriter};
//! use phyros_logging_tracing::TracingBuilderExt;
//!
//! # fn main() -> Result<(), phyros_logging::Error> {
//! let dispatch = tracing::Dispatch::new(tracing::subscriber::NoSubscriber::new());
//!
//! let mut builder = LoggerBuilder::new();
//! builder.use_tracing(dispatch, true);
//! let writer = LogWriter::from_boxed(builder.build()?);
//!
//! writer.log(&LogEntry::information("Hello from {Backend}", [phyros_logging::Value::from("tracing")]))?;
//! writer.shutdown();
//! # Ok(())
//! # }
//! ```
//!
//! ## Event Layout
//!
//! Every entry becomes one event with target `phyros_logging` and the fields:
//!
//! - `message`: the rendered message
//! - `message_template`: the unrendered template
//! - `severity`: the entry's severity name; `Fatal` has no `tracing` level and maps to `ERROR`
//! - `correlation_id`: the hyphenated correlation id
//! - `properties`: the properties as a JSON object, collection values encoded as JSON strings
//! - `error`: the attached error, only present if there is one

#![forbid(unsafe_code)]
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

mod builder;
mod provider;

pub use builder::TracingBuilderExt;
pub use provider::TracingProvider;
