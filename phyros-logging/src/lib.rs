//! # `phyros-logging`
//!
//! A structured logging abstraction that decouples application code from the backend that
//! finally writes the logs.
//!
//! Applications build [`LogEntry`] values, enrich them with properties, a correlation id and an
//! optional error, and hand them to a [`LogWriter`]. The writer forwards every entry to exactly
//! one [`LogProvider`], the only seam a backend has to implement.
//!
//! ## Features
//!
//! - **Structured entries**: message templates with positional arguments plus an ordered,
//!   first-write-wins property set
//! - **Correlation**: every entry carries a non-nil [`CorrelationId`]
//! - **Provider selection**: [`LoggerBuilder`] picks a provider instance or a lazy factory, last
//!   call wins
//! - **Single pipeline**: [`register`] wires one process-wide writer, even under concurrent first use
//! - **Built-in providers**: console, JSON lines and in-memory
//!
//! ## Basic Usage
//!
//! Register the pipeline once during startup:
//!
//! ```rust
//! use phyros_logging::{ConsoleOptions, ConsoleProvider};
//!
//! # fn main() -> Result<(), phyros_logging::Error> {
//! let writer = phyros_logging::register(|builder| {
//!     builder.use_provider(ConsoleProvider::new(ConsoleOptions::default()));
//! })?;
//! # Ok(())
//! # }
//! ```
//!
//! Then create, enrich and write entries:
//!
//! ```rust
//! use phyros_logging::{CorrelationId, LogEntry, arguments, properties};
//!
//! # fn main() -> Result<(), phyros_logging::Error> {
//! # let writer = phyros_logging::register_provider(phyros_logging::MemoryProvider::new().0)?;
//! let request = CorrelationId::new();
//!
//! writer.log(
//!     LogEntry::information("Fetched {Count} rows from {Table}", arguments![12, "orders"])
//!         .add_properties(properties!(shard = 3, "db.system" = "postgres"))
//!         .add_correlation_id(request),
//! )?;
//!
//! writer.shutdown();
//! # Ok(())
//! # }
//! ```
//!
//! ## Merge Rules
//!
//! Properties keep the **first** value written for a key, while [`LogEntry::add_error`] always
//! keeps the **last** error. A nil correlation id is never stored.

#![forbid(unsafe_code)]
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

mod config;
mod entry;
mod error;
mod id;
mod macros;
pub mod pipeline;
pub mod provider;
mod severity;
pub mod template;
mod value;

pub use config::{LogFormat, LoggingConfig};
pub use entry::{EntryError, LogEntry};
pub use error::{Error, ErrorKind};
pub use id::CorrelationId;
pub use pipeline::{
    LogWriter, LoggerBuilder, global, register, register_provider, register_provider_factory,
};
pub use provider::{
    ConsoleOptions, ConsoleProvider, ConsoleStream, JsonProvider, LogProvider, MemoryHandle,
    MemoryProvider,
};
pub use severity::{ParseSeverityError, Severity};
pub use value::Value;
