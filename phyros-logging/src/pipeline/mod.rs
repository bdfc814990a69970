//! Provider selection, the writer façade and process-wide registration.
//!
//! A [`LoggerBuilder`] selects exactly one provider, a [`LogWriter`] wraps it and forwards
//! entries, and [`register`] wires a single writer for the whole process.

mod builder;
mod global;
mod writer;

pub use builder::LoggerBuilder;
pub use global::{global, register, register_provider, register_provider_factory};
pub use writer::LogWriter;
