//! Internal test crate, see `tests/checks.rs`.

#![forbid(unsafe_code)]
