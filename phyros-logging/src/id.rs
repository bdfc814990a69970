//! Correlation identifiers.
//!
//! A [`CorrelationId`] groups related log entries across a logical operation. Every entry is
//! created with a fresh random id so that it is always traceable, and callers overwrite it with a
//! shared id when several entries belong to the same operation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A 128-bit identifier grouping related log entries.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CorrelationId(Uuid);

impl CorrelationId {
    /// The nil (all-zero) id.
    ///
    /// Entries never carry this value; it is only useful as an explicit "no correlation" marker on
    /// the caller side.
    pub const NIL: Self = Self(Uuid::nil());

    /// Generates a new random id, which is never [`NIL`](Self::NIL).
    pub fn new() -> Self {
        // A v4 UUID always has its version bits set, so it can't be nil.
        Self(Uuid::new_v4())
    }

    /// Wraps an existing UUID.
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the underlying UUID.
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    /// Returns `true` if this is the nil id.
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }
}

impl Default for CorrelationId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for CorrelationId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl fmt::Display for CorrelationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0.hyphenated(), f)
    }
}

impl FromStr for CorrelationId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn generated_ids_are_never_nil() {
        for _ in 0..1000 {
            assert!(!CorrelationId::new().is_nil());
        }
    }

    #[test]
    fn generated_ids_are_unique() {
        let ids: HashSet<_> = std::iter::repeat_with(CorrelationId::new)
            .take(1000)
            .collect();
        assert_eq!(ids.len(), 1000);
    }

    #[test]
    fn display_round_trips_through_from_str() {
        let id = CorrelationId::new();
        assert_eq!(id.to_string().parse::<CorrelationId>().unwrap(), id);
    }

    #[test]
    fn nil_is_nil() {
        assert!(CorrelationId::NIL.is_nil());
        assert_eq!(
            CorrelationId::NIL.to_string(),
            "00000000-0000-0000-0000-000000000000"
        );
    }
}
