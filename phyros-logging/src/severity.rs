//! Log entry severity levels.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Log entry severity levels.
///
/// These levels follow standard logging conventions, ordered from most verbose to most critical.
/// The ordering is meaningful: providers use it for minimum-level filtering.
///
/// Deserializing goes through [`FromStr`], so configuration files accept the same names as the
/// command line.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum Severity {
    /// The "debug" level.
    ///
    /// Designates a verbose event, useful during development.
    Debug = 0,

    /// The "information" level.
    ///
    /// Designates a significant, successful operation.
    Information = 1,

    /// The "warning" level.
    ///
    /// Designates a problem that is not immediately significant, but that may signify conditions
    /// that could cause future problems.
    Warning = 2,

    /// The "error" level.
    ///
    /// Designates a significant problem, usually a loss of functionality or data.
    Error = 3,

    /// The "fatal" level.
    ///
    /// Designates a fatal error or application crash.
    Fatal = 4,
}

impl Severity {
    /// All severities, from least to most severe.
    pub const ALL: [Severity; 5] = [
        Severity::Debug,
        Severity::Information,
        Severity::Warning,
        Severity::Error,
        Severity::Fatal,
    ];

    /// Returns the variant name, e.g. `"Information"`.
    pub const fn as_str(self) -> &'static str {
        match self {
            Severity::Debug => "Debug",
            Severity::Information => "Information",
            Severity::Warning => "Warning",
            Severity::Error => "Error",
            Severity::Fatal => "Fatal",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // `pad` so callers can align severities with width specifiers.
        f.pad(self.as_str())
    }
}

/// The error returned when parsing an unknown severity name.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown severity `{0}`, expected one of debug, information, warning, error, fatal")]
pub struct ParseSeverityError(String);

impl FromStr for Severity {
    type Err = ParseSeverityError;

    fn from_str(string: &str) -> Result<Self, Self::Err> {
        match string.trim().to_ascii_lowercase().as_str() {
            "debug" => Ok(Severity::Debug),
            "information" | "info" => Ok(Severity::Information),
            "warning" | "warn" => Ok(Severity::Warning),
            "error" => Ok(Severity::Error),
            "fatal" => Ok(Severity::Fatal),
            _ => Err(ParseSeverityError(string.to_owned())),
        }
    }
}

impl TryFrom<String> for Severity {
    type Error = ParseSeverityError;

    fn try_from(string: String) -> Result<Self, <Severity as TryFrom<String>>::Error> {
        string.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn ordering_follows_discriminants() {
        for pair in Severity::ALL.windows(2) {
            assert!(pair[0] < pair[1]);
        }
        assert_eq!(Severity::Debug as u8, 0);
        assert_eq!(Severity::Fatal as u8, 4);
    }

    #[test_case("debug", Severity::Debug)]
    #[test_case("Information", Severity::Information)]
    #[test_case("info", Severity::Information)]
    #[test_case("WARN", Severity::Warning)]
    #[test_case(" error ", Severity::Error)]
    #[test_case("fatal", Severity::Fatal)]
    fn parses_names(input: &str, expected: Severity) {
        assert_eq!(input.parse::<Severity>(), Ok(expected));
    }

    #[test]
    fn rejects_unknown_names() {
        assert!("verbose".parse::<Severity>().is_err());
    }

    #[test_case(r#""Warning""#, Severity::Warning)]
    #[test_case(r#""WARNING""#, Severity::Warning)]
    #[test_case(r#""Info""#, Severity::Information)]
    #[test_case(r#"" debug ""#, Severity::Debug)]
    fn deserializes_like_from_str(json: &str, expected: Severity) {
        assert_eq!(serde_json::from_str::<Severity>(json).unwrap(), expected);
    }

    #[test]
    fn deserialize_rejects_unknown_names() {
        let result = serde_json::from_str::<Severity>(r#""verbose""#);
        let message = result.unwrap_err().to_string();
        assert!(message.contains("unknown severity `verbose`"));
    }

    #[test]
    fn serializes_variant_name() {
        assert_eq!(
            serde_json::to_string(&Severity::Information).unwrap(),
            r#""Information""#
        );
    }

    #[test]
    fn display_pads() {
        assert_eq!(format!("[{:>7}]", Severity::Error), "[  Error]");
    }
}
