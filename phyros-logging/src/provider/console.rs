use std::fmt::Write as _;
use std::io::Write;

use chrono::{DateTime, Local};
use colored::{Color, Colorize};

use super::{LogProvider, ReleaseState};
use crate::{Error, LogEntry, Severity, Value};

/// The standard stream a [`ConsoleProvider`] writes to.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum ConsoleStream {
    /// Standard output.
    #[default]
    Stdout,
    /// Standard error.
    Stderr,
}

/// Options for a [`ConsoleProvider`].
#[derive(Clone, Debug, PartialEq)]
pub struct ConsoleOptions {
    /// Entries below this severity are skipped.
    pub minimum_level: Severity,
    /// Prefix each line with the local time.
    pub timestamps: bool,
    /// Colour each line by severity.
    pub color: bool,
    /// Where lines are written.
    pub stream: ConsoleStream,
}

impl Default for ConsoleOptions {
    fn default() -> Self {
        Self {
            minimum_level: Severity::Information,
            timestamps: true,
            color: true,
            stream: ConsoleStream::Stdout,
        }
    }
}

/// Provider that prints one human-readable line per entry.
///
/// ```text
/// [2025-01-31 14:03:12.512] [Warning] [5b2c...] Disk at 91% | Properties: {mount=/var}
/// ```
///
/// <div class="warning">
/// The line format is meant for people, not for parsing; use a
/// [`JsonProvider`](super::JsonProvider) when the output is consumed by tools.
/// </div>
///
/// # Examples
///
/// ```rust
/// use phyros_logging::{ConsoleOptions, ConsoleProvider, LogEntry, LogProvider, Severity};
///
/// let provider = ConsoleProvider::new(ConsoleOptions {
///     minimum_level: Severity::Debug,
///     ..ConsoleOptions::default()
/// });
/// provider.write(&LogEntry::debug("Cache warmed", [])).unwrap();
/// ```
#[derive(Debug, Default)]
pub struct ConsoleProvider {
    options: ConsoleOptions,
    state: ReleaseState,
}

impl ConsoleProvider {
    /// Creates a console provider with the given options.
    pub fn new(options: ConsoleOptions) -> Self {
        Self {
            options,
            state: ReleaseState::default(),
        }
    }

    /// The options this provider was created with.
    pub fn options(&self) -> &ConsoleOptions {
        &self.options
    }

    fn format_line(&self, entry: &LogEntry, now: DateTime<Local>) -> String {
        let mut line = String::new();

        // `fmt::Write` for `String` never fails.
        if self.options.timestamps {
            let _ = write!(line, "[{}] ", now.format("%Y-%m-%d %H:%M:%S%.3f"));
        }
        let _ = write!(
            line,
            "[{}] [{}] {}",
            entry.severity(),
            entry.correlation_id(),
            entry.render_message()
        );

        if let Some(error) = entry.error_ref() {
            let _ = write!(line, " | Error: {error}");
        }

        if !entry.properties().is_empty() {
            line.push_str(" | Properties: {");
            for (index, (key, value)) in entry.properties().iter().enumerate() {
                if index > 0 {
                    line.push_str(", ");
                }
                let _ = write!(line, "{key}=");
                format_property(&mut line, value);
            }
            line.push('}');
        }

        line
    }

    /// Writes `entry` to `out` as a single `write_all` call, or nothing if it is filtered out.
    fn write_line(&self, out: &mut impl Write, entry: &LogEntry) -> Result<(), Error> {
        if entry.severity() < self.options.minimum_level {
            return Ok(());
        }

        let mut line = self.format_line(entry, Local::now());
        if self.options.color {
            line = line.color(severity_color(entry.severity())).to_string();
        }
        line.push('\n');

        out.write_all(line.as_bytes())?;
        Ok(())
    }
}

fn format_property(output: &mut String, value: &Value) {
    match value {
        Value::String(value) => output.push_str(value),
        Value::List(_) => output.push_str("[List]"),
        Value::Map(_) => output.push_str("[Map]"),
        scalar => {
            let _ = write!(output, "{scalar}");
        }
    }
}

fn severity_color(severity: Severity) -> Color {
    match severity {
        Severity::Debug => Color::BrightBlack,
        Severity::Information => Color::White,
        Severity::Warning => Color::Yellow,
        Severity::Error => Color::BrightRed,
        Severity::Fatal => Color::Red,
    }
}

impl LogProvider for ConsoleProvider {
    fn write(&self, entry: &LogEntry) -> Result<(), Error> {
        self.state.check("console log provider")?;

        // The stream lock is held for the whole line, so concurrent lines never interleave.
        match self.options.stream {
            ConsoleStream::Stdout => self.write_line(&mut std::io::stdout().lock(), entry),
            ConsoleStream::Stderr => self.write_line(&mut std::io::stderr().lock(), entry),
        }
    }

    fn release(&self) {
        if self.state.release() {
            tracing::trace!("released console log provider");
        }
    }
}
