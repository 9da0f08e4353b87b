//! Advisory events raised while cleaning data and building prompts.
//!
//! The core never logs on its own. Callers pass a [`DiagnosticSink`] and
//! decide what to do with the events: collect them, forward them to a
//! logger, or drop them.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A non-fatal event worth surfacing to the user or a log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// A text field was cut down to the sanitizer's length bound.
    Truncated { original_len: usize, max_len: usize },
    /// Rows were removed from the historical dataset during cleaning.
    RowsDropped { dropped: usize, total: usize },
    /// The historical dataset was rejected as a whole.
    ValidationFailed { reason: String },
    /// The prompt was built without historical examples.
    ExamplesUnavailable { reason: String },
}

impl Diagnostic {
    /// Whether this event should be shown as a warning rather than info.
    pub fn is_warning(&self) -> bool {
        !matches!(self, Diagnostic::RowsDropped { .. })
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::Truncated {
                original_len,
                max_len,
            } => write!(
                f,
                "text truncated from {} to {} characters",
                original_len, max_len
            ),
            Diagnostic::RowsDropped { dropped, total } => {
                write!(f, "dropped {} of {} rows with missing or invalid values", dropped, total)
            }
            Diagnostic::ValidationFailed { reason } => {
                write!(f, "historical data validation failed: {}", reason)
            }
            Diagnostic::ExamplesUnavailable { reason } => {
                write!(f, "no historical examples available: {}", reason)
            }
        }
    }
}

/// Receiver for advisory events.
pub trait DiagnosticSink {
    /// Record one event.
    fn record(&mut self, diagnostic: Diagnostic);
}

/// Sink that collects events in memory.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    events: Vec<Diagnostic>,
}

impl Diagnostics {
    /// Create an empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded events, oldest first.
    pub fn events(&self) -> &[Diagnostic] {
        &self.events
    }

    /// Whether nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Consume the collector and return its events.
    pub fn into_events(self) -> Vec<Diagnostic> {
        self.events
    }
}

impl DiagnosticSink for Diagnostics {
    fn record(&mut self, diagnostic: Diagnostic) {
        self.events.push(diagnostic);
    }
}

/// Sink that discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn record(&mut self, _diagnostic: Diagnostic) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collector_keeps_order() {
        let mut sink = Diagnostics::new();
        sink.record(Diagnostic::RowsDropped {
            dropped: 1,
            total: 3,
        });
        sink.record(Diagnostic::Truncated {
            original_len: 10,
            max_len: 5,
        });

        assert_eq!(sink.events().len(), 2);
        assert!(matches!(sink.events()[0], Diagnostic::RowsDropped { .. }));
        assert!(!sink.events()[0].is_warning());
        assert!(sink.events()[1].is_warning());
    }

    #[test]
    fn test_display() {
        let d = Diagnostic::Truncated {
            original_len: 5000,
            max_len: 4000,
        };
        assert_eq!(d.to_string(), "text truncated from 5000 to 4000 characters");
    }

    #[test]
    fn test_serializes_with_kind_tag() {
        let d = Diagnostic::ExamplesUnavailable {
            reason: "empty".to_string(),
        };
        let json = serde_json::to_value(&d).unwrap();
        assert_eq!(json["kind"], "examples_unavailable");
    }
}
