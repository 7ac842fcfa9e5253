//! Diagnostics seam between the parser and wherever messages end up.

/// Receives the parser's trace and warning output.
///
/// Neither call can influence the parse outcome.
pub trait Reporter {
    /// Debug trace of what the parser is doing.
    fn say(&mut self, message: &str);

    /// Recoverable problem at `source` line `line` (1-based).
    fn warn(&mut self, message: &str, source: &str, line: usize);
}

/// Default reporter: forwards everything to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn say(&mut self, message: &str) {
        tracing::debug!("{message}");
    }

    fn warn(&mut self, message: &str, source: &str, line: usize) {
        tracing::warn!(source, line, "{message}");
    }
}

/// One recorded `warn` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Warning {
    pub message: String,
    pub source: String,
    pub line: usize,
}

/// Reporter that keeps warnings in memory, for callers that want to show
/// them after the parse instead of logging them.
#[derive(Debug, Default, Clone)]
pub struct Collector {
    pub traces: Vec<String>,
    pub warnings: Vec<Warning>,
}

impl Collector {
    pub fn new() -> Self {
        Self::default()
    }

    /// True if any warning message contains `needle`.
    pub fn warned(&self, needle: &str) -> bool {
        self.warnings.iter().any(|w| w.message.contains(needle))
    }
}

impl Reporter for Collector {
    fn say(&mut self, message: &str) {
        self.traces.push(message.to_string());
    }

    fn warn(&mut self, message: &str, source: &str, line: usize) {
        self.warnings.push(Warning {
            message: message.to_string(),
            source: source.to_string(),
            line,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collector_records_calls() {
        let mut c = Collector::new();
        c.say("Set topic to random");
        c.warn("Unknown command '?'", "brain.rive", 12);

        assert_eq!(c.traces, vec!["Set topic to random".to_string()]);
        assert_eq!(
            c.warnings,
            vec![Warning {
                message: "Unknown command '?'".into(),
                source: "brain.rive".into(),
                line: 12,
            }]
        );
        assert!(c.warned("Unknown command"));
        assert!(!c.warned("deprecated"));
    }
}
