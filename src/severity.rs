//! Threshold filtering over per-event severity.

use crate::event::{SeverityLevel, ValidationEvent};

/// Drops events whose mapped severity is below `threshold`. An event with
/// an empty `severity` string maps to `Info` and passes whenever
/// `threshold <= Info`.
pub fn filter_by_severity(events: Vec<ValidationEvent>, threshold: SeverityLevel) -> Vec<ValidationEvent> {
    events
        .into_iter()
        .filter(|e| SeverityLevel::from_str_lenient(&e.severity) >= threshold)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::ValidationEventType;

    fn event_with_severity(sev: &str) -> ValidationEvent {
        let mut e = ValidationEvent::new("tool", ValidationEventType::Unknown);
        e.severity = sev.to_string();
        e
    }

    #[test]
    fn drops_below_threshold() {
        let events = vec![
            event_with_severity("debug"),
            event_with_severity("warning"),
            event_with_severity("error"),
        ];
        let filtered = filter_by_severity(events, SeverityLevel::Warning);
        assert_eq!(filtered.len(), 2);
    }

    #[test]
    fn empty_severity_passes_at_default_threshold() {
        let events = vec![event_with_severity("")];
        let filtered = filter_by_severity(events, SeverityLevel::Debug);
        assert_eq!(filtered.len(), 1);
    }

    #[test]
    fn empty_severity_dropped_above_info() {
        let events = vec![event_with_severity("")];
        let filtered = filter_by_severity(events, SeverityLevel::Warning);
        assert_eq!(filtered.len(), 0);
    }
}
