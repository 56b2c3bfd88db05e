// Snapshot history for undo/redo and the event log

use crate::simulator::StackSimulator;
use log::Level;

/// Default number of lines kept in the event log
pub const DEFAULT_EVENT_LIMIT: usize = 1000;

/// Event log for operation messages shown in the log pane.
///
/// Holds at most `limit` lines; the oldest lines are dropped first.
#[derive(Debug, Clone)]
pub struct EventLog {
    pub lines: Vec<LogLine>,
    limit: usize,
}

impl EventLog {
    pub fn new() -> Self {
        Self::with_limit(DEFAULT_EVENT_LIMIT)
    }

    /// Create a log keeping at most `limit` lines. A `limit` of 0 is treated as 1.
    pub fn with_limit(limit: usize) -> Self {
        EventLog {
            lines: Vec::new(),
            limit: limit.max(1),
        }
    }

    /// Append a message, splitting embedded newlines into separate lines
    pub fn record(&mut self, level: Level, text: &str) {
        for line in text.lines() {
            self.lines.push(LogLine {
                level,
                text: line.to_string(),
            });
        }

        if self.lines.len() > self.limit {
            let excess = self.lines.len() - self.limit;
            self.lines.drain(..excess);
        }
    }

    /// Get max line count
    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl Default for EventLog {
    fn default() -> Self {
        Self::new()
    }
}

/// A line of log output with its severity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogLine {
    pub level: Level,
    pub text: String,
}

/// Simulator state after one operation
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub simulator: StackSimulator,
    pub label: String, // Operation that produced this state
}

/// Undo/redo history with a fixed capacity.
///
/// The entry at `position` is the current state. Recording after an undo
/// discards everything after `position`. When the capacity is exceeded the
/// oldest snapshot is dropped.
#[derive(Debug)]
pub struct Timeline {
    snapshots: Vec<Snapshot>,
    position: usize,
    limit: usize,
}

impl Timeline {
    /// Start a timeline from an initial state. A `limit` of 0 is treated as 1.
    pub fn new(initial: StackSimulator, limit: usize) -> Self {
        Timeline {
            snapshots: vec![Snapshot {
                simulator: initial,
                label: "start".to_string(),
            }],
            position: 0,
            limit: limit.max(1),
        }
    }

    /// Record a new current state
    pub fn record(&mut self, simulator: StackSimulator, label: impl Into<String>) {
        self.snapshots.truncate(self.position + 1);
        self.snapshots.push(Snapshot {
            simulator,
            label: label.into(),
        });

        if self.snapshots.len() > self.limit {
            let excess = self.snapshots.len() - self.limit;
            self.snapshots.drain(..excess);
        }
        self.position = self.snapshots.len() - 1;
    }

    /// Step back one snapshot, returning the state to restore
    pub fn undo(&mut self) -> Option<&Snapshot> {
        if self.position == 0 {
            return None;
        }
        self.position -= 1;
        self.snapshots.get(self.position)
    }

    /// Step forward one snapshot, returning the state to restore
    pub fn redo(&mut self) -> Option<&Snapshot> {
        if self.position + 1 >= self.snapshots.len() {
            return None;
        }
        self.position += 1;
        self.snapshots.get(self.position)
    }

    /// The current snapshot
    pub fn current(&self) -> Option<&Snapshot> {
        self.snapshots.get(self.position)
    }

    /// Index of the current snapshot
    pub fn position(&self) -> usize {
        self.position
    }

    /// Get the number of snapshots
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Get max snapshot count
    pub fn limit(&self) -> usize {
        self.limit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::value::SlotValue;

    fn pushed(values: &[i64]) -> StackSimulator {
        let mut sim = StackSimulator::default();
        for &v in values {
            sim.push(4, SlotValue::int(v)).unwrap();
        }
        sim
    }

    #[test]
    fn test_undo_redo() {
        let mut timeline = Timeline::new(StackSimulator::default(), 10);
        timeline.record(pushed(&[1]), "push");
        timeline.record(pushed(&[1, 2]), "push");

        assert_eq!(timeline.undo().map(|s| s.simulator.clone()), Some(pushed(&[1])));
        assert_eq!(
            timeline.undo().map(|s| s.simulator.clone()),
            Some(StackSimulator::default())
        );
        assert!(timeline.undo().is_none());
        assert_eq!(timeline.redo().map(|s| s.simulator.clone()), Some(pushed(&[1])));
    }

    #[test]
    fn test_record_discards_redo_tail() {
        let mut timeline = Timeline::new(StackSimulator::default(), 10);
        timeline.record(pushed(&[1]), "push");
        timeline.record(pushed(&[1, 2]), "push");
        timeline.undo();
        timeline.record(pushed(&[1, 3]), "push");

        assert_eq!(timeline.len(), 3);
        assert!(timeline.redo().is_none());
        assert_eq!(timeline.current().map(|s| s.simulator.clone()), Some(pushed(&[1, 3])));
    }

    #[test]
    fn test_limit_drops_oldest() {
        let mut timeline = Timeline::new(StackSimulator::default(), 2);
        timeline.record(pushed(&[1]), "push 1");
        timeline.record(pushed(&[1, 2]), "push 2");

        assert_eq!(timeline.len(), 2);
        assert_eq!(timeline.position(), 1);
        assert_eq!(timeline.undo().map(|s| s.label.as_str()), Some("push 1"));
        assert!(timeline.undo().is_none());
    }

    #[test]
    fn test_event_log_splits_lines() {
        let mut log = EventLog::new();
        log.record(Level::Info, "one\ntwo");
        log.record(Level::Warn, "three");

        assert_eq!(log.len(), 3);
        assert_eq!(log.lines[2].level, Level::Warn);
    }

    #[test]
    fn test_event_log_drops_oldest_lines() {
        let mut log = EventLog::with_limit(3);
        for n in 0..5 {
            log.record(Level::Info, &format!("line {}", n));
        }
        log.record(Level::Warn, "a\nb");

        let texts: Vec<&str> = log.lines.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, vec!["line 4", "a", "b"]);
        assert_eq!(log.limit(), 3);
    }
}
