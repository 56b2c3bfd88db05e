//! `log` backend that feeds the event log pane
//!
//! Writing to stderr while the alternate screen is active would corrupt the
//! display, so records are captured into a shared [`EventLog`] instead.

use crate::snapshot::EventLog;
use log::{LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::sync::{Arc, Mutex};

/// Captures records from this crate into an [`EventLog`]
pub struct CaptureLogger {
    events: Arc<Mutex<EventLog>>,
    level: LevelFilter,
}

impl CaptureLogger {
    pub fn new(events: Arc<Mutex<EventLog>>, level: LevelFilter) -> Self {
        CaptureLogger { events, level }
    }

    /// Register as the global logger
    pub fn install(self) -> Result<(), SetLoggerError> {
        log::set_max_level(self.level);
        log::set_boxed_logger(Box::new(self))
    }
}

impl Log for CaptureLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level && metadata.target().starts_with(env!("CARGO_CRATE_NAME"))
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        // Keep logging after a poisoned lock
        let mut events = match self.events.lock() {
            Ok(events) => events,
            Err(poisoned) => poisoned.into_inner(),
        };
        events.record(record.level(), &record.args().to_string());
    }

    fn flush(&self) {}
}
