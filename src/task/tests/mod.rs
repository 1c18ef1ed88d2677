//! Unit tests for the task module.

use chrono::{DateTime, Duration, Local, TimeZone, Utc};
use mockable::Clock;
use std::sync::Mutex;

mod memory_repository_tests;

/// Clock that starts at a fixed instant and advances one second per read.
///
/// Successive creations therefore get strictly increasing timestamps.
#[derive(Debug)]
pub(super) struct SteppingClock {
    next: Mutex<DateTime<Utc>>,
}

impl SteppingClock {
    pub(super) fn starting_at(start: DateTime<Utc>) -> Self {
        Self {
            next: Mutex::new(start),
        }
    }
}

impl Default for SteppingClock {
    fn default() -> Self {
        Self::starting_at(fixed_instant())
    }
}

impl Clock for SteppingClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        let mut next = self.next.lock().expect("clock lock poisoned");
        let now = *next;
        *next = now + Duration::seconds(1);
        now
    }
}

/// 2026-01-15T10:00:00Z.
pub(super) fn fixed_instant() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0)
        .single()
        .expect("valid fixed instant")
}
