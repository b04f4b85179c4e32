use chrono::{DateTime, Local, NaiveDate, Utc};

use crate::State;

/// Clock state.
///
/// The UI refreshes it from the wall clock once per frame; tests move it by hand
/// so that "today" is deterministic.
#[derive(Debug, Clone, Copy)]
pub struct Time {
    virt: DateTime<Utc>,
}

impl Default for Time {
    fn default() -> Self {
        Self { virt: Utc::now() }
    }
}

impl Time {
    pub fn at(time: DateTime<Utc>) -> Self {
        Self { virt: time }
    }

    /// Sync the clock with the wall clock.
    pub fn sync_now(&mut self) {
        self.virt = Utc::now();
    }

    /// Calendar date in the local timezone, used for due-date badges.
    pub fn today(&self) -> NaiveDate {
        self.virt.with_timezone(&Local).date_naive()
    }
}

impl State for Time {}

impl AsMut<DateTime<Utc>> for Time {
    fn as_mut(&mut self) -> &mut DateTime<Utc> {
        &mut self.virt
    }
}

impl AsRef<DateTime<Utc>> for Time {
    fn as_ref(&self) -> &DateTime<Utc> {
        &self.virt
    }
}
