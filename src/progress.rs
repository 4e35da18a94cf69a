// src/progress.rs
use chrono::NaiveDate;

/// Lightweight progress reporting used by long-running operations (fetch/export).
/// Frontends implement this to surface status to users.
pub trait Progress {
    /// Called at the start with the total number of archive days.
    fn begin(&mut self, _total: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// Called when one archive day was fetched and parsed.
    fn item_done(&mut self, _day: NaiveDate, _matchdays: usize) {}

    /// Called when one archive day was skipped.
    fn item_failed(&mut self, _day: NaiveDate, _reason: &str) {}

    /// Called at the end, successful or not.
    fn finish(&mut self) {}
}

/// Counts what happened; handy for tests and summaries.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Tally {
    pub total: usize,
    pub done: usize,
    pub failed: usize,
    pub finished: bool,
}

impl Progress for Tally {
    fn begin(&mut self, total: usize) { self.total = total; }
    fn item_done(&mut self, _day: NaiveDate, _matchdays: usize) { self.done += 1; }
    fn item_failed(&mut self, _day: NaiveDate, _reason: &str) { self.failed += 1; }
    fn finish(&mut self) { self.finished = true; }
}
