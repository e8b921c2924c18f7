use chrono::{DateTime, Duration, Local};

/// The span during which usernames are accepted. `end >= start` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegistrationWindow {
    start: DateTime<Local>,
    end: DateTime<Local>,
}

impl RegistrationWindow {
    /// A full-length window opening at `now`.
    pub fn fresh(now: DateTime<Local>, duration: Duration) -> Self {
        Self {
            start: now,
            end: now + duration,
        }
    }

    /// A window resumed from a persisted deadline.
    ///
    /// A deadline already in the past yields an expired window starting at
    /// that deadline.
    pub fn recovered(now: DateTime<Local>, deadline: DateTime<Local>) -> Self {
        Self {
            start: now.min(deadline),
            end: deadline,
        }
    }

    pub fn start(&self) -> DateTime<Local> {
        self.start
    }

    pub fn end(&self) -> DateTime<Local> {
        self.end
    }

    pub fn is_open(&self, now: DateTime<Local>) -> bool {
        now < self.end
    }

    pub fn remaining(&self, now: DateTime<Local>) -> Duration {
        (self.end - now).max(Duration::zero())
    }

    /// Push the deadline back by `by`, counted from the current deadline.
    pub fn extend(&mut self, by: Duration) {
        self.end += by;
    }
}

/// `M minutes S seconds`, both floored.
pub fn format_remaining(remaining: Duration) -> String {
    let secs = remaining.num_seconds().max(0);
    format!("{} minutes {} seconds", secs / 60, secs % 60)
}
