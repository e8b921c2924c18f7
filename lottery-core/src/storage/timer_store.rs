use super::write_error;
use crate::error::{LotteryError, Result};
use chrono::{DateTime, Local, NaiveDateTime};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Single-line file holding the current registration deadline.
#[derive(Debug, Clone)]
pub struct TimerStore {
    path: PathBuf,
}

impl TimerStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The persisted deadline, or `None` when the file is absent or unreadable.
    pub fn load(&self) -> Result<Option<DateTime<Local>>> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            // non-UTF-8 contents are corrupt state, not a failure
            Err(e) if e.kind() == ErrorKind::InvalidData => {
                tracing::debug!("Discarding unreadable timer state in {}", self.path.display());
                return Ok(None);
            }
            Err(e) => {
                return Err(LotteryError::storage(format!(
                    "Failed to read {}: {}",
                    self.path.display(),
                    e
                )))
            }
        };

        let deadline = parse_deadline(contents.trim());
        if deadline.is_none() {
            tracing::debug!(
                "Discarding malformed timer state {:?} in {}",
                contents.trim(),
                self.path.display()
            );
        }
        Ok(deadline)
    }

    pub fn save(&self, deadline: DateTime<Local>) -> Result<()> {
        std::fs::write(&self.path, deadline.to_rfc3339()).map_err(|e| write_error(&self.path, e))
    }

    /// Remove the timer file. Removing an absent file is not an error.
    pub fn clear(&self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(LotteryError::storage(format!(
                "Failed to remove {}: {}",
                self.path.display(),
                e
            ))),
        }
    }
}

/// Parse an ISO-8601 deadline.
///
/// RFC 3339 timestamps carry their own offset; naive timestamps such as
/// `2025-03-01T18:30:00.250000` are read as local time.
pub fn parse_deadline(raw: &str) -> Option<DateTime<Local>> {
    if let Ok(deadline) = DateTime::parse_from_rfc3339(raw) {
        return Some(deadline.with_timezone(&Local));
    }

    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .and_then(|naive| naive.and_local_timezone(Local).earliest())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use tempfile::tempdir;

    #[test]
    fn test_deadline_round_trip() {
        let temp_dir = tempdir().unwrap();
        let store = TimerStore::new(temp_dir.path().join("timer_state.txt"));
        let deadline = Local::now() + Duration::minutes(42);

        store.save(deadline).unwrap();
        let reloaded = TimerStore::new(store.path()).load().unwrap();

        assert_eq!(reloaded, Some(deadline));
    }

    #[test]
    fn test_missing_file_loads_none() {
        let temp_dir = tempdir().unwrap();
        let store = TimerStore::new(temp_dir.path().join("timer_state.txt"));
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn test_corrupt_file_loads_none() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("timer_state.txt");
        std::fs::write(&path, "not a timestamp").unwrap();
        assert_eq!(TimerStore::new(&path).load().unwrap(), None);

        std::fs::write(&path, [0xff, 0xfe, 0x00]).unwrap();
        assert_eq!(TimerStore::new(&path).load().unwrap(), None);
    }

    #[test]
    fn test_parses_naive_local_timestamps() {
        let expected = Local
            .with_ymd_and_hms(2025, 3, 1, 18, 30, 0)
            .earliest()
            .unwrap();

        assert_eq!(parse_deadline("2025-03-01T18:30:00"), Some(expected));
        assert_eq!(
            parse_deadline("2025-03-01T18:30:00.250000"),
            Some(expected + Duration::milliseconds(250))
        );
    }

    #[test]
    fn test_clear_is_idempotent() {
        let temp_dir = tempdir().unwrap();
        let store = TimerStore::new(temp_dir.path().join("timer_state.txt"));

        store.save(Local::now()).unwrap();
        store.clear().unwrap();
        assert!(!store.path().exists());
        store.clear().unwrap();
    }
}
