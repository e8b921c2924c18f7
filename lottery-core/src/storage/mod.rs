pub mod timer_store;
pub mod user_log;

pub use timer_store::TimerStore;
pub use user_log::UserLog;

use crate::error::{LotteryError, Result};
use std::io::ErrorKind;
use std::path::Path;

/// Read a whole state file. A missing file reads as `None`.
fn read_optional(path: &Path) -> Result<Option<String>> {
    match std::fs::read_to_string(path) {
        Ok(contents) => Ok(Some(contents)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(LotteryError::storage(format!(
            "Failed to read {}: {}",
            path.display(),
            e
        ))),
    }
}

fn write_error(path: &Path, e: std::io::Error) -> LotteryError {
    LotteryError::storage(format!("Failed to write {}: {}", path.display(), e))
}
