use crate::error::{LotteryError, Result};
use chrono::Duration;
use std::path::{Path, PathBuf};

pub const REGISTRATION_DURATION_SECS: i64 = 3600;
pub const EXTENSION_DURATION_SECS: i64 = 1800;
pub const MIN_USERS: usize = 5;
pub const AUTOSAVE_INTERVAL_SECS: i64 = 2;
pub const LOG_FILE: &str = "lottery_log.txt";
pub const TIMER_FILE: &str = "timer_state.txt";

#[derive(Debug, Clone)]
pub struct LotteryConfig {
    pub registration_duration: Duration,
    pub extension_duration: Duration,
    pub min_users: usize,
    pub autosave_interval: Duration,
    pub log_path: PathBuf,
    pub timer_path: PathBuf,
}

impl Default for LotteryConfig {
    fn default() -> Self {
        Self {
            registration_duration: Duration::seconds(REGISTRATION_DURATION_SECS), // 1 hour
            extension_duration: Duration::seconds(EXTENSION_DURATION_SECS),       // 30 minutes
            min_users: MIN_USERS,
            autosave_interval: Duration::seconds(AUTOSAVE_INTERVAL_SECS),
            log_path: PathBuf::from(LOG_FILE),
            timer_path: PathBuf::from(TIMER_FILE),
        }
    }
}

impl LotteryConfig {
    /// Default tunables with both state files placed under `dir`.
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            log_path: dir.join(LOG_FILE),
            timer_path: dir.join(TIMER_FILE),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.registration_duration <= Duration::zero() {
            return Err(LotteryError::config(
                "Registration duration must be greater than 0",
            ));
        }

        if self.extension_duration <= Duration::zero() {
            return Err(LotteryError::config(
                "Extension duration must be greater than 0",
            ));
        }

        if self.autosave_interval < Duration::zero() {
            return Err(LotteryError::config("Autosave interval cannot be negative"));
        }

        if self.min_users == 0 {
            return Err(LotteryError::config("Minimum users must be at least 1"));
        }

        if self.log_path == self.timer_path {
            return Err(LotteryError::config(
                "User log and timer state must be different files",
            ));
        }

        Ok(())
    }
}
