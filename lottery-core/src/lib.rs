//! Lottery registration core
//!
//! Usernames are collected during a timed registration window. When the
//! window closes with enough participants one of them is drawn at random,
//! otherwise the window is extended once. Registered users and the current
//! deadline live in two flat text files so a session survives restarts.

pub mod clock;
pub mod config;
pub mod draw;
pub mod error;
pub mod session;
pub mod storage;
pub mod terminal;
pub mod types;
pub mod username;

pub use clock::{Clock, SystemClock};
pub use config::LotteryConfig;
pub use error::{LotteryError, Result, UsernameError};
pub use session::{LotterySession, Registration, RegistrationWindow};
pub use storage::{TimerStore, UserLog};
pub use terminal::{StdioTerminal, Terminal};
pub use types::{RoundOutcome, SessionEnd};

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_session_reopens_from_files() {
        let temp_dir = tempdir().unwrap();
        let config = LotteryConfig::in_dir(temp_dir.path());

        let mut session = LotterySession::open(config.clone()).unwrap();
        session.register("alice").unwrap();
        session.shutdown().unwrap();

        let reopened = LotterySession::open(config).unwrap();
        assert!(reopened.participants().contains("alice"));
        assert_eq!(reopened.window().end(), session.window().end());
    }
}
