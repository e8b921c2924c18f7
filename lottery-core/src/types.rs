pub const WINNER_PREFIX: &str = "Winner:";
pub const NO_WINNER_PREFIX: &str = "No winner";
pub const NO_WINNER_RECORD: &str = "No winner selected due to insufficient participants.";

/// Result of one round, as recorded in the user log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoundOutcome {
    Winner { name: String, participants: usize },
    NoWinner,
}

impl RoundOutcome {
    /// The log line for this outcome.
    pub fn record(&self) -> String {
        match self {
            RoundOutcome::Winner { name, .. } => format!("{} {}", WINNER_PREFIX, name),
            RoundOutcome::NoWinner => NO_WINNER_RECORD.to_string(),
        }
    }
}

/// Whether a raw log line is an outcome record rather than a username.
///
/// Detection is by prefix only, on the line as stored.
pub fn is_outcome_record(line: &str) -> bool {
    line.starts_with(WINNER_PREFIX) || line.starts_with(NO_WINNER_PREFIX)
}

/// Why a session stopped running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// Still too few participants after the extension.
    NoWinner,
    Interrupted,
    InputClosed,
}
