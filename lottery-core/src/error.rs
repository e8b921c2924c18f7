use thiserror::Error;

pub type Result<T> = std::result::Result<T, LotteryError>;

#[derive(Error, Debug)]
pub enum LotteryError {
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Session interrupted")]
    Interrupted,

    #[error("Input stream closed")]
    InputClosed,

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl LotteryError {
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// True for the two ways a session can be stopped from outside.
    pub fn is_shutdown(&self) -> bool {
        matches!(self, Self::Interrupted | Self::InputClosed)
    }
}

/// Why a candidate username was turned away.
///
/// The `Display` text is what the user sees before being re-prompted.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UsernameError {
    #[error("Username cannot be empty. Please try again.")]
    Empty,

    #[error("Username can only contain letters and numbers. Please try again.")]
    InvalidCharacters,

    #[error("Username already exists. Please try again.")]
    Duplicate(String),
}
