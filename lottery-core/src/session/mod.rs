pub mod window;

pub use window::{format_remaining, RegistrationWindow};

use crate::clock::{Clock, SystemClock};
use crate::config::LotteryConfig;
use crate::draw::pick_winner;
use crate::error::{LotteryError, Result, UsernameError};
use crate::storage::{TimerStore, UserLog};
use crate::terminal::Terminal;
use crate::types::{RoundOutcome, SessionEnd};
use crate::username::validate_username;
use chrono::{DateTime, Local};
use std::collections::HashSet;
use std::future::Future;
use std::io::ErrorKind;

const PROMPT: &str = "Enter a username (alphanumeric only): ";

/// Result of one registration attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Registration {
    Accepted(String),
    Rejected(UsernameError),
}

/// Owns the registration window, the participant set and their persistence.
#[derive(Debug)]
pub struct LotterySession<C: Clock = SystemClock> {
    config: LotteryConfig,
    clock: C,
    window: RegistrationWindow,
    participants: HashSet<String>,
    last_autosave: DateTime<Local>,
    user_log: UserLog,
    timer: TimerStore,
}

impl LotterySession<SystemClock> {
    pub fn open(config: LotteryConfig) -> Result<Self> {
        Self::with_clock(config, SystemClock)
    }
}

impl<C: Clock> LotterySession<C> {
    /// Restore the session from the state files, or start a fresh window.
    pub fn with_clock(config: LotteryConfig, clock: C) -> Result<Self> {
        config.validate()?;

        let user_log = UserLog::new(&config.log_path);
        let timer = TimerStore::new(&config.timer_path);
        let now = clock.now();

        let window = match timer.load()? {
            Some(deadline) => {
                tracing::info!("Resuming registration window ending at {}", deadline);
                RegistrationWindow::recovered(now, deadline)
            }
            None => RegistrationWindow::fresh(now, config.registration_duration),
        };
        let participants = user_log.load_participants()?;

        tracing::info!(
            "Session opened with {} registered users, deadline {}",
            participants.len(),
            window.end()
        );

        Ok(Self {
            config,
            clock,
            window,
            participants,
            last_autosave: now,
            user_log,
            timer,
        })
    }

    pub fn window(&self) -> &RegistrationWindow {
        &self.window
    }

    pub fn participants(&self) -> &HashSet<String> {
        &self.participants
    }

    pub fn participant_count(&self) -> usize {
        self.participants.len()
    }

    pub fn has_quorum(&self) -> bool {
        self.participants.len() >= self.config.min_users
    }

    pub fn is_open(&self) -> bool {
        self.window.is_open(self.clock.now())
    }

    /// Validate and add one username.
    ///
    /// Rejections leave the session untouched. An accepted name triggers an
    /// autosave when the autosave interval has passed, and the deadline is
    /// persisted every time.
    pub fn register(&mut self, raw: &str) -> Result<Registration> {
        let username = match validate_username(raw, &self.participants) {
            Ok(username) => username.to_string(),
            Err(reason) => {
                tracing::debug!("Rejected username {:?}: {:?}", raw, reason);
                return Ok(Registration::Rejected(reason));
            }
        };

        self.participants.insert(username.clone());
        tracing::info!(
            "Registered user '{}' ({} total)",
            username,
            self.participants.len()
        );

        if self.clock.now() - self.last_autosave >= self.config.autosave_interval {
            self.autosave()?;
        }
        self.save_deadline()?;

        Ok(Registration::Accepted(username))
    }

    /// Overwrite the user log with the current participants.
    pub fn autosave(&mut self) -> Result<()> {
        self.user_log.save_participants(&self.participants)?;
        self.last_autosave = self.clock.now();
        Ok(())
    }

    pub fn save_deadline(&self) -> Result<()> {
        self.timer.save(self.window.end())
    }

    /// Flush everything needed to resume this round after a restart.
    pub fn shutdown(&mut self) -> Result<()> {
        self.autosave()?;
        self.save_deadline()?;
        tracing::info!(
            "Saved {} users and deadline {} before exit",
            self.participants.len(),
            self.window.end()
        );
        Ok(())
    }

    pub fn extend_window(&mut self) -> Result<()> {
        self.window.extend(self.config.extension_duration);
        tracing::info!(
            "Only {} of {} required users registered, deadline moved to {}",
            self.participants.len(),
            self.config.min_users,
            self.window.end()
        );
        self.save_deadline()
    }

    /// Open a fresh full-length window for the next round.
    pub fn start_new_round(&mut self) -> Result<()> {
        let now = self.clock.now();
        self.window = RegistrationWindow::fresh(now, self.config.registration_duration);
        self.last_autosave = now;
        self.save_deadline()?;

        tracing::info!("New round open until {}", self.window.end());
        Ok(())
    }

    fn display_status<T: Terminal>(&self, term: &mut T) {
        let now = self.clock.now();
        if self.window.is_open(now) {
            term.say(&format!(
                "\nRemaining registration time: {}",
                format_remaining(self.window.remaining(now))
            ));
        }
        term.say(&format!("Registered users: {}", self.participants.len()));
    }

    /// Prompt until one username is accepted or the deadline has passed.
    ///
    /// The deadline is checked between prompts only; a pending read always
    /// completes and its entry is processed.
    async fn register_next<T: Terminal>(&mut self, term: &mut T) -> Result<()> {
        while self.is_open() {
            let line = match term.read_line(PROMPT).await {
                Ok(Some(line)) => line,
                Ok(None) => return Err(LotteryError::InputClosed),
                // a line that is not UTF-8 cannot be an alphanumeric name
                Err(LotteryError::Io(e)) if e.kind() == ErrorKind::InvalidData => {
                    tracing::debug!("Rejected undecodable input line: {}", e);
                    term.say(&UsernameError::InvalidCharacters.to_string());
                    continue;
                }
                Err(e) => return Err(e),
            };

            match self.register(&line)? {
                Registration::Accepted(username) => {
                    term.say(&format!("User '{}' registered successfully.", username));
                    break;
                }
                Registration::Rejected(reason) => term.say(&reason.to_string()),
            }
        }
        Ok(())
    }

    /// Accept registrations until the current deadline passes.
    pub async fn registration_loop<T: Terminal>(&mut self, term: &mut T) -> Result<()> {
        while self.is_open() {
            self.display_status(term);
            self.register_next(term).await?;
        }
        Ok(())
    }

    /// Draw a winner, or extend once and try again.
    ///
    /// Returns [`RoundOutcome::NoWinner`] when the extension still did not
    /// bring in enough users; the no-winner record has been logged by then.
    pub async fn settle_round<T: Terminal>(&mut self, term: &mut T) -> Result<RoundOutcome> {
        if self.has_quorum() {
            return self.draw(term);
        }

        term.say(&format!(
            "\nNot enough users registered. Extending registration by {} minutes.",
            self.config.extension_duration.num_minutes()
        ));
        self.extend_window()?;
        self.registration_loop(term).await?;

        if self.has_quorum() {
            return self.draw(term);
        }

        term.say("\nStill not enough users registered. Exiting the program.");
        self.user_log.append_outcome(&RoundOutcome::NoWinner)?;
        tracing::info!(
            "Round closed without a winner ({} users registered)",
            self.participants.len()
        );
        Ok(RoundOutcome::NoWinner)
    }

    fn draw<T: Terminal>(&mut self, term: &mut T) -> Result<RoundOutcome> {
        let name = pick_winner(&self.participants, &mut rand::thread_rng())
            .ok_or_else(|| LotteryError::internal("No participants to draw from"))?;
        let outcome = RoundOutcome::Winner {
            name: name.clone(),
            participants: self.participants.len(),
        };

        term.say(&format!("\nThe winner is: {}!", name));
        term.say(&format!("Total participants: {}", self.participants.len()));

        self.user_log.append_outcome(&outcome)?;
        self.timer.clear()?;
        self.participants.clear();
        self.autosave()?;
        term.say("All participants have been reset.");

        tracing::info!("Winner drawn: {}", name);
        Ok(outcome)
    }

    /// Run rounds back to back until one ends without a winner.
    pub async fn run<T: Terminal>(&mut self, term: &mut T) -> Result<SessionEnd> {
        loop {
            term.say(&format!(
                "Registration ends at: {}",
                self.window.end().format("%Y-%m-%d %H:%M:%S")
            ));
            self.registration_loop(term).await?;

            term.say("\nRegistration time has ended!");
            self.autosave()?;

            match self.settle_round(term).await? {
                RoundOutcome::Winner { .. } => {
                    term.say("\nStarting new lottery round...");
                    self.start_new_round()?;
                }
                RoundOutcome::NoWinner => return Ok(SessionEnd::NoWinner),
            }
        }
    }

    /// [`run`](Self::run), stopping cleanly when `shutdown` resolves or input closes.
    ///
    /// Either way the participants and the deadline are saved before returning.
    pub async fn run_until<T, S>(&mut self, term: &mut T, shutdown: S) -> Result<SessionEnd>
    where
        T: Terminal,
        S: Future<Output = ()>,
    {
        let result = tokio::select! {
            result = self.run(term) => result,
            _ = shutdown => Err(LotteryError::Interrupted),
        };

        match result {
            Err(e) if e.is_shutdown() => {
                let end = match e {
                    LotteryError::Interrupted => {
                        term.say("\nProgram interrupted. Autosaving current registrations and time...");
                        SessionEnd::Interrupted
                    }
                    _ => {
                        term.say("\nInput closed. Autosaving current registrations and time...");
                        SessionEnd::InputClosed
                    }
                };
                self.shutdown()?;
                term.say("Exiting the program.");
                Ok(end)
            }
            other => other,
        }
    }
}
