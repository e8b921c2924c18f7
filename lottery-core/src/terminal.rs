use crate::error::Result;
use async_trait::async_trait;
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

/// Console the session talks through.
#[async_trait]
pub trait Terminal: Send {
    /// Show `prompt` and wait for one line of input. `None` once input is closed.
    async fn read_line(&mut self, prompt: &str) -> Result<Option<String>>;

    fn say(&mut self, message: &str);
}

/// Process stdin/stdout.
pub struct StdioTerminal {
    lines: Lines<BufReader<Stdin>>,
}

impl StdioTerminal {
    pub fn new() -> Self {
        Self {
            lines: BufReader::new(tokio::io::stdin()).lines(),
        }
    }
}

impl Default for StdioTerminal {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for StdioTerminal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StdioTerminal").finish_non_exhaustive()
    }
}

#[async_trait]
impl Terminal for StdioTerminal {
    async fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        {
            let mut stdout = std::io::stdout();
            write!(stdout, "{}", prompt)?;
            stdout.flush()?;
        }

        Ok(self.lines.next_line().await?)
    }

    fn say(&mut self, message: &str) {
        println!("{}", message);
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use crate::clock::ManualClock;
    use chrono::Duration;
    use std::collections::VecDeque;

    /// Replays typed lines, moving a [`ManualClock`] forward before each one.
    pub(crate) struct ScriptedTerminal {
        clock: ManualClock,
        // `None` stands for a line that is not valid UTF-8
        script: VecDeque<(Duration, Option<String>)>,
        hang_when_done: bool,
        pub(crate) output: Vec<String>,
        pub(crate) prompts: usize,
    }

    impl ScriptedTerminal {
        pub(crate) fn new(clock: ManualClock) -> Self {
            Self {
                clock,
                script: VecDeque::new(),
                hang_when_done: false,
                output: Vec::new(),
                prompts: 0,
            }
        }

        pub(crate) fn line(self, text: &str) -> Self {
            self.line_after(Duration::zero(), text)
        }

        pub(crate) fn line_after(mut self, delay: Duration, text: &str) -> Self {
            self.script.push_back((delay, Some(text.to_string())));
            self
        }

        /// A line of raw bytes that does not decode as UTF-8.
        pub(crate) fn undecodable_line(mut self) -> Self {
            self.script.push_back((Duration::zero(), None));
            self
        }

        /// Block forever instead of reporting closed input once the script runs out.
        pub(crate) fn hang_when_done(mut self) -> Self {
            self.hang_when_done = true;
            self
        }

        pub(crate) fn transcript(&self) -> String {
            self.output.join("\n")
        }
    }

    #[async_trait]
    impl Terminal for ScriptedTerminal {
        async fn read_line(&mut self, _prompt: &str) -> Result<Option<String>> {
            self.prompts += 1;
            match self.script.pop_front() {
                Some((delay, Some(text))) => {
                    self.clock.advance(delay);
                    Ok(Some(text))
                }
                Some((delay, None)) => {
                    self.clock.advance(delay);
                    Err(std::io::Error::new(
                        std::io::ErrorKind::InvalidData,
                        "stream did not contain valid UTF-8",
                    )
                    .into())
                }
                None if self.hang_when_done => {
                    std::future::pending::<Result<Option<String>>>().await
                }
                None => Ok(None),
            }
        }

        fn say(&mut self, message: &str) {
            self.output.push(message.to_string());
        }
    }
}
