use super::{read_optional, write_error};
use crate::error::Result;
use crate::types::{is_outcome_record, RoundOutcome};
use std::collections::HashSet;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Flat text log holding registered usernames and round outcome records.
#[derive(Debug, Clone)]
pub struct UserLog {
    path: PathBuf,
}

impl UserLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lines(&self) -> Result<Vec<String>> {
        Ok(read_optional(&self.path)?
            .map(|contents| contents.lines().map(str::to_string).collect())
            .unwrap_or_default())
    }

    /// Every username line in the log; outcome records and blank lines are skipped.
    pub fn load_participants(&self) -> Result<HashSet<String>> {
        let participants: HashSet<String> = self
            .lines()?
            .iter()
            .filter(|line| !line.trim().is_empty() && !is_outcome_record(line))
            .map(|line| line.trim().to_string())
            .collect();

        tracing::debug!(
            "Loaded {} participants from {}",
            participants.len(),
            self.path.display()
        );
        Ok(participants)
    }

    /// Outcome records in the order they were appended.
    pub fn outcomes(&self) -> Result<Vec<String>> {
        Ok(self
            .lines()?
            .into_iter()
            .filter(|line| is_outcome_record(line))
            .collect())
    }

    /// Overwrite the log with the current participants.
    ///
    /// Outcome records already in the file are written back first, so round
    /// history is never lost to an autosave.
    pub fn save_participants(&self, participants: &HashSet<String>) -> Result<()> {
        let mut contents = String::new();
        for record in self.outcomes()? {
            contents.push_str(&record);
            contents.push('\n');
        }

        let mut names: Vec<&String> = participants.iter().collect();
        names.sort();
        for name in names {
            contents.push_str(name);
            contents.push('\n');
        }

        std::fs::write(&self.path, contents).map_err(|e| write_error(&self.path, e))?;

        tracing::debug!(
            "Saved {} participants to {}",
            participants.len(),
            self.path.display()
        );
        Ok(())
    }

    pub fn append_outcome(&self, outcome: &RoundOutcome) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| write_error(&self.path, e))?;

        writeln!(file, "{}", outcome.record()).map_err(|e| write_error(&self.path, e))?;
        Ok(())
    }
}
