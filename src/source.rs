//! Where blame transcripts come from.

use std::path::Path;
use std::process::Command;

use crate::error::{Error, Result};

pub trait BlameSource {
    /// Produce the porcelain blame transcript for `path`. `extra_args` are
    /// handed to the blame command untouched.
    fn blame(&self, path: &Path, extra_args: &[String]) -> Result<Vec<u8>>;
}

/// Runs `git blame --line-porcelain` in the current directory.
#[derive(Debug, Default, Clone, Copy)]
pub struct GitBlame;

impl GitBlame {
    fn command(path: &Path, extra_args: &[String]) -> Command {
        let mut cmd = Command::new("git");
        cmd.arg("blame").arg("--line-porcelain").arg(path).args(extra_args);
        cmd
    }
}

impl BlameSource for GitBlame {
    fn blame(&self, path: &Path, extra_args: &[String]) -> Result<Vec<u8>> {
        let mut cmd = Self::command(path, extra_args);
        let command_line = format!("{:?}", cmd);
        tracing::debug!(command = %command_line, "running blame");

        let output = cmd.output().map_err(|source| Error::Spawn {
            command: command_line.clone(),
            source,
        })?;

        if !output.status.success() {
            return Err(Error::Subprocess {
                command: command_line,
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(output.stdout)
    }
}
