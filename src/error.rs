//! Error types for the blame rendering pipeline.
//!
//! Every failure aborts the whole render; nothing is printed until the
//! complete report has been assembled. A highlighted file that is shorter
//! than the blame transcript is not an error (see `render::correlate`).

use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to launch `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{command}` failed ({status}): {stderr}")]
    Subprocess {
        command: String,
        status: ExitStatus,
        stderr: String,
    },

    #[error("Cannot read {}: {source}", path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed blame transcript at line {line}, `{field}`: {reason}")]
    MalformedTranscript {
        line: usize,
        field: &'static str,
        reason: String,
    },

    #[error("Unknown highlighting theme: {0}")]
    UnknownTheme(String),

    #[error("Highlighting failed: {0}")]
    Highlight(String),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn missing_field(line: usize, field: &'static str) -> Self {
        Error::MalformedTranscript {
            line,
            field,
            reason: "content line before this header was set".to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
