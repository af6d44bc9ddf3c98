use std::collections::HashMap;

use chrono::{DateTime, Local, NaiveDateTime};

use super::types::{BlameRecord, SHORT_REVISION_LEN};
use crate::error::{Error, Result};

/// Author fields of one revision, remembered so that a revision whose
/// headers were printed earlier in the transcript can be restored.
#[derive(Debug, Clone)]
struct Authorship {
    author: String,
    author_time: NaiveDateTime,
    author_tz: String,
}

/// The "current" values carried from header lines to the content lines
/// that follow them.
#[derive(Debug, Default)]
struct Accumulator {
    revision: Option<String>,
    author: Option<String>,
    author_time: Option<NaiveDateTime>,
    author_tz: Option<String>,
    seen: HashMap<String, Authorship>,
}

impl Accumulator {
    fn enter_revision(&mut self, sha: &str) {
        if let Some(previous) = self.revision.take() {
            if let Some(authorship) = self.authorship() {
                self.seen.insert(previous, authorship);
            }
        }

        if let Some(known) = self.seen.get(sha) {
            self.author = Some(known.author.clone());
            self.author_time = Some(known.author_time);
            self.author_tz = Some(known.author_tz.clone());
        }
        self.revision = Some(sha.to_string());
    }

    fn authorship(&self) -> Option<Authorship> {
        Some(Authorship {
            author: self.author.clone()?,
            author_time: self.author_time?,
            author_tz: self.author_tz.clone()?,
        })
    }

    fn record(&self, line_no: usize) -> Result<BlameRecord> {
        let revision = self
            .revision
            .as_deref()
            .ok_or_else(|| Error::missing_field(line_no, "revision"))?;
        let author = self
            .author
            .clone()
            .ok_or_else(|| Error::missing_field(line_no, "author"))?;
        let author_time = self
            .author_time
            .ok_or_else(|| Error::missing_field(line_no, "author-time"))?;
        let author_tz = self
            .author_tz
            .clone()
            .ok_or_else(|| Error::missing_field(line_no, "author-tz"))?;

        Ok(BlameRecord {
            revision_id: revision.chars().take(SHORT_REVISION_LEN).collect(),
            author,
            author_time,
            author_tz,
        })
    }
}

/// Parse `git blame --porcelain` or `--line-porcelain` output into one
/// BlameRecord per line of the blamed file.
///
/// The porcelain format looks like:
/// ```text
/// <40-char sha> <orig_line> <final_line> [<num_lines>]
/// author <name>
/// author-mail <<email>>
/// author-time <epoch>
/// author-tz <tz>
/// committer <name>
/// ...
/// summary <text>
/// filename <path>
/// \t<line content>
/// ```
///
/// `--porcelain` prints the header block only the first time a revision
/// appears; later groups for the same revision carry just the sha line.
/// Header values therefore persist until they are overwritten, and a
/// revision seen before gets its author fields back when it recurs.
///
/// A content line reached before every field has been set is an error.
pub fn parse_blame_output(raw: &[u8]) -> Result<Vec<BlameRecord>> {
    let input = String::from_utf8_lossy(raw);

    let mut records: Vec<BlameRecord> = Vec::new();
    let mut state = Accumulator::default();

    for (index, line) in input.lines().enumerate() {
        let line_no = index + 1;

        // Content lines go first: their text may look like anything.
        if line.starts_with('\t') {
            records.push(state.record(line_no)?);
            continue;
        }

        if let Some(val) = tag_value(line, "author") {
            state.author = Some(val.trim().to_string());
        } else if let Some(val) = tag_value(line, "author-time") {
            state.author_time = Some(parse_epoch(val.trim(), line_no)?);
        } else if let Some(val) = tag_value(line, "author-tz") {
            state.author_tz = Some(val.trim_end().to_string());
        } else if let Some(sha) = sha_header(line) {
            state.enter_revision(sha);
        }
    }

    tracing::debug!(records = records.len(), "parsed blame transcript");
    Ok(records)
}

/// Return the value of a `<tag> <value>` line, requiring whitespace after
/// the tag so that `author` does not match `author-mail`.
fn tag_value<'a>(line: &'a str, tag: &str) -> Option<&'a str> {
    let rest = line.strip_prefix(tag)?;
    let value = rest.trim_start();
    if value.len() == rest.len() {
        return None;
    }
    Some(value)
}

/// Interpret an epoch value as local wall-clock time.
fn parse_epoch(value: &str, line_no: usize) -> Result<NaiveDateTime> {
    let secs: i64 = value.parse().map_err(|_| Error::MalformedTranscript {
        line: line_no,
        field: "author-time",
        reason: format!("invalid author-time `{}`", value),
    })?;
    DateTime::from_timestamp(secs, 0)
        .map(|utc| utc.with_timezone(&Local).naive_local())
        .ok_or_else(|| Error::MalformedTranscript {
            line: line_no,
            field: "author-time",
            reason: format!("author-time out of range `{}`", value),
        })
}

/// Check if a line is a revision header and return its sha.
///
/// A header starts with 40 hex characters followed by whitespace and the
/// line numbers of the group.
fn sha_header(line: &str) -> Option<&str> {
    let mut parts = line.split_whitespace();
    let sha_candidate = parts.next()?;
    parts.next()?;

    if sha_candidate.len() != 40 {
        return None;
    }
    if !sha_candidate.chars().all(|c| matches!(c, '0'..='9' | 'a'..='f')) {
        return None;
    }
    Some(sha_candidate)
}
