pub mod blame;
pub mod error;
pub mod highlight;
pub mod render;
pub mod source;

use std::path::Path;

use chrono::{Local, NaiveDateTime};
use serde::Serialize;

use blame::BlameRecord;
use highlight::{Language, DEFAULT_THEME};
use source::BlameSource;

pub use error::{Error, Result};

/// Settings for one render.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// syntect theme used for file content.
    pub theme: String,
    /// Reference instant for recency emphasis.
    pub now: NaiveDateTime,
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions {
            theme: DEFAULT_THEME.to_string(),
            now: Local::now().naive_local(),
        }
    }
}

// ---------------------------------------------------------------------------
// Pipeline entry points
// ---------------------------------------------------------------------------

/// Render a captured blame transcript against already highlighted content.
///
/// `line_count` is the number of lines of the blamed file. No I/O happens
/// here; the transcript may come from a file, a fixture or a subprocess.
pub fn render_transcript(
    transcript: &[u8],
    highlighted: &[String],
    line_count: usize,
    now: NaiveDateTime,
) -> Result<String> {
    let records = blame::parse_blame_output(transcript)?;
    Ok(render::render_rows(&records, highlighted, line_count, now))
}

/// Blame `path` through `source` and render the colored report.
///
/// Nothing is returned unless every stage succeeds.
pub fn blame_file(
    source: &dyn BlameSource,
    path: &Path,
    extra_args: &[String],
    options: &RenderOptions,
) -> Result<String> {
    let transcript = source.blame(path, extra_args)?;
    let content = read_file(path)?;

    let language = Language::from_path(path);
    tracing::debug!(?language, path = %path.display(), "selected highlighter");
    let highlighted = language.highlighter(&options.theme)?.highlight(&content)?;

    render_transcript(&transcript, &highlighted, count_lines(&content), options.now)
}

#[derive(Serialize)]
struct NumberedRecord<'a> {
    line: usize,
    #[serde(flatten)]
    record: &'a BlameRecord,
}

/// Blame `path` and return the parsed records as a pretty JSON array.
pub fn blame_file_json(
    source: &dyn BlameSource,
    path: &Path,
    extra_args: &[String],
) -> Result<String> {
    let transcript = source.blame(path, extra_args)?;
    records_json(&blame::parse_blame_output(&transcript)?)
}

/// Serialize records with their 0-based line index.
pub fn records_json(records: &[BlameRecord]) -> Result<String> {
    let numbered: Vec<NumberedRecord> = records
        .iter()
        .enumerate()
        .map(|(line, record)| NumberedRecord { line, record })
        .collect();
    Ok(serde_json::to_string_pretty(&numbered)?)
}

/// Count lines the way a line iterator over the file would: a final line
/// without a newline still counts.
pub fn count_lines(content: &[u8]) -> usize {
    let newlines = content.iter().filter(|&&b| b == b'\n').count();
    match content.last() {
        Some(b'\n') | None => newlines,
        Some(_) => newlines + 1,
    }
}

fn read_file(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).map_err(|source| Error::FileAccess {
        path: path.to_path_buf(),
        source,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::io::Write;

    use chrono::NaiveDate;

    const TRANSCRIPT: &[u8] = b"abcdef0123456789abcdef0123456789abcdef01 1 1 2\nauthor Alice\nauthor-mail <alice@example.com>\nauthor-time 1700000000\nauthor-tz +0000\ncommitter Alice\ncommitter-mail <alice@example.com>\ncommitter-time 1700000000\ncommitter-tz +0000\nsummary Initial commit\nfilename notes.txt\n\tfirst\nabcdef0123456789abcdef0123456789abcdef01 2 2\n\tsecond\n1234567890abcdef1234567890abcdef12345678 3 3 1\nauthor Bo\nauthor-mail <bo@example.com>\nauthor-time 1600000000\nauthor-tz -0500\ncommitter Bo\ncommitter-mail <bo@example.com>\ncommitter-time 1600000000\ncommitter-tz -0500\nsummary Add third line\nprevious abcdef0123456789abcdef0123456789abcdef01 notes.txt\nfilename notes.txt\n\tthird\n";

    /// Replays a canned transcript and records what it was asked for.
    struct CannedBlame {
        transcript: Vec<u8>,
        calls: RefCell<Vec<Vec<String>>>,
    }

    impl CannedBlame {
        fn new(transcript: &[u8]) -> Self {
            CannedBlame {
                transcript: transcript.to_vec(),
                calls: RefCell::new(Vec::new()),
            }
        }
    }

    impl BlameSource for CannedBlame {
        fn blame(&self, _path: &Path, extra_args: &[String]) -> Result<Vec<u8>> {
            self.calls.borrow_mut().push(extra_args.to_vec());
            Ok(self.transcript.clone())
        }
    }

    struct FailingBlame;

    impl BlameSource for FailingBlame {
        fn blame(&self, _path: &Path, _extra_args: &[String]) -> Result<Vec<u8>> {
            Err(Error::Spawn {
                command: "git blame".to_string(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "git not found"),
            })
        }
    }

    fn options() -> RenderOptions {
        RenderOptions {
            theme: DEFAULT_THEME.to_string(),
            now: NaiveDate::from_ymd_opt(2030, 1, 1)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
        }
    }

    fn write_file(dir: &tempfile::TempDir, name: &str, content: &[u8]) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(content).unwrap();
        path
    }

    #[test]
    fn test_count_lines() {
        assert_eq!(count_lines(b""), 0);
        assert_eq!(count_lines(b"a"), 1);
        assert_eq!(count_lines(b"a\n"), 1);
        assert_eq!(count_lines(b"a\nb"), 2);
        assert_eq!(count_lines(b"a\n\n"), 2);
    }

    #[test]
    fn test_render_transcript_rows() {
        let highlighted: Vec<String> = vec!["first".into(), "second".into(), "third".into()];
        let out = render_transcript(TRANSCRIPT, &highlighted, 3, options().now).unwrap();
        let rows: Vec<&str> = out.lines().collect();
        assert_eq!(rows.len(), 3);
        assert!(rows[0].starts_with("abcdef0123 ("));
        assert!(rows[0].ends_with("0) first"));
        assert!(rows[1].ends_with("1) second"));
        assert!(rows[2].starts_with("1234567890 ("));
        assert!(rows[2].contains("-0500"));
        assert!(rows[2].ends_with("2) third"));
    }

    #[test]
    fn test_render_transcript_twice_is_identical() {
        let highlighted: Vec<String> = vec!["first".into()];
        let a = render_transcript(TRANSCRIPT, &highlighted, 3, options().now).unwrap();
        let b = render_transcript(TRANSCRIPT, &highlighted, 3, options().now).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_render_transcript_malformed() {
        let result = render_transcript(b"\tcontent\n", &[], 1, options().now);
        assert!(matches!(result, Err(Error::MalformedTranscript { .. })));
    }

    #[test]
    fn test_blame_file_plain() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "notes.txt", b"first\nsecond\nthird\n");
        let source = CannedBlame::new(TRANSCRIPT);
        let extra = vec!["HEAD".to_string()];

        let out = blame_file(&source, &path, &extra, &options()).unwrap();
        let rows: Vec<&str> = out.lines().collect();
        assert_eq!(rows.len(), 3);
        assert!(rows[1].ends_with("1) second"));
        assert_eq!(source.calls.borrow().as_slice(), &[extra]);
    }

    #[test]
    fn test_blame_file_highlighted_python() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "tool.py", b"import os\nx = 1\nprint(x)\n");
        let source = CannedBlame::new(TRANSCRIPT);

        let out = blame_file(&source, &path, &[], &options()).unwrap();
        let rows: Vec<&str> = out.lines().collect();
        assert_eq!(rows.len(), 3);
        assert!(rows[0].contains("\x1B[38;2;"));
    }

    #[test]
    fn test_blame_file_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gone.txt");
        let source = CannedBlame::new(TRANSCRIPT);

        let err = blame_file(&source, &path, &[], &options()).unwrap_err();
        assert!(matches!(err, Error::FileAccess { .. }));
    }

    #[test]
    fn test_blame_file_unknown_theme_on_plain_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "notes.txt", b"first\nsecond\nthird\n");
        let source = CannedBlame::new(TRANSCRIPT);
        let options = RenderOptions {
            theme: "no-such-theme".to_string(),
            ..options()
        };

        let err = blame_file(&source, &path, &[], &options).unwrap_err();
        assert!(matches!(err, Error::UnknownTheme(_)));
    }

    #[test]
    fn test_blame_file_source_failure() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "notes.txt", b"first\n");

        let err = blame_file(&FailingBlame, &path, &[], &options()).unwrap_err();
        assert!(matches!(err, Error::Spawn { .. }));
    }

    #[test]
    fn test_blame_file_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "notes.txt", b"first\nsecond\nthird\n");
        let source = CannedBlame::new(TRANSCRIPT);

        let json = blame_file_json(&source, &path, &[]).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(parsed.is_array());
        assert_eq!(parsed.as_array().unwrap().len(), 3);
        assert_eq!(parsed[0]["line"], 0);
        assert_eq!(parsed[0]["author"], "Alice");
        assert_eq!(parsed[1]["revision_id"], "abcdef0123");
        assert_eq!(parsed[2]["author"], "Bo");
        assert_eq!(parsed[2]["author_tz"], "-0500");
    }
}
