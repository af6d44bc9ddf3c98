use chrono::NaiveDateTime;
use serde::Serialize;

/// Number of characters of the revision id shown in the report.
pub const SHORT_REVISION_LEN: usize = 10;

/// Authorship of a single line of the blamed file.
/// One record is produced per content line of the transcript, in file order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlameRecord {
    /// Revision id shortened to `SHORT_REVISION_LEN` characters.
    pub revision_id: String,
    pub author: String,
    /// Author time as local wall-clock time.
    pub author_time: NaiveDateTime,
    /// Offset label exactly as git printed it, e.g. `+0200`.
    pub author_tz: String,
}
