use chrono::NaiveDateTime;

use super::correlate::content_for;
use super::palette::AuthorColorTable;
use super::recency::Recency;
use super::style::{cell, visible_width, Style};
use crate::blame::BlameRecord;

const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Digits needed for the largest line count, never less than one.
pub fn line_number_width(line_count: usize) -> usize {
    line_count.max(1).to_string().len()
}

/// Width of the widest author name across all records.
pub fn author_column_width(records: &[BlameRecord]) -> usize {
    records
        .iter()
        .map(|r| visible_width(&r.author))
        .max()
        .unwrap_or(0)
}

/// Date cell text: local wall-clock time followed by the raw tz label.
pub fn format_date(record: &BlameRecord) -> String {
    format!("{} {}", record.author_time.format(DATE_FORMAT), record.author_tz)
}

/// Assemble the report, one row per record in file order:
///
/// ```text
/// <revision> (<author> <date>   <lineno>) <content>
/// ```
///
/// `line_count` is the number of lines in the blamed file and sizes the
/// line-number column. Rows are joined with `\n`, without a trailing newline.
pub fn render_rows(
    records: &[BlameRecord],
    highlighted: &[String],
    line_count: usize,
    now: NaiveDateTime,
) -> String {
    let author_width = author_column_width(records);
    let lineno_width = line_number_width(line_count);
    let mut colors = AuthorColorTable::new();

    let rows: Vec<String> = records
        .iter()
        .enumerate()
        .map(|(index, record)| {
            let author = cell(
                &record.author,
                Style::bold(colors.color_for(&record.author)),
                author_width,
            );
            let tier = Recency::classify(record.author_time, now);
            let date = cell(&format_date(record), tier.style(), 0);
            let content = content_for(highlighted, index);

            format!(
                "{} ({} {}   {:>width$}) {}",
                record.revision_id,
                author,
                date,
                index,
                content,
                width = lineno_width
            )
        })
        .collect();

    tracing::debug!(
        rows = rows.len(),
        authors = colors.author_count(),
        highlighted = highlighted.len(),
        "assembled blame report"
    );
    rows.join("\n")
}
