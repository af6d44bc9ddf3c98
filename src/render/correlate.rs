/// Highlighted content for the line at `index`.
///
/// Highlighters may drop trailing blank lines, so an index past the end
/// yields an empty string instead of an error.
pub fn content_for(highlighted: &[String], index: usize) -> &str {
    match highlighted.get(index) {
        Some(line) => line.as_str(),
        None => {
            tracing::trace!(index, available = highlighted.len(), "no highlighted content for line");
            ""
        }
    }
}
