use super::style::Color;

/// Author colors, in the order they are handed out.
pub const PALETTE: [Color; 7] = [
    Color::Red,
    Color::Green,
    Color::Yellow,
    Color::Blue,
    Color::Magenta,
    Color::Cyan,
    Color::White,
];

/// Maps authors to palette colors in first-seen order.
///
/// The cursor advances before each new binding, so the first author gets
/// the second palette entry. Once bound, an author keeps its color for the
/// life of the table. More than `PALETTE.len()` authors share colors.
#[derive(Debug, Default)]
pub struct AuthorColorTable {
    // Insertion order is the assignment order; kept as a Vec so iteration
    // never depends on hashing.
    entries: Vec<(String, Color)>,
    cursor: usize,
}

impl AuthorColorTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Color for `author`, binding the next palette entry on first sight.
    pub fn color_for(&mut self, author: &str) -> Color {
        if let Some(color) = self.get(author) {
            return color;
        }

        self.cursor = (self.cursor + 1) % PALETTE.len();
        let color = PALETTE[self.cursor];
        self.entries.push((author.to_string(), color));
        color
    }

    pub fn get(&self, author: &str) -> Option<Color> {
        self.entries
            .iter()
            .find(|(name, _)| name == author)
            .map(|(_, color)| *color)
    }

    /// Number of distinct authors bound so far.
    pub fn author_count(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_author_gets_second_entry() {
        let mut table = AuthorColorTable::new();
        assert_eq!(table.color_for("Alice"), Color::Green);
        assert_eq!(table.color_for("Bob"), Color::Yellow);
    }

    #[test]
    fn test_color_is_stable() {
        let mut table = AuthorColorTable::new();
        let alice = table.color_for("Alice");
        table.color_for("Bob");
        table.color_for("Carol");
        assert_eq!(table.color_for("Alice"), alice);
        assert_eq!(table.color_for("Alice"), alice);
        assert_eq!(table.get("Alice"), Some(alice));
        assert_eq!(table.author_count(), 3);
    }

    #[test]
    fn test_palette_wraps() {
        let mut table = AuthorColorTable::new();
        let colors: Vec<Color> = (0..9)
            .map(|i| table.color_for(&format!("author{i}")))
            .collect();
        assert_eq!(colors[5], Color::White);
        assert_eq!(colors[6], Color::Red);
        assert_eq!(colors[7], Color::Green);
        assert_eq!(colors[7], colors[0]);
    }

    #[test]
    fn test_assignment_follows_first_seen_order() {
        let mut table = AuthorColorTable::new();
        for name in ["Zed", "Amy", "Zed", "Mo"] {
            table.color_for(name);
        }
        assert_eq!(table.get("Zed"), Some(Color::Green));
        assert_eq!(table.get("Amy"), Some(Color::Yellow));
        assert_eq!(table.get("Mo"), Some(Color::Blue));
        assert_eq!(table.author_count(), 3);
    }

    #[test]
    fn test_unknown_author() {
        let table = AuthorColorTable::new();
        assert_eq!(table.author_count(), 0);
        assert_eq!(table.get("Nobody"), None);
    }
}
