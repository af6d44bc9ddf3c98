use chrono::{Duration, NaiveDateTime};

use super::style::{Color, Style};

/// Lines changed more recently than this are emphasized.
pub const RECENT_DAYS: i64 = 30;
/// Lines untouched for longer than this are marked stale.
pub const STALE_DAYS: i64 = 365;

/// Emphasis given to a line's date based on how long ago it changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recency {
    Recent,
    Neutral,
    Stale,
}

impl Recency {
    /// Classify `author_time` relative to `now`.
    ///
    /// Both bounds are exclusive: exactly 30 or exactly 365 days is neutral.
    /// Times after `now` count as recent.
    pub fn classify(author_time: NaiveDateTime, now: NaiveDateTime) -> Self {
        let age = now - author_time;
        if age < Duration::days(RECENT_DAYS) {
            Recency::Recent
        } else if age > Duration::days(STALE_DAYS) {
            Recency::Stale
        } else {
            Recency::Neutral
        }
    }

    pub fn style(self) -> Style {
        match self {
            Recency::Recent => Style::bold(Color::Red),
            Recency::Stale => Style::bold(Color::Blue),
            Recency::Neutral => Style::PLAIN,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    fn now() -> NaiveDateTime {
        at(2024, 6, 15)
    }

    #[test]
    fn test_recent() {
        assert_eq!(Recency::classify(at(2024, 6, 10), now()), Recency::Recent);
    }

    #[test]
    fn test_stale() {
        assert_eq!(Recency::classify(at(2023, 1, 1), now()), Recency::Stale);
    }

    #[test]
    fn test_neutral() {
        assert_eq!(Recency::classify(at(2023, 12, 1), now()), Recency::Neutral);
    }

    #[test]
    fn test_bounds_are_exclusive() {
        let thirty = now() - Duration::days(30);
        let year = now() - Duration::days(365);
        assert_eq!(Recency::classify(thirty, now()), Recency::Neutral);
        assert_eq!(Recency::classify(year, now()), Recency::Neutral);
        assert_eq!(
            Recency::classify(thirty + Duration::seconds(1), now()),
            Recency::Recent
        );
        assert_eq!(
            Recency::classify(year - Duration::seconds(1), now()),
            Recency::Stale
        );
    }

    #[test]
    fn test_future_is_recent() {
        assert_eq!(Recency::classify(at(2025, 1, 1), now()), Recency::Recent);
    }

    #[test]
    fn test_classify_is_pure() {
        let t = at(2024, 1, 20);
        assert_eq!(Recency::classify(t, now()), Recency::classify(t, now()));
    }

    #[test]
    fn test_styles() {
        assert_eq!(Recency::Recent.style(), Style::bold(Color::Red));
        assert_eq!(Recency::Stale.style(), Style::bold(Color::Blue));
        assert!(Recency::Neutral.style().is_plain());
    }
}
