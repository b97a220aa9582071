//! Day headings inside a monthly note
//!
//! A day heading looks like `### 13일 (목)`: a level-3 heading, the
//! zero-padded day of month, the `일` suffix, and the short weekday name of
//! the configured locale in parentheses.
//!
//! Presence is decided by day number alone. The weekday label is display
//! text, so a heading written under another locale (`### 13일 (Thu)`) still
//! counts as today's heading and no duplicate is appended.

use chrono::{Datelike, NaiveDate, Weekday};
use once_cell::sync::Lazy;
use regex::Regex;
use rust_i18n::t;

/// Prefix shared by every day heading.
pub const HEADING_PREFIX: &str = "### ";

/// Literal suffix following the day number.
pub const DAY_SUFFIX: &str = "일";

/// One heading pattern per day of month, index 0 for day 1.
///
/// Each pattern has its day inlined so a malformed heading for another day
/// cannot consume today's heading as part of its match.
static DAY_HEADINGS: Lazy<Vec<Regex>> = Lazy::new(|| {
    (1..=31)
        .map(|day| {
            Regex::new(&format!(r"(?m)^###\s+{:02}{}\s+\([^)]+\)", day, DAY_SUFFIX))
                .expect("day heading pattern is valid")
        })
        .collect()
});

/// Short weekday label for `locale`, falling back to English.
pub fn weekday_short(weekday: Weekday, locale: &str) -> String {
    let key = match weekday {
        Weekday::Mon => "weekday.short.mon",
        Weekday::Tue => "weekday.short.tue",
        Weekday::Wed => "weekday.short.wed",
        Weekday::Thu => "weekday.short.thu",
        Weekday::Fri => "weekday.short.fri",
        Weekday::Sat => "weekday.short.sat",
        Weekday::Sun => "weekday.short.sun",
    };
    t!(key, locale = locale).into_owned()
}

/// Today's heading, built from a date and a locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayHeading {
    pub day: u32,
    pub weekday_label: String,
}

impl DayHeading {
    pub fn for_date(date: NaiveDate, locale: &str) -> Self {
        Self {
            day: date.day(),
            weekday_label: weekday_short(date.weekday(), locale),
        }
    }

    /// `### DD일 (www)`
    pub fn text(&self) -> String {
        format!(
            "{}{:02}{} ({})",
            HEADING_PREFIX, self.day, DAY_SUFFIX, self.weekday_label
        )
    }

    /// Whether any line of `content` is a heading for this day, whatever its
    /// spacing or weekday label.
    pub fn is_present_in(&self, content: &str) -> bool {
        (self.day as usize)
            .checked_sub(1)
            .and_then(|idx| DAY_HEADINGS.get(idx))
            .is_some_and(|pattern| pattern.is_match(content))
    }

    /// Content with this heading appended, or `None` if it is already present.
    ///
    /// The heading goes on its own line at the end of the document and is
    /// followed by a newline.
    pub fn ensure_in(&self, content: &str) -> Option<String> {
        if self.is_present_in(content) {
            return None;
        }
        let heading = self.text();
        let mut updated = String::with_capacity(content.len() + heading.len() + 2);
        updated.push_str(content);
        if !updated.is_empty() && !updated.ends_with('\n') {
            updated.push('\n');
        }
        updated.push_str(&heading);
        updated.push('\n');
        Some(updated)
    }
}
