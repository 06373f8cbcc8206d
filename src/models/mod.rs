//! Data models for the catalog

pub mod author;
pub mod book;
pub mod book_instance;
pub mod genre;

use chrono::NaiveDate;

// Re-export commonly used types
pub use author::{Author, AuthorData, AuthorForm};
pub use book::{Book, BookData, BookForm};
pub use book_instance::{BookInstance, BookInstanceData, BookInstanceForm, BookInstanceStatus};
pub use genre::{Genre, GenreData, GenreForm};

/// URL prefix under which every catalog page is mounted
pub const CATALOG_PREFIX: &str = "/catalog";

/// Formats a date the way catalog pages display it, e.g. `Jan 3, 1892`
pub fn format_date(date: &NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// Formats an optional date as an `<input type="date">` value
pub(crate) fn date_input(date: &Option<NaiveDate>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_date() {
        let date = NaiveDate::from_ymd_opt(1892, 1, 3).unwrap();
        assert_eq!(format_date(&date), "Jan 3, 1892");
        assert_eq!(date_input(&Some(date)), "1892-01-03");
        assert_eq!(date_input(&None), "");
    }
}
