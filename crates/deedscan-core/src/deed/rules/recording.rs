//! Recording date extraction.

use chrono::NaiveDate;

use super::patterns::{BOOK_PAGE_DATE, RECORDING_DATE};

/// Extract the date the deed was recorded ("Recorded 03/15/2019" or
/// "Book 123 Page 45 on 03/15/2019").
pub fn extract_recording_date(text: &str) -> Option<NaiveDate> {
    [&*RECORDING_DATE, &*BOOK_PAGE_DATE].into_iter().find_map(|pattern| {
        let caps = pattern.captures(text)?;
        parse_recording_date(caps.get(1)?.as_str())
    })
}

/// Parse a US-style `MM/DD/YYYY`, `MM-DD-YYYY` or `MM/DD/YY` date.
pub fn parse_recording_date(raw: &str) -> Option<NaiveDate> {
    let normalized = raw.trim().replace('-', "/");
    let year = normalized.rsplit('/').next()?;
    let format = if year.len() == 2 { "%m/%d/%y" } else { "%m/%d/%Y" };

    NaiveDate::parse_from_str(&normalized, format).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn date(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(y, m, d)
    }

    #[test]
    fn test_recorded_label() {
        assert_eq!(extract_recording_date("Recorded 03/15/2019 at 8:00 AM"), date(2019, 3, 15));
        assert_eq!(extract_recording_date("RECORDING DATE: 11-02-2020"), date(2020, 11, 2));
    }

    #[test]
    fn test_book_page_phrasing() {
        let text = "recorded in Book 5120 Page 77 on 07/04/2001, Official Records";
        assert_eq!(extract_recording_date(text), date(2001, 7, 4));
    }

    #[test]
    fn test_two_digit_year() {
        assert_eq!(parse_recording_date("01/02/05"), date(2005, 1, 2));
    }

    #[test]
    fn test_invalid_dates() {
        assert_eq!(parse_recording_date("13/45/2019"), None);
        assert_eq!(extract_recording_date("no date here"), None);
        assert_eq!(extract_recording_date(""), None);
    }
}
