//! Date recognition for invoices.

use chrono::NaiveDate;

use super::patterns::{DATE_DMY, DATE_LONG_DMY, DATE_LONG_MDY, DATE_YMD, DUE_DATE, ISSUE_DATE};
use super::{FieldExtractor, Recognized};

/// Date field extractor.
pub struct DateExtractor;

impl DateExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DateExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for DateExtractor {
    type Output = Recognized<NaiveDate>;

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        let mut results: Vec<Self::Output> = Vec::new();
        let mut push = |date: Option<NaiveDate>, confidence: f32, span: std::ops::Range<usize>| {
            let Some(date) = date else { return };
            let overlaps = results
                .iter()
                .any(|r| r.span.start < span.end && span.start < r.span.end);
            if !overlaps {
                results.push(Recognized::new(date, confidence, span));
            }
        };

        // Later patterns skip spans an earlier one already claimed
        for caps in DATE_YMD.captures_iter(text) {
            let year: i32 = caps[1].parse().unwrap_or(0);
            let month: u32 = caps[2].parse().unwrap_or(0);
            let day: u32 = caps[3].parse().unwrap_or(0);
            push(NaiveDate::from_ymd_opt(year, month, day), 0.9, caps.get(0).map_or(0..0, |m| m.range()));
        }

        // DD.MM.YYYY, falling back to MM/DD/YYYY when the month would be out of range
        for caps in DATE_DMY.captures_iter(text) {
            let first: u32 = caps[1].parse().unwrap_or(0);
            let second: u32 = caps[2].parse().unwrap_or(0);
            let year = parse_year(&caps[3]);
            let date = NaiveDate::from_ymd_opt(year, second, first)
                .or_else(|| NaiveDate::from_ymd_opt(year, first, second));
            push(date, 0.8, caps.get(0).map_or(0..0, |m| m.range()));
        }

        for caps in DATE_LONG_DMY.captures_iter(text) {
            let day: u32 = caps[1].parse().unwrap_or(0);
            let year: i32 = caps[3].parse().unwrap_or(0);
            let date = month_number(&caps[2]).and_then(|m| NaiveDate::from_ymd_opt(year, m, day));
            push(date, 0.95, caps.get(0).map_or(0..0, |m| m.range()));
        }

        for caps in DATE_LONG_MDY.captures_iter(text) {
            let day: u32 = caps[2].parse().unwrap_or(0);
            let year: i32 = caps[3].parse().unwrap_or(0);
            let date = month_number(&caps[1]).and_then(|m| NaiveDate::from_ymd_opt(year, m, day));
            push(date, 0.95, caps.get(0).map_or(0..0, |m| m.range()));
        }

        results.sort_by_key(|r| r.span.start);
        results
    }
}

/// Dates found on an invoice.
#[derive(Debug, Clone, Default)]
pub struct InvoiceDates {
    /// Issue date.
    pub issue_date: Option<Recognized<NaiveDate>>,
    /// Payment due date.
    pub due_date: Option<Recognized<NaiveDate>>,
}

/// Extract the issue and due dates from invoice text.
///
/// Labeled dates are preferred. When no issue date is labeled, the first date
/// in the document that is not the due date is used instead.
pub fn extract_dates(text: &str) -> InvoiceDates {
    let mut result = InvoiceDates::default();
    let extractor = DateExtractor::new();

    let labeled = |pattern: &regex::Regex| {
        pattern.captures_iter(text).find_map(|caps| {
            let value = caps.get(1)?;
            extractor.extract(value.as_str()).map(|found| {
                let start = value.start() + found.span.start;
                let end = value.start() + found.span.end;
                Recognized::new(found.value, 0.95, start..end)
            })
        })
    };

    result.issue_date = labeled(&*ISSUE_DATE);
    result.due_date = labeled(&*DUE_DATE);

    if result.issue_date.is_none() {
        let due_span = result.due_date.as_ref().map(|d| d.span.clone());
        result.issue_date = extractor
            .extract_all(text)
            .into_iter()
            .find(|d| Some(&d.span) != due_span.as_ref())
            .map(|d| Recognized::new(d.value, 0.5, d.span));
    }

    result
}

fn parse_year(s: &str) -> i32 {
    let year: i32 = s.parse().unwrap_or(0);
    if year < 100 {
        // Two-digit year: assume 2000s for 00-50, 1900s for 51-99
        if year <= 50 { 2000 + year } else { 1900 + year }
    } else {
        year
    }
}

fn month_number(name: &str) -> Option<u32> {
    let prefix: String = name.chars().take(3).collect::<String>().to_lowercase();
    let month = match prefix.as_str() {
        "jan" => 1,
        "feb" => 2,
        "mar" => 3,
        "apr" => 4,
        "may" => 5,
        "jun" => 6,
        "jul" => 7,
        "aug" => 8,
        "sep" => 9,
        "oct" => 10,
        "nov" => 11,
        "dec" => 12,
        _ => return None,
    };
    Some(month)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_extract_date_dmy() {
        let result = DateExtractor::new().extract("15.01.2024");
        assert_eq!(result.unwrap().value, ymd(2024, 1, 15));
    }

    #[test]
    fn test_extract_date_mdy_fallback() {
        let result = DateExtractor::new().extract("01/31/2024");
        assert_eq!(result.unwrap().value, ymd(2024, 1, 31));
    }

    #[test]
    fn test_extract_date_ymd() {
        let result = DateExtractor::new().extract("2024-01-15");
        assert_eq!(result.unwrap().value, ymd(2024, 1, 15));
    }

    #[test]
    fn test_extract_long_dates() {
        let extractor = DateExtractor::new();

        assert_eq!(extractor.extract("15 January 2024").unwrap().value, ymd(2024, 1, 15));
        assert_eq!(extractor.extract("March 3rd, 2024").unwrap().value, ymd(2024, 3, 3));
        assert_eq!(extractor.extract("Sept. 9, 2024").unwrap().value, ymd(2024, 9, 9));
    }

    #[test]
    fn test_two_digit_year() {
        let result = DateExtractor::new().extract("15.01.24");
        assert_eq!(result.unwrap().value, ymd(2024, 1, 15));
    }

    #[test]
    fn test_invalid_dates_ignored() {
        assert!(DateExtractor::new().extract("31.31.2024").is_none());
        assert!(DateExtractor::new().extract("no dates here").is_none());
    }

    #[test]
    fn test_extract_labeled_dates() {
        let text = "Invoice INV-7\nDue Date: 2024-02-14\nInvoice Date: 15/01/2024\n";

        let dates = extract_dates(text);
        assert_eq!(dates.issue_date.unwrap().value, ymd(2024, 1, 15));
        assert_eq!(dates.due_date.unwrap().value, ymd(2024, 2, 14));
    }

    #[test]
    fn test_unlabeled_issue_date_skips_due_date() {
        let text = "Payment due: 2024-02-14\nShipped 2024-01-20\n";

        let dates = extract_dates(text);
        assert_eq!(dates.due_date.unwrap().value, ymd(2024, 2, 14));
        let issue = dates.issue_date.unwrap();
        assert_eq!(issue.value, ymd(2024, 1, 20));
        assert!(issue.confidence < 0.9);
    }

    #[test]
    fn test_due_label_without_date() {
        let dates = extract_dates("Payment due: upon receipt\n");
        assert!(dates.due_date.is_none());
        assert!(dates.issue_date.is_none());
    }
}
