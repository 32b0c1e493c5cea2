//! Amount recognition for invoice totals.

use rust_decimal::Decimal;
use std::str::FromStr;

use super::patterns::{AMOUNT_PATTERN, TOTAL_AMOUNT};
use super::{FieldExtractor, Recognized};

/// Recognizes every money-looking amount in a text.
pub struct AmountExtractor;

impl AmountExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for AmountExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for AmountExtractor {
    type Output = Recognized<Decimal>;

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        AMOUNT_PATTERN
            .find_iter(text)
            .filter(|m| !continues_as_date(&text[m.end()..]))
            .filter_map(|m| {
                parse_amount(m.as_str()).map(|amount| Recognized::new(amount, 0.4, m.range()))
            })
            .collect()
    }
}

/// "15.01" in "15.01.2024" is part of a date, not an amount.
fn continues_as_date(rest: &str) -> bool {
    let mut chars = rest.chars();
    matches!(
        (chars.next(), chars.next()),
        (Some('.' | '/' | '-'), Some(c)) if c.is_ascii_digit()
    )
}

/// Specificity of a total label; lower wins.
fn label_rank(label: &str) -> u8 {
    let label = label
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase();

    match label.as_str() {
        "amount due" | "balance due" | "total due" | "amount payable" => 0,
        l if l.ends_with("do zapłaty") || l.ends_with("do zaplaty") => 0,
        "grand total" | "invoice total" | "total amount" => 1,
        _ => 2,
    }
}

/// Find the invoice total.
///
/// Labeled totals win over bare amounts. Among labeled totals the most
/// specific label wins ("Amount due" over "Total"), and among equally specific
/// labels the last one in the document wins, since summaries sit at the bottom.
/// Without any label the largest amount in the text is used.
pub fn extract_total(text: &str) -> Option<Recognized<Decimal>> {
    let labeled = TOTAL_AMOUNT
        .captures_iter(text)
        .filter_map(|caps| {
            let label = caps.get(1)?;
            let amount = caps.get(2)?;
            let value = parse_amount(amount.as_str())?;
            Some((label_rank(label.as_str()), Recognized::new(value, 0.9, amount.range())))
        })
        .min_by(|(rank_a, a), (rank_b, b)| {
            rank_a
                .cmp(rank_b)
                .then_with(|| b.span.start.cmp(&a.span.start))
        })
        .map(|(_, found)| found);

    labeled.or_else(|| {
        AmountExtractor::new()
            .extract_all(text)
            .into_iter()
            .max_by(|a, b| a.value.cmp(&b.value))
    })
}

/// Parse an amount written with either separator convention
/// ("1 234,56", "1,234.56", "1.234,56", "42.50").
///
/// The last separator is the decimal point unless exactly three digits
/// follow it, in which case every separator groups thousands.
pub fn parse_amount(s: &str) -> Option<Decimal> {
    let negative = s.trim_start().starts_with('-');
    let cleaned: String = s
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == ',' || *c == '.')
        .collect();

    if !cleaned.chars().any(|c| c.is_ascii_digit()) {
        return None;
    }

    let digits_only = |part: &str| -> String { part.chars().filter(char::is_ascii_digit).collect() };

    let normalized = match cleaned.rfind([',', '.']) {
        Some(pos) if cleaned.len() - pos - 1 != 3 => {
            let integer = digits_only(&cleaned[..pos]);
            let fraction = &cleaned[pos + 1..];
            let integer = if integer.is_empty() { "0".to_string() } else { integer };
            if fraction.is_empty() {
                integer
            } else {
                format!("{}.{}", integer, fraction)
            }
        }
        _ => digits_only(&cleaned),
    };

    let amount = Decimal::from_str(&normalized).ok()?;
    Some(if negative { -amount } else { amount })
}
