//! Rule-based invoice parser turning document text into a field mapping.

use std::time::Instant;

use tracing::{debug, info};

use crate::error::ExtractionError;
use crate::models::fields::{self, FieldMapping};

use super::Result;
use super::rules::{
    INVOICE_NUMBER, INVOICE_NUMBER_STANDALONE, NON_NAME_LINE, Recognized, VENDOR_SECTION,
    extract_dates, extract_total,
};

/// Result of invoice parsing.
#[derive(Debug, Clone)]
pub struct ExtractionResult {
    /// Recognized fields, keyed by source key.
    pub fields: FieldMapping,
    /// Overall confidence (0.0 - 1.0).
    pub confidence: f32,
    /// Extraction warnings.
    pub warnings: Vec<String>,
    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
}

/// Trait for invoice parsing.
pub trait InvoiceParser {
    /// Parse invoice fields from text.
    fn parse(&self, text: &str) -> Result<ExtractionResult>;
}

/// Invoice parser built from regular-expression recognizers.
#[derive(Debug, Clone)]
pub struct RuleBasedParser {
    /// Minimum confidence for accepting fields.
    min_confidence: f32,
}

impl RuleBasedParser {
    /// Create a parser that accepts every recognized field.
    pub fn new() -> Self {
        Self {
            min_confidence: 0.0,
        }
    }

    /// Set minimum confidence threshold.
    pub fn with_min_confidence(mut self, confidence: f32) -> Self {
        self.min_confidence = confidence;
        self
    }

    fn extract_invoice_number(&self, text: &str) -> Option<Recognized<String>> {
        // Try labeled pattern first
        if let Some(m) = INVOICE_NUMBER.captures(text).and_then(|caps| caps.get(1)) {
            let number = m.as_str().trim_end_matches(['.', ',', '-']).to_string();
            if !number.is_empty() {
                return Some(Recognized::new(number, 0.9, m.range()));
            }
        }

        INVOICE_NUMBER_STANDALONE
            .captures(text)
            .and_then(|caps| caps.get(1))
            .map(|m| Recognized::new(m.as_str().to_string(), 0.6, m.range()))
    }

    fn extract_vendor_name(&self, text: &str) -> Option<Recognized<String>> {
        if let Some(caps) = VENDOR_SECTION.captures(text) {
            let inline = caps.get(1).filter(|m| looks_like_name(m.as_str()));
            if let Some(m) = inline {
                return Some(Recognized::new(m.as_str().trim().to_string(), 0.85, m.range()));
            }

            // Name on the line after a bare "From:" header
            let header_end = caps.get(0).map_or(0, |m| m.end());
            if let Some((name, span)) = first_name_line(text, header_end) {
                return Some(Recognized::new(name, 0.85, span));
            }
        }

        // Letterheads usually open with the issuer's name
        first_name_line(text, 0).map(|(name, span)| Recognized::new(name, 0.3, span))
    }

    fn accept<T>(&self, found: Option<Recognized<T>>) -> Option<Recognized<T>> {
        found.filter(|r| r.confidence >= self.min_confidence)
    }
}

impl Default for RuleBasedParser {
    fn default() -> Self {
        Self::new()
    }
}

impl InvoiceParser for RuleBasedParser {
    fn parse(&self, text: &str) -> Result<ExtractionResult> {
        let start = Instant::now();
        let mut warnings = Vec::new();
        let mut fields = FieldMapping::new();

        if text.trim().is_empty() {
            return Err(ExtractionError::NoText);
        }

        info!("Parsing invoice from {} characters of text", text.len());

        let vendor = self.accept(self.extract_vendor_name(text));
        let number = self.accept(self.extract_invoice_number(text));
        let dates = extract_dates(text);
        let issue_date = self.accept(dates.issue_date);
        let due_date = self.accept(dates.due_date);
        let total = self.accept(extract_total(text));

        let mut confidence = 1.0f32;

        match vendor {
            Some(found) => fields.insert(fields::VENDOR_NAME, found.value),
            None => {
                warnings.push("Could not extract vendor name".to_string());
                confidence -= 0.2;
            }
        }

        match number {
            Some(found) => fields.insert(fields::INVOICE_NUMBER, found.value),
            None => {
                warnings.push("Could not extract invoice number".to_string());
                confidence -= 0.2;
            }
        }

        match issue_date {
            Some(found) => fields.insert(
                fields::INVOICE_DATE,
                found.value.format("%Y-%m-%d").to_string(),
            ),
            None => {
                warnings.push("Could not extract invoice date".to_string());
                confidence -= 0.2;
            }
        }

        if let Some(found) = due_date {
            fields.insert(fields::DUE_DATE, found.value.format("%Y-%m-%d").to_string());
        }

        match total {
            Some(found) => fields.insert(fields::TOTAL_AMOUNT, found.value.to_string()),
            None => {
                warnings.push("Could not extract total amount".to_string());
                confidence -= 0.3;
            }
        }

        let confidence = confidence.max(0.0);
        debug!(
            "Extracted {} fields with confidence {:.2}",
            fields.len(),
            confidence
        );

        Ok(ExtractionResult {
            fields,
            confidence,
            warnings,
            processing_time_ms: start.elapsed().as_millis() as u64,
        })
    }
}

/// First line at or after `from` that reads like a company name.
fn first_name_line(text: &str, from: usize) -> Option<(String, std::ops::Range<usize>)> {
    let mut offset = from;
    for line in text[from..].split_inclusive('\n') {
        let line_start = offset;
        offset += line.len();

        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if looks_like_name(trimmed) {
            let lead = line.len() - line.trim_start().len();
            let start = line_start + lead;
            return Some((trimmed.to_string(), start..start + trimmed.len()));
        }
    }
    None
}

fn looks_like_name(line: &str) -> bool {
    let line = line.trim();
    let letters = line.chars().filter(|c| c.is_alphabetic()).count();
    let digits = line.chars().filter(|c| c.is_ascii_digit()).count();

    !line.is_empty()
        && line.len() <= 80
        && letters >= 2
        && digits * 2 < letters
        && !line.contains(':')
        && !line.contains('@')
        && !NON_NAME_LINE.is_match(line)
}
