//! Common regex patterns for invoice field recognition.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Numeric dates
    pub static ref DATE_DMY: Regex = Regex::new(
        r"\b(\d{1,2})[./\-](\d{1,2})[./\-](\d{4}|\d{2})\b"
    ).unwrap();

    pub static ref DATE_YMD: Regex = Regex::new(
        r"\b(\d{4})[./\-](\d{1,2})[./\-](\d{1,2})\b"
    ).unwrap();

    // "15 January 2024", "15th Jan. 2024"
    pub static ref DATE_LONG_DMY: Regex = Regex::new(
        r"(?i)\b(\d{1,2})(?:st|nd|rd|th)?\s+(jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]*\.?,?\s+(\d{4})\b"
    ).unwrap();

    // "January 15, 2024", "Jan 15 2024"
    pub static ref DATE_LONG_MDY: Regex = Regex::new(
        r"(?i)\b(jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]*\.?\s+(\d{1,2})(?:st|nd|rd|th)?,?\s+(\d{4})\b"
    ).unwrap();

    // Labeled dates
    pub static ref ISSUE_DATE: Regex = Regex::new(
        r"(?i)(?:invoice\s+date|date\s+of\s+issue|issue\s+date|date\s+issued|issued\s+on|data\s+wystawienia)[\s:]*(.+?)(?:\n|$)"
    ).unwrap();

    pub static ref DUE_DATE: Regex = Regex::new(
        r"(?i)(?:due\s+date|payment\s+due|due\s+by|due\s+on|pay\s+by|termin\s+p[łl]atno[śs]ci)[\s:]*(.+?)(?:\n|$)"
    ).unwrap();

    // Amounts with either separator style: 1,234.56 / 1.234,56 / 1 234,56 / 42.50.
    // Digit groups never span a line break.
    pub static ref AMOUNT_PATTERN: Regex = Regex::new(
        r"\d{1,3}(?:[,. \u{00a0}]?\d{3})*[,.]\d{2}\b"
    ).unwrap();

    // Labeled totals on a single line; group 1 is the label, group 2 the amount
    pub static ref TOTAL_AMOUNT: Regex = Regex::new(
        r"(?i)\b(amount\s+due|balance\s+due|total\s+due|grand\s+total|invoice\s+total|total\s+amount|amount\s+payable|razem\s+do\s+zap[łl]aty|do\s+zap[łl]aty|total)[ \t]*(?:\([^)\n]*\))?[ \t:]*(?:USD|EUR|GBP|PLN|CHF|CAD|AUD|zł|[$€£])?[ \t]*(\d{1,3}(?:[,. \u{00a0}]?\d{3})*[,.]\d{2})\b"
    ).unwrap();

    // Invoice number patterns
    pub static ref INVOICE_NUMBER: Regex = Regex::new(
        r"(?i)(?:invoice\s*(?:number|num\b\.?|no\b\.?|#)|inv\.?\s*#|faktura\s+(?:vat\s+)?(?:nr|numer))[\s:#]*([A-Za-z0-9][A-Za-z0-9/\-_.]*)"
    ).unwrap();

    pub static ref INVOICE_NUMBER_STANDALONE: Regex = Regex::new(
        r"\b((?:INV|FV)[\-/]?\d[A-Za-z0-9/\-]*)"
    ).unwrap();

    // Vendor section headers; group 1 holds anything on the same line
    pub static ref VENDOR_SECTION: Regex = Regex::new(
        r"(?im)^\s*(?:bill\s+from|sold\s+by|from|vendor|seller|supplier|issued\s+by|sprzedawca|wystawca)\b[ \t]*:?[ \t]*(.*)$"
    ).unwrap();

    // Lines that are labels or boilerplate rather than names
    pub static ref NON_NAME_LINE: Regex = Regex::new(
        r"(?i)^(?:invoice|tax\s+invoice|faktura|bill\s+to|ship\s+to|buyer|customer|nabywca|page\s+\d|date|due|total|amount)\b"
    ).unwrap();
}
