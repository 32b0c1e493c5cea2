//! Rule-based field recognizers for invoice text.
//!
//! Each recognizer works on the plain text produced by PDF extraction and
//! reports what it found together with a rough confidence, so the parser can
//! prefer labeled values ("Invoice Date: ...") over unlabeled guesses.

pub mod amounts;
pub mod dates;
pub mod patterns;

use std::ops::Range;

pub use amounts::{AmountExtractor, extract_total, parse_amount};
pub use dates::{DateExtractor, InvoiceDates, extract_dates};
pub use patterns::*;

/// A recognizer for one kind of value.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// First occurrence in `text`, if any.
    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    /// Every occurrence in `text`, in document order.
    fn extract_all(&self, text: &str) -> Vec<Self::Output>;
}

/// A recognized value and where it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct Recognized<T> {
    pub value: T,
    /// 0.0 - 1.0; labeled matches score higher than bare ones.
    pub confidence: f32,
    /// Byte range of the match in the searched text.
    pub span: Range<usize>,
}

impl<T> Recognized<T> {
    pub fn new(value: T, confidence: f32, span: Range<usize>) -> Self {
        Self {
            value,
            confidence,
            span,
        }
    }
}
