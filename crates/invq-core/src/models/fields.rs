//! Structured field mapping produced by document extraction.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Source key for the vendor (issuer) name.
pub const VENDOR_NAME: &str = "vendor_name";
/// Source key for the invoice number.
pub const INVOICE_NUMBER: &str = "invoice_number";
/// Source key for the issue date.
pub const INVOICE_DATE: &str = "invoice_date";
/// Source key for the payment due date.
pub const DUE_DATE: &str = "due_date";
/// Source key for the total amount.
pub const TOTAL_AMOUNT: &str = "total_amount";

/// Fields extracted from a document, keyed by source key.
///
/// Values are kept as raw JSON so that whatever an extractor produced
/// (strings, numbers, nulls) reaches the record builder untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldMapping(Map<String, Value>);

impl FieldMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field, replacing any previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    /// Builder-style variant of [`FieldMapping::insert`].
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Raw value of a field. An explicit JSON `null` is reported as absent.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key).filter(|v| !v.is_null())
    }

    /// Field rendered as text. Strings are returned verbatim, scalars are
    /// formatted, and nulls, arrays and objects count as absent.
    pub fn text(&self, key: &str) -> Option<String> {
        match self.get(key)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    /// Whether the field is present and not null.
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Map<String, Value>> for FieldMapping {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}
