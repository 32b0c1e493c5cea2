//! Invoice record created in the datastore for each processed document.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::fields::{self, FieldMapping};
use crate::error::FieldError;

/// Vendor name used when extraction did not find one.
pub const UNKNOWN_VENDOR: &str = "Unknown Vendor";

/// An invoice row as inserted into the datastore and echoed to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceRecord {
    /// Owner of the invoice.
    pub user_id: String,

    /// Issuer of the invoice.
    pub vendor_name: String,

    /// Invoice number/identifier, empty when unknown.
    pub invoice_number: String,

    /// Issue date as found in the document, or the processing time.
    pub invoice_date: String,

    /// Payment due date. Serialized as `null` when unknown.
    pub due_date: Option<String>,

    /// Total amount.
    pub amount: f64,

    /// Review status.
    pub status: InvoiceStatus,
}

/// Review status of an invoice record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceStatus {
    /// Created and awaiting review.
    #[default]
    Pending,
}

impl InvoiceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
        }
    }
}

impl InvoiceRecord {
    /// Build a record from extracted fields, filling in defaults for
    /// anything the extractor did not provide.
    ///
    /// `now` supplies the issue date when the document has none.
    pub fn from_fields(
        user_id: impl Into<String>,
        fields: &FieldMapping,
        now: DateTime<Utc>,
    ) -> Result<Self, FieldError> {
        let amount = coerce_amount(fields::TOTAL_AMOUNT, fields.get(fields::TOTAL_AMOUNT))?;

        Ok(Self {
            user_id: user_id.into(),
            vendor_name: fields
                .text(fields::VENDOR_NAME)
                .unwrap_or_else(|| UNKNOWN_VENDOR.to_string()),
            invoice_number: fields.text(fields::INVOICE_NUMBER).unwrap_or_default(),
            invoice_date: fields
                .text(fields::INVOICE_DATE)
                .unwrap_or_else(|| now.to_rfc3339_opts(SecondsFormat::Micros, true)),
            due_date: fields.text(fields::DUE_DATE),
            amount,
            status: InvoiceStatus::Pending,
        })
    }
}

/// Coerce a raw field value to a finite `f64`. Absent values become `0.0`.
pub fn coerce_amount(field: &str, value: Option<&Value>) -> Result<f64, FieldError> {
    let Some(raw) = value else {
        return Ok(0.0);
    };

    let amount = match raw {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    };

    amount
        .filter(|a| a.is_finite())
        .ok_or_else(|| FieldError::NotANumber {
            field: field.to_string(),
            value: raw.to_string(),
        })
}
