//! Request bodies for the datastore tables.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Processing status shared by queue items and attachments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProcessingStatus {
    Processing,
    Completed,
    Error,
}

impl ProcessingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Processing => "processing",
            Self::Completed => "completed",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for ProcessingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Partial update of a `processing_queue` row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueueStatusUpdate {
    pub status: ProcessingStatus,
    /// Sent as `null` when absent, clearing any earlier message.
    pub error_message: Option<String>,
}

impl QueueStatusUpdate {
    pub fn new(status: ProcessingStatus, error_message: Option<String>) -> Self {
        Self {
            status,
            error_message,
        }
    }
}

/// Partial update of an `email_attachments` row.
///
/// `processed` is derived from the status and cannot be set on its own, so an
/// attachment is marked processed exactly when its status is `completed`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttachmentStatusUpdate {
    processing_status: ProcessingStatus,
    processing_error: Option<String>,
    processed: bool,
}

impl AttachmentStatusUpdate {
    pub fn new(status: ProcessingStatus, error: Option<String>) -> Self {
        Self {
            processing_status: status,
            processing_error: error,
            processed: status == ProcessingStatus::Completed,
        }
    }

    pub fn processing_status(&self) -> ProcessingStatus {
        self.processing_status
    }

    pub fn processing_error(&self) -> Option<&str> {
        self.processing_error.as_deref()
    }

    pub fn processed(&self) -> bool {
        self.processed
    }
}
