//! REST gateway to the invoice datastore.
//!
//! Three operations, each one HTTP request against a PostgREST-style API:
//! queue item status, attachment status and invoice insert. Every call
//! reports a plain success flag; transport failures are errors.
//!
//! # Example
//!
//! ```rust,ignore
//! use invq_datastore::{Datastore, DatastoreConfig, ProcessingStatus, RestDatastore};
//!
//! let datastore = RestDatastore::new(DatastoreConfig::from_env()?);
//! datastore
//!     .update_queue_status("q-1", ProcessingStatus::Processing, None)
//!     .await?;
//! ```

pub mod config;
pub mod error;
pub mod types;

pub use config::DatastoreConfig;
pub use error::{DatastoreError, Result};
pub use types::{AttachmentStatusUpdate, ProcessingStatus, QueueStatusUpdate};

use async_trait::async_trait;
use invq_core::InvoiceRecord;
use reqwest::StatusCode;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use tracing::debug;

const QUEUE_TABLE: &str = "processing_queue";
const ATTACHMENTS_TABLE: &str = "email_attachments";
const INVOICES_TABLE: &str = "invoices";

/// Write access to the records touched while processing a document.
#[async_trait]
pub trait Datastore: Send + Sync {
    /// Set `status` and `error_message` on a queue item. `Ok(true)` on HTTP 200.
    async fn update_queue_status(
        &self,
        item_id: &str,
        status: ProcessingStatus,
        error_message: Option<&str>,
    ) -> Result<bool>;

    /// Set the processing status of an attachment. `Ok(true)` on HTTP 200.
    async fn update_attachment_status(
        &self,
        attachment_id: &str,
        status: ProcessingStatus,
        error: Option<&str>,
    ) -> Result<bool>;

    /// Insert an invoice record. `Ok(true)` on HTTP 201.
    async fn create_invoice(&self, invoice: &InvoiceRecord) -> Result<bool>;
}

/// [`Datastore`] over the datastore's REST interface.
#[derive(Debug, Clone)]
pub struct RestDatastore {
    config: DatastoreConfig,
}

impl RestDatastore {
    pub fn new(config: DatastoreConfig) -> Self {
        Self { config }
    }

    /// A client carrying the authentication headers. Built per call and
    /// dropped when the call returns.
    fn client(&self) -> Result<reqwest::Client> {
        let key = self.config.service_role_key();

        let mut headers = HeaderMap::new();
        headers.insert("apikey", HeaderValue::from_str(key)?);
        headers.insert(AUTHORIZATION, HeaderValue::from_str(&format!("Bearer {}", key))?);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(DatastoreError::Client)
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.config.url(), table)
    }

    async fn patch_by_id<T: serde::Serialize + Sync>(
        &self,
        table: &str,
        id: &str,
        body: &T,
    ) -> Result<bool> {
        let client = self.client()?;
        let body = serde_json::to_vec(body)?;

        let response = client
            .patch(self.table_url(table))
            .query(&[("id", format!("eq.{}", id))])
            .body(body)
            .send()
            .await?;

        expect_status(response, StatusCode::OK, table).await
    }
}

#[async_trait]
impl Datastore for RestDatastore {
    async fn update_queue_status(
        &self,
        item_id: &str,
        status: ProcessingStatus,
        error_message: Option<&str>,
    ) -> Result<bool> {
        debug!(item_id, %status, "Updating queue item");
        let update = QueueStatusUpdate::new(status, error_message.map(str::to_string));
        self.patch_by_id(QUEUE_TABLE, item_id, &update).await
    }

    async fn update_attachment_status(
        &self,
        attachment_id: &str,
        status: ProcessingStatus,
        error: Option<&str>,
    ) -> Result<bool> {
        debug!(attachment_id, %status, "Updating attachment");
        let update = AttachmentStatusUpdate::new(status, error.map(str::to_string));
        self.patch_by_id(ATTACHMENTS_TABLE, attachment_id, &update).await
    }

    async fn create_invoice(&self, invoice: &InvoiceRecord) -> Result<bool> {
        debug!(user_id = %invoice.user_id, "Creating invoice");
        let client = self.client()?;
        let body = serde_json::to_vec(invoice)?;

        let response = client
            .post(self.table_url(INVOICES_TABLE))
            .body(body)
            .send()
            .await?;

        expect_status(response, StatusCode::CREATED, INVOICES_TABLE).await
    }
}

async fn expect_status(
    response: reqwest::Response,
    expected: StatusCode,
    table: &str,
) -> Result<bool> {
    let status = response.status();
    if status == expected {
        return Ok(true);
    }

    let body = response.text().await.unwrap_or_default();
    debug!(table, status = status.as_u16(), body = %body, "Unexpected datastore response");
    Ok(false)
}
