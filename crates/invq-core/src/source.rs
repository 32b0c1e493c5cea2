//! Document sources: where the bytes of a file reference come from.

use std::path::{Path, PathBuf};

use futures_util::StreamExt;
use tracing::{debug, trace};

use crate::error::ExtractionError;

/// A parsed file reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentSource {
    /// Remote document fetched over HTTP(S).
    Url(String),
    /// Document on the local filesystem.
    Path(PathBuf),
}

impl DocumentSource {
    /// Classify a file reference. `http://` and `https://` references are
    /// downloaded, everything else is a local path. `file://` URLs are
    /// percent-decoded.
    pub fn parse(file_ref: &str) -> Self {
        let trimmed = file_ref.trim();
        let lower = trimmed.to_ascii_lowercase();

        if lower.starts_with("http://") || lower.starts_with("https://") {
            Self::Url(trimmed.to_string())
        } else if lower.starts_with("file://") {
            let path = reqwest::Url::parse(trimmed)
                .ok()
                .and_then(|url| url.to_file_path().ok())
                .unwrap_or_else(|| PathBuf::from(&trimmed["file://".len()..]));
            Self::Path(path)
        } else {
            Self::Path(PathBuf::from(trimmed))
        }
    }

    /// Read the whole document, refusing anything larger than `max_bytes`.
    pub async fn load(
        &self,
        client: &reqwest::Client,
        max_bytes: u64,
    ) -> Result<Vec<u8>, ExtractionError> {
        match self {
            Self::Url(url) => download(client, url, max_bytes).await,
            Self::Path(path) => read_file(path, max_bytes).await,
        }
    }
}

impl std::fmt::Display for DocumentSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Url(url) => f.write_str(url),
            Self::Path(path) => write!(f, "{}", path.display()),
        }
    }
}

async fn download(
    client: &reqwest::Client,
    url: &str,
    max_bytes: u64,
) -> Result<Vec<u8>, ExtractionError> {
    let fetch_error = |source| ExtractionError::Fetch {
        url: url.to_string(),
        source,
    };

    let response = client.get(url).send().await.map_err(fetch_error)?;

    if !response.status().is_success() {
        return Err(ExtractionError::HttpStatus {
            url: url.to_string(),
            status: response.status().as_u16(),
        });
    }

    if let Some(size) = response.content_length() {
        if size > max_bytes {
            return Err(ExtractionError::TooLarge {
                size,
                limit: max_bytes,
            });
        }
    }

    // Content-Length is advisory; the cap also applies while streaming
    let mut data = Vec::new();
    let mut stream = response.bytes_stream();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(fetch_error)?;
        let size = (data.len() + chunk.len()) as u64;
        if size > max_bytes {
            return Err(ExtractionError::TooLarge {
                size,
                limit: max_bytes,
            });
        }
        data.extend_from_slice(&chunk);
        trace!("Downloaded {} bytes from {}", data.len(), url);
    }

    debug!("Downloaded {} ({} bytes)", url, data.len());
    Ok(data)
}

async fn read_file(path: &Path, max_bytes: u64) -> Result<Vec<u8>, ExtractionError> {
    let read_error = |source| ExtractionError::Read {
        path: path.display().to_string(),
        source,
    };

    let metadata = tokio::fs::metadata(path).await.map_err(read_error)?;
    if metadata.len() > max_bytes {
        return Err(ExtractionError::TooLarge {
            size: metadata.len(),
            limit: max_bytes,
        });
    }

    let data = tokio::fs::read(path).await.map_err(read_error)?;
    debug!("Read {} ({} bytes)", path.display(), data.len());
    Ok(data)
}
