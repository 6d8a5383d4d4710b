//! HTTP client for the explainer API

use std::path::{Path, PathBuf};
use std::time::Duration;

use reqwest::multipart::{Form, Part};
use reqwest::Response;
use serde::de::DeserializeOwned;
use shared_types::{
    ChatRequest, ChatResponse, DocumentInfo, ErrorBody, HealthResponse, UploadResponse,
};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Could not reach the server: {0}")]
    Http(#[from] reqwest::Error),

    /// `message` is the server's human-readable error when it sent one
    #[error("{message}")]
    Server {
        status: u16,
        code: Option<String>,
        message: String,
    },

    #[error("Could not read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// `base_url` like `http://localhost:8000`; a trailing slash is ignored
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn health(&self) -> Result<HealthResponse, ClientError> {
        let resp = self.client.get(self.url("/health")).send().await?;
        decode(resp).await
    }

    /// Read a PDF from disk and upload it for analysis
    pub async fn upload(&self, path: &Path) -> Result<UploadResponse, ClientError> {
        let bytes = tokio::fs::read(path).await.map_err(|source| ClientError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "document.pdf".to_string());

        self.upload_bytes(&filename, bytes).await
    }

    pub async fn upload_bytes(
        &self,
        filename: &str,
        bytes: Vec<u8>,
    ) -> Result<UploadResponse, ClientError> {
        info!(%filename, size = bytes.len(), "uploading document");
        let part = Part::bytes(bytes)
            .file_name(filename.to_string())
            .mime_str("application/pdf")?;
        let form = Form::new().part("file", part);

        let resp = self
            .client
            .post(self.url("/upload-document"))
            .multipart(form)
            .send()
            .await?;
        decode(resp).await
    }

    pub async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse, ClientError> {
        debug!(document_id = %request.document_id, "sending chat message");
        let resp = self
            .client
            .post(self.url("/chat"))
            .json(request)
            .send()
            .await?;
        decode(resp).await
    }

    pub async fn document_info(&self, document_id: &str) -> Result<DocumentInfo, ClientError> {
        let resp = self
            .client
            .get(self.url(&format!("/document/{document_id}")))
            .send()
            .await?;
        decode(resp).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Deserialize a success body, or turn an error status into
/// [`ClientError::Server`] using the server's `{error, code}` body when present
async fn decode<T: DeserializeOwned>(resp: Response) -> Result<T, ClientError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp.json().await?);
    }

    let body = resp.text().await.unwrap_or_default();
    let (code, message) = match serde_json::from_str::<ErrorBody>(&body) {
        Ok(error) => (Some(error.code), error.error),
        Err(_) if body.trim().is_empty() => (None, format!("Server returned {status}")),
        Err(_) => (None, body.trim().to_string()),
    };

    Err(ClientError::Server {
        status: status.as_u16(),
        code,
        message,
    })
}
