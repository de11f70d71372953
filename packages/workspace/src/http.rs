use crate::api::{LoadResponse, SaveResponse};
use crate::backend::{validate_store_id, DesignBackend};
use crate::error::GatewayError;
use async_trait::async_trait;
use reqwest::StatusCode;
use std::time::Duration;
use storefront_editor::DesignDocument;

/// Upper bound on one request, connect through body
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Talks to a design server over `GET`/`POST /design/{storeId}`
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: reqwest::Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(base_url: impl Into<String>) -> Result<Self, GatewayError> {
        Self::with_timeout(base_url, DEFAULT_REQUEST_TIMEOUT)
    }

    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, base_url))
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn design_url(&self, store_id: &str) -> Result<String, GatewayError> {
        validate_store_id(store_id)?;
        Ok(format!("{}/design/{}", self.base_url, store_id))
    }
}

/// Prefer the envelope's error message over the bare status line
fn status_error(status: StatusCode, body: &str) -> GatewayError {
    let message = serde_json::from_str::<SaveResponse>(body)
        .ok()
        .and_then(|r| r.error)
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("request failed").to_string());

    GatewayError::Status {
        status: status.as_u16(),
        message,
    }
}

#[async_trait]
impl DesignBackend for HttpBackend {
    async fn fetch(&self, store_id: &str) -> Result<Option<DesignDocument>, GatewayError> {
        let url = self.design_url(store_id)?;
        tracing::debug!(%url, "fetching design");

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let body = response.text().await?;
        if !status.is_success() {
            return Err(status_error(status, &body));
        }

        let envelope: LoadResponse = serde_json::from_str(&body)?;
        if !envelope.success {
            return Err(GatewayError::Rejected(
                envelope.error.unwrap_or_else(|| "unknown error".into()),
            ));
        }
        Ok(envelope.data)
    }

    async fn persist(&self, store_id: &str, document: &DesignDocument) -> Result<(), GatewayError> {
        let url = self.design_url(store_id)?;
        tracing::debug!(%url, sections = document.layout.len(), "persisting design");

        let response = self.client.post(&url).json(document).send().await?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(status_error(status, &body));
        }

        let envelope: SaveResponse = serde_json::from_str(&body)?;
        if envelope.success {
            Ok(())
        } else {
            Err(GatewayError::Rejected(
                envelope.error.unwrap_or_else(|| "unknown error".into()),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_design_url() {
        let backend = HttpBackend::new("http://localhost:3030/api/").unwrap();
        assert_eq!(backend.base_url(), "http://localhost:3030/api");
        assert_eq!(
            backend.design_url("shop-1").unwrap(),
            "http://localhost:3030/api/design/shop-1"
        );
        assert!(backend.design_url("../admin").is_err());
    }

    #[test]
    fn test_status_error_uses_envelope_message() {
        let err = status_error(
            StatusCode::BAD_REQUEST,
            r#"{"success":false,"error":"layout must be a list"}"#,
        );
        match err {
            GatewayError::Status { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "layout must be a list");
            }
            other => panic!("Expected status error, got {:?}", other),
        }

        let err = status_error(StatusCode::BAD_GATEWAY, "<html>");
        assert!(err.to_string().contains("Bad Gateway"));
    }
}
