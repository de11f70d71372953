//! Wire envelopes shared by the HTTP backend and the design server

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use storefront_editor::DesignDocument;

/// Response to `GET /design/{storeId}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<DesignDocument>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl LoadResponse {
    pub fn found(document: DesignDocument) -> Self {
        Self {
            success: true,
            data: Some(document),
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
        }
    }
}

/// Response to `POST /design/{storeId}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SaveResponse {
    pub fn ok() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
        }
    }
}

/// Broadcast to `/design/{storeId}/events` subscribers after each save
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignSavedEvent {
    pub store_id: String,
    pub section_count: usize,
    pub saved_at: DateTime<Utc>,
}
