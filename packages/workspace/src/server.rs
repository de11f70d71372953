//! HTTP design API
//!
//! - `GET  /design/{storeId}`        → `{ success, data: { layout, globalSettings } }`
//! - `POST /design/{storeId}`        → `{ success }`, body is a design document
//! - `GET  /design/{storeId}/events` → SSE stream of `design-saved` events

use crate::api::{DesignSavedEvent, LoadResponse, SaveResponse};
use crate::backend::{validate_store_id, DesignBackend};
use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::sse::{Event, KeepAlive, Sse},
    routing::get,
    Json, Router,
};
use futures::stream::{self, Stream};
use std::convert::Infallible;
use std::sync::Arc;
use std::time::Duration;
use storefront_editor::DesignDocument;
use tokio::sync::broadcast;

const EVENT_CHANNEL_CAPACITY: usize = 100;

pub struct DesignServer {
    backend: Arc<dyn DesignBackend>,
    events: broadcast::Sender<DesignSavedEvent>,
}

impl DesignServer {
    pub fn new(backend: Arc<dyn DesignBackend>) -> Arc<Self> {
        let (events, _rx) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Arc::new(Self { backend, events })
    }

    pub fn subscribe(&self) -> broadcast::Receiver<DesignSavedEvent> {
        self.events.subscribe()
    }

    pub fn router(self: Arc<Self>) -> Router {
        Router::new()
            .route("/design/:store_id", get(load_design).post(save_design))
            .route("/design/:store_id/events", get(design_events))
            .with_state(self)
    }
}

async fn load_design(
    State(server): State<Arc<DesignServer>>,
    Path(store_id): Path<String>,
) -> (StatusCode, Json<LoadResponse>) {
    if let Err(e) = validate_store_id(&store_id) {
        return (StatusCode::BAD_REQUEST, Json(LoadResponse::failed(e.to_string())));
    }

    match server.backend.fetch(&store_id).await {
        Ok(Some(document)) => (StatusCode::OK, Json(LoadResponse::found(document))),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(LoadResponse::failed(format!("No design saved for {}", store_id))),
        ),
        Err(e) => {
            tracing::error!(%store_id, error = %e, "failed to read design");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(LoadResponse::failed(e.to_string())),
            )
        }
    }
}

async fn save_design(
    State(server): State<Arc<DesignServer>>,
    Path(store_id): Path<String>,
    body: Bytes,
) -> (StatusCode, Json<SaveResponse>) {
    if let Err(e) = validate_store_id(&store_id) {
        return (StatusCode::BAD_REQUEST, Json(SaveResponse::failed(e.to_string())));
    }

    let document = match serde_json::from_slice::<serde_json::Value>(&body)
        .map_err(storefront_editor::EditorError::from)
        .and_then(DesignDocument::from_import_value)
    {
        Ok(document) => document,
        Err(e) => {
            tracing::warn!(%store_id, error = %e, "rejected design");
            return (StatusCode::BAD_REQUEST, Json(SaveResponse::failed(e.to_string())));
        }
    };

    if let Err(e) = server.backend.persist(&store_id, &document).await {
        tracing::error!(%store_id, error = %e, "failed to write design");
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(SaveResponse::failed(e.to_string())),
        );
    }

    let event = DesignSavedEvent {
        store_id: store_id.clone(),
        section_count: document.layout.len(),
        saved_at: chrono::Utc::now(),
    };
    // No subscribers is fine
    let _ = server.events.send(event);
    tracing::info!(%store_id, sections = document.layout.len(), "saved design");

    (StatusCode::OK, Json(SaveResponse::ok()))
}

/// SSE stream of save notifications for one store
async fn design_events(
    State(server): State<Arc<DesignServer>>,
    Path(store_id): Path<String>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    tracing::info!(%store_id, "starting design event stream");
    let rx = server.subscribe();

    let events = stream::unfold((store_id, rx), |(store_id, mut rx)| async move {
        loop {
            match rx.recv().await {
                Ok(update) if update.store_id == store_id => {
                    let json = serde_json::to_string(&update).unwrap_or_default();
                    let event = Event::default().event("design-saved").data(json);
                    return Some((Ok(event), (store_id, rx)));
                }
                Ok(_) => {}
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(%store_id, "event subscriber lagged by {} messages", n);
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    });

    Sse::new(events).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("ping"),
    )
}
