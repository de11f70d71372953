//! # Storefront Workspace
//!
//! Persistence for the storefront page builder:
//!
//! - `DesignBackend`: where designs live (memory, files, or a remote server)
//! - `PersistenceGateway`: drives a `DesignStore` through load and save
//! - `DesignServer`: the HTTP design API with save notifications over SSE

pub mod api;
mod backend;
mod error;
mod file_store;
mod gateway;
mod http;
pub mod server;

pub use api::{DesignSavedEvent, LoadResponse, SaveResponse};
pub use backend::{validate_store_id, DesignBackend, MemoryBackend};
pub use error::GatewayError;
pub use file_store::FileBackend;
pub use gateway::{LoadOutcome, PersistenceGateway};
pub use http::{HttpBackend, DEFAULT_REQUEST_TIMEOUT};
pub use server::DesignServer;
