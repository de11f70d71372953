use crate::error::GatewayError;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use storefront_editor::DesignDocument;
use tokio::sync::RwLock;

const MAX_STORE_ID_LEN: usize = 128;

/// Where designs are kept, keyed by store id.
///
/// `fetch` returns `Ok(None)` when nothing has been saved for the store yet.
#[async_trait]
pub trait DesignBackend: Send + Sync {
    async fn fetch(&self, store_id: &str) -> Result<Option<DesignDocument>, GatewayError>;

    async fn persist(&self, store_id: &str, document: &DesignDocument) -> Result<(), GatewayError>;
}

#[async_trait]
impl<B: DesignBackend + ?Sized> DesignBackend for Arc<B> {
    async fn fetch(&self, store_id: &str) -> Result<Option<DesignDocument>, GatewayError> {
        (**self).fetch(store_id).await
    }

    async fn persist(&self, store_id: &str, document: &DesignDocument) -> Result<(), GatewayError> {
        (**self).persist(store_id, document).await
    }
}

/// Store ids end up in URLs and file names, so only a conservative
/// character set is accepted.
pub fn validate_store_id(store_id: &str) -> Result<(), GatewayError> {
    let valid = !store_id.is_empty()
        && store_id.len() <= MAX_STORE_ID_LEN
        && store_id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');

    if valid {
        Ok(())
    } else {
        Err(GatewayError::InvalidStoreId(store_id.to_string()))
    }
}

/// In-memory backend for tests and local previews
#[derive(Default)]
pub struct MemoryBackend {
    designs: RwLock<HashMap<String, DesignDocument>>,
    failing: AtomicBool,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_design(store_id: impl Into<String>, document: DesignDocument) -> Self {
        let mut designs = HashMap::new();
        designs.insert(store_id.into(), document);
        Self {
            designs: RwLock::new(designs),
            failing: AtomicBool::new(false),
        }
    }

    /// Make every subsequent call fail with a transport error
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub async fn get(&self, store_id: &str) -> Option<DesignDocument> {
        self.designs.read().await.get(store_id).cloned()
    }

    fn check_available(&self) -> Result<(), GatewayError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(GatewayError::Status {
                status: 503,
                message: "backend unavailable".into(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl DesignBackend for MemoryBackend {
    async fn fetch(&self, store_id: &str) -> Result<Option<DesignDocument>, GatewayError> {
        self.check_available()?;
        Ok(self.designs.read().await.get(store_id).cloned())
    }

    async fn persist(&self, store_id: &str, document: &DesignDocument) -> Result<(), GatewayError> {
        self.check_available()?;
        self.designs
            .write()
            .await
            .insert(store_id.to_string(), document.clone());
        Ok(())
    }
}
