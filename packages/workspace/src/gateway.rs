use crate::backend::DesignBackend;
use crate::error::GatewayError;
use storefront_editor::DesignStore;

/// What `PersistenceGateway::load` ended up doing
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    /// A saved design was found and loaded
    Loaded,
    /// Nothing was saved for this store yet
    Empty,
    /// The backend failed; the store starts from an empty design
    Fallback(String),
}

/// Moves designs between a `DesignStore` and a backend.
///
/// The store itself never performs I/O; the gateway drives its
/// `load` / `begin_save` / `finish_save` hooks around backend calls.
pub struct PersistenceGateway<B> {
    backend: B,
}

impl<B: DesignBackend> PersistenceGateway<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Load the design for `store_id`. Never fails: backend errors are
    /// logged and the store falls back to an empty design.
    pub async fn load(&self, store: &mut DesignStore, store_id: &str) -> LoadOutcome {
        match self.backend.fetch(store_id).await {
            Ok(Some(document)) => {
                tracing::info!(store_id, sections = document.layout.len(), "loaded design");
                store.load(store_id, document);
                LoadOutcome::Loaded
            }
            Ok(None) => {
                tracing::info!(store_id, "no saved design, starting empty");
                store.load_empty(store_id);
                LoadOutcome::Empty
            }
            Err(e) => {
                tracing::warn!(store_id, error = %e, "failed to load design, starting empty");
                store.load_empty(store_id);
                LoadOutcome::Fallback(e.to_string())
            }
        }
    }

    /// Persist the store's current design. At most one save runs per store;
    /// a second call while one is pending fails with `SaveInProgress`.
    pub async fn save(&self, store: &mut DesignStore) -> Result<(), GatewayError> {
        let ticket = store.begin_save()?;
        let outcome = self
            .backend
            .persist(&ticket.store_id, &ticket.document)
            .await;
        store.finish_save(ticket, outcome)
    }
}
