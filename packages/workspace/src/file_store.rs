use crate::backend::{validate_store_id, DesignBackend};
use crate::error::GatewayError;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use storefront_editor::DesignDocument;

/// Keeps one `<storeId>.json` file per store under a root directory
#[derive(Debug, Clone)]
pub struct FileBackend {
    root: PathBuf,
}

impl FileBackend {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn design_path(&self, store_id: &str) -> Result<PathBuf, GatewayError> {
        validate_store_id(store_id)?;
        Ok(self.root.join(format!("{}.json", store_id)))
    }
}

#[async_trait]
impl DesignBackend for FileBackend {
    async fn fetch(&self, store_id: &str) -> Result<Option<DesignDocument>, GatewayError> {
        let path = self.design_path(store_id)?;
        let source = match tokio::fs::read_to_string(&path).await {
            Ok(source) => source,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let document: DesignDocument = serde_json::from_str(&source)?;
        Ok(Some(document))
    }

    async fn persist(&self, store_id: &str, document: &DesignDocument) -> Result<(), GatewayError> {
        let path = self.design_path(store_id)?;
        tokio::fs::create_dir_all(&self.root).await?;

        // Write then rename so readers never see a partial file. Each write
        // gets its own temp file; concurrent saves for one store must not
        // share one.
        let tmp = self
            .root
            .join(format!(".{}.{}.tmp", store_id, uuid::Uuid::new_v4().simple()));
        let json = serde_json::to_string_pretty(document)?;
        tokio::fs::write(&tmp, json).await?;
        if let Err(e) = tokio::fs::rename(&tmp, &path).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(e.into());
        }

        tracing::debug!(path = %path.display(), "wrote design file");
        Ok(())
    }
}
