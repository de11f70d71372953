use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use storefront_editor::{EditorConfig, DEFAULT_HISTORY_LIMIT};

pub const DEFAULT_CONFIG_NAME: &str = "storefront.config.json";
pub const DEFAULT_API_URL: &str = "http://localhost:3030";

/// Storefront configuration file format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorefrontConfig {
    /// Base URL of the design server
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Store used when a command doesn't name one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store_id: Option<String>,

    /// Undo levels kept by editing commands
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_history_limit() -> usize {
    DEFAULT_HISTORY_LIMIT
}

impl StorefrontConfig {
    /// Load config from a directory
    pub fn load(cwd: &str) -> anyhow::Result<Self> {
        let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: StorefrontConfig = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(StorefrontConfig::default())
        }
    }

    pub fn editor_config(&self) -> EditorConfig {
        EditorConfig {
            history_limit: self.history_limit,
        }
    }

    /// Flag value wins over the config file
    pub fn resolve_store_id(&self, flag: Option<String>) -> anyhow::Result<String> {
        flag.or_else(|| self.store_id.clone()).ok_or_else(|| {
            anyhow::anyhow!(
                "No store id given. Pass one or set \"storeId\" in {}",
                DEFAULT_CONFIG_NAME
            )
        })
    }

    pub fn resolve_api_url(&self, flag: Option<String>) -> String {
        flag.unwrap_or_else(|| self.api_url.clone())
    }
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            store_id: None,
            history_limit: default_history_limit(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let json = r#"{
            "apiUrl": "https://designs.example.com",
            "storeId": "shop-42",
            "historyLimit": 20
        }"#;

        let config: StorefrontConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.api_url, "https://designs.example.com");
        assert_eq!(config.store_id.as_deref(), Some("shop-42"));
        assert_eq!(config.editor_config().history_limit, 20);
    }

    #[test]
    fn test_default_config() {
        let config: StorefrontConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, StorefrontConfig::default());
        assert_eq!(config.api_url, "http://localhost:3030");
        assert_eq!(config.history_limit, 50);
    }

    #[test]
    fn test_flags_override_config() {
        let config = StorefrontConfig {
            store_id: Some("from-config".into()),
            ..Default::default()
        };
        assert_eq!(config.resolve_store_id(None).unwrap(), "from-config");
        assert_eq!(
            config.resolve_store_id(Some("from-flag".into())).unwrap(),
            "from-flag"
        );
        assert!(StorefrontConfig::default().resolve_store_id(None).is_err());
        assert_eq!(
            config.resolve_api_url(Some("http://other".into())),
            "http://other"
        );
    }

    #[test]
    fn test_load_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = StorefrontConfig::load(dir.path().to_str().unwrap()).unwrap();
        assert_eq!(config, StorefrontConfig::default());
    }
}
