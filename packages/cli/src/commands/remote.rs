use super::resolve_path;
use super::validate::read_design;
use crate::config::StorefrontConfig;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::fs;
use std::path::PathBuf;
use storefront_editor::DesignStore;
use storefront_workspace::{DesignBackend, HttpBackend, PersistenceGateway};

#[derive(Args, Debug)]
pub struct PullArgs {
    /// Store to download (defaults to `storeId` from the config)
    pub store_id: Option<String>,

    /// Write the export here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Design server URL (overrides `apiUrl`)
    #[arg(long)]
    pub api_url: Option<String>,
}

#[derive(Args, Debug)]
pub struct PushArgs {
    /// Design export (JSON) to upload
    pub file: PathBuf,

    /// Target store (defaults to `storeId` from the config)
    pub store_id: Option<String>,

    /// Design server URL (overrides `apiUrl`)
    #[arg(long)]
    pub api_url: Option<String>,
}

pub async fn pull(args: PullArgs, cwd: &str) -> Result<()> {
    let config = StorefrontConfig::load(cwd)?;
    let store_id = config.resolve_store_id(args.store_id)?;
    let backend = HttpBackend::new(config.resolve_api_url(args.api_url))?;

    tracing::info!(%store_id, url = backend.base_url(), "pulling design");
    let document = backend
        .fetch(&store_id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("No design saved for store {}", store_id))?;

    let json = serde_json::to_string_pretty(&document.export(chrono::Utc::now()))?;
    match args.output {
        Some(output) => {
            fs::write(resolve_path(cwd, &output), json)?;
            eprintln!(
                "{} Pulled {} ({} sections) → {}",
                "✓".green(),
                store_id.as_str().bright_white(),
                document.layout.len(),
                output.display()
            );
        }
        None => println!("{}", json),
    }

    Ok(())
}

pub async fn push(args: PushArgs, cwd: &str) -> Result<()> {
    let config = StorefrontConfig::load(cwd)?;
    let store_id = config.resolve_store_id(args.store_id)?;
    let document = read_design(&resolve_path(cwd, &args.file))?;
    let sections = document.layout.len();

    let gateway = PersistenceGateway::new(HttpBackend::new(config.resolve_api_url(args.api_url))?);
    let mut store = DesignStore::with_config(config.editor_config());
    store.load(store_id.clone(), document);
    gateway.save(&mut store).await?;

    println!(
        "{} Pushed {} ({} sections) → {}",
        "✓".green(),
        args.file.display(),
        sections,
        store_id.as_str().bright_white()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use storefront_workspace::{DesignServer, MemoryBackend};

    async fn spawn_server() -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let app = DesignServer::new(Arc::new(MemoryBackend::new())).router();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    #[tokio::test]
    async fn test_push_then_pull() {
        let api_url = spawn_server().await;
        let dir = tempfile::tempdir().unwrap();
        let cwd = dir.path().display().to_string();

        let mut store = DesignStore::new();
        let hero = store.add_section("hero", None).unwrap();
        store.add_block(&hero, "button", None).unwrap();
        store.add_section("contact", None).unwrap();
        fs::write(
            dir.path().join("local.json"),
            store.export_json(chrono::Utc::now()).unwrap(),
        )
        .unwrap();

        push(
            PushArgs {
                file: PathBuf::from("local.json"),
                store_id: Some("shop-1".into()),
                api_url: Some(api_url.clone()),
            },
            &cwd,
        )
        .await
        .unwrap();

        pull(
            PullArgs {
                store_id: Some("shop-1".into()),
                output: Some(PathBuf::from("remote.json")),
                api_url: Some(api_url),
            },
            &cwd,
        )
        .await
        .unwrap();

        let pulled = read_design(&dir.path().join("remote.json")).unwrap();
        assert_eq!(&pulled, store.design());
    }

    #[tokio::test]
    async fn test_pull_unknown_store_fails() {
        let api_url = spawn_server().await;
        let dir = tempfile::tempdir().unwrap();

        let result = pull(
            PullArgs {
                store_id: Some("missing".into()),
                output: None,
                api_url: Some(api_url),
            },
            &dir.path().display().to_string(),
        )
        .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_push_needs_store_id() {
        let dir = tempfile::tempdir().unwrap();
        let result = push(
            PushArgs {
                file: PathBuf::from("local.json"),
                store_id: None,
                api_url: None,
            },
            &dir.path().display().to_string(),
        )
        .await;
        assert!(result.is_err());
    }
}
