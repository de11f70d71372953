use crate::config::{StorefrontConfig, DEFAULT_API_URL, DEFAULT_CONFIG_NAME};
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::fs;
use std::path::PathBuf;
use storefront_editor::DesignStore;

pub const STARTER_DESIGN_NAME: &str = "design.json";

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Default store for push/pull
    #[arg(short, long)]
    pub store_id: Option<String>,

    /// Design server URL
    #[arg(short, long, default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Force overwrite existing config
    #[arg(short, long)]
    pub force: bool,
}

pub fn init(args: InitArgs, cwd: &str) -> Result<()> {
    let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

    if config_path.exists() && !args.force {
        println!(
            "{} {} already exists",
            "⚠️".yellow(),
            DEFAULT_CONFIG_NAME.bright_white()
        );
        println!("Use --force to overwrite");
        return Ok(());
    }

    println!(
        "{}",
        "📝 Initializing storefront design...".bright_blue().bold()
    );

    // Starter page: hero, product grid, newsletter
    let design_path = PathBuf::from(cwd).join(STARTER_DESIGN_NAME);
    if !design_path.exists() {
        let mut store = DesignStore::new();
        for section_type in ["hero", "product_grid", "newsletter"] {
            store.add_section(section_type, None)?;
        }
        fs::write(&design_path, store.export_json(chrono::Utc::now())?)?;
        println!("  {} Created {}", "✓".green(), STARTER_DESIGN_NAME);
    }

    let config = StorefrontConfig {
        api_url: args.api_url,
        store_id: args.store_id,
        ..Default::default()
    };
    fs::write(&config_path, serde_json::to_string_pretty(&config)?)?;

    println!("  {} Created {}", "✓".green(), DEFAULT_CONFIG_NAME);
    println!();
    println!("{}", "✅ Ready!".green().bold());
    println!();
    println!("Next steps:");
    println!("  1. Edit {}", STARTER_DESIGN_NAME);
    println!("  2. Run: storefront validate {}", STARTER_DESIGN_NAME);
    println!("  3. Run: storefront push {} <storeId>", STARTER_DESIGN_NAME);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::validate::read_design;

    fn args(force: bool) -> InitArgs {
        InitArgs {
            store_id: Some("shop-42".into()),
            api_url: DEFAULT_API_URL.into(),
            force,
        }
    }

    #[test]
    fn test_init_scaffolds_project() {
        let dir = tempfile::tempdir().unwrap();
        let cwd = dir.path().display().to_string();
        init(args(false), &cwd).unwrap();

        let config = StorefrontConfig::load(&cwd).unwrap();
        assert_eq!(config.store_id.as_deref(), Some("shop-42"));

        let design = read_design(&dir.path().join(STARTER_DESIGN_NAME)).unwrap();
        let types: Vec<_> = design
            .layout
            .iter()
            .map(|s| s.section_type().as_str())
            .collect();
        assert_eq!(types, vec!["hero", "product_grid", "newsletter"]);
    }

    #[test]
    fn test_init_keeps_existing_config() {
        let dir = tempfile::tempdir().unwrap();
        let cwd = dir.path().display().to_string();
        fs::write(dir.path().join(DEFAULT_CONFIG_NAME), r#"{"storeId":"mine"}"#).unwrap();

        init(args(false), &cwd).unwrap();
        let config = StorefrontConfig::load(&cwd).unwrap();
        assert_eq!(config.store_id.as_deref(), Some("mine"));

        init(args(true), &cwd).unwrap();
        let config = StorefrontConfig::load(&cwd).unwrap();
        assert_eq!(config.store_id.as_deref(), Some("shop-42"));
    }
}
