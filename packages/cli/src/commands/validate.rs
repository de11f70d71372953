use super::resolve_path;
use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use std::fs;
use std::path::PathBuf;
use storefront_editor::DesignDocument;

#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Design export (JSON) to check
    pub file: PathBuf,
}

/// Parse a design file the same way import does
pub fn read_design(path: &std::path::Path) -> Result<DesignDocument> {
    let source = fs::read_to_string(path)
        .with_context(|| format!("Cannot read {}", path.display()))?;
    DesignDocument::from_import_json(&source)
        .with_context(|| format!("Invalid design in {}", path.display()))
}

pub fn validate(args: ValidateArgs, cwd: &str) -> Result<()> {
    let path = resolve_path(cwd, &args.file);
    let document = read_design(&path)?;

    println!("{} {}", "✓".green(), args.file.display());
    println!("   Sections: {}", document.layout.len());
    for (i, section) in document.layout.iter().enumerate() {
        println!(
            "   {:>3}. {} {} ({} blocks)",
            i + 1,
            section.section_type().as_str().green(),
            section.id.as_str().dimmed(),
            section.blocks.len()
        );
    }
    println!(
        "   Theme: {} / {}, {}",
        document.global_settings.primary_color,
        document.global_settings.secondary_color,
        document.global_settings.font_family
    );

    Ok(())
}
