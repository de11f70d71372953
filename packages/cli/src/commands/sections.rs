use anyhow::Result;
use clap::Args;
use colored::Colorize;
use storefront_editor::{section_template, BlockType, SectionType};

#[derive(Args, Debug)]
pub struct SectionsArgs {
    /// Print the default content of each section as JSON
    #[arg(short, long)]
    pub verbose: bool,
}

pub fn sections(args: SectionsArgs) -> Result<()> {
    println!("{}", "Section types".bright_blue().bold());
    for section_type in SectionType::ALL {
        let template = section_template(section_type);
        println!(
            "  {} {}",
            format!("{:<14}", section_type.as_str()).as_str().green(),
            section_type.label()
        );
        if args.verbose {
            let json = serde_json::to_string_pretty(&template.content)?;
            for line in json.lines() {
                println!("      {}", line.dimmed());
            }
        }
    }

    println!();
    println!("{}", "Block types".bright_blue().bold());
    let names: Vec<_> = BlockType::ALL.iter().map(|t| t.as_str()).collect();
    println!("  {}", names.join(", "));

    Ok(())
}
