//! # Section Registry
//!
//! Static catalog mapping section and block type names to their default
//! content and settings. Every section created by the store is seeded from
//! here, so a freshly added section always carries every field its type
//! defines.

use crate::section::*;
use crate::EditorError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionType {
    Hero,
    Features,
    Gallery,
    Testimonials,
    Contact,
    Newsletter,
    ProductGrid,
    RichText,
}

impl SectionType {
    pub const ALL: [SectionType; 8] = [
        SectionType::Hero,
        SectionType::Features,
        SectionType::Gallery,
        SectionType::Testimonials,
        SectionType::Contact,
        SectionType::Newsletter,
        SectionType::ProductGrid,
        SectionType::RichText,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SectionType::Hero => "hero",
            SectionType::Features => "features",
            SectionType::Gallery => "gallery",
            SectionType::Testimonials => "testimonials",
            SectionType::Contact => "contact",
            SectionType::Newsletter => "newsletter",
            SectionType::ProductGrid => "product_grid",
            SectionType::RichText => "rich_text",
        }
    }

    /// Human-readable name for palettes and history labels
    pub fn label(&self) -> &'static str {
        match self {
            SectionType::Hero => "Hero",
            SectionType::Features => "Features",
            SectionType::Gallery => "Gallery",
            SectionType::Testimonials => "Testimonials",
            SectionType::Contact => "Contact",
            SectionType::Newsletter => "Newsletter",
            SectionType::ProductGrid => "Product grid",
            SectionType::RichText => "Rich text",
        }
    }
}

impl fmt::Display for SectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SectionType {
    type Err = EditorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SectionType::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| EditorError::UnknownSectionType(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockType {
    Heading,
    Text,
    Button,
    Image,
    Spacer,
}

impl BlockType {
    pub const ALL: [BlockType; 5] = [
        BlockType::Heading,
        BlockType::Text,
        BlockType::Button,
        BlockType::Image,
        BlockType::Spacer,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BlockType::Heading => "heading",
            BlockType::Text => "text",
            BlockType::Button => "button",
            BlockType::Image => "image",
            BlockType::Spacer => "spacer",
        }
    }
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BlockType {
    type Err = EditorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BlockType::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| EditorError::UnknownBlockType(s.to_string()))
    }
}

/// Default content and settings for a section type
#[derive(Debug, Clone, PartialEq)]
pub struct SectionTemplate {
    pub content: SectionContent,
    pub settings: SectionSettings,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BlockTemplate {
    pub content: BlockContent,
    pub settings: BlockSettings,
}

/// Look up a section template by type name
pub fn lookup_section(name: &str) -> Result<SectionTemplate, EditorError> {
    Ok(section_template(name.parse()?))
}

/// Look up a block template by type name
pub fn lookup_block(name: &str) -> Result<BlockTemplate, EditorError> {
    Ok(block_template(name.parse()?))
}

pub fn section_template(section_type: SectionType) -> SectionTemplate {
    let base = SectionSettings::default();

    match section_type {
        SectionType::Hero => SectionTemplate {
            content: SectionContent::Hero(HeroContent {
                title: "Welcome to our store".into(),
                subtitle: "Discover products you'll love".into(),
                button_text: "Shop now".into(),
                button_link: "/products".into(),
                background_image: String::new(),
            }),
            settings: SectionSettings {
                background_color: "#1f2937".into(),
                text_color: "#ffffff".into(),
                padding_top: 96,
                padding_bottom: 96,
            },
        },
        SectionType::Features => SectionTemplate {
            content: SectionContent::Features(FeaturesContent {
                title: "Why shop with us".into(),
                subtitle: String::new(),
                items: vec![
                    feature("truck", "Free shipping", "On all orders over $50"),
                    feature("shield", "Secure checkout", "Your payment details stay private"),
                    feature("refresh", "Easy returns", "30 days to change your mind"),
                ],
            }),
            settings: base,
        },
        SectionType::Gallery => SectionTemplate {
            content: SectionContent::Gallery(GalleryContent {
                title: "Gallery".into(),
                columns: 3,
                images: Vec::new(),
            }),
            settings: base,
        },
        SectionType::Testimonials => SectionTemplate {
            content: SectionContent::Testimonials(TestimonialsContent {
                title: "What our customers say".into(),
                items: vec![Testimonial {
                    name: "Happy customer".into(),
                    role: "Verified buyer".into(),
                    quote: "Great products and fast delivery.".into(),
                    rating: 5,
                }],
            }),
            settings: SectionSettings {
                background_color: "#f9fafb".into(),
                ..base
            },
        },
        SectionType::Contact => SectionTemplate {
            content: SectionContent::Contact(ContactContent {
                title: "Get in touch".into(),
                subtitle: "We usually reply within a day".into(),
                email: String::new(),
                phone: String::new(),
                address: String::new(),
                show_form: true,
            }),
            settings: base,
        },
        SectionType::Newsletter => SectionTemplate {
            content: SectionContent::Newsletter(NewsletterContent {
                title: "Join our newsletter".into(),
                subtitle: "News and offers, straight to your inbox".into(),
                placeholder: "Enter your email".into(),
                button_text: "Subscribe".into(),
            }),
            settings: SectionSettings {
                background_color: "#eff6ff".into(),
                padding_top: 48,
                padding_bottom: 48,
                ..base
            },
        },
        SectionType::ProductGrid => SectionTemplate {
            content: SectionContent::ProductGrid(ProductGridContent {
                title: "Featured products".into(),
                collection: "featured".into(),
                product_count: 8,
                columns: 4,
            }),
            settings: base,
        },
        SectionType::RichText => SectionTemplate {
            content: SectionContent::RichText(RichTextContent {
                heading: "About us".into(),
                body: "Tell your story here.".into(),
            }),
            settings: base,
        },
    }
}

pub fn block_template(block_type: BlockType) -> BlockTemplate {
    let content = match block_type {
        BlockType::Heading => BlockContent::Heading(HeadingBlock {
            text: "Heading".into(),
            level: 2,
        }),
        BlockType::Text => BlockContent::Text(TextBlock {
            body: "Add your text here".into(),
        }),
        BlockType::Button => BlockContent::Button(ButtonBlock {
            label: "Learn more".into(),
            link: "#".into(),
            variant: "primary".into(),
        }),
        BlockType::Image => BlockContent::Image(ImageBlock {
            url: String::new(),
            alt: String::new(),
        }),
        BlockType::Spacer => BlockContent::Spacer(SpacerBlock { height: 32 }),
    };

    BlockTemplate {
        content,
        settings: BlockSettings::default(),
    }
}

fn feature(icon: &str, title: &str, description: &str) -> FeatureItem {
    FeatureItem {
        icon: icon.into(),
        title: title.into(),
        description: description.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_type_has_matching_template() {
        for section_type in SectionType::ALL {
            let template = section_template(section_type);
            assert_eq!(template.content.section_type(), section_type);
        }
        for block_type in BlockType::ALL {
            assert_eq!(block_template(block_type).content.block_type(), block_type);
        }
    }

    #[test]
    fn test_type_names_round_trip() {
        for section_type in SectionType::ALL {
            assert_eq!(section_type.as_str().parse::<SectionType>().unwrap(), section_type);
            let json = serde_json::to_value(section_type).unwrap();
            assert_eq!(json, section_type.as_str());
        }
    }

    #[test]
    fn test_unknown_type_is_rejected() {
        assert_eq!(
            lookup_section("carousel").unwrap_err(),
            EditorError::UnknownSectionType("carousel".to_string())
        );
        assert_eq!(
            lookup_block("video").unwrap_err(),
            EditorError::UnknownBlockType("video".to_string())
        );
    }
}
