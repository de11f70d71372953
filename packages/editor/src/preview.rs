//! # Preview Projection
//!
//! Read-only projection of a design into a layout at a chosen viewport
//! width. The projection never mutates the document; renderers (canvas,
//! HTML, native) consume the resulting [`PreviewFrame`].

use crate::registry::{BlockType, SectionType};
use crate::section::{Alignment, Section, SectionContent};
use crate::DesignDocument;
use serde::{Deserialize, Serialize};

/// Breakpoint below which every section collapses to one column
pub const MOBILE_BREAKPOINT: u32 = 640;

/// Breakpoint below which multi-column sections are capped at two columns
pub const TABLET_BREAKPOINT: u32 = 1024;

/// Device presets for the preview canvas
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Viewport {
    /// 375px (phone)
    Mobile,

    /// 768px (tablet)
    Tablet,

    /// 1280px (laptop)
    #[default]
    Desktop,

    /// Custom width in pixels
    Custom(u32),
}

impl Viewport {
    pub fn width(&self) -> u32 {
        match self {
            Viewport::Mobile => 375,
            Viewport::Tablet => 768,
            Viewport::Desktop => 1280,
            Viewport::Custom(w) => *w,
        }
    }

    /// Parse a preset name or a bare pixel width
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "mobile" => Some(Viewport::Mobile),
            "tablet" => Some(Viewport::Tablet),
            "desktop" => Some(Viewport::Desktop),
            other => other.parse().ok().map(Viewport::Custom),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewFrame {
    pub viewport_width: u32,
    pub content_width: u32,
    pub sections: Vec<PreviewSection>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewSection {
    pub id: String,
    pub section_type: SectionType,
    pub columns: u8,
    pub item_count: usize,
    pub padding_top: u32,
    pub padding_bottom: u32,
    pub background_color: String,
    pub text_color: String,
    pub selected: bool,
    pub blocks: Vec<PreviewBlock>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewBlock {
    pub id: String,
    pub block_type: BlockType,
    pub alignment: Alignment,
}

/// Project `design` at `viewport`; `selected` marks the section being edited
pub fn render_preview(
    design: &DesignDocument,
    viewport: Viewport,
    selected: Option<&str>,
) -> PreviewFrame {
    let width = viewport.width();
    let content_width = width.min(design.global_settings.container_width);

    PreviewFrame {
        viewport_width: width,
        content_width,
        sections: design
            .layout
            .iter()
            .map(|section| project_section(section, width, selected))
            .collect(),
    }
}

fn project_section(section: &Section, width: u32, selected: Option<&str>) -> PreviewSection {
    let desired = preferred_columns(&section.content);
    let columns = if width < MOBILE_BREAKPOINT {
        1
    } else if width < TABLET_BREAKPOINT {
        desired.min(2)
    } else {
        desired
    };

    let (padding_top, padding_bottom) = if width < MOBILE_BREAKPOINT {
        (section.settings.padding_top / 2, section.settings.padding_bottom / 2)
    } else {
        (section.settings.padding_top, section.settings.padding_bottom)
    };

    PreviewSection {
        id: section.id.clone(),
        section_type: section.section_type(),
        columns,
        item_count: section.content.item_count(),
        padding_top,
        padding_bottom,
        background_color: section.settings.background_color.clone(),
        text_color: section.settings.text_color.clone(),
        selected: selected == Some(section.id.as_str()),
        blocks: section
            .blocks
            .iter()
            .map(|block| PreviewBlock {
                id: block.id.clone(),
                block_type: block.block_type(),
                alignment: block.settings.alignment,
            })
            .collect(),
    }
}

fn preferred_columns(content: &SectionContent) -> u8 {
    let columns = match content {
        SectionContent::Features(c) => c.items.len().min(3) as u8,
        SectionContent::Testimonials(c) => c.items.len().min(3) as u8,
        SectionContent::Gallery(c) => c.columns,
        SectionContent::ProductGrid(c) => c.columns,
        _ => 1,
    };
    columns.max(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::section_template;

    fn design(types: &[SectionType]) -> DesignDocument {
        DesignDocument::new(
            types
                .iter()
                .enumerate()
                .map(|(i, t)| {
                    let template = section_template(*t);
                    Section {
                        id: format!("s{}", i),
                        content: template.content,
                        settings: template.settings,
                        blocks: vec![],
                    }
                })
                .collect(),
        )
    }

    #[test]
    fn test_columns_follow_viewport() {
        let doc = design(&[SectionType::ProductGrid, SectionType::Features]);

        let desktop = render_preview(&doc, Viewport::Desktop, None);
        assert_eq!(desktop.sections[0].columns, 4);
        assert_eq!(desktop.sections[1].columns, 3);

        let tablet = render_preview(&doc, Viewport::Tablet, None);
        assert_eq!(tablet.sections[0].columns, 2);

        let mobile = render_preview(&doc, Viewport::Mobile, None);
        assert!(mobile.sections.iter().all(|s| s.columns == 1));
    }

    #[test]
    fn test_mobile_halves_padding() {
        let doc = design(&[SectionType::Hero]);
        let mobile = render_preview(&doc, Viewport::Mobile, None);
        assert_eq!(mobile.sections[0].padding_top, 48);

        let desktop = render_preview(&doc, Viewport::Desktop, None);
        assert_eq!(desktop.sections[0].padding_top, 96);
    }

    #[test]
    fn test_projection_preserves_order_and_selection() {
        let doc = design(&[SectionType::Hero, SectionType::Contact, SectionType::Newsletter]);
        let frame = render_preview(&doc, Viewport::Custom(900), Some("s1"));

        let ids: Vec<_> = frame.sections.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["s0", "s1", "s2"]);
        assert!(frame.sections[1].selected);
        assert!(!frame.sections[0].selected);
        assert_eq!(frame.viewport_width, 900);
        assert_eq!(frame.content_width, 900);
    }

    #[test]
    fn test_viewport_parse() {
        assert_eq!(Viewport::parse("tablet"), Some(Viewport::Tablet));
        assert_eq!(Viewport::parse("1440"), Some(Viewport::Custom(1440)));
        assert_eq!(Viewport::parse("watch"), None);
        assert_eq!(Viewport::default().width(), 1280);
    }
}
