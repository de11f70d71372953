//! # Section Model
//!
//! A page design is an ordered list of [`Section`]s. Each section carries a
//! typed content payload (one variant per section type), common style
//! settings and an ordered list of nested [`Block`]s.
//!
//! ## Wire format
//!
//! ```text
//! {
//!   "id": "section-4f1c…",
//!   "type": "hero",
//!   "content": { "title": "…", "subtitle": "…", … },
//!   "settings": { "backgroundColor": "#ffffff", … },
//!   "blocks": [ { "id": "block-…", "type": "button", "content": {…}, "settings": {…} } ]
//! }
//! ```
//!
//! List order is the only source of render order; no position field is
//! stored on the records.

use crate::registry::{BlockType, SectionType};
use crate::EditorError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// Generate an opaque id that is never reused.
pub fn generate_id(prefix: &str) -> String {
    format!("{}-{}", prefix, Uuid::new_v4().simple())
}

/// One top-level visual region of a page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub id: String,

    #[serde(flatten)]
    pub content: SectionContent,

    #[serde(default)]
    pub settings: SectionSettings,

    #[serde(default)]
    pub blocks: Vec<Block>,
}

impl Section {
    pub fn section_type(&self) -> SectionType {
        self.content.section_type()
    }

    pub fn find_block(&self, block_id: &str) -> Option<&Block> {
        self.blocks.iter().find(|b| b.id == block_id)
    }

    pub fn block_index(&self, block_id: &str) -> Option<usize> {
        self.blocks.iter().position(|b| b.id == block_id)
    }
}

/// Nested element within a section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub id: String,

    #[serde(flatten)]
    pub content: BlockContent,

    #[serde(default)]
    pub settings: BlockSettings,
}

impl Block {
    pub fn block_type(&self) -> BlockType {
        self.content.block_type()
    }
}

// ============================================================================
// Section content
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "content", rename_all = "snake_case")]
pub enum SectionContent {
    Hero(HeroContent),
    Features(FeaturesContent),
    Gallery(GalleryContent),
    Testimonials(TestimonialsContent),
    Contact(ContactContent),
    Newsletter(NewsletterContent),
    ProductGrid(ProductGridContent),
    RichText(RichTextContent),
}

impl SectionContent {
    pub fn section_type(&self) -> SectionType {
        match self {
            SectionContent::Hero(_) => SectionType::Hero,
            SectionContent::Features(_) => SectionType::Features,
            SectionContent::Gallery(_) => SectionType::Gallery,
            SectionContent::Testimonials(_) => SectionType::Testimonials,
            SectionContent::Contact(_) => SectionType::Contact,
            SectionContent::Newsletter(_) => SectionType::Newsletter,
            SectionContent::ProductGrid(_) => SectionType::ProductGrid,
            SectionContent::RichText(_) => SectionType::RichText,
        }
    }

    /// Shallow-merge named fields into the payload.
    ///
    /// Every key must name an existing field and the result must still
    /// type-check; otherwise `self` is left untouched.
    pub fn merge(&mut self, patch: &Map<String, Value>) -> Result<(), EditorError> {
        let kind = self.section_type().as_str();
        match self {
            SectionContent::Hero(c) => merge_fields(c, patch, kind),
            SectionContent::Features(c) => merge_fields(c, patch, kind),
            SectionContent::Gallery(c) => merge_fields(c, patch, kind),
            SectionContent::Testimonials(c) => merge_fields(c, patch, kind),
            SectionContent::Contact(c) => merge_fields(c, patch, kind),
            SectionContent::Newsletter(c) => merge_fields(c, patch, kind),
            SectionContent::ProductGrid(c) => merge_fields(c, patch, kind),
            SectionContent::RichText(c) => merge_fields(c, patch, kind),
        }
    }

    /// Number of repeated sub-items (feature cards, images, quotes)
    pub fn item_count(&self) -> usize {
        match self {
            SectionContent::Features(c) => c.items.len(),
            SectionContent::Gallery(c) => c.images.len(),
            SectionContent::Testimonials(c) => c.items.len(),
            SectionContent::ProductGrid(c) => c.product_count as usize,
            _ => 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeroContent {
    pub title: String,
    pub subtitle: String,
    pub button_text: String,
    pub button_link: String,
    pub background_image: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeaturesContent {
    pub title: String,
    pub subtitle: String,
    pub items: Vec<FeatureItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureItem {
    pub icon: String,
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryContent {
    pub title: String,
    pub columns: u8,
    pub images: Vec<GalleryImage>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GalleryImage {
    pub url: String,
    pub alt: String,
    pub caption: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestimonialsContent {
    pub title: String,
    pub items: Vec<Testimonial>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Testimonial {
    pub name: String,
    pub role: String,
    pub quote: String,
    pub rating: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactContent {
    pub title: String,
    pub subtitle: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub show_form: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsletterContent {
    pub title: String,
    pub subtitle: String,
    pub placeholder: String,
    pub button_text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductGridContent {
    pub title: String,
    pub collection: String,
    pub product_count: u32,
    pub columns: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RichTextContent {
    pub heading: String,
    pub body: String,
}

// ============================================================================
// Block content
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "content", rename_all = "snake_case")]
pub enum BlockContent {
    Heading(HeadingBlock),
    Text(TextBlock),
    Button(ButtonBlock),
    Image(ImageBlock),
    Spacer(SpacerBlock),
}

impl BlockContent {
    pub fn block_type(&self) -> BlockType {
        match self {
            BlockContent::Heading(_) => BlockType::Heading,
            BlockContent::Text(_) => BlockType::Text,
            BlockContent::Button(_) => BlockType::Button,
            BlockContent::Image(_) => BlockType::Image,
            BlockContent::Spacer(_) => BlockType::Spacer,
        }
    }

    /// Same contract as [`SectionContent::merge`].
    pub fn merge(&mut self, patch: &Map<String, Value>) -> Result<(), EditorError> {
        let kind = self.block_type().as_str();
        match self {
            BlockContent::Heading(c) => merge_fields(c, patch, kind),
            BlockContent::Text(c) => merge_fields(c, patch, kind),
            BlockContent::Button(c) => merge_fields(c, patch, kind),
            BlockContent::Image(c) => merge_fields(c, patch, kind),
            BlockContent::Spacer(c) => merge_fields(c, patch, kind),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeadingBlock {
    pub text: String,
    pub level: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextBlock {
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ButtonBlock {
    pub label: String,
    pub link: String,
    pub variant: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageBlock {
    pub url: String,
    pub alt: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpacerBlock {
    pub height: u32,
}

// ============================================================================
// Settings
// ============================================================================

/// Style attributes shared by every section type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SectionSettings {
    pub background_color: String,
    pub text_color: String,
    pub padding_top: u32,
    pub padding_bottom: u32,
}

impl Default for SectionSettings {
    fn default() -> Self {
        Self {
            background_color: "#ffffff".to_string(),
            text_color: "#111827".to_string(),
            padding_top: 64,
            padding_bottom: 64,
        }
    }
}

/// Partial update for [`SectionSettings`]; absent fields are left untouched
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SettingsPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding_top: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding_bottom: Option<u32>,
}

impl SettingsPatch {
    pub fn apply_to(&self, settings: &mut SectionSettings) {
        if let Some(v) = &self.background_color {
            settings.background_color = v.clone();
        }
        if let Some(v) = &self.text_color {
            settings.text_color = v.clone();
        }
        if let Some(v) = self.padding_top {
            settings.padding_top = v;
        }
        if let Some(v) = self.padding_bottom {
            settings.padding_bottom = v;
        }
    }
}

/// Partial update for a whole section
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SectionPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<Map<String, Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settings: Option<SettingsPatch>,
}

impl SectionPatch {
    pub fn content(fields: Map<String, Value>) -> Self {
        Self {
            content: Some(fields),
            settings: None,
        }
    }

    pub fn settings(settings: SettingsPatch) -> Self {
        Self {
            content: None,
            settings: Some(settings),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BlockSettings {
    pub alignment: Alignment,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    pub margin_top: u32,
    pub margin_bottom: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BlockSettingsPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alignment: Option<Alignment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin_top: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin_bottom: Option<u32>,
}

impl BlockSettingsPatch {
    pub fn apply_to(&self, settings: &mut BlockSettings) {
        if let Some(v) = self.alignment {
            settings.alignment = v;
        }
        if let Some(v) = &self.color {
            settings.color = Some(v.clone());
        }
        if let Some(v) = self.margin_top {
            settings.margin_top = v;
        }
        if let Some(v) = self.margin_bottom {
            settings.margin_bottom = v;
        }
    }
}

/// Theme-wide settings saved alongside the layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GlobalSettings {
    pub primary_color: String,
    pub secondary_color: String,
    pub font_family: String,
    pub heading_font: String,
    pub border_radius: u32,
    pub container_width: u32,

    /// Keys this version does not model, kept so they survive a save
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for GlobalSettings {
    fn default() -> Self {
        Self {
            primary_color: "#2563eb".to_string(),
            secondary_color: "#f59e0b".to_string(),
            font_family: "Inter".to_string(),
            heading_font: "Inter".to_string(),
            border_radius: 8,
            container_width: 1200,
            extra: Map::new(),
        }
    }
}

impl GlobalSettings {
    /// Merge a patch. Known keys must keep their type; unknown keys land in `extra`.
    pub fn merge(&mut self, patch: &Map<String, Value>) -> Result<(), EditorError> {
        let mut fields = match serde_json::to_value(&*self)? {
            Value::Object(fields) => fields,
            _ => return Err(EditorError::InvalidPatch("settings are not an object".into())),
        };
        for (key, value) in patch {
            fields.insert(key.clone(), value.clone());
        }
        *self = serde_json::from_value(Value::Object(fields))
            .map_err(|e| EditorError::InvalidPatch(e.to_string()))?;
        Ok(())
    }
}

fn merge_fields<T>(target: &mut T, patch: &Map<String, Value>, kind: &str) -> Result<(), EditorError>
where
    T: Serialize + DeserializeOwned,
{
    let mut fields = match serde_json::to_value(&*target)? {
        Value::Object(fields) => fields,
        _ => return Err(EditorError::InvalidPatch(format!("{} content is not an object", kind))),
    };

    for (key, value) in patch {
        match fields.get_mut(key) {
            Some(slot) => *slot = value.clone(),
            None => {
                return Err(EditorError::UnknownField {
                    kind: kind.to_string(),
                    field: key.clone(),
                })
            }
        }
    }

    *target = serde_json::from_value(Value::Object(fields))
        .map_err(|e| EditorError::InvalidPatch(e.to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::section_template;
    use serde_json::json;

    fn hero() -> Section {
        let template = section_template(SectionType::Hero);
        Section {
            id: "section-1".to_string(),
            content: template.content,
            settings: template.settings,
            blocks: vec![],
        }
    }

    #[test]
    fn test_section_wire_format() {
        let value = serde_json::to_value(hero()).unwrap();
        assert_eq!(value["id"], "section-1");
        assert_eq!(value["type"], "hero");
        assert!(value["content"]["buttonText"].is_string());
        assert!(value["settings"]["paddingTop"].is_number());
        assert!(value["blocks"].as_array().unwrap().is_empty());

        let parsed: Section = serde_json::from_value(value).unwrap();
        assert_eq!(parsed, hero());
    }

    #[test]
    fn test_merge_keeps_untouched_fields() {
        let mut content = hero().content;
        let patch = json!({ "title": "Summer sale" });
        content.merge(patch.as_object().unwrap()).unwrap();

        match content {
            SectionContent::Hero(hero) => {
                assert_eq!(hero.title, "Summer sale");
                assert!(!hero.subtitle.is_empty());
            }
            _ => panic!("Expected hero content"),
        }
    }

    #[test]
    fn test_merge_rejects_unknown_field() {
        let mut content = hero().content;
        let before = content.clone();
        let patch = json!({ "title": "New", "headline": "Nope" });

        let err = content.merge(patch.as_object().unwrap()).unwrap_err();
        assert!(matches!(err, EditorError::UnknownField { .. }));
        assert_eq!(content, before);
    }

    #[test]
    fn test_merge_rejects_wrong_type() {
        let mut content = section_template(SectionType::ProductGrid).content;
        let before = content.clone();
        let patch = json!({ "productCount": "eight" });

        let err = content.merge(patch.as_object().unwrap()).unwrap_err();
        assert!(matches!(err, EditorError::InvalidPatch(_)));
        assert_eq!(content, before);
    }

    #[test]
    fn test_settings_patch_is_partial() {
        let mut settings = SectionSettings::default();
        SettingsPatch {
            padding_top: Some(12),
            ..Default::default()
        }
        .apply_to(&mut settings);

        assert_eq!(settings.padding_top, 12);
        assert_eq!(settings.padding_bottom, 64);
        assert_eq!(settings.background_color, "#ffffff");
    }

    #[test]
    fn test_global_settings_keep_unknown_keys() {
        let mut settings = GlobalSettings::default();
        let patch = json!({ "primaryColor": "#000000", "logoUrl": "/logo.svg" });
        settings.merge(patch.as_object().unwrap()).unwrap();

        assert_eq!(settings.primary_color, "#000000");
        assert_eq!(settings.extra.get("logoUrl"), Some(&json!("/logo.svg")));

        let round_trip: GlobalSettings =
            serde_json::from_value(serde_json::to_value(&settings).unwrap()).unwrap();
        assert_eq!(round_trip, settings);
    }

    #[test]
    fn test_global_settings_reject_bad_type() {
        let mut settings = GlobalSettings::default();
        let patch = json!({ "borderRadius": "round" });
        assert!(settings.merge(patch.as_object().unwrap()).is_err());
        assert_eq!(settings, GlobalSettings::default());
    }
}
