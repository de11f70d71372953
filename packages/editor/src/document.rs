//! # Design Document
//!
//! The full editable tree: the ordered section list plus theme-wide
//! settings. This is the unit that is snapshotted by the undo stack,
//! persisted by the gateway and written to export files.
//!
//! ## Export format
//!
//! ```text
//! { "layout": [Section…], "globalSettings": {…}, "exportedAt": "2024-…Z" }
//! ```
//!
//! Import accepts the same shape (`exportedAt` optional) and rejects the
//! file unless `layout` is a list.

use crate::section::{Block, Section};
use crate::EditorError;
use crate::GlobalSettings;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignDocument {
    #[serde(default)]
    pub layout: Vec<Section>,

    #[serde(default)]
    pub global_settings: GlobalSettings,
}

/// Downloadable export of a design
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignExport {
    pub layout: Vec<Section>,
    pub global_settings: GlobalSettings,
    pub exported_at: DateTime<Utc>,
}

impl DesignDocument {
    pub fn new(layout: Vec<Section>) -> Self {
        Self {
            layout,
            global_settings: GlobalSettings::default(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.layout.is_empty()
    }

    pub fn find_section(&self, section_id: &str) -> Option<&Section> {
        self.layout.iter().find(|s| s.id == section_id)
    }

    pub fn find_section_mut(&mut self, section_id: &str) -> Option<&mut Section> {
        self.layout.iter_mut().find(|s| s.id == section_id)
    }

    pub fn section_index(&self, section_id: &str) -> Option<usize> {
        self.layout.iter().position(|s| s.id == section_id)
    }

    pub fn find_block(&self, section_id: &str, block_id: &str) -> Option<&Block> {
        self.find_section(section_id)
            .and_then(|section| section.find_block(block_id))
    }

    /// Check that section ids are unique across the tree and block ids are
    /// unique within their section.
    pub fn validate_ids(&self) -> Result<(), EditorError> {
        let mut section_ids = HashSet::new();
        for section in &self.layout {
            if !section_ids.insert(section.id.as_str()) {
                return Err(EditorError::DuplicateId(section.id.clone()));
            }
            let mut block_ids = HashSet::new();
            for block in &section.blocks {
                if !block_ids.insert(block.id.as_str()) {
                    return Err(EditorError::DuplicateId(block.id.clone()));
                }
            }
        }
        Ok(())
    }

    /// Build the export payload stamped with `exported_at`
    pub fn export(&self, exported_at: DateTime<Utc>) -> DesignExport {
        DesignExport {
            layout: self.layout.clone(),
            global_settings: self.global_settings.clone(),
            exported_at,
        }
    }

    /// Parse and validate an import file
    pub fn from_import_json(json: &str) -> Result<Self, EditorError> {
        let value: Value = serde_json::from_str(json)
            .map_err(|e| EditorError::InvalidImport(format!("not valid JSON: {}", e)))?;
        Self::from_import_value(value)
    }

    /// Validate an already-parsed document (import files and save bodies)
    pub fn from_import_value(value: Value) -> Result<Self, EditorError> {
        let Value::Object(mut fields) = value else {
            return Err(EditorError::InvalidImport("expected a JSON object".into()));
        };

        match fields.get("layout") {
            Some(Value::Array(_)) => {}
            _ => return Err(EditorError::InvalidImport("layout must be a list".into())),
        }

        // Export metadata is not part of the document
        fields.remove("exportedAt");

        let document: DesignDocument = serde_json::from_value(Value::Object(fields))
            .map_err(|e| EditorError::InvalidImport(e.to_string()))?;
        document.validate_ids()?;
        Ok(document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{section_template, SectionType};
    use chrono::TimeZone;

    fn section(id: &str, section_type: SectionType) -> Section {
        let template = section_template(section_type);
        Section {
            id: id.to_string(),
            content: template.content,
            settings: template.settings,
            blocks: vec![],
        }
    }

    #[test]
    fn test_export_then_import() {
        let doc = DesignDocument::new(vec![
            section("a", SectionType::Hero),
            section("b", SectionType::Newsletter),
        ]);
        let exported_at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();

        let json = serde_json::to_string(&doc.export(exported_at)).unwrap();
        assert!(json.contains("\"exportedAt\""));
        assert!(json.contains("\"globalSettings\""));

        let imported = DesignDocument::from_import_json(&json).unwrap();
        assert_eq!(imported, doc);
    }

    #[test]
    fn test_import_requires_layout_list() {
        let err = DesignDocument::from_import_json(r#"{"layout": {"id": "x"}}"#).unwrap_err();
        assert_eq!(err, EditorError::InvalidImport("layout must be a list".into()));

        let err = DesignDocument::from_import_json(r#"{"globalSettings": {}}"#).unwrap_err();
        assert_eq!(err, EditorError::InvalidImport("layout must be a list".into()));

        assert!(DesignDocument::from_import_json("[]").is_err());
        assert!(DesignDocument::from_import_json("not json").is_err());
    }

    #[test]
    fn test_import_defaults_missing_settings() {
        let doc = DesignDocument::from_import_json(r#"{"layout": []}"#).unwrap();
        assert!(doc.is_empty());
        assert_eq!(doc.global_settings, GlobalSettings::default());
    }

    #[test]
    fn test_import_rejects_duplicate_ids() {
        let doc = DesignDocument::new(vec![
            section("same", SectionType::Hero),
            section("same", SectionType::Contact),
        ]);
        let json = serde_json::to_string(&doc).unwrap();
        assert_eq!(
            DesignDocument::from_import_json(&json).unwrap_err(),
            EditorError::DuplicateId("same".into())
        );
    }

    #[test]
    fn test_import_rejects_unknown_section_type() {
        let json = r#"{"layout": [{"id": "a", "type": "carousel", "content": {}}]}"#;
        assert!(matches!(
            DesignDocument::from_import_json(json),
            Err(EditorError::InvalidImport(_))
        ));
    }
}
