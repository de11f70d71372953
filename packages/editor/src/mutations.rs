//! # Design Mutations
//!
//! Semantic operations on a [`DesignDocument`].
//!
//! ## Design Principles
//!
//! 1. **Intent-preserving**: each mutation names one editor action
//! 2. **Validated**: unknown types, bad indices and bad patches are rejected
//! 3. **All-or-nothing**: a failed mutation leaves the document untouched
//! 4. **Serializable**: drag adapters and browser bindings speak this enum
//!
//! ## Mutation Semantics
//!
//! ### Reorder
//! - Removes the element at `from` and reinserts it at `to`
//! - Both indices must be within `[0, len)`
//!
//! ### Update
//! - Shallow merge into existing content/settings, never replace
//! - Every content key must exist on the target's type
//!
//! ### Duplicate
//! - Deep copy with a fresh id, inserted directly after the original

use crate::document::DesignDocument;
use crate::registry::{lookup_block, lookup_section};
use crate::section::{generate_id, Block, BlockSettingsPatch, Section, SectionPatch, SettingsPatch};
use crate::EditorError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Mutation {
    /// Insert a new section seeded from the registry; appends when `index`
    /// is absent or out of range
    AddSection {
        section_type: String,
        #[serde(default)]
        index: Option<usize>,
    },

    RemoveSection {
        section_id: String,
    },

    ReorderSections {
        from: usize,
        to: usize,
    },

    DuplicateSection {
        section_id: String,
    },

    UpdateSection {
        section_id: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        content: Option<Map<String, Value>>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        settings: Option<SettingsPatch>,
    },

    AddBlock {
        section_id: String,
        block_type: String,
        #[serde(default)]
        index: Option<usize>,
    },

    DeleteBlock {
        section_id: String,
        block_id: String,
    },

    UpdateBlockContent {
        section_id: String,
        block_id: String,
        content: Map<String, Value>,
    },

    UpdateBlockSettings {
        section_id: String,
        block_id: String,
        settings: BlockSettingsPatch,
    },

    ReorderBlocks {
        section_id: String,
        from: usize,
        to: usize,
    },

    DuplicateBlock {
        section_id: String,
        block_id: String,
    },

    UpdateGlobalSettings {
        settings: Map<String, Value>,
    },
}

impl Mutation {
    /// Build an `UpdateSection` from a patch
    pub fn update_section(section_id: impl Into<String>, patch: SectionPatch) -> Self {
        Mutation::UpdateSection {
            section_id: section_id.into(),
            content: patch.content,
            settings: patch.settings,
        }
    }
}

/// What a successful mutation produced
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MutationResult {
    /// Id of a section or block the mutation created
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_id: Option<String>,
}

impl MutationResult {
    fn created(id: String) -> Self {
        Self {
            created_id: Some(id),
        }
    }
}

impl Mutation {
    /// Apply mutation to the document with validation
    pub fn apply(&self, doc: &mut DesignDocument) -> Result<MutationResult, EditorError> {
        match self {
            Mutation::AddSection {
                section_type,
                index,
            } => Self::apply_add_section(doc, section_type, *index),

            Mutation::RemoveSection { section_id } => {
                let index = section_index(doc, section_id)?;
                doc.layout.remove(index);
                Ok(MutationResult::default())
            }

            Mutation::ReorderSections { from, to } => {
                move_item(&mut doc.layout, *from, *to)?;
                Ok(MutationResult::default())
            }

            Mutation::DuplicateSection { section_id } => {
                Self::apply_duplicate_section(doc, section_id)
            }

            Mutation::UpdateSection {
                section_id,
                content,
                settings,
            } => Self::apply_update_section(doc, section_id, content.as_ref(), settings.as_ref()),

            Mutation::AddBlock {
                section_id,
                block_type,
                index,
            } => Self::apply_add_block(doc, section_id, block_type, *index),

            Mutation::DeleteBlock {
                section_id,
                block_id,
            } => {
                let section = section_mut(doc, section_id)?;
                let index = block_index(section, block_id)?;
                section.blocks.remove(index);
                Ok(MutationResult::default())
            }

            Mutation::UpdateBlockContent {
                section_id,
                block_id,
                content,
            } => {
                let block = block_mut(doc, section_id, block_id)?;
                let mut next = block.content.clone();
                next.merge(content)?;
                block.content = next;
                Ok(MutationResult::default())
            }

            Mutation::UpdateBlockSettings {
                section_id,
                block_id,
                settings,
            } => {
                let block = block_mut(doc, section_id, block_id)?;
                settings.apply_to(&mut block.settings);
                Ok(MutationResult::default())
            }

            Mutation::ReorderBlocks {
                section_id,
                from,
                to,
            } => {
                let section = section_mut(doc, section_id)?;
                move_item(&mut section.blocks, *from, *to)?;
                Ok(MutationResult::default())
            }

            Mutation::DuplicateBlock {
                section_id,
                block_id,
            } => {
                let section = section_mut(doc, section_id)?;
                let index = block_index(section, block_id)?;
                let mut copy = section.blocks[index].clone();
                copy.id = generate_id("block");
                let id = copy.id.clone();
                section.blocks.insert(index + 1, copy);
                Ok(MutationResult::created(id))
            }

            Mutation::UpdateGlobalSettings { settings } => {
                doc.global_settings.merge(settings)?;
                Ok(MutationResult::default())
            }
        }
    }

    /// Short description used as the history label
    pub fn label(&self) -> String {
        match self {
            Mutation::AddSection { section_type, .. } => {
                format!("Add {} section", section_type.replace('_', " "))
            }
            Mutation::RemoveSection { .. } => "Remove section".to_string(),
            Mutation::ReorderSections { .. } => "Reorder sections".to_string(),
            Mutation::DuplicateSection { .. } => "Duplicate section".to_string(),
            Mutation::UpdateSection { .. } => "Edit section".to_string(),
            Mutation::AddBlock { block_type, .. } => format!("Add {} block", block_type),
            Mutation::DeleteBlock { .. } => "Delete block".to_string(),
            Mutation::UpdateBlockContent { .. } => "Edit block".to_string(),
            Mutation::UpdateBlockSettings { .. } => "Edit block settings".to_string(),
            Mutation::ReorderBlocks { .. } => "Reorder blocks".to_string(),
            Mutation::DuplicateBlock { .. } => "Duplicate block".to_string(),
            Mutation::UpdateGlobalSettings { .. } => "Edit theme settings".to_string(),
        }
    }

    fn apply_add_section(
        doc: &mut DesignDocument,
        section_type: &str,
        index: Option<usize>,
    ) -> Result<MutationResult, EditorError> {
        let template = lookup_section(section_type)?;
        let section = Section {
            id: generate_id("section"),
            content: template.content,
            settings: template.settings,
            blocks: Vec::new(),
        };
        let id = section.id.clone();

        match index {
            Some(i) if i <= doc.layout.len() => doc.layout.insert(i, section),
            _ => doc.layout.push(section),
        }

        Ok(MutationResult::created(id))
    }

    fn apply_duplicate_section(
        doc: &mut DesignDocument,
        section_id: &str,
    ) -> Result<MutationResult, EditorError> {
        let index = section_index(doc, section_id)?;

        let mut copy = doc.layout[index].clone();
        copy.id = generate_id("section");
        for block in &mut copy.blocks {
            block.id = generate_id("block");
        }
        let id = copy.id.clone();

        doc.layout.insert(index + 1, copy);
        Ok(MutationResult::created(id))
    }

    fn apply_update_section(
        doc: &mut DesignDocument,
        section_id: &str,
        content: Option<&Map<String, Value>>,
        settings: Option<&SettingsPatch>,
    ) -> Result<MutationResult, EditorError> {
        let section = section_mut(doc, section_id)?;

        // Merge into a copy so a rejected content patch leaves settings alone too
        let mut merged = section.content.clone();
        if let Some(fields) = content {
            merged.merge(fields)?;
        }
        section.content = merged;

        if let Some(settings) = settings {
            settings.apply_to(&mut section.settings);
        }

        Ok(MutationResult::default())
    }

    fn apply_add_block(
        doc: &mut DesignDocument,
        section_id: &str,
        block_type: &str,
        index: Option<usize>,
    ) -> Result<MutationResult, EditorError> {
        let section = section_mut(doc, section_id)?;
        let template = lookup_block(block_type)?;
        let block = Block {
            id: generate_id("block"),
            content: template.content,
            settings: template.settings,
        };
        let id = block.id.clone();

        match index {
            Some(i) if i <= section.blocks.len() => section.blocks.insert(i, block),
            _ => section.blocks.push(block),
        }

        Ok(MutationResult::created(id))
    }
}

/// Move the element at `from` to `to`, shifting the elements in between
pub fn move_item<T>(items: &mut Vec<T>, from: usize, to: usize) -> Result<(), EditorError> {
    let len = items.len();
    if from >= len {
        return Err(EditorError::IndexOutOfRange { index: from, len });
    }
    if to >= len {
        return Err(EditorError::IndexOutOfRange { index: to, len });
    }
    let item = items.remove(from);
    items.insert(to, item);
    Ok(())
}

fn section_index(doc: &DesignDocument, section_id: &str) -> Result<usize, EditorError> {
    doc.section_index(section_id)
        .ok_or_else(|| EditorError::SectionNotFound(section_id.to_string()))
}

fn section_mut<'a>(
    doc: &'a mut DesignDocument,
    section_id: &str,
) -> Result<&'a mut Section, EditorError> {
    doc.find_section_mut(section_id)
        .ok_or_else(|| EditorError::SectionNotFound(section_id.to_string()))
}

fn block_index(section: &Section, block_id: &str) -> Result<usize, EditorError> {
    section
        .block_index(block_id)
        .ok_or_else(|| EditorError::BlockNotFound {
            section_id: section.id.clone(),
            block_id: block_id.to_string(),
        })
}

fn block_mut<'a>(
    doc: &'a mut DesignDocument,
    section_id: &str,
    block_id: &str,
) -> Result<&'a mut Block, EditorError> {
    let section = section_mut(doc, section_id)?;
    let index = block_index(section, block_id)?;
    Ok(&mut section.blocks[index])
}
