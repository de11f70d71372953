//! # Design Store
//!
//! Editing state for one open design: the live document, undo history,
//! selection, preview mode and the dirty/saving flags.
//!
//! A store is constructed explicitly and owned by whatever view hosts the
//! editor; there is no process-wide instance. All mutations are synchronous
//! and run to completion:
//!
//! ```text
//! apply(mutation) → validate on a working copy → commit → snapshot → dirty
//! ```
//!
//! A rejected mutation leaves the document, history and flags untouched.
//!
//! Persistence is split into [`DesignStore::begin_save`] and
//! [`DesignStore::finish_save`] so the network round-trip can happen
//! between them without the store knowing anything about the transport.

use crate::preview::{render_preview, PreviewFrame, Viewport};
use crate::section::{BlockSettingsPatch, GlobalSettings, Section, SectionPatch};
use crate::undo_stack::UndoStack;
use crate::{DesignDocument, DesignExport, EditorConfig, EditorError, Mutation, MutationResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A block picked for editing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockSelection {
    pub section_id: String,
    pub block_id: String,
}

/// An outstanding save: what to persist, and where
#[derive(Debug, Clone, PartialEq)]
pub struct SaveTicket {
    pub store_id: String,
    pub document: DesignDocument,
    generation: u64,
}

pub struct DesignStore {
    store_id: Option<String>,
    design: DesignDocument,
    history: UndoStack,
    selected_section: Option<String>,
    selected_block: Option<BlockSelection>,
    preview_mode: bool,
    viewport: Viewport,
    dirty: bool,
    saving: bool,
    /// Last document loaded or saved
    clean: DesignDocument,
    /// Bumped on every load; tickets from an older load are stale
    generation: u64,
}

impl DesignStore {
    pub fn new() -> Self {
        Self::with_config(EditorConfig::default())
    }

    pub fn with_config(config: EditorConfig) -> Self {
        let design = DesignDocument::default();
        Self {
            store_id: None,
            history: UndoStack::with_max_entries(design.clone(), config.history_limit),
            clean: design.clone(),
            design,
            selected_section: None,
            selected_block: None,
            preview_mode: false,
            viewport: Viewport::default(),
            dirty: false,
            saving: false,
            generation: 0,
        }
    }

    // ========================================================================
    // Queries
    // ========================================================================

    pub fn store_id(&self) -> Option<&str> {
        self.store_id.as_deref()
    }

    pub fn design(&self) -> &DesignDocument {
        &self.design
    }

    pub fn sections(&self) -> &[Section] {
        &self.design.layout
    }

    pub fn section(&self, section_id: &str) -> Option<&Section> {
        self.design.find_section(section_id)
    }

    pub fn global_settings(&self) -> &GlobalSettings {
        &self.design.global_settings
    }

    pub fn selected_section_id(&self) -> Option<&str> {
        self.selected_section.as_deref()
    }

    pub fn selected_section(&self) -> Option<&Section> {
        self.selected_section
            .as_deref()
            .and_then(|id| self.design.find_section(id))
    }

    pub fn selected_block(&self) -> Option<&BlockSelection> {
        self.selected_block.as_ref()
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn is_saving(&self) -> bool {
        self.saving
    }

    pub fn is_preview_mode(&self) -> bool {
        self.preview_mode
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn history(&self) -> &UndoStack {
        &self.history
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Project the live document at the current viewport
    pub fn preview(&self) -> PreviewFrame {
        render_preview(&self.design, self.viewport, self.selected_section.as_deref())
    }

    // ========================================================================
    // Mutations
    // ========================================================================

    /// Apply a mutation, record a snapshot and mark the store dirty
    pub fn apply(&mut self, mutation: Mutation) -> Result<MutationResult, EditorError> {
        let mut next = self.design.clone();
        let result = match mutation.apply(&mut next) {
            Ok(result) => result,
            Err(e) => {
                tracing::debug!(error = %e, "rejected {:?}", mutation);
                return Err(e);
            }
        };

        let label = mutation.label();
        tracing::debug!(label = %label, "applied mutation");

        self.commit(label, next);
        self.update_selection(&mutation, &result);
        Ok(result)
    }

    /// Add a section of `section_type`; the new section becomes the selection
    pub fn add_section(
        &mut self,
        section_type: &str,
        index: Option<usize>,
    ) -> Result<String, EditorError> {
        let result = self.apply(Mutation::AddSection {
            section_type: section_type.to_string(),
            index,
        })?;
        created(result)
    }

    pub fn remove_section(&mut self, section_id: &str) -> Result<(), EditorError> {
        self.apply(Mutation::RemoveSection {
            section_id: section_id.to_string(),
        })
        .map(drop)
    }

    pub fn reorder_sections(&mut self, from: usize, to: usize) -> Result<(), EditorError> {
        self.apply(Mutation::ReorderSections { from, to }).map(drop)
    }

    /// Copy a section in place; the copy becomes the selection
    pub fn duplicate_section(&mut self, section_id: &str) -> Result<String, EditorError> {
        let result = self.apply(Mutation::DuplicateSection {
            section_id: section_id.to_string(),
        })?;
        created(result)
    }

    pub fn update_section(&mut self, section_id: &str, patch: SectionPatch) -> Result<(), EditorError> {
        self.apply(Mutation::update_section(section_id, patch)).map(drop)
    }

    pub fn add_block(
        &mut self,
        section_id: &str,
        block_type: &str,
        index: Option<usize>,
    ) -> Result<String, EditorError> {
        let result = self.apply(Mutation::AddBlock {
            section_id: section_id.to_string(),
            block_type: block_type.to_string(),
            index,
        })?;
        created(result)
    }

    pub fn delete_block(&mut self, section_id: &str, block_id: &str) -> Result<(), EditorError> {
        self.apply(Mutation::DeleteBlock {
            section_id: section_id.to_string(),
            block_id: block_id.to_string(),
        })
        .map(drop)
    }

    pub fn update_block_content(
        &mut self,
        section_id: &str,
        block_id: &str,
        content: Map<String, Value>,
    ) -> Result<(), EditorError> {
        self.apply(Mutation::UpdateBlockContent {
            section_id: section_id.to_string(),
            block_id: block_id.to_string(),
            content,
        })
        .map(drop)
    }

    pub fn update_block_settings(
        &mut self,
        section_id: &str,
        block_id: &str,
        settings: BlockSettingsPatch,
    ) -> Result<(), EditorError> {
        self.apply(Mutation::UpdateBlockSettings {
            section_id: section_id.to_string(),
            block_id: block_id.to_string(),
            settings,
        })
        .map(drop)
    }

    pub fn reorder_blocks(&mut self, section_id: &str, from: usize, to: usize) -> Result<(), EditorError> {
        self.apply(Mutation::ReorderBlocks {
            section_id: section_id.to_string(),
            from,
            to,
        })
        .map(drop)
    }

    pub fn duplicate_block(&mut self, section_id: &str, block_id: &str) -> Result<String, EditorError> {
        let result = self.apply(Mutation::DuplicateBlock {
            section_id: section_id.to_string(),
            block_id: block_id.to_string(),
        })?;
        created(result)
    }

    pub fn update_global_settings(&mut self, settings: Map<String, Value>) -> Result<(), EditorError> {
        self.apply(Mutation::UpdateGlobalSettings { settings }).map(drop)
    }

    // ========================================================================
    // UI state
    // ========================================================================

    /// Select a section for editing, or clear the selection with `None`
    pub fn select_section(&mut self, section_id: Option<&str>) -> Result<(), EditorError> {
        let Some(id) = section_id else {
            self.selected_section = None;
            self.selected_block = None;
            return Ok(());
        };

        if self.preview_mode {
            return Err(EditorError::PreviewMode);
        }
        if self.design.find_section(id).is_none() {
            return Err(EditorError::SectionNotFound(id.to_string()));
        }

        if self.selected_section.as_deref() != Some(id) {
            self.selected_block = None;
        }
        self.selected_section = Some(id.to_string());
        Ok(())
    }

    /// Select a block; its section becomes the selected section
    pub fn select_block(&mut self, section_id: &str, block_id: &str) -> Result<(), EditorError> {
        if self.preview_mode {
            return Err(EditorError::PreviewMode);
        }
        if self.design.find_section(section_id).is_none() {
            return Err(EditorError::SectionNotFound(section_id.to_string()));
        }
        if self.design.find_block(section_id, block_id).is_none() {
            return Err(EditorError::BlockNotFound {
                section_id: section_id.to_string(),
                block_id: block_id.to_string(),
            });
        }

        self.selected_section = Some(section_id.to_string());
        self.selected_block = Some(BlockSelection {
            section_id: section_id.to_string(),
            block_id: block_id.to_string(),
        });
        Ok(())
    }

    /// Entering preview mode clears the selection
    pub fn set_preview_mode(&mut self, enabled: bool) {
        self.preview_mode = enabled;
        if enabled {
            self.selected_section = None;
            self.selected_block = None;
        }
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    // ========================================================================
    // History
    // ========================================================================

    /// Returns false when there is nothing to undo
    pub fn undo(&mut self) -> bool {
        let Some(snapshot) = self.history.undo() else {
            return false;
        };
        self.design = snapshot.clone();
        self.after_history_move();
        tracing::debug!(cursor = self.history.cursor(), "undo");
        true
    }

    /// Returns false when there is nothing to redo
    pub fn redo(&mut self) -> bool {
        let Some(snapshot) = self.history.redo() else {
            return false;
        };
        self.design = snapshot.clone();
        self.after_history_move();
        tracing::debug!(cursor = self.history.cursor(), "redo");
        true
    }

    // ========================================================================
    // Load / save / import / export
    // ========================================================================

    /// Replace the whole design with one fetched for `store_id`
    pub fn load(&mut self, store_id: impl Into<String>, document: DesignDocument) {
        let store_id = store_id.into();
        tracing::debug!(store_id = %store_id, sections = document.layout.len(), "replacing design");

        self.store_id = Some(store_id);
        self.history.reset(document.clone());
        self.clean = document.clone();
        self.design = document;
        self.selected_section = None;
        self.selected_block = None;
        self.dirty = false;
        self.saving = false;
        self.generation += 1;
    }

    /// Start a brand-new design (nothing saved yet, or the load failed)
    pub fn load_empty(&mut self, store_id: impl Into<String>) {
        self.load(store_id, DesignDocument::default());
    }

    /// Claim the save slot and capture what to persist
    pub fn begin_save(&mut self) -> Result<SaveTicket, EditorError> {
        if self.saving {
            return Err(EditorError::SaveInProgress);
        }
        let store_id = self.store_id.clone().ok_or(EditorError::MissingStoreId)?;

        self.saving = true;
        Ok(SaveTicket {
            store_id,
            document: self.design.clone(),
            generation: self.generation,
        })
    }

    /// Release the save slot. On success the saved document becomes the clean
    /// baseline, so the store stays dirty only if it changed while the save
    /// was in flight; on failure the dirty flag is left alone.
    ///
    /// A ticket issued before the last `load` no longer owns the save slot
    /// and only reports its outcome.
    pub fn finish_save<E>(&mut self, ticket: SaveTicket, outcome: Result<(), E>) -> Result<(), E>
    where
        E: std::fmt::Display,
    {
        if ticket.generation != self.generation {
            tracing::warn!(store_id = %ticket.store_id, "save finished after the design was reloaded");
            return outcome;
        }

        self.saving = false;
        match outcome {
            Ok(()) => {
                self.clean = ticket.document;
                self.dirty = self.design != self.clean;
                tracing::info!(store_id = %ticket.store_id, dirty = self.dirty, "saved design");
                Ok(())
            }
            Err(e) => {
                tracing::error!(store_id = %ticket.store_id, error = %e, "failed to save design");
                Err(e)
            }
        }
    }

    pub fn export(&self, exported_at: DateTime<Utc>) -> DesignExport {
        self.design.export(exported_at)
    }

    /// Export as pretty-printed JSON
    pub fn export_json(&self, exported_at: DateTime<Utc>) -> Result<String, EditorError> {
        Ok(serde_json::to_string_pretty(&self.export(exported_at))?)
    }

    /// Replace the design with an imported file; undoable like any edit
    pub fn import_json(&mut self, json: &str) -> Result<(), EditorError> {
        let document = DesignDocument::from_import_json(json)?;
        tracing::info!(sections = document.layout.len(), "imported design");

        self.commit("Import design".to_string(), document);
        self.selected_section = None;
        self.selected_block = None;
        Ok(())
    }

    // ========================================================================
    // Internals
    // ========================================================================

    fn commit(&mut self, label: String, next: DesignDocument) {
        self.history.record(label, next.clone());
        self.design = next;
        self.dirty = true;
    }

    fn after_history_move(&mut self) {
        self.dirty = self.design != self.clean;
        self.prune_selection();
    }

    fn update_selection(&mut self, mutation: &Mutation, result: &MutationResult) {
        match mutation {
            Mutation::AddSection { .. } | Mutation::DuplicateSection { .. } => {
                if !self.preview_mode {
                    self.selected_section = result.created_id.clone();
                    self.selected_block = None;
                }
            }
            _ => self.prune_selection(),
        }
    }

    /// Drop selections that point at sections or blocks that no longer exist
    fn prune_selection(&mut self) {
        if let Some(id) = &self.selected_section {
            if self.design.find_section(id).is_none() {
                self.selected_section = None;
            }
        }
        if let Some(sel) = &self.selected_block {
            if self.design.find_block(&sel.section_id, &sel.block_id).is_none() {
                self.selected_block = None;
            }
        }
    }
}

impl Default for DesignStore {
    fn default() -> Self {
        Self::new()
    }
}

fn created(result: MutationResult) -> Result<String, EditorError> {
    result
        .created_id
        .ok_or_else(|| EditorError::InvalidPatch("mutation did not create an item".into()))
}
