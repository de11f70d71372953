use serde::Serialize;
use serde_json::{Map, Value};
use storefront_editor::{
    resolve_drop, BlockSelection, DesignDocument, DesignStore, DragSource, DropTarget,
    EditorConfig, Mutation, SaveTicket, SectionPatch, Viewport,
};
use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

fn to_js<E: std::fmt::Display>(e: E) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn parse_json<T: serde::de::DeserializeOwned>(json: &str) -> Result<T, JsValue> {
    serde_json::from_str(json).map_err(|e| to_js(format!("Invalid JSON: {}", e)))
}

fn parse_object(json: &str) -> Result<Map<String, Value>, JsValue> {
    parse_json(json)
}

fn to_json<T: Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value).map_err(|e| to_js(format!("Serialization error: {}", e)))
}

fn to_index(value: Option<u32>) -> Option<usize> {
    value.map(|i| i as usize)
}

/// Editor state the UI binds to, besides the document itself
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct EditorState<'a> {
    store_id: Option<&'a str>,
    selected_section_id: Option<&'a str>,
    selected_block: Option<&'a BlockSelection>,
    is_dirty: bool,
    is_saving: bool,
    is_preview_mode: bool,
    viewport_width: u32,
    can_undo: bool,
    can_redo: bool,
    undo_label: Option<&'a str>,
    redo_label: Option<&'a str>,
}

/// What the page's fetch layer should persist
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SaveRequest<'a> {
    store_id: &'a str,
    document: &'a DesignDocument,
}

/// The design store exposed to JavaScript.
///
/// Everything crosses the boundary as JSON strings. The page owns the
/// network: it calls `loadDocument` with what it fetched, and brackets
/// its own POST with `beginSave` / `finishSave`.
#[wasm_bindgen]
pub struct DesignEditor {
    store: DesignStore,
    pending_save: Option<SaveTicket>,
}

#[wasm_bindgen]
impl DesignEditor {
    #[wasm_bindgen(constructor)]
    pub fn new() -> DesignEditor {
        DesignEditor {
            store: DesignStore::new(),
            pending_save: None,
        }
    }

    #[wasm_bindgen(js_name = withHistoryLimit)]
    pub fn with_history_limit(limit: u32) -> DesignEditor {
        DesignEditor {
            store: DesignStore::with_config(EditorConfig {
                history_limit: limit as usize,
            }),
            pending_save: None,
        }
    }

    // --- Loading ---

    /// Replace the design with a fetched `{ layout, globalSettings }` document
    #[wasm_bindgen(js_name = loadDocument)]
    pub fn load_document(&mut self, store_id: &str, json: &str) -> Result<(), JsValue> {
        let document: DesignDocument = parse_json(json)?;
        self.store.load(store_id, document);
        self.pending_save = None;
        Ok(())
    }

    /// Start from an empty design (nothing saved, or the fetch failed)
    #[wasm_bindgen(js_name = loadEmpty)]
    pub fn load_empty(&mut self, store_id: &str) {
        self.store.load_empty(store_id);
        self.pending_save = None;
    }

    // --- Queries ---

    #[wasm_bindgen(js_name = documentJson)]
    pub fn document_json(&self) -> Result<String, JsValue> {
        to_json(self.store.design())
    }

    #[wasm_bindgen(js_name = stateJson)]
    pub fn state_json(&self) -> Result<String, JsValue> {
        let history = self.store.history();
        to_json(&EditorState {
            store_id: self.store.store_id(),
            selected_section_id: self.store.selected_section_id(),
            selected_block: self.store.selected_block(),
            is_dirty: self.store.is_dirty(),
            is_saving: self.store.is_saving(),
            is_preview_mode: self.store.is_preview_mode(),
            viewport_width: self.store.viewport().width(),
            can_undo: history.can_undo(),
            can_redo: history.can_redo(),
            undo_label: history.undo_label(),
            redo_label: history.redo_label(),
        })
    }

    #[wasm_bindgen(js_name = previewJson)]
    pub fn preview_json(&self) -> Result<String, JsValue> {
        to_json(&self.store.preview())
    }

    // --- Mutations ---

    /// Apply any mutation given as JSON, e.g. `{"type":"addSection","sectionType":"hero"}`.
    /// Returns the id of a created section or block, if any.
    #[wasm_bindgen(js_name = applyMutation)]
    pub fn apply_mutation(&mut self, json: &str) -> Result<Option<String>, JsValue> {
        let mutation: Mutation = parse_json(json)?;
        let result = self.store.apply(mutation).map_err(to_js)?;
        Ok(result.created_id)
    }

    #[wasm_bindgen(js_name = addSection)]
    pub fn add_section(&mut self, section_type: &str, index: Option<u32>) -> Result<String, JsValue> {
        self.store
            .add_section(section_type, to_index(index))
            .map_err(to_js)
    }

    #[wasm_bindgen(js_name = removeSection)]
    pub fn remove_section(&mut self, section_id: &str) -> Result<(), JsValue> {
        self.store.remove_section(section_id).map_err(to_js)
    }

    #[wasm_bindgen(js_name = reorderSections)]
    pub fn reorder_sections(&mut self, from: u32, to: u32) -> Result<(), JsValue> {
        self.store
            .reorder_sections(from as usize, to as usize)
            .map_err(to_js)
    }

    #[wasm_bindgen(js_name = duplicateSection)]
    pub fn duplicate_section(&mut self, section_id: &str) -> Result<String, JsValue> {
        self.store.duplicate_section(section_id).map_err(to_js)
    }

    /// `patch` is `{ "content"?: {...}, "settings"?: {...} }`
    #[wasm_bindgen(js_name = updateSection)]
    pub fn update_section(&mut self, section_id: &str, patch: &str) -> Result<(), JsValue> {
        let patch: SectionPatch = parse_json(patch)?;
        self.store.update_section(section_id, patch).map_err(to_js)
    }

    #[wasm_bindgen(js_name = addBlock)]
    pub fn add_block(
        &mut self,
        section_id: &str,
        block_type: &str,
        index: Option<u32>,
    ) -> Result<String, JsValue> {
        self.store
            .add_block(section_id, block_type, to_index(index))
            .map_err(to_js)
    }

    #[wasm_bindgen(js_name = deleteBlock)]
    pub fn delete_block(&mut self, section_id: &str, block_id: &str) -> Result<(), JsValue> {
        self.store.delete_block(section_id, block_id).map_err(to_js)
    }

    #[wasm_bindgen(js_name = updateBlockContent)]
    pub fn update_block_content(
        &mut self,
        section_id: &str,
        block_id: &str,
        content: &str,
    ) -> Result<(), JsValue> {
        let content = parse_object(content)?;
        self.store
            .update_block_content(section_id, block_id, content)
            .map_err(to_js)
    }

    #[wasm_bindgen(js_name = updateBlockSettings)]
    pub fn update_block_settings(
        &mut self,
        section_id: &str,
        block_id: &str,
        settings: &str,
    ) -> Result<(), JsValue> {
        let settings = parse_json(settings)?;
        self.store
            .update_block_settings(section_id, block_id, settings)
            .map_err(to_js)
    }

    #[wasm_bindgen(js_name = reorderBlocks)]
    pub fn reorder_blocks(&mut self, section_id: &str, from: u32, to: u32) -> Result<(), JsValue> {
        self.store
            .reorder_blocks(section_id, from as usize, to as usize)
            .map_err(to_js)
    }

    #[wasm_bindgen(js_name = duplicateBlock)]
    pub fn duplicate_block(&mut self, section_id: &str, block_id: &str) -> Result<String, JsValue> {
        self.store.duplicate_block(section_id, block_id).map_err(to_js)
    }

    #[wasm_bindgen(js_name = updateGlobalSettings)]
    pub fn update_global_settings(&mut self, settings: &str) -> Result<(), JsValue> {
        let settings = parse_object(settings)?;
        self.store.update_global_settings(settings).map_err(to_js)
    }

    /// Commit a finished drag. `source` and `target` use the drag adapter's
    /// JSON shapes; returns the created id for palette drops.
    #[wasm_bindgen(js_name = dropJson)]
    pub fn drop_json(&mut self, source: &str, target: &str) -> Result<Option<String>, JsValue> {
        let source: DragSource = parse_json(source)?;
        let target: DropTarget = parse_json(target)?;
        match resolve_drop(source, target) {
            Some(mutation) => {
                let result = self.store.apply(mutation).map_err(to_js)?;
                Ok(result.created_id)
            }
            None => Ok(None),
        }
    }

    // --- UI state ---

    #[wasm_bindgen(js_name = selectSection)]
    pub fn select_section(&mut self, section_id: Option<String>) -> Result<(), JsValue> {
        self.store
            .select_section(section_id.as_deref())
            .map_err(to_js)
    }

    #[wasm_bindgen(js_name = selectBlock)]
    pub fn select_block(&mut self, section_id: &str, block_id: &str) -> Result<(), JsValue> {
        self.store.select_block(section_id, block_id).map_err(to_js)
    }

    #[wasm_bindgen(js_name = setPreviewMode)]
    pub fn set_preview_mode(&mut self, enabled: bool) {
        self.store.set_preview_mode(enabled);
    }

    /// `mobile`, `tablet`, `desktop`, or a pixel width
    #[wasm_bindgen(js_name = setViewport)]
    pub fn set_viewport(&mut self, viewport: &str) -> Result<(), JsValue> {
        let viewport = Viewport::parse(viewport)
            .ok_or_else(|| to_js(format!("Unknown viewport: {}", viewport)))?;
        self.store.set_viewport(viewport);
        Ok(())
    }

    // --- History ---

    pub fn undo(&mut self) -> bool {
        self.store.undo()
    }

    pub fn redo(&mut self) -> bool {
        self.store.redo()
    }

    // --- Export / import ---

    /// `now_ms` is `Date.now()` from the page
    #[wasm_bindgen(js_name = exportJson)]
    pub fn export_json(&self, now_ms: f64) -> Result<String, JsValue> {
        let exported_at = chrono::DateTime::<chrono::Utc>::from_timestamp_millis(now_ms as i64)
            .ok_or_else(|| to_js("Invalid export timestamp"))?;
        self.store.export_json(exported_at).map_err(to_js)
    }

    #[wasm_bindgen(js_name = importJson)]
    pub fn import_json(&mut self, json: &str) -> Result<(), JsValue> {
        self.store.import_json(json).map_err(to_js)
    }

    // --- Saving ---

    /// Claim the save slot. Returns `{ storeId, document }` for the page to POST.
    #[wasm_bindgen(js_name = beginSave)]
    pub fn begin_save(&mut self) -> Result<String, JsValue> {
        let ticket = self.store.begin_save().map_err(to_js)?;
        let json = to_json(&SaveRequest {
            store_id: &ticket.store_id,
            document: &ticket.document,
        });
        self.pending_save = Some(ticket);
        json
    }

    /// Report how the POST went; `error` is `undefined` on success
    #[wasm_bindgen(js_name = finishSave)]
    pub fn finish_save(&mut self, error: Option<String>) -> Result<(), JsValue> {
        let ticket = self
            .pending_save
            .take()
            .ok_or_else(|| to_js("No save in progress"))?;
        let outcome = match error {
            None => Ok(()),
            Some(message) => Err(message),
        };
        self.store.finish_save(ticket, outcome).map_err(to_js)
    }

    #[wasm_bindgen(js_name = markSaved)]
    pub fn mark_saved(&mut self) -> Result<(), JsValue> {
        self.finish_save(None)
    }
}

impl Default for DesignEditor {
    fn default() -> Self {
        Self::new()
    }
}
