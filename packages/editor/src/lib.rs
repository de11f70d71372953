//! # Storefront Editor
//!
//! Core editing engine for the storefront page builder.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ registry: section/block type → defaults     │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ store: DesignDocument lifecycle + mutations │
//! │  - Add/remove/reorder/duplicate/update      │
//! │  - Snapshot history (undo/redo)             │
//! │  - Selection, preview mode, dirty flag      │
//! │  - Save ticket for the persistence gateway  │
//! └─────────────────────────────────────────────┘
//!        ↑                            ↓
//! ┌────────────────┐     ┌──────────────────────┐
//! │ drag: gestures │     │ preview: read-only   │
//! │ → Mutation     │     │ layout per viewport  │
//! └────────────────┘     └──────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **List order is render order**: no position fields on records
//! 2. **Typed content**: one payload type per section type, checked merges
//! 3. **All-or-nothing mutations**: a rejected edit changes nothing
//! 4. **Owned snapshots**: history never shares data with the live tree
//! 5. **No I/O**: the store never touches the network
//!
//! ## Usage
//!
//! ```rust,ignore
//! use storefront_editor::{DesignStore, SectionPatch};
//!
//! let mut store = DesignStore::new();
//! store.load_empty("shop-42");
//!
//! let hero = store.add_section("hero", None)?;
//! store.duplicate_section(&hero)?;
//! store.reorder_sections(1, 0)?;
//! store.undo();
//!
//! let ticket = store.begin_save()?;
//! // persist ticket.document under ticket.store_id ...
//! store.finish_save(ticket, result)?;
//! ```

mod config;
mod document;
mod drag;
mod errors;
mod mutations;
mod preview;
mod registry;
mod section;
mod store;
mod undo_stack;

pub use config::EditorConfig;
pub use document::{DesignDocument, DesignExport};
pub use drag::{resolve as resolve_drop, DragController, DragEvent, DragSource, DropTarget, KeyboardCommand};
pub use errors::{EditorError, ErrorKind};
pub use mutations::{move_item, Mutation, MutationResult};
pub use preview::{render_preview, PreviewBlock, PreviewFrame, PreviewSection, Viewport};
pub use registry::{
    block_template, lookup_block, lookup_section, section_template, BlockTemplate, BlockType,
    SectionTemplate, SectionType,
};
pub use section::*;
pub use store::{BlockSelection, DesignStore, SaveTicket};
pub use undo_stack::{HistoryEntry, UndoStack, DEFAULT_HISTORY_LIMIT};
