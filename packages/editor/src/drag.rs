//! # Drag Interaction Adapter
//!
//! Turns pointer and keyboard drag gestures into [`Mutation`]s. The
//! adapter knows nothing about any particular drag-and-drop library: a
//! host translates its library's events into [`DragEvent`] or
//! [`KeyboardCommand`] values and applies whatever mutation comes back.
//!
//! ```text
//! Start(source) ─▶ Over(target)* ─▶ Drop   ─▶ Some(Mutation)
//!                                 └▶ Cancel ─▶ None
//! ```
//!
//! Intermediate `Over` events only move the drop indicator. A drop with
//! no valid target abandons the gesture without producing a mutation.

use crate::{DesignDocument, Mutation};
use serde::{Deserialize, Serialize};

/// What is being dragged
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum DragSource {
    /// An existing section at `index`
    Section { index: usize },

    /// An existing block at `index` inside `section_id`
    Block { section_id: String, index: usize },

    /// A new section from the palette
    SectionPalette { section_type: String },

    /// A new block from the palette
    BlockPalette { block_type: String },
}

/// Where the dragged item would land; `index` is its final position
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum DropTarget {
    SectionList { index: usize },
    BlockList { section_id: String, index: usize },
}

/// Library-neutral pointer gesture events
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "camelCase")]
pub enum DragEvent {
    Start(DragSource),
    Over(Option<DropTarget>),
    Drop,
    Cancel,
}

/// Keyboard-driven dragging (pick up, move, drop)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", content = "data", rename_all = "camelCase")]
pub enum KeyboardCommand {
    PickUp(DragSource),
    MoveUp,
    MoveDown,
    Drop,
    Cancel,
}

#[derive(Debug, Clone, Default, PartialEq)]
enum DragState {
    #[default]
    Idle,
    Dragging {
        source: DragSource,
        over: Option<DropTarget>,
    },
}

#[derive(Debug, Clone, Default)]
pub struct DragController {
    state: DragState,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    pub fn source(&self) -> Option<&DragSource> {
        match &self.state {
            DragState::Dragging { source, .. } => Some(source),
            DragState::Idle => None,
        }
    }

    /// Current drop indicator position (transient feedback only)
    pub fn indicator(&self) -> Option<&DropTarget> {
        match &self.state {
            DragState::Dragging { over, .. } => over.as_ref(),
            DragState::Idle => None,
        }
    }

    /// Feed a pointer event; returns the mutation to commit on a valid drop
    pub fn handle(&mut self, event: DragEvent) -> Option<Mutation> {
        match event {
            DragEvent::Start(source) => {
                self.state = DragState::Dragging { source, over: None };
                None
            }
            DragEvent::Over(target) => {
                if let DragState::Dragging { over, .. } = &mut self.state {
                    *over = target;
                }
                None
            }
            DragEvent::Drop => self.finish(),
            DragEvent::Cancel => {
                self.state = DragState::Idle;
                None
            }
        }
    }

    /// Feed a keyboard command. `design` bounds the indicator movement.
    pub fn handle_key(&mut self, command: KeyboardCommand, design: &DesignDocument) -> Option<Mutation> {
        match command {
            KeyboardCommand::PickUp(source) => {
                let over = home_target(&source, design);
                self.state = DragState::Dragging { source, over };
                None
            }
            KeyboardCommand::MoveUp => {
                self.nudge(design, -1);
                None
            }
            KeyboardCommand::MoveDown => {
                self.nudge(design, 1);
                None
            }
            KeyboardCommand::Drop => self.finish(),
            KeyboardCommand::Cancel => {
                self.state = DragState::Idle;
                None
            }
        }
    }

    fn nudge(&mut self, design: &DesignDocument, delta: isize) {
        let DragState::Dragging { source, over } = &mut self.state else {
            return;
        };
        if over.is_none() {
            *over = home_target(source, design);
            return;
        }
        let Some(target) = over.as_mut() else {
            return;
        };

        let (index, len) = match target {
            DropTarget::SectionList { index } => {
                // A palette insert may land one past the end
                let len = design.layout.len() + usize::from(is_palette(source));
                (index, len)
            }
            DropTarget::BlockList { section_id, index } => {
                let blocks = design
                    .find_section(section_id.as_str())
                    .map(|s| s.blocks.len())
                    .unwrap_or(0);
                (index, blocks + usize::from(is_palette(source)))
            }
        };

        if len == 0 {
            return;
        }
        let next = (*index as isize + delta).clamp(0, len as isize - 1);
        *index = next as usize;
    }

    fn finish(&mut self) -> Option<Mutation> {
        let DragState::Dragging { source, over } = std::mem::take(&mut self.state) else {
            return None;
        };
        resolve(source, over?)
    }
}

fn is_palette(source: &DragSource) -> bool {
    matches!(
        source,
        DragSource::SectionPalette { .. } | DragSource::BlockPalette { .. }
    )
}

/// Starting indicator position for a keyboard pick-up
fn home_target(source: &DragSource, design: &DesignDocument) -> Option<DropTarget> {
    match source {
        DragSource::Section { index } => Some(DropTarget::SectionList { index: *index }),
        DragSource::Block { section_id, index } => Some(DropTarget::BlockList {
            section_id: section_id.clone(),
            index: *index,
        }),
        DragSource::SectionPalette { .. } => Some(DropTarget::SectionList {
            index: design.layout.len(),
        }),
        // Palette blocks need the host to say which section they go into
        DragSource::BlockPalette { .. } => None,
    }
}

/// Map a (source, target) pair onto a store mutation
pub fn resolve(source: DragSource, target: DropTarget) -> Option<Mutation> {
    match (source, target) {
        (DragSource::Section { index: from }, DropTarget::SectionList { index: to }) => {
            (from != to).then_some(Mutation::ReorderSections { from, to })
        }
        (DragSource::SectionPalette { section_type }, DropTarget::SectionList { index }) => {
            Some(Mutation::AddSection {
                section_type,
                index: Some(index),
            })
        }
        (
            DragSource::Block {
                section_id,
                index: from,
            },
            DropTarget::BlockList {
                section_id: target_section,
                index: to,
            },
        ) => {
            // Blocks only reorder within their own section
            (section_id == target_section && from != to).then_some(Mutation::ReorderBlocks {
                section_id,
                from,
                to,
            })
        }
        (DragSource::BlockPalette { block_type }, DropTarget::BlockList { section_id, index }) => {
            Some(Mutation::AddBlock {
                section_id,
                block_type,
                index: Some(index),
            })
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn design_with(sections: usize) -> DesignDocument {
        let mut doc = DesignDocument::default();
        for _ in 0..sections {
            Mutation::AddSection {
                section_type: "rich_text".into(),
                index: None,
            }
            .apply(&mut doc)
            .unwrap();
        }
        doc
    }

    #[test]
    fn test_pointer_drag_produces_single_reorder() {
        let mut drag = DragController::new();

        assert_eq!(drag.handle(DragEvent::Start(DragSource::Section { index: 2 })), None);
        assert_eq!(
            drag.handle(DragEvent::Over(Some(DropTarget::SectionList { index: 1 }))),
            None
        );
        assert_eq!(
            drag.handle(DragEvent::Over(Some(DropTarget::SectionList { index: 0 }))),
            None
        );
        assert_eq!(drag.indicator(), Some(&DropTarget::SectionList { index: 0 }));

        assert_eq!(
            drag.handle(DragEvent::Drop),
            Some(Mutation::ReorderSections { from: 2, to: 0 })
        );
        assert!(!drag.is_dragging());
    }

    #[test]
    fn test_drop_outside_target_is_abandoned() {
        let mut drag = DragController::new();
        drag.handle(DragEvent::Start(DragSource::Section { index: 0 }));
        drag.handle(DragEvent::Over(Some(DropTarget::SectionList { index: 1 })));
        drag.handle(DragEvent::Over(None));

        assert_eq!(drag.handle(DragEvent::Drop), None);
        assert!(!drag.is_dragging());
    }

    #[test]
    fn test_cancel_and_same_position_drop() {
        let mut drag = DragController::new();
        drag.handle(DragEvent::Start(DragSource::Section { index: 1 }));
        drag.handle(DragEvent::Over(Some(DropTarget::SectionList { index: 0 })));
        assert_eq!(drag.handle(DragEvent::Cancel), None);
        assert_eq!(drag.handle(DragEvent::Drop), None);

        drag.handle(DragEvent::Start(DragSource::Section { index: 1 }));
        drag.handle(DragEvent::Over(Some(DropTarget::SectionList { index: 1 })));
        assert_eq!(drag.handle(DragEvent::Drop), None);
    }

    #[test]
    fn test_palette_drop_inserts_section() {
        let mut drag = DragController::new();
        drag.handle(DragEvent::Start(DragSource::SectionPalette {
            section_type: "gallery".into(),
        }));
        drag.handle(DragEvent::Over(Some(DropTarget::SectionList { index: 1 })));

        assert_eq!(
            drag.handle(DragEvent::Drop),
            Some(Mutation::AddSection {
                section_type: "gallery".into(),
                index: Some(1)
            })
        );
    }

    #[test]
    fn test_blocks_do_not_cross_sections() {
        let source = DragSource::Block {
            section_id: "a".into(),
            index: 0,
        };
        assert_eq!(
            resolve(
                source.clone(),
                DropTarget::BlockList {
                    section_id: "b".into(),
                    index: 1
                }
            ),
            None
        );
        assert_eq!(
            resolve(
                source,
                DropTarget::BlockList {
                    section_id: "a".into(),
                    index: 1
                }
            ),
            Some(Mutation::ReorderBlocks {
                section_id: "a".into(),
                from: 0,
                to: 1
            })
        );
        assert_eq!(
            resolve(
                DragSource::Section { index: 0 },
                DropTarget::BlockList {
                    section_id: "a".into(),
                    index: 0
                }
            ),
            None
        );
    }

    #[test]
    fn test_keyboard_reorder_is_clamped() {
        let design = design_with(3);
        let mut drag = DragController::new();

        drag.handle_key(KeyboardCommand::PickUp(DragSource::Section { index: 1 }), &design);
        drag.handle_key(KeyboardCommand::MoveDown, &design);
        drag.handle_key(KeyboardCommand::MoveDown, &design);
        drag.handle_key(KeyboardCommand::MoveDown, &design);
        assert_eq!(drag.indicator(), Some(&DropTarget::SectionList { index: 2 }));

        assert_eq!(
            drag.handle_key(KeyboardCommand::Drop, &design),
            Some(Mutation::ReorderSections { from: 1, to: 2 })
        );

        drag.handle_key(KeyboardCommand::PickUp(DragSource::Section { index: 0 }), &design);
        drag.handle_key(KeyboardCommand::MoveUp, &design);
        assert_eq!(drag.handle_key(KeyboardCommand::Drop, &design), None);
    }

    #[test]
    fn test_keyboard_palette_starts_at_end() {
        let design = design_with(2);
        let mut drag = DragController::new();

        drag.handle_key(
            KeyboardCommand::PickUp(DragSource::SectionPalette {
                section_type: "hero".into(),
            }),
            &design,
        );
        assert_eq!(drag.indicator(), Some(&DropTarget::SectionList { index: 2 }));
        drag.handle_key(KeyboardCommand::MoveUp, &design);
        drag.handle_key(KeyboardCommand::MoveUp, &design);

        assert_eq!(
            drag.handle_key(KeyboardCommand::Drop, &design),
            Some(Mutation::AddSection {
                section_type: "hero".into(),
                index: Some(0)
            })
        );
    }
}
