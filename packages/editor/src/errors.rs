//! Error types for the editor

use thiserror::Error;

/// Coarse classification used by hosts to decide how to surface an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Rejected synchronously; the tree is unchanged and the user sees a message.
    Validation,
    /// Load/save failure. Load degrades to an empty tree, save keeps the tree dirty.
    Network,
    /// Stale section/block reference. Hosts usually treat this as a no-op.
    NotFound,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EditorError {
    #[error("Unknown section type: {0}")]
    UnknownSectionType(String),

    #[error("Unknown block type: {0}")]
    UnknownBlockType(String),

    #[error("Index {index} out of range for list of length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Unknown field '{field}' for {kind}")]
    UnknownField { kind: String, field: String },

    #[error("Invalid patch: {0}")]
    InvalidPatch(String),

    #[error("Invalid import: {0}")]
    InvalidImport(String),

    #[error("Duplicate id: {0}")]
    DuplicateId(String),

    #[error("Cannot select while in preview mode")]
    PreviewMode,

    #[error("A save is already in progress")]
    SaveInProgress,

    #[error("No store id has been loaded")]
    MissingStoreId,

    #[error("Section not found: {0}")]
    SectionNotFound(String),

    #[error("Block {block_id} not found in section {section_id}")]
    BlockNotFound { section_id: String, block_id: String },

    #[error("Persistence error: {0}")]
    Persistence(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl EditorError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            EditorError::SectionNotFound(_) | EditorError::BlockNotFound { .. } => {
                ErrorKind::NotFound
            }
            EditorError::Persistence(_) => ErrorKind::Network,
            _ => ErrorKind::Validation,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }
}

impl From<serde_json::Error> for EditorError {
    fn from(e: serde_json::Error) -> Self {
        EditorError::Serialization(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(
            EditorError::UnknownSectionType("carousel".into()).kind(),
            ErrorKind::Validation
        );
        assert_eq!(
            EditorError::SectionNotFound("section-1".into()).kind(),
            ErrorKind::NotFound
        );
        assert_eq!(
            EditorError::Persistence("timeout".into()).kind(),
            ErrorKind::Network
        );
        assert!(EditorError::BlockNotFound {
            section_id: "s".into(),
            block_id: "b".into()
        }
        .is_not_found());
    }
}
